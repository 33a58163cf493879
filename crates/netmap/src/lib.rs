//! Build positioned network topology graphs from connection tables.
//!
//! A CSV table of links (`source,target,type` plus optional port and label columns) is parsed
//! into a node/edge model by [`topology`]. A [`layout::session::TopologySession`] then asks an
//! external layout engine for coordinates and remembers them, so that cosmetic changes and
//! manual drags do not throw the layout away.

pub mod config;
pub mod layout;
pub mod topology;

pub use layout::session::{LayoutOutcome, SessionError, SessionOptions, TopologySession};
pub use layout::{LayoutAlgorithm, LayoutEngine};
pub use topology::{TopologyError, TopologyGraph, parse_topology};
