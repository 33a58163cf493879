use std::collections::HashMap;
use std::fmt;

use crate::topology::Position;

/// Tag identifying one layout request. Later requests have larger tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Last known coordinate of every node in one topology session.
///
/// Written by layout results and drag completion. The generation only moves forward, even
/// across [`PositionStore::reset`], so a result tagged for an earlier request can always be
/// recognised as stale.
#[derive(Debug, Clone, Default)]
pub struct PositionStore {
    positions: HashMap<String, Position>,
    generation: Generation,
}

impl PositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node_id: &str) -> Option<Position> {
        self.positions.get(node_id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Position)> {
        self.positions.iter().map(|(id, p)| (id.as_str(), *p))
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Issue the tag for a new layout request, superseding every earlier one.
    pub fn advance(&mut self) -> Generation {
        self.generation = self.generation.next();
        self.generation
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation == generation
    }

    /// Update a single node, e.g. after a drag.
    pub fn record(&mut self, node_id: &str, position: Position) {
        self.positions.insert(node_id.to_string(), position);
    }

    /// Replace every stored position with a fresh layout.
    pub fn overwrite<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = (String, Position)>,
    {
        self.positions.clear();
        self.positions.extend(positions);
    }

    /// Forget all positions (new source, or session end) and supersede pending requests.
    pub fn reset(&mut self) {
        self.positions.clear();
        self.advance();
    }
}
