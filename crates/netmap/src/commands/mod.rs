pub mod check;
pub mod completion;
pub mod config;
pub mod render;
pub mod watch;

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use netmap::config::Config;
use netmap::layout::LayoutEngine;
use netmap::layout::engine::{ElkHttpEngine, ScatterEngine};
use netmap::{SessionError, TopologyGraph, TopologySession};

use crate::cli::RenderArgs;

pub type DynEngine = Box<dyn LayoutEngine + Send + Sync>;

/// Session configured from the config file, with command-line flags on top.
pub fn build_session(args: &RenderArgs, config: &Config) -> TopologySession<DynEngine> {
    let mut options = config.session_options();
    if let Some(algorithm) = args.algorithm {
        options.algorithm = algorithm.into();
    }
    if args.hide_ports {
        options.show_ports = false;
    }

    let engine: DynEngine = match args.engine_url.as_deref().or(config.endpoint()) {
        Some(url) => {
            tracing::debug!(url, "using ELK layout service");
            Box::new(ElkHttpEngine::new(url))
        }
        None => {
            tracing::warn!("no layout engine configured, scattering nodes offline");
            Box::new(ScatterEngine)
        }
    };
    TopologySession::new(engine, options)
}

pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}

pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Load `text` into the session. A layout failure is reported but not fatal: the session keeps
/// whatever it had before. Returns `false` in that case.
pub async fn load(session: &mut TopologySession<DynEngine>, text: String) -> Result<bool> {
    match session.load_source(text).await {
        Ok(_) => Ok(true),
        Err(SessionError::Layout(e)) => {
            eprintln!("{} {e}", "warning:".yellow().bold());
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Write the model as JSON to `output`, or stdout.
pub fn write_model(graph: &TopologyGraph, output: Option<&Path>, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(graph)?
    } else {
        serde_json::to_string_pretty(graph)?
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => println!("{json}"),
    }
    Ok(())
}
