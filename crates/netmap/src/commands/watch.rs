use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use notify_debouncer_mini::new_debouncer;
use notify_debouncer_mini::notify::{RecursiveMode, Watcher};

use netmap::TopologySession;
use netmap::config::Config;

use super::{DynEngine, build_session, load, read_source, runtime, write_model};
use crate::cli::RenderArgs;

const DEBOUNCE: Duration = Duration::from_millis(250);

pub fn run(args: &RenderArgs, quiet: bool) -> Result<()> {
    let path = args
        .file
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", args.file.display()))?;
    let dir = path
        .parent()
        .context("Watched file has no parent directory")?
        .to_path_buf();
    let file_name = path
        .file_name()
        .context("Watched path is not a file")?
        .to_os_string();

    let config = Config::load_or_default();
    let mut session = build_session(args, &config);
    let rt = runtime()?;

    // A broken first version is reported like any later one; keep watching.
    match rt.block_on(reload(&mut session, &path, args)) {
        Ok(true) if !quiet => announce(&session, args),
        Ok(_) => {}
        Err(e) => report(&e),
    }

    let (tx, rx) = mpsc::channel();
    let mut debouncer = new_debouncer(DEBOUNCE, tx)?;
    debouncer
        .watcher()
        .watch(&dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", dir.display()))?;

    if !quiet {
        eprintln!("{} {}", "Watching".cyan().bold(), path.display());
    }

    for result in rx {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(error = %e, "file watch error");
                continue;
            }
        };
        if !events
            .iter()
            .any(|e| e.path.file_name() == Some(file_name.as_os_str()))
        {
            continue;
        }

        match rt.block_on(reload(&mut session, &path, args)) {
            Ok(true) if !quiet => announce(&session, args),
            Ok(_) => {}
            Err(e) => report(&e),
        }
    }
    Ok(())
}

/// Re-read the file and re-render. Returns `false` when nothing new was written: the content
/// is already laid out, or the layout failed and the previous model stays.
async fn reload(
    session: &mut TopologySession<DynEngine>,
    path: &Path,
    args: &RenderArgs,
) -> Result<bool> {
    let text = read_source(path)?;
    if session.is_up_to_date(&text) {
        tracing::debug!("source unchanged, skipping");
        return Ok(false);
    }
    if !load(session, text).await? {
        return Ok(false);
    }
    write_model(session.graph(), args.output.as_deref(), args.compact)?;
    Ok(true)
}

fn announce(session: &TopologySession<DynEngine>, args: &RenderArgs) {
    let graph = session.graph();
    let target = args
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());
    eprintln!(
        "{}",
        format!(
            "Rendered {} node(s) and {} edge(s) to {target}",
            graph.nodes.len(),
            graph.edges.len()
        )
        .green()
    );
}

fn report(err: &anyhow::Error) {
    eprintln!("{} {err:#}", "error:".red().bold());
}
