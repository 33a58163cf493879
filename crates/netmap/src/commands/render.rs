use anyhow::Result;
use colored::Colorize;

use netmap::config::Config;
use netmap::parse_topology;

use super::{build_session, load, read_source, runtime, write_model};
use crate::cli::RenderArgs;

pub fn run(args: &RenderArgs, quiet: bool) -> Result<()> {
    let text = read_source(&args.file)?;
    let config = Config::load_or_default();
    let mut session = build_session(args, &config);

    let placeholder;
    let graph = if runtime()?.block_on(load(&mut session, text.clone()))? {
        session.graph()
    } else {
        eprintln!("{}", "Nodes keep placeholder positions.".yellow());
        placeholder = parse_topology(&text, session.options().show_ports)?;
        &placeholder
    };
    write_model(graph, args.output.as_deref(), args.compact)?;

    if let (Some(path), false) = (&args.output, quiet) {
        eprintln!(
            "{}",
            format!(
                "Wrote {} node(s) and {} edge(s) to {} ({} layout)",
                graph.nodes.len(),
                graph.edges.len(),
                path.display(),
                session.options().algorithm
            )
            .green()
        );
    }
    Ok(())
}
