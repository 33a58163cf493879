use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use netmap::parse_topology;

use super::read_source;

pub fn run(file: &Path) -> Result<()> {
    let text = read_source(file)?;
    let graph = parse_topology(&text, true)?;

    let mut by_type: BTreeMap<&str, usize> = BTreeMap::new();
    for node in &graph.nodes {
        *by_type.entry(node.data.device_type.as_str()).or_default() += 1;
    }
    let ports: usize = graph.nodes.iter().map(|n| n.data.ports.len()).sum();
    let labelled = graph.edges.iter().filter(|e| !e.label.is_empty()).count();

    println!("{} {}", "✓".green().bold(), file.display());
    println!(
        "  {} device(s), {} link(s), {} port(s)",
        graph.nodes.len().to_string().bold(),
        graph.edges.len().to_string().bold(),
        ports.to_string().bold()
    );
    for (device_type, count) in &by_type {
        println!("    {:<10} {count}", device_type.cyan());
    }
    println!("  {labelled} of {} link(s) labelled", graph.edges.len());
    Ok(())
}
