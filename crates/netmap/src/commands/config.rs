use anyhow::Result;
use colored::Colorize;

use netmap::config::Config;

use crate::cli::ConfigCommands;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    println!("{} {}", "Config file:".bold(), path.display());

    let config = if path.exists() {
        Config::load_from(&path)?
    } else {
        println!("{}", "(not created yet, showing defaults)".dimmed());
        Config::default()
    };

    println!();
    println!("  defaults.algorithm       {}", config.algorithm());
    println!("  defaults.show_ports      {}", config.show_ports());
    println!(
        "  layout_engine.endpoint   {}",
        config.endpoint().unwrap_or("(none, offline scatter)")
    );
    let size = config.node_size();
    println!("  layout_engine.node_width  {}", size.width);
    println!("  layout_engine.node_height {}", size.height);
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{}",
        format!("Set {key} = {value} in {}", path.display()).green()
    );
    Ok(())
}
