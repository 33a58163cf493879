use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use netmap::LayoutAlgorithm;

#[derive(Parser)]
#[command(name = "netmap")]
#[command(author, version, about)]
#[command(long_about = "Build positioned network topology graphs from connection tables.\n\n\
    Reads a CSV of links between devices and writes a JSON node/edge model with\n\
    coordinates, ready for a graph canvas.\n\n\
    Examples:\n  \
    netmap render links.csv                  Print the laid-out model\n  \
    netmap render links.csv -a layered -o out.json\n  \
    netmap check links.csv                   Validate and summarize\n  \
    netmap watch links.csv -o out.json       Re-render on every save")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a topology, lay it out, and write the model as JSON
    Render(RenderArgs),

    /// Validate a topology and print a summary without laying it out
    Check {
        /// CSV file with one link per row
        file: PathBuf,
    },

    /// Re-render whenever the file changes
    Watch(RenderArgs),

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
pub struct RenderArgs {
    /// CSV file with one link per row
    pub file: PathBuf,

    /// Layout algorithm (defaults to the configured one, or tree)
    #[arg(short, long, value_enum)]
    pub algorithm: Option<AlgorithmArg>,

    /// Leave port details out of edge labels and nodes
    #[arg(long)]
    pub hide_ports: bool,

    /// Write the model here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit compact JSON
    #[arg(long)]
    pub compact: bool,

    /// ELK layout service URL (overrides layout_engine.endpoint)
    #[arg(long)]
    pub engine_url: Option<String>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.algorithm, defaults.show_ports, layout_engine.endpoint)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AlgorithmArg {
    Tree,
    Layered,
    Radial,
}

impl From<AlgorithmArg> for LayoutAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Tree => LayoutAlgorithm::Tree,
            AlgorithmArg::Layered => LayoutAlgorithm::Layered,
            AlgorithmArg::Radial => LayoutAlgorithm::Radial,
        }
    }
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let quiet = self.quiet;
        match self.command {
            Commands::Render(args) => {
                ensure_exists(&args.file)?;
                crate::commands::render::run(&args, quiet)
            }
            Commands::Check { file } => {
                ensure_exists(&file)?;
                crate::commands::check::run(&file)
            }
            Commands::Watch(args) => {
                ensure_exists(&args.file)?;
                crate::commands::watch::run(&args, quiet)
            }
            Commands::Config { command } => crate::commands::config::run(command),
            Commands::Completion { shell } => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Commands::Version => {
                println!("netmap {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn ensure_exists(file: &std::path::Path) -> anyhow::Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }
    Ok(())
}
