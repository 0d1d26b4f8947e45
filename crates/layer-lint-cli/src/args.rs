use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "layer-lint")]
#[command(about = "Rename text layers by style category and flag off-palette colors")]
#[command(version)]
pub struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.layer-lint)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rename and audit the text layers of an exported selection
    Run {
        /// Document snapshot (JSON)
        document: PathBuf,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Write renamed layer names back into the document
        #[arg(short, long)]
        write: bool,
    },

    /// Show the categories derived from the current rules
    Categories,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., frameLayerName, colorPaths.brand)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (frameLayerName, colorPaths.regular, colorPaths.inverse, colorPaths.brand)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,

    /// Rewrite the config file in canonical form
    Normalize,
}
