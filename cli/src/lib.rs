//! `pyra-iconctl`: prepare and inspect the PyRA application icon.

pub mod commands;
pub mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pyra_icon_normalizer::config::Config;

#[derive(Parser)]
#[command(name = "pyra-iconctl")]
#[command(about = "Prepare the PyRA application icon for packaging")]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of ~/.config/pyra-icon/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the source image in a project root and write the generated icon
    Prepare {
        /// Project root holding the candidate images
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Use this image instead of resolving one
        #[arg(long)]
        source: Option<PathBuf>,
        /// Write the icon here instead of <root>/<output.file_name>
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Normalize a single image into a multi-resolution icon
    Normalize {
        /// Source image (png, jpeg, bmp or ico)
        source: PathBuf,
        /// Destination .ico file
        dest: PathBuf,
    },
    /// Show which image `prepare` would use
    Resolve {
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
    /// List the entries of an icon file
    Inspect {
        icon: PathBuf,
    },
    /// Show the icon the packaged application would load
    Locate {
        /// Directory to search (repeatable); defaults to the executable's directory and the cwd
        #[arg(long = "dir")]
        dirs: Vec<PathBuf>,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Load the config from `explicit` or the default location.
pub fn load_config(explicit: Option<&std::path::Path>) -> anyhow::Result<Config> {
    match explicit {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Entry point for the CLI: parses arguments, configures logging and runs the command.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let _guard = logging::init(&config.logging)?;

    commands::execute(cli.command, &config, cli.config.as_deref())
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
