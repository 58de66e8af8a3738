//! Command implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pyra_icon_normalizer::config::Config;
use pyra_icon_normalizer::container::inspect_icon;
use pyra_icon_normalizer::locate::{default_search_dirs, locate_icon};
use pyra_icon_normalizer::normalize::normalize_file;
use pyra_icon_normalizer::pipeline::{PrepareRequest, prepare};
use pyra_icon_normalizer::source::resolve_source;

use crate::{Commands, ConfigAction};

/// Run a parsed command against `config`.
///
/// `config_path` is the explicit `--config` file, if any.
pub fn execute(command: Commands, config: &Config, config_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Prepare {
            root,
            source,
            output,
        } => {
            let request = PrepareRequest {
                root,
                source,
                output,
            };
            let prepared = prepare(&request, config)?;
            println!(
                "Wrote {} from {} ({})",
                prepared.output.display(),
                prepared.source.path.display(),
                prepared.source.kind
            );
        }
        Commands::Normalize { source, dest } => {
            config.icon.validate().context("Invalid icon configuration")?;
            let normalized = normalize_file(&source, &dest, &config.icon)?;
            let subject = normalized.subject;
            println!(
                "Wrote {} (subject {}x{} at {},{}; canvas {})",
                dest.display(),
                subject.width,
                subject.height,
                subject.x,
                subject.y,
                normalized.canvas_side
            );
        }
        Commands::Resolve { root } => {
            match resolve_source(&root, &config.source, &config.output.file_name)? {
                Some(choice) => println!("{} ({})", choice.path.display(), choice.kind),
                None => anyhow::bail!("No icon source found in {}", root.display()),
            }
        }
        Commands::Inspect { icon } => {
            let entries = inspect_icon(&icon)?;
            println!("{}: {} entries", icon.display(), entries.len());
            for entry in entries {
                let format = if entry.png { "png" } else { "bmp" };
                println!(
                    "  {}x{} {}bpp {}",
                    entry.width, entry.height, entry.bits_per_pixel, format
                );
            }
        }
        Commands::Locate { dirs } => {
            let dirs = if dirs.is_empty() {
                default_search_dirs()
            } else {
                dirs
            };
            match locate_icon(&dirs, &config.locate.names) {
                Some(path) => println!("{}", path.display()),
                None => anyhow::bail!("No icon found in {:?}", dirs),
            }
        }
        Commands::Config { action } => config_command(action, config, config_path)?,
    }

    Ok(())
}

fn resolved_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path(),
    }
}

fn config_command(action: ConfigAction, config: &Config, config_path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let content =
                toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;
            print!("{content}");
        }
        ConfigAction::Path => {
            println!("{}", resolved_config_path(config_path)?.display());
        }
        ConfigAction::Init { force } => {
            let path = resolved_config_path(config_path)?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists: {} (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default().save_to(&path)?;
            tracing::info!(path = %path.display(), "Wrote default config");
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;
