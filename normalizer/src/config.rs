//! Configuration management for pyra-icon.
//!
//! Handles loading, saving, validating and providing defaults for the icon
//! preparation settings.

use anyhow::{Context, Result};
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest edge an ICO directory entry can describe.
pub const MAX_ICO_SIZE: u32 = 256;

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub icon: IconConfig,
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub locate: LocateConfig,
    pub logging: LoggingConfig,
}

/// Geometry and encoding of the generated icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// Edge length of the square master image every entry is derived from.
    pub master_size: u32,
    /// Embedded entry sizes, in container order.
    pub sizes: Vec<u32>,
    /// Resampling filter for the master and for every entry.
    pub filter: ResampleFilter,
}

/// Resampling filter names accepted in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Where to look for the source image inside a project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Explicit `.ico` files, highest priority, first existing wins.
    pub ico_names: Vec<String>,
    /// Specifically named PNG, checked after the `.ico` names.
    pub png_name: String,
    /// File names containing this marker are never picked as a source.
    pub generated_marker: String,
}

/// Where the generated icon is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File name of the generated icon, relative to the project root.
    pub file_name: String,
}

/// Runtime icon lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocateConfig {
    /// Icon file names tried in each search directory, in order.
    pub names: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: LogLevel,
    /// Write logs to the state directory instead of stderr.
    pub to_file: bool,
    /// Write logs to this file instead of stderr; takes precedence over `to_file`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// File logs should go to, if any.
    pub fn log_file(&self) -> Result<Option<PathBuf>> {
        match &self.file {
            Some(path) => Ok(Some(path.clone())),
            None if self.to_file => pyra_icon_common::dirs::log_path().map(Some),
            None => Ok(None),
        }
    }
}

/// Log verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to a tracing filter directive string covering the workspace crates.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "pyra_icon_normalizer=error,pyra_iconctl=error",
            LogLevel::Warn => "pyra_icon_normalizer=warn,pyra_iconctl=warn",
            LogLevel::Info => "pyra_icon_normalizer=info,pyra_iconctl=info",
            LogLevel::Debug => "pyra_icon_normalizer=debug,pyra_iconctl=debug",
            LogLevel::Trace => "pyra_icon_normalizer=trace,pyra_iconctl=trace",
        }
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            master_size: 512,
            sizes: vec![256, 128, 64, 48, 32, 16],
            filter: ResampleFilter::Lanczos3,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            ico_names: vec![
                "icon.ico".to_string(),
                "app.ico".to_string(),
                "PyRA.ico".to_string(),
            ],
            png_name: "PyRA.png".to_string(),
            generated_marker: ".generated.".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: "PyRA.generated.ico".to_string(),
        }
    }
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            names: vec![
                "icon.ico".to_string(),
                "app.ico".to_string(),
                "PyRA.ico".to_string(),
                "PyRA.generated.ico".to_string(),
            ],
        }
    }
}

impl IconConfig {
    /// Resampling filter as understood by the `image` crate.
    pub fn filter_type(&self) -> FilterType {
        self.filter.into()
    }

    /// Check the sizes against what an ICO container can hold.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.sizes.is_empty(), "icon.sizes must not be empty");

        for (i, &size) in self.sizes.iter().enumerate() {
            anyhow::ensure!(
                (1..=MAX_ICO_SIZE).contains(&size),
                "icon size {size} is outside 1..={MAX_ICO_SIZE}"
            );
            anyhow::ensure!(
                !self.sizes[..i].contains(&size),
                "icon size {size} is listed more than once"
            );
        }

        let largest = self.sizes.iter().copied().max().unwrap_or_default();
        anyhow::ensure!(
            self.master_size >= largest,
            "icon.master_size {} is smaller than the largest entry {largest}",
            self.master_size
        );
        Ok(())
    }
}

impl Config {
    /// Returns the default config file path.
    /// `~/.config/pyra-icon/config.toml`
    pub fn config_path() -> Result<PathBuf> {
        pyra_icon_common::dirs::config_path()
    }

    /// Load configuration from the default path.
    /// Returns defaults if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file as TOML")
    }

    /// Reject settings that would produce an unusable icon.
    pub fn validate(&self) -> Result<()> {
        self.icon.validate()?;
        anyhow::ensure!(
            !self.output.file_name.trim().is_empty(),
            "output.file_name must not be empty"
        );
        Ok(())
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
