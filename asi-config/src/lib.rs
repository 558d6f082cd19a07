//! Configuration loader for the asi tooling.
//!
//! `defaults/asi.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. The `asi` binary layers, in order: the defaults,
//! an optional [`PROJECT_FILE`] in the working directory, an explicit `--config`
//! file, and flag overrides. Later layers win.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/asi.default.toml");

/// File name picked up from a project directory when present.
pub const PROJECT_FILE: &str = "asi.toml";

/// Top-level configuration consumed by the `asi` binary.
#[derive(Debug, Clone, Deserialize)]
pub struct AsiConfig {
    pub probe: ProbeConfig,
    pub output: OutputConfig,
}

/// Controls how the probe walks a source file.
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    pub sites: SiteMode,
}

/// Which candidate positions the probe hands to the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SiteMode {
    /// After every significant token and every comment.
    TokenEnd,
    /// Only after the last token of a line.
    LineEnd,
}

impl fmt::Display for SiteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteMode::TokenEnd => write!(f, "token-end"),
            SiteMode::LineEnd => write!(f, "line-end"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub show_context: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Layers configuration sources over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Layer `dir/asi.toml` if it exists.
    pub fn with_project_file(self, dir: impl AsRef<Path>) -> Self {
        self.layer_toml(dir.as_ref().join(PROJECT_FILE), false)
    }

    /// Layer an explicit configuration file. Building fails if it is missing.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer_toml(path.as_ref().to_path_buf(), true)
    }

    /// Override a single dotted key, e.g. `probe.sites`.
    pub fn set_override<I>(self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        Ok(Self {
            builder: self.builder.set_override(key, value)?,
        })
    }

    pub fn build(self) -> Result<AsiConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    fn layer_toml(self, path: PathBuf, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        Self {
            builder: self.builder.add_source(source),
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
