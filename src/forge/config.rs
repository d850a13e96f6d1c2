//! Configuration loader
//!
//! `defaults/tokenforge.default.toml` is embedded into the crate so that the documented
//! defaults and runtime behavior stay in sync. Callers layer their own files and key
//! overrides on top through [`Loader`] before deserializing into [`ForgeConfig`].

use crate::forge::token::TokenKind;
use crate::forge::transforms::calls::{CallOptions, CaseSensitivity};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/tokenforge.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct ForgeConfig {
    pub calls: CallsConfig,
    pub pipeline: PipelineConfig,
}

/// Policy handed to call discovery.
#[derive(Debug, Clone, Deserialize)]
pub struct CallsConfig {
    pub case_sensitive: bool,
    pub ignore: Vec<String>,
}

impl CallsConfig {
    pub fn options(&self) -> CallOptions {
        let case = if self.case_sensitive {
            CaseSensitivity::Sensitive
        } else {
            CaseSensitivity::Insensitive
        };
        CallOptions::new(case).with_ignored(self.ignore.iter().cloned())
    }
}

/// Which passes run, and in what merge order.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub discover_calls: bool,
    pub discover_loops: bool,
    /// Replaces the standard merge order when set.
    #[serde(default)]
    pub merge_order: Option<Vec<TokenKind>>,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file, ignored if absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ForgeConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ForgeConfig, ConfigError> {
    Loader::new().build()
}
