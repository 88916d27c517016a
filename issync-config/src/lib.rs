//! Shared configuration loader for the issync tools.
//!
//! `defaults/issync.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files and
//! `ISSYNC_*` environment variables on top of those defaults via [`Loader`]
//! before deserializing into [`IssyncConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use issync_blocks::notion::PropertyNames;
use issync_blocks::ParseOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/issync.default.toml");

/// Top-level configuration consumed by issync applications.
#[derive(Debug, Clone, Deserialize)]
pub struct IssyncConfig {
    pub markdown: MarkdownConfig,
    pub notion: NotionConfig,
    pub github: GithubConfig,
    pub log: LogConfig,
}

/// Mirrors the knobs exposed by the Markdown import.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub strip_html: bool,
    pub math: bool,
}

impl From<&MarkdownConfig> for ParseOptions {
    fn from(config: &MarkdownConfig) -> Self {
        ParseOptions {
            strip_html: config.strip_html,
            math: config.math,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotionConfig {
    pub database_id: String,
    pub properties: PropertiesConfig,
}

/// Database property names, one per synced issue field.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertiesConfig {
    pub title: String,
    pub number: String,
    pub state: String,
    pub labels: String,
    pub assignees: String,
    pub milestone: String,
    pub author: String,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&PropertiesConfig> for PropertyNames {
    fn from(config: &PropertiesConfig) -> Self {
        PropertyNames {
            title: config.title.clone(),
            number: config.number.clone(),
            state: config.state.clone(),
            labels: config.labels.clone(),
            assignees: config.assignees.clone(),
            milestone: config.milestone.clone(),
            author: config.author.clone(),
            url: config.url.clone(),
            created_at: config.created_at.clone(),
            updated_at: config.updated_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    pub repository: String,
}

impl GithubConfig {
    /// The configured `owner/name`, if any.
    pub fn repository(&self) -> Option<&str> {
        Some(self.repository.trim()).filter(|repo| !repo.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub level: String,
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

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `ISSYNC_*` environment variables, `__` separating nested keys
    /// (`ISSYNC_NOTION__DATABASE_ID`).
    pub fn with_env(self) -> Self {
        self.with_environment(env_source())
    }

    fn with_environment(mut self, environment: Environment) -> Self {
        self.builder = self.builder.add_source(environment);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<IssyncConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("ISSYNC")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<IssyncConfig, ConfigError> {
    Loader::new().build()
}
