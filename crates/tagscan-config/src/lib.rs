//! # tagscan-config
//!
//! Layered configuration loading for tagscan using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TAGSCAN_*` prefix, `__` as separator)
//! 2. Project-level `.tagscan/config.toml`
//! 3. User-level `~/.config/tagscan/config.toml`
//! 4. Built-in defaults
//!
//! Command-line flags are applied on top by the binary.
//!
//! # Environment Variable Mapping
//!
//! `TAGSCAN_GRAMMAR__TAG_POLICY` -> `grammar.tag_policy`,
//! `TAGSCAN_WORKERS__THREADS` -> `workers.threads`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tagscan_config::TagscanConfig;
//!
//! let config = TagscanConfig::load_with_dotenv().expect("config");
//! println!("collating with {}", config.collation.policy);
//! ```

mod collation;
mod corpus;
mod error;
mod grammar;
mod output;
mod workers;

pub use collation::CollationConfig;
pub use corpus::CorpusConfig;
pub use error::ConfigError;
pub use grammar::GrammarConfig;
pub use output::{OutputConfig, OutputFormat};
pub use workers::WorkersConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the project-local configuration directory.
pub const PROJECT_DIR: &str = ".tagscan";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TagscanConfig {
    #[serde(default)]
    pub grammar: GrammarConfig,
    #[serde(default)]
    pub collation: CollationConfig,
    #[serde(default)]
    pub workers: WorkersConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl TagscanConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be read or a value fails
    /// validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on
    /// top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(PROJECT_DIR).join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("TAGSCAN_").split("__"))
    }

    /// Reject values no run could use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers.stack_size_mb == 0 {
            return Err(ConfigError::invalid(
                "workers.stack_size_mb",
                "must be at least 1",
            ));
        }
        if self.workers.queue_factor == 0 {
            return Err(ConfigError::invalid(
                "workers.queue_factor",
                "must be at least 1",
            ));
        }
        if self.corpus.include.iter().any(|glob| glob.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "corpus.include",
                "patterns must not be empty",
            ));
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tagscan").join("config.toml"))
    }
}
