//! CLI configuration
//!
//! Sources, lowest precedence first: built-in defaults, `hrecord.toml` in the
//! working directory (or the file given with `--config`), then `HRECORD_*`
//! environment variables using `__` as the section separator
//! (`HRECORD_OUTPUT__INDENT=2`). Command-line flags are applied last by the
//! caller.

use anyhow::Context;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use hrecord_binding::WriteSettings;
use hrecord_types::blob::{BlobPolicy, DEFAULT_BLOCK_SIZE, DEFAULT_INLINE_THRESHOLD};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub logging: LoggingConfig,
    pub output: OutputConfig,
    pub blob: BlobConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for the hrecord crates unless `RUST_LOG` is set.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Spaces per nesting level; compact output when unset.
    pub indent: Option<usize>,
}

impl OutputConfig {
    pub fn write_settings(&self) -> WriteSettings {
        WriteSettings {
            indent: self.indent,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BlobConfig {
    pub inline_threshold: u64,
    pub block_size: u32,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            inline_threshold: DEFAULT_INLINE_THRESHOLD,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl BlobConfig {
    pub fn policy(&self) -> BlobPolicy {
        BlobPolicy {
            inline_threshold: self.inline_threshold,
            block_size: self.block_size,
        }
    }
}

impl CliConfig {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let builder = match path {
            Some(path) => Config::builder().add_source(File::from(path).required(true)),
            None => Config::builder().add_source(File::with_name("hrecord").required(false)),
        };
        let builder = builder.add_source(
            Environment::with_prefix("HRECORD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
        Self::build(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Self> {
        let config = builder
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize::<Self>()
            .context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.blob.block_size == 0 {
            anyhow::bail!("blob.block_size must be positive");
        }
        Ok(())
    }
}
