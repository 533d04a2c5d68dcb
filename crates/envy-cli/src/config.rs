//! `envy.toml` configuration.
//!
//! ```toml
//! [merge]
//! strategy = "theirs"
//!
//! [output]
//! format = "json"
//! pretty = true
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context;
use envy_merge::MergeConfig;
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

/// Name of the config file picked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "envy.toml";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub merge: MergeConfig,
    pub output: OutputConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Indent JSON and TOML output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            pretty: true,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Load the explicit config file if given, else `envy.toml` in `dir` if it
    /// exists, else defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using discovered config");
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }
}
