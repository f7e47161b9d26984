//! Optional TOML configuration for the CLI.
//!
//! ```toml
//! posts = "calendar/posts.json"
//! output_format = "json"
//! ```
//!
//! Command-line flags take precedence over the file. The IST offset is not
//! configurable.

use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "POSTCAL_CONFIG";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Default posts file for `agenda` and `stats`.
    pub posts: Option<PathBuf>,
    /// Default output format: json, text.
    pub output_format: Option<String>,
}

impl CliConfig {
    /// Load the config named by `explicit` or `$POSTCAL_CONFIG`.
    ///
    /// No config at all yields the defaults. A named file that cannot be
    /// read or parsed is an error.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match env::var_os(CONFIG_ENV) {
                Some(path) => PathBuf::from(path),
                None => return Ok(Self::default()),
            },
        };

        let config = Self::read(&path).map_err(|e| CliError::runtime(format!("{e:#}")))?;
        debug!(path = %path.display(), ?config, "Loaded config");
        Ok(config)
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config = CliConfig::parse("posts = \"posts.json\"\noutput_format = \"json\"\n").unwrap();
        assert_eq!(config.posts, Some(PathBuf::from("posts.json")));
        assert_eq!(config.output_format.as_deref(), Some("json"));
    }

    #[test]
    fn empty_config_is_default() {
        let config = CliConfig::parse("").unwrap();
        assert!(config.posts.is_none());
        assert!(config.output_format.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(CliConfig::parse("offset_minutes = 0\n").is_err());
    }

    #[test]
    fn missing_explicit_file_is_runtime_error() {
        let err = CliConfig::load(Some(Path::new("/nonexistent/postcal.toml"))).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_RUNTIME_ERROR);
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
