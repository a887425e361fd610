//! Configure the minifier command line.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::{cli::Opts, error::Error, MinifyOptions};

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "cssmin.toml";

/// Configuration for the command line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Break lines after a `}` once a line is longer than this many
    /// characters.
    ///
    /// Zero disables line breaks.
    pub line_break: Option<usize>,

    /// Directory of fixture files used by `check`.
    pub fixtures_dir: PathBuf,
}

/// Default value for [`Config::fixtures_dir`].
pub fn default_fixtures_dir() -> PathBuf {
    PathBuf::from("tests/fixtures")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_break: None,
            fixtures_dir: default_fixtures_dir(),
        }
    }
}

impl Config {
    /// Create a configuration from a [`Opts`] object.
    ///
    /// Reads the file given by `--config`, or `cssmin.toml` if it exists in
    /// the current directory, then applies command line overrides.
    pub fn from_opts(opts: &Opts) -> Result<Self> {
        let config_path = opts.config.clone().or_else(|| {
            Some(PathBuf::from(CONFIG_FILE_NAME)).filter(|path| path.exists())
        });

        let config = match config_path {
            Some(config_path) => {
                log::info!("Loading configuration from {:?}", config_path);

                Self::read_file(&config_path).map_err(|source| Error::LoadConfig {
                    config_path,
                    source,
                })?
            }
            None => Self::default(),
        };

        Ok(Self {
            line_break: opts.line_break.or(config.line_break),
            ..config
        })
    }

    /// Read a configuration from a TOML file.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::read_str(content)
    }

    /// Read a configuration from a TOML string.
    pub fn read_str(content: impl AsRef<str>) -> Result<Self> {
        Ok(toml::from_str(content.as_ref())?)
    }

    /// Return the options passed to the minifier.
    pub fn minify_options(&self) -> MinifyOptions {
        MinifyOptions {
            line_break: self.line_break,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::Config;

    #[test]
    fn load_config_str() {
        const CONTENT: &str = r#"
            line_break = 80
            fixtures_dir = "css"
        "#;

        let config = Config::read_str(CONTENT).unwrap();

        assert_eq!(config.line_break, Some(80));
        assert_eq!(config.fixtures_dir, PathBuf::from("css"));
        assert_eq!(config.minify_options().line_break, Some(80));
    }

    #[test]
    fn load_config_empty() {
        let config = Config::read_str("").unwrap();

        assert_eq!(config.line_break, None);
        assert_eq!(config.fixtures_dir, super::default_fixtures_dir());
    }

    #[test]
    fn reject_unknown_field() {
        assert!(Config::read_str("line_wrap = 80").is_err());
    }
}
