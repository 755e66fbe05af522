//! Asset status vocabulary loading from config.toml
//!
//! The statuses listed in config.toml are used to seed the `asset_statuses` table on
//! startup. When no file is present the built-in vocabulary is used.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Vocabulary used when config.toml is absent
pub const DEFAULT_STATUSES: [&str; 4] = ["in-use", "in-stock", "under-repair", "written-off"];

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Status names to seed, in id order
    pub statuses: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            statuses: DEFAULT_STATUSES.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Loads the status vocabulary from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - The vocabulary is empty
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    parse_config(&contents)
}

fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    if config.statuses.iter().all(|s| s.trim().is_empty()) {
        return Err(Error::Config {
            message: "config.toml must list at least one status".to_string(),
        });
    }
    Ok(config)
}

/// Loads the vocabulary from ./config.toml, falling back to [`DEFAULT_STATUSES`]
/// when the file does not exist.
pub fn load_default_config() -> Result<Config> {
    let path = Path::new("config.toml");
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_status_config() {
        let config = parse_config(
            r#"
            statuses = ["in-use", "lost"]
        "#,
        )
        .unwrap();
        assert_eq!(config.statuses, vec!["in-use", "lost"]);
    }

    #[test]
    fn test_empty_vocabulary_is_rejected() {
        let result = parse_config("statuses = []");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_default_vocabulary() {
        let config = Config::default();
        assert_eq!(config.statuses.len(), DEFAULT_STATUSES.len());
        assert!(config.statuses.contains(&"in-use".to_string()));
    }
}
