//! Error types for meetcost-core
//!
//! Only configuration I/O can fail. Ledger derivations are total and never
//! return errors; bad rate input degrades to a zero rate instead.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for meetcost operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file: {path}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ===================
    // Parse Errors
    // ===================
    #[error("Failed to parse JSON in {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Config directory not found")]
    ConfigDirNotFound,
}

impl CoreError {
    /// Actionable hint shown next to the error, if there is one
    pub fn suggestion(&self) -> Option<String> {
        match self {
            CoreError::ConfigRead { path, .. } => {
                Some(format!("Check permissions: chmod +r {}", path.display()))
            }
            CoreError::ConfigWrite { path, .. } => path
                .parent()
                .map(|dir| format!("Check the directory is writable: {}", dir.display())),
            CoreError::ConfigParse { .. } => {
                Some("Validate JSON syntax with: jq . <file>".to_string())
            }
            CoreError::ConfigDirNotFound => {
                Some("Pass an explicit path with --config".to_string())
            }
            CoreError::InvalidConfig { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_mentions_path() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CoreError::ConfigParse {
            path: PathBuf::from("/tmp/config.json"),
            message: source.to_string(),
            source,
        };

        assert!(err.to_string().contains("/tmp/config.json"));
        assert!(err.suggestion().unwrap().contains("jq"));
    }

    #[test]
    fn test_invalid_config_has_no_suggestion() {
        let err = CoreError::InvalidConfig {
            message: "tick_interval_ms must be greater than 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration: tick_interval_ms must be greater than 0"
        );
        assert!(err.suggestion().is_none());
    }
}
