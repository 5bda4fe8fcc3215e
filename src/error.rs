//! Error types for configuration loading.
//!
//! The simulation itself has no failure modes; only reading settings and
//! tuning from JSON can fail.

use std::fmt;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    Parse(serde_json::Error),
    /// The config file could not be read.
    Io(std::io::Error),
    /// A value parsed but is outside its usable range.
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable description of the constraint.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Io(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::Invalid { field, reason } => {
                write!(f, "Invalid config value `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_display_names_field() {
        let err = ConfigError::invalid("bounce", "must be in [0, 1)");
        assert_eq!(
            err.to_string(),
            "Invalid config value `bounce`: must be in [0, 1)"
        );
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_parse_error_has_source() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ConfigError::from(parse);
        assert!(err.to_string().starts_with("Failed to parse config"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
