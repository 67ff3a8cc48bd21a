//! Error types for the shooter.
//!
//! Gameplay itself has no failure domain: an exhausted bullet pool and a
//! release of an already-released slot are benign no-ops.  The only fallible
//! surface is loading and validating [`crate::config::GameConfig`].

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error enum.
#[derive(Debug, Error)]
pub enum GameError {
    /// The config file exists but could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::config::GameConfig`].
    #[error("failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A config value parsed fine but is outside its usable range.
    #[error("config value '{field}' = {value} is invalid (expected {expected})")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value, rendered for display.
        value: String,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

/// Convenience alias: a `Result` using [`GameError`] as the error type.
pub type GameResult<T> = Result<T, GameError>;

impl GameError {
    pub(crate) fn invalid(
        field: &'static str,
        value: impl ToString,
        expected: &'static str,
    ) -> Self {
        Self::InvalidConfig {
            field,
            value: value.to_string(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_message_names_field_and_range() {
        let err = GameError::invalid("player_speed", -3.0, "> 0");
        assert_eq!(
            err.to_string(),
            "config value 'player_speed' = -3 is invalid (expected > 0)"
        );
    }

    #[test]
    fn read_error_exposes_io_source() {
        use std::error::Error as _;
        let err = GameError::ConfigRead {
            path: PathBuf::from("assets/game.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("assets/game.toml"));
        assert!(err.source().is_some());
    }
}
