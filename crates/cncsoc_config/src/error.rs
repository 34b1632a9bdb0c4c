//! Error types for configuration loading, validation and resolution.

/// Errors that can occur while turning a board configuration document into a
/// [`BoardConfig`](crate::BoardConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The document is malformed: bad syntax or types, missing fields,
    /// out-of-range sizes, duplicate channels or invalid addresses.
    #[error("invalid `{field}`: {reason}")]
    Validation {
        /// Path of the offending field (e.g. `outputs[3].pin`).
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The base platform reference does not name a known base system.
    #[error("cannot resolve base platform '{reference}': {reason}")]
    UnresolvedPlatform {
        /// The textual reference as written in the configuration.
        reference: String,
        /// Why resolution failed.
        reason: String,
    },
}

impl ConfigError {
    /// Creates a [`ConfigError::Validation`] for `field`.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_validation() {
        let err = ConfigError::validation("pwm_channels", "33 channels exceed the limit of 32");
        assert_eq!(
            format!("{err}"),
            "invalid `pwm_channels`: 33 channels exceed the limit of 32"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn display_unresolved_platform() {
        let err = ConfigError::UnresolvedPlatform {
            reference: "foo.Bar".to_string(),
            reason: "no module named 'foo'".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "cannot resolve base platform 'foo.Bar': no module named 'foo'"
        );
        assert!(!err.is_validation());
    }

    #[test]
    fn display_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ConfigError::from(io_err);
        assert!(format!("{err}").starts_with("failed to read configuration:"));
    }
}
