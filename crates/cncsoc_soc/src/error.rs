//! Composition errors.

use cncsoc_platform::PlatformError;

/// Errors that abort composition. No partial design is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    /// The configured board is not supported.
    #[error("unsupported board '{board}' (supported: {supported})")]
    UnsupportedBoard {
        /// The board identifier as configured.
        board: String,
        /// Comma-separated list of supported identifiers.
        supported: String,
    },

    /// The platform rejected a request, e.g. a pin conflict.
    #[error("platform error: {0}")]
    Platform(PlatformError),

    /// The composed design failed its own consistency checks.
    #[error("internal composition error: {reason}")]
    Internal {
        /// What is inconsistent.
        reason: String,
    },
}

impl ComposeError {
    /// Creates a [`ComposeError::Internal`].
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }
}

/// A host-side register value that cannot be encoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// The watchdog timeout does not fit its 31-bit field.
    #[error("watchdog timeout of {timeout} cycles does not fit in 31 bits")]
    TimeoutTooWide {
        /// The requested timeout in cycles.
        timeout: u64,
    },
}

/// Unsupported boards get their own variant; everything else is passed through.
impl From<PlatformError> for ComposeError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::UnsupportedBoard { board, supported } => {
                ComposeError::UnsupportedBoard { board, supported }
            }
            other => ComposeError::Platform(other),
        }
    }
}
