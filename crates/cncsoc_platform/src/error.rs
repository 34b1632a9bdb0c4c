//! Errors reported by board platforms.

/// Errors raised while selecting a board or handing out its pads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    /// The board identifier is not one of the supported boards.
    #[error("unsupported board '{board}' (supported: {supported})")]
    UnsupportedBoard {
        /// The identifier as given.
        board: String,
        /// Comma-separated list of supported identifiers.
        supported: String,
    },

    /// The board exists but the revision is unknown.
    #[error("board {board} has no revision '{revision}' (known: {supported})")]
    UnsupportedRevision {
        /// Canonical board identifier.
        board: String,
        /// The revision as given.
        revision: String,
        /// Comma-separated list of known revisions.
        supported: String,
    },

    /// A pin is already owned by another resource.
    #[error("pin {pin} requested by {requester} is already used by {owner}")]
    PinConflict {
        /// The contested pin.
        pin: String,
        /// Resource that holds the pin (`name:index`).
        owner: String,
        /// Resource that asked for it (`name:index`).
        requester: String,
    },

    /// No resource with this name and index exists.
    #[error("no resource {name}:{index} on this platform")]
    UnknownResource {
        /// Resource name.
        name: String,
        /// Resource index.
        index: u32,
    },

    /// The resource exists but has no such subsignal.
    #[error("resource {resource} has no subsignal '{signal}'")]
    UnknownSignal {
        /// Resource (`name:index`).
        resource: String,
        /// Missing subsignal name.
        signal: String,
    },

    /// The resource has already been handed out.
    #[error("resource {name}:{index} has already been requested")]
    AlreadyRequested {
        /// Resource name.
        name: String,
        /// Resource index.
        index: u32,
    },

    /// An extension reuses the name and index of an existing resource.
    #[error("resource {name}:{index} is already defined")]
    DuplicateResource {
        /// Resource name.
        name: String,
        /// Resource index.
        index: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_pin_conflict() {
        let err = PlatformError::PinConflict {
            pin: "P6".into(),
            owner: "clk25:0".into(),
            requester: "gpio_out:0".into(),
        };
        assert_eq!(
            err.to_string(),
            "pin P6 requested by gpio_out:0 is already used by clk25:0"
        );
    }

    #[test]
    fn display_unsupported_board() {
        let err = PlatformError::UnsupportedBoard {
            board: "i5".into(),
            supported: "5a-75b, 5a-75e".into(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported board 'i5' (supported: 5a-75b, 5a-75e)"
        );
    }
}
