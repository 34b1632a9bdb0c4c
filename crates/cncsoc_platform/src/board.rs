//! Supported boards and the concrete platform built from a revision table.

use crate::catalog::PinCatalog;
use crate::colorlight::{self, find_revision, revision_list, RevisionDef};
use crate::error::PlatformError;
use crate::Platform;
use cncsoc_common::Frequency;
use serde::Serialize;
use std::fmt;

/// The closed set of supported boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Board {
    /// Colorlight 5A-75B.
    #[serde(rename = "5a-75b")]
    Colorlight5A75B,
    /// Colorlight 5A-75E.
    #[serde(rename = "5a-75e")]
    Colorlight5A75E,
}

impl Board {
    /// Every supported board.
    pub const ALL: [Board; 2] = [Board::Colorlight5A75B, Board::Colorlight5A75E];

    /// Returns the canonical lower-case identifier.
    pub fn name(self) -> &'static str {
        match self {
            Board::Colorlight5A75B => "5a-75b",
            Board::Colorlight5A75E => "5a-75e",
        }
    }

    /// Parses a board identifier, ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> Result<Board, PlatformError> {
        let normalized = name.trim().to_ascii_lowercase();
        Board::ALL
            .into_iter()
            .find(|board| board.name() == normalized)
            .ok_or_else(|| PlatformError::UnsupportedBoard {
                board: name.to_string(),
                supported: Board::ALL.map(Board::name).join(", "),
            })
    }

    /// Returns the revisions this board is known in, oldest first.
    pub fn revisions(self) -> Vec<&'static str> {
        self.revision_table().iter().map(|r| r.revision).collect()
    }

    fn revision_table(self) -> &'static [RevisionDef] {
        match self {
            Board::Colorlight5A75B => colorlight::a75b::REVISIONS,
            Board::Colorlight5A75E => colorlight::a75e::REVISIONS,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A platform instance for one board revision.
#[derive(Debug, Clone)]
pub struct BoardPlatform {
    board: Board,
    revision: &'static str,
    catalog: PinCatalog,
}

impl BoardPlatform {
    /// Creates the platform of `board` at `revision`.
    pub fn new(board: Board, revision: &str) -> Result<Self, PlatformError> {
        let table = board.revision_table();
        let def = find_revision(table, revision).ok_or_else(|| {
            PlatformError::UnsupportedRevision {
                board: board.name().to_string(),
                revision: revision.to_string(),
                supported: revision_list(table),
            }
        })?;
        Ok(Self {
            board,
            revision: def.revision,
            catalog: PinCatalog::new(def.instantiate()),
        })
    }
}

impl Platform for BoardPlatform {
    fn board(&self) -> Board {
        self.board
    }

    fn revision(&self) -> &str {
        self.revision
    }

    fn device(&self) -> &str {
        colorlight::DEVICE
    }

    fn default_clock(&self) -> (&str, Frequency) {
        ("clk25", Frequency::from_mhz(25))
    }

    fn catalog(&self) -> &PinCatalog {
        &self.catalog
    }

    fn catalog_mut(&mut self) -> &mut PinCatalog {
        &mut self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_names_are_case_insensitive() {
        assert_eq!(Board::from_name("5A-75B").unwrap(), Board::Colorlight5A75B);
        assert_eq!(Board::from_name("5a-75b").unwrap(), Board::Colorlight5A75B);
        assert_eq!(Board::from_name(" 5a-75E ").unwrap(), Board::Colorlight5A75E);
    }

    #[test]
    fn unknown_board() {
        let err = Board::from_name("colorlight-i5").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported board 'colorlight-i5' (supported: 5a-75b, 5a-75e)"
        );
    }

    #[test]
    fn known_revisions() {
        assert_eq!(
            Board::Colorlight5A75B.revisions(),
            vec!["6.0", "6.1", "7.0", "8.0"]
        );
        assert_eq!(Board::Colorlight5A75E.revisions(), vec!["6.0", "7.1"]);
    }

    #[test]
    fn unknown_revision() {
        let err = BoardPlatform::new(Board::Colorlight5A75E, "8.0").unwrap_err();
        assert_eq!(
            err,
            PlatformError::UnsupportedRevision {
                board: "5a-75e".into(),
                revision: "8.0".into(),
                supported: "6.0, 7.1".into(),
            }
        );
    }

    #[test]
    fn platform_metadata() {
        let p = BoardPlatform::new(Board::Colorlight5A75B, "7.0").unwrap();
        assert_eq!(p.board(), Board::Colorlight5A75B);
        assert_eq!(p.revision(), "7.0");
        assert_eq!(p.device(), "LFE5U-25F-6BG256C");
        assert_eq!(p.default_clock(), ("clk25", Frequency::from_mhz(25)));
    }

    #[test]
    fn board_serializes_as_identifier() {
        let json = serde_json::to_string(&Board::Colorlight5A75E).unwrap();
        assert_eq!(json, "\"5a-75e\"");
    }
}
