//! Board platforms for the CNC interface SoC.
//!
//! A platform knows which FPGA sits on a board, which oscillator clocks it and
//! which pins are wired to what. The composition engine talks to it through the
//! [`Platform`] trait: it requests the board's own resources (clock input,
//! Ethernet PHY) and registers one extension per configured I/O channel.
//!
//! ```
//! use cncsoc_platform::{load_platform, IoResource, Platform};
//!
//! let mut platform = load_platform("5A-75B", "7.0").unwrap();
//! platform
//!     .add_extension(IoResource::single("gpio_out", 0, "A1", "LVCMOS33"))
//!     .unwrap();
//! let pads = platform.request_all("gpio_out").unwrap();
//! assert_eq!(pads.len(), 1);
//! ```

#![warn(missing_docs)]

pub mod board;
pub mod catalog;
pub mod colorlight;
pub mod error;
pub mod resource;

pub use board::{Board, BoardPlatform};
pub use catalog::PinCatalog;
pub use error::PlatformError;
pub use resource::{IoResource, IoSignal, PadHandle};

use cncsoc_common::Frequency;

/// A board platform: identity, default clock and a pin catalog.
///
/// Only the identity and catalog accessors are required; requesting pads and
/// adding extensions go through the catalog.
pub trait Platform: std::fmt::Debug {
    /// Returns the board.
    fn board(&self) -> Board;

    /// Returns the hardware revision.
    fn revision(&self) -> &str;

    /// Returns the FPGA part number.
    fn device(&self) -> &str;

    /// Returns the name of the oscillator resource and its frequency.
    fn default_clock(&self) -> (&str, Frequency);

    /// Returns the pin catalog.
    fn catalog(&self) -> &PinCatalog;

    /// Returns the pin catalog for modification.
    fn catalog_mut(&mut self) -> &mut PinCatalog;

    /// Registers an extra resource and claims its pins.
    fn add_extension(&mut self, resource: IoResource) -> Result<(), PlatformError> {
        self.catalog_mut().add_extension(resource)
    }

    /// Requests one resource.
    fn request(&mut self, name: &str, index: u32) -> Result<PadHandle, PlatformError> {
        self.catalog_mut().request(name, index)
    }

    /// Requests every resource named `name`, ordered by index.
    fn request_all(&mut self, name: &str) -> Result<Vec<PadHandle>, PlatformError> {
        self.catalog_mut().request_all(name)
    }
}

/// Creates the platform for `board` (case-insensitive) at `revision`.
///
/// # Errors
///
/// [`PlatformError::UnsupportedBoard`] for unknown boards and
/// [`PlatformError::UnsupportedRevision`] for unknown revisions.
pub fn load_platform(board: &str, revision: &str) -> Result<Box<dyn Platform>, PlatformError> {
    let board = Board::from_name(board)?;
    let platform = BoardPlatform::new(board, revision)?;
    tracing::debug!(board = %board, revision = platform.revision(), "loaded platform");
    Ok(Box::new(platform))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_each_board_revision() {
        for board in Board::ALL {
            for revision in board.revisions() {
                let p = load_platform(board.name(), revision).unwrap();
                assert_eq!(p.board(), board);
                assert_eq!(p.revision(), revision);
            }
        }
    }

    #[test]
    fn load_is_case_insensitive() {
        let upper = load_platform("5A-75B", "7.0").unwrap();
        let lower = load_platform("5a-75b", "7.0").unwrap();
        assert_eq!(upper.board(), lower.board());
        assert_eq!(upper.catalog().resources(), lower.catalog().resources());
    }

    #[test]
    fn load_unknown_board() {
        assert!(matches!(
            load_platform("ulx3s", "1.0"),
            Err(PlatformError::UnsupportedBoard { .. })
        ));
    }

    #[test]
    fn trait_requests_go_through_catalog() {
        let mut p = load_platform("5a-75e", "7.1").unwrap();
        let (clk, freq) = p.default_clock();
        assert_eq!(freq.hz(), 25_000_000);
        let clk = clk.to_string();
        p.request(&clk, 0).unwrap();
        assert_eq!(p.catalog().owner_of("P6"), Some("clk25:0"));
    }

    #[test]
    fn eth_request_blocks_overlapping_extension() {
        let mut p = load_platform("5a-75b", "7.0").unwrap();
        p.request("eth", 0).unwrap();
        let err = p
            .add_extension(IoResource::single("gpio_in", 0, "J3", "LVCMOS33"))
            .unwrap_err();
        assert!(matches!(err, PlatformError::PinConflict { .. }));
    }
}
