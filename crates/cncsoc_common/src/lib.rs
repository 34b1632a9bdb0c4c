//! Shared value types used across the cncsoc workspace.
//!
//! This crate provides clock frequencies, fixed-width two-state bit vectors for
//! register and pad values, and content hashes used to version generated SoCs.

#![warn(missing_docs)]

pub mod bits;
pub mod frequency;
pub mod hash;

pub use bits::{Bits, MAX_WIDTH};
pub use frequency::{Frequency, ParseFrequencyError};
pub use hash::ContentHash;
