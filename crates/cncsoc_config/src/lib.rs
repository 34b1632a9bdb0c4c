//! Parsing, validation and base-platform resolution of board configurations.
//!
//! A board configuration is a TOML document describing the board variant, the
//! network front-end and the I/O channels of a CNC interface SoC. Loading it
//! produces a strongly-typed [`BoardConfig`] that has been validated and whose
//! base platform reference has been resolved against the compiled-in registry.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, validate_config};
pub use resolve::{resolve_base_platform, BaseSystemKind};
pub use types::*;
