//! Composition engine for CNC interface SoCs.
//!
//! Given a validated [`BoardConfig`](cncsoc_config::BoardConfig), [`compose`]
//! selects the board platform, brings up the configured base system and adds
//! a clock/reset generator, an Ethernet PHY with an Etherbone bridge, the
//! register-mapped I/O block, a watchdog and one pad per I/O channel. Output
//! pads and PWM enables are gated by the watchdog: once it has bitten every
//! output is forced low until it is cleared.
//!
//! ```
//! use cncsoc_config::load_config_from_str;
//! use cncsoc_soc::{compose, verify_interlock};
//!
//! let config = load_config_from_str(r#"
//!     base_platform = "litex.soc.integration.soc_core.SoCMini"
//!     board = "5a-75b"
//!     revision = "7.0"
//!     [phy]
//!     [bridge]
//!     mac_address = "10:e2:d5:00:00:00"
//!     ip_address = "192.168.1.50"
//!     [[outputs]]
//!     pin = "A1"
//!     io_standard = "LVCMOS33"
//! "#).unwrap();
//! let soc = compose(&config).unwrap();
//! assert_eq!(soc.outputs.len(), 1);
//! assert!(verify_interlock(&soc).is_empty());
//! ```

#![warn(missing_docs)]

pub mod base;
pub mod builder;
pub mod compose;
pub mod cores;
pub mod csr;
pub mod error;
pub mod export;
pub mod interlock;

pub use base::{load_base_system, BaseHandles, BaseSystem, SocCore, SocMini};
pub use builder::SocBuilder;
pub use compose::{compose, identification, ComposedSoc};
pub use cores::pwm::PwmSetpoint;
pub use cores::watchdog::WatchdogControl;
pub use csr::{StatusRegister, StorageRegister};
pub use error::{ComposeError, EncodingError};
pub use export::{csr_csv, csr_json, DriverChannel, DriverConfig};
pub use interlock::{verify_interlock, InterlockViolation};
