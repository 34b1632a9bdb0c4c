//! Black-box cores the composition instantiates.
//!
//! Each core is described by its ports only; the design records an instance,
//! its parameters and which signals its ports connect to.

pub mod crg;
pub mod ethernet;
pub mod mmio;
pub mod pwm;
pub mod timer;
pub mod uart;
pub mod watchdog;

use cncsoc_common::Frequency;
use cncsoc_ir::ParamValue;

/// Frequency parameter in Hz.
pub(crate) fn hz(frequency: Frequency) -> ParamValue {
    ParamValue::Int(i64::try_from(frequency.hz()).unwrap_or(i64::MAX))
}
