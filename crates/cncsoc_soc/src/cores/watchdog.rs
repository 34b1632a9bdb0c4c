//! Watchdog timer and its host-side control word.
//!
//! The watchdog is driven only through one 32-bit register: bits [0, 31)
//! hold the timeout in system clock cycles and bit 31 enables the timer.
//! Once the timer expires `has_bitten` latches high until the watchdog is
//! cleared from outside the fabric.

use crate::builder::SocBuilder;
use crate::error::EncodingError;
use cncsoc_common::Frequency;
use cncsoc_ir::{Direction, InstanceId, SignalId, SignalKind};

/// Core name of the watchdog.
pub const CORE: &str = "watchdog";

/// Width of the control register.
pub const CONTROL_WIDTH: u32 = 32;

/// Width of the timeout field.
pub const TIMEOUT_WIDTH: u32 = 31;

/// Bit position of the enable flag.
pub const ENABLE_BIT: u32 = 31;

/// Largest encodable timeout in cycles.
pub const MAX_TIMEOUT: u32 = (1 << TIMEOUT_WIDTH) - 1;

/// The instantiated watchdog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watchdog {
    /// The instance.
    pub instance: InstanceId,
    /// Enable input, registered.
    pub enable: SignalId,
    /// Timeout input.
    pub timeout: SignalId,
    /// The latched fault output.
    pub has_bitten: SignalId,
}

/// Instantiates the watchdog. Its enable and timeout inputs are left for the
/// caller to drive.
pub fn add_watchdog(soc: &mut SocBuilder) -> Watchdog {
    let instance = soc.add_core("watchdog", CORE);
    let enable = soc.reg("watchdog_enable", 1);
    let timeout = soc
        .design_mut()
        .add_signal("watchdog_timeout", TIMEOUT_WIDTH, SignalKind::Wire);
    let has_bitten = soc.port_signal("watchdog_has_bitten", 1, instance);
    let d = soc.design_mut();
    d.connect(instance, "enable", Direction::Input, 1, enable);
    d.connect(instance, "timeout", Direction::Input, TIMEOUT_WIDTH, timeout);
    d.connect(instance, "has_bitten", Direction::Output, 1, has_bitten);
    Watchdog {
        instance,
        enable,
        timeout,
        has_bitten,
    }
}

/// The decoded watchdog control register.
///
/// ```
/// use cncsoc_soc::WatchdogControl;
///
/// let word = WatchdogControl::new(true, 50_000_000).unwrap().to_register();
/// assert_eq!(word, 0x8000_0000 | 50_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchdogControl {
    /// Whether the timer runs.
    pub enable: bool,
    /// Timeout in system clock cycles.
    pub timeout: u32,
}

impl WatchdogControl {
    /// Creates a control word, rejecting timeouts above [`MAX_TIMEOUT`].
    pub fn new(enable: bool, timeout: u32) -> Result<Self, EncodingError> {
        if timeout > MAX_TIMEOUT {
            return Err(EncodingError::TimeoutTooWide {
                timeout: u64::from(timeout),
            });
        }
        Ok(Self { enable, timeout })
    }

    /// Creates a control word for a timeout given in seconds.
    pub fn from_seconds(
        enable: bool,
        seconds: f64,
        sys_clk_freq: Frequency,
    ) -> Result<Self, EncodingError> {
        let cycles = sys_clk_freq.cycles_in(seconds);
        let timeout = u32::try_from(cycles)
            .ok()
            .filter(|&t| t <= MAX_TIMEOUT)
            .ok_or(EncodingError::TimeoutTooWide { timeout: cycles })?;
        Ok(Self { enable, timeout })
    }

    /// Packs the word into its register value.
    pub fn to_register(self) -> u32 {
        (u32::from(self.enable) << ENABLE_BIT) | self.timeout
    }

    /// Unpacks a register value.
    pub fn from_register(value: u32) -> Self {
        Self {
            enable: value >> ENABLE_BIT != 0,
            timeout: value & MAX_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_enable_into_top_bit() {
        let word = WatchdogControl::new(true, 0).unwrap();
        assert_eq!(word.to_register(), 0x8000_0000);
        let word = WatchdogControl::new(false, MAX_TIMEOUT).unwrap();
        assert_eq!(word.to_register(), 0x7fff_ffff);
    }

    #[test]
    fn unpack_reverses_pack() {
        let word = WatchdogControl::from_register(0x8000_1234);
        assert!(word.enable);
        assert_eq!(word.timeout, 0x1234);
        assert_eq!(word.to_register(), 0x8000_1234);
    }

    #[test]
    fn rejects_wide_timeouts() {
        assert_eq!(
            WatchdogControl::new(true, 1 << 31),
            Err(EncodingError::TimeoutTooWide { timeout: 1 << 31 })
        );
        // 50 s at 50 MHz is 2.5e9 cycles.
        assert!(WatchdogControl::from_seconds(true, 50.0, Frequency::from_mhz(50)).is_err());
    }

    #[test]
    fn timeout_from_seconds() {
        let word = WatchdogControl::from_seconds(true, 0.5, Frequency::from_mhz(50)).unwrap();
        assert_eq!(word.timeout, 25_000_000);
    }
}
