//! The register-mapped I/O block.
//!
//! Allocates the `mmio` region in a fixed order and hands back typed handles,
//! so the wiring never has to look registers up by name.

use crate::builder::SocBuilder;
use crate::cores::watchdog::CONTROL_WIDTH;
use crate::csr::{StatusRegister, StorageRegister};
use crate::error::ComposeError;
use cncsoc_config::Channel;
use cncsoc_ir::{InstanceId, ParamValue};

/// Name of the register region.
pub const REGION: &str = "mmio";

/// Core name of the block.
pub const CORE: &str = "mmio";

/// Width of the PWM period and width registers.
pub const PWM_COUNTER_WIDTH: u32 = 32;

/// The three registers of one PWM channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmRegisters {
    /// `pwm_<i>_enable`.
    pub enable: StorageRegister,
    /// `pwm_<i>_period`.
    pub period: StorageRegister,
    /// `pwm_<i>_width`.
    pub width: StorageRegister,
}

/// Handles to every register of the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterBlock {
    /// The block instance.
    pub instance: InstanceId,
    /// Watchdog control: timeout in bits [0, 31), enable in bit 31.
    pub watchdog_data: StorageRegister,
    /// One bit per output channel; absent without outputs.
    pub gpio_out: Option<StorageRegister>,
    /// Per PWM channel, in channel order.
    pub pwm: Vec<PwmRegisters>,
    /// Latched watchdog fault.
    pub watchdog_has_bitten: StatusRegister,
    /// One bit per input channel; absent without inputs.
    pub gpio_in: Option<StatusRegister>,
}

/// Channel count as a register width.
fn width_of(channels: &[Channel]) -> u32 {
    channels.len() as u32
}

/// Instantiates the block for the given channel lists.
pub fn add_register_block(
    soc: &mut SocBuilder,
    inputs: &[Channel],
    outputs: &[Channel],
    pwm_channels: &[Channel],
) -> Result<RegisterBlock, ComposeError> {
    let instance = soc.add_core("mmio", CORE);
    for (name, channels) in [
        ("n_inputs", inputs),
        ("n_outputs", outputs),
        ("n_pwm", pwm_channels),
    ] {
        soc.design_mut()
            .set_param(instance, name, ParamValue::Int(channels.len() as i64));
    }

    let watchdog_data = StorageRegister::add(soc, REGION, "watchdog_data", CONTROL_WIDTH)?;
    let gpio_out = match width_of(outputs) {
        0 => None,
        n => Some(StorageRegister::add(soc, REGION, "gpio_out", n)?),
    };
    let pwm = (0..pwm_channels.len())
        .map(|i| {
            Ok(PwmRegisters {
                enable: StorageRegister::add(soc, REGION, &format!("pwm_{i}_enable"), 1)?,
                period: StorageRegister::add(
                    soc,
                    REGION,
                    &format!("pwm_{i}_period"),
                    PWM_COUNTER_WIDTH,
                )?,
                width: StorageRegister::add(
                    soc,
                    REGION,
                    &format!("pwm_{i}_width"),
                    PWM_COUNTER_WIDTH,
                )?,
            })
        })
        .collect::<Result<Vec<_>, ComposeError>>()?;
    let watchdog_has_bitten = StatusRegister::add(soc, REGION, "watchdog_has_bitten", 1)?;
    let gpio_in = match width_of(inputs) {
        0 => None,
        n => Some(StatusRegister::add(soc, REGION, "gpio_in", n)?),
    };

    Ok(RegisterBlock {
        instance,
        watchdog_data,
        gpio_out,
        pwm,
        watchdog_has_bitten,
        gpio_in,
    })
}
