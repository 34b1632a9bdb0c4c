//! PWM/PDM waveform generator and its host-side setpoint.

use crate::builder::SocBuilder;
use crate::cores::mmio::PWM_COUNTER_WIDTH;
use cncsoc_common::Frequency;
use cncsoc_ir::{Direction, InstanceId, PadId, SignalId};

/// Core name of the generator.
pub const CORE: &str = "pwm_pdm";

/// Full-scale density in PDM mode.
pub const PDM_FULL_SCALE: u32 = 0xFFFF;

/// One instantiated generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmGenerator {
    /// The instance.
    pub instance: InstanceId,
    /// The pad it drives.
    pub pad: PadId,
    /// Enable input, registered.
    pub enable: SignalId,
    /// Period input, registered.
    pub period: SignalId,
    /// Pulse width input, registered.
    pub width: SignalId,
}

/// Instantiates generator `index` driving `pad`.
pub fn add_pwm(soc: &mut SocBuilder, index: usize, pad: PadId) -> PwmGenerator {
    let name = format!("pwm{index}");
    let instance = soc.add_core(&name, CORE);
    let enable = soc.reg(&format!("{name}_enable"), 1);
    let period = soc.reg(&format!("{name}_period"), PWM_COUNTER_WIDTH);
    let width = soc.reg(&format!("{name}_width"), PWM_COUNTER_WIDTH);
    let out = soc.pad_signal(pad);
    let d = soc.design_mut();
    d.connect(instance, "enable", Direction::Input, 1, enable);
    d.connect(instance, "period", Direction::Input, PWM_COUNTER_WIDTH, period);
    d.connect(instance, "width", Direction::Input, PWM_COUNTER_WIDTH, width);
    d.connect(instance, "out", Direction::Output, 1, out);
    PwmGenerator {
        instance,
        pad,
        enable,
        period,
        width,
    }
}

/// Period and width register values for a requested frequency and duty cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmSetpoint {
    /// Period in system clock cycles; 0 selects PDM.
    pub period: u32,
    /// High time in cycles, or density out of [`PDM_FULL_SCALE`] in PDM mode.
    pub width: u32,
}

impl PwmSetpoint {
    /// Computes the setpoint.
    ///
    /// A frequency of zero selects PDM. Other frequencies are clamped to at
    /// least 1 Hz and the duty cycle to [0, 1].
    pub fn compute(sys_clk_freq: Frequency, pwm_freq: f64, duty: f64) -> Self {
        let duty = if duty.is_nan() { 0.0 } else { duty.clamp(0.0, 1.0) };
        if pwm_freq == 0.0 {
            return Self {
                period: 0,
                width: (f64::from(PDM_FULL_SCALE) * duty) as u32,
            };
        }
        let pwm_freq = pwm_freq.max(1.0);
        let period = (sys_clk_freq.hz() as f64 / pwm_freq).round() as u32;
        Self {
            period,
            width: (f64::from(period) * duty).round() as u32,
        }
    }

    /// Returns `true` in PDM mode.
    pub fn is_pdm(&self) -> bool {
        self.period == 0
    }
}
