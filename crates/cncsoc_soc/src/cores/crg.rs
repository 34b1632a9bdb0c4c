//! Clock and reset generator.

use crate::builder::SocBuilder;
use crate::cores::hz;
use crate::error::ComposeError;
use cncsoc_ir::{Direction, InstanceId, PadId, SignalId};

/// Core name of the ECP5 PLL-based generator.
pub const CORE: &str = "ecp5_crg";

/// The instantiated generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crg {
    /// The instance.
    pub instance: InstanceId,
    /// The oscillator input pad.
    pub clock_pad: PadId,
}

/// Requests the board oscillator and derives the system domain from it.
///
/// `soft_reset` is held in reset while high.
pub fn add_crg(soc: &mut SocBuilder, soft_reset: SignalId) -> Result<Crg, ComposeError> {
    let (clock_name, clock_freq) = {
        let (name, freq) = soc.platform().default_clock();
        (name.to_string(), freq)
    };
    let handle = soc.request(&clock_name, 0)?;
    let clock_pad = soc.import(&handle, None, Direction::Input)?;
    let clock_in = soc.pad_signal(clock_pad);

    let sys = soc.sys();
    let sys_clk_freq = soc.sys_clk_freq();
    let (sys_clk, sys_rst) = {
        let domain = soc.design().domain(sys);
        (domain.clock, domain.reset)
    };

    let d = soc.design_mut();
    let instance = d.add_instance("crg", CORE, None);
    d.set_param(instance, "clkin_freq", hz(clock_freq));
    d.set_param(instance, "sys_clk_freq", hz(sys_clk_freq));
    d.connect(instance, "clkin", Direction::Input, 1, clock_in);
    d.connect(instance, "rst", Direction::Input, 1, soft_reset);
    d.connect(instance, "sys_clk", Direction::Output, 1, sys_clk);
    d.connect(instance, "sys_rst", Direction::Output, 1, sys_rst);

    tracing::debug!(clock = %clock_name, %sys_clk_freq, "clock/reset generator added");
    Ok(Crg {
        instance,
        clock_pad,
    })
}
