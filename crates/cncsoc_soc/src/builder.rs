//! The mutable state threaded through composition.

use crate::error::ComposeError;
use cncsoc_common::{Bits, Frequency};
use cncsoc_config::Channel;
use cncsoc_ir::{ClockDomainId, Design, Direction, Expr, InstanceId, PadId, SignalId, SignalKind};
use cncsoc_platform::{IoResource, PadHandle, Platform};

/// A design under construction together with the platform it targets.
///
/// The builder owns the system clock domain from the start so that every
/// stage, including base bring-up, can schedule synchronous logic on it.
#[derive(Debug)]
pub struct SocBuilder {
    design: Design,
    platform: Box<dyn Platform>,
    sys: ClockDomainId,
}

impl SocBuilder {
    /// Creates an empty design named `name` with a `sys` domain at `sys_clk_freq`.
    pub fn new(name: &str, platform: Box<dyn Platform>, sys_clk_freq: Frequency) -> Self {
        let mut design = Design::new(name);
        let sys = design.add_domain("sys", sys_clk_freq);
        Self {
            design,
            platform,
            sys,
        }
    }

    /// Returns the system clock domain.
    pub fn sys(&self) -> ClockDomainId {
        self.sys
    }

    /// Returns the system clock frequency.
    pub fn sys_clk_freq(&self) -> Frequency {
        self.design.domain(self.sys).frequency
    }

    /// Returns the design built so far.
    pub fn design(&self) -> &Design {
        &self.design
    }

    /// Returns the design for modification.
    pub fn design_mut(&mut self) -> &mut Design {
        &mut self.design
    }

    /// Returns the target platform.
    pub fn platform(&self) -> &dyn Platform {
        self.platform.as_ref()
    }

    /// Requests a board resource from the platform.
    pub fn request(&mut self, name: &str, index: u32) -> Result<PadHandle, ComposeError> {
        Ok(self.platform.request(name, index)?)
    }

    /// Turns one signal of a requested resource into a top-level pad.
    ///
    /// `subsignal` selects a named subsignal; `None` selects the only signal of
    /// a single-signal resource.
    pub fn import(
        &mut self,
        handle: &PadHandle,
        subsignal: Option<&str>,
        direction: Direction,
    ) -> Result<PadId, ComposeError> {
        let io = match subsignal {
            Some(name) => handle.signal(name)?,
            None => handle.single()?,
        };
        Ok(self.design.add_pad(
            handle.name(),
            handle.index(),
            subsignal,
            io.pins.clone(),
            &io.io_standard,
            direction,
        ))
    }

    /// Returns the signal of a pad.
    pub fn pad_signal(&self, pad: PadId) -> SignalId {
        self.design.pad(pad).signal
    }

    /// Registers one platform extension per channel under `resource`, indexed
    /// by position, and imports the requested pads in channel order.
    pub fn extend_channels(
        &mut self,
        resource: &str,
        channels: &[Channel],
        direction: Direction,
    ) -> Result<Vec<PadId>, ComposeError> {
        for (index, channel) in channels.iter().enumerate() {
            self.platform.add_extension(IoResource::single(
                resource,
                index as u32,
                &channel.pin,
                &channel.io_standard,
            ))?;
        }
        let handles = self.platform.request_all(resource)?;
        if handles.len() != channels.len() {
            return Err(ComposeError::internal(format!(
                "requested {} '{resource}' pads, platform returned {}",
                channels.len(),
                handles.len()
            )));
        }
        handles
            .iter()
            .map(|handle| self.import(handle, None, direction))
            .collect()
    }

    /// Adds a black-box instance clocked by the system domain.
    pub fn add_core(&mut self, name: &str, core: &str) -> InstanceId {
        self.design.add_instance(name, core, Some(self.sys))
    }

    /// Adds a signal driven by an output port of `instance`.
    pub fn port_signal(&mut self, name: &str, width: u32, instance: InstanceId) -> SignalId {
        self.design
            .add_signal(name, width, SignalKind::Port { instance })
    }

    /// Adds a register cleared on reset.
    pub fn reg(&mut self, name: &str, width: u32) -> SignalId {
        let id = self.design.add_signal(name, width, SignalKind::Reg);
        self.design.set_init(id, Bits::zero(width));
        id
    }

    /// Adds `target <= value` on the system domain.
    pub fn sync(&mut self, target: SignalId, value: Expr) {
        self.design.sync(self.sys, target, value);
    }

    /// Adds `target = value`.
    pub fn comb(&mut self, target: SignalId, value: Expr) {
        self.design.comb(target, value);
    }

    /// Consumes the builder.
    pub fn finish(self) -> (Design, Box<dyn Platform>) {
        (self.design, self.platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cncsoc_platform::{load_platform, PlatformError};

    fn builder() -> SocBuilder {
        let platform = load_platform("5a-75b", "7.0").unwrap();
        SocBuilder::new("top", platform, Frequency::from_mhz(50))
    }

    #[test]
    fn creates_sys_domain() {
        let b = builder();
        assert_eq!(b.design().domain(b.sys()).name, "sys");
        assert_eq!(b.sys_clk_freq(), Frequency::from_mhz(50));
        assert!(b.design().find_signal("sys_clk").is_some());
    }

    #[test]
    fn import_named_subsignal() {
        let mut b = builder();
        let eth = b.request("eth", 0).unwrap();
        let pad = b.import(&eth, Some("rx_data"), Direction::Input).unwrap();
        let pad = b.design().pad(pad);
        assert_eq!(pad.label(), "eth_0_rx_data");
        assert_eq!(pad.pins, vec!["K2", "J2", "K1", "K3"]);
        assert_eq!(b.design().signal(pad.signal).width, 4);
    }

    #[test]
    fn import_unknown_subsignal() {
        let mut b = builder();
        let eth = b.request("eth", 0).unwrap();
        let err = b.import(&eth, Some("crs"), Direction::Input).unwrap_err();
        assert!(matches!(
            err,
            ComposeError::Platform(PlatformError::UnknownSignal { .. })
        ));
    }

    #[test]
    fn extend_channels_keeps_order() {
        let mut b = builder();
        let channels = [
            Channel::new("C4", "LVCMOS33"),
            Channel::new("D4", "LVCMOS33"),
            Channel::new("E4", "LVCMOS25"),
        ];
        let pads = b
            .extend_channels("gpio_in", &channels, Direction::Input)
            .unwrap();
        let pins: Vec<_> = pads
            .iter()
            .map(|&p| b.design().pad(p).pins[0].clone())
            .collect();
        assert_eq!(pins, vec!["C4", "D4", "E4"]);
        assert_eq!(b.design().pad(pads[2]).io_standard, "LVCMOS25");
        assert_eq!(b.design().pad(pads[1]).label(), "gpio_in_1");
    }

    #[test]
    fn extend_channels_without_channels() {
        let mut b = builder();
        let pads = b.extend_channels("pwm", &[], Direction::Output).unwrap();
        assert!(pads.is_empty());
    }

    #[test]
    fn reg_is_cleared_on_reset() {
        let mut b = builder();
        let r = b.reg("r", 3);
        assert_eq!(b.design().signal(r).reset_value(), Bits::zero(3));
    }
}
