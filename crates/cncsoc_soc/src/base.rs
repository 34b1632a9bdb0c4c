//! Base systems: the bring-up that runs before any board-specific wiring.
//!
//! Each [`BaseSystemKind`] maps to a [`BaseSystem`] capability object. The
//! composition engine holds one and calls [`BaseSystem::bring_up`] first.

use crate::builder::SocBuilder;
use crate::cores::{timer, uart};
use crate::csr::{StatusRegister, StorageRegister};
use crate::error::ComposeError;
use cncsoc_common::Bits;
use cncsoc_config::BaseSystemKind;
use cncsoc_ir::{Direction, Expr, Identification, InstanceId, SignalId};

/// Name of the control register region.
pub const CTRL_REGION: &str = "ctrl";

/// Reset value of `ctrl_scratch`.
pub const SCRATCH_RESET: u64 = 0x1234_5678;

/// Core name of the CSR bus interconnect.
pub const BUS_CORE: &str = "csr_bus";

/// Width of the bus error counter.
pub const BUS_ERRORS_WIDTH: u32 = 32;

/// What later stages need from bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseHandles {
    /// The bus interconnect; the bus bridge connects its master port here.
    pub bus: InstanceId,
    /// Software reset request, consumed by the clock/reset generator.
    pub soft_reset: SignalId,
}

/// A base system.
pub trait BaseSystem: std::fmt::Debug {
    /// Returns the kind this object implements.
    fn kind(&self) -> BaseSystemKind;

    /// Sets identification and adds the base peripherals.
    fn bring_up(
        &self,
        soc: &mut SocBuilder,
        ident: Identification,
    ) -> Result<BaseHandles, ComposeError>;
}

/// Bus, identification and control registers only.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocMini;

/// [`SocMini`] plus a serial console and a timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocCore;

impl BaseSystem for SocMini {
    fn kind(&self) -> BaseSystemKind {
        BaseSystemKind::SocMini
    }

    fn bring_up(
        &self,
        soc: &mut SocBuilder,
        ident: Identification,
    ) -> Result<BaseHandles, ComposeError> {
        add_ctrl(soc, ident)
    }
}

impl BaseSystem for SocCore {
    fn kind(&self) -> BaseSystemKind {
        BaseSystemKind::SocCore
    }

    fn bring_up(
        &self,
        soc: &mut SocBuilder,
        ident: Identification,
    ) -> Result<BaseHandles, ComposeError> {
        let handles = add_ctrl(soc, ident)?;
        uart::add_uart(soc)?;
        timer::add_timer(soc)?;
        Ok(handles)
    }
}

/// Returns the base system for `kind`.
pub fn load_base_system(kind: BaseSystemKind) -> Box<dyn BaseSystem> {
    match kind {
        BaseSystemKind::SocMini => Box::new(SocMini),
        BaseSystemKind::SocCore => Box::new(SocCore),
    }
}

fn add_ctrl(soc: &mut SocBuilder, ident: Identification) -> Result<BaseHandles, ComposeError> {
    tracing::debug!(ident = %ident.text, "base bring-up");
    soc.design_mut().ident = ident;

    let reset = StorageRegister::add(soc, CTRL_REGION, "reset", 1)?;
    let scratch = StorageRegister::add(soc, CTRL_REGION, "scratch", 32)?;
    soc.design_mut()
        .set_init(scratch.storage, Bits::new(SCRATCH_RESET, 32));
    let bus_errors = StatusRegister::add(soc, CTRL_REGION, "bus_errors", BUS_ERRORS_WIDTH)?;

    let bus = soc.add_core("bus", BUS_CORE);
    let errors = soc.port_signal("bus_errors", BUS_ERRORS_WIDTH, bus);
    soc.design_mut()
        .connect(bus, "errors", Direction::Output, BUS_ERRORS_WIDTH, errors);
    bus_errors.drive(soc, Expr::signal(errors));

    Ok(BaseHandles {
        bus,
        soft_reset: reset.storage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cncsoc_common::Frequency;
    use cncsoc_platform::load_platform;

    fn builder() -> SocBuilder {
        SocBuilder::new(
            "top",
            load_platform("5a-75b", "7.0").unwrap(),
            Frequency::from_mhz(50),
        )
    }

    fn ident() -> Identification {
        Identification {
            text: "test".into(),
            version: None,
        }
    }

    #[test]
    fn registry_covers_every_kind() {
        for kind in BaseSystemKind::ALL {
            assert_eq!(load_base_system(kind).kind(), kind);
        }
    }

    #[test]
    fn mini_allocates_ctrl_only() {
        let mut soc = builder();
        load_base_system(BaseSystemKind::SocMini)
            .bring_up(&mut soc, ident())
            .unwrap();
        let regions: Vec<_> = soc
            .design()
            .csrs
            .regions()
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(regions, vec!["ctrl"]);
        assert_eq!(soc.design().ident.text, "test");
        let scratch = soc.design().find_signal("ctrl_scratch").unwrap();
        assert_eq!(
            soc.design().signal(scratch).reset_value(),
            Bits::new(0x1234_5678, 32)
        );
    }

    #[test]
    fn core_adds_uart_and_timer() {
        let mut soc = builder();
        load_base_system(BaseSystemKind::SocCore)
            .bring_up(&mut soc, ident())
            .unwrap();
        let regions: Vec<_> = soc
            .design()
            .csrs
            .regions()
            .iter()
            .map(|r| (r.name.as_str(), r.base))
            .collect();
        assert_eq!(regions, vec![("ctrl", 0), ("uart", 0x800), ("timer0", 0x1000)]);
    }
}
