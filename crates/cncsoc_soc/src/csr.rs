//! Typed handles to allocated control/status registers.

use crate::builder::SocBuilder;
use crate::error::ComposeError;
use cncsoc_common::Bits;
use cncsoc_ir::{CsrAccess, CsrId, Expr, SignalId};

/// A read-write register: the fabric sees the value last written by the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageRegister {
    /// The register.
    pub csr: CsrId,
    /// Storage signal.
    pub storage: SignalId,
    /// Register width.
    pub width: u32,
}

impl StorageRegister {
    /// Allocates `<region>_<name>` and returns its storage handle.
    pub fn add(
        soc: &mut SocBuilder,
        region: &str,
        name: &str,
        width: u32,
    ) -> Result<Self, ComposeError> {
        let csr = soc
            .design_mut()
            .add_csr(region, name, width, CsrAccess::ReadWrite);
        let register = soc.design().csrs.get(csr);
        let storage = register.storage.ok_or_else(|| {
            ComposeError::internal(format!("register {} has no storage", register.full_name()))
        })?;
        Ok(Self {
            csr,
            storage,
            width,
        })
    }

    /// Returns the whole stored value.
    pub fn value(&self) -> Expr {
        Expr::signal(self.storage)
    }

    /// Returns bit `index` of the stored value.
    pub fn bit(&self, index: u32) -> Expr {
        Expr::bit(self.storage, index)
    }
}

/// A read-only register: the fabric presents a value and a write strobe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRegister {
    /// The register.
    pub csr: CsrId,
    /// Value presented to the bus.
    pub status: SignalId,
    /// Latches `status` while high.
    pub write_enable: SignalId,
    /// Register width.
    pub width: u32,
}

impl StatusRegister {
    /// Allocates `<region>_<name>` and returns its status handle.
    pub fn add(
        soc: &mut SocBuilder,
        region: &str,
        name: &str,
        width: u32,
    ) -> Result<Self, ComposeError> {
        let csr = soc
            .design_mut()
            .add_csr(region, name, width, CsrAccess::ReadOnly);
        let register = soc.design().csrs.get(csr);
        match (register.status, register.write_enable) {
            (Some(status), Some(write_enable)) => Ok(Self {
                csr,
                status,
                write_enable,
                width,
            }),
            _ => Err(ComposeError::internal(format!(
                "register {} has no status strobe",
                register.full_name()
            ))),
        }
    }

    /// Samples `value` into the register on every system clock edge.
    pub fn drive(&self, soc: &mut SocBuilder, value: Expr) {
        soc.sync(self.status, value);
        soc.sync(self.write_enable, Expr::constant(Bits::bit(true)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cncsoc_common::Frequency;
    use cncsoc_platform::load_platform;

    fn builder() -> SocBuilder {
        SocBuilder::new(
            "top",
            load_platform("5a-75e", "7.1").unwrap(),
            Frequency::from_mhz(50),
        )
    }

    #[test]
    fn storage_register_names() {
        let mut soc = builder();
        let r = StorageRegister::add(&mut soc, "mmio", "gpio_out", 4).unwrap();
        assert_eq!(soc.design().signal(r.storage).name, "mmio_gpio_out");
        assert_eq!(r.bit(2), Expr::bit(r.storage, 2));
    }

    #[test]
    fn status_register_is_driven_every_cycle() {
        let mut soc = builder();
        let r = StatusRegister::add(&mut soc, "mmio", "gpio_in", 2).unwrap();
        r.drive(&mut soc, Expr::constant(Bits::zero(2)));
        let d = soc.design();
        assert_eq!(d.signal(r.status).name, "mmio_gpio_in_status");
        assert_eq!(
            d.sync_value(r.write_enable).map(|a| &a.value),
            Some(&Expr::constant(Bits::bit(true)))
        );
    }
}
