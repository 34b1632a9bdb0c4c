//! Control/status registers and their address map.
//!
//! Registers are grouped in regions. Regions are laid out in creation order
//! [`CSR_REGION_STRIDE`] bytes apart; registers inside a region occupy
//! consecutive 32-bit words in creation order.

use crate::arena::Arena;
use crate::ids::{CsrId, SignalId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance in bytes between the bases of two regions.
pub const CSR_REGION_STRIDE: u32 = 0x800;

/// Width of one bus word in bits.
pub const CSR_DATA_WIDTH: u32 = 32;

/// Size of one bus word in bytes.
pub const CSR_WORD_BYTES: u32 = CSR_DATA_WIDTH / 8;

/// Bus access to a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CsrAccess {
    /// Written by the bus.
    #[serde(rename = "rw")]
    ReadWrite,
    /// Driven by the fabric.
    #[serde(rename = "ro")]
    ReadOnly,
}

impl fmt::Display for CsrAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CsrAccess::ReadWrite => "rw",
            CsrAccess::ReadOnly => "ro",
        })
    }
}

/// A named block of registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsrRegion {
    /// Region name, e.g. `mmio`.
    pub name: String,
    /// Base address in bytes.
    pub base: u32,
    /// Bytes allocated so far.
    pub size: u32,
}

/// One register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsrRegister {
    /// ID within the map.
    pub id: CsrId,
    /// Name of the owning region.
    pub region: String,
    /// Name within the region.
    pub name: String,
    /// Byte address.
    pub address: u32,
    /// Width in bits.
    pub width: u32,
    /// Bus access.
    pub access: CsrAccess,
    /// Bus-written value (read-write registers).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<SignalId>,
    /// Fabric-driven value (read-only registers).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SignalId>,
    /// Update strobe for `status`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_enable: Option<SignalId>,
}

impl CsrRegister {
    /// Returns `<region>_<name>`.
    pub fn full_name(&self) -> String {
        format!("{}_{}", self.region, self.name)
    }

    /// Returns the number of bus words the register occupies.
    pub fn words(&self) -> u32 {
        self.width.div_ceil(CSR_DATA_WIDTH).max(1)
    }
}

/// The register map of a design.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsrMap {
    regions: Vec<CsrRegion>,
    registers: Arena<CsrId, CsrRegister>,
}

impl CsrMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the region named `name`, creating it after the last one if needed.
    pub fn region(&mut self, name: &str) -> &CsrRegion {
        let index = self.region_index(name);
        &self.regions[index]
    }

    fn region_index(&mut self, name: &str) -> usize {
        if let Some(index) = self.regions.iter().position(|r| r.name == name) {
            return index;
        }
        self.regions.push(CsrRegion {
            name: name.to_string(),
            base: self.regions.len() as u32 * CSR_REGION_STRIDE,
            size: 0,
        });
        self.regions.len() - 1
    }

    /// Allocates a register at the end of `region`, creating the region if needed.
    ///
    /// Signals are attached by the caller.
    pub fn allocate(&mut self, region: &str, name: &str, width: u32, access: CsrAccess) -> CsrId {
        let words = width.div_ceil(CSR_DATA_WIDTH).max(1);
        let index = self.region_index(region);
        let block = &mut self.regions[index];
        let address = block.base + block.size;
        block.size += words * CSR_WORD_BYTES;

        let id = self.registers.next_id();
        self.registers.alloc(CsrRegister {
            id,
            region: region.to_string(),
            name: name.to_string(),
            address,
            width,
            access,
            storage: None,
            status: None,
            write_enable: None,
        })
    }

    /// Returns the register with the given ID.
    pub fn get(&self, id: CsrId) -> &CsrRegister {
        &self.registers[id]
    }

    pub(crate) fn get_mut(&mut self, id: CsrId) -> &mut CsrRegister {
        &mut self.registers[id]
    }

    /// Looks up a register by region and name.
    pub fn find(&self, region: &str, name: &str) -> Option<&CsrRegister> {
        self.registers
            .values()
            .find(|r| r.region == region && r.name == name)
    }

    /// Regions in address order.
    pub fn regions(&self) -> &[CsrRegion] {
        &self.regions
    }

    /// Registers in allocation order, which is address order within a region.
    pub fn registers(&self) -> impl Iterator<Item = &CsrRegister> {
        self.registers.values()
    }

    /// Returns the number of registers.
    pub fn len(&self) -> usize {
        self.registers.len()
    }

    /// Returns `true` if no register has been allocated.
    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_are_strided() {
        let mut map = CsrMap::new();
        assert_eq!(map.region("ctrl").base, 0x000);
        assert_eq!(map.region("mmio").base, 0x800);
        assert_eq!(map.region("ctrl").base, 0x000);
        assert_eq!(map.regions().len(), 2);
    }

    #[test]
    fn registers_are_consecutive_words() {
        let mut map = CsrMap::new();
        let reset = map.allocate("ctrl", "reset", 1, CsrAccess::ReadWrite);
        let scratch = map.allocate("ctrl", "scratch", 32, CsrAccess::ReadWrite);
        let wd = map.allocate("mmio", "watchdog_data", 32, CsrAccess::ReadWrite);
        let bitten = map.allocate("mmio", "watchdog_has_bitten", 1, CsrAccess::ReadOnly);
        assert_eq!(map.get(reset).address, 0x000);
        assert_eq!(map.get(scratch).address, 0x004);
        assert_eq!(map.get(wd).address, 0x800);
        assert_eq!(map.get(bitten).address, 0x804);
        assert_eq!(map.get(bitten).full_name(), "mmio_watchdog_has_bitten");
    }

    #[test]
    fn wide_registers_take_several_words() {
        let mut map = CsrMap::new();
        let wide = map.allocate("ctrl", "wide", 33, CsrAccess::ReadOnly);
        let next = map.allocate("ctrl", "next", 8, CsrAccess::ReadOnly);
        assert_eq!(map.get(wide).words(), 2);
        assert_eq!(map.get(next).address, 0x008);
    }

    #[test]
    fn find_by_name() {
        let mut map = CsrMap::new();
        map.allocate("mmio", "gpio_out", 4, CsrAccess::ReadWrite);
        assert_eq!(map.find("mmio", "gpio_out").unwrap().width, 4);
        assert!(map.find("ctrl", "gpio_out").is_none());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn access_display() {
        assert_eq!(CsrAccess::ReadWrite.to_string(), "rw");
        assert_eq!(CsrAccess::ReadOnly.to_string(), "ro");
    }
}
