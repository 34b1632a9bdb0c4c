//! The composed hardware graph.
//!
//! A [`Design`] owns every signal, pad, instance, clock domain and register of
//! one composed SoC, plus the flat list of assignments that wire them. All
//! synchronous assignments of a domain take effect on the same clock edge and
//! read the values from before that edge.

use crate::arena::Arena;
use crate::csr::{CsrAccess, CsrMap};
use crate::expr::Expr;
use crate::ids::{ClockDomainId, CsrId, InstanceId, PadId, SignalId};
use crate::instance::{Connection, Instance, ParamValue};
use crate::pad::Pad;
use crate::signal::{CsrField, Direction, Signal, SignalKind};
use cncsoc_common::{Bits, ContentHash, Frequency};
use serde::{Deserialize, Serialize};

/// A synchronous clock domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockDomain {
    /// ID within the design.
    pub id: ClockDomainId,
    /// Domain name, e.g. `sys`.
    pub name: String,
    /// Clock frequency.
    pub frequency: Frequency,
    /// Clock signal.
    pub clock: SignalId,
    /// Synchronous reset signal.
    pub reset: SignalId,
}

/// SoC identification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identification {
    /// Human-readable identification string.
    pub text: String,
    /// Hash of the configuration the SoC was built from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<ContentHash>,
}

/// A combinational assignment: `target` always equals `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Driven signal.
    pub target: SignalId,
    /// Driving expression.
    pub value: Expr,
}

/// A synchronous assignment: `target` takes `value` on each edge of `domain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncAssignment {
    /// Clock domain.
    pub domain: ClockDomainId,
    /// Driven register.
    pub target: SignalId,
    /// Value sampled before the edge.
    pub value: Expr,
}

/// Something that determines the value of a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Driver {
    /// The comb assignment at this index.
    Comb(usize),
    /// The sync assignment at this index.
    Sync(usize),
    /// An output or inout port of an instance.
    Instance {
        /// The instance.
        instance: InstanceId,
        /// The port.
        port: String,
    },
    /// The bus (CSR storage) or the outside world (input pads).
    External,
}

/// Entity counts of a design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DesignStats {
    /// Number of signals.
    pub signals: usize,
    /// Number of pads.
    pub pads: usize,
    /// Number of instances.
    pub instances: usize,
    /// Number of registers.
    pub csrs: usize,
    /// Number of comb assignments.
    pub comb: usize,
    /// Number of sync assignments.
    pub sync: usize,
}

/// A composed SoC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Design {
    /// Top-level name.
    pub name: String,
    /// Identification.
    pub ident: Identification,
    /// All signals.
    pub signals: Arena<SignalId, Signal>,
    /// All pads.
    pub pads: Arena<PadId, Pad>,
    /// All instances.
    pub instances: Arena<InstanceId, Instance>,
    /// All clock domains.
    pub domains: Arena<ClockDomainId, ClockDomain>,
    /// The register map.
    pub csrs: CsrMap,
    /// Combinational assignments in creation order.
    pub comb: Vec<Assignment>,
    /// Synchronous assignments in creation order.
    pub sync: Vec<SyncAssignment>,
}

impl Design {
    /// Creates an empty design.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ident: Identification::default(),
            signals: Arena::new(),
            pads: Arena::new(),
            instances: Arena::new(),
            domains: Arena::new(),
            csrs: CsrMap::new(),
            comb: Vec::new(),
            sync: Vec::new(),
        }
    }

    /// Adds a signal.
    pub fn add_signal(&mut self, name: impl Into<String>, width: u32, kind: SignalKind) -> SignalId {
        let id = self.signals.next_id();
        self.signals.alloc(Signal {
            id,
            name: name.into(),
            width,
            kind,
            init: None,
        })
    }

    /// Sets the reset value of a signal.
    pub fn set_init(&mut self, signal: SignalId, value: Bits) {
        self.signals[signal].init = Some(value);
    }

    /// Returns a signal.
    pub fn signal(&self, id: SignalId) -> &Signal {
        &self.signals[id]
    }

    /// Looks up a signal by name.
    pub fn find_signal(&self, name: &str) -> Option<SignalId> {
        self.signals.position(|s| s.name == name)
    }

    /// Adds a pad and its signal, named after the pad label.
    pub fn add_pad(
        &mut self,
        resource: &str,
        index: u32,
        subsignal: Option<&str>,
        pins: Vec<String>,
        io_standard: &str,
        direction: Direction,
    ) -> PadId {
        let id = self.pads.next_id();
        let mut pad = Pad {
            id,
            resource: resource.to_string(),
            index,
            subsignal: subsignal.map(str::to_string),
            pins,
            io_standard: io_standard.to_string(),
            direction,
            signal: SignalId::from_raw(0),
        };
        pad.signal = self.add_signal(pad.label(), pad.pins.len() as u32, SignalKind::Pad { pad: id });
        self.pads.alloc(pad)
    }

    /// Returns a pad.
    pub fn pad(&self, id: PadId) -> &Pad {
        &self.pads[id]
    }

    /// Adds a clock domain with `<name>_clk` and `<name>_rst` signals.
    pub fn add_domain(&mut self, name: &str, frequency: Frequency) -> ClockDomainId {
        let id = self.domains.next_id();
        let clock = self.add_signal(format!("{name}_clk"), 1, SignalKind::Clock(id));
        let reset = self.add_signal(format!("{name}_rst"), 1, SignalKind::Reset(id));
        self.domains.alloc(ClockDomain {
            id,
            name: name.to_string(),
            frequency,
            clock,
            reset,
        })
    }

    /// Returns a clock domain.
    pub fn domain(&self, id: ClockDomainId) -> &ClockDomain {
        &self.domains[id]
    }

    /// Adds an instance of `core`.
    pub fn add_instance(
        &mut self,
        name: impl Into<String>,
        core: &str,
        domain: Option<ClockDomainId>,
    ) -> InstanceId {
        let id = self.instances.next_id();
        self.instances.alloc(Instance {
            id,
            name: name.into(),
            core: core.to_string(),
            domain,
            params: Vec::new(),
            connections: Vec::new(),
        })
    }

    /// Returns an instance.
    pub fn instance(&self, id: InstanceId) -> &Instance {
        &self.instances[id]
    }

    /// Adds a parameter to an instance.
    pub fn set_param(&mut self, instance: InstanceId, name: &str, value: ParamValue) {
        self.instances[instance]
            .params
            .push((name.to_string(), value));
    }

    /// Binds a port of width `width` to `signal`.
    pub fn connect(
        &mut self,
        instance: InstanceId,
        port: &str,
        direction: Direction,
        width: u32,
        signal: SignalId,
    ) {
        self.instances[instance].connections.push(Connection {
            port: port.to_string(),
            direction,
            width,
            signal,
        });
    }

    /// Allocates a register and its signals.
    ///
    /// Read-write registers get a storage signal named `<region>_<name>`;
    /// read-only registers get `<region>_<name>_status` and a
    /// `<region>_<name>_we` strobe.
    pub fn add_csr(&mut self, region: &str, name: &str, width: u32, access: CsrAccess) -> CsrId {
        let csr = self.csrs.allocate(region, name, width, access);
        let full = self.csrs.get(csr).full_name();
        let field = |field| SignalKind::Csr { csr, field };
        match access {
            CsrAccess::ReadWrite => {
                let storage = self.add_signal(full, width, field(CsrField::Storage));
                self.csrs.get_mut(csr).storage = Some(storage);
            }
            CsrAccess::ReadOnly => {
                let status = self.add_signal(format!("{full}_status"), width, field(CsrField::Status));
                let we = self.add_signal(format!("{full}_we"), 1, field(CsrField::WriteEnable));
                let register = self.csrs.get_mut(csr);
                register.status = Some(status);
                register.write_enable = Some(we);
            }
        }
        csr
    }

    /// Adds `target = value`.
    pub fn comb(&mut self, target: SignalId, value: Expr) {
        self.comb.push(Assignment { target, value });
    }

    /// Adds `target <= value` on `domain`.
    pub fn sync(&mut self, domain: ClockDomainId, target: SignalId, value: Expr) {
        self.sync.push(SyncAssignment {
            domain,
            target,
            value,
        });
    }

    /// Returns the comb expression driving `target`, if any.
    pub fn comb_value(&self, target: SignalId) -> Option<&Expr> {
        self.comb
            .iter()
            .find(|a| a.target == target)
            .map(|a| &a.value)
    }

    /// Returns the sync assignment driving `target`, if any.
    pub fn sync_value(&self, target: SignalId) -> Option<&SyncAssignment> {
        self.sync.iter().find(|a| a.target == target)
    }

    /// Returns `true` if `signal` is driven from outside the fabric.
    pub fn is_external(&self, signal: SignalId) -> bool {
        let s = &self.signals[signal];
        match s.kind {
            SignalKind::Csr {
                field: CsrField::Storage,
                ..
            } => true,
            SignalKind::Pad { pad } => self.pads[pad].direction == Direction::Input,
            _ => false,
        }
    }

    /// Lists every driver of `signal`.
    pub fn drivers(&self, signal: SignalId) -> Vec<Driver> {
        let mut drivers = Vec::new();
        if self.is_external(signal) {
            drivers.push(Driver::External);
        }
        for (i, a) in self.comb.iter().enumerate() {
            if a.target == signal {
                drivers.push(Driver::Comb(i));
            }
        }
        for (i, a) in self.sync.iter().enumerate() {
            if a.target == signal {
                drivers.push(Driver::Sync(i));
            }
        }
        for instance in self.instances.values() {
            for c in &instance.connections {
                if c.signal == signal && c.drives() {
                    drivers.push(Driver::Instance {
                        instance: instance.id,
                        port: c.port.clone(),
                    });
                }
            }
        }
        drivers
    }

    /// Returns entity counts.
    pub fn stats(&self) -> DesignStats {
        DesignStats {
            signals: self.signals.len(),
            pads: self.pads.len(),
            instances: self.instances.len(),
            csrs: self.csrs.len(),
            comb: self.comb.len(),
            sync: self.sync.len(),
        }
    }
}
