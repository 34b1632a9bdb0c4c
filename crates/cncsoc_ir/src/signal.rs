//! Signals: named, fixed-width nets of the composed graph.

use crate::ids::{ClockDomainId, CsrId, InstanceId, PadId, SignalId};
use cncsoc_common::Bits;
use serde::{Deserialize, Serialize};

/// Direction of a pad or port.
///
/// Pad directions are seen from the fabric: an `Input` pad is driven by the
/// outside world. Port directions are seen from the instance: an `Output`
/// port drives the connected signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Flows into the fabric or into the instance.
    Input,
    /// Flows out of the fabric or out of the instance.
    Output,
    /// Bidirectional, owned by a single instance.
    Inout,
}

/// Which part of a control/status register a signal represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsrField {
    /// Value written by the bus; read by the fabric.
    Storage,
    /// Value presented to the bus; driven by the fabric.
    Status,
    /// Latches `Status` into the register while high.
    WriteEnable,
}

/// What a signal is and, by extension, who may drive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Combinational net.
    Wire,
    /// Register updated on a clock edge.
    Reg,
    /// Part of a control/status register.
    Csr {
        /// The register.
        csr: CsrId,
        /// Which part of it.
        field: CsrField,
    },
    /// Top-level pad.
    Pad {
        /// The pad.
        pad: PadId,
    },
    /// Clock of a domain.
    Clock(ClockDomainId),
    /// Synchronous reset of a domain.
    Reset(ClockDomainId),
    /// Net owned by a single instance port, e.g. a bus endpoint.
    Port {
        /// The instance.
        instance: InstanceId,
    },
}

/// A named net.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// ID within the design.
    pub id: SignalId,
    /// Unique name.
    pub name: String,
    /// Width in bits.
    pub width: u32,
    /// Role of the signal.
    pub kind: SignalKind,
    /// Value after reset; zero when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init: Option<Bits>,
}

impl Signal {
    /// Returns the reset value.
    pub fn reset_value(&self) -> Bits {
        self.init.unwrap_or_else(|| Bits::zero(self.width))
    }

    /// Returns `true` for signals driven by the bus.
    pub fn is_csr_storage(&self) -> bool {
        matches!(
            self.kind,
            SignalKind::Csr {
                field: CsrField::Storage,
                ..
            }
        )
    }
}
