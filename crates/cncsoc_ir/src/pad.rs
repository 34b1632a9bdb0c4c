//! Top-level pads: one per platform signal taken by the design.

use crate::ids::{PadId, SignalId};
use crate::signal::Direction;
use serde::{Deserialize, Serialize};

/// A group of pins of a platform resource, bound to one design signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pad {
    /// ID within the design.
    pub id: PadId,
    /// Platform resource name, e.g. `gpio_out`.
    pub resource: String,
    /// Platform resource index.
    pub index: u32,
    /// Subsignal of the resource, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsignal: Option<String>,
    /// Pins, bit 0 first.
    pub pins: Vec<String>,
    /// Electrical standard.
    pub io_standard: String,
    /// Direction seen from the fabric.
    pub direction: Direction,
    /// The signal carrying the pad's value.
    pub signal: SignalId,
}

impl Pad {
    /// Returns the pad label, e.g. `eth_0_tx_data` or `gpio_out_3`.
    pub fn label(&self) -> String {
        match &self.subsignal {
            Some(sub) => format!("{}_{}_{}", self.resource, self.index, sub),
            None => format!("{}_{}", self.resource, self.index),
        }
    }
}
