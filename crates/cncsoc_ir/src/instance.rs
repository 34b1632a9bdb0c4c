//! Black-box module instances and their port connections.

use crate::ids::{ClockDomainId, InstanceId, SignalId};
use crate::signal::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parameter value passed to an instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// An integer.
    Int(i64),
    /// A real number.
    Real(f64),
    /// A flag.
    Bool(bool),
    /// A string.
    Str(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Real(v) => write!(f, "{v:e}"),
            ParamValue::Bool(v) => write!(f, "{v}"),
            ParamValue::Str(v) => write!(f, "\"{v}\""),
        }
    }
}

/// A port of an instance bound to a design signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Port name on the core.
    pub port: String,
    /// Port direction seen from the instance.
    pub direction: Direction,
    /// Declared port width.
    pub width: u32,
    /// The connected signal.
    pub signal: SignalId,
}

impl Connection {
    /// Returns `true` if the instance drives the connected signal.
    pub fn drives(&self) -> bool {
        matches!(self.direction, Direction::Output | Direction::Inout)
    }
}

/// An instance of an opaque core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// ID within the design.
    pub id: InstanceId,
    /// Unique instance name.
    pub name: String,
    /// Core type, e.g. `watchdog` or `pwm_pdm`.
    pub core: String,
    /// Clock domain the instance runs in, if clocked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<ClockDomainId>,
    /// Parameters in declaration order.
    pub params: Vec<(String, ParamValue)>,
    /// Port connections in declaration order.
    pub connections: Vec<Connection>,
}

impl Instance {
    /// Looks up a parameter.
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Looks up a connection.
    pub fn connection(&self, port: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.port == port)
    }
}
