//! I/O resources: named groups of pins as listed by a board or added at runtime.

use crate::error::PlatformError;
use serde::Serialize;

/// One signal of a resource: a pin list with an electrical standard.
///
/// Single-signal resources (a clock input, a GPIO extension) have `name == None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IoSignal {
    /// Subsignal name, e.g. `tx_data`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Pins, bit 0 first.
    pub pins: Vec<String>,
    /// Electrical standard, e.g. `LVCMOS33`.
    pub io_standard: String,
}

impl IoSignal {
    /// Returns the number of pins.
    pub fn width(&self) -> u32 {
        self.pins.len() as u32
    }
}

/// A named and indexed group of signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IoResource {
    /// Resource name, e.g. `eth` or `gpio_out`.
    pub name: String,
    /// Index among resources of the same name.
    pub index: u32,
    /// The signals, in declaration order.
    pub signals: Vec<IoSignal>,
}

impl IoResource {
    /// Creates a resource without signals.
    pub fn new(name: impl Into<String>, index: u32) -> Self {
        Self {
            name: name.into(),
            index,
            signals: Vec::new(),
        }
    }

    /// Creates a one-signal resource. `pins` is whitespace separated.
    pub fn single(name: impl Into<String>, index: u32, pins: &str, io_standard: &str) -> Self {
        let mut resource = Self::new(name, index);
        resource.signals.push(IoSignal {
            name: None,
            pins: split_pins(pins),
            io_standard: io_standard.to_string(),
        });
        resource
    }

    /// Adds a named subsignal. `pins` is whitespace separated.
    pub fn subsignal(mut self, name: &str, pins: &str, io_standard: &str) -> Self {
        self.signals.push(IoSignal {
            name: Some(name.to_string()),
            pins: split_pins(pins),
            io_standard: io_standard.to_string(),
        });
        self
    }

    /// Returns the `name:index` label used for pin ownership.
    pub fn owner(&self) -> String {
        format!("{}:{}", self.name, self.index)
    }

    /// Iterates over every pin of every signal.
    pub fn pins(&self) -> impl Iterator<Item = &str> {
        self.signals
            .iter()
            .flat_map(|s| s.pins.iter().map(String::as_str))
    }
}

fn split_pins(pins: &str) -> Vec<String> {
    pins.split_whitespace().map(str::to_string).collect()
}

/// A requested resource. Holding a handle means its pins are claimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PadHandle {
    resource: IoResource,
}

impl PadHandle {
    pub(crate) fn new(resource: IoResource) -> Self {
        Self { resource }
    }

    /// Resource name.
    pub fn name(&self) -> &str {
        &self.resource.name
    }

    /// Resource index.
    pub fn index(&self) -> u32 {
        self.resource.index
    }

    /// Returns the `name:index` label.
    pub fn owner(&self) -> String {
        self.resource.owner()
    }

    /// Every signal of the resource.
    pub fn signals(&self) -> &[IoSignal] {
        &self.resource.signals
    }

    /// Returns the named subsignal.
    pub fn signal(&self, name: &str) -> Result<&IoSignal, PlatformError> {
        self.resource
            .signals
            .iter()
            .find(|s| s.name.as_deref() == Some(name))
            .ok_or_else(|| PlatformError::UnknownSignal {
                resource: self.owner(),
                signal: name.to_string(),
            })
    }

    /// Returns the unnamed signal of a one-signal resource.
    pub fn single(&self) -> Result<&IoSignal, PlatformError> {
        match self.resource.signals.as_slice() {
            [only] if only.name.is_none() => Ok(only),
            _ => Err(PlatformError::UnknownSignal {
                resource: self.owner(),
                signal: "<single>".to_string(),
            }),
        }
    }
}
