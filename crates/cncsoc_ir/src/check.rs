//! Structural checks on a composed design.

use crate::design::{Design, Driver};
use crate::ids::SignalId;
use crate::signal::{CsrField, Direction, SignalKind};
use std::collections::HashSet;
use std::fmt;

/// A structural problem found by [`Design::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesignIssue {
    /// Two signals share a name.
    DuplicateName {
        /// The name.
        name: String,
    },
    /// A signal has more than one driver.
    MultipleDrivers {
        /// Signal name.
        signal: String,
        /// Number of drivers.
        count: usize,
    },
    /// An assignment or instance drives a signal owned by the bus or the outside world.
    DrivesExternal {
        /// Signal name.
        signal: String,
    },
    /// A signal that must be driven has no driver.
    Undriven {
        /// Signal name.
        signal: String,
    },
    /// Value and target widths differ.
    WidthMismatch {
        /// Where the mismatch is, e.g. `assignment to gpio_out_0`.
        context: String,
        /// Width of the target or port.
        expected: u32,
        /// Width of the value or signal.
        found: u32,
    },
}

impl fmt::Display for DesignIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignIssue::DuplicateName { name } => write!(f, "signal name '{name}' is used twice"),
            DesignIssue::MultipleDrivers { signal, count } => {
                write!(f, "signal '{signal}' has {count} drivers")
            }
            DesignIssue::DrivesExternal { signal } => {
                write!(f, "signal '{signal}' is driven externally and must not be assigned")
            }
            DesignIssue::Undriven { signal } => write!(f, "signal '{signal}' has no driver"),
            DesignIssue::WidthMismatch {
                context,
                expected,
                found,
            } => write!(f, "{context}: expected {expected} bits, found {found}"),
        }
    }
}

impl Design {
    /// Runs every structural check and returns the issues found, in signal order.
    pub fn check(&self) -> Vec<DesignIssue> {
        let mut issues = Vec::new();

        let mut names = HashSet::new();
        for signal in self.signals.values() {
            if !names.insert(signal.name.as_str()) {
                issues.push(DesignIssue::DuplicateName {
                    name: signal.name.clone(),
                });
            }
        }

        let must_drive = self.signals_needing_driver();
        for signal in self.signals.values() {
            let drivers = self.drivers(signal.id);
            let external = drivers.contains(&Driver::External);
            if external && drivers.len() > 1 {
                issues.push(DesignIssue::DrivesExternal {
                    signal: signal.name.clone(),
                });
            } else if drivers.len() > 1 {
                issues.push(DesignIssue::MultipleDrivers {
                    signal: signal.name.clone(),
                    count: drivers.len(),
                });
            } else if drivers.is_empty() && must_drive.contains(&signal.id) {
                issues.push(DesignIssue::Undriven {
                    signal: signal.name.clone(),
                });
            }
        }

        for a in &self.comb {
            self.check_width(&mut issues, a.target, a.value.width(&self.signals));
        }
        for a in &self.sync {
            self.check_width(&mut issues, a.target, a.value.width(&self.signals));
        }
        for instance in self.instances.values() {
            for c in &instance.connections {
                let found = self.signals[c.signal].width;
                if found != c.width {
                    issues.push(DesignIssue::WidthMismatch {
                        context: format!("port {}.{}", instance.name, c.port),
                        expected: c.width,
                        found,
                    });
                }
            }
        }

        issues
    }

    fn check_width(&self, issues: &mut Vec<DesignIssue>, target: SignalId, found: u32) {
        let target = &self.signals[target];
        if target.width != found {
            issues.push(DesignIssue::WidthMismatch {
                context: format!("assignment to {}", target.name),
                expected: target.width,
                found,
            });
        }
    }

    /// Output pads, CSR status strobes and everything that is read.
    fn signals_needing_driver(&self) -> HashSet<SignalId> {
        let mut needed = HashSet::new();
        for signal in self.signals.values() {
            let required = match signal.kind {
                SignalKind::Pad { pad } => self.pads[pad].direction == Direction::Output,
                SignalKind::Csr { field, .. } => field != CsrField::Storage,
                _ => false,
            };
            if required {
                needed.insert(signal.id);
            }
        }
        for a in &self.comb {
            needed.extend(a.value.signals());
        }
        for a in &self.sync {
            needed.extend(a.value.signals());
        }
        for instance in self.instances.values() {
            for c in &instance.connections {
                if c.direction == Direction::Input {
                    needed.insert(c.signal);
                }
            }
        }
        needed
    }
}
