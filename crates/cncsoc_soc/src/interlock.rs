//! Proof that every output-class channel is gated by the watchdog.
//!
//! A digital output pad must be registered from `gpio_out[i] & !has_bitten`
//! on the system domain, and the enable of PWM generator `i` from
//! `pwm_i_enable & !has_bitten`. Anything else is a violation.

use crate::compose::ComposedSoc;
use cncsoc_ir::{Design, Driver, Expr, SignalId};
use std::fmt;

/// A way in which a channel escapes the interlock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterlockViolation {
    /// The signal is not driven by a synchronous assignment on the system domain.
    NotRegistered {
        /// Signal name.
        signal: String,
    },
    /// The driving expression is not ANDed with `!has_bitten`.
    Ungated {
        /// Signal name.
        signal: String,
    },
    /// Gated, but from the wrong register bit.
    Misbound {
        /// Signal name.
        signal: String,
        /// The register bit it should follow.
        expected: String,
    },
    /// A PWM pad is not driven by its generator alone.
    ForeignDriver {
        /// Signal name.
        signal: String,
    },
}

impl fmt::Display for InterlockViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterlockViolation::NotRegistered { signal } => {
                write!(f, "'{signal}' is not registered on the system clock")
            }
            InterlockViolation::Ungated { signal } => {
                write!(f, "'{signal}' is not gated by the watchdog")
            }
            InterlockViolation::Misbound { signal, expected } => {
                write!(f, "'{signal}' does not follow {expected}")
            }
            InterlockViolation::ForeignDriver { signal } => {
                write!(f, "'{signal}' is driven by something other than its generator")
            }
        }
    }
}

/// Returns `x` if `expr` is `x & !has_bitten` or `!has_bitten & x`.
fn gated_operand(expr: &Expr, has_bitten: SignalId) -> Option<&Expr> {
    let Expr::And(a, b) = expr else {
        return None;
    };
    let is_guard = |e: &Expr| matches!(e, Expr::Not(inner) if **inner == Expr::Signal(has_bitten));
    if is_guard(b.as_ref()) {
        Some(a.as_ref())
    } else if is_guard(a.as_ref()) {
        Some(b.as_ref())
    } else {
        None
    }
}

struct Checker<'a> {
    soc: &'a ComposedSoc,
    violations: Vec<InterlockViolation>,
}

impl<'a> Checker<'a> {
    fn design(&self) -> &'a Design {
        &self.soc.design
    }

    fn name(&self, signal: SignalId) -> String {
        self.design().signal(signal).name.clone()
    }

    /// Checks `target <= expected & !has_bitten` on the system domain.
    fn expect_gated(&mut self, target: SignalId, expected: &Expr, expected_name: String) {
        let signal = self.name(target);
        let assignment = match self.design().sync_value(target) {
            Some(a) if a.domain == self.soc.sys => a,
            _ => {
                self.violations
                    .push(InterlockViolation::NotRegistered { signal });
                return;
            }
        };
        match gated_operand(&assignment.value, self.soc.watchdog.has_bitten) {
            None => self.violations.push(InterlockViolation::Ungated { signal }),
            Some(operand) if operand != expected => {
                self.violations.push(InterlockViolation::Misbound {
                    signal,
                    expected: expected_name,
                })
            }
            Some(_) => {}
        }
    }
}

/// Returns every interlock violation of `soc`, outputs first, in channel order.
pub fn verify_interlock(soc: &ComposedSoc) -> Vec<InterlockViolation> {
    let mut checker = Checker {
        soc,
        violations: Vec::new(),
    };

    if !soc.outputs.is_empty() {
        match soc.registers.gpio_out {
            Some(gpio_out) => {
                let register = checker.name(gpio_out.storage);
                for (i, &pad) in soc.outputs.iter().enumerate() {
                    checker.expect_gated(
                        soc.pad_signal(pad),
                        &gpio_out.bit(i as u32),
                        format!("{register}[{i}]"),
                    );
                }
            }
            None => {
                for &pad in &soc.outputs {
                    let signal = checker.name(soc.pad_signal(pad));
                    checker
                        .violations
                        .push(InterlockViolation::Ungated { signal });
                }
            }
        }
    }

    for (i, generator) in soc.pwm.iter().enumerate() {
        match soc.registers.pwm.get(i) {
            Some(regs) => {
                let register = checker.name(regs.enable.storage);
                checker.expect_gated(generator.enable, &regs.enable.value(), register);
            }
            None => {
                let signal = checker.name(generator.enable);
                checker
                    .violations
                    .push(InterlockViolation::Ungated { signal });
            }
        }
        let pad = soc.pad_signal(generator.pad);
        let own = Driver::Instance {
            instance: generator.instance,
            port: "out".to_string(),
        };
        if soc.design.drivers(pad) != vec![own] {
            let signal = checker.name(pad);
            checker
                .violations
                .push(InterlockViolation::ForeignDriver { signal });
        }
    }

    checker.violations
}
