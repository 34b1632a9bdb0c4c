//! Cycle-based simulation of a single-clock design.
//!
//! Combinational assignments are re-evaluated until no value changes. On each
//! [`SyncSimulator::tick`] every synchronous assignment samples the settled
//! values first and all targets are updated together afterwards, so no
//! assignment sees another's result within the same edge.

use crate::error::SimError;
use crate::evaluator::eval_expr;
use cncsoc_common::Bits;
use cncsoc_ir::{Design, SignalId};
use std::collections::HashSet;

/// A simulator bound to one design.
///
/// Signals not driven by any assignment (register storage written by the
/// bus, input pads, black-box outputs) keep whatever value was last poked.
pub struct SyncSimulator<'d> {
    design: &'d Design,
    values: Vec<Bits>,
    assigned: HashSet<SignalId>,
    cycle: u64,
}

impl<'d> SyncSimulator<'d> {
    /// Creates a simulator with every signal at its reset value and settles
    /// combinational logic.
    pub fn new(design: &'d Design) -> Result<Self, SimError> {
        if design.domains.len() > 1 {
            return Err(SimError::MultipleDomains {
                count: design.domains.len(),
            });
        }
        let assigned = design
            .comb
            .iter()
            .map(|a| a.target)
            .chain(design.sync.iter().map(|a| a.target))
            .collect();
        let mut sim = Self {
            design,
            values: design.signals.values().map(|s| s.reset_value()).collect(),
            assigned,
            cycle: 0,
        };
        sim.settle()?;
        Ok(sim)
    }

    /// Returns the number of clock edges simulated so far.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Looks up a signal by name.
    pub fn signal(&self, name: &str) -> Result<SignalId, SimError> {
        self.design
            .find_signal(name)
            .ok_or_else(|| SimError::UnknownSignal {
                name: name.to_string(),
            })
    }

    /// Returns the current value of a signal.
    pub fn peek_id(&self, id: SignalId) -> Bits {
        self.values[id.as_raw() as usize]
    }

    /// Returns the current value of the named signal.
    pub fn peek(&self, name: &str) -> Result<Bits, SimError> {
        Ok(self.peek_id(self.signal(name)?))
    }

    /// Sets an undriven signal and settles combinational logic.
    pub fn poke_id(&mut self, id: SignalId, value: u64) -> Result<(), SimError> {
        let signal = self.design.signal(id);
        if self.assigned.contains(&id) {
            return Err(SimError::DrivenSignal {
                signal: signal.name.clone(),
            });
        }
        if Bits::new(value, signal.width).value() != value {
            return Err(SimError::ValueTooWide {
                signal: signal.name.clone(),
                width: signal.width,
                value,
            });
        }
        self.values[id.as_raw() as usize] = Bits::new(value, signal.width);
        self.settle()
    }

    /// Sets the named undriven signal and settles combinational logic.
    pub fn poke(&mut self, name: &str, value: u64) -> Result<(), SimError> {
        let id = self.signal(name)?;
        self.poke_id(id, value)
    }

    /// Re-evaluates combinational assignments until nothing changes.
    pub fn settle(&mut self) -> Result<(), SimError> {
        let limit = self.design.comb.len() + 1;
        for _ in 0..limit {
            let mut changed = false;
            for a in &self.design.comb {
                let width = self.design.signal(a.target).width;
                let value = Bits::new(eval_expr(&self.values, &a.value)?.value(), width);
                let slot = &mut self.values[a.target.as_raw() as usize];
                if *slot != value {
                    *slot = value;
                    changed = true;
                }
            }
            if !changed {
                return Ok(());
            }
        }
        Err(SimError::CombinationalLoop { iterations: limit })
    }

    /// Simulates one clock edge.
    pub fn tick(&mut self) -> Result<(), SimError> {
        let updates = self
            .design
            .sync
            .iter()
            .map(|a| {
                let width = self.design.signal(a.target).width;
                eval_expr(&self.values, &a.value).map(|v| (a.target, Bits::new(v.value(), width)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        for (target, value) in updates {
            self.values[target.as_raw() as usize] = value;
        }
        self.cycle += 1;
        tracing::trace!(cycle = self.cycle, "clock edge");
        self.settle()
    }

    /// Simulates `n` clock edges.
    pub fn run(&mut self, n: u64) -> Result<(), SimError> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cncsoc_common::Frequency;
    use cncsoc_ir::{CsrAccess, Direction, Expr, SignalKind};

    /// Storage bit gated by a poked fault flag, registered into an output pad.
    fn gated_output() -> Design {
        let mut d = Design::new("top");
        let sys = d.add_domain("sys", Frequency::from_mhz(50));
        let csr = d.add_csr("mmio", "gpio_out", 2, CsrAccess::ReadWrite);
        let storage = d.csrs.get(csr).storage.unwrap();
        let fault = d.add_signal("fault", 1, SignalKind::Wire);
        let pad = d.add_pad("gpio_out", 0, None, vec!["A1".into()], "LVCMOS33", Direction::Output);
        let pad_signal = d.pad(pad).signal;
        d.sync(sys, pad_signal, Expr::bit(storage, 0) & !Expr::signal(fault));
        d
    }

    #[test]
    fn sync_assignment_takes_effect_on_tick() {
        let d = gated_output();
        let mut sim = SyncSimulator::new(&d).unwrap();
        sim.poke("mmio_gpio_out", 0b01).unwrap();
        assert_eq!(sim.peek("gpio_out_0").unwrap(), Bits::bit(false));
        sim.tick().unwrap();
        assert_eq!(sim.peek("gpio_out_0").unwrap(), Bits::bit(true));
        assert_eq!(sim.cycle(), 1);
    }

    #[test]
    fn fault_forces_output_low() {
        let d = gated_output();
        let mut sim = SyncSimulator::new(&d).unwrap();
        sim.poke("mmio_gpio_out", 0b11).unwrap();
        sim.poke("fault", 1).unwrap();
        sim.run(3).unwrap();
        assert_eq!(sim.peek("gpio_out_0").unwrap(), Bits::bit(false));
    }

    #[test]
    fn driven_signals_cannot_be_poked() {
        let d = gated_output();
        let mut sim = SyncSimulator::new(&d).unwrap();
        assert!(matches!(
            sim.poke("gpio_out_0", 1),
            Err(SimError::DrivenSignal { .. })
        ));
    }

    #[test]
    fn poke_rejects_wide_values() {
        let d = gated_output();
        let mut sim = SyncSimulator::new(&d).unwrap();
        assert!(matches!(
            sim.poke("mmio_gpio_out", 0b100),
            Err(SimError::ValueTooWide { .. })
        ));
    }

    #[test]
    fn unknown_signal() {
        let d = gated_output();
        let sim = SyncSimulator::new(&d).unwrap();
        assert!(matches!(
            sim.peek("nope"),
            Err(SimError::UnknownSignal { .. })
        ));
    }

    #[test]
    fn sync_updates_are_simultaneous() {
        // a <= b; b <= a swaps every cycle.
        let mut d = Design::new("top");
        let sys = d.add_domain("sys", Frequency::from_mhz(50));
        let a = d.add_signal("a", 1, SignalKind::Reg);
        let b = d.add_signal("b", 1, SignalKind::Reg);
        d.set_init(a, Bits::bit(true));
        d.sync(sys, a, Expr::signal(b));
        d.sync(sys, b, Expr::signal(a));
        let mut sim = SyncSimulator::new(&d).unwrap();
        sim.tick().unwrap();
        assert_eq!(sim.peek_id(a), Bits::bit(false));
        assert_eq!(sim.peek_id(b), Bits::bit(true));
        sim.tick().unwrap();
        assert_eq!(sim.peek_id(a), Bits::bit(true));
    }

    #[test]
    fn comb_chain_settles_out_of_order() {
        let mut d = Design::new("top");
        let x = d.add_signal("x", 1, SignalKind::Wire);
        let y = d.add_signal("y", 1, SignalKind::Wire);
        let z = d.add_signal("z", 1, SignalKind::Wire);
        d.comb(z, !Expr::signal(y));
        d.comb(y, Expr::signal(x));
        let mut sim = SyncSimulator::new(&d).unwrap();
        assert_eq!(sim.peek_id(z), Bits::bit(true));
        sim.poke_id(x, 1).unwrap();
        assert_eq!(sim.peek_id(z), Bits::bit(false));
    }

    #[test]
    fn combinational_loop_detected() {
        let mut d = Design::new("top");
        let x = d.add_signal("x", 1, SignalKind::Wire);
        d.comb(x, !Expr::signal(x));
        assert!(matches!(
            SyncSimulator::new(&d),
            Err(SimError::CombinationalLoop { .. })
        ));
    }

    #[test]
    fn multiple_domains_rejected() {
        let mut d = Design::new("top");
        d.add_domain("sys", Frequency::from_mhz(50));
        d.add_domain("eth_rx", Frequency::from_mhz(125));
        assert!(matches!(
            SyncSimulator::new(&d),
            Err(SimError::MultipleDomains { count: 2 })
        ));
    }
}
