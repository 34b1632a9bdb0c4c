//! Cycle-based simulation of composed CNC interface SoCs.
//!
//! The simulator evaluates a [`Design`](cncsoc_ir::Design) under its single
//! synchronous clock domain. Black boxes are not modeled; their outputs are
//! poked by the caller like bus-written register storage and input pads.
//!
//! ```
//! use cncsoc_common::Frequency;
//! use cncsoc_ir::{CsrAccess, Design, Direction, Expr};
//! use cncsoc_sim::SyncSimulator;
//!
//! let mut design = Design::new("top");
//! let sys = design.add_domain("sys", Frequency::from_mhz(50));
//! let csr = design.add_csr("mmio", "gpio_out", 1, CsrAccess::ReadWrite);
//! let storage = design.csrs.get(csr).storage.unwrap();
//! let pad = design.add_pad("gpio_out", 0, None, vec!["A1".into()], "LVCMOS33", Direction::Output);
//! let out = design.pad(pad).signal;
//! design.sync(sys, out, Expr::bit(storage, 0));
//!
//! let mut sim = SyncSimulator::new(&design).unwrap();
//! sim.poke("mmio_gpio_out", 1).unwrap();
//! sim.tick().unwrap();
//! assert!(sim.peek("gpio_out_0").unwrap().get(0));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod evaluator;
pub mod kernel;

pub use error::SimError;
pub use evaluator::eval_expr;
pub use kernel::SyncSimulator;
