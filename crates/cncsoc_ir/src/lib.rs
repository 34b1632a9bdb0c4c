//! The composed hardware graph of a CNC interface SoC.
//!
//! A [`Design`] is a flat, arena-indexed graph: [`Signal`]s, top-level
//! [`Pad`]s, black-box [`Instance`]s, clock domains and a register map, tied
//! together by combinational and synchronous assignments over [`Expr`]s.
//! It is written once by the composition engine and then only read, by the
//! structural checks in [`check`], by the simulator and by exporters.

#![warn(missing_docs)]

pub mod arena;
pub mod check;
pub mod csr;
pub mod design;
pub mod expr;
pub mod ids;
pub mod instance;
pub mod pad;
pub mod signal;

pub use arena::{Arena, ArenaId};
pub use check::DesignIssue;
pub use csr::{CsrAccess, CsrMap, CsrRegion, CsrRegister, CSR_DATA_WIDTH, CSR_REGION_STRIDE};
pub use design::{
    Assignment, ClockDomain, Design, DesignStats, Driver, Identification, SyncAssignment,
};
pub use expr::Expr;
pub use ids::{ClockDomainId, CsrId, InstanceId, PadId, SignalId};
pub use instance::{Connection, Instance, ParamValue};
pub use pad::Pad;
pub use signal::{CsrField, Direction, Signal, SignalKind};
