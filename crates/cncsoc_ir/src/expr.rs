//! Right-hand-side expressions of assignments.

use crate::arena::Arena;
use crate::ids::SignalId;
use crate::signal::Signal;
use cncsoc_common::Bits;
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr, Not};

/// A two-state bit-vector expression over design signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// A whole signal.
    Signal(SignalId),
    /// `width` bits of a signal starting at bit `low`.
    Slice {
        /// The sliced signal.
        signal: SignalId,
        /// Lowest bit.
        low: u32,
        /// Number of bits.
        width: u32,
    },
    /// A constant.
    Const(Bits),
    /// Bitwise NOT.
    Not(Box<Expr>),
    /// Bitwise AND.
    And(Box<Expr>, Box<Expr>),
    /// Bitwise OR.
    Or(Box<Expr>, Box<Expr>),
    /// Concatenation, first operand in the least significant bits.
    Cat(Vec<Expr>),
}

impl Expr {
    /// A whole signal.
    pub fn signal(id: SignalId) -> Self {
        Expr::Signal(id)
    }

    /// A single bit of a signal.
    pub fn bit(id: SignalId, index: u32) -> Self {
        Expr::Slice {
            signal: id,
            low: index,
            width: 1,
        }
    }

    /// A bit range of a signal.
    pub fn slice(id: SignalId, low: u32, width: u32) -> Self {
        Expr::Slice {
            signal: id,
            low,
            width,
        }
    }

    /// A constant.
    pub fn constant(value: Bits) -> Self {
        Expr::Const(value)
    }

    /// Concatenates `parts`, the first part landing in bit 0.
    pub fn cat(parts: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Cat(parts.into_iter().collect())
    }

    /// Returns the result width given the design's signals.
    ///
    /// Binary operators take the wider operand's width.
    pub fn width(&self, signals: &Arena<SignalId, Signal>) -> u32 {
        match self {
            Expr::Signal(id) => signals[*id].width,
            Expr::Slice { width, .. } => *width,
            Expr::Const(bits) => bits.width(),
            Expr::Not(inner) => inner.width(signals),
            Expr::And(a, b) | Expr::Or(a, b) => a.width(signals).max(b.width(signals)),
            Expr::Cat(parts) => parts.iter().map(|p| p.width(signals)).sum(),
        }
    }

    /// Returns every signal read by this expression, in reading order.
    pub fn signals(&self) -> Vec<SignalId> {
        let mut out = Vec::new();
        self.collect_signals(&mut out);
        out
    }

    fn collect_signals(&self, out: &mut Vec<SignalId>) {
        match self {
            Expr::Signal(id) | Expr::Slice { signal: id, .. } => out.push(*id),
            Expr::Const(_) => {}
            Expr::Not(inner) => inner.collect_signals(out),
            Expr::And(a, b) | Expr::Or(a, b) => {
                a.collect_signals(out);
                b.collect_signals(out);
            }
            Expr::Cat(parts) => parts.iter().for_each(|p| p.collect_signals(out)),
        }
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

impl BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Expr) -> Expr {
        Expr::And(Box::new(self), Box::new(rhs))
    }
}

impl BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Expr) -> Expr {
        Expr::Or(Box::new(self), Box::new(rhs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::SignalKind;

    fn signals() -> (Arena<SignalId, Signal>, SignalId, SignalId) {
        let mut arena = Arena::new();
        let mut add = |name: &str, width| {
            let id = arena.next_id();
            arena.alloc(Signal {
                id,
                name: name.into(),
                width,
                kind: SignalKind::Wire,
                init: None,
            })
        };
        let a = add("a", 8);
        let b = add("b", 1);
        (arena, a, b)
    }

    #[test]
    fn widths() {
        let (arena, a, b) = signals();
        assert_eq!(Expr::signal(a).width(&arena), 8);
        assert_eq!(Expr::bit(a, 3).width(&arena), 1);
        assert_eq!(Expr::slice(a, 0, 7).width(&arena), 7);
        assert_eq!((Expr::bit(a, 0) & !Expr::signal(b)).width(&arena), 1);
        assert_eq!(
            Expr::cat([Expr::signal(a), Expr::signal(b)]).width(&arena),
            9
        );
        assert_eq!(Expr::constant(Bits::ones(3)).width(&arena), 3);
    }

    #[test]
    fn operators_build_trees() {
        let (_, a, b) = signals();
        let gated = Expr::bit(a, 2) & !Expr::signal(b);
        assert_eq!(
            gated,
            Expr::And(
                Box::new(Expr::bit(a, 2)),
                Box::new(Expr::Not(Box::new(Expr::Signal(b))))
            )
        );
    }

    #[test]
    fn signals_in_reading_order() {
        let (_, a, b) = signals();
        let e = Expr::cat([Expr::signal(b), Expr::bit(a, 0) | Expr::signal(b)]);
        assert_eq!(e.signals(), vec![b, a, b]);
    }
}
