//! Expression evaluation over a snapshot of signal values.

use crate::error::SimError;
use cncsoc_common::{Bits, MAX_WIDTH};
use cncsoc_ir::{Expr, SignalId};

/// Evaluates `expr` against `values`, indexed by raw signal ID.
///
/// Binary operators zero-extend the narrower operand.
pub fn eval_expr(values: &[Bits], expr: &Expr) -> Result<Bits, SimError> {
    match expr {
        Expr::Signal(id) => read(values, *id),
        Expr::Slice { signal, low, width } => {
            let value = read(values, *signal)?;
            if low + width > value.width() {
                return Err(SimError::EvalError {
                    reason: format!(
                        "slice [{low}+:{width}] out of range for {width_of} bits",
                        width_of = value.width()
                    ),
                });
            }
            Ok(value.slice(*low, *width))
        }
        Expr::Const(bits) => Ok(*bits),
        Expr::Not(inner) => Ok(!eval_expr(values, inner)?),
        Expr::And(a, b) => Ok(eval_expr(values, a)? & eval_expr(values, b)?),
        Expr::Or(a, b) => Ok(eval_expr(values, a)? | eval_expr(values, b)?),
        Expr::Cat(parts) => {
            let parts = parts
                .iter()
                .map(|p| eval_expr(values, p))
                .collect::<Result<Vec<_>, _>>()?;
            let total: u32 = parts.iter().map(|p| p.width()).sum();
            if total > MAX_WIDTH {
                return Err(SimError::EvalError {
                    reason: format!("concatenation of {total} bits exceeds {MAX_WIDTH}"),
                });
            }
            Ok(Bits::concat(parts))
        }
    }
}

fn read(values: &[Bits], id: SignalId) -> Result<Bits, SimError> {
    values
        .get(id.as_raw() as usize)
        .copied()
        .ok_or_else(|| SimError::EvalError {
            reason: format!("signal {id} does not exist"),
        })
}
