use super::ast::{BinOp, Expr};
use crate::error::FormulaError;
use crate::position::Position;
use crate::value::CellValue;

/// Resolves a [`Position`] to the value of the cell there, or `None` if the
/// position has never been materialized in the caller's grid.
pub trait CellLookup {
    fn lookup(&mut self, pos: Position) -> Option<CellValue>;
}

impl<F: FnMut(Position) -> Option<CellValue>> CellLookup for F {
    fn lookup(&mut self, pos: Position) -> Option<CellValue> {
        self(pos)
    }
}

pub(super) fn evaluate(
    expr: &Expr,
    lookup: &mut dyn CellLookup,
) -> Result<f64, FormulaError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Ref(pos) => resolve(*pos, lookup),
        Expr::Neg(inner) => {
            let v = evaluate(inner, lookup)?;
            checked(-v)
        }
        Expr::BinOp(op, lhs, rhs) => {
            let l = evaluate(lhs, lookup)?;
            let r = evaluate(rhs, lookup)?;
            let result = match op {
                BinOp::Add => l + r,
                BinOp::Sub => l - r,
                BinOp::Mul => l * r,
                BinOp::Div => {
                    if r == 0.0 {
                        return Err(FormulaError::Arithmetic);
                    }
                    l / r
                }
            };
            checked(result)
        }
    }
}

fn checked(n: f64) -> Result<f64, FormulaError> {
    if n.is_finite() { Ok(n) } else { Err(FormulaError::Arithmetic) }
}

/// Resolve a referenced position to a number per §4.4's coercion rules:
/// invalid position -> `#REF!`; unresolved -> `0.0`; number -> itself; string
/// -> `0.0` if empty, the parsed number if it parses in full, else `#VALUE!`;
/// error -> re-raised.
fn resolve(pos: Position, lookup: &mut dyn CellLookup) -> Result<f64, FormulaError> {
    if !pos.is_valid() {
        return Err(FormulaError::Ref);
    }
    match lookup.lookup(pos) {
        None => Ok(0.0),
        Some(CellValue::Number(n)) => Ok(n),
        Some(CellValue::Text(s)) => {
            if s.is_empty() {
                Ok(0.0)
            } else {
                s.parse::<f64>()
                    .ok()
                    .filter(|n: &f64| n.is_finite())
                    .ok_or(FormulaError::Value)
            }
        }
        Some(CellValue::Error(e)) => Err(e),
    }
}
