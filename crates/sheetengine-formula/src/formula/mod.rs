//! Arithmetic formula compiler: the concrete realization of the narrow
//! "Formula facade" contract (parse, evaluate against a cell-lookup
//! callback, render canonical text, list referenced positions).

mod ast;
mod eval;
mod lexer;
mod parser;
mod refs;
mod render;

use crate::error::{FormulaError, FormulaParseError};
use crate::position::Position;
use ast::Expr;

pub use eval::CellLookup;

/// A compiled formula expression. Immutable once parsed; cheap to clone.
#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    expr: Expr,
}

/// Parse a formula's expression text (with the leading `=` already
/// stripped). Mirrors the external collaborator's `ParseFormula`.
pub fn parse_formula(expr_text: &str) -> Result<Formula, FormulaParseError> {
    let expr = parser::parse(expr_text)?;
    Ok(Formula { expr })
}

impl Formula {
    /// Evaluate against a cell-lookup callback, applying the coercion rules
    /// of §4.4 to referenced cells' values.
    pub fn evaluate(&self, lookup: &mut impl CellLookup) -> Result<f64, FormulaError> {
        eval::evaluate(&self.expr, lookup)
    }

    /// Canonical rendering of the expression (no leading `=`, no redundant
    /// whitespace or parentheses).
    pub fn render(&self) -> String {
        render::render(&self.expr)
    }

    /// Positions referenced by this formula: sorted, deduplicated, and
    /// filtered to in-bounds positions (invariant 2). Out-of-bounds
    /// references still appear in [`Formula::render`]'s output since
    /// rendering walks the AST directly.
    pub fn referenced_positions(&self) -> Vec<Position> {
        refs::collect(&self.expr)
    }
}
