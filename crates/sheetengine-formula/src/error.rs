use std::fmt;

/// A categorized formula evaluation failure, propagated as a *value* rather
/// than an error channel: a formula whose operand evaluates to one of these
/// yields that same error as its own result (see [`crate::Formula::evaluate`]).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FormulaError {
    /// A referenced position fell outside the grid bounds.
    Ref,
    /// Non-numeric text was used where a number was required.
    Value,
    /// An arithmetic operation failed (division by zero, non-finite result).
    Arithmetic,
}

impl FormulaError {
    /// The symbol this error renders as in cell output (e.g. `#REF!`).
    pub fn symbol(&self) -> &'static str {
        match self {
            FormulaError::Ref => "#REF!",
            FormulaError::Value => "#VALUE!",
            FormulaError::Arithmetic => "#ARITHM!",
        }
    }
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Why a raw formula string failed to compile into an AST.
///
/// This is a distinct, ordinary error type (not [`FormulaError`]): compile
/// failures reject the edit entirely rather than becoming a cell's value.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum FormulaParseError {
    #[error("empty formula")]
    Empty,
    #[error("unexpected character {0:?} at byte {1}")]
    UnexpectedChar(char, usize),
    #[error("unexpected end of formula")]
    UnexpectedEnd,
    #[error("expected ')'")]
    UnclosedParen,
    #[error("trailing input after formula: {0:?}")]
    TrailingInput(String),
}
