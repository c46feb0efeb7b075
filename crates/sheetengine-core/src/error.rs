use sheetengine_formula::{FormulaParseError, Position};

/// Errors raised by the Sheet's edit/read protocol (`SetCell`, `GetCell`,
/// `ClearCell`). Distinct from [`sheetengine_formula::FormulaError`], which is
/// a domain *value* propagated through `value()` rather than a rejection of
/// the edit itself (see §7/§9 of the design: the two channels are kept
/// separate on purpose).
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SheetError {
    #[error("position {0} is out of bounds")]
    InvalidPosition(Position),

    #[error("formula does not parse: {0}")]
    FormulaException(#[from] FormulaParseError),

    #[error("setting {0} would create a circular dependency")]
    CircularDependency(Position),
}

pub type Result<T> = std::result::Result<T, SheetError>;
