use crate::error::FormulaError;
use std::fmt;

/// The observable evaluated result of a cell: one of a number, a string, or a
/// propagated formula error. Empty and Text content always produce `Text`;
/// Formula content produces `Number` or `Error` (never `Text`).
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Error(FormulaError),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => f.write_str(&crate::format::format_number(*n)),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Error(e) => write!(f, "{e}"),
        }
    }
}
