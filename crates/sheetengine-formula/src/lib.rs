//! Position codec and arithmetic formula compiler for `sheetengine`.
//!
//! This crate supplies the concrete realizations of the two narrow external
//! collaborators the engine depends on: an A1-style [`Position`] codec and a
//! small recursive-descent arithmetic [`Formula`] compiler. Neither knows
//! anything about cells, sheets, or dependency graphs — those live in
//! `sheetengine-core`.

mod error;
mod format;
mod formula;
mod position;
mod value;

pub use error::{FormulaError, FormulaParseError};
pub use format::format_number;
pub use formula::{CellLookup, Formula, parse_formula};
pub use position::{MAX_COLS, MAX_ROWS, Position, Size};
pub use value::CellValue;
