//! sheetengine - in-memory spreadsheet engine.
//!
//! A sparse cell grid with a lazily-evaluated, incrementally-invalidated
//! dependency graph. The public surface is [`Sheet`] and its three edit/read
//! operations; everything else is re-exported for callers who need to name
//! the supporting types directly.

pub use sheetengine_core::{
    CellContent, CellValue, CellView, FormulaError, FormulaParseError, Position, Result, Sheet,
    SheetError, Size, ESCAPE_SIGN, FORMULA_SIGN,
};
