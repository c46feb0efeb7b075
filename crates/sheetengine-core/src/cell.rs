//! Cell content variants and the owned [`Cell`] grid entry.

use sheetengine_formula::{CellValue, Formula};
use std::cell::RefCell;
use std::collections::HashSet;
use sheetengine_formula::{FormulaError, Position};

use crate::sheet::Sheet;

/// The escape sentinel: leading this character in `Text` content strips it
/// from `value()` but keeps it in `text()`.
pub const ESCAPE_SIGN: char = '\'';
/// The formula sentinel: leading a raw input of length >= 2 with this
/// character marks the remainder as an expression.
pub const FORMULA_SIGN: char = '=';

/// One cell's content: exactly one of empty, literal text, or a compiled
/// formula.
#[derive(Clone, Debug)]
pub enum CellContent {
    Empty,
    Text(String),
    Formula(Formula),
}

impl CellContent {
    /// Classify a raw `SetCell` input string into a content variant, per
    /// §4.3 step 3. Does not run the cycle check; callers (the Sheet) are
    /// responsible for that before committing.
    pub(crate) fn classify(raw: &str) -> Result<CellContent, sheetengine_formula::FormulaParseError> {
        if raw.is_empty() {
            return Ok(CellContent::Empty);
        }
        if raw.len() >= 2 && raw.starts_with(FORMULA_SIGN) {
            let formula = sheetengine_formula::parse_formula(&raw[FORMULA_SIGN.len_utf8()..])?;
            return Ok(CellContent::Formula(formula));
        }
        Ok(CellContent::Text(raw.to_string()))
    }

    /// The raw user-facing text that round-trips through `SetCell`.
    pub fn text(&self) -> String {
        match self {
            CellContent::Empty => String::new(),
            CellContent::Text(t) => t.clone(),
            CellContent::Formula(f) => format!("{FORMULA_SIGN}{}", f.render()),
        }
    }

    /// Positions this content refers to: sorted, deduplicated, in-bounds
    /// only (invariant 2). Empty for non-formula content.
    pub fn referenced_positions(&self) -> Vec<Position> {
        match self {
            CellContent::Formula(f) => f.referenced_positions(),
            _ => Vec::new(),
        }
    }

    pub fn is_formula(&self) -> bool {
        matches!(self, CellContent::Formula(_))
    }
}

/// A single grid entry: content plus the incremental adjacency sets that
/// make up the dependency graph, and a lazily-populated formula cache.
#[derive(Debug)]
pub struct Cell {
    content: CellContent,
    /// Cells this cell currently references (outgoing edges).
    ancestors: HashSet<Position>,
    /// Cells currently referencing this cell (incoming edges).
    descendants: HashSet<Position>,
    /// Memoized formula result. `RefCell` because `value()` computes it
    /// lazily through a shared reference (§4.4's memoization rule); always
    /// `None` for non-formula content.
    cache: RefCell<Option<Result<f64, FormulaError>>>,
}

impl Cell {
    pub(crate) fn new_empty() -> Cell {
        Cell {
            content: CellContent::Empty,
            ancestors: HashSet::new(),
            descendants: HashSet::new(),
            cache: RefCell::new(None),
        }
    }

    pub(crate) fn content(&self) -> &CellContent {
        &self.content
    }

    pub(crate) fn set_content(&mut self, content: CellContent) {
        self.content = content;
        self.clear_own_cache();
    }

    pub fn ancestors(&self) -> &HashSet<Position> {
        &self.ancestors
    }

    pub fn descendants(&self) -> &HashSet<Position> {
        &self.descendants
    }

    pub(crate) fn descendants_mut(&mut self) -> &mut HashSet<Position> {
        &mut self.descendants
    }

    pub(crate) fn ancestors_mut(&mut self) -> &mut HashSet<Position> {
        &mut self.ancestors
    }

    /// The raw user-facing text (§4.2).
    pub fn text(&self) -> String {
        self.content.text()
    }

    /// Whether the cache currently holds a memoized result.
    pub(crate) fn cache_present(&self) -> bool {
        self.cache.borrow().is_some()
    }

    /// Clear this cell's own cache (not its descendants' — see
    /// [`Sheet`]'s `invalidate` for the recursive closure).
    pub(crate) fn clear_own_cache(&self) {
        *self.cache.borrow_mut() = None;
    }

    /// The observable evaluated value (§4.2/§4.4), computing and memoizing a
    /// formula's result on first request.
    pub fn value(&self, sheet: &Sheet) -> CellValue {
        match &self.content {
            CellContent::Empty => CellValue::Text(String::new()),
            CellContent::Text(t) => match t.strip_prefix(ESCAPE_SIGN) {
                Some(rest) => CellValue::Text(rest.to_string()),
                None => CellValue::Text(t.clone()),
            },
            CellContent::Formula(f) => {
                let mut cache = self.cache.borrow_mut();
                if cache.is_none() {
                    *cache = Some(f.evaluate(&mut |pos| sheet.lookup_value(pos)));
                }
                match cache.as_ref().unwrap() {
                    Ok(n) => CellValue::Number(*n),
                    Err(e) => CellValue::Error(*e),
                }
            }
        }
    }
}
