//! The owning container: maps positions to cells, mediates every edit, and
//! renders the printable region.

use sheetengine_formula::{CellValue, Position, Size};
use std::collections::{HashMap, HashSet};
use std::io::{self, Write};

use crate::cell::{Cell, CellContent};
use crate::error::{Result, SheetError};

/// A borrowed view of a cell, paired with the [`Sheet`] it lives in so its
/// formula value can be computed (and cached) on demand.
pub struct CellView<'a> {
    cell: &'a Cell,
    sheet: &'a Sheet,
}

impl<'a> CellView<'a> {
    /// The observable evaluated result (§4.2/§4.4).
    pub fn value(&self) -> CellValue {
        self.cell.value(self.sheet)
    }

    /// The raw user-facing text that round-trips through `SetCell`.
    pub fn text(&self) -> String {
        self.cell.text()
    }

    /// Positions this cell currently references (outgoing edges).
    pub fn ancestors(&self) -> &'a HashSet<Position> {
        self.cell.ancestors()
    }

    /// Positions currently referencing this cell (incoming edges).
    pub fn descendants(&self) -> &'a HashSet<Position> {
        self.cell.descendants()
    }

    pub fn is_formula(&self) -> bool {
        self.cell.content().is_formula()
    }
}

/// The spreadsheet: a sparse map from valid [`Position`] to owned [`Cell`].
#[derive(Default)]
pub struct Sheet {
    cells: HashMap<Position, Cell>,
}

impl Sheet {
    pub fn new() -> Sheet {
        Sheet { cells: HashMap::new() }
    }

    /// Resolve a position to its current value, for use as the lookup
    /// callback formulas evaluate against. `None` means unmaterialized.
    pub(crate) fn lookup_value(&self, pos: Position) -> Option<CellValue> {
        self.cells.get(&pos).map(|c| c.value(self))
    }

    /// Edit the cell at `pos` from raw user input, per the §4.3 protocol.
    pub fn set_cell(&mut self, pos: Position, raw: &str) -> Result<()> {
        if !pos.is_valid() {
            return Err(SheetError::InvalidPosition(pos));
        }

        // Step 1: locate or create.
        self.cells.entry(pos).or_insert_with(Cell::new_empty);

        // Step 2: short-circuit on no-op edits.
        if raw == self.cells[&pos].text() {
            return Ok(());
        }

        // Step 3: classify the candidate content.
        let candidate = CellContent::classify(raw).map_err(|e| {
            tracing::warn!(%pos, error = %e, "SetCell rejected: formula does not parse");
            SheetError::FormulaException(e)
        })?;
        let referents = candidate.referenced_positions();

        // Step 5: cycle check against the *current* graph, using only the
        // candidate's outbound edges. Deferred ahead of step 4's
        // materialization (see SPEC_FULL.md's resolution of the
        // auto-materialization open question): an unmaterialized referent
        // has no ancestors yet, so the reachability search is unaffected by
        // whether it has been inserted into the map.
        if referents.contains(&pos) || self.reaches(&referents, pos) {
            tracing::warn!(%pos, "SetCell rejected: would create a circular dependency");
            return Err(SheetError::CircularDependency(pos));
        }

        // Step 4: materialize any referent not yet in the map.
        for r in &referents {
            self.cells.entry(*r).or_insert_with(Cell::new_empty);
        }

        // Step 6: commit.
        self.rewire(pos, &referents);
        self.cells.get_mut(&pos).expect("just materialized").set_content(candidate);
        self.invalidate(pos);
        tracing::debug!(%pos, "SetCell committed");
        Ok(())
    }

    /// Depth-first reachability search over `ancestors` edges: does any
    /// path starting from one of `starts` reach `target`? A visited set
    /// pruned across all start points yields O(V + E) in the reachable
    /// subgraph.
    fn reaches(&self, starts: &[Position], target: Position) -> bool {
        let mut visited = HashSet::new();
        starts.iter().any(|&start| self.dfs_reaches(start, target, &mut visited))
    }

    fn dfs_reaches(&self, current: Position, target: Position, visited: &mut HashSet<Position>) -> bool {
        if current == target {
            return true;
        }
        if !visited.insert(current) {
            return false;
        }
        match self.cells.get(&current) {
            Some(cell) => cell
                .ancestors()
                .iter()
                .any(|&next| self.dfs_reaches(next, target, visited)),
            None => false,
        }
    }

    /// Rewire `pos`'s outgoing edges to `new_referents`, updating the
    /// symmetric `descendants` sets on both sides (§4.3 step 6, first three
    /// bullets).
    fn rewire(&mut self, pos: Position, new_referents: &[Position]) {
        let old_ancestors: Vec<Position> = self.cells[&pos].ancestors().iter().copied().collect();
        for r in old_ancestors {
            if let Some(c) = self.cells.get_mut(&r) {
                c.descendants_mut().remove(&pos);
            }
        }

        {
            let cell = self.cells.get_mut(&pos).expect("pos must exist");
            cell.ancestors_mut().clear();
            for &r in new_referents {
                cell.ancestors_mut().insert(r);
            }
        }

        for &r in new_referents {
            if let Some(rc) = self.cells.get_mut(&r) {
                rc.descendants_mut().insert(pos);
            }
        }
    }

    /// Invalidate the transitive cache closure rooted at `pos` after an
    /// edit to `pos` itself. `set_content` has already nulled `pos`'s own
    /// cache as part of swapping in the new content, so `pos`'s descendants
    /// must be walked unconditionally from here; gating on `pos`'s own
    /// (already-empty) cache would make the whole propagation dead code.
    /// One hop down, `invalidate_descendant`'s guard takes over: by
    /// invariant 4, once a descendant's cache is already empty every cell
    /// beneath it is too, so that traversal can terminate early.
    fn invalidate(&self, pos: Position) {
        let Some(cell) = self.cells.get(&pos) else { return };
        let descendants: Vec<Position> = cell.descendants().iter().copied().collect();
        for d in descendants {
            self.invalidate_descendant(d);
        }
    }

    /// Clear `pos`'s cache and recurse into its descendants, but only while
    /// a cache was actually present (§4.5): once a cell's cache is empty,
    /// every descendant's cache is already empty by invariant 4, so the
    /// traversal short-circuits instead of re-walking the whole downstream
    /// graph on every edit.
    fn invalidate_descendant(&self, pos: Position) {
        let Some(cell) = self.cells.get(&pos) else { return };
        if !cell.cache_present() {
            return;
        }
        cell.clear_own_cache();
        tracing::trace!(%pos, "cache invalidated");
        let descendants: Vec<Position> = cell.descendants().iter().copied().collect();
        for d in descendants {
            self.invalidate_descendant(d);
        }
    }

    /// Look up the cell at `pos`, if present.
    pub fn get_cell(&self, pos: Position) -> Result<Option<CellView<'_>>> {
        if !pos.is_valid() {
            return Err(SheetError::InvalidPosition(pos));
        }
        Ok(self.cells.get(&pos).map(|cell| CellView { cell, sheet: self }))
    }

    /// Clear the cell at `pos`: routes through `set_cell` so edges rewire
    /// and caches invalidate, then drops the map entry iff it has no
    /// descendants left to keep resolvable.
    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        if !pos.is_valid() {
            return Err(SheetError::InvalidPosition(pos));
        }
        if !self.cells.contains_key(&pos) {
            return Ok(());
        }
        self.set_cell(pos, "")?;
        let keep = self
            .cells
            .get(&pos)
            .map(|c| !c.descendants().is_empty())
            .unwrap_or(false);
        if !keep {
            self.cells.remove(&pos);
        }
        Ok(())
    }

    /// The smallest rectangle anchored at `(0,0)` covering every cell whose
    /// `text()` is non-empty; `{0,0}` if there is no such cell.
    pub fn get_printable_size(&self) -> Size {
        let mut size = Size::ZERO;
        for (pos, cell) in &self.cells {
            if !cell.text().is_empty() {
                size.rows = size.rows.max(pos.row + 1);
                size.cols = size.cols.max(pos.col + 1);
            }
        }
        size
    }

    /// Emit the printable region as tab-separated computed values.
    pub fn print_values(&self, sink: &mut impl Write) -> io::Result<()> {
        self.print(sink, |view| view.value().to_string())
    }

    /// Emit the printable region as tab-separated raw texts.
    pub fn print_texts(&self, sink: &mut impl Write) -> io::Result<()> {
        self.print(sink, |view| view.text())
    }

    fn print(&self, sink: &mut impl Write, render: impl Fn(&CellView<'_>) -> String) -> io::Result<()> {
        let size = self.get_printable_size();
        for row in 0..size.rows {
            for col in 0..size.cols {
                if col > 0 {
                    write!(sink, "\t")?;
                }
                if let Some(cell) = self.cells.get(&Position::new(row, col)) {
                    let view = CellView { cell, sheet: self };
                    write!(sink, "{}", render(&view))?;
                }
            }
            writeln!(sink)?;
        }
        Ok(())
    }
}
