//! The sheet: graph owner, auto-materializer of referenced cells, and
//! printable-bounds tracker (§3.4, §4.2).

use crate::error::{Result, SheetError};
use crate::limits::SheetLimits;
use std::cell::{Ref, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};

use spreadsheet_engine::{would_create_cycle, Cell, FormulaError, Position, Value};

/// Owns every live cell, routes edits through cycle detection and cache
/// invalidation, and tracks the printable bounding rectangle.
///
/// Single-threaded: see spec §5. All mutation goes through [`Sheet::set_cell`]
/// / [`Sheet::clear_cell`]; reads are `&self` thanks to interior mutability
/// on each cell's formula cache (the design the spec's own notes call out
/// as an acceptable way to keep `GetValue` logically read-only).
pub struct Sheet {
    cells: HashMap<Position, RefCell<Cell>>,
    /// Positions that have been explicitly user-edited at least once since
    /// their last clear — distinct from placeholder positions materialized
    /// only to satisfy a formula reference (§4.2.1). Backs the printable
    /// bounds counters.
    user_edited: HashSet<Position>,
    rows: BTreeMap<usize, usize>,
    cols: BTreeMap<usize, usize>,
    limits: SheetLimits,
}

impl Sheet {
    pub fn new() -> Sheet {
        Sheet::with_limits(SheetLimits::default())
    }

    pub fn with_limits(limits: SheetLimits) -> Sheet {
        Sheet {
            cells: HashMap::new(),
            user_edited: HashSet::new(),
            rows: BTreeMap::new(),
            cols: BTreeMap::new(),
            limits,
        }
    }

    pub fn limits(&self) -> SheetLimits {
        self.limits
    }

    fn check_bounds(&self, pos: Position) -> Result<()> {
        if pos.is_valid_within(self.limits.max_rows, self.limits.max_cols) {
            Ok(())
        } else {
            Err(SheetError::InvalidPosition)
        }
    }

    /// Set a cell's content from user-entered text (§4.2 `SetCell`).
    /// On failure (invalid position, unparseable formula, introduced
    /// cycle) the sheet is left exactly as it was (§7: failed `SetCell`
    /// is a no-op observationally).
    pub fn set_cell(&mut self, pos: Position, text: &str) -> Result<()> {
        self.check_bounds(pos)?;

        let new_cell = Cell::from_input(text)?;
        let new_outgoing: Vec<Position> = new_cell
            .outgoing()
            .iter()
            .copied()
            .filter(|p| p.is_valid_within(self.limits.max_rows, self.limits.max_cols))
            .collect();

        if would_create_cycle(pos, &new_outgoing, |p| self.incoming_of(p)) {
            return Err(SheetError::CircularDependency);
        }

        // First user edit at this position: count it towards the
        // printable rectangle (§4.2.2). Placeholders never pass through
        // here, only `materialize` below does.
        if self.user_edited.insert(pos) {
            *self.rows.entry(pos.row).or_insert(0) += 1;
            *self.cols.entry(pos.col).or_insert(0) += 1;
        }
        self.cells.entry(pos).or_insert_with(|| RefCell::new(Cell::new_empty()));

        let old_outgoing: Vec<Position> = self.cells[&pos].borrow().outgoing().to_vec();
        let (content, _) = new_cell.into_parts();

        {
            let mut cell = self.cells[&pos].borrow_mut();
            cell.install(content, new_outgoing.clone());
        }

        self.invalidate_dependents(pos);
        self.rewire_edges(pos, &old_outgoing, &new_outgoing);

        log::debug!("set_cell({pos}) installed, {} outgoing edge(s)", new_outgoing.len());
        Ok(())
    }

    /// Read-only cell lookup (§4.2 `GetCell`, read-only variant): hides
    /// placeholder cells created solely to satisfy a reference.
    pub fn get_cell(&self, pos: Position) -> Result<Option<Ref<'_, Cell>>> {
        self.check_bounds(pos)?;
        let Some(cell) = self.cells.get(&pos) else {
            return Ok(None);
        };
        let borrowed = cell.borrow();
        if borrowed.text().is_empty() {
            Ok(None)
        } else {
            Ok(Some(borrowed))
        }
    }

    /// The evaluated value at `pos` (§4.1 `GetValue`), computing and
    /// memoizing a formula's result on first read.
    pub fn get_value(&self, pos: Position) -> Result<Value> {
        self.check_bounds(pos)?;
        Ok(self.value_at(pos))
    }

    /// The source text at `pos` (§4.1 `GetText`).
    pub fn get_text(&self, pos: Position) -> Result<String> {
        self.check_bounds(pos)?;
        Ok(self
            .cells
            .get(&pos)
            .map(|c| c.borrow().text())
            .unwrap_or_default())
    }

    fn value_at(&self, pos: Position) -> Value {
        let Some(cell) = self.cells.get(&pos) else {
            return Value::Text(String::new());
        };
        let mut cell = cell.borrow_mut();
        cell.evaluate(&mut |p| self.resolve_numeric(p))
    }

    fn resolve_numeric(&self, pos: Position) -> std::result::Result<f64, FormulaError> {
        if !pos.is_valid_within(self.limits.max_rows, self.limits.max_cols) {
            return Err(FormulaError::Ref);
        }
        match self.value_at(pos) {
            Value::Text(s) if s.is_empty() => Ok(0.0),
            Value::Text(s) => s.parse::<f64>().map_err(|_| FormulaError::Value),
            Value::Number(n) => Ok(n),
            Value::Error(e) => Err(e),
        }
    }

    fn incoming_of(&self, pos: Position) -> Vec<Position> {
        self.cells
            .get(&pos)
            .map(|c| c.borrow().incoming().iter().copied().collect())
            .unwrap_or_default()
    }

    /// Recursively invalidate cached values along incoming edges (§4.1.3),
    /// pruning at cells whose cache is already empty.
    fn invalidate_dependents(&self, start: Position) {
        let mut stack = self.incoming_of(start);
        let mut visited = HashSet::new();
        while let Some(pos) = stack.pop() {
            if !visited.insert(pos) {
                continue;
            }
            let Some(cell) = self.cells.get(&pos) else {
                continue;
            };
            if cell.borrow_mut().invalidate_cache() {
                log::trace!("invalidated cache at {pos}");
                stack.extend(cell.borrow().incoming().iter().copied());
            }
        }
    }

    /// Rewire `pos`'s outgoing edges after content install (§4.1.4):
    /// drop the stale half of old edges, materialize and wire the new
    /// ones.
    fn rewire_edges(&mut self, pos: Position, old_outgoing: &[Position], new_outgoing: &[Position]) {
        for old_ref in old_outgoing {
            if !new_outgoing.contains(old_ref)
                && let Some(neighbor) = self.cells.get(old_ref)
            {
                neighbor.borrow_mut().incoming_mut().remove(&pos);
            }
        }
        for new_ref in new_outgoing {
            self.materialize(*new_ref);
            if let Some(neighbor) = self.cells.get(new_ref) {
                neighbor.borrow_mut().incoming_mut().insert(pos);
            }
        }
    }

    /// Materialize an empty placeholder at `pos` if nothing lives there
    /// yet. Does not contribute to the printable bounds (§4.2.1).
    fn materialize(&mut self, pos: Position) {
        self.cells
            .entry(pos)
            .or_insert_with(|| RefCell::new(Cell::new_empty()));
    }

    /// Clear a cell's content (§4.2 `ClearCell`). The cell's slot is not
    /// removed from the sheet — it may still be referenced as an empty
    /// placeholder (§3.3 lifecycle).
    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        self.check_bounds(pos)?;
        if !self.cells.contains_key(&pos) {
            return Ok(());
        }

        let old_outgoing: Vec<Position> = self.cells[&pos].borrow().outgoing().to_vec();
        {
            let mut cell = self.cells[&pos].borrow_mut();
            cell.install(spreadsheet_engine::CellContent::Empty, Vec::new());
        }
        self.invalidate_dependents(pos);
        self.rewire_edges(pos, &old_outgoing, &[]);

        if self.user_edited.remove(&pos) {
            decrement(&mut self.rows, pos.row);
            decrement(&mut self.cols, pos.col);
        }

        log::debug!("clear_cell({pos})");
        Ok(())
    }

    /// The smallest rectangle, anchored at `(0, 0)`, containing every
    /// live user-edited cell (§4.2.2).
    pub fn printable_size(&self) -> (usize, usize) {
        let rows = self.rows.keys().next_back().map_or(0, |r| r + 1);
        let cols = self.cols.keys().next_back().map_or(0, |c| c + 1);
        (rows, cols)
    }

    /// Render every cell's evaluated value as tab-separated text (§6.3).
    pub fn print_values(&self, sink: &mut impl std::io::Write) -> std::io::Result<()> {
        crate::io::write_values(self, sink)
    }

    /// Render every cell's source text as tab-separated text (§6.3).
    pub fn print_texts(&self, sink: &mut impl std::io::Write) -> std::io::Result<()> {
        crate::io::write_texts(self, sink)
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Sheet::new()
    }
}

fn decrement(counts: &mut BTreeMap<usize, usize>, key: usize) {
    if let Some(count) = counts.get_mut(&key) {
        *count -= 1;
        if *count == 0 {
            counts.remove(&key);
        }
    }
}
