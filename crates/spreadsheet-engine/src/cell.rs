//! The cell content model: the three content variants, the formula cache,
//! and the edge sets a [`crate`]-external graph owner wires up.

use crate::error::FormulaParseError;
use crate::formula::Formula;
use crate::position::Position;
use crate::value::{FormulaError, Value};
use std::collections::BTreeSet;

/// What a cell holds.
#[derive(Clone, Debug, PartialEq)]
pub enum CellContent {
    Empty,
    Text(String),
    Formula(FormulaContent),
}

/// A formula cell's parsed expression plus its memoized result.
#[derive(Clone, Debug, PartialEq)]
pub struct FormulaContent {
    pub formula: Formula,
    cache: Option<Value>,
}

/// One grid cell: content plus the dependency edges a [`Sheet`]-like owner
/// maintains around it.
///
/// [`Sheet`]: ../../spreadsheet_core/struct.Sheet.html
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    content: CellContent,
    /// Cells this formula references directly (empty for non-formula content).
    outgoing: Vec<Position>,
    /// Cells whose formulas reference this one.
    incoming: BTreeSet<Position>,
}

impl Cell {
    /// An empty, unreferenced cell — the placeholder shape the sheet
    /// materializes for a formula reference that doesn't exist yet.
    pub fn new_empty() -> Cell {
        Cell {
            content: CellContent::Empty,
            outgoing: Vec::new(),
            incoming: BTreeSet::new(),
        }
    }

    /// Classify `text` per the input grammar (§6.2) and build a cell from
    /// it, carrying over no edges yet — the owner wires `incoming` in and
    /// reads `outgoing` back out to do so.
    pub fn from_input(text: &str) -> Result<Cell, FormulaParseError> {
        let content = classify(text)?;
        let outgoing = match &content {
            CellContent::Formula(f) => f.formula.referenced_cells(),
            _ => Vec::new(),
        };
        Ok(Cell {
            content,
            outgoing,
            incoming: BTreeSet::new(),
        })
    }

    pub fn content(&self) -> &CellContent {
        &self.content
    }

    pub fn outgoing(&self) -> &[Position] {
        &self.outgoing
    }

    pub fn incoming(&self) -> &BTreeSet<Position> {
        &self.incoming
    }

    pub fn incoming_mut(&mut self) -> &mut BTreeSet<Position> {
        &mut self.incoming
    }

    pub fn is_formula(&self) -> bool {
        matches!(self.content, CellContent::Formula(_))
    }

    /// Consume a freshly-built cell (from [`Cell::from_input`]) into its
    /// content and outgoing edges, for a graph owner to install elsewhere.
    pub fn into_parts(self) -> (CellContent, Vec<Position>) {
        (self.content, self.outgoing)
    }

    /// Replace this cell's content and outgoing edges in one step. Callers
    /// (the sheet) are responsible for cycle-checking the new content's
    /// outgoing set *before* calling this, and for rewiring neighbor
    /// `incoming` sets after.
    pub fn install(&mut self, content: CellContent, outgoing: Vec<Position>) {
        self.content = content;
        self.outgoing = outgoing;
    }

    /// The source text as it would be re-entered (`GetText`).
    pub fn text(&self) -> String {
        match &self.content {
            CellContent::Empty => String::new(),
            CellContent::Text(s) => s.clone(),
            CellContent::Formula(f) => format!("={}", f.formula),
        }
    }

    /// This cell's cached value, if one is already memoized. `None` for
    /// non-formula content means "compute on demand, cheaply" — call
    /// [`Cell::evaluate`] either way.
    pub fn cached_value(&self) -> Option<Value> {
        match &self.content {
            CellContent::Empty => Some(Value::Text(String::new())),
            CellContent::Text(s) => Some(text_value(s)),
            CellContent::Formula(f) => f.cache.clone(),
        }
    }

    /// Evaluate (or return the memoized value of) this cell.
    /// `resolve` supplies the numeric value of a referenced position.
    pub fn evaluate(
        &mut self,
        resolve: &mut dyn FnMut(Position) -> Result<f64, FormulaError>,
    ) -> Value {
        match &mut self.content {
            CellContent::Empty => Value::Text(String::new()),
            CellContent::Text(s) => text_value(s),
            CellContent::Formula(f) => {
                if let Some(cached) = &f.cache {
                    return cached.clone();
                }
                let value = match f.formula.execute(resolve) {
                    Ok(n) => Value::Number(n),
                    Err(e) => Value::Error(e),
                };
                f.cache = Some(value.clone());
                value
            }
        }
    }

    /// Clear this cell's cache, if it has one. Returns whether a cached
    /// value was actually present — callers use this to prune invalidation
    /// traversal (§4.1.3: stop once a cache is already empty).
    pub fn invalidate_cache(&mut self) -> bool {
        match &mut self.content {
            CellContent::Formula(f) => f.cache.take().is_some(),
            _ => false,
        }
    }
}

fn text_value(raw: &str) -> Value {
    match raw.strip_prefix('\'') {
        Some(rest) => Value::Text(rest.to_string()),
        None => Value::Text(raw.to_string()),
    }
}

fn classify(text: &str) -> Result<CellContent, FormulaParseError> {
    if text.is_empty() {
        return Ok(CellContent::Empty);
    }
    if text.len() >= 2 && text.starts_with('=') {
        let formula = Formula::parse(&text[1..])?;
        return Ok(CellContent::Formula(FormulaContent {
            formula,
            cache: None,
        }));
    }
    Ok(CellContent::Text(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_empty_cell() {
        let cell = Cell::from_input("").unwrap();
        assert_eq!(cell.content(), &CellContent::Empty);
    }

    #[test]
    fn lone_equals_sign_is_text() {
        let cell = Cell::from_input("=").unwrap();
        assert_eq!(cell.content(), &CellContent::Text("=".to_string()));
    }

    #[test]
    fn formula_text_extracts_outgoing_edges() {
        let cell = Cell::from_input("=A1+B2").unwrap();
        assert!(cell.is_formula());
        assert_eq!(
            cell.outgoing(),
            &[Position::new(0, 0), Position::new(1, 1)]
        );
    }

    #[test]
    fn apostrophe_escapes_leading_equals_for_value_but_not_text() {
        let cell = Cell::from_input("'=5").unwrap();
        assert_eq!(cell.text(), "'=5");
        assert_eq!(cell.cached_value(), Some(Value::Text("=5".to_string())));
    }

    #[test]
    fn formula_get_text_reconstructs_canonical_form() {
        let cell = Cell::from_input("=1+(2*3)").unwrap();
        assert_eq!(cell.text(), "=1+2*3");
    }
}
