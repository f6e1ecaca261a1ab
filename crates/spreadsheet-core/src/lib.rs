//! The spreadsheet: a [`Sheet`] of cells, wired into a dependency graph and
//! evaluated lazily.
//!
//! This crate owns the graph — auto-materializing referenced cells,
//! rejecting edits that would close a cycle, invalidating cached formula
//! results, and tracking the printable bounding rectangle — on top of the
//! cell model [`spreadsheet_engine`] provides.

pub mod error;
pub mod io;
pub mod limits;
pub mod sheet;

pub use error::{Result, SheetError};
pub use limits::SheetLimits;
pub use sheet::Sheet;

pub use spreadsheet_engine::{Cell, CellContent, FormulaError, Position, Value};
