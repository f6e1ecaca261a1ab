//! Spreadsheet cell model.
//!
//! This crate provides the data substrate for the spreadsheet engine:
//!
//! - [`Position`] - cell addressing and `A1`-notation parsing
//! - [`Value`], [`FormulaError`] - the evaluated result of a cell
//! - [`Cell`], [`CellContent`] - cell content, cache, and edge sets
//! - [`cycle::would_create_cycle`] - cycle detection for tentative edits
//! - [`formula::Formula`] - the formula grammar: parse, evaluate, canonicalize
//!
//! The graph itself (who owns which cells, how edges get wired and
//! invalidated) is [`spreadsheet_core::Sheet`]'s job, not this crate's —
//! see that crate for the owner side of the split.

pub mod cell;
pub mod cycle;
pub mod error;
pub mod formula;
pub mod position;
pub mod value;

pub use cell::{Cell, CellContent, FormulaContent};
pub use cycle::would_create_cycle;
pub use error::FormulaParseError;
pub use formula::Formula;
pub use position::{Position, MAX_COLS, MAX_ROWS};
pub use value::{format_number, FormulaError, Value};
