//! Edit-time failures surfaced by [`crate::Sheet`] (§6.4).
//!
//! `FormulaError` (`#REF!`/`#VALUE!`/`#ARITHM!`) is deliberately not a
//! variant here — it's a value returned from `GetValue`, never raised as
//! an error. Only the three edit-time exceptions abort an edit.

use spreadsheet_engine::FormulaParseError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    #[error("position is out of the sheet's bounds")]
    InvalidPosition,

    #[error("formula did not parse: {0}")]
    Formula(
        #[from]
        #[source]
        FormulaParseError,
    ),

    #[error("edit would introduce a circular dependency")]
    CircularDependency,
}

pub type Result<T> = std::result::Result<T, SheetError>;
