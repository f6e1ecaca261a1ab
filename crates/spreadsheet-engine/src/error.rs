//! Edit-time failures raised while parsing a formula.
//!
//! Evaluation-time failures are [`crate::value::FormulaError`] — a value,
//! not an error type. This module only covers syntax failures at parse
//! time, which abort the edit with no state change.

use thiserror::Error;

/// A formula failed to parse. Carries the offending source text and the
/// underlying syntax complaint, mirroring the original's nested
/// `FormulaException`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("formula '{source_text}' failed to parse: {cause}")]
pub struct FormulaParseError {
    pub source_text: String,
    pub cause: String,
}
