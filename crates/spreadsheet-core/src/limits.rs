//! The sheet's only configuration surface: its addressable bounds.

use spreadsheet_engine::{MAX_COLS, MAX_ROWS};

/// Bounds a [`crate::Sheet`] enforces on every position it's asked to edit
/// or read. There is nothing else to configure — no persisted settings,
/// no environment-driven knobs — because nothing else in scope needs one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetLimits {
    pub max_rows: usize,
    pub max_cols: usize,
}

impl Default for SheetLimits {
    fn default() -> Self {
        SheetLimits {
            max_rows: MAX_ROWS,
            max_cols: MAX_COLS,
        }
    }
}
