//! Cell position addressing and A1-style reference syntax.
//!
//! Positions are zero-indexed internally (`row`, `col`) but parse to and
//! print from the one-indexed, base-26-lettered form spreadsheets use on
//! screen: `A1`, `BC27`, `ZZ100`.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Maximum number of rows a [`Position`] may address (exclusive upper bound).
pub const MAX_ROWS: usize = 16384;
/// Maximum number of columns a [`Position`] may address (exclusive upper bound).
pub const MAX_COLS: usize = 16384;

/// A cell address: a zero-indexed (row, column) pair.
///
/// [`Position::INVALID`] is the distinguished sentinel for "not a real
/// cell" — produced by parsing malformed text or a reference that falls
/// outside the grid's bounds.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// The distinguished invalid position.
    pub const INVALID: Position = Position {
        row: usize::MAX,
        col: usize::MAX,
    };

    pub fn new(row: usize, col: usize) -> Position {
        Position { row, col }
    }

    /// Whether this position addresses a real cell under the default bounds.
    pub fn is_valid(&self) -> bool {
        self.is_valid_within(MAX_ROWS, MAX_COLS)
    }

    /// Whether this position addresses a real cell under custom bounds.
    pub fn is_valid_within(&self, max_rows: usize, max_cols: usize) -> bool {
        self.row < max_rows && self.col < max_cols
    }

    /// Parse spreadsheet notation (`"A1"`, `"BC27"`) into a position.
    /// Returns [`Position::INVALID`] on malformed input or out-of-bounds
    /// coordinates, never `None` — the sentinel *is* the failure value.
    pub fn parse(text: &str) -> Position {
        match parse_a1(text) {
            Some(pos) if pos.is_valid() => pos,
            _ => Position::INVALID,
        }
    }

    /// Convert a zero-indexed column into its base-26 letters (0 -> "A").
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

fn parse_a1(text: &str) -> Option<Position> {
    let re = reference_re();
    let caps = re.captures(text)?;
    let letters = &caps[1];
    let numbers = &caps[2];

    let mut col_acc = 0usize;
    for c in letters.to_ascii_uppercase().bytes() {
        let digit = (c - b'A') as usize + 1;
        col_acc = col_acc.checked_mul(26)?.checked_add(digit)?;
    }
    let col = col_acc.checked_sub(1)?;
    let row = numbers.parse::<usize>().ok()?.checked_sub(1)?;

    Some(Position::new(row, col))
}

fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z]+)([0-9]+)$").expect("position regex must compile"))
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "#REF!");
        }
        write!(f, "{}{}", Position::col_to_letters(self.col), self.row + 1)
    }
}
