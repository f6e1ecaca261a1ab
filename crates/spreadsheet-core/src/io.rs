//! Tab-separated textual output for a [`crate::Sheet`] (§6.3): the two
//! rendering modes, values and source texts, over the printable rectangle.

use crate::Sheet;
use spreadsheet_engine::Position;
use std::io::{self, Write};

/// Render every cell's evaluated value, tab-separated, one line per row,
/// over the sheet's printable rectangle (§4.2.2).
pub fn write_values(sheet: &Sheet, sink: &mut impl Write) -> io::Result<()> {
    write_grid(sheet, sink, |sheet, pos| {
        sheet
            .get_value(pos)
            .map(|v| v.to_string())
            .unwrap_or_default()
    })
}

/// Render every cell's source text, tab-separated, one line per row, over
/// the sheet's printable rectangle.
pub fn write_texts(sheet: &Sheet, sink: &mut impl Write) -> io::Result<()> {
    write_grid(sheet, sink, |sheet, pos| {
        sheet.get_text(pos).unwrap_or_default()
    })
}

fn write_grid(
    sheet: &Sheet,
    sink: &mut impl Write,
    render: impl Fn(&Sheet, Position) -> String,
) -> io::Result<()> {
    let (rows, cols) = sheet.printable_size();
    for row in 0..rows {
        for col in 0..cols {
            if col > 0 {
                write!(sink, "\t")?;
            }
            write!(sink, "{}", render(sheet, Position::new(row, col)))?;
        }
        writeln!(sink)?;
    }
    Ok(())
}
