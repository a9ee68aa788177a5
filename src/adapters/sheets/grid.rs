use error_stack::report;
use serde_json::Value;

use crate::domain::sheets::{
    a1_notation::{A1Notation, FromA1Notation},
    cell_range::CellRange,
};

use super::spreadsheet_manager::SpreadsheetManagerError;

/// Rows of cell values, as exchanged with the values endpoints.
pub type Grid = Vec<Vec<Value>>;

/// Parses `range` as a bounded rectangle. Bare references without `!` or `:`
/// are treated as unbounded since `Sheet1` may name a sheet rather than a cell.
pub fn bounded_range(range: &str) -> Option<CellRange> {
    if !range.contains('!') && !range.contains(':') {
        return None;
    }

    CellRange::from_a1_notation(&A1Notation::from(range)).ok()
}

/// The rectangle a write to `range` has to fill exactly, if any.
/// A single cell only anchors the top-left corner, so the grid may be any size.
pub fn write_target(range: &str) -> Option<CellRange> {
    bounded_range(range).filter(|cell_range| cell_range.start != cell_range.end)
}

/// Applies `func` to every cell, row by row.
pub fn map_grid<F>(values: &[Vec<Value>], mut func: F) -> Grid
where
    F: FnMut(&Value) -> Value,
{
    values
        .iter()
        .map(|row| row.iter().map(&mut func).collect::<Vec<_>>())
        .collect()
}

/// Pads every row, and the row count, with empty strings up to the given shape.
/// The API omits trailing empty cells, so a read can come back ragged.
/// Existing values are never truncated.
pub fn pad_to_shape(mut values: Grid, row_count: usize, column_count: usize) -> Grid {
    if values.len() < row_count {
        values.resize_with(row_count, Vec::new);
    }

    for row in values.iter_mut() {
        if row.len() < column_count {
            row.resize_with(column_count, || Value::String(String::new()));
        }
    }

    values
}

pub fn check_shape(
    values: &[Vec<Value>],
    range: &CellRange,
) -> error_stack::Result<(), SpreadsheetManagerError> {
    let (row_count, column_count) = (range.row_count() as usize, range.column_count() as usize);

    if values.len() != row_count {
        return Err(report!(SpreadsheetManagerError::ShapeMismatch).attach_printable(format!(
            "Range has {} rows but {} rows were given",
            row_count,
            values.len()
        )));
    }

    if let Some((index, row)) = values
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != column_count)
    {
        return Err(report!(SpreadsheetManagerError::ShapeMismatch).attach_printable(format!(
            "Range has {} columns but row {} has {} values",
            column_count,
            index,
            row.len()
        )));
    }

    Ok(())
}
