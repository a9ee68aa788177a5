use error_stack::{report, ResultExt};
use google_sheets4::api::GridRange;
use thiserror::Error;

use crate::domain::sheets::cell_range::CellRange;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridRangeConversionError {
    #[error("{0} index does not fit in a grid range")]
    IndexOverflow(&'static str),
}

pub trait ToGridRange {
    fn to_grid_range(
        &self,
        sheet_id: i32,
    ) -> error_stack::Result<GridRange, GridRangeConversionError>;
}

fn convert_index(
    index: u32,
    field: &'static str,
) -> error_stack::Result<i32, GridRangeConversionError> {
    i32::try_from(index)
        .map_err(|_| report!(GridRangeConversionError::IndexOverflow(field)))
        .attach_printable_lazy(|| format!("{field} index {index} is larger than i32::MAX"))
}

impl ToGridRange for CellRange {
    /// Grid ranges are zero-based with exclusive ends, while A1 ranges are
    /// 1-based and inclusive.
    fn to_grid_range(
        &self,
        sheet_id: i32,
    ) -> error_stack::Result<GridRange, GridRangeConversionError> {
        Ok(GridRange {
            sheet_id: Some(sheet_id),
            start_row_index: Some(convert_index(self.start.row.index(), "start_row")?),
            end_row_index: Some(convert_index(self.end.row.number(), "end_row")?),
            start_column_index: Some(convert_index(self.start.col.index(), "start_column")?),
            end_column_index: Some(convert_index(self.end.col.number(), "end_column")?),
        })
    }
}
