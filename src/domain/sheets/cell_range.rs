use error_stack::{report, ResultExt};

use super::{
    a1_notation::{
        generic_a1_notation_split, sheet_prefix, A1Notation, A1NotationParseError,
        FromA1Notation, ToA1Notation,
    },
    cell_position::CellPosition,
};

/// A bounded, inclusive rectangle of cells, optionally qualified by a sheet title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellPosition,
    pub end: CellPosition,
    pub sheet_title: Option<String>,
}

impl CellRange {
    pub fn row_count(&self) -> u32 {
        self.end.row.index() - self.start.row.index() + 1
    }

    pub fn column_count(&self) -> u32 {
        self.end.col.index() - self.start.col.index() + 1
    }

    pub fn with_sheet_title(&self, sheet_title: String) -> Self {
        Self {
            start: self.start,
            end: self.end,
            sheet_title: Some(sheet_title),
        }
    }
}

impl ToA1Notation for CellRange {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        A1Notation(format!(
            "{}{}:{}",
            sheet_prefix(sheet_name),
            self.start.to_a1_notation(None),
            self.end.to_a1_notation(None)
        ))
    }
}

impl FromA1Notation for CellRange {
    type Err = A1NotationParseError;

    fn from_a1_notation(a1_notation: &A1Notation) -> error_stack::Result<Self, Self::Err> {
        let parts = generic_a1_notation_split(a1_notation)?;

        let start = CellPosition::parse_cell(&parts.start)
            .attach_printable_lazy(|| format!("Invalid range start in {a1_notation}"))?;
        let end = CellPosition::parse_cell(&parts.end)
            .attach_printable_lazy(|| format!("Invalid range end in {a1_notation}"))?;

        if start.row > end.row || start.col > end.col {
            return Err(report!(A1NotationParseError::StartAfterEnd)).attach_printable_lazy(
                || {
                    format!(
                        "One or more of start coordinates are larger than end coordinates for start/end: {}/{}",
                        parts.start, parts.end
                    )
                },
            );
        }

        Ok(CellRange {
            start,
            end,
            sheet_title: parts.sheet_title,
        })
    }
}
