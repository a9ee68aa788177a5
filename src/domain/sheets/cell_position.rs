use std::sync::LazyLock;

use error_stack::{report, ResultExt};
use regex::Regex;

use super::{
    a1_notation::{sheet_prefix, A1Notation, A1NotationParseError, FromA1Notation, ToA1Notation},
    column::Column,
    row::Row,
};

// `$` marks absolute references; they address the same cell.
static CELL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$?([A-Za-z]+)\$?([0-9]+)$").expect("valid cell regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPosition {
    pub col: Column,
    pub row: Row,
}

impl CellPosition {
    pub fn new(col: Column, row: Row) -> Self {
        CellPosition { col, row }
    }

    /// Parses a bare cell reference such as `B3` or `adg666`.
    pub fn parse_cell(cell: &str) -> error_stack::Result<Self, A1NotationParseError> {
        let captures = CELL_REGEX
            .captures(cell)
            .ok_or_else(|| report!(A1NotationParseError::NotACell))
            .attach_printable_lazy(|| format!("{cell:?} is not an A1 single cell item"))?;

        let col = captures[1]
            .parse::<Column>()
            .change_context(A1NotationParseError::ColumnParseError)
            .attach_printable_lazy(|| format!("Invalid column in {cell:?}"))?;
        let row = captures[2]
            .parse::<Row>()
            .change_context(A1NotationParseError::RowParseError)
            .attach_printable_lazy(|| format!("Invalid row in {cell:?}"))?;

        Ok(CellPosition { col, row })
    }
}

impl ToA1Notation for CellPosition {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        A1Notation(format!("{}{}{}", sheet_prefix(sheet_name), self.col, self.row))
    }
}

/// Accepts a cell with an optional sheet prefix; the prefix is discarded.
impl FromA1Notation for CellPosition {
    type Err = A1NotationParseError;

    fn from_a1_notation(a1_notation: &A1Notation) -> error_stack::Result<Self, Self::Err> {
        let parts = super::a1_notation::generic_a1_notation_split(a1_notation)?;
        if parts.start != parts.end {
            return Err(report!(A1NotationParseError::NotACell))
                .attach_printable_lazy(|| format!("{a1_notation} is a range, not a cell"));
        }

        CellPosition::parse_cell(&parts.start)
    }
}
