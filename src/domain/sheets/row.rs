use std::{fmt::Formatter, num::ParseIntError, str::FromStr};

use thiserror::Error;

/// A spreadsheet row, stored as a zero-based index and displayed 1-based.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Row {
    index: u32,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowParseError {
    #[error("Row is not a number: {0}")]
    NotANumber(ParseIntError),
    #[error("Row numbers start at 1")]
    Zero,
}

impl Row {
    pub fn from_index(index: u32) -> Self {
        Row { index }
    }

    /// Builds a row from its 1-based number, as written in A1 notation.
    /// Row `0` does not exist in A1 notation and yields `None`.
    pub fn from_number(number: u32) -> Option<Self> {
        number.checked_sub(1).map(Row::from_index)
    }

    /// Returns the row as written in A1 notation (1-based).
    /// # Examples
    /// ```
    /// use service_sheets::domain::sheets::row::Row;
    /// assert_eq!(Row::from_index(0).number(), 1);
    /// assert_eq!(Row::from_index(25).number(), 26);
    /// ```
    pub fn number(&self) -> u32 {
        self.index.saturating_add(1)
    }

    /// Zero-based index, as used by the Sheets API grid ranges.
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row(index: {}, row: {})", self.index(), self.number())
    }
}

impl FromStr for Row {
    type Err = RowParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s.parse::<u32>().map_err(RowParseError::NotANumber)?;
        Row::from_number(number).ok_or(RowParseError::Zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_display() {
        let row = Row::from_index(0);
        assert_eq!(row.to_string(), "1");
    }

    #[test]
    fn test_row_debug() {
        let row = Row::from_index(4);
        assert_eq!(format!("{:?}", row), "Row(index: 4, row: 5)");
    }

    #[test]
    fn test_index_from_number() {
        let row = Row::from_number(5).unwrap();
        assert_eq!(row.index(), 4);
    }

    #[test]
    fn test_zero_number_is_rejected() {
        assert_eq!(Row::from_number(0), None);
        assert_eq!("0".parse::<Row>(), Err(RowParseError::Zero));
    }

    #[test]
    fn test_row_from_str() {
        let row: Row = "5".parse().unwrap();
        assert_eq!(row, Row::from_index(4));
    }

    #[test]
    fn test_row_from_str_leading_zeros() {
        let row: Row = "0001".parse().unwrap();
        assert_eq!(row, Row::from_index(0));
    }

    #[test]
    fn test_row_from_str_error() {
        let result: Result<Row, _> = "abc".parse();
        assert!(matches!(result, Err(RowParseError::NotANumber(_))));
    }
}
