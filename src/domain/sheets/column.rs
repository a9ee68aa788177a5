use std::{fmt::Formatter, str::FromStr};

use thiserror::Error;

/// A spreadsheet column, stored as a zero-based index and displayed as letters.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Column {
    index: u32,
}

impl Column {
    pub fn from_index(index: u32) -> Self {
        Column { index }
    }

    /// Zero-based index, as used by the Sheets API grid ranges.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// 1-based column number (`A` = 1, `Z` = 26, `AA` = 27).
    pub fn number(&self) -> u32 {
        self.index.saturating_add(1)
    }

    pub fn letters(&self) -> String {
        number_to_letters(self.number())
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letters())
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Show both the numeric and letter representation
        write!(f, "Column(index: {}, letters: {})", self.index, self)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColumnParseError {
    #[error("Empty column")]
    Empty,
    #[error("Non-alphabetic character in column")]
    NonAlphabeticCharacter,
    #[error("Column is too large")]
    Overflow,
}

impl FromStr for Column {
    type Err = ColumnParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_col(s)
    }
}

impl From<Column> for String {
    fn from(col: Column) -> Self {
        col.letters()
    }
}

pub fn parse_col<T: AsRef<str>>(col_str: T) -> Result<Column, ColumnParseError> {
    let col_str = col_str.as_ref();
    if col_str.is_empty() {
        return Err(ColumnParseError::Empty);
    }

    if col_str.chars().any(|c| !c.is_ascii_alphabetic()) {
        return Err(ColumnParseError::NonAlphabeticCharacter);
    }

    let col_num = col_str
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .try_fold(0u32, |acc, c| {
            acc.checked_mul(26)?.checked_add(c as u32 - 'A' as u32 + 1)
        })
        .ok_or(ColumnParseError::Overflow)?;

    Ok(Column::from_index(col_num - 1))
}

fn number_to_letters(number: u32) -> String {
    let mut number = number;
    let mut result = String::new();
    while number > 0 {
        let remainder = (number - 1) % 26;
        let letter = (remainder as u8 + b'A') as char;
        result.push(letter);
        number = (number - remainder) / 26;
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_display_a() {
        let col = Column::from_index(0);
        assert_eq!(col.to_string(), "A");
    }

    #[test]
    fn test_column_display_z() {
        let col = Column::from_index(25);
        assert_eq!(col.to_string(), "Z");
    }

    #[test]
    fn test_column_display_aa() {
        let col = Column::from_index(26);
        assert_eq!(col.to_string(), "AA");
    }

    #[test]
    fn test_column_display_az() {
        let col = Column::from_index(51);
        assert_eq!(col.to_string(), "AZ");
    }

    #[test]
    fn test_column_display_zza() {
        let col = Column::from_index(26 * 26 * 26 + 26 * 26);
        assert_eq!(col.to_string(), "ZZA");
    }

    #[test]
    fn test_column_debug() {
        let col = Column::from_index(27);
        assert_eq!(format!("{:?}", col), "Column(index: 27, letters: AB)");
    }

    #[test]
    fn test_column_from_str_lower() {
        let col: Column = "a".parse().unwrap();
        assert_eq!(col, Column::from_index(0));
    }

    #[test]
    fn test_column_from_str_upper() {
        let col: Column = "A".parse().unwrap();
        assert_eq!(col, Column::from_index(0));
    }

    #[test]
    fn test_parse_col_valid() {
        assert_eq!(parse_col("Z").unwrap().number(), 26);
        assert_eq!(parse_col("z").unwrap().number(), 26);
        assert_eq!(parse_col("AA").unwrap().number(), 27);
        assert_eq!(parse_col("AZ").unwrap().number(), 52);
        assert_eq!(parse_col("Zz").unwrap().number(), 26 * 26 + 26);
        assert_eq!(parse_col("ADG").unwrap().number(), 787);
    }

    #[test]
    fn test_parse_col_invalid() {
        assert_eq!(parse_col("A1"), Err(ColumnParseError::NonAlphabeticCharacter));
        assert_eq!(parse_col("$"), Err(ColumnParseError::NonAlphabeticCharacter));
        assert_eq!(parse_col(""), Err(ColumnParseError::Empty));
    }

    #[test]
    fn test_parse_col_overflow() {
        assert_eq!(parse_col("ZZZZZZZZZZ"), Err(ColumnParseError::Overflow));
    }

    #[test]
    fn test_number_to_letters() {
        assert_eq!(number_to_letters(1), "A");
        assert_eq!(number_to_letters(26), "Z");
        assert_eq!(number_to_letters(27), "AA");
        assert_eq!(number_to_letters(28), "AB");
        assert_eq!(number_to_letters(52), "AZ");
        assert_eq!(number_to_letters(53), "BA");
        assert_eq!(number_to_letters(787), "ADG");
    }

    #[test]
    fn test_column_to_string_letters() {
        let s: String = Column::from_index(27).into();
        assert_eq!(s, "AB");
    }
}
