use std::fmt::Formatter;

use error_stack::{report, ResultExt};
use thiserror::Error;

/// A range or cell address in A1 notation, e.g. `'Sheet 1'!A1:D20`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct A1Notation(pub String);

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<A1Notation> for String {
    fn from(a1_notation: A1Notation) -> Self {
        a1_notation.0
    }
}

impl From<String> for A1Notation {
    fn from(s: String) -> Self {
        A1Notation(s)
    }
}

impl From<&str> for A1Notation {
    fn from(s: &str) -> Self {
        A1Notation(s.to_owned())
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub trait ToA1Notation {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation;
}

pub trait FromA1Notation: Sized {
    type Err;

    fn from_a1_notation(a1_notation: &A1Notation) -> error_stack::Result<Self, Self::Err>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum A1NotationParseError {
    #[error("Error parsing column")]
    ColumnParseError,
    #[error("Error parsing row")]
    RowParseError,
    #[error("Not a single cell reference")]
    NotACell,
    #[error("Unquoted sheet name contains '!'")]
    SheetSeparator,
    #[error("More than one ':' in range")]
    RangeSeparator,
    #[error("Range start is after its end")]
    StartAfterEnd,
}

/// Sheet-qualified prefix for an A1 reference. Titles are always quoted, with
/// embedded quotes doubled, so any title round-trips.
pub fn sheet_prefix(sheet_name: Option<&str>) -> String {
    match sheet_name {
        Some(sheet_name) => format!("'{}'!", sheet_name.replace('\'', "''")),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1NotationParts {
    pub start: String,
    pub end: String,
    pub sheet_title: Option<String>,
}

fn unquote_sheet_title(raw: &str) -> error_stack::Result<String, A1NotationParseError> {
    let quoted = raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'');
    if quoted {
        return Ok(raw[1..raw.len() - 1].replace("''", "'"));
    }

    if raw.contains('!') {
        return Err(report!(A1NotationParseError::SheetSeparator))
            .attach_printable_lazy(|| format!("Sheet name {raw:?} must be quoted"));
    }

    Ok(raw.to_owned())
}

/// Splits `Sheet!A1:B2` into its sheet title and start/end cell strings.
/// A lone cell (`Sheet!B3`) yields the same string for start and end.
pub fn generic_a1_notation_split(
    a1_notation: &A1Notation,
) -> error_stack::Result<A1NotationParts, A1NotationParseError> {
    let (sheet_title, local_a1_notation) = match a1_notation.0.rfind('!') {
        Some(index) => {
            let (sheet_title, local_a1_notation) = a1_notation.0.split_at(index);
            (
                Some(unquote_sheet_title(sheet_title)?),
                local_a1_notation.trim_start_matches('!'),
            )
        }
        None => (None, a1_notation.0.as_str()),
    };

    let mut cells = local_a1_notation.split(':');
    let start = cells.next().unwrap_or_default().to_owned();
    let end = match (cells.next(), cells.next()) {
        (None, _) => start.clone(),
        (Some(end), None) => end.to_owned(),
        (Some(_), Some(_)) => {
            return Err(report!(A1NotationParseError::RangeSeparator))
                .attach_printable_lazy(|| format!("Invalid range {}", a1_notation))
        }
    };

    Ok(A1NotationParts {
        sheet_title,
        start,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sheet_and_range() {
        let parts = generic_a1_notation_split(&"Sheet1!A1:B2".into()).unwrap();
        assert_eq!(
            parts,
            A1NotationParts {
                sheet_title: Some("Sheet1".to_string()),
                start: "A1".to_string(),
                end: "B2".to_string(),
            }
        );
    }

    #[test]
    fn test_split_single_cell() {
        let parts = generic_a1_notation_split(&"B3".into()).unwrap();
        assert_eq!(parts.sheet_title, None);
        assert_eq!(parts.start, "B3");
        assert_eq!(parts.end, "B3");
    }

    #[test]
    fn test_split_quoted_sheet_title() {
        let parts = generic_a1_notation_split(&"'My ''odd'' sheet!'!C1:D4".into()).unwrap();
        assert_eq!(parts.sheet_title.as_deref(), Some("My 'odd' sheet!"));
        assert_eq!(parts.start, "C1");
        assert_eq!(parts.end, "D4");
    }

    #[test]
    fn test_split_rejects_two_separators() {
        let report = generic_a1_notation_split(&"a!b!A1:B2".into()).unwrap_err();
        assert_eq!(
            report.current_context(),
            &A1NotationParseError::SheetSeparator
        );
    }

    #[test]
    fn test_split_rejects_two_colons() {
        let report = generic_a1_notation_split(&"A1:B2:C3".into()).unwrap_err();
        assert_eq!(
            report.current_context(),
            &A1NotationParseError::RangeSeparator
        );
    }

    #[test]
    fn test_sheet_prefix_quotes_title() {
        assert_eq!(sheet_prefix(Some("testing")), "'testing'!");
        assert_eq!(sheet_prefix(Some("it's")), "'it''s'!");
        assert_eq!(sheet_prefix(None), "");
    }
}
