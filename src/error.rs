//! Error types for CSV reading

use std::fmt;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, CsvError>;

/// Location of a parse violation in the input stream
///
/// All values count from 1. `line` counts physical newlines (including the
/// ones embedded in quoted fields), `row` counts logical CSV rows (the header
/// row included), `column` is the character offset inside the physical line
/// and `field` is the position of the field inside the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Physical line number
    pub line: u64,
    /// Logical row number
    pub row: u64,
    /// Character column on the current line
    pub column: u64,
    /// Field index within the current row
    pub field: u64,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, row {}, column {}, field {}",
            self.line, self.row, self.column, self.field
        )
    }
}

/// The ways CSV input can violate the dialect
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformation {
    /// `\r` immediately followed by another `\r`
    #[error("double carriage return")]
    DoubleCarriageReturn,

    #[error("end-of-row carriage return followed by a quote instead of line feed")]
    QuoteAfterRowEnd,

    #[error("end-of-row carriage return followed by a comma instead of line feed")]
    CommaAfterRowEnd,

    #[error("end-of-row carriage return followed by text data instead of line feed")]
    TextAfterRowEnd,

    /// A `"` appeared after unquoted text in the same field
    #[error("quote in a non-quoted field")]
    QuoteInUnquotedField,

    /// A closing `"` was followed by text instead of a comma or row end
    #[error("single quote followed by text data in a quoted field")]
    TextAfterClosingQuote,

    /// A row has more fields than the header row
    #[error("column number mismatch: header declares {expected} fields, found more")]
    TooManyFields { expected: usize },

    /// A row has fewer fields than the header row
    #[error("column number mismatch: header declares {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },
}

/// Errors raised while reading CSV records
#[derive(Debug, Error)]
pub enum CsvError {
    /// The input does not follow the CSV dialect
    #[error("CSV parsing error ({position}): {kind}")]
    MalformedInput {
        kind: Malformation,
        position: Position,
    },

    /// The character source failed
    #[error("Read error: {0}")]
    ReadError(String),
}

impl CsvError {
    pub(crate) fn malformed(kind: Malformation, position: Position) -> Self {
        log::warn!("malformed CSV input at {}: {}", position, kind);
        CsvError::MalformedInput { kind, position }
    }

    /// Where the violation was detected, for malformed input
    pub fn position(&self) -> Option<Position> {
        match self {
            CsvError::MalformedInput { position, .. } => Some(*position),
            CsvError::ReadError(_) => None,
        }
    }

    /// What kind of violation was detected, for malformed input
    pub fn kind(&self) -> Option<&Malformation> {
        match self {
            CsvError::MalformedInput { kind, .. } => Some(kind),
            CsvError::ReadError(_) => None,
        }
    }
}
