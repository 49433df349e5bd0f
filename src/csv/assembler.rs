//! Turns finished rows into headers or records

use super::position::Cursor;
use crate::error::{CsvError, Malformation, Result};
use crate::types::Record;

/// Holds the header row and zips later rows against it
#[derive(Debug, Default)]
pub struct RowAssembler {
    headers: Option<Vec<String>>,
}

impl RowAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header names, once the first row has been assembled
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    /// Number of columns fixed by the header row
    pub fn column_count(&self) -> Option<usize> {
        self.headers.as_ref().map(Vec::len)
    }

    /// Assemble a finished row
    ///
    /// The first row becomes the header row and yields `Ok(None)`. Every later
    /// row must have exactly as many fields as the header row. The row buffer
    /// is drained either way.
    pub fn assemble(&mut self, row: &mut Vec<String>, at: &Cursor) -> Result<Option<Record>> {
        let Some(headers) = self.headers.as_ref() else {
            log::debug!("captured {} CSV headers", row.len());
            self.headers = Some(row.drain(..).collect());
            return Ok(None);
        };

        let expected = headers.len();
        let found = row.len();
        if found < expected {
            return Err(CsvError::malformed(
                Malformation::TooFewFields { expected, found },
                at.at_field(found),
            ));
        }
        if found > expected {
            return Err(CsvError::malformed(
                Malformation::TooManyFields { expected },
                at.at_field(expected + 1),
            ));
        }

        let mut record = Record::with_capacity(expected);
        for (header, value) in headers.iter().zip(row.drain(..)) {
            record.insert(header.clone(), value);
        }
        Ok(Some(record))
    }

    pub fn clear(&mut self) {
        self.headers = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_first_row_is_header() -> Result<()> {
        let mut assembler = RowAssembler::new();
        let mut fields = row(&["name", "age"]);
        assert_eq!(assembler.assemble(&mut fields, &Cursor::new())?, None);
        assert!(fields.is_empty());
        assert_eq!(assembler.column_count(), Some(2));

        let mut fields = row(&["Alice", "0"]);
        let record = assembler.assemble(&mut fields, &Cursor::new())?;
        assert_eq!(record, Some(Record::from([("name", "Alice"), ("age", "0")])));
        Ok(())
    }

    #[test]
    fn test_short_row() -> Result<()> {
        let mut assembler = RowAssembler::new();
        assembler.assemble(&mut row(&["a", "b", "c"]), &Cursor::new())?;

        let err = assembler
            .assemble(&mut row(&["1", "2"]), &Cursor::new())
            .unwrap_err();
        assert_eq!(
            err.kind(),
            Some(&Malformation::TooFewFields {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(err.position().map(|p| p.field), Some(2));
        Ok(())
    }

    #[test]
    fn test_long_row() -> Result<()> {
        let mut assembler = RowAssembler::new();
        assembler.assemble(&mut row(&["a", "b"]), &Cursor::new())?;

        let err = assembler
            .assemble(&mut row(&["1", "2", ""]), &Cursor::new())
            .unwrap_err();
        assert_eq!(err.position().map(|p| p.field), Some(3));
        Ok(())
    }

    #[test]
    fn test_clear_drops_headers() -> Result<()> {
        let mut assembler = RowAssembler::new();
        assembler.assemble(&mut row(&["a"]), &Cursor::new())?;
        assembler.clear();
        assert_eq!(assembler.headers(), None);
        assert_eq!(assembler.column_count(), None);
        Ok(())
    }
}
