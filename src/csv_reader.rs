//! CSV record reading with a pluggable character source

use crate::csv::CsvParser;
use crate::error::{Position, Result};
use crate::source::{CharSource, FileSource, TextSource};
use crate::types::Record;
use std::path::Path;

/// Streaming CSV reader yielding one record per data row
///
/// The first row of the input is the header row; every later row is returned
/// as a [`Record`] keyed by the header names. Characters are pulled from the
/// bound [`CharSource`] one at a time, so memory usage is bounded by the
/// longest row.
///
/// # Examples
///
/// ```no_run
/// use csvstream::CsvReader;
///
/// let mut reader = CsvReader::open("data.csv").unwrap();
///
/// while let Some(record) = reader.next_record().unwrap() {
///     println!("{:?}", record);
/// }
/// ```
///
/// # In-memory input
///
/// ```
/// use csvstream::CsvReader;
///
/// let mut reader = CsvReader::from_text("name,age\nAlice,0\n");
/// let record = reader.next_record().unwrap().unwrap();
/// assert_eq!(record.get("name"), Some("Alice"));
/// assert!(reader.next_record().unwrap().is_none());
/// ```
pub struct CsvReader {
    source: Option<Box<dyn CharSource>>,
    parser: CsvParser,
    // final partial row already emitted
    end: bool,
    records_read: u64,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvReader {
    /// Create a reader with no source bound
    pub fn new() -> Self {
        CsvReader {
            source: None,
            parser: CsvParser::new(),
            end: false,
            records_read: 0,
        }
    }

    /// Open a CSV file and bind it
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvstream::CsvReader;
    ///
    /// let reader = CsvReader::open("data.csv").unwrap();
    /// assert!(reader.is_bound());
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new().with_source(FileSource::open(path)?))
    }

    /// Create a reader over in-memory text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new().with_source(TextSource::new(text))
    }

    /// Bind a source (builder pattern)
    pub fn with_source<S: CharSource + 'static>(mut self, source: S) -> Self {
        self.bind(source);
        self
    }

    /// Bind a new source, releasing and resetting any source already bound
    pub fn bind<S: CharSource + 'static>(&mut self, source: S) {
        if self.source.is_some() {
            self.reset();
        }
        log::debug!("bound new CSV source");
        self.source = Some(Box::new(source));
    }

    /// Open a CSV file and bind it in place of the current source
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvstream::CsvReader;
    ///
    /// let mut reader = CsvReader::new();
    /// reader.set_file("first.csv").unwrap();
    /// while let Some(record) = reader.next_record().unwrap() {
    ///     println!("{:?}", record);
    /// }
    ///
    /// // Different shape, fresh headers
    /// reader.set_file("second.csv").unwrap();
    /// ```
    pub fn set_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let source = FileSource::open(path)?;
        self.bind(source);
        Ok(())
    }

    /// Whether a source is currently bound
    pub fn is_bound(&self) -> bool {
        self.source.is_some()
    }

    /// Read the next data record
    ///
    /// Returns `Ok(None)` at end of input. The call after end of input resets
    /// the reader, releasing its source; from then on `Ok(None)` is returned
    /// until a new source is bound.
    ///
    /// A malformed row aborts the call with [`CsvError::MalformedInput`]
    /// and no partial record. A row rejected for its field count is dropped
    /// and reading resumes at the next row; after any other violation, reset
    /// and bind a new source to continue.
    ///
    /// [`CsvError::MalformedInput`]: crate::error::CsvError::MalformedInput
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        if self.end {
            self.reset();
            return Ok(None);
        }
        let Some(source) = self.source.as_mut() else {
            return Ok(None);
        };

        while let Some(ch) = source.next_char()? {
            if let Some(record) = self.parser.feed(ch)? {
                self.records_read += 1;
                return Ok(Some(record));
            }
        }

        match self.parser.finish()? {
            Some(record) => {
                self.records_read += 1;
                self.end = true;
                Ok(Some(record))
            }
            None => {
                log::debug!(
                    "reached end of CSV input after {} records",
                    self.records_read
                );
                self.reset();
                Ok(None)
            }
        }
    }

    /// Release the source and return to the initial, unbound state
    pub fn reset(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.release();
            log::debug!("released CSV source");
        }
        self.parser.reset();
        self.end = false;
        self.records_read = 0;
    }

    /// Get header row if available
    ///
    /// Returns `Some(&[String])` once the header row has been parsed.
    pub fn headers(&self) -> Option<&[String]> {
        self.parser.headers()
    }

    /// Number of data records returned since the last reset
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Current position in the input
    pub fn position(&self) -> Position {
        self.parser.position()
    }

    /// Get iterator over records
    ///
    /// The iterator stops after the first error.
    ///
    /// # Examples
    ///
    /// ```
    /// use csvstream::CsvReader;
    ///
    /// let mut reader = CsvReader::from_text("id\n1\n2\n");
    /// let ids: Vec<String> = reader
    ///     .records()
    ///     .map(|r| r.map(|record| record["id"].to_string()))
    ///     .collect::<Result<_, _>>()
    ///     .unwrap();
    /// assert_eq!(ids, vec!["1", "2"]);
    /// ```
    pub fn records(&mut self) -> RecordIterator<'_> {
        RecordIterator {
            reader: self,
            done: false,
        }
    }
}

/// Iterator over CSV records
pub struct RecordIterator<'a> {
    reader: &'a mut CsvReader,
    done: bool,
}

impl<'a> Iterator for RecordIterator<'a> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CsvError, Malformation};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Text source that records whether it was released
    struct TrackedSource {
        inner: TextSource,
        released: Rc<Cell<bool>>,
    }

    impl CharSource for TrackedSource {
        fn next_char(&mut self) -> Result<Option<char>> {
            self.inner.next_char()
        }

        fn release(&mut self) {
            self.released.set(true);
        }
    }

    fn tracked(text: &str) -> (TrackedSource, Rc<Cell<bool>>) {
        let released = Rc::new(Cell::new(false));
        let source = TrackedSource {
            inner: TextSource::new(text),
            released: Rc::clone(&released),
        };
        (source, released)
    }

    #[test]
    fn test_read_records() -> Result<()> {
        let mut reader = CsvReader::from_text("name,age\nAlice,0\nBob,1\n");
        assert_eq!(
            reader.next_record()?,
            Some(Record::from([("name", "Alice"), ("age", "0")]))
        );
        assert_eq!(
            reader.next_record()?,
            Some(Record::from([("name", "Bob"), ("age", "1")]))
        );
        assert_eq!(reader.records_read(), 2);
        assert_eq!(reader.next_record()?, None);
        assert!(!reader.is_bound());
        Ok(())
    }

    #[test]
    fn test_headers_after_first_read() -> Result<()> {
        let mut reader = CsvReader::from_text("ID,Name\n1,Alice\n");
        assert_eq!(reader.headers(), None);
        reader.next_record()?;
        assert_eq!(
            reader.headers(),
            Some(&["ID".to_string(), "Name".to_string()][..])
        );
        Ok(())
    }

    #[test]
    fn test_end_of_stream_is_idempotent() -> Result<()> {
        let mut reader = CsvReader::from_text("a,b\n1,2");
        assert_eq!(reader.next_record()?, Some(Record::from([("a", "1"), ("b", "2")])));
        for _ in 0..3 {
            assert_eq!(reader.next_record()?, None);
        }
        Ok(())
    }

    #[test]
    fn test_short_final_row_never_comes_back() {
        let mut reader = CsvReader::from_text("a,b,c\n1");
        let err = reader.next_record().unwrap_err();
        assert_eq!(
            err.kind(),
            Some(&Malformation::TooFewFields {
                expected: 3,
                found: 1
            })
        );
        for _ in 0..4 {
            assert_eq!(reader.next_record().ok().flatten(), None);
        }
    }

    #[test]
    fn test_reading_continues_after_rejected_row() -> Result<()> {
        let mut reader = CsvReader::from_text("a,b\n1\n2,3\n");
        let err = reader.next_record().unwrap_err();
        assert_eq!(err.position().map(|p| (p.row, p.field)), Some((2, 1)));
        assert_eq!(
            reader.next_record()?,
            Some(Record::from([("a", "2"), ("b", "3")]))
        );
        assert_eq!(reader.next_record()?, None);
        Ok(())
    }

    #[test]
    fn test_unbound_reader() -> Result<()> {
        let mut reader = CsvReader::new();
        assert!(!reader.is_bound());
        assert_eq!(reader.next_record()?, None);
        Ok(())
    }

    #[test]
    fn test_reset_releases_source() {
        let (source, released) = tracked("a\n1\n");
        let mut reader = CsvReader::new().with_source(source);
        reader.reset();
        assert!(released.get());
        assert!(!reader.is_bound());
    }

    #[test]
    fn test_bind_releases_previous_source() -> Result<()> {
        let (first, released) = tracked("a,b,c\n1,2,3\n");
        let mut reader = CsvReader::new().with_source(first);
        assert_eq!(reader.next_record()?.map(|r| r.len()), Some(3));

        reader.bind(TextSource::new("x\n9\n"));
        assert!(released.get());
        assert_eq!(reader.headers(), None);
        assert_eq!(reader.next_record()?, Some(Record::from([("x", "9")])));
        Ok(())
    }

    #[test]
    fn test_source_released_at_end_of_stream() -> Result<()> {
        let (source, released) = tracked("a\n1\n");
        let mut reader = CsvReader::new().with_source(source);
        assert!(reader.next_record()?.is_some());
        assert!(!released.get());
        assert_eq!(reader.next_record()?, None);
        assert!(released.get());
        Ok(())
    }

    #[test]
    fn test_records_iterator_stops_after_error() {
        let mut reader = CsvReader::from_text("a,b\n1,2\n3\"\n5,6\n");
        let results: Vec<_> = reader.records().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(
            &results[1],
            Err(CsvError::MalformedInput {
                kind: Malformation::QuoteInUnquotedField,
                ..
            })
        ));
    }

    #[test]
    fn test_position_tracks_reads() -> Result<()> {
        let mut reader = CsvReader::from_text("a\n1\n2\n");
        reader.next_record()?;
        let position = reader.position();
        assert_eq!((position.line, position.row, position.column), (3, 3, 1));
        Ok(())
    }
}
