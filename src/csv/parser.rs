//! CSV row-reading state machine with RFC 4180-like behavior
//!
//! The parser is fed one character at a time. It tracks quoting context with
//! a [`State`] plus the class of the previous character, so doubled quotes are
//! recognised by looking one character back instead of peeking ahead.

use super::assembler::RowAssembler;
use super::field::FieldAccumulator;
use super::position::Cursor;
use super::state::{CharClass, State};
use crate::error::{CsvError, Malformation, Position, Result};
use crate::types::Record;

/// Push-based CSV parser
///
/// # Examples
///
/// ```
/// use csvstream::csv::CsvParser;
///
/// let mut parser = CsvParser::new();
/// let mut records = Vec::new();
/// for ch in "name,age\nAlice,0\n".chars() {
///     if let Some(record) = parser.feed(ch).unwrap() {
///         records.push(record);
///     }
/// }
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].get("name"), Some("Alice"));
/// ```
#[derive(Debug, Default)]
pub struct CsvParser {
    state: State,
    prev: CharClass,
    fields: FieldAccumulator,
    cursor: Cursor,
    assembler: RowAssembler,
    // any character consumed since the last row was finalized
    pending: bool,
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one character
    ///
    /// Returns `Ok(Some(record))` when the character completes a data row and
    /// `Ok(None)` otherwise (including when it completes the header row).
    pub fn feed(&mut self, ch: char) -> Result<Option<Record>> {
        self.pending = true;
        match ch {
            '\n' => return self.line_feed(),
            '\r' => self.carriage_return()?,
            '"' => self.quote()?,
            ',' => self.comma()?,
            _ => self.text(ch)?,
        }
        self.cursor.advance();
        Ok(None)
    }

    /// Signal end of input
    ///
    /// A partially read row is finalized and returned; without pending input
    /// (or when the pending row is the header) this returns `Ok(None)`.
    pub fn finish(&mut self) -> Result<Option<Record>> {
        if !self.pending {
            return Ok(None);
        }
        self.finalize_row()
    }

    /// Return to the initial state, forgetting the header row
    pub fn reset(&mut self) {
        self.state = State::Start;
        self.prev = CharClass::None;
        self.fields.clear();
        self.cursor = Cursor::new();
        self.assembler.clear();
        self.pending = false;
    }

    /// Header names, once the header row has been parsed
    pub fn headers(&self) -> Option<&[String]> {
        self.assembler.headers()
    }

    /// Number of columns fixed by the header row
    pub fn column_count(&self) -> Option<usize> {
        self.assembler.column_count()
    }

    /// Current position, with the field index of the field being read
    pub fn position(&self) -> Position {
        self.cursor.at_field(self.fields.len() + 1)
    }

    fn line_feed(&mut self) -> Result<Option<Record>> {
        if self.state == State::Quoted && self.prev != CharClass::ClosingQuote {
            self.fields.push('\n');
            self.prev = CharClass::LineFeed;
            self.cursor.newline();
            return Ok(None);
        }
        self.finalize_row()
    }

    fn carriage_return(&mut self) -> Result<()> {
        match self.state {
            State::Start | State::Free => self.state = State::RowEnd,
            State::RowEnd => return Err(self.malformed(Malformation::DoubleCarriageReturn)),
            State::Quoted if self.prev == CharClass::ClosingQuote => self.state = State::RowEnd,
            State::Quoted => self.fields.push('\r'),
        }
        self.prev = CharClass::CarriageReturn;
        Ok(())
    }

    fn quote(&mut self) -> Result<()> {
        match self.state {
            State::Start => {
                self.open_field()?;
                self.state = State::Quoted;
                self.prev = CharClass::OpeningQuote;
            }
            State::RowEnd => return Err(self.malformed(Malformation::QuoteAfterRowEnd)),
            State::Free => return Err(self.malformed(Malformation::QuoteInUnquotedField)),
            State::Quoted if self.prev == CharClass::ClosingQuote => {
                // doubled quote
                self.fields.push('"');
                self.prev = CharClass::TextData;
            }
            State::Quoted => self.prev = CharClass::ClosingQuote,
        }
        Ok(())
    }

    fn comma(&mut self) -> Result<()> {
        match self.state {
            State::Start => {
                self.open_field()?;
                self.close_field();
            }
            State::Free => self.close_field(),
            State::Quoted if self.prev == CharClass::ClosingQuote => self.close_field(),
            State::Quoted => {
                self.fields.push(',');
                self.prev = CharClass::TextData;
            }
            State::RowEnd => return Err(self.malformed(Malformation::CommaAfterRowEnd)),
        }
        Ok(())
    }

    fn text(&mut self, ch: char) -> Result<()> {
        match self.state {
            State::Start => {
                self.open_field()?;
                self.state = State::Free;
            }
            State::Free => {}
            State::Quoted if self.prev == CharClass::ClosingQuote => {
                return Err(self.malformed(Malformation::TextAfterClosingQuote))
            }
            State::Quoted => {}
            State::RowEnd => return Err(self.malformed(Malformation::TextAfterRowEnd)),
        }
        self.fields.push(ch);
        self.prev = CharClass::TextData;
        Ok(())
    }

    /// Reject a field that would exceed the header's column count
    fn open_field(&self) -> Result<()> {
        match self.assembler.column_count() {
            Some(expected) if self.fields.len() >= expected => {
                Err(self.malformed(Malformation::TooManyFields { expected }))
            }
            _ => Ok(()),
        }
    }

    fn close_field(&mut self) {
        self.fields.close_field();
        self.state = State::Start;
        self.prev = CharClass::Comma;
    }

    fn finalize_row(&mut self) -> Result<Option<Record>> {
        self.fields.close_field();
        let assembled = self
            .assembler
            .assemble(self.fields.row_mut(), &self.cursor);
        if assembled.is_ok() {
            log::trace!(
                "finalized CSV row {} ending on line {}",
                self.cursor.row(),
                self.cursor.line()
            );
        }

        // a rejected row is discarded as well
        self.fields.clear();
        self.state = State::Start;
        self.prev = CharClass::None;
        self.cursor.next_row();
        self.pending = false;
        assembled
    }

    fn malformed(&self, kind: Malformation) -> CsvError {
        CsvError::malformed(kind, self.position())
    }
}
