//! # csvstream
//!
//! Streaming CSV reader built on a character-level state machine.
//!
//! Input is consumed one character at a time. The first row is the header row;
//! each following row is returned as a [`Record`] mapping header names to field
//! values, in header order. Malformed input is reported with the exact line,
//! row, column and field where the problem was found.
//!
//! ## Dialect
//!
//! - Fields are separated by `,`
//! - Fields may be enclosed in `"`; inside them `,`, `\r` and `\n` are literal
//! - `""` inside a quoted field is a literal `"`
//! - Rows end with `\n` or `\r\n`; the last row may omit its terminator
//! - Every data row must have as many fields as the header row
//!
//! ## Example
//!
//! ```
//! use csvstream::CsvReader;
//!
//! let mut reader = CsvReader::from_text("from,msg\nAlice,\"Say \"\"Hi\"\"\"\n");
//! let record = reader.next_record()?.unwrap();
//! assert_eq!(record.get("msg"), Some("Say \"Hi\""));
//! # Ok::<(), csvstream::CsvError>(())
//! ```
//!
//! ## Errors
//!
//! ```
//! use csvstream::{CsvError, CsvReader, Malformation};
//!
//! let mut reader = CsvReader::from_text("a,b\nfield\"1\",2\n");
//! match reader.next_record() {
//!     Err(CsvError::MalformedInput { kind, position }) => {
//!         assert_eq!(kind, Malformation::QuoteInUnquotedField);
//!         assert_eq!((position.line, position.column), (2, 6));
//!     }
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

pub mod csv;
pub mod csv_reader;
pub mod error;
pub mod source;
pub mod types;

pub use csv_reader::{CsvReader, RecordIterator};
pub use error::{CsvError, Malformation, Position, Result};
pub use source::{CharSource, FileSource, ReaderSource, TextSource};
pub use types::Record;
