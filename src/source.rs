//! Character sources feeding the CSV state machine
//!
//! The reader pulls one character at a time through the [`CharSource`] trait,
//! so the parser works the same over in-memory text and buffered files.

use crate::error::{CsvError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

/// Provider of characters for the CSV reader
pub trait CharSource {
    /// Return the next character, or `Ok(None)` at end of input
    fn next_char(&mut self) -> Result<Option<char>>;

    /// Release any resource held by the source
    ///
    /// Called by the reader on reset. After release the source reports end of input.
    fn release(&mut self) {}
}

impl<S: CharSource + ?Sized> CharSource for Box<S> {
    fn next_char(&mut self) -> Result<Option<char>> {
        (**self).next_char()
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// In-memory character source over an owned string
///
/// # Examples
///
/// ```
/// use csvstream::source::{CharSource, TextSource};
///
/// let mut source = TextSource::new("a,b");
/// assert_eq!(source.next_char().unwrap(), Some('a'));
/// ```
#[derive(Debug, Clone)]
pub struct TextSource {
    text: String,
    offset: usize,
}

impl TextSource {
    pub fn new(text: impl Into<String>) -> Self {
        TextSource {
            text: text.into(),
            offset: 0,
        }
    }
}

impl CharSource for TextSource {
    fn next_char(&mut self) -> Result<Option<char>> {
        let next = self.text[self.offset..].chars().next();
        if let Some(ch) = next {
            self.offset += ch.len_utf8();
        }
        Ok(next)
    }

    fn release(&mut self) {
        self.text.clear();
        self.offset = 0;
    }
}

/// Character source decoding UTF-8 from any buffered reader
///
/// Characters are decoded one at a time; the reader is dropped on release.
pub struct ReaderSource<R> {
    reader: Option<R>,
}

/// Character source over a buffered file
pub type FileSource = ReaderSource<BufReader<File>>;

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource {
            reader: Some(reader),
        }
    }

    /// Whether the underlying reader is still held
    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }
}

impl ReaderSource<BufReader<File>> {
    /// Open a CSV file for character-by-character reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvstream::source::FileSource;
    ///
    /// let source = FileSource::open("data.csv").unwrap();
    /// assert!(source.is_open());
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let file = File::open(path_ref).map_err(|e| {
            CsvError::ReadError(format!(
                "Failed to open CSV file {}: {}",
                path_ref.display(),
                e
            ))
        })?;
        Ok(ReaderSource::new(BufReader::new(file)))
    }
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn next_char(&mut self) -> Result<Option<char>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        let mut buf = [0u8; 4];
        loop {
            match reader.read(&mut buf[..1]) {
                Ok(0) => return Ok(None),
                Ok(_) => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(CsvError::ReadError(format!(
                        "Failed to read character: {}",
                        e
                    )))
                }
            }
        }

        let width = utf8_width(buf[0]).ok_or_else(|| {
            CsvError::ReadError(format!("Invalid UTF-8 lead byte 0x{:02x}", buf[0]))
        })?;
        if width > 1 {
            reader.read_exact(&mut buf[1..width]).map_err(|e| {
                CsvError::ReadError(format!("Truncated UTF-8 sequence: {}", e))
            })?;
        }

        let decoded = std::str::from_utf8(&buf[..width])
            .map_err(|e| CsvError::ReadError(format!("Invalid UTF-8 sequence: {}", e)))?;
        Ok(decoded.chars().next())
    }

    fn release(&mut self) {
        self.reader = None;
    }
}

/// Byte length of a UTF-8 sequence from its lead byte
fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7f => Some(1),
        0xc2..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf4 => Some(4),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn drain(source: &mut impl CharSource) -> Result<String> {
        let mut out = String::new();
        while let Some(ch) = source.next_char()? {
            out.push(ch);
        }
        Ok(out)
    }

    #[test]
    fn test_text_source() -> Result<()> {
        let mut source = TextSource::new("né,\"x\"\n");
        assert_eq!(drain(&mut source)?, "né,\"x\"\n");
        assert_eq!(source.next_char()?, None);
        Ok(())
    }

    #[test]
    fn test_text_source_release() -> Result<()> {
        let mut source = TextSource::new("abc");
        assert_eq!(source.next_char()?, Some('a'));
        source.release();
        assert_eq!(source.next_char()?, None);
        Ok(())
    }

    #[test]
    fn test_reader_source_decodes_multibyte() -> Result<()> {
        let mut source = ReaderSource::new(Cursor::new("a,ü,€,𝄞\n".as_bytes().to_vec()));
        assert_eq!(drain(&mut source)?, "a,ü,€,𝄞\n");
        Ok(())
    }

    #[test]
    fn test_reader_source_invalid_utf8() {
        let mut source = ReaderSource::new(Cursor::new(vec![b'a', 0xff]));
        assert_eq!(source.next_char().ok().flatten(), Some('a'));
        assert!(matches!(source.next_char(), Err(CsvError::ReadError(_))));
    }

    #[test]
    fn test_reader_source_truncated_sequence() {
        let mut source = ReaderSource::new(Cursor::new(vec![0xe2, 0x82]));
        assert!(matches!(source.next_char(), Err(CsvError::ReadError(_))));
    }

    #[test]
    fn test_reader_source_release() -> Result<()> {
        let mut source = ReaderSource::new(Cursor::new(b"abc".to_vec()));
        assert!(source.is_open());
        source.release();
        assert!(!source.is_open());
        assert_eq!(source.next_char()?, None);
        Ok(())
    }

    #[test]
    fn test_open_missing_file() {
        let result = FileSource::open("definitely_missing_input.csv");
        assert!(matches!(result, Err(CsvError::ReadError(_))));
    }
}
