//! Line, row and column tracking for diagnostics

use crate::error::Position;

/// Running position of the automaton in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    line: u64,
    row: u64,
    column: u64,
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor {
            line: 1,
            row: 1,
            column: 1,
        }
    }
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move past a character on the current line
    pub fn advance(&mut self) {
        self.column += 1;
    }

    /// Move to the start of the next physical line
    pub fn newline(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    /// Move to the start of the next logical row
    pub fn next_row(&mut self) {
        self.row += 1;
        self.newline();
    }

    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn row(&self) -> u64 {
        self.row
    }

    pub fn column(&self) -> u64 {
        self.column
    }

    /// Snapshot the cursor with a 1-based field index
    pub fn at_field(&self, field: usize) -> Position {
        Position {
            line: self.line,
            row: self.row,
            column: self.column,
            field: field as u64,
        }
    }
}
