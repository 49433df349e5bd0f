//! Buffers for the field and row being read

/// Accumulates characters into fields and fields into a row
#[derive(Debug, Default)]
pub struct FieldAccumulator {
    field: String,
    row: Vec<String>,
}

impl FieldAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a character to the current field
    pub fn push(&mut self, ch: char) {
        self.field.push(ch);
    }

    /// Move the current field into the row and start an empty one
    pub fn close_field(&mut self) {
        self.row.push(std::mem::take(&mut self.field));
    }

    /// Number of fields closed in the current row
    pub fn len(&self) -> usize {
        self.row.len()
    }

    /// Fields closed so far; draining it leaves the allocation in place
    pub fn row_mut(&mut self) -> &mut Vec<String> {
        &mut self.row
    }

    /// Drop the current field and row
    pub fn clear(&mut self) {
        self.field.clear();
        self.row.clear();
    }
}
