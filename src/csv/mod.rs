//! CSV parsing internals
//!
//! - [`CsvParser`]: character-level state machine
//! - [`RowAssembler`]: header capture and record building
//! - [`FieldAccumulator`]: field and row buffers
//! - [`Cursor`]: line/row/column tracking

mod assembler;
mod field;
mod parser;
mod position;
mod state;

pub use assembler::RowAssembler;
pub use field::FieldAccumulator;
pub use parser::CsvParser;
pub use position::Cursor;
pub use state::{CharClass, State};
