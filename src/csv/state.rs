//! States and character classes of the row-reading automaton

/// Where the automaton is inside the current field or row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// Beginning of a field, kind not decided yet
    #[default]
    Start,
    /// Inside a quoted field
    Quoted,
    /// Inside an unquoted field
    Free,
    /// A row-ending `\r` was consumed, `\n` must follow
    RowEnd,
}

/// Class of the most recently consumed character
///
/// This is the single character of lookback the automaton needs: a quote seen
/// while the previous class is [`CharClass::ClosingQuote`] is an escaped quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharClass {
    #[default]
    None,
    LineFeed,
    CarriageReturn,
    /// Quote that opened a quoted field
    OpeningQuote,
    /// Quote inside a quoted field that may close it
    ClosingQuote,
    Comma,
    TextData,
}
