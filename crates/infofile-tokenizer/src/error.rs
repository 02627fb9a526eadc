//! Errors reported while lexing and parsing.

use crate::Position;

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ErrorKind {
    /// A string, verbatim string, heredoc or block comment that never ends,
    /// or a single-line string broken by a raw line break.
    UnterminatedLiteral,
    /// Unknown character after `\` in a quoted string.
    InvalidEscape,
    /// A number without the digits it needs.
    InvalidNumber,
    /// A color that is not `#RGB` or `#RRGGBB`.
    InvalidColorLength,
    /// A malformed heredoc opener.
    InvalidHeredoc,
    /// A token the grammar does not allow here.
    UnexpectedToken,
    /// Input ended while a struct or array was still open.
    UnexpectedEndOfFile,
    /// A character no token can start with.
    UnknownCharacter,
    /// The input could not be read.
    Io,
}

impl ErrorKind {
    /// Short name, used as the headline of rendered diagnostics.
    pub fn title(&self) -> &'static str {
        match self {
            ErrorKind::UnterminatedLiteral => "unterminated literal",
            ErrorKind::InvalidEscape => "invalid escape",
            ErrorKind::InvalidNumber => "invalid number",
            ErrorKind::InvalidColorLength => "invalid color",
            ErrorKind::InvalidHeredoc => "invalid heredoc",
            ErrorKind::UnexpectedToken => "unexpected token",
            ErrorKind::UnexpectedEndOfFile => "unexpected end of file",
            ErrorKind::UnknownCharacter => "unknown character",
            ErrorKind::Io => "read error",
        }
    }
}

/// An error with the place it was reported at.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParseError {
    /// The kind of error.
    pub kind: ErrorKind,
    /// Human readable description.
    pub message: String,
    /// Name of the input (file name, or whatever the caller passed).
    pub source_name: String,
    /// Where the cursor was when the error was reported.
    pub position: Position,
}

impl ParseError {
    /// Create a new error.
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        source_name: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source_name: source_name.into(),
            position,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}:{}): {}",
            self.source_name, self.position.line, self.position.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let err = ParseError::new(
            ErrorKind::UnknownCharacter,
            "unknown character `$`",
            "inline",
            Position {
                line: 3,
                column: 7,
                offset: 20,
            },
        );
        assert_eq!(err.to_string(), "inline(3:7): unknown character `$`");
    }
}
