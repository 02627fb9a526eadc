//! Token types for the infofile lexer.

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structural tokens
    /// `{`
    StructBegin,
    /// `}`
    StructEnd,
    /// `[`
    ArrayBegin,
    /// `]`
    ArrayEnd,
    /// `,` or `;`
    Separator,
    /// `=`, `:` or `:=`
    Assign,
    /// `+` or `\`, glues identifiers together
    Combine,

    /// Identifier, quoted/verbatim string, heredoc body, number or color.
    /// The text is the decoded content.
    Ident,

    // Special tokens
    /// A character no token starts with.
    Unknown,
    /// End of input
    EndOfFile,
}

/// A token with its kind and decoded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The decoded text of this token.
    pub text: String,
    /// The literal was cut short by a fatal lexical error; the text is
    /// whatever was read before it.
    pub truncated: bool,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            truncated: false,
        }
    }

    /// An identifier token.
    pub fn ident(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Ident, text)
    }

    /// An identifier token whose literal did not end properly.
    pub fn truncated(text: impl Into<String>) -> Self {
        Self {
            truncated: true,
            ..Self::ident(text)
        }
    }

    pub fn end_of_file() -> Self {
        Self::new(TokenKind::EndOfFile, "")
    }

    /// Whether this token can start a value: an identifier or a body.
    pub fn is_value_start(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Ident | TokenKind::StructBegin | TokenKind::ArrayBegin
        )
    }

    /// How the token reads in an error message.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EndOfFile => "end of file".to_string(),
            TokenKind::Ident => format!("{:?}", self.text),
            _ => format!("`{}`", self.text),
        }
    }
}
