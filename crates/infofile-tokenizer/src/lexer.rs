//! Lexer for the infofile configuration language.

use tracing::{debug, trace};

use crate::chars::{is_binary, is_digit, is_hex, is_ident_char, is_whitespace};
use crate::{ByteSource, Cursor, ErrorKind, ParseError, Position, Token, TokenKind};

/// A lexer that produces tokens from a byte cursor.
///
/// Errors go to the list passed to [`Lexer::new`]; the lexer always returns
/// some token so the parser can decide how to continue.
pub struct Lexer<'e, S> {
    /// The bytes being lexed.
    cursor: Cursor<S>,
    /// Where reported errors are collected.
    errors: &'e mut Vec<ParseError>,
    /// One token of lookahead.
    lookahead: Option<Token>,
}

/// State of the heredoc scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeredocState {
    /// Collecting the terminator name after `<<`.
    Name,
    /// Skipping the rest of the opening line.
    OpeningLine,
    /// Reading the body.
    Body {
        /// How much of the terminator the current line has matched, or `None`
        /// once the line can no longer be the terminator.
        matched: Option<usize>,
        /// A line break precedes the current line and has not been written
        /// to the body yet.
        line_break: bool,
    },
    /// Skipping the rest of the terminator line.
    ClosingLine,
}

impl<'e, S: ByteSource> Lexer<'e, S> {
    /// Create a new lexer reading from `cursor`.
    pub fn new(cursor: Cursor<S>, errors: &'e mut Vec<ParseError>) -> Self {
        Self {
            cursor,
            errors,
            lookahead: None,
        }
    }

    /// Get the current position of the underlying cursor.
    #[inline]
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Consume the lexer, returning its cursor.
    pub fn into_cursor(self) -> Cursor<S> {
        self.cursor
    }

    /// Peek at the next token without consuming it.
    pub fn peek(&mut self) -> &Token {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.next_token(),
        };
        self.lookahead.insert(token)
    }

    /// Consume and return the next token.
    pub fn read(&mut self) -> Token {
        match self.lookahead.take() {
            Some(token) => token,
            None => self.next_token(),
        }
    }

    /// Record an error at the current position.
    pub fn report_error(&mut self, kind: ErrorKind, message: impl Into<String>) {
        let position = self.cursor.position();
        self.report_error_at(kind, message, position);
    }

    fn report_error_at(&mut self, kind: ErrorKind, message: impl Into<String>, position: Position) {
        let error = ParseError::new(kind, message, self.cursor.name(), position);
        debug!(%error, "lex error");
        self.errors.push(error);
    }

    fn next_token(&mut self) -> Token {
        let token = self.lex();
        trace!(
            "Token {:?} at {}: {:?}{}",
            token.kind,
            self.cursor.position(),
            token.text,
            if token.truncated { " (truncated)" } else { "" }
        );
        token
    }

    fn lex(&mut self) -> Token {
        self.skip_whitespace();

        while self.cursor.peek() == b'/' {
            self.cursor.read();
            match self.cursor.peek() {
                b'/' => {
                    self.cursor.read();
                    self.eat_line_comment();
                }
                b'*' => {
                    self.cursor.read();
                    self.eat_block_comment();
                }
                other => {
                    self.report_error(
                        ErrorKind::UnknownCharacter,
                        format!("found `/` followed by {} instead of a comment", show(other)),
                    );
                    return Token::new(TokenKind::Unknown, "/");
                }
            }
            self.skip_whitespace();
        }

        let c = self.cursor.peek();
        match c {
            0 => Token::end_of_file(),

            // Structural tokens
            b'{' => self.single(TokenKind::StructBegin),
            b'}' => self.single(TokenKind::StructEnd),
            b'[' => self.single(TokenKind::ArrayBegin),
            b']' => self.single(TokenKind::ArrayEnd),
            b',' | b';' => self.single(TokenKind::Separator),
            b'=' => self.single(TokenKind::Assign),
            b'+' | b'\\' => self.single(TokenKind::Combine),
            b':' => {
                self.cursor.read();
                if self.cursor.peek() == b'=' {
                    self.cursor.read();
                    Token::new(TokenKind::Assign, ":=")
                } else {
                    Token::new(TokenKind::Assign, ":")
                }
            }

            // Literals
            b'<' => self.read_heredoc(),
            b'"' | b'\'' => self.read_string(c),
            b'#' => self.read_color(),
            b'@' => {
                self.cursor.read();
                match self.cursor.peek() {
                    quote @ (b'"' | b'\'') => self.read_verbatim_string(quote),
                    other => {
                        self.report_error(
                            ErrorKind::UnknownCharacter,
                            format!(
                                "expected `\"` or `'` after verbatim string marker `@`, found {}",
                                show(other)
                            ),
                        );
                        Token::new(TokenKind::Unknown, "@")
                    }
                }
            }
            b'0' => self.read_zero_based_number(),
            _ if is_ident_char(c, true) => self.read_ident(),
            _ if is_digit(c) || c == b'-' => self.read_number(false),

            _ => self.read_unknown(),
        }
    }

    /// Consume one byte as a token of `kind`.
    fn single(&mut self, kind: TokenKind) -> Token {
        let c = self.cursor.read();
        Token::new(kind, char::from(c).to_string())
    }

    fn skip_whitespace(&mut self) {
        while is_whitespace(self.cursor.peek()) {
            self.cursor.read();
        }
    }

    /// Skip to the end of the line, leaving the newline in place.
    fn eat_line_comment(&mut self) {
        while !matches!(self.cursor.peek(), b'\n' | 0) {
            self.cursor.read();
        }
    }

    /// Skip a block comment whose `/*` has been consumed. Block comments nest.
    fn eat_block_comment(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.cursor.read() {
                0 => {
                    self.report_error(
                        ErrorKind::UnterminatedLiteral,
                        "missing `*/` at end of block comment",
                    );
                    return;
                }
                b'*' if self.cursor.peek() == b'/' => {
                    self.cursor.read();
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                b'/' if self.cursor.peek() == b'*' => {
                    self.cursor.read();
                    depth += 1;
                }
                _ => {}
            }
        }
    }

    /// A character nothing else accepted. A multi-byte UTF-8 character is
    /// kept together.
    fn read_unknown(&mut self) -> Token {
        let start = self.cursor.position();
        let first = self.cursor.read();
        let mut bytes = vec![first];
        if first >= 0xC0 {
            while (0x80..0xC0).contains(&self.cursor.peek()) {
                bytes.push(self.cursor.read());
            }
        }
        let text = into_text(bytes);
        self.report_error_at(
            ErrorKind::UnknownCharacter,
            format!("unknown character `{}`", text.escape_debug()),
            start,
        );
        Token::new(TokenKind::Unknown, text)
    }

    fn read_ident(&mut self) -> Token {
        let mut bytes = vec![self.cursor.read()];
        while is_ident_char(self.cursor.peek(), false) {
            bytes.push(self.cursor.read());
        }
        Token::ident(into_text(bytes))
    }

    /// Lex `"..."`, `'...'`, an empty `""`, or a `"""..."""` multi-line string.
    fn read_string(&mut self, quote: u8) -> Token {
        self.cursor.read();

        let mut multiline = false;
        if self.cursor.peek() == quote {
            self.cursor.read();
            if self.cursor.peek() != quote {
                return Token::ident("");
            }
            self.cursor.read();
            multiline = true;
        }

        let mut bytes = Vec::new();
        loop {
            match self.cursor.peek() {
                0 => break,
                c if c == quote && !multiline => {
                    self.cursor.read();
                    return Token::ident(into_text(bytes));
                }
                c if c == quote => {
                    // only three in a row close the string
                    let mut run = 0;
                    while run < 3 && self.cursor.peek() == quote {
                        self.cursor.read();
                        run += 1;
                    }
                    if run == 3 {
                        return Token::ident(into_text(bytes));
                    }
                    for _ in 0..run {
                        bytes.push(quote);
                    }
                }
                b'\n' | b'\r' | b'\t' if !multiline => {
                    let c = self.cursor.read();
                    self.report_error(
                        ErrorKind::UnterminatedLiteral,
                        format!("invalid whitespace {} in string", show(c)),
                    );
                    return Token::truncated(into_text(bytes));
                }
                b'\\' => self.read_escape(&mut bytes),
                _ => bytes.push(self.cursor.read()),
            }
        }

        self.report_error(
            ErrorKind::UnterminatedLiteral,
            format!("missing {} at end of string", show(quote)),
        );
        Token::truncated(into_text(bytes))
    }

    /// Decode the escape starting at the backslash under the cursor.
    fn read_escape(&mut self, bytes: &mut Vec<u8>) {
        self.cursor.read();
        let decoded = match self.cursor.peek() {
            b'n' => b'\n',
            b't' => b'\t',
            b'0' => 0,
            b'"' => b'"',
            b'\'' => b'\'',
            // the string loop reports the missing terminator
            0 => return,
            other => {
                self.report_error(
                    ErrorKind::InvalidEscape,
                    format!("invalid escape character {}", show(other)),
                );
                other
            }
        };
        self.cursor.read();
        bytes.push(decoded);
    }

    /// Lex `@"..."` or `@'...'`; the `@` has been consumed.
    fn read_verbatim_string(&mut self, quote: u8) -> Token {
        self.cursor.read();

        let mut bytes = Vec::new();
        loop {
            match self.cursor.peek() {
                0 => break,
                c if c == quote => {
                    self.cursor.read();
                    if self.cursor.peek() != quote {
                        return Token::ident(into_text(bytes));
                    }
                    bytes.push(self.cursor.read());
                }
                b'\n' | b'\r' | b'\t' => {
                    let c = self.cursor.read();
                    self.report_error(
                        ErrorKind::UnterminatedLiteral,
                        format!("invalid whitespace {} in verbatim string", show(c)),
                    );
                    return Token::truncated(into_text(bytes));
                }
                _ => bytes.push(self.cursor.read()),
            }
        }

        self.report_error(
            ErrorKind::UnterminatedLiteral,
            format!("missing {} at end of verbatim string", show(quote)),
        );
        Token::truncated(into_text(bytes))
    }

    /// Lex a heredoc: `<<NAME` up to the first line that starts with `NAME`.
    ///
    /// Anything after the name on the opening line, and anything after the
    /// terminator on the closing line, is ignored.
    fn read_heredoc(&mut self) -> Token {
        self.cursor.read();
        if self.cursor.peek() != b'<' {
            let found = self.cursor.peek();
            self.report_error(
                ErrorKind::InvalidHeredoc,
                format!("expected `<` but found {} at the start of a heredoc", show(found)),
            );
            return Token::new(TokenKind::Unknown, "<");
        }
        self.cursor.read();

        let mut name = Vec::new();
        let mut body = Vec::new();
        let mut state = HeredocState::Name;
        loop {
            let c = self.cursor.read();
            if c == 0 {
                break;
            }
            state = match state {
                HeredocState::Name if is_whitespace(c) => {
                    if name.is_empty() {
                        self.report_error(ErrorKind::InvalidHeredoc, "heredoc name is empty");
                        return Token::truncated("");
                    }
                    // the opening line may end right here
                    self.cursor.unput(c);
                    HeredocState::OpeningLine
                }
                HeredocState::Name => {
                    name.push(c);
                    HeredocState::Name
                }
                HeredocState::OpeningLine if c == b'\n' => HeredocState::Body {
                    matched: Some(0),
                    line_break: false,
                },
                HeredocState::OpeningLine => HeredocState::OpeningLine,
                HeredocState::Body {
                    matched: Some(index),
                    line_break,
                } if name.get(index) == Some(&c) => {
                    if index + 1 == name.len() {
                        HeredocState::ClosingLine
                    } else {
                        HeredocState::Body {
                            matched: Some(index + 1),
                            line_break,
                        }
                    }
                }
                HeredocState::Body {
                    matched,
                    line_break,
                } => {
                    if let Some(index) = matched {
                        if line_break {
                            body.push(b'\n');
                        }
                        body.extend_from_slice(&name[..index]);
                    } else if line_break {
                        body.push(b'\n');
                    }
                    if c == b'\n' {
                        HeredocState::Body {
                            matched: Some(0),
                            line_break: true,
                        }
                    } else {
                        body.push(c);
                        HeredocState::Body {
                            matched: None,
                            line_break: false,
                        }
                    }
                }
                HeredocState::ClosingLine if c == b'\n' => {
                    return Token::ident(into_text(body));
                }
                HeredocState::ClosingLine => HeredocState::ClosingLine,
            };
        }

        self.report_error(
            ErrorKind::UnterminatedLiteral,
            format!(
                "found end of file before heredoc `{}` ended",
                String::from_utf8_lossy(&name)
            ),
        );
        Token::truncated(into_text(body))
    }

    /// Lex a number starting with `0`: `0x...`, `0b...`, or a decimal.
    fn read_zero_based_number(&mut self) -> Token {
        self.cursor.read();

        let (accepts, base): (fn(u8) -> bool, &str) = match self.cursor.peek() {
            b'x' => (is_hex, "hexadecimal"),
            b'b' => (is_binary, "binary"),
            _ => return self.read_number(true),
        };

        let mut bytes = vec![b'0', self.cursor.read()];
        while accepts(self.cursor.peek()) {
            bytes.push(self.cursor.read());
        }
        let text = into_text(bytes);
        if text.len() == 2 {
            self.report_error(
                ErrorKind::InvalidNumber,
                format!("expected {base} digits after `{text}`"),
            );
        }
        Token::ident(text)
    }

    /// Lex `-?digits(.digits)?[fF]?`. With `zero_start` the leading `0` has
    /// already been consumed.
    fn read_number(&mut self, zero_start: bool) -> Token {
        let mut bytes = Vec::new();
        let mut has_digits = false;

        if zero_start {
            bytes.push(b'0');
            has_digits = true;
        } else if self.cursor.peek() == b'-' {
            bytes.push(self.cursor.read());
        }

        while is_digit(self.cursor.peek()) {
            bytes.push(self.cursor.read());
            has_digits = true;
        }

        if !has_digits {
            self.report_error(
                ErrorKind::InvalidNumber,
                "invalid number, needs at least one digit",
            );
            return Token::new(TokenKind::Unknown, into_text(bytes));
        }

        if self.cursor.peek() == b'.' {
            bytes.push(self.cursor.read());
            let integer_len = bytes.len();
            while is_digit(self.cursor.peek()) {
                bytes.push(self.cursor.read());
            }
            if bytes.len() == integer_len {
                let text = into_text(bytes);
                self.report_error(
                    ErrorKind::InvalidNumber,
                    format!("invalid number `{text}`, needs at least one digit after the decimal point"),
                );
                return Token::ident(text);
            }
        }

        if matches!(self.cursor.peek(), b'f' | b'F') {
            bytes.push(self.cursor.read());
        }

        Token::ident(into_text(bytes))
    }

    /// Lex `#RGB` or `#RRGGBB`; other lengths are reported but kept.
    fn read_color(&mut self) -> Token {
        let mut bytes = vec![self.cursor.read()];
        while is_hex(self.cursor.peek()) {
            bytes.push(self.cursor.read());
        }

        let color = into_text(bytes);
        if !matches!(color.len(), 4 | 7) {
            self.report_error(
                ErrorKind::InvalidColorLength,
                format!("invalid color `{color}`, needs to be either 3 or 6 hex digits long"),
            );
        }
        Token::ident(color)
    }
}

impl<S: ByteSource> Iterator for Lexer<'_, S> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.read();
        if token.kind == TokenKind::EndOfFile {
            None
        } else {
            Some(token)
        }
    }
}

/// Decoded bytes as text. Input is opaque bytes, so invalid UTF-8 is replaced
/// rather than rejected.
fn into_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// A byte as it reads in an error message.
fn show(c: u8) -> String {
    match c {
        0 => "end of file".to_string(),
        c if c.is_ascii_graphic() => format!("`{}`", char::from(c)),
        c => format!("`{}`", char::from(c).escape_default()),
    }
}
