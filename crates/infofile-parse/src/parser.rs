//! Recursive-descent parser for infofile.
//!
//! Grammar, in terms of lexer tokens:
//!
//! ```text
//! Root      := StructBody | ArrayBody | (Node SEP?)*
//! Node      := [Ident] [ASSIGN] [Ident] [ASSIGN] [StructBody | ArrayBody]
//! Ident     := IDENT (COMBINE IDENT)*
//! StructBody:= '{' (Node SEP?)* '}'
//! ArrayBody := '[' (Value SEP?)* ']'
//! Value     := Ident | StructBody | ArrayBody
//! ```

use infofile_tokenizer::{ByteSource, ErrorKind, Lexer, TokenKind};
use tracing::trace;

use crate::Node;

/// Builds a [`Node`] tree from the tokens of a [`Lexer`].
///
/// Every read returns `None` when the input cannot be turned into a tree; the
/// reason has already been reported to the lexer's error list by then.
pub struct Parser<'e, S> {
    lexer: Lexer<'e, S>,
    depth: usize,
}

/// How many `{` and `[` may be open at once.
pub const MAX_DEPTH: usize = 256;

impl<'e, S: ByteSource> Parser<'e, S> {
    pub fn new(lexer: Lexer<'e, S>) -> Self {
        Self { lexer, depth: 0 }
    }

    /// Consume the parser, returning its lexer.
    pub fn into_lexer(self) -> Lexer<'e, S> {
        self.lexer
    }

    /// Read the whole input as one node.
    ///
    /// A leading `{` or `[` makes the root that body. Otherwise the input is
    /// read as the members of a struct without braces: a single member is
    /// the root itself, anything else is wrapped in an unnamed node.
    pub fn read_root(&mut self) -> Option<Node> {
        trace!("read_root");
        let root = match self.lexer.peek().kind {
            TokenKind::StructBegin | TokenKind::ArrayBegin => Node {
                children: self.read_body()?,
                ..Node::default()
            },
            _ => {
                let mut members = self.read_members()?;
                if members.len() == 1 {
                    members.swap_remove(0)
                } else {
                    Node {
                        children: members,
                        ..Node::default()
                    }
                }
            }
        };

        let (kind, found) = self.next_token();
        if kind != TokenKind::EndOfFile {
            self.lexer.report_error(
                ErrorKind::UnexpectedToken,
                format!("expected end of file, found {found}"),
            );
        }

        Some(root)
    }

    /// Read nodes until a closer or the end of input, leaving it unconsumed.
    fn read_members(&mut self) -> Option<Vec<Node>> {
        trace!("read_members");
        let mut members = Vec::new();
        loop {
            if matches!(
                self.lexer.peek().kind,
                TokenKind::StructEnd | TokenKind::ArrayEnd | TokenKind::EndOfFile
            ) {
                return Some(members);
            }
            members.push(self.read_node()?);
            self.eat(TokenKind::Separator);
        }
    }

    /// Read array values until a closer or the end of input, leaving it
    /// unconsumed.
    fn read_values(&mut self) -> Option<Vec<Node>> {
        trace!("read_values");
        let mut values = Vec::new();
        loop {
            let value = match self.lexer.peek().kind {
                TokenKind::StructEnd | TokenKind::ArrayEnd | TokenKind::EndOfFile => {
                    return Some(values);
                }
                TokenKind::Ident => Node::with_value("", self.read_ident()?),
                TokenKind::StructBegin | TokenKind::ArrayBegin => Node {
                    children: self.read_body()?,
                    ..Node::default()
                },
                _ => {
                    self.unexpected("a value, `{` or `[`");
                    return None;
                }
            };
            values.push(value);
            self.eat(TokenKind::Separator);
        }
    }

    /// Read one `[name] [=] [value] [=] [body]` node.
    fn read_node(&mut self) -> Option<Node> {
        trace!("read_node");
        let mut node = Node::default();

        match self.lexer.peek().kind {
            TokenKind::Ident => {
                let first = self.read_ident()?;
                let next = self.lexer.peek();
                if next.kind == TokenKind::Assign || next.is_value_start() {
                    node.name = first;
                } else {
                    node.value = first;
                    return Some(node);
                }
            }
            TokenKind::StructBegin | TokenKind::ArrayBegin => {}
            _ => {
                self.unexpected("a name, value, `{` or `[`");
                return None;
            }
        }

        let mut assigned = self.eat(TokenKind::Assign);
        if self.lexer.peek().kind == TokenKind::Ident {
            node.value = self.read_ident()?;
            assigned = self.eat(TokenKind::Assign);
        }

        match self.lexer.peek().kind {
            TokenKind::StructBegin | TokenKind::ArrayBegin => {
                node.children = self.read_body()?;
            }
            _ if assigned => {
                self.unexpected("a value, `{` or `[` after the assignment");
                return None;
            }
            _ => {}
        }

        Some(node)
    }

    /// Read a `{...}` or `[...]` body, returning its members.
    ///
    /// A missing or wrong closer is reported but the body is still accepted.
    /// Opening more than [`MAX_DEPTH`] bodies at once fails the parse.
    fn read_body(&mut self) -> Option<Vec<Node>> {
        if self.depth >= MAX_DEPTH {
            let (_, found) = self.next_token();
            self.lexer.report_error(
                ErrorKind::UnexpectedToken,
                format!("nesting too deep at {found}, at most {MAX_DEPTH} levels are allowed"),
            );
            return None;
        }

        self.depth += 1;
        let children = self.read_nested_body();
        self.depth -= 1;
        children
    }

    fn read_nested_body(&mut self) -> Option<Vec<Node>> {
        let (children, closer) = match self.lexer.peek().kind {
            TokenKind::StructBegin => {
                trace!("read_struct");
                self.lexer.read();
                (self.read_members()?, TokenKind::StructEnd)
            }
            TokenKind::ArrayBegin => {
                trace!("read_array");
                self.lexer.read();
                (self.read_values()?, TokenKind::ArrayEnd)
            }
            _ => {
                self.unexpected("`{` or `[`");
                return None;
            }
        };

        if !self.eat(closer) {
            let expected = if closer == TokenKind::StructEnd {
                "`}`"
            } else {
                "`]`"
            };
            let (kind, found) = self.next_token();
            if kind == TokenKind::EndOfFile {
                self.lexer.report_error(
                    ErrorKind::UnexpectedEndOfFile,
                    format!("expected {expected} but reached end of file"),
                );
            } else {
                self.lexer.report_error(
                    ErrorKind::UnexpectedToken,
                    format!("expected {expected}, found {found}"),
                );
            }
        }

        Some(children)
    }

    /// Read an identifier, gluing on any `+ ident` or `\ ident` that follows.
    fn read_ident(&mut self) -> Option<String> {
        let token = self.lexer.read();
        debug_assert_eq!(token.kind, TokenKind::Ident);
        if token.truncated {
            return None;
        }

        let mut text = token.text;
        while self.lexer.peek().kind == TokenKind::Combine {
            let combine = self.lexer.read();
            if self.lexer.peek().kind != TokenKind::Ident {
                self.unexpected(&format!("a value after `{}`", combine.text));
                return None;
            }
            let next = self.lexer.read();
            if next.truncated {
                return None;
            }
            text.push_str(&next.text);
        }

        Some(text)
    }

    /// Consume the next token if it is of `kind`.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.lexer.peek().kind == kind {
            self.lexer.read();
            true
        } else {
            false
        }
    }

    /// Kind and description of the next token.
    fn next_token(&mut self) -> (TokenKind, String) {
        let token = self.lexer.peek();
        (token.kind, token.describe())
    }

    /// Report that the next token is not what the grammar allows here.
    fn unexpected(&mut self, expected: &str) {
        let (kind, found) = self.next_token();
        let error_kind = if kind == TokenKind::EndOfFile {
            ErrorKind::UnexpectedEndOfFile
        } else {
            ErrorKind::UnexpectedToken
        };
        self.lexer
            .report_error(error_kind, format!("expected {expected}, found {found}"));
    }
}
