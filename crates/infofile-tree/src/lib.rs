//! Entry points for reading infofile documents.
//!
//! [`parse`], [`parse_bytes`] and [`read_file`] all return a [`Parsed`]: the
//! root node, if the input could be turned into a tree, and every error that
//! was reported along the way. Errors render with source context through
//! [`Diagnostic`].

use std::fs::File;
use std::path::Path;

use infofile_parse::{ByteSource, Cursor, Lexer, Parser, ReaderSource, SliceSource};
use tracing::debug;

mod diagnostic;

pub use diagnostic::Diagnostic;
pub use infofile_parse::{ErrorKind, Node, ParseError, Position};

/// The outcome of a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// The root node; `None` when the input could not be parsed into a tree.
    pub root: Option<Node>,
    /// Every error reported, in the order they were found.
    pub errors: Vec<ParseError>,
}

impl Parsed {
    /// Whether there is a tree and nothing was reported.
    pub fn is_clean(&self) -> bool {
        self.root.is_some() && self.errors.is_empty()
    }

    /// The root if the parse was clean, otherwise all reported errors.
    pub fn into_result(self) -> Result<Node, ParseFailure> {
        match self.root {
            Some(root) if self.errors.is_empty() => Ok(root),
            _ => Err(ParseFailure {
                errors: self.errors,
            }),
        }
    }
}

/// A parse that reported errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub errors: Vec<ParseError>,
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.errors.as_slice() {
            [] => write!(f, "input could not be parsed"),
            [only] => write!(f, "{only}"),
            [first, rest @ ..] => write!(f, "{first} (and {} more errors)", rest.len()),
        }
    }
}

impl std::error::Error for ParseFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.errors
            .first()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Parse an infofile document held in memory.
///
/// `source_name` prefixes every reported error.
pub fn parse(source_name: &str, text: &str) -> Parsed {
    parse_bytes(source_name, text.as_bytes())
}

/// Parse an infofile document from raw bytes.
pub fn parse_bytes(source_name: &str, bytes: &[u8]) -> Parsed {
    parse_source(Cursor::new(source_name, SliceSource::new(bytes))).0
}

/// Read and parse the file at `path`.
///
/// Bytes are read as they are, without newline translation. A file that
/// cannot be opened, or fails while being read, is reported as an
/// [`ErrorKind::Io`] error and gives no root.
pub fn read_file(path: impl AsRef<Path>) -> Parsed {
    let path = path.as_ref();
    let name = path.display().to_string();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            debug!(path = %name, error = %e, "unable to open file");
            return Parsed {
                root: None,
                errors: vec![ParseError::new(
                    ErrorKind::Io,
                    format!("unable to open file: {e}"),
                    name,
                    Position::start(),
                )],
            };
        }
    };

    let (mut parsed, cursor) = parse_source(Cursor::new(name.as_str(), ReaderSource::new(file)));
    let position = cursor.position();
    if let Some(e) = cursor.into_source().take_error() {
        parsed.errors.push(ParseError::new(
            ErrorKind::Io,
            format!("unable to read file: {e}"),
            name,
            position,
        ));
        parsed.root = None;
    }
    parsed
}

fn parse_source<S: ByteSource>(cursor: Cursor<S>) -> (Parsed, Cursor<S>) {
    let name = cursor.name().to_string();
    let mut errors = Vec::new();
    let (root, cursor) = {
        let mut parser = Parser::new(Lexer::new(cursor, &mut errors));
        let root = parser.read_root();
        (root, parser.into_lexer().into_cursor())
    };

    debug!(
        source = %name,
        has_root = root.is_some(),
        errors = errors.len(),
        "parsed"
    );
    (Parsed { root, errors }, cursor)
}

#[cfg(test)]
mod tests;
