//! Parser for the infofile configuration language.
//!
//! [`Parser`] drives a [`Lexer`] by recursive descent and builds a [`Node`]
//! tree. Errors are collected in the list handed to the lexer; a `None` root
//! means the input could not be turned into a tree at all.

pub use infofile_tokenizer::chars;
pub use infofile_tokenizer::{
    ByteSource, Cursor, ErrorKind, Lexer, ParseError, Position, ReaderSource, SliceSource, Token,
    TokenKind,
};

mod node;
pub use node::Node;

mod parser;
pub use parser::{MAX_DEPTH, Parser};
