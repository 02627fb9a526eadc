//! A tokenizer for infofile
//!
//! The [`Lexer`] pulls bytes from a [`Cursor`] and hands out [`Token`]s with a
//! single token of lookahead. Problems are appended to a caller-owned list of
//! [`ParseError`]s; lexing never stops early.

pub mod chars;

mod cursor;
pub use cursor::{ByteSource, Cursor, ReaderSource, SliceSource};

mod error;
pub use error::{ErrorKind, ParseError};

mod position;
pub use position::Position;

mod token;
pub use token::{Token, TokenKind};

mod lexer;
pub use lexer::Lexer;
