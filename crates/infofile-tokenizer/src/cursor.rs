//! Byte sources and the cursor the lexer reads through.

use std::io::{self, BufReader, Read};

use crate::Position;

/// Something that yields the bytes of an input one at a time.
pub trait ByteSource {
    /// The next byte, or `None` once the input is exhausted.
    fn next_byte(&mut self) -> Option<u8>;
}

/// Bytes from an in-memory buffer.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }
}

impl ByteSource for SliceSource<'_> {
    #[inline]
    fn next_byte(&mut self) -> Option<u8> {
        let b = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }
}

/// Bytes from any reader, buffered.
///
/// A read error ends the input; the error is kept so the caller can report it
/// once parsing is done.
pub struct ReaderSource<R> {
    bytes: io::Bytes<BufReader<R>>,
    error: Option<io::Error>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            error: None,
        }
    }

    /// Take the read error that ended the input early, if there was one.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn next_byte(&mut self) -> Option<u8> {
        if self.error.is_some() {
            return None;
        }
        match self.bytes.next()? {
            Ok(b) => Some(b),
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

impl<R> std::fmt::Debug for ReaderSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaderSource")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// One byte of lookahead over a [`ByteSource`], with line/column tracking.
///
/// `0` is returned once the input is exhausted; a NUL byte in the input
/// therefore ends it.
#[derive(Debug)]
pub struct Cursor<S> {
    source: S,
    name: String,
    lookahead: Option<u8>,
    position: Position,
    /// Position before the most recent `read`, restored by `unput`.
    previous: Position,
}

impl<S: ByteSource> Cursor<S> {
    /// Create a cursor; `name` is used to prefix diagnostics.
    pub fn new(name: impl Into<String>, source: S) -> Self {
        Self {
            source,
            name: name.into(),
            lookahead: None,
            position: Position::start(),
            previous: Position::start(),
        }
    }

    /// Name of the input, for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the next unread byte.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Peek at the next byte without consuming it.
    #[inline]
    pub fn peek(&mut self) -> u8 {
        match self.lookahead {
            Some(c) => c,
            None => {
                let c = self.source.next_byte().unwrap_or(0);
                self.lookahead = Some(c);
                c
            }
        }
    }

    /// Consume and return the next byte.
    #[inline]
    pub fn read(&mut self) -> u8 {
        let c = match self.lookahead.take() {
            Some(c) => c,
            None => self.source.next_byte().unwrap_or(0),
        };
        if c == 0 {
            // keep yielding the sentinel, even if the source has more after a NUL
            self.lookahead = Some(0);
            return 0;
        }
        self.previous = self.position;
        self.position.advance(c);
        c
    }

    /// Push back the byte just read.
    ///
    /// # Panics
    /// Panics if a byte is already buffered: only one byte can be pushed back
    /// between reads.
    pub fn unput(&mut self, c: u8) {
        assert!(
            self.lookahead.is_none(),
            "unput called with a byte already buffered"
        );
        self.lookahead = Some(c);
        self.position = self.previous;
    }

    /// Consume the cursor, returning the byte source.
    pub fn into_source(self) -> S {
        self.source
    }
}
