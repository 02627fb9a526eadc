//! Position tracking for source locations.

/// A location in the source, as seen by the cursor at the time it is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column, counted in bytes.
    pub column: u32,
    /// Byte offset from the start of the input.
    pub offset: usize,
}

impl Position {
    /// The position before any byte has been read.
    #[inline]
    pub fn start() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Advance past one byte.
    #[inline]
    pub fn advance(&mut self, byte: u8) {
        self.offset += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// A one-byte range starting here, clamped to `len` bytes of source.
    /// At the end of the source this is the last byte.
    #[inline]
    pub fn range(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.offset.min(len.saturating_sub(1));
        start..(start + 1).min(len)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
