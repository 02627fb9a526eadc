//! Byte classes used by the lexer and the printer.

/// Whitespace skipped between tokens.
#[inline]
pub fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r')
}

/// Check if a byte can start or continue an identifier.
///
/// Identifiers start with an ASCII letter or `_`; after the first byte digits,
/// `.` and `@` are allowed too, so `the.dude@example.com` is one identifier.
#[inline]
pub fn is_ident_char(c: u8, first: bool) -> bool {
    let start = c.is_ascii_alphabetic() || c == b'_';
    if first {
        start
    } else {
        start || c.is_ascii_digit() || c == b'.' || c == b'@'
    }
}

#[inline]
pub fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

#[inline]
pub fn is_hex(c: u8) -> bool {
    c.is_ascii_hexdigit()
}

#[inline]
pub fn is_binary(c: u8) -> bool {
    c == b'0' || c == b'1'
}

/// Whether `text` would lex back as a single bare identifier.
pub fn is_ident(text: &str) -> bool {
    let mut bytes = text.bytes();
    match bytes.next() {
        Some(c) if is_ident_char(c, true) => bytes.all(|c| is_ident_char(c, false)),
        _ => false,
    }
}
