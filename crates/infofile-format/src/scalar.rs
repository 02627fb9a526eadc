//! Scalar handling for infofile output.
//!
//! Decides how a name or value is written so that it lexes back to exactly
//! the same text: bare, `"quoted"`, `"""multi-line"""`, `@"verbatim"`, or
//! pieces of those glued together with `+`.

use std::borrow::Cow;

use infofile_parse::chars::is_ident;
use infofile_parse::{Cursor, Lexer, SliceSource, TokenKind};

/// Check if a string can be written without quotes.
///
/// True for identifiers, and for numbers and colors that lex back cleanly.
pub fn can_be_bare(s: &str) -> bool {
    if is_ident(s) {
        return true;
    }
    if !s.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '#') {
        return false;
    }

    let mut errors = Vec::new();
    let mut lexer = Lexer::new(
        Cursor::new("", SliceSource::new(s.as_bytes())),
        &mut errors,
    );
    let token = lexer.read();
    let rest = lexer.read();
    token.kind == TokenKind::Ident
        && token.text == s
        && rest.kind == TokenKind::EndOfFile
        && errors.is_empty()
}

/// Escape a string for quoted output.
///
/// Returns the escaped content (without surrounding quotes). In a multi-line
/// string line breaks and tabs stay as they are. The text must not contain
/// a backslash, there is no escape for one.
pub fn escape_quoted(s: &str, multiline: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| match c {
        '"' | '\0' => true,
        '\n' | '\t' => !multiline,
        _ => false,
    };
    if !s.chars().any(needs_escape) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\0' => result.push_str("\\0"),
            '\n' if !multiline => result.push_str("\\n"),
            '\t' if !multiline => result.push_str("\\t"),
            c => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Whether the text can go in a verbatim string: no raw line breaks, tabs or
/// NUL bytes.
pub fn can_be_verbatim(s: &str) -> bool {
    !s.contains(['\n', '\r', '\t', '\0'])
}

/// Write `s` in the first form that represents it exactly.
pub fn write_scalar(out: &mut String, s: &str) {
    if can_be_bare(s) {
        out.push_str(s);
    } else if !s.contains('\\') {
        write_quoted(out, s);
    } else if can_be_verbatim(s) {
        write_verbatim(out, s);
    } else {
        // backslashes go in verbatim pieces, everything else in quoted ones
        let mut first = true;
        for piece in split_backslash_runs(s) {
            if !first {
                out.push_str(" + ");
            }
            first = false;
            if piece.starts_with('\\') {
                write_verbatim(out, piece);
            } else {
                write_quoted(out, piece);
            }
        }
    }
}

/// The written form of `s`, see [`write_scalar`].
pub fn scalar(s: &str) -> Cow<'_, str> {
    if can_be_bare(s) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 2);
    write_scalar(&mut out, s);
    Cow::Owned(out)
}

fn write_quoted(out: &mut String, s: &str) {
    // a carriage return can only be written raw, inside a multi-line string
    let multiline = s.contains(['\n', '\r']);
    let quotes = if multiline { "\"\"\"" } else { "\"" };
    out.push_str(quotes);
    out.push_str(&escape_quoted(s, multiline));
    out.push_str(quotes);
}

fn write_verbatim(out: &mut String, s: &str) {
    out.push_str("@\"");
    out.push_str(&s.replace('"', "\"\""));
    out.push('"');
}

/// Split into alternating runs of backslashes and everything else.
fn split_backslash_runs(s: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_backslashes = s.starts_with('\\');
    for (i, c) in s.char_indices() {
        if (c == '\\') != in_backslashes {
            pieces.push(&s[start..i]);
            start = i;
            in_backslashes = !in_backslashes;
        }
    }
    pieces.push(&s[start..]);
    pieces
}
