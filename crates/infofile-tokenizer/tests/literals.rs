//! Property tests: literals written the way the grammar allows lex back to
//! the text they were written from.

use infofile_tokenizer::{Cursor, Lexer, SliceSource, Token, TokenKind};
use proptest::prelude::*;

fn lex_one(source: &str) -> Token {
    let mut errors = Vec::new();
    let mut lexer = Lexer::new(
        Cursor::new("prop", SliceSource::new(source.as_bytes())),
        &mut errors,
    );
    let token = lexer.read();
    let rest = lexer.read();
    assert_eq!(rest.kind, TokenKind::EndOfFile, "trailing token in {source:?}");
    assert!(errors.is_empty(), "errors lexing {source:?}: {errors:?}");
    token
}

fn quote(text: &str) -> String {
    let mut out = String::from("\"");
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

proptest! {
    #[test]
    fn quoted_string_roundtrips(text in "[^\\\\\\r]*") {
        let token = lex_one(&quote(&text));
        prop_assert_eq!(token.kind, TokenKind::Ident);
        prop_assert_eq!(token.text, text);
    }

    #[test]
    fn plain_strings_in_either_quote(text in "[a-zA-Z0-9 .,:;!?(){}=+#<>-]*") {
        prop_assert_eq!(lex_one(&format!("\"{text}\"")).text, text.as_str());
        prop_assert_eq!(lex_one(&format!("'{text}'")).text, text.as_str());
    }

    #[test]
    fn triple_quoted_keeps_raw_whitespace(text in "[a-z \n\t\r']{0,40}") {
        let token = lex_one(&format!("\"\"\"{text}\"\"\""));
        prop_assert_eq!(token.text, text);
    }

    #[test]
    fn verbatim_string_roundtrips(text in "[^\\n\\r\\t\\x00]*") {
        let source = format!("@\"{}\"", text.replace('"', "\"\""));
        let token = lex_one(&source);
        prop_assert_eq!(token.text, text);
    }

    #[test]
    fn heredoc_roundtrips(lines in prop::collection::vec("[a-z \"{}]{0,12}", 0..6)) {
        let body = lines.join("\n");
        let source = format!("<<END dog\n{body}\nEND trailer\n");
        let token = lex_one(&source);
        prop_assert!(!token.truncated);
        prop_assert_eq!(token.text, body);
    }

    #[test]
    fn integers_roundtrip(n in any::<i64>()) {
        let text = n.to_string();
        let token = lex_one(&text);
        prop_assert_eq!(token.text, text);
    }
}
