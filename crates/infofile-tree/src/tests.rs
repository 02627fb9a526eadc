use super::*;
use std::io::Write;

#[track_caller]
fn parse_ok(source: &str) -> Node {
    let parsed = parse("inline", source);
    assert!(parsed.errors.is_empty(), "unexpected errors: {:?}", parsed.errors);
    parsed.root.expect("root should be present")
}

#[track_caller]
fn single_value(source: &str) -> String {
    let root = parse_ok(source);
    assert_eq!(root.child_count(), 1, "{root:?}");
    root.children[0].value.clone()
}

fn error_report(parsed: &Parsed) -> String {
    parsed
        .errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_parse_simple() {
    let root = parse_ok("name Alice\nage 30");
    assert_eq!(root.get("name").map(|n| n.value.as_str()), Some("Alice"));
    assert_eq!(root.get("age").map(|n| n.value.as_str()), Some("30"));
}

#[test]
fn test_parse_empty() {
    let parsed = parse("inline", "");
    assert!(parsed.is_clean());
    assert_eq!(parsed.root, Some(Node::default()));
}

#[test]
fn test_nested_document() {
    let source = r#"
// service settings
server {
    host = localhost;
    ports [80, 443];
    tls : on := {
        cert @"C:\certs\server.pem";
    }
}
motd <<EOT
Welcome!
  Be nice.
EOT
"#;
    let root = parse_ok(source);
    assert_eq!(root.get("server.host").map(|n| n.value.as_str()), Some("localhost"));
    assert_eq!(root.get("server.ports[1]").map(|n| n.value.as_str()), Some("443"));
    assert_eq!(root.get("server.tls").map(|n| n.value.as_str()), Some("on"));
    assert_eq!(
        root.get("server.tls.cert").map(|n| n.value.as_str()),
        Some(r"C:\certs\server.pem")
    );
    assert_eq!(
        root.get("motd").map(|n| n.value.as_str()),
        Some("Welcome!\n  Be nice.")
    );
}

#[test]
fn test_strings() {
    assert_eq!(
        parse_ok(r#"{"key\n\t"="value\"";}"#).children[0],
        Node::with_value("key\n\t", "value\"")
    );
    assert_eq!(
        parse_ok(r#"{'"key"'='value is nice';}"#).children[0],
        Node::with_value("\"key\"", "value is nice")
    );
}

#[test]
fn test_verbatim_strings() {
    assert_eq!(single_value(r#"{path @"c:\Docs\Source\a.txt";}"#), r"c:\Docs\Source\a.txt");
    assert_eq!(single_value(r#"{path @"c:\Docs\Source\";}"#), r"c:\Docs\Source\");
    assert_eq!(
        single_value(r#"{line @"""Ahoy!"" cried the captain.";}"#),
        r#""Ahoy!" cried the captain."#
    );
    assert_eq!(single_value(r"{path @'c:\Docs\Source\a.txt';}"), r"c:\Docs\Source\a.txt");
    assert_eq!(
        single_value("{line @'''Ahoy!'' cried the captain.';}"),
        "'Ahoy!' cried the captain."
    );
}

#[test]
fn test_multiline_strings() {
    assert_eq!(
        single_value("{line \"\"\"this is a long string\"\"\"}"),
        "this is a long string"
    );
    assert_eq!(
        single_value("{line \"\"\"this\nis\na\nlong\nstring\tright?\"\"\"}"),
        "this\nis\na\nlong\nstring\tright?"
    );
}

#[test]
fn test_heredoc() {
    assert_eq!(
        single_value("{line <<EOF dog\nHello world EOF\ncat\nEOF dog=cat\n}"),
        "Hello world EOF\ncat"
    );
}

#[test]
fn test_fatal_errors_give_no_root() {
    for source in [
        "{line \"hello\nworld\"}",
        "{line 'hello\nworld'}",
        "{line @\"hello\nworld\"}",
        "{line @'hello\nworld'}",
        "{line <<EOF dog\nHello world EOF\ncat\nEOF dog=cat}",
        "{line <<EOF\ndog\nHello world EOF\ncat\nEOF dog=cat}",
        "{line \"never closed}",
    ] {
        let parsed = parse("inline", source);
        assert!(parsed.root.is_none(), "{source:?}");
        assert!(!parsed.errors.is_empty(), "{source:?}");
        assert!(!parsed.is_clean());
    }
}

#[test]
fn test_comments() {
    for source in [
        "{// this is a comment\nline dog}",
        "{line /*hello\nworld*/ dog}",
        "{line /***\nhello/* cat dog */\nworld ***/ dog}",
    ] {
        assert_eq!(
            parse_ok(source).children,
            vec![Node::with_value("line", "dog")],
            "{source:?}"
        );
    }
}

#[test]
fn test_combine() {
    assert_eq!(
        parse_ok("{li + ne do \\ g}").children,
        vec![Node::with_value("line", "dog")]
    );
}

#[test]
fn test_root_forms() {
    assert_eq!(parse_ok("line dog"), Node::with_value("line", "dog"));
    assert_eq!(parse_ok("'ナ' 'ㄅ'"), Node::with_value("ナ", "ㄅ"));
    assert_eq!(
        parse_ok("jesus.opponent the.dude@gmail.com"),
        Node::with_value("jesus.opponent", "the.dude@gmail.com")
    );
    assert_eq!(parse_ok("#000 #12ffAA"), Node::with_value("#000", "#12ffAA"));
    assert_eq!(parse_ok("dog {}"), Node::new("dog"));
    assert_eq!(parse_ok("dog []"), Node::new("dog"));
}

#[test]
fn test_numbers() {
    for number in [
        "12",
        "25.6",
        "35f",
        "12.3f",
        "-12",
        "-25.6",
        "-35f",
        "-12.3f",
        "0042",
        "0xaeF2",
        "0b00010000",
    ] {
        assert_eq!(single_value(&format!("[ {number} ]")), number);
    }
}

#[test]
fn test_zero_escape() {
    let value = single_value("[\"hello\\0world\"]");
    assert_eq!(value.len(), 11);
    assert_eq!(value, "hello\0world");
}

#[test]
fn test_underscore() {
    assert_eq!(single_value("[hello_world]"), "hello_world");
}

#[test]
fn test_value_with_children() {
    for source in ["key value {a b}", "key : value := {a b}"] {
        let root = parse_ok(source);
        assert_eq!(root.name, "key");
        assert_eq!(root.value, "value");
        assert_eq!(root.children, vec![Node::with_value("a", "b")]);
    }
    for source in ["key value [a]", "key : value := [a]"] {
        let root = parse_ok(source);
        assert_eq!(root.value, "value");
        assert_eq!(root.children, vec![Node::with_value("", "a")]);
    }
    for source in ["key := {a b}", "key := [a]"] {
        let root = parse_ok(source);
        assert_eq!(root.name, "key");
        assert_eq!(root.value, "");
        assert_eq!(root.child_count(), 1);
    }
}

#[test]
fn test_error_positions() {
    let parsed = parse("inline", "[#12 1.]");
    assert!(parsed.root.is_some());
    insta::assert_snapshot!(error_report(&parsed), @r"
    inline(1:5): invalid color `#12`, needs to be either 3 or 6 hex digits long
    inline(1:8): invalid number `1.`, needs at least one digit after the decimal point
    ");
}

#[test]
fn test_error_on_later_line() {
    let parsed = parse("inline", "a {\n  b \"x\n}");
    assert!(parsed.root.is_none());
    insta::assert_snapshot!(error_report(&parsed), @r"inline(3:1): invalid whitespace `\n` in string");
}

#[test]
fn test_into_result() {
    let node = parse("inline", "a 1").into_result().unwrap();
    assert_eq!(node, Node::with_value("a", "1"));

    let failure = parse("inline", "{a #1234 $}").into_result().unwrap_err();
    assert_eq!(failure.errors.len(), 3);
    assert_eq!(
        failure.to_string(),
        "inline(1:9): invalid color `#1234`, needs to be either 3 or 6 hex digits long (and 2 more errors)"
    );
}

#[test]
fn test_recoverable_error_is_not_clean() {
    let parsed = parse("inline", "color #ffff");
    assert!(parsed.root.is_some());
    assert!(!parsed.is_clean());
    assert!(parsed.into_result().is_err());
}

#[test]
fn test_parse_bytes_keeps_bytes() {
    let parsed = parse_bytes("bytes", b"text \"caf\xc3\xa9\"\r\n");
    assert!(parsed.is_clean());
    assert_eq!(parsed.root.map(|n| n.value), Some("café".to_string()));
}

#[test]
fn test_read_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"server {\r\n  port 8080\r\n}\r\n").unwrap();

    let parsed = read_file(file.path());
    assert!(parsed.is_clean(), "{:?}", parsed.errors);
    let root = parsed.root.unwrap();
    assert_eq!(root.name, "server");
    assert_eq!(root.get("port").map(|n| n.value.as_str()), Some("8080"));
}

#[test]
fn test_read_file_errors_use_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"a $").unwrap();

    let parsed = read_file(file.path());
    let expected_prefix = format!("{}(1:3):", file.path().display());
    assert!(
        parsed.errors[0].to_string().starts_with(&expected_prefix),
        "{}",
        parsed.errors[0]
    );
}

#[test]
fn test_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let parsed = read_file(dir.path().join("missing.info"));
    assert!(parsed.root.is_none());
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].kind, ErrorKind::Io);
    assert!(parsed.errors[0].message.starts_with("unable to open file"));
}
