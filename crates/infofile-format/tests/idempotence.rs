//! Formatting a tree and parsing the output gives back the same tree.

use infofile_format::{FormatOptions, Separator, format_node};
use infofile_parse::Node;
use proptest::prelude::*;

fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z_][a-z0-9_.]{0,6}",
        "-?[0-9]{1,4}(\\.[0-9]{1,2})?",
        "[a-zA-Z0-9 \\\\\"'@#+;,=:{}<>/*\\-\\r\\n\\t\\x00ナㄅ]{0,10}",
    ]
}

fn node() -> impl Strategy<Value = Node> {
    let leaf = (text(), text()).prop_map(|(name, value)| Node::with_value(name, value));
    leaf.prop_recursive(4, 32, 4, |inner| {
        (text(), text(), prop::collection::vec(inner, 0..4)).prop_map(
            |(name, value, children)| Node {
                name,
                value,
                children,
            },
        )
    })
}

fn options() -> impl Strategy<Value = FormatOptions> {
    (any::<bool>(), any::<bool>(), prop_oneof![Just("  "), Just("\t")]).prop_map(
        |(comma, inline_arrays, indent)| {
            let mut options = FormatOptions::new().indent(indent);
            if comma {
                options = options.separator(Separator::Comma);
            }
            if !inline_arrays {
                options = options.multiline_arrays();
            }
            options
        },
    )
}

proptest! {
    #[test]
    fn formatted_tree_parses_back(root in node(), options in options()) {
        let output = format_node(&root, &options);
        let parsed = infofile_tree::parse("formatted", &output);
        prop_assert!(parsed.is_clean(), "errors {:?} in {:?}", parsed.errors, output);
        prop_assert_eq!(parsed.root, Some(root), "output was {:?}", output);
    }

    #[test]
    fn formatting_is_stable(root in node()) {
        let options = FormatOptions::default();
        let first = format_node(&root, &options);
        let reparsed = infofile_tree::parse("formatted", &first).into_result();
        prop_assert!(reparsed.is_ok());
        if let Ok(reparsed) = reparsed {
            prop_assert_eq!(format_node(&reparsed, &options), first);
        }
    }
}

#[test]
fn parsed_document_survives_formatting() {
    let source = r#"
server {
    host = localhost;
    ports [80, 443];
    tls : on := {
        cert @"C:\certs\server.pem";
    }
    banner <<EOT
Welcome!
  Be "nice".
EOT
}
empty {}
"#;
    let root = infofile_tree::parse("inline", source).into_result().unwrap();
    let output = format_node(&root, &FormatOptions::default());
    let reparsed = infofile_tree::parse("formatted", &output).into_result().unwrap();
    assert_eq!(reparsed, root);
}
