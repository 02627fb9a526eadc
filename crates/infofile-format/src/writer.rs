//! Node tree writer.
//!
//! Writes a [`Node`] tree as infofile text that parses back to an equal tree.

use infofile_parse::Node;

use crate::options::FormatOptions;
use crate::scalar::write_scalar;

/// Writes nodes as infofile text.
///
/// Structs go one member per line, each followed by the separator. Arrays of
/// plain values stay on one line unless the options say otherwise.
pub struct InfoWriter {
    out: String,
    options: FormatOptions,
    depth: usize,
}

impl InfoWriter {
    /// Create a new writer with default options.
    pub fn new() -> Self {
        Self::with_options(FormatOptions::default())
    }

    /// Create a new writer with the given options.
    pub fn with_options(options: FormatOptions) -> Self {
        Self {
            out: String::new(),
            options,
            depth: 0,
        }
    }

    /// Consume the writer and return the output.
    pub fn finish(self) -> String {
        self.out
    }

    /// Write `root` as a whole document.
    ///
    /// A root with a name or value is written as a single member. An unnamed
    /// root is written as its body; several struct members go without braces
    /// as long as the first one cannot be mistaken for a body.
    pub fn write_root(&mut self, root: &Node) {
        if !root.name.is_empty() || !root.value.is_empty() {
            self.write_member(root);
        } else if root.children.is_empty() {
            // the empty document
            return;
        } else if root.children.len() > 1
            && !is_array_form(&root.children)
            && starts_with_scalar(&root.children[0])
        {
            for (i, child) in root.children.iter().enumerate() {
                if i > 0 {
                    self.write_newline_indent();
                }
                self.write_member(child);
                self.out.push_str(self.options.separator.as_str());
            }
        } else {
            self.write_body(&root.children);
        }
        self.out.push_str(&self.options.newline);
    }

    /// Write `name value {children}`, leaving out what the node does not
    /// have. No separator is written.
    pub fn write_member(&mut self, node: &Node) {
        let has_children = !node.children.is_empty();
        let mut wrote = false;

        if !node.name.is_empty() {
            write_scalar(&mut self.out, &node.name);
            wrote = true;
            if node.value.is_empty() && !has_children {
                // a lone name would read back as a value
                self.out.push_str(" \"\"");
                return;
            }
        } else if !node.value.is_empty() && has_children {
            // a value is only followed by a body after a name
            self.out.push_str("\"\"");
            wrote = true;
        }

        if !node.value.is_empty() {
            if wrote {
                self.out.push(' ');
            }
            write_scalar(&mut self.out, &node.value);
            wrote = true;
        }

        if has_children || !wrote {
            if wrote {
                self.out.push(' ');
            }
            self.write_body(&node.children);
        }
    }

    /// Write children as `[...]` when they can all be array values,
    /// otherwise as `{...}`.
    pub fn write_body(&mut self, children: &[Node]) {
        if is_array_form(children) {
            self.write_array(children);
        } else {
            self.write_struct(children);
        }
    }

    fn write_struct(&mut self, members: &[Node]) {
        if members.is_empty() {
            self.out.push_str("{}");
            return;
        }

        self.out.push('{');
        self.depth += 1;
        for member in members {
            self.write_newline_indent();
            self.write_member(member);
            self.out.push_str(self.options.separator.as_str());
        }
        self.depth -= 1;
        self.write_newline_indent();
        self.out.push('}');
    }

    fn write_array(&mut self, values: &[Node]) {
        let plain = values.iter().all(Node::is_leaf);
        if plain && self.options.inline_arrays {
            self.out.push('[');
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(self.options.separator.as_str());
                    self.out.push(' ');
                }
                write_scalar(&mut self.out, &value.value);
            }
            self.out.push(']');
            return;
        }

        self.out.push('[');
        self.depth += 1;
        for value in values {
            self.write_newline_indent();
            if value.is_leaf() {
                write_scalar(&mut self.out, &value.value);
            } else {
                self.write_body(&value.children);
            }
            self.out.push_str(self.options.separator.as_str());
        }
        self.depth -= 1;
        self.write_newline_indent();
        self.out.push(']');
    }

    fn write_newline_indent(&mut self) {
        self.out.push_str(&self.options.newline);
        for _ in 0..self.depth {
            self.out.push_str(&self.options.indent);
        }
    }
}

impl Default for InfoWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether every child reads back from array syntax: unnamed, and either a
/// value or a body but not both.
fn is_array_form(children: &[Node]) -> bool {
    !children.is_empty()
        && children
            .iter()
            .all(|c| c.name.is_empty() && (c.value.is_empty() || c.children.is_empty()))
}

/// Whether the member is written starting with a name or value rather than
/// a body.
fn starts_with_scalar(node: &Node) -> bool {
    !node.name.is_empty() || !node.value.is_empty()
}
