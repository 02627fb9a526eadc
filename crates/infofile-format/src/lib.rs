//! Printer for infofile node trees.
//!
//! [`format_node`] writes a [`Node`] tree back out as infofile text. Parsing
//! the output yields a tree equal to the one that was written.

use infofile_parse::Node;
use tracing::trace;

mod options;
mod scalar;
mod writer;

pub use options::{FormatOptions, Separator};
pub use scalar::{can_be_bare, can_be_verbatim, escape_quoted, scalar, write_scalar};
pub use writer::InfoWriter;

/// Format a node tree as a document.
pub fn format_node(root: &Node, options: &FormatOptions) -> String {
    trace!(children = root.children.len(), "formatting node tree");
    let mut writer = InfoWriter::with_options(options.clone());
    writer.write_root(root);
    writer.finish()
}
