//! Formatting options for infofile output.

/// Token written after each struct member and between inline array values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    /// `;`
    #[default]
    Semicolon,
    /// `,`
    Comma,
}

impl Separator {
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Semicolon => ";",
            Separator::Comma => ",",
        }
    }
}

/// Options for infofile output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Indentation string (default: "  " - 2 spaces)
    pub indent: String,

    /// Line break (default: "\n")
    pub newline: String,

    /// Member separator (default: `;`)
    pub separator: Separator,

    /// Write arrays of plain values on one line (default: true)
    pub inline_arrays: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            newline: "\n".to_string(),
            separator: Separator::Semicolon,
            inline_arrays: true,
        }
    }
}

impl FormatOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom indentation string.
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Set the line break, e.g. `"\r\n"`.
    pub fn newline(mut self, newline: impl Into<String>) -> Self {
        self.newline = newline.into();
        self
    }

    pub fn separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    /// Put every array value on its own line.
    pub fn multiline_arrays(mut self) -> Self {
        self.inline_arrays = false;
        self
    }
}
