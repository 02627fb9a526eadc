//! Diagnostic rendering for parse errors.

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use infofile_parse::{ErrorKind, ParseError};

/// Get ariadne config, respecting NO_COLOR env var.
fn ariadne_config() -> Config {
    let config = Config::default().with_index_type(IndexType::Byte);
    if std::env::var("NO_COLOR").is_ok() {
        config.with_color(false)
    } else {
        config
    }
}

/// Rendering of errors against the source they were reported for.
pub trait Diagnostic {
    /// Render this error with ariadne.
    ///
    /// Returns the formatted report with source context.
    fn render(&self, source: &[u8]) -> String;

    /// Write the error report to a writer.
    fn write_report<W: std::io::Write>(&self, source: &[u8], writer: W) -> std::io::Result<()>;
}

impl Diagnostic for ParseError {
    fn render(&self, source: &[u8]) -> String {
        let mut output = Vec::new();
        if self.write_report(source, &mut output).is_err() {
            return self.to_string();
        }
        String::from_utf8(output).unwrap_or_else(|_| self.to_string())
    }

    fn write_report<W: std::io::Write>(&self, source: &[u8], writer: W) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(source);
        let name = self.source_name.as_str();
        let range = self.position.range(text.len());

        let mut report = Report::build(ReportKind::Error, (name, range.clone()))
            .with_config(ariadne_config())
            .with_message(self.kind.title())
            .with_label(
                Label::new((name, range))
                    .with_message(&self.message)
                    .with_color(Color::Red),
            );
        if let Some(help) = help(self.kind) {
            report = report.with_help(help);
        }

        report.finish().write((name, Source::from(text)), writer)
    }
}

fn help(kind: ErrorKind) -> Option<&'static str> {
    match kind {
        ErrorKind::UnterminatedLiteral => Some(
            "quoted strings end on the line they start on; use \"\"\"...\"\"\" or a heredoc for longer text",
        ),
        ErrorKind::InvalidEscape => Some(r#"valid escapes are: \n, \t, \0, \" and \'"#),
        ErrorKind::InvalidColorLength => Some("colors are written #RGB or #RRGGBB"),
        ErrorKind::InvalidHeredoc => {
            Some("heredocs start with <<NAME and end at the first line that begins with NAME")
        }
        ErrorKind::UnexpectedEndOfFile => Some("every `{` needs a `}` and every `[` a `]`"),
        ErrorKind::InvalidNumber
        | ErrorKind::UnexpectedToken
        | ErrorKind::UnknownCharacter
        | ErrorKind::Io => None,
    }
}
