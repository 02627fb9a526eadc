//! infofile CLI tool
//!
//! Usage:
//!   infofile config.info              - check and print the formatted document
//!   infofile -                        - read from stdin
//!   infofile config.info --check      - only report errors
//!   infofile config.info --json       - print the tree as JSON

use std::io::{self, Read};

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use infofile_format::{FormatOptions, Separator, format_node};
use infofile_tree::{Diagnostic, Node};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const EXIT_SUCCESS: i32 = 0;
const EXIT_SYNTAX_ERROR: i32 = 1;
const EXIT_IO_ERROR: i32 = 3;

fn cli() -> Command {
    Command::new("infofile")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Check and format infofile documents")
        .arg(
            Arg::new("input")
                .help("Input file, or '-' for stdin")
                .value_name("FILE")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Only report errors, print nothing on success")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the parsed tree as JSON")
                .action(ArgAction::SetTrue)
                .conflicts_with("check"),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .help("Spaces per indentation level")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .default_value("2"),
        )
        .arg(
            Arg::new("comma")
                .long("comma")
                .help("Separate members with ',' instead of ';'")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let matches = cli().get_matches();
    match run(&matches) {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let input = matches
        .get_one::<String>("input")
        .map(String::as_str)
        .unwrap_or("-");
    let (name, source) = read_input(input)?;

    let parsed = infofile_tree::parse_bytes(&name, &source);
    debug!(input = %name, errors = parsed.errors.len(), "parsed input");

    let mut stderr = io::stderr().lock();
    for error in &parsed.errors {
        error.write_report(&source, &mut stderr)?;
    }
    drop(stderr);

    let error_count = parsed.errors.len();
    let root = match parsed.into_result() {
        Ok(root) => root,
        Err(failure) => {
            return Err(CliError::Syntax {
                count: error_count.max(1),
                summary: failure.to_string(),
            });
        }
    };

    if matches.get_flag("check") {
        return Ok(());
    }

    let output = if matches.get_flag("json") {
        to_json(&root)?
    } else {
        format_node(&root, &format_options(matches))
    };
    print!("{output}");
    Ok(())
}

fn format_options(matches: &ArgMatches) -> FormatOptions {
    let indent = matches.get_one::<usize>("indent").copied().unwrap_or(2);
    let mut options = FormatOptions::new().indent(" ".repeat(indent));
    if matches.get_flag("comma") {
        options = options.separator(Separator::Comma);
    }
    options
}

fn to_json(root: &Node) -> Result<String, CliError> {
    let mut json = serde_json::to_string_pretty(root).map_err(|e| CliError::Io(e.into()))?;
    json.push('\n');
    Ok(json)
}

/// Read the whole input, returning the name used in diagnostics and the bytes.
fn read_input(input: &str) -> Result<(String, Vec<u8>), CliError> {
    if input == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(("<stdin>".to_string(), buf))
    } else {
        let bytes = std::fs::read(input).map_err(|e| CliError::Open {
            path: input.to_string(),
            source: e,
        })?;
        Ok((input.to_string(), bytes))
    }
}

// ============================================================================
// Error handling
// ============================================================================

#[derive(Debug)]
enum CliError {
    Io(io::Error),
    Open { path: String, source: io::Error },
    Syntax { count: usize, summary: String },
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Io(_) | CliError::Open { .. } => EXIT_IO_ERROR,
            CliError::Syntax { .. } => EXIT_SYNTAX_ERROR,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "{e}"),
            CliError::Open { path, source } => write!(f, "unable to read {path}: {source}"),
            CliError::Syntax { count: 1, summary } => write!(f, "{summary}"),
            CliError::Syntax { count, .. } => write!(f, "{count} errors"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) | CliError::Open { source: e, .. } => Some(e),
            CliError::Syntax { .. } => None,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
