use std::io::Read;

use infofile_parse::{Cursor, Lexer, Parser, SliceSource};

fn main() {
    let mut source = Vec::new();
    std::io::stdin().read_to_end(&mut source).unwrap();

    println!("=== Tokens ===");
    let mut errors = Vec::new();
    for token in Lexer::new(Cursor::new("stdin", SliceSource::new(&source)), &mut errors) {
        println!("{:?}", token);
    }

    println!("\n=== Tree ===");
    let mut parse_errors = Vec::new();
    let lexer = Lexer::new(Cursor::new("stdin", SliceSource::new(&source)), &mut parse_errors);
    println!("{:#?}", Parser::new(lexer).read_root());

    for error in &parse_errors {
        eprintln!("{error}");
    }
}
