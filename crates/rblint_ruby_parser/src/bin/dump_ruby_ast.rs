//! Print the tree-sitter syntax tree of a Ruby file as an S-expression.

use std::process::ExitCode;

use rblint_ruby_parser::RubyParser;

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: dump_ruby_ast <file.rb>");
        return ExitCode::FAILURE;
    };

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let result = RubyParser::new().and_then(|mut parser| parser.parse(&source));
    match result {
        Ok(result) => {
            println!("{}", result.tree.root_node().to_sexp());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{path}: {err}");
            ExitCode::FAILURE
        }
    }
}
