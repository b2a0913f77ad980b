//! Reading scratchblocks text into scripts.

use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::database::{Database, LookupIndex};
use crate::language::{LoadingError, Script};
use crate::parsing::assembler::Assembler;
use crate::parsing::parser::Parser;

mod assembler;
mod context;
pub mod parser;
mod resolver;
pub mod tokenizer;

pub use context::ParseContext;
pub use resolver::resolve;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Treat the whole input as a single line.
    pub inline: bool,
    /// Translations to recognise in addition to the base language, by
    /// code. Where two languages spell different blocks the same way,
    /// the later one wins.
    pub languages: Vec<String>,
    pub separator: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            inline: false,
            languages: vec!["en".to_string()],
            separator: "\n".to_string(),
        }
    }
}

/// Read a file and return an owned String. A filename of `-` reads
/// standard input instead.
pub fn load(filename: &Path) -> Result<String, LoadingError> {
    let result = if filename.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map(|_| content)
    } else {
        std::fs::read_to_string(filename)
    };

    match result {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename: filename.to_path_buf(),
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename: filename.to_path_buf(),
                }),
            }
        }
    }
}

/// Parse scratchblocks text into a list of scripts. This never fails;
/// text which isn't recognised is kept as obsolete blocks.
pub fn parse(database: &Database, code: &str, options: &ParseOptions) -> Vec<Script> {
    let index = LookupIndex::build(database, &options.languages);
    let mut parser = Parser::new(&index);
    let mut assembler = Assembler::new();

    let code = if options.inline {
        code.replace(['\r', '\n'], "")
    } else {
        code.to_string()
    };

    let separator = if options
        .separator
        .is_empty()
    {
        "\n"
    } else {
        options
            .separator
            .as_str()
    };

    for line in code
        .trim()
        .split(separator)
    {
        let line = line.trim();
        if line.is_empty() {
            assembler.blank();
            continue;
        }
        assembler.push(parser.parse_line(line));
    }

    let mut scripts = assembler.finish();
    let context = parser.into_context();
    resolve(&mut scripts, &context);

    debug!(
        "Found {} script{}",
        scripts.len(),
        if scripts.len() == 1 { "" } else { "s" }
    );

    scripts
}
