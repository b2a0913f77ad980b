use clap::value_parser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::debug;

use scratchblocks::database::{self, Database};
use scratchblocks::formatting::Identity;
use scratchblocks::language::{Category, Script};
use scratchblocks::parsing::{self, ParseOptions};
use scratchblocks::rendering::{self, Terminal};

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("scratchblocks")
        .version(VERSION)
        .propagate_version(true)
        .about("Parse scratchblocks notation for Scratch programs.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("language")
                .long("language")
                .value_name("CODE")
                .global(true)
                .action(ArgAction::Append)
                .help("Recognise block text in this language as well as English. Can be given more than once; later languages win where two spell a block the same way."),
        )
        .arg(
            Arg::new("translations")
                .long("translations")
                .value_name("FILE")
                .global(true)
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .help("Load a translation pack from a JSON file. Its language is recognised automatically."),
        )
        .arg(
            Arg::new("inline")
                .long("inline")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Treat the whole input as a single line."),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Write diagnostic output to standard error."),
        )
        .subcommand(
            Command::new("check")
                .about("Parse the given file and report any blocks which were not recognised")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("The file containing the scratchblocks code you want to check, or - for standard input."),
                ),
        )
        .subcommand(
            Command::new("format")
                .about("Write the given file back out as canonical scratchblocks code")
                .arg(
                    Arg::new("raw-control-chars")
                        .short('R')
                        .long("raw-control-chars")
                        .action(ArgAction::SetTrue)
                        .help("Emit ANSI escape codes for syntax highlighting even if output is redirected to a pipe or file."),
                )
                .arg(
                    Arg::new("annotate")
                        .long("annotate")
                        .action(ArgAction::SetTrue)
                        .help("Follow every block with an explicit :: category override."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("The file containing the scratchblocks code you want to format, or - for standard input."),
                ),
        )
        .subcommand(
            Command::new("json")
                .about("Print the parsed scripts as JSON")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("The file containing the scratchblocks code you want to convert, or - for standard input."),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some((command, submatches)) => {
            if submatches.get_flag("debug") {
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_max_level(tracing::Level::DEBUG)
                    .init();
            }

            match execute(command, submatches) {
                Ok(status) => std::process::exit(status),
                Err(error) => {
                    eprintln!("{}: {}", "error".bright_red(), error);
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("usage: scratchblocks [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn execute(command: &str, submatches: &ArgMatches) -> Result<i32, Box<dyn std::error::Error>> {
    let mut database = Database::english()?;
    let mut languages: Vec<String> = submatches
        .get_many::<String>("language")
        .map(|values| {
            values
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    if let Some(paths) = submatches.get_many::<PathBuf>("translations") {
        for path in paths {
            let language = database::load_language(path)?;
            debug!("Loaded translation '{}' from {}", language.code, path.display());
            if !languages.contains(&language.code) {
                languages.push(
                    language
                        .code
                        .clone(),
                );
            }
            database = database.with_translation(language);
        }
    }

    let mut options = ParseOptions {
        inline: submatches.get_flag("inline"),
        ..Default::default()
    };
    if !languages.is_empty() {
        options.languages = languages;
    }

    let filename = submatches
        .get_one::<PathBuf>("filename")
        .ok_or("no filename given")?;

    let content = parsing::load(filename)?;
    let scripts = parsing::parse(&database, &content, &options);

    match command {
        "check" => Ok(check(filename, &scripts)),
        "format" => {
            let raw_output = submatches.get_flag("raw-control-chars");
            let annotate = submatches.get_flag("annotate");

            let result = if raw_output
                || std::io::stdout()
                    .lock()
                    .is_terminal()
            {
                rendering::render(&Terminal, &scripts, annotate)
            } else {
                rendering::render(&Identity, &scripts, annotate)
            };

            print!("{}", result);
            Ok(0)
        }
        "json" => {
            let result = serde_json::to_string_pretty(&scripts)?;
            println!("{}", result);
            Ok(0)
        }
        _ => Ok(0),
    }
}

/// Report unrecognised blocks on standard error. Returns the exit status.
fn check(filename: &Path, scripts: &[Script]) -> i32 {
    let mut problems = 0;

    for script in scripts {
        for block in script.blocks() {
            // free-floating inserts are wrapped as obsolete blocks too
            if block.category != Category::Obsolete || block.blockid == "_" {
                continue;
            }
            eprintln!(
                "{}: {}: unrecognised block '{}'",
                "warning".bright_yellow(),
                filename.display(),
                block.spec()
            );
            problems += 1;
        }
    }

    println!(
        "{}: {} script{}",
        filename.display(),
        scripts.len(),
        if scripts.len() == 1 { "" } else { "s" }
    );

    if problems > 0 {
        1
    } else {
        0
    }
}
