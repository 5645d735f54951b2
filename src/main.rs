use clap::value_parser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::IsTerminal;
use std::path::Path;
use tracing::{debug, Level};

use chordpro::formatting::Identity;
use chordpro::language::NotationSystem;
use chordpro::parsing::{self, Options, Parsed};
use chordpro::rendering::{self, Terminal};
use chordpro::templating::{self, Html, Json};

mod output;
mod problem;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("chordpro")
        .version(VERSION)
        .propagate_version(true)
        .about("Compile songs written in ChordPro notation.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging on standard error."),
        )
        .subcommand(
            Command::new("check")
                .about("Compile the given song and report any problems")
                .arg(
                    Arg::new("verbose")
                        .short('v')
                        .long("verbose")
                        .action(ArgAction::SetTrue)
                        .help("Show the offending line of source alongside each problem."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the song you want to check, or '-' for standard input."),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Compile the given song and render it for reading or printing")
                .arg(
                    Arg::new("raw-control-chars")
                        .short('R')
                        .long("raw-control-chars")
                        .action(ArgAction::SetTrue)
                        .help("Emit ANSI escape codes for highlighting even if output is redirected to a pipe or file."),
                )
                .arg(
                    Arg::new("transpose")
                        .short('t')
                        .long("transpose")
                        .value_parser(value_parser!(i32))
                        .allow_negative_numbers(true)
                        .default_value("0")
                        .help("Number of semitones to transpose every chord by, in addition to any transpose directive."),
                )
                .arg(
                    Arg::new("system")
                        .short('s')
                        .long("system")
                        .value_parser(["common", "nashville", "roman", "solfege"])
                        .default_value("common")
                        .help("Notation system the chords are written in."),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_parser(["text", "html", "json"])
                        .default_value("text")
                        .help("Format to render the song into."),
                )
                .arg(
                    Arg::new("width")
                        .short('w')
                        .long("width")
                        .value_parser(value_parser!(u8).range(20..))
                        .default_value("78")
                        .help("Column at which text output wraps long lines."),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Write the output to this file rather than to standard output."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the song you want to render, or '-' for standard input."),
                ),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let code = match matches.subcommand() {
        Some(("check", submatches)) => check(submatches),
        Some(("render", submatches)) => render(submatches),
        Some(_) => {
            println!("No valid subcommand was used");
            1
        }
        None => {
            println!("usage: chordpro [COMMAND] ...");
            println!("Try '--help' for more information.");
            0
        }
    };

    std::process::exit(code);
}

fn check(submatches: &ArgMatches) -> i32 {
    let verbose = submatches.get_flag("verbose");
    let filename = match submatches.get_one::<String>("filename") {
        Some(filename) => Path::new(filename),
        None => return 1,
    };

    debug!(?filename);

    let content = match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            return 1;
        }
    };

    let parsed = parsing::parse(&content);
    report(&parsed, filename, &content, verbose);

    if parsed.is_success() {
        0
    } else {
        1
    }
}

fn render(submatches: &ArgMatches) -> i32 {
    let filename = match submatches.get_one::<String>("filename") {
        Some(filename) => Path::new(filename),
        None => return 1,
    };

    let options = Options {
        system: submatches
            .get_one::<String>("system")
            .and_then(|system| {
                system
                    .parse::<NotationSystem>()
                    .ok()
            })
            .unwrap_or_default(),
        transpose: submatches
            .get_one::<i32>("transpose")
            .copied()
            .unwrap_or(0),
    };
    let width = submatches
        .get_one::<u8>("width")
        .copied()
        .unwrap_or(78);
    let target = submatches
        .get_one::<String>("to")
        .map(Path::new);

    debug!(?filename, ?options, width);

    let content = match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            return 1;
        }
    };

    let parsed = parsing::parse_with(&content, &options);
    report(&parsed, filename, &content, false);

    let document = &parsed.document;

    let result = match submatches
        .get_one::<String>("output")
        .map(String::as_str)
    {
        Some("html") => templating::fill(&Html, document),
        Some("json") => templating::fill(&Json, document),
        _ => {
            let colour = submatches.get_flag("raw-control-chars")
                || (target.is_none()
                    && std::io::stdout()
                        .is_terminal());
            if colour {
                Ok(rendering::render(&Terminal, document, width))
            } else {
                Ok(rendering::render(&Identity, document, width))
            }
        }
    };

    let rendered = match result {
        Ok(rendered) => rendered,
        Err(error) => {
            eprintln!("{}", problem::concise_rendering_error(&error));
            return 1;
        }
    };

    if let Err(error) = output::emit(&rendered, target) {
        debug!(?error);
        eprintln!("error: Failed writing output: {}", error);
        return 1;
    }

    if parsed.is_success() {
        0
    } else {
        1
    }
}

/// Print diagnostics to standard error, warnings and errors alike.
fn report(parsed: &Parsed, filename: &Path, content: &str, verbose: bool) {
    for diagnostic in &parsed.diagnostics {
        if verbose {
            eprintln!(
                "{}\n",
                problem::full_diagnostic(diagnostic, filename, content)
            );
        } else {
            eprintln!("{}", problem::concise_diagnostic(diagnostic, filename));
        }
    }
}
