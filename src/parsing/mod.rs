//! Compiler from ChordPro source to a Document

use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::language::LoadingError;

macro_rules! regex {
    ($pattern:expr) => {{
        use std::sync::OnceLock;
        static REGEX: OnceLock<regex::Regex> = OnceLock::new();
        REGEX.get_or_init(|| regex::Regex::new($pattern).unwrap_or_else(|e| panic!("{}", e)))
    }};
}

pub mod chords;
pub mod lexer;
pub mod parser;
mod state;

pub use parser::{Options, Parsed, Parser, ParsingError};

/// Read a file and return an owned String. A filename of "-" reads from
/// standard input instead.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    if filename.as_os_str() == "-" {
        let mut content = String::new();
        return match std::io::stdin().read_to_string(&mut content) {
            Ok(_) => Ok(content),
            Err(error) => {
                debug!(?error);
                Err(LoadingError {
                    problem: "Failed reading standard input".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                })
            }
        };
    }

    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Compile text into a Document using the default options.
pub fn parse(content: &str) -> Parsed {
    parse_with(content, &Options::default())
}

/// Compile text into a Document. This never fails outright; problems are
/// reported in the diagnostics alongside whatever could be built.
pub fn parse_with(content: &str, options: &Options) -> Parsed {
    let content = lexer::normalize(content);
    let tokens = lexer::tokenize(&content);
    debug!(
        "Scanned {} token{}",
        tokens.len(),
        if tokens.len() == 1 { "" } else { "s" }
    );

    let parsed = Parser::new(tokens, *options).parse();

    let lines = parsed
        .document
        .song_lines()
        .count();
    debug!(
        "Found {} song line{} and {} distinct chord{}",
        lines,
        if lines == 1 { "" } else { "s" },
        parsed
            .document
            .chords
            .len(),
        if parsed
            .document
            .chords
            .len()
            == 1
        {
            ""
        } else {
            "s"
        }
    );

    if !parsed.is_success() {
        debug!(
            "errors: {}",
            parsed
                .errors()
                .count()
        );
    }

    parsed
}
