use chordpro::language::{Diagnostic, LoadingError, RenderingError, Severity};
use owo_colors::OwoColorize;
use std::path::Path;

fn severity(diagnostic: &Diagnostic) -> String {
    match diagnostic.severity {
        Severity::Error => "error"
            .bright_red()
            .to_string(),
        Severity::Warning => "warning"
            .bright_yellow()
            .to_string(),
    }
}

/// Format a diagnostic with full details including the offending line of
/// source, and a caret under the column if one is known.
pub fn full_diagnostic<'i>(diagnostic: &Diagnostic, filename: &'i Path, source: &'i str) -> String {
    let line = diagnostic.line;
    let code = source
        .lines()
        .nth(line.saturating_sub(1))
        .unwrap_or("?");
    let width = 3.max(
        line.to_string()
            .len(),
    );

    let location = match diagnostic.column {
        Some(column) => format!("{}:{}:{}", filename.to_string_lossy(), line, column),
        None => format!("{}:{}", filename.to_string_lossy(), line),
    };

    let caret = match diagnostic.column {
        Some(column) => format!(
            "\n{:width$} {} {:>column$}",
            ' ',
            '|'.bright_blue(),
            '^'.bright_red()
        ),
        None => String::new(),
    };

    format!(
        r#"
{}: {} {}

{:width$} {}
{:width$} {} {}{}
        "#,
        severity(diagnostic),
        location,
        diagnostic
            .message
            .bold(),
        ' ',
        '|'.bright_blue(),
        line.bright_blue(),
        '|'.bright_blue(),
        code,
        caret,
    )
    .trim_ascii()
    .to_string()
}

/// Format a diagnostic with concise single-line output
pub fn concise_diagnostic<'i>(diagnostic: &Diagnostic, filename: &'i Path) -> String {
    let location = match diagnostic.column {
        Some(column) => format!("{}:{}:{}", filename.to_string_lossy(), diagnostic.line, column),
        None => format!("{}:{}", filename.to_string_lossy(), diagnostic.line),
    };

    format!(
        "{}: {} {}",
        severity(diagnostic),
        location,
        diagnostic
            .message
            .bold(),
    )
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error<'i>(error: &LoadingError<'i>) -> String {
    let mut result = format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .problem
            .bold()
    );
    if !error
        .details
        .is_empty()
    {
        result.push_str(&format!(" ({})", error.details));
    }
    result
}

/// Format a RenderingError with concise single-line output
pub fn concise_rendering_error(error: &RenderingError) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .problem
            .bold(),
        error.details
    )
}
