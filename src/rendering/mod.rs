//! Output of a compiled song as plain or highlighted text

use crate::formatting::*;
use crate::language::*;

mod terminal;

pub use terminal::Terminal;

/// We do the song layout in two passes. First we convert from the Document
/// into a Vec of "fragments" (Syntax tag, String pairs). Then second we apply
/// the specified renderer to each pair to result in an embellished String.
pub fn render(renderer: &impl Render, document: &Document, width: u8) -> String {
    // Pass 1: lay out the Document as tagged fragments
    let fragments = formatter::format_song(document, width);

    // Pass 2: render tagged fragments to final output
    render_to_string(renderer, fragments)
}

/// Pass 2: apply markup to fragments via style() and combine.
fn render_to_string(renderer: &impl Render, fragments: Vec<(Syntax, String)>) -> String {
    let mut output = String::new();

    for (syntax, content) in fragments {
        let rendered = renderer.style(syntax, &content);
        output.push_str(&rendered);
    }

    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn fragments_are_concatenated() {
        let fragments = vec![
            (Syntax::Chord, "G".to_string()),
            (Syntax::Newline, "\n".to_string()),
            (Syntax::Lyric, "Hello".to_string()),
        ];
        assert_eq!(render_to_string(&Identity, fragments), "G\nHello\n");
    }

    #[test]
    fn empty_document() {
        let document = Document::default();
        assert_eq!(render(&Identity, &document, 78), "");
    }
}
