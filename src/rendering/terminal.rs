//! Renderer for colourizing songs on a terminal

use crate::formatting::*;
use owo_colors::OwoColorize;

/// Embellish fragments with ANSI escapes to highlight chords, headings, and
/// comments in terminal output.
pub struct Terminal;

impl Render for Terminal {
    fn style(&self, syntax: Syntax, content: &str) -> String {
        match syntax {
            Syntax::Neutral => content.to_string(),
            Syntax::Indent => content.to_string(),
            Syntax::Newline => "\n".to_string(),
            Syntax::Title => content // heading - #000000 bold
                .bright_white()
                .bold()
                .to_string(),
            Syntax::Subtitle => content
                .bright_white()
                .to_string(),
            Syntax::Label => content // label - #60989a (teal) bold
                .color(owo_colors::Rgb(0x60, 0x98, 0x9a))
                .bold()
                .to_string(),
            Syntax::Metadata => content.to_string(),
            Syntax::Section => content // section heading - #75507b (purple) bold
                .color(owo_colors::Rgb(0x75, 0x50, 0x7b))
                .bold()
                .to_string(),
            Syntax::Chord => content // chord - #3465a4 (blue) bold
                .color(owo_colors::Rgb(0x34, 0x65, 0xa4))
                .bold()
                .to_string(),
            Syntax::Lyric => content.to_string(),
            Syntax::Comment => content // comment - #4e9a06 (green)
                .color(owo_colors::Rgb(0x4e, 0x9a, 0x06))
                .to_string(),
            Syntax::Italic => content
                .color(owo_colors::Rgb(0x4e, 0x9a, 0x06))
                .italic()
                .to_string(),
            Syntax::Boxed => content
                .color(owo_colors::Rgb(0x4e, 0x9a, 0x06))
                .bold()
                .to_string(),
            Syntax::Tab => content // tablature - #c4a000 (yellow)
                .color(owo_colors::Rgb(0xc4, 0xa0, 0x00))
                .to_string(),
            Syntax::Bar => content // bar lines - #cc0000 (red) bold
                .color(owo_colors::Rgb(204, 0, 0))
                .bold()
                .to_string(),
            Syntax::Diagram => content // fingering charts - #8f5902 (brown)
                .color(owo_colors::Rgb(0x8f, 0x59, 0x02))
                .to_string(),
            Syntax::Structure => content
                .color(owo_colors::Rgb(153, 153, 153))
                .bold()
                .to_string(),
        }
    }
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn basic_handling() {
        let result = Render::style(&Terminal, Syntax::Neutral, "hello world");
        assert_eq!(result, "hello world");

        let result = Render::style(&Terminal, Syntax::Chord, "Am7");
        assert!(result.contains("Am7"));
        assert!(result.contains('\u{1b}'));
    }
}
