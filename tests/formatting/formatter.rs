#[cfg(test)]
mod verify {
    use chordpro::formatting::*;
    use chordpro::parsing::{self, Options};
    use chordpro::rendering::{render, Terminal};

    fn trim(text: &str) -> &str {
        text.strip_prefix('\n')
            .unwrap_or(text)
    }

    fn combine(fragments: Vec<(Syntax, String)>) -> String {
        let mut result = String::new();
        for fragment in fragments {
            result.push_str(&fragment.1);
        }
        result
    }

    fn text(source: &str, width: u8) -> String {
        let parsed = parsing::parse(source);
        render(&Identity, &parsed.document, width)
    }

    #[test]
    fn header_and_song_line() {
        let result = text(
            trim(
                r#"
{title: Amazing Grace}
{artist: John Newton}
{key: G}

[G]Amazing [G7]grace, how [C]sweet the [G]sound
"#,
            ),
            78,
        );

        assert_eq!(
            result,
            trim(
                r#"
Amazing Grace
Artist: John Newton  Key: G

G       G7         C         G
Amazing grace, how sweet the sound
"#
            )
        );
    }

    #[test]
    fn header_details() {
        let result = text(
            "{title: T}\n{subtitle: S}\n{capo: 3}\n{copyright: 2001 Someone}\n",
            78,
        );
        assert_eq!(result, "T\nS\nCapo: 3\n© 2001 Someone\n");
    }

    #[test]
    fn chorus_and_recall() {
        let result = text("{soc}\n[C]Glory\n{eoc}\n\n{chorus}\n", 78);
        assert_eq!(result, "Chorus\nC\nGlory\n\nChorus\nC\n");
    }

    #[test]
    fn long_lines_wrap_between_chords() {
        let result = text("[C]one two three [G]four five six [D]seven\n", 20);
        assert_eq!(
            result,
            trim(
                r#"
C
one two three
G             D
four five six seven
"#
            )
        );
    }

    #[test]
    fn boxed_comments_and_tabs() {
        let result = text("{cb: Slowly}\n{sot}\ne|---0---|\n{eot}\n", 78);
        assert_eq!(
            result,
            trim(
                r#"
+--------+
| Slowly |
+--------+

Tab
e|---0---|
"#
            )
        );
    }

    #[test]
    fn definitions_are_drawn() {
        let result = text("{title: T}\n{define: D base-fret 1 frets x x 0 2 3 2}\n", 78);
        assert_eq!(
            result,
            trim(
                r#"
T

D
┌─┬─┬─┬─┐
e | 2
B | 3
G | 2
D | 0
A | x
E | x
├─┼─┼─┼─┤
"#
            )
        );
    }

    #[test]
    fn transposed_chords_are_displayed() {
        let options = Options {
            transpose: 2,
            ..Options::default()
        };
        let parsed = parsing::parse_with("[C]Hello [Am]there\n", &options);
        let result = render(&Identity, &parsed.document, 78);
        assert_eq!(result, "D     Bm\nHello there\n");
    }

    #[test]
    fn chords_without_lyrics() {
        let result = text("[G] [C]\n", 78);
        assert_eq!(result, "G C\n");
    }

    #[test]
    fn page_breaks() {
        let result = text("One\n{np}\nTwo\n", 20);
        assert_eq!(result, "One\n\n--------------------\n\nTwo\n");
    }

    #[test]
    fn unparsed_chords_show_as_written() {
        let result = text("[Xyz]La la\n", 78);
        assert_eq!(result, "Xyz\nLa la\n");
    }

    #[test]
    fn fragments_are_tagged() {
        let parsed = parsing::parse("[Am]Hi\n");
        let fragments = formatter::format_song(&parsed.document, 78);

        assert!(fragments.contains(&(Syntax::Chord, "Am".to_string())));
        assert!(fragments.contains(&(Syntax::Lyric, "Hi".to_string())));
        assert_eq!(combine(fragments), "Am\nHi\n");
    }

    #[test]
    fn terminal_output_is_coloured() {
        let parsed = parsing::parse("[Am]Hi\n");
        let result = render(&Terminal, &parsed.document, 78);
        assert!(result.contains("\u{1b}["));
        assert!(result.contains("Am"));
        assert!(result.contains("Hi"));
    }
}
