use super::*;
use crate::parsing::lexer::tokenize;

fn compile(content: &str) -> Parsed {
    compile_with(content, Options::default())
}

fn compile_with(content: &str, options: Options) -> Parsed {
    let tokens = tokenize(content);
    Parser::new(tokens, options).parse()
}

fn song_lines(parsed: &Parsed) -> Vec<&SongLine> {
    parsed
        .document
        .song_lines()
        .collect()
}

fn keys(line: &SongLine) -> Vec<Option<&str>> {
    line.chords
        .iter()
        .map(|chord| {
            chord
                .as_ref()
                .map(|chord| chord.key.as_str())
        })
        .collect()
}

#[test]
fn title_and_song_line() {
    let parsed = compile("{title: Test}\n[C]Hello [G]world");
    assert!(parsed.is_success());
    assert!(parsed
        .diagnostics
        .is_empty());

    let document = &parsed.document;
    assert_eq!(document.title, Some("Test".to_string()));
    assert_eq!(document.meta("title"), Some("Test"));

    let lines = song_lines(&parsed);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].phrases, vec!["", "Hello ", "world"]);
    assert_eq!(keys(lines[0]), vec![Some("C"), Some("G")]);
    assert_eq!(lines[0].line, Some(2));
    assert_eq!(lines[0].region, Region::Default);
}

#[test]
fn body_elements_in_order() {
    let parsed = compile("{c: Intro}\n[D]la\n\n# note to self");
    let body = &parsed
        .document
        .body;

    assert_eq!(body.len(), 6);
    assert!(matches!(
        &body[0],
        Element::Comment { style: CommentStyle::Plain, text, .. } if text == "Intro"
    ));
    assert!(matches!(body[1], Element::Blank { line: Some(1), .. }));
    assert!(matches!(body[2], Element::SongLine(_)));
    assert!(matches!(body[3], Element::Blank { line: Some(2), .. }));
    assert!(matches!(body[4], Element::Blank { line: Some(3), .. }));
    assert!(matches!(
        &body[5],
        Element::Comment { style: CommentStyle::Plain, text, line: Some(4), .. } if text == "note to self"
    ));
}

#[test]
fn phrases_and_chords_align() {
    let parsed = compile("no chords here\n[C]\nA [G]b [D]c [Em]\nx[]y");
    let lines = song_lines(&parsed);
    assert_eq!(lines.len(), 4);

    assert_eq!(lines[0].phrases, vec!["no chords here"]);
    assert!(lines[0]
        .chords
        .is_empty());

    for line in &lines[1..] {
        assert_eq!(
            line.chords
                .len(),
            line.phrases
                .len()
                - 1
        );
        assert_eq!(
            line.sources
                .len(),
            line.chords
                .len()
        );
    }

    assert_eq!(lines[2].phrases, vec!["A ", "b ", "c ", ""]);

    // empty brackets are left in the lyric
    assert_eq!(lines[3].phrases, vec!["x[]y"]);
}

#[test]
fn unparseable_chords_keep_their_text() {
    let parsed = compile("[*Coda]la [C]la");
    let lines = song_lines(&parsed);
    assert_eq!(keys(lines[0]), vec![None, Some("C")]);
    assert_eq!(lines[0].sources, vec!["*Coda", "C"]);
    assert!(parsed.is_success());

    // and they never reach the chord table
    assert_eq!(
        parsed
            .document
            .chords
            .keys()
            .collect::<Vec<_>>(),
        vec!["C"]
    );
}

#[test]
fn chord_table_keeps_first_seen() {
    let parsed = compile("[Am]one [C]two\n[A-]three [Am7]four [C/G]five");
    let document = &parsed.document;

    assert_eq!(
        document
            .chords
            .keys()
            .collect::<Vec<_>>(),
        vec!["A-", "C", "A-7"]
    );
    let first = document
        .chords
        .get("C")
        .expect("C recorded");
    assert_eq!(first.display, "C");
}

#[test]
fn transposing_by_directive() {
    let parsed = compile("{transpose: 2}\n[Am7b5]riff");
    let lines = song_lines(&parsed);
    let chord = lines[0].chords[0]
        .as_ref()
        .expect("chord");

    assert_eq!(
        chord
            .root
            .as_ref()
            .map(|root| root.pitch_class),
        Some(11)
    );
    assert_eq!(chord.display, "Bm7b5");
    assert_eq!(chord.extension.canonical, "7b5");
    assert_eq!(
        parsed
            .document
            .setting("transpose"),
        Some(&Value::Integer(2))
    );
}

#[test]
fn transposing_by_option_adds_to_directive() {
    let options = Options {
        transpose: 1,
        ..Options::default()
    };

    let parsed = compile_with("[C]a\n{transpose: 2}\n[C]b", options);
    let lines = song_lines(&parsed);
    assert_eq!(keys(lines[0]), vec![Some("C#")]);
    assert_eq!(keys(lines[1]), vec![Some("D#")]);
}

#[test]
fn extreme_transpositions() {
    let parsed = compile("{transpose: 2147483647}\n[D]x");
    assert!(parsed.is_success());
    assert_eq!(keys(song_lines(&parsed)[0]), vec![Some("A")]);
    assert_eq!(
        parsed
            .document
            .setting("transpose"),
        Some(&Value::Integer(2147483647))
    );

    let options = Options {
        transpose: 1,
        ..Options::default()
    };
    let parsed = compile_with("{transpose: 2147483647}\n[C]x", options);
    assert_eq!(keys(song_lines(&parsed)[0]), vec![Some("G#")]);

    let options = Options {
        transpose: i32::MIN,
        ..Options::default()
    };
    let parsed = compile_with("[C]x\n{transpose: -2147483648}\n[C]y", options);
    let lines = song_lines(&parsed);
    assert_eq!(keys(lines[0]), vec![Some("E")]);
    assert_eq!(keys(lines[1]), vec![Some("G#")]);
}

#[test]
fn bad_numbers_fall_back() {
    let parsed = compile("{transpose: up}\n[C]a\n{capo: none}\n{columns: many}");
    let document = &parsed.document;
    assert_eq!(keys(song_lines(&parsed)[0]), vec![Some("C")]);
    assert_eq!(document.capo, None);
    assert_eq!(document.setting("capo"), None);
    assert_eq!(document.setting("columns"), None);
    assert_eq!(document.setting("transpose"), Some(&Value::Integer(0)));
    assert!(parsed.is_success());

    let parsed = compile("{capo: 3rd fret}\n{col: 2}\n{capo: 0}");
    let document = &parsed.document;
    assert_eq!(document.capo, None);
    assert_eq!(document.setting("columns"), Some(&Value::Integer(2)));

    let parsed = compile("{capo: 3rd fret}");
    assert_eq!(
        parsed
            .document
            .capo,
        Some(3)
    );
    assert_eq!(
        parsed
            .document
            .setting("capo"),
        Some(&Value::Integer(3))
    );
}

#[test]
fn notation_system_setting() {
    let options = Options {
        system: NotationSystem::Solfege,
        ..Options::default()
    };
    let parsed = compile_with("[Do]la [Sol]la", options);
    assert_eq!(
        parsed
            .document
            .setting("gridsystem"),
        Some(&Value::Text("solfege".to_string()))
    );
    let lines = song_lines(&parsed);
    assert_eq!(keys(lines[0]), vec![Some("C"), Some("G")]);
    assert_eq!(
        lines[0].chords[0]
            .as_ref()
            .map(|chord| chord.system),
        Some(NotationSystem::Solfege)
    );
}

#[test]
fn unterminated_directive_is_silent() {
    let parsed = compile("{unclosed directive\n[C]text");
    assert!(parsed
        .diagnostics
        .is_empty());

    let lines = song_lines(&parsed);
    assert_eq!(lines.len(), 1);
    assert_eq!(keys(lines[0]), vec![Some("C")]);
}

#[test]
fn unknown_directive_warns() {
    let parsed = compile("{foo: bar}\n{Foo: baz}\n[C]x");

    assert!(parsed.is_success());
    assert_eq!(
        parsed
            .warnings()
            .count(),
        2
    );
    assert_eq!(
        parsed
            .errors()
            .count(),
        0
    );

    let warning = &parsed.diagnostics[0];
    assert_eq!(warning.line, 1);
    assert_eq!(warning.column, Some(1));
    assert_eq!(warning.message, "Unknown directive: {foo}");
    assert_eq!(warning.to_string(), "Line 1 — Unknown directive: {foo}");

    assert_eq!(
        parsed
            .document
            .meta
            .get("foo"),
        Some(&vec!["bar".to_string(), "baz".to_string()])
    );
}

#[test]
fn directive_keys_are_case_folded() {
    let parsed = compile("{TITLE : Loud }\n{St:one}\n{subtitle: two}");
    let document = &parsed.document;
    assert_eq!(document.title, Some("Loud".to_string()));
    assert_eq!(document.subtitles, vec!["one", "two"]);
    assert_eq!(
        document
            .meta
            .get("subtitle"),
        Some(&vec!["one".to_string(), "two".to_string()])
    );
    assert!(parsed
        .diagnostics
        .is_empty());
}

#[test]
fn scalar_metadata() {
    let parsed = compile(
        "{artist: A}\n{composer: B}\n{lyricist: C}\n{copyright: D}\n{album: E}\n\
         {year: 1999}\n{key: G}\n{time: 3/4}\n{tempo: 120}\n{duration: 3:20}\n{artist: Z}",
    );
    let document = &parsed.document;
    assert_eq!(document.artist, Some("Z".to_string()));
    assert_eq!(document.composer, Some("B".to_string()));
    assert_eq!(document.lyricist, Some("C".to_string()));
    assert_eq!(document.copyright, Some("D".to_string()));
    assert_eq!(document.album, Some("E".to_string()));
    assert_eq!(document.year, Some("1999".to_string()));
    assert_eq!(document.key, Some("G".to_string()));
    assert_eq!(document.time, Some("3/4".to_string()));
    assert_eq!(document.tempo, Some("120".to_string()));
    // only the first colon splits
    assert_eq!(document.duration, Some("3:20".to_string()));

    assert_eq!(
        document
            .meta
            .get("artist"),
        Some(&vec!["A".to_string(), "Z".to_string()])
    );
}

#[test]
fn meta_directive() {
    let parsed = compile("{meta: arranger Jane Doe}\n{meta: artist Someone}");
    let document = &parsed.document;
    assert_eq!(document.meta("arranger"), Some("Jane Doe"));
    assert_eq!(document.artist, Some("Someone".to_string()));
    assert!(parsed
        .diagnostics
        .is_empty());
}

#[test]
fn regions() {
    let parsed = compile(
        "{sov}\n[C]verse\n{eov}\n{start_of_chorus}\n[G]chorus\n{end_of_chorus}\n\
         {sob}\n[D]bridge\n{eob}\n[E]after",
    );
    let regions: Vec<Region> = song_lines(&parsed)
        .iter()
        .map(|line| line.region)
        .collect();
    assert_eq!(
        regions,
        vec![
            Region::Verse,
            Region::Chorus,
            Region::Bridge,
            Region::Default
        ]
    );
}

#[test]
fn tab_lines_are_verbatim() {
    let parsed = compile("{sot}\ne|--[0]--3--|\n{eot}\n[C]x");
    let body = &parsed
        .document
        .body;

    let tab: Vec<&str> = body
        .iter()
        .filter_map(|element| match element {
            Element::TabLine { text, region, .. } => {
                assert_eq!(*region, Region::Tab);
                Some(text.as_str())
            }
            _ => None,
        })
        .collect();
    assert_eq!(tab, vec!["e|--[0]--3--|"]);

    // nothing inside the tab made it into the chord table
    assert_eq!(
        parsed
            .document
            .chords
            .len(),
        1
    );
}

#[test]
fn comment_styles() {
    let parsed = compile("{c: one}\n{ci: two}\n{cb: three}\n{comment_italic: four}");
    let styles: Vec<(CommentStyle, &str)> = parsed
        .document
        .body
        .iter()
        .filter_map(|element| match element {
            Element::Comment { style, text, .. } => Some((*style, text.as_str())),
            _ => None,
        })
        .collect();
    assert_eq!(
        styles,
        vec![
            (CommentStyle::Plain, "one"),
            (CommentStyle::Italic, "two"),
            (CommentStyle::Boxed, "three"),
            (CommentStyle::Italic, "four"),
        ]
    );
}

#[test]
fn page_breaks() {
    let parsed = compile("{np}{npp}{colb}{new_page}{column_break}");
    let variants: Vec<PageBreak> = parsed
        .document
        .body
        .iter()
        .filter_map(|element| match element {
            Element::PageBreak { variant, .. } => Some(*variant),
            _ => None,
        })
        .collect();
    assert_eq!(
        variants,
        vec![
            PageBreak::NewPage,
            PageBreak::NewPhysicalPage,
            PageBreak::ColumnBreak,
            PageBreak::NewPage,
            PageBreak::ColumnBreak,
        ]
    );
}

#[test]
fn chord_definitions() {
    let parsed = compile("{define: Am base-fret 1 frets 0 0 2 2 1 0}");
    let definitions = &parsed
        .document
        .definitions;
    assert_eq!(definitions.len(), 1);

    let shape = &definitions[0];
    assert_eq!(shape.name, "Am");
    assert_eq!(shape.base_fret, Some(1));
    assert_eq!(shape.values(), vec![0, 0, 2, 2, 1, 0]);

    // and the definition also appears in the body
    assert!(matches!(
        parsed
            .document
            .body[0],
        Element::ChordShape(_)
    ));
}

#[test]
fn chord_definition_variations() {
    let parsed = compile(
        "{define: D frets x x 0 2 3 2}\n{define: D fingers 1 2 3 frets X 0 0 2 3 2}\n\
         {define: Bad frets 1 q 3}\n{define: Lonely}",
    );
    let definitions = &parsed
        .document
        .definitions;

    // repeated names are not collapsed, and lone names are ignored
    assert_eq!(definitions.len(), 3);

    assert_eq!(definitions[0].base_fret, None);
    assert_eq!(definitions[0].values(), vec![MUTED, MUTED, 0, 2, 3, 2]);
    assert_eq!(definitions[1].values(), vec![MUTED, 0, 0, 2, 3, 2]);

    assert_eq!(definitions[2].values(), vec![1, 3]);
    assert_eq!(
        parsed
            .warnings()
            .count(),
        1
    );
    assert!(parsed.is_success());
}

#[test]
fn chorus_memorization() {
    let parsed = compile(
        "{soc}\n[G]one [C]two\n[D]three [*x]four\nno chords\n{eoc}\n[E]verse\n{chorus: Again}\n{chorus}",
    );

    let recalled: Vec<(Option<&str>, &Vec<Option<String>>)> = parsed
        .document
        .body
        .iter()
        .filter_map(|element| match element {
            Element::Rechorus { label, chords, .. } => Some((label.as_deref(), chords)),
            _ => None,
        })
        .collect();

    let expected = vec![Some("D".to_string()), None];
    assert_eq!(
        recalled,
        vec![(Some("Again"), &expected), (None, &expected)]
    );
}

#[test]
fn rechorus_before_any_chorus() {
    let parsed = compile("{chorus}");
    assert!(matches!(
        &parsed
            .document
            .body[0],
        Element::Rechorus { label: None, chords, .. } if chords.is_empty()
    ));
}

#[test]
fn grid_lines() {
    let parsed = compile("{start_of_grid}\nA || G . | % | C/G / D7 |. repeat twice\n{end_of_grid}");

    let grid = parsed
        .document
        .body
        .iter()
        .find_map(|element| match element {
            Element::GridLine(grid) => Some(grid),
            _ => None,
        })
        .expect("grid line");

    assert_eq!(grid.region, Region::Grid);
    assert_eq!(grid.margin, Some("A".to_string()));
    assert_eq!(grid.comment, Some("repeat twice".to_string()));

    assert_eq!(
        grid.tokens
            .len(),
        10
    );
    assert_eq!(
        grid.tokens[0],
        GridToken::Bar {
            symbol: "||".to_string()
        }
    );
    assert!(matches!(&grid.tokens[1], GridToken::Chord { source, chord: Some(_) } if source == "G"));
    assert_eq!(grid.tokens[2], GridToken::Space);
    assert_eq!(
        grid.tokens[4],
        GridToken::Repeat {
            symbol: "%".to_string()
        }
    );
    assert_eq!(grid.tokens[7], GridToken::Slash);
    assert_eq!(
        grid.tokens[9],
        GridToken::Bar {
            symbol: "|.".to_string()
        }
    );

    assert_eq!(
        parsed
            .document
            .chords
            .keys()
            .collect::<Vec<_>>(),
        vec!["G", "C", "D7"]
    );
}

#[test]
fn bracketed_lines_in_grid_stay_song_lines() {
    let parsed = compile("{sog}\n[C]words\n{eog}");
    let lines = song_lines(&parsed);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].region, Region::Grid);
}

#[test]
fn images() {
    let parsed = compile(
        "{image: cover.png}\n{image: src=photo.jpg width=200 height=100 title=\"The Band\"}\n{image: width=3}",
    );
    let images: Vec<&Image> = parsed
        .document
        .body
        .iter()
        .filter_map(|element| match element {
            Element::Image(image) => Some(image),
            _ => None,
        })
        .collect();

    assert_eq!(images.len(), 2);
    assert_eq!(images[0].src, "cover.png");
    assert_eq!(images[1].src, "photo.jpg");
    assert_eq!(images[1].width, Some(200));
    assert_eq!(images[1].height, Some(100));
    assert_eq!(images[1].title, Some("The Band".to_string()));

    // the one without a source is dropped with a warning
    assert_eq!(
        parsed
            .warnings()
            .count(),
        1
    );
}

#[test]
fn missing_end_token_is_fatal() {
    let mut tokens = tokenize("{title: Partial}\n[C]one\n[G]two");
    tokens.pop();

    let parsed = Parser::new(tokens, Options::default()).parse();
    assert!(!parsed.is_success());

    let errors: Vec<&Diagnostic> = parsed
        .errors()
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line, 3);
    assert_eq!(errors[0].message, "Parse error: unexpected end of input");

    // what was built so far is still returned
    assert_eq!(
        parsed
            .document
            .title,
        Some("Partial".to_string())
    );
    assert_eq!(song_lines(&parsed).len(), 2);
}

#[test]
fn splitting_directives() {
    assert_eq!(split_directive(" Title : A: B "), ("title".to_string(), "A: B"));
    assert_eq!(split_directive("soc"), ("soc".to_string(), ""));
    assert_eq!(split_directive("c:"), ("c".to_string(), ""));
}

#[test]
fn leading_integers() {
    assert_eq!(leading_integer("3"), Some(3));
    assert_eq!(leading_integer(" -2 "), Some(-2));
    assert_eq!(leading_integer("+5"), Some(5));
    assert_eq!(leading_integer("3rd"), Some(3));
    assert_eq!(leading_integer(""), None);
    assert_eq!(leading_integer("-"), None);
    assert_eq!(leading_integer("x3"), None);
    assert_eq!(leading_integer("99999999999"), None);
}

#[test]
fn splitting_chords() {
    let (phrases, sources) = split_chords("[[C]x [G");
    assert_eq!(phrases, vec!["", "x [G"]);
    assert_eq!(sources, vec!["[C"]);

    let (phrases, sources) = split_chords("]odd[D]");
    assert_eq!(phrases, vec!["]odd", ""]);
    assert_eq!(sources, vec!["D"]);
}

#[test]
fn bars() {
    assert!(is_bar("|"));
    assert!(is_bar("||"));
    assert!(is_bar("|:"));
    assert!(is_bar(":|"));
    assert!(is_bar("|."));
    assert!(!is_bar("."));
    assert!(!is_bar(":"));
    assert!(!is_bar("|x"));
}

#[test]
fn parsing_attributes() {
    assert_eq!(
        attributes("src=a.png  title=\"two words\" width=10"),
        vec![
            ("src".to_string(), "a.png".to_string()),
            ("title".to_string(), "two words".to_string()),
            ("width".to_string(), "10".to_string()),
        ]
    );
    assert_eq!(
        attributes("src = b.png title=\"unfinished"),
        vec![
            ("src".to_string(), "b.png".to_string()),
            ("title".to_string(), "unfinished".to_string()),
        ]
    );
    assert!(attributes("no pairs here").is_empty());
}
