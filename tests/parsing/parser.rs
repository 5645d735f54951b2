#[cfg(test)]
mod verify {
    use std::path::Path;

    use chordpro::language::*;
    use chordpro::parsing::lexer::{normalize, tokenize, TokenKind};
    use chordpro::parsing::{self, Options, Parsed, Parser};

    fn sample(name: &str) -> Parsed {
        let path = Path::new("tests/samples/").join(name);
        let content = parsing::load(&path).unwrap();
        parsing::parse(&content)
    }

    fn displays(line: &SongLine) -> Vec<&str> {
        line.chords
            .iter()
            .map(|chord| match chord {
                Some(chord) => chord
                    .display
                    .as_str(),
                None => "?",
            })
            .collect()
    }

    #[test]
    fn metadata_from_sample() {
        let parsed = sample("amazing-grace.cho");
        assert!(parsed.is_success());

        let document = &parsed.document;
        assert_eq!(document.title, Some("Amazing Grace".to_string()));
        assert_eq!(document.subtitles, vec!["New Britain"]);
        assert_eq!(document.artist, Some("John Newton".to_string()));
        assert_eq!(document.key, Some("G".to_string()));
        assert_eq!(document.time, Some("3/4".to_string()));
        assert_eq!(document.capo, Some(2));
        assert_eq!(document.setting("capo"), Some(&Value::Integer(2)));
        assert_eq!(
            document
                .setting("gridsystem")
                .and_then(Value::as_text),
            Some("common")
        );
    }

    #[test]
    fn chord_table_in_order_of_appearance() {
        let parsed = sample("amazing-grace.cho");
        let keys: Vec<&str> = parsed
            .document
            .chords
            .keys()
            .collect();
        assert_eq!(keys, vec!["G", "G7", "C", "E-", "D"]);

        let em = parsed
            .document
            .chords
            .get("E-")
            .unwrap();
        assert_eq!(em.display, "Em");
    }

    #[test]
    fn verse_region_is_tagged() {
        let parsed = sample("amazing-grace.cho");
        let regions: Vec<Region> = parsed
            .document
            .song_lines()
            .map(|line| line.region)
            .collect();
        assert_eq!(regions, vec![Region::Verse; 4]);

        let comments = parsed
            .document
            .body
            .iter()
            .filter(|element| matches!(element, Element::Comment { .. }))
            .count();
        assert_eq!(comments, 2);
    }

    #[test]
    fn everything_sample() {
        let parsed = sample("leaving.cho");
        assert!(parsed.is_success());
        assert_eq!(
            parsed
                .warnings()
                .count(),
            0
        );

        let document = &parsed.document;
        assert_eq!(document.title, Some("Leaving on the Morning Train".to_string()));
        assert_eq!(document.composer, Some("Anonymous".to_string()));
        assert_eq!(document.setting("columns"), Some(&Value::Integer(2)));
        assert_eq!(
            document
                .definitions
                .len(),
            2
        );
        assert_eq!(document.definitions[1].name, "F7/A");
        assert_eq!(document.definitions[1].base_fret, None);
        assert_eq!(document.definitions[1].values(), vec![-1, 0, 3, 2, 4, 1]);

        let grids: Vec<&GridLine> = document
            .body
            .iter()
            .filter_map(|element| match element {
                Element::GridLine(grid) => Some(grid),
                _ => None,
            })
            .collect();
        assert_eq!(grids.len(), 1);
        assert_eq!(grids[0].comment, Some("repeat twice".to_string()));

        let tabs = document
            .body
            .iter()
            .filter(|element| matches!(element, Element::TabLine { .. }))
            .count();
        assert_eq!(tabs, 3);

        let rechorus = document
            .body
            .iter()
            .find_map(|element| match element {
                Element::Rechorus { chords, .. } => Some(chords.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            rechorus,
            vec![Some("G".to_string()), Some("A-".to_string())]
        );

        let last = document
            .song_lines()
            .last()
            .unwrap();
        assert_eq!(last.region, Region::Bridge);
        assert_eq!(displays(last), vec!["N.C.", "Bbmaj7", "A7sus4"]);
        assert!(document
            .chords
            .contains_key(NO_CHORD));
    }

    #[test]
    fn german_names_transposed() {
        let parsed = sample("german.cho");
        assert_eq!(parsed.document.key, Some("H".to_string()));
        assert_eq!(parsed.document.setting("transpose"), Some(&Value::Integer(-2)));

        let first = parsed
            .document
            .song_lines()
            .next()
            .unwrap();
        assert_eq!(displays(first), vec!["A", "E", "C#", "B7"]);
    }

    #[test]
    fn line_endings_are_normalized() {
        let parsed = sample("crlf.cho");
        assert_eq!(parsed.document.title, Some("Windows Line Endings".to_string()));

        let line = parsed
            .document
            .song_lines()
            .next()
            .unwrap();
        assert_eq!(line.phrases, vec!["", "Carriage ", "return"]);
        assert_eq!(line.line, Some(3));
    }

    #[test]
    fn parsing_with_options() {
        let options = Options {
            system: NotationSystem::Nashville,
            transpose: -1,
        };
        let parsed = parsing::parse_with("[C]one [F#m]two\n", &options);

        let line = parsed
            .document
            .song_lines()
            .next()
            .unwrap();
        assert_eq!(displays(line), vec!["B", "Fm"]);
        assert_eq!(
            parsed
                .document
                .setting("gridsystem"),
            Some(&Value::Text("nashville".to_string()))
        );
        let chord = line.chords[0]
            .as_ref()
            .unwrap();
        assert_eq!(chord.system, NotationSystem::Nashville);
    }

    #[test]
    fn builder_over_tokens() {
        let content = normalize("{title: Direct}\r\n[A]Hi\r\n");
        let tokens = tokenize(&content);
        assert_eq!(
            tokens
                .last()
                .map(|token| token.kind),
            Some(TokenKind::End)
        );

        let parsed = Parser::new(tokens, Options::default()).parse();
        assert!(parsed.is_success());
        assert_eq!(parsed.document.title, Some("Direct".to_string()));
    }

    #[test]
    fn warnings_do_not_fail() {
        let parsed = parsing::parse("{title: X}\n{flavour: strawberry}\n[C]la\n");
        assert!(parsed.is_success());

        let warnings: Vec<String> = parsed
            .warnings()
            .map(|warning| warning.to_string())
            .collect();
        assert_eq!(warnings, vec!["Line 2 — Unknown directive: {flavour}"]);
        assert_eq!(parsed.document.meta("flavour"), Some("strawberry"));
    }
}
