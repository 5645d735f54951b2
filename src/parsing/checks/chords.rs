use super::*;

fn chord(text: &str) -> Chord {
    parse_chord(text, NotationSystem::Common).unwrap_or_else(|| panic!("failed to parse {}", text))
}

fn root_of(chord: &Chord) -> u8 {
    chord
        .root
        .as_ref()
        .map(|note| note.pitch_class)
        .unwrap_or_else(|| panic!("no root in {:?}", chord))
}

#[test]
fn simple_roots() {
    let c = chord("C");
    assert_eq!(c.key, "C");
    assert_eq!(c.display, "C");
    assert_eq!(root_of(&c), 0);
    assert_eq!(c.bass, None);

    assert_eq!(root_of(&chord("G")), 7);
    assert_eq!(root_of(&chord("B")), 11);
    assert_eq!(root_of(&chord("a")), 9);
}

#[test]
fn accidentals() {
    let fs = chord("F#");
    assert_eq!(root_of(&fs), 6);
    assert_eq!(
        fs.root
            .as_ref()
            .map(|n| n.accidental),
        Some(Accidental::Sharp)
    );

    let bb = chord("Bb");
    assert_eq!(root_of(&bb), 10);
    assert_eq!(bb.key, "Bb");

    assert_eq!(chord("B♭").key, "Bb");
    assert_eq!(chord("C♯").key, "C#");
    assert_eq!(root_of(&chord("Cb")), 11);

    // "is" and "es" after any letter
    let ab = chord("Aes");
    assert_eq!(root_of(&ab), 8);
    assert_eq!(ab.key, "Ab");
    assert_eq!(ab.extension.raw, "");
    assert_eq!(chord("Ees").key, "Eb");
    assert_eq!(root_of(&chord("Ees")), 3);
    let bs = chord("Bis");
    assert_eq!(root_of(&bs), 0);
    assert_eq!(bs.key, "B#");
    assert_eq!(chord("Bis7").key, "B#7");
    assert_eq!(chord("Aesm").key, "Ab-");
}

#[test]
fn alternate_spellings() {
    assert_eq!(root_of(&chord("H")), 11);
    assert_eq!(chord("H7").key, "B7");
    assert_eq!(root_of(&chord("Es")), 3);
    assert_eq!(chord("Es").key, "Eb");
    assert_eq!(root_of(&chord("As")), 8);
    assert_eq!(root_of(&chord("Fis")), 6);
    assert_eq!(root_of(&chord("Bes")), 10);
    assert_eq!(root_of(&chord("Ases")), 7);

    assert_eq!(chord("Do").key, "C");
    assert_eq!(chord("Sol7").key, "G7");
    assert_eq!(chord("Lam").key, "A-");
    assert_eq!(root_of(&chord("Sib")), 10);
}

#[test]
fn spellings_that_collide_with_suffixes() {
    // not German "Es" followed by "us4"
    let c = chord("Esus4");
    assert_eq!(root_of(&c), 4);
    assert_eq!(c.key, "Esus4");

    let c = chord("Asus2");
    assert_eq!(root_of(&c), 9);

    // not solfège "Fa" followed by "dd9"
    let c = chord("Fadd9");
    assert_eq!(root_of(&c), 5);
    assert_eq!(c.quality.canonical, "add9");
}

#[test]
fn qualities() {
    let c = chord("Dm7");
    assert_eq!(c.quality.raw, "m");
    assert_eq!(c.quality.canonical, "-");
    assert_eq!(c.extension.raw, "7");
    assert_eq!(c.key, "D-7");

    assert_eq!(chord("Cmaj7").key, "Cmaj7");
    assert_eq!(chord("Cmin").key, "C-");
    assert_eq!(chord("Cdim").key, "Co");
    assert_eq!(chord("C°7").key, "Co7");
    assert_eq!(chord("Caug").key, "C+");
    assert_eq!(chord("C+").key, "C+");
    assert_eq!(chord("Csus").key, "Csus");
    assert_eq!(chord("Csus2").key, "Csus2");
    assert_eq!(chord("Cadd11").key, "Cadd11");

    // case-insensitive
    assert_eq!(chord("CMAJ7").key, "Cmaj7");
}

#[test]
fn extensions() {
    let c = chord("Am7b5");
    assert_eq!(c.quality.canonical, "-");
    assert_eq!(c.extension.raw, "7b5");
    assert_eq!(c.extension.canonical, "7b5");
    assert_eq!(c.key, "A-7b5");

    let c = chord("C7#9");
    assert_eq!(c.quality, Affix::default());
    assert_eq!(c.extension.canonical, "7#9");

    assert_eq!(canonical_extension("min7"), "7");
    assert_eq!(canonical_extension("MAJ9"), "maj9");
    assert_eq!(canonical_extension("7♭9"), "7b9");
}

#[test]
fn slash_chords() {
    let c = chord("C/G");
    assert_eq!(c.key, "C");
    assert_eq!(c.display, "C/G");
    let bass = c
        .bass
        .expect("bass");
    assert_eq!(bass.name, "G");
    assert_eq!(bass.pitch_class, 7);

    // the bass does not participate in the key
    assert_eq!(chord("C/E").key, chord("C/G").key);

    // an unresolvable bass is simply absent
    let c = chord("D/?");
    assert_eq!(c.bass, None);
    assert_eq!(c.key, "D");
}

#[test]
fn no_chord() {
    for text in ["NC", "nc", "N.C.", "n.c."] {
        let c = chord(text);
        assert!(c.is_no_chord());
        assert_eq!(c.key, "NC");
        assert_eq!(c.display, text);
    }
}

#[test]
fn failures() {
    assert_eq!(parse_chord("", NotationSystem::Common), None);
    assert_eq!(parse_chord("   ", NotationSystem::Common), None);
    assert_eq!(parse_chord("Xm7", NotationSystem::Common), None);
    assert_eq!(parse_chord("*Coda", NotationSystem::Common), None);
    assert_eq!(parse_chord("/G", NotationSystem::Common), None);
}

#[test]
fn system_tag() {
    let c = parse_chord("Do", NotationSystem::Solfege).expect("solfège chord");
    assert_eq!(c.system, NotationSystem::Solfege);
}

#[test]
fn transposing_up() {
    let c = transpose(&chord("Am7b5"), 2);
    assert_eq!(root_of(&c), 11);
    assert_eq!(c.display, "Bm7b5");
    assert_eq!(c.key, "B-7b5");
    assert_eq!(c.quality.raw, "m");
    assert_eq!(c.extension.canonical, "7b5");
}

#[test]
fn transposing_respells_with_sharps() {
    let c = transpose(&chord("Bb"), 1);
    assert_eq!(c.key, "B");

    let c = transpose(&chord("Eb/Bb"), -1);
    assert_eq!(c.display, "D/A");

    let c = transpose(&chord("C"), 1);
    assert_eq!(c.display, "C#");
    assert_eq!(
        c.root
            .map(|n| n.accidental),
        Some(Accidental::Sharp)
    );
}

#[test]
fn transposing_wraps_around() {
    assert_eq!(root_of(&transpose(&chord("B"), 1)), 0);
    assert_eq!(root_of(&transpose(&chord("C"), -1)), 11);
    assert_eq!(root_of(&transpose(&chord("C"), -25)), 11);
    assert_eq!(root_of(&transpose(&chord("G"), 1205)), 0);
    assert_eq!(root_of(&transpose(&chord("D"), i32::MAX)), 9);
    assert_eq!(root_of(&transpose(&chord("C"), i32::MIN)), 4);
}

#[test]
fn transposing_by_octaves_is_identity() {
    for text in ["C", "F#m7", "Bb/D", "Esus4", "H7", "Dm7b5"] {
        let original = chord(text);
        for n in [-24, -12, 0, 12, 36] {
            let shifted = transpose(&original, n);
            assert_eq!(root_of(&shifted), root_of(&original), "{} by {}", text, n);
            assert_eq!(
                shifted
                    .bass
                    .map(|b| b.pitch_class),
                original
                    .bass
                    .as_ref()
                    .map(|b| b.pitch_class)
            );
        }
    }
}

#[test]
fn transposition_composes() {
    let c = chord("Gm7/F");
    for a in -13..13 {
        for b in -13..13 {
            let twice = transpose(&transpose(&c, a), b);
            let once = transpose(&c, a + b);
            assert_eq!(root_of(&twice), root_of(&once));
            assert_eq!(twice.key, once.key);
            assert_eq!(twice.display, once.display);
        }
    }
}

#[test]
fn no_chord_is_fixed_under_transposition() {
    let c = chord("N.C.");
    for n in -12..=12 {
        assert_eq!(transpose(&c, n), c);
    }
}

#[test]
fn canonical_form_reparses_to_same_key() {
    let roots = ["C", "C#", "Db", "Eb", "F#", "Bb", "B", "H", "Es", "Sol", "Fis"];
    let qualities = ["", "m", "min", "maj", "dim", "°", "aug", "+", "sus2", "sus4", "add9"];
    let extensions = ["", "7", "9", "7b5", "7#9", "11", "13", "MIN7"];

    for root in roots {
        for quality in qualities {
            for extension in extensions {
                let text = format!("{}{}{}", root, quality, extension);
                let first = chord(&text);

                let again = chord(&first.to_string());
                assert_eq!(again.key, first.key, "regenerated from {}", text);

                let keyed = chord(&first.key);
                assert_eq!(keyed.key, first.key, "key of {}", text);
            }
        }
    }
}
