//! Parsing of chord names into structured values, and transposition.

use crate::language::{Accidental, Affix, Chord, NotationSystem, Note};

/// Canonical spellings of the twelve pitch classes, used when a chord has
/// been transposed.
static SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

static LETTERS: [(char, u8); 7] = [
    ('C', 0),
    ('D', 2),
    ('E', 4),
    ('F', 5),
    ('G', 7),
    ('A', 9),
    ('B', 11),
];

// German note names, which carry their accidental in the spelling.
static GERMAN: [(&str, &str, u8, Accidental); 16] = [
    ("ases", "Abb", 7, Accidental::Flat),
    ("bes", "Bb", 10, Accidental::Flat),
    ("ces", "Cb", 11, Accidental::Flat),
    ("des", "Db", 1, Accidental::Flat),
    ("fes", "Fb", 4, Accidental::Flat),
    ("ges", "Gb", 6, Accidental::Flat),
    ("es", "Eb", 3, Accidental::Flat),
    ("as", "Ab", 8, Accidental::Flat),
    ("cis", "C#", 1, Accidental::Sharp),
    ("dis", "D#", 3, Accidental::Sharp),
    ("eis", "E#", 5, Accidental::Sharp),
    ("fis", "F#", 6, Accidental::Sharp),
    ("gis", "G#", 8, Accidental::Sharp),
    ("ais", "A#", 10, Accidental::Sharp),
    ("his", "B#", 0, Accidental::Sharp),
    ("h", "B", 11, Accidental::Natural),
];

static SOLFEGE: [(&str, &str, u8); 7] = [
    ("do", "C", 0),
    ("re", "D", 2),
    ("mi", "E", 4),
    ("fa", "F", 5),
    ("sol", "G", 7),
    ("la", "A", 9),
    ("si", "B", 11),
];

// Canonical form of each chord quality spelling.
static QUALITIES: [(&str, &str); 14] = [
    ("maj", "maj"),
    ("min", "-"),
    ("m", "-"),
    ("dim", "o"),
    ("°", "o"),
    ("aug", "+"),
    ("+", "+"),
    ("sus", "sus"),
    ("sus2", "sus2"),
    ("sus4", "sus4"),
    ("add2", "add2"),
    ("add4", "add4"),
    ("add9", "add9"),
    ("add11", "add11"),
];

/// Parse the text found between brackets into a chord. Returns None if the
/// root note cannot be resolved, in which case the caller should treat the
/// text as an opaque literal.
pub fn parse_chord(text: &str, system: NotationSystem) -> Option<Chord> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if text.eq_ignore_ascii_case("nc") || text.eq_ignore_ascii_case("n.c.") {
        return Some(Chord::no_chord(text, system));
    }

    let mut parts = text.split('/');
    let main = parts
        .next()
        .unwrap_or("");
    let bass = parts
        .next()
        .map(str::trim)
        .filter(|bass| !bass.is_empty())
        .and_then(resolve_note)
        .map(|(note, _)| note);

    let (root, remainder) = resolve_note(main)?;
    let (quality, extension) = split_quality(remainder);

    let key = chord_key(&root, &quality, &extension);

    Some(Chord {
        key,
        display: text.to_string(),
        root: Some(root),
        quality,
        extension,
        bass,
        system,
    })
}

/// Shift a chord by the given number of semitones. The result is respelled
/// with sharps. The "no chord" marker is returned unchanged.
pub fn transpose(chord: &Chord, semitones: i32) -> Chord {
    let root = match &chord.root {
        Some(root) => shift(root, semitones),
        None => return chord.clone(),
    };
    let bass = chord
        .bass
        .as_ref()
        .map(|bass| shift(bass, semitones));

    let mut display = format!(
        "{}{}{}",
        root.name, chord.quality.raw, chord.extension.raw
    );
    if let Some(bass) = &bass {
        display.push('/');
        display.push_str(&bass.name);
    }

    Chord {
        key: chord_key(&root, &chord.quality, &chord.extension),
        display,
        root: Some(root),
        quality: chord
            .quality
            .clone(),
        extension: chord
            .extension
            .clone(),
        bass,
        system: chord.system,
    }
}

fn shift(note: &Note, semitones: i32) -> Note {
    let pitch_class = ((note.pitch_class as i32 + semitones.rem_euclid(12)) % 12) as u8;
    let name = SHARP_NAMES[pitch_class as usize];
    Note {
        name: name.to_string(),
        pitch_class,
        accidental: if name.ends_with('#') {
            Accidental::Sharp
        } else {
            Accidental::Natural
        },
    }
}

fn chord_key(root: &Note, quality: &Affix, extension: &Affix) -> String {
    format!("{}{}{}", root.name, quality.canonical, extension.canonical)
}

/// Resolve the note name at the start of the input, returning it along with
/// whatever text follows it.
pub fn resolve_note(text: &str) -> Option<(Note, &str)> {
    let mut candidates = candidate_notes(text);
    if candidates.is_empty() {
        return None;
    }

    // Longer spellings are preferred, but several of them collide with
    // chord suffixes ("Es" + "us4" is really "E" + "sus4"), so a reading
    // only counts if what follows could start a chord suffix.
    candidates.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then(b.2.cmp(&a.2))
    });

    let chosen = candidates
        .iter()
        .find(|(width, _, _)| is_plausible_suffix(&text[*width..]))
        .or_else(|| {
            candidates
                .iter()
                .find(|(_, _, english)| *english)
        })
        .or_else(|| candidates.first())?;

    let (width, note, _) = chosen;
    Some((note.clone(), &text[*width..]))
}

/// Every reading of a note name at the start of text, as (width in bytes,
/// note, whether it is a plain English letter spelling).
fn candidate_notes(text: &str) -> Vec<(usize, Note, bool)> {
    let mut candidates = Vec::new();

    let re = regex!(r"^([A-Ga-g])([#♯b♭]|is|es)?");
    if let Some(captures) = re.captures(text) {
        let upper = captures[1]
            .to_ascii_uppercase()
            .chars()
            .next();
        if let Some((letter, pitch_class)) = LETTERS
            .iter()
            .find(|(letter, _)| Some(*letter) == upper)
        {
            candidates.push((
                1,
                Note {
                    name: letter.to_string(),
                    pitch_class: *pitch_class,
                    accidental: Accidental::Natural,
                },
                true,
            ));
            if let Some(marker) = captures.get(2) {
                candidates.push((
                    1 + marker.len(),
                    altered(letter.to_string(), *pitch_class, accidental(marker.as_str())),
                    true,
                ));
            }
        }
    }

    for (spelling, name, pitch_class, accidental) in GERMAN.iter() {
        if starts_with_ignore_case(text, spelling) {
            candidates.push((
                spelling.len(),
                Note {
                    name: name.to_string(),
                    pitch_class: *pitch_class,
                    accidental: *accidental,
                },
                false,
            ));
        }
    }

    for (spelling, name, pitch_class) in SOLFEGE.iter() {
        if starts_with_ignore_case(text, spelling) {
            let width = spelling.len();
            candidates.push((
                width,
                Note {
                    name: name.to_string(),
                    pitch_class: *pitch_class,
                    accidental: Accidental::Natural,
                },
                false,
            ));
            if let Some((extra, accidental)) = accidental_at(&text[width..]) {
                candidates.push((
                    width + extra,
                    altered(name.to_string(), *pitch_class, accidental),
                    false,
                ));
            }
        }
    }

    candidates
}

fn altered(letter: String, pitch_class: u8, accidental: Accidental) -> Note {
    match accidental {
        Accidental::Sharp => Note {
            name: letter + "#",
            pitch_class: (pitch_class + 1) % 12,
            accidental,
        },
        Accidental::Flat => Note {
            name: letter + "b",
            pitch_class: (pitch_class + 11) % 12,
            accidental,
        },
        Accidental::Natural => Note {
            name: letter,
            pitch_class,
            accidental,
        },
    }
}

/// An accidental marker at the start of text, with its width in bytes.
fn accidental_at(text: &str) -> Option<(usize, Accidental)> {
    let re = regex!(r"^(?:[#♯b♭]|is|es)");
    re.find(text)
        .map(|marker| (marker.len(), accidental(marker.as_str())))
}

fn accidental(marker: &str) -> Accidental {
    match marker {
        "#" | "♯" | "is" => Accidental::Sharp,
        _ => Accidental::Flat,
    }
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false)
}

/// The chord quality at the start of text, if any. Alternatives are listed
/// longest first so that the longest spelling wins.
fn quality_at(text: &str) -> Option<&str> {
    let re = regex!(r"^(?i:maj|min|dim|aug|sus2|sus4|sus|add11|add2|add4|add9|m|°|\+)");
    re.find(text)
        .map(|quality| quality.as_str())
}

fn is_plausible_suffix(rest: &str) -> bool {
    let c = match rest
        .chars()
        .next()
    {
        None => return true,
        Some(c) => c,
    };

    if c.is_ascii_digit() || "#b♯♭+-°ø^(Δ".contains(c) {
        return true;
    }

    quality_at(rest).is_some()
}

/// Split what follows the root into quality and extension.
fn split_quality(remainder: &str) -> (Affix, Affix) {
    let matched = quality_at(remainder).and_then(|raw| {
        let folded = raw.to_lowercase();
        QUALITIES
            .iter()
            .find(|(spelling, _)| *spelling == folded)
            .map(|(_, canonical)| (raw, *canonical))
    });

    match matched {
        Some((raw, canonical)) => (
            Affix {
                raw: raw.to_string(),
                canonical: canonical.to_string(),
            },
            extension(&remainder[raw.len()..]),
        ),
        None => (Affix::default(), extension(remainder)),
    }
}

fn extension(text: &str) -> Affix {
    Affix {
        raw: text.to_string(),
        canonical: canonical_extension(text),
    }
}

/// Case-fold an extension, with a few literal replacements so that
/// equivalent spellings share a key.
pub fn canonical_extension(text: &str) -> String {
    let mut result = text
        .replace('♭', "b")
        .replace('♯', "#")
        .to_lowercase();

    while let Some(i) = result.find("min7") {
        result.replace_range(i..i + 4, "7");
    }

    result
}

#[cfg(test)]
#[path = "checks/chords.rs"]
mod check;
