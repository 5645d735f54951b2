//! Types representing a compiled song

use serde::Serialize;
use std::fmt;

use crate::language::{Chord, Table};

/// The structural region of the song body, set by the start_of_* and
/// end_of_* directive pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Default,
    Verse,
    Chorus,
    Bridge,
    Tab,
    Grid,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Default => "default",
            Region::Verse => "verse",
            Region::Chorus => "chorus",
            Region::Bridge => "bridge",
            Region::Tab => "tab",
            Region::Grid => "grid",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values held in the settings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Integer(i64),
}

impl Value {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub title: Option<String>,
    pub subtitles: Vec<String>,
    pub artist: Option<String>,
    pub composer: Option<String>,
    pub lyricist: Option<String>,
    pub copyright: Option<String>,
    pub album: Option<String>,
    pub year: Option<String>,
    pub key: Option<String>,
    pub time: Option<String>,
    pub tempo: Option<String>,
    pub duration: Option<String>,
    pub capo: Option<i32>,
    pub meta: Table<Vec<String>>,
    pub settings: Table<Value>,
    pub body: Vec<Element>,
    /// First seen chord for each canonical key, in order of appearance.
    pub chords: Table<Chord>,
    pub definitions: Vec<ChordShape>,
}

impl Document {
    /// The first value recorded for the given metadata key, if any.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta
            .get(key)
            .and_then(|values| values.first())
            .map(|value| value.as_str())
    }

    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.settings
            .get(key)
    }

    pub fn song_lines(&self) -> impl Iterator<Item = &SongLine> {
        self.body
            .iter()
            .filter_map(|element| match element {
                Element::SongLine(line) => Some(line),
                _ => None,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    SongLine(SongLine),
    Comment {
        style: CommentStyle,
        text: String,
        region: Region,
        line: Option<usize>,
    },
    Blank {
        region: Region,
        line: Option<usize>,
    },
    TabLine {
        text: String,
        region: Region,
        line: Option<usize>,
    },
    GridLine(GridLine),
    ChordShape(ChordShape),
    PageBreak {
        variant: PageBreak,
        region: Region,
        line: Option<usize>,
    },
    Image(Image),
    Rechorus {
        label: Option<String>,
        chords: Vec<Option<String>>,
        region: Region,
        line: Option<usize>,
    },
}

impl Element {
    pub fn region(&self) -> Region {
        match self {
            Element::SongLine(line) => line.region,
            Element::Comment { region, .. } => *region,
            Element::Blank { region, .. } => *region,
            Element::TabLine { region, .. } => *region,
            Element::GridLine(grid) => grid.region,
            Element::ChordShape(shape) => shape.region,
            Element::PageBreak { region, .. } => *region,
            Element::Image(image) => image.region,
            Element::Rechorus { region, .. } => *region,
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            Element::SongLine(line) => line.line,
            Element::Comment { line, .. } => *line,
            Element::Blank { line, .. } => *line,
            Element::TabLine { line, .. } => *line,
            Element::GridLine(grid) => grid.line,
            Element::ChordShape(shape) => shape.line,
            Element::PageBreak { line, .. } => *line,
            Element::Image(image) => image.line,
            Element::Rechorus { line, .. } => *line,
        }
    }
}

/// A line of lyrics interleaved with chords. Phrase 0 is the text before
/// the first chord; phrase i+1 is the text following chord i. The chords
/// and sources vectors are parallel: sources holds the bracket text as
/// written, which is all there is to display when a chord didn't parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongLine {
    pub region: Region,
    pub phrases: Vec<String>,
    pub chords: Vec<Option<Chord>>,
    pub sources: Vec<String>,
    pub line: Option<usize>,
}

impl SongLine {
    /// Iterate over each chord position along with the phrase it sits above.
    pub fn pairs(&self) -> impl Iterator<Item = (Option<&Chord>, &str, &str)> {
        self.chords
            .iter()
            .zip(
                self.sources
                    .iter(),
            )
            .zip(
                self.phrases
                    .iter()
                    .skip(1),
            )
            .map(|((chord, source), phrase)| (chord.as_ref(), source.as_str(), phrase.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStyle {
    Plain,
    Italic,
    Boxed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageBreak {
    NewPage,
    NewPhysicalPage,
    ColumnBreak,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridLine {
    pub tokens: Vec<GridToken>,
    pub margin: Option<String>,
    pub comment: Option<String>,
    pub region: Region,
    pub line: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GridToken {
    Bar { symbol: String },
    Chord { chord: Option<Chord>, source: String },
    Repeat { symbol: String },
    Slash,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fret {
    Fretted(u32),
    Muted,
}

/// Value used for a muted string when frets are expressed as integers.
pub const MUTED: i32 = -1;

impl Fret {
    pub fn value(&self) -> i32 {
        match self {
            Fret::Fretted(n) => *n as i32,
            Fret::Muted => MUTED,
        }
    }
}

impl Serialize for Fret {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.value())
    }
}

impl fmt::Display for Fret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fret::Fretted(n) => write!(f, "{}", n),
            Fret::Muted => f.write_str("x"),
        }
    }
}

/// An explicit fingering, as given by a define directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordShape {
    pub name: String,
    pub base_fret: Option<u32>,
    pub frets: Vec<Fret>,
    pub region: Region,
    pub line: Option<usize>,
}

impl ChordShape {
    pub fn values(&self) -> Vec<i32> {
        self.frets
            .iter()
            .map(Fret::value)
            .collect()
    }
}

/// A reference to an image. The path is recorded as written and never
/// resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub src: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub title: Option<String>,
    pub region: Region,
    pub line: Option<usize>,
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn fret_values() {
        let shape = ChordShape {
            name: "D".to_string(),
            base_fret: Some(1),
            frets: vec![
                Fret::Muted,
                Fret::Muted,
                Fret::Fretted(0),
                Fret::Fretted(2),
                Fret::Fretted(3),
                Fret::Fretted(2),
            ],
            region: Region::Default,
            line: Some(1),
        };
        assert_eq!(shape.values(), vec![-1, -1, 0, 2, 3, 2]);
        assert_eq!(Fret::Muted.to_string(), "x");
    }

    #[test]
    fn pairing_chords_with_phrases() {
        let line = SongLine {
            region: Region::Verse,
            phrases: vec!["".to_string(), "Hello ".to_string(), "world".to_string()],
            chords: vec![None, None],
            sources: vec!["C".to_string(), "G".to_string()],
            line: Some(2),
        };

        let pairs: Vec<(&str, &str)> = line
            .pairs()
            .map(|(_, source, phrase)| (source, phrase))
            .collect();
        assert_eq!(pairs, vec![("C", "Hello "), ("G", "world")]);
    }
}
