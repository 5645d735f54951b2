//! Types describing a single chord as written above a lyric.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Chords can be written in several notations. Only the tag is carried;
/// resolution of note names is the same regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotationSystem {
    #[default]
    Common,
    Nashville,
    Roman,
    Solfege,
}

impl NotationSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotationSystem::Common => "common",
            NotationSystem::Nashville => "nashville",
            NotationSystem::Roman => "roman",
            NotationSystem::Solfege => "solfege",
        }
    }
}

impl fmt::Display for NotationSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotationSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s
            .trim()
            .to_lowercase()
            .as_str()
        {
            "common" => Ok(NotationSystem::Common),
            "nashville" => Ok(NotationSystem::Nashville),
            "roman" => Ok(NotationSystem::Roman),
            "solfege" | "solfège" => Ok(NotationSystem::Solfege),
            other => Err(format!("unknown notation system '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    Flat,
    Natural,
    Sharp,
}

/// A resolved note name. The name is always the English spelling, so `H`
/// becomes `B` and `Es` becomes `Eb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub name: String,
    pub pitch_class: u8,
    pub accidental: Accidental,
}

/// Chord quality or extension, as written and in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Affix {
    pub raw: String,
    pub canonical: String,
}

impl Affix {
    pub fn is_empty(&self) -> bool {
        self.raw
            .is_empty()
    }
}

/// The key used for the special "no chord" marker.
pub const NO_CHORD: &str = "NC";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chord {
    /// Identity of the chord: root name, canonical quality, and canonical
    /// extension. The bass note does not participate.
    pub key: String,
    pub display: String,
    /// Absent only for the "no chord" marker.
    pub root: Option<Note>,
    pub quality: Affix,
    pub extension: Affix,
    pub bass: Option<Note>,
    pub system: NotationSystem,
}

impl Chord {
    pub fn no_chord(text: &str, system: NotationSystem) -> Chord {
        Chord {
            key: NO_CHORD.to_string(),
            display: text.to_string(),
            root: None,
            quality: Affix::default(),
            extension: Affix::default(),
            bass: None,
            system,
        }
    }

    pub fn is_no_chord(&self) -> bool {
        self.root
            .is_none()
    }
}

/// Regenerate the chord from its parts, using the canonical root and bass
/// spellings but the quality and extension as they were written.
impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            None => f.write_str(&self.display),
            Some(root) => {
                write!(
                    f,
                    "{}{}{}",
                    root.name, self.quality.raw, self.extension.raw
                )?;
                if let Some(bass) = &self.bass {
                    write!(f, "/{}", bass.name)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn systems_from_strings() {
        assert_eq!("common".parse(), Ok(NotationSystem::Common));
        assert_eq!("Nashville".parse(), Ok(NotationSystem::Nashville));
        assert_eq!(" roman ".parse(), Ok(NotationSystem::Roman));
        assert_eq!("solfège".parse(), Ok(NotationSystem::Solfege));
        assert!("dorian"
            .parse::<NotationSystem>()
            .is_err());
    }

    #[test]
    fn display_of_no_chord() {
        let chord = Chord::no_chord("N.C.", NotationSystem::Common);
        assert!(chord.is_no_chord());
        assert_eq!(chord.key, NO_CHORD);
        assert_eq!(chord.to_string(), "N.C.");
    }
}
