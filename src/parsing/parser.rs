//! Document builder: consumes the token stream and assembles a Document.

use std::fmt;
use tracing::{debug, trace};

use crate::language::*;
use crate::parsing::chords::{parse_chord, transpose};
use crate::parsing::lexer::{Token, TokenKind};
use crate::parsing::state::State;

/// Settings that influence how a song is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub system: NotationSystem,
    /// Semitones to shift every chord by, in addition to any transpose
    /// directive present in the song.
    pub transpose: i32,
}

/// The outcome of compiling a song. A document is always produced, even if
/// it is only partial.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub document: Document,
    pub diagnostics: Vec<Diagnostic>,
}

impl Parsed {
    /// Warnings don't count against success, only errors do.
    pub fn is_success(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| !diagnostic.is_error())
    }
}

/// Failures internal to the builder. These are not returned to callers;
/// the first one encountered halts the build and is converted into an error
/// diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    IllegalParserState(usize),
    UnexpectedEndOfInput(usize),
}

impl ParsingError {
    pub fn line(&self) -> usize {
        match self {
            ParsingError::IllegalParserState(line) => *line,
            ParsingError::UnexpectedEndOfInput(line) => *line,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ParsingError::IllegalParserState(_) => "illegal parser state".to_string(),
            ParsingError::UnexpectedEndOfInput(_) => "unexpected end of input".to_string(),
        }
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

#[derive(Debug)]
pub struct Parser<'i> {
    tokens: Vec<Token<'i>>,
    position: usize,
    options: Options,
    state: State,
    document: Document,
    diagnostics: Vec<Diagnostic>,
}

impl<'i> Parser<'i> {
    pub fn new(tokens: Vec<Token<'i>>, options: Options) -> Parser<'i> {
        Parser {
            tokens,
            position: 0,
            options,
            state: State::new(options.transpose),
            document: Document::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Run through the tokens, building up the document.
    pub fn parse(mut self) -> Parsed {
        self.document
            .settings
            .insert(
                "gridsystem",
                Value::Text(
                    self.options
                        .system
                        .to_string(),
                ),
            );

        loop {
            match self.step() {
                Ok(true) => continue,
                Ok(false) => break,
                Err(error) => {
                    debug!(?error);
                    self.diagnostics
                        .push(Diagnostic::error(
                            self.state
                                .line(),
                            None,
                            format!("Parse error: {}", error.message()),
                        ));
                    break;
                }
            }
        }

        Parsed {
            document: self.document,
            diagnostics: self.diagnostics,
        }
    }

    /// Handle one token, returning false once the End token is reached.
    fn step(&mut self) -> Result<bool, ParsingError> {
        let token = self.next_token()?;
        self.state
            .advance(token.line);

        match token.kind {
            TokenKind::Directive => self.read_directive(token)?,
            TokenKind::BodyLine => self.read_body_line(token)?,
            TokenKind::Comment => self.read_comment(token)?,
            TokenKind::Blank => self.push(Element::Blank {
                region: self
                    .state
                    .current(),
                line: Some(token.line),
            }),
            TokenKind::End => return Ok(false),
        }

        Ok(true)
    }

    fn next_token(&mut self) -> Result<Token<'i>, ParsingError> {
        match self
            .tokens
            .get(self.position)
        {
            Some(token) => {
                self.position += 1;
                Ok(*token)
            }
            None => Err(ParsingError::UnexpectedEndOfInput(
                self.state
                    .line(),
            )),
        }
    }

    fn push(&mut self, element: Element) {
        self.document
            .body
            .push(element);
    }

    fn warn(&mut self, token: &Token<'i>, message: String) {
        debug!(line = token.line, "{}", message);
        self.diagnostics
            .push(Diagnostic::warning(token.line, Some(token.column), message));
    }

    fn read_directive(&mut self, token: Token<'i>) -> Result<(), ParsingError> {
        if token.kind != TokenKind::Directive {
            return Err(ParsingError::IllegalParserState(token.line));
        }

        let (key, value) = split_directive(token.text);
        trace!(key = key.as_str(), value);

        if let Some(name) = metadata_name(&key) {
            self.set_metadata(name, value);
            return Ok(());
        }

        let region = self
            .state
            .current();
        let line = Some(token.line);

        match key.as_str() {
            "capo" => {
                let capo = leading_integer(value).filter(|capo| *capo != 0);
                self.state
                    .set_capo(capo);
                self.document
                    .capo = self
                    .state
                    .capo();
                match capo {
                    Some(capo) => self
                        .document
                        .settings
                        .insert("capo", Value::Integer(capo as i64)),
                    None => {
                        self.document
                            .settings
                            .remove("capo");
                    }
                }
            }
            "transpose" => {
                let semitones = leading_integer(value).unwrap_or(0);
                // effective offset, reduced to within the octave
                let offset = (self
                    .options
                    .transpose as i64
                    + semitones as i64)
                    .rem_euclid(12);
                self.state
                    .set_transpose(offset as i32);
                self.document
                    .settings
                    .insert("transpose", Value::Integer(semitones as i64));
            }
            "columns" | "col" => {
                if let Some(columns) = leading_integer(value) {
                    self.document
                        .settings
                        .insert("columns", Value::Integer(columns as i64));
                }
            }

            "start_of_chorus" | "soc" => self
                .state
                .enter(Region::Chorus),
            "start_of_verse" | "sov" => self
                .state
                .enter(Region::Verse),
            "start_of_bridge" | "sob" => self
                .state
                .enter(Region::Bridge),
            "start_of_tab" | "sot" => self
                .state
                .enter(Region::Tab),
            "start_of_grid" | "sog" => self
                .state
                .enter(Region::Grid),
            "end_of_chorus" | "eoc" => {
                self.state
                    .leave(Region::Chorus);
            }
            "end_of_verse" | "eov" => {
                self.state
                    .leave(Region::Verse);
            }
            "end_of_bridge" | "eob" => {
                self.state
                    .leave(Region::Bridge);
            }
            "end_of_tab" | "eot" => {
                self.state
                    .leave(Region::Tab);
            }
            "end_of_grid" | "eog" => {
                self.state
                    .leave(Region::Grid);
            }

            "comment" | "c" => self.push(Element::Comment {
                style: CommentStyle::Plain,
                text: value.to_string(),
                region,
                line,
            }),
            "comment_italic" | "ci" => self.push(Element::Comment {
                style: CommentStyle::Italic,
                text: value.to_string(),
                region,
                line,
            }),
            "comment_box" | "cb" => self.push(Element::Comment {
                style: CommentStyle::Boxed,
                text: value.to_string(),
                region,
                line,
            }),

            "new_page" | "np" => self.push(Element::PageBreak {
                variant: PageBreak::NewPage,
                region,
                line,
            }),
            "new_physical_page" | "npp" => self.push(Element::PageBreak {
                variant: PageBreak::NewPhysicalPage,
                region,
                line,
            }),
            "column_break" | "colb" => self.push(Element::PageBreak {
                variant: PageBreak::ColumnBreak,
                region,
                line,
            }),

            "define" => self.read_definition(&token, value)?,
            "chorus" => self.read_rechorus(&token, value)?,
            "image" => self.read_image(&token, value)?,
            "meta" => self.read_meta(value)?,

            _ => {
                self.document
                    .meta
                    .entry(&key)
                    .push(value.to_string());
                self.warn(&token, format!("Unknown directive: {{{}}}", key));
            }
        }

        Ok(())
    }

    /// Set one of the well known metadata fields, and also record the value
    /// in the general metadata table.
    fn set_metadata(&mut self, name: &'static str, value: &str) {
        let document = &mut self.document;
        let text = Some(value.to_string());

        match name {
            "title" => document.title = text,
            "subtitle" => document
                .subtitles
                .push(value.to_string()),
            "artist" => document.artist = text,
            "composer" => document.composer = text,
            "lyricist" => document.lyricist = text,
            "copyright" => document.copyright = text,
            "album" => document.album = text,
            "year" => document.year = text,
            "key" => document.key = text,
            "time" => document.time = text,
            "tempo" => document.tempo = text,
            "duration" => document.duration = text,
            _ => {}
        }

        document
            .meta
            .entry(name)
            .push(value.to_string());
    }

    fn read_meta(&mut self, value: &str) -> Result<(), ParsingError> {
        let (name, rest) = match value.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (value, ""),
        };
        if name.is_empty() {
            return Ok(());
        }

        let name = name.to_lowercase();
        match metadata_name(&name) {
            Some(known) => self.set_metadata(known, rest),
            None => self
                .document
                .meta
                .entry(&name)
                .push(rest.to_string()),
        }

        Ok(())
    }

    fn read_definition(&mut self, token: &Token<'i>, value: &str) -> Result<(), ParsingError> {
        let words: Vec<&str> = value
            .split_whitespace()
            .collect();
        if words.len() < 2 {
            debug!("Ignoring incomplete definition '{}'", value);
            return Ok(());
        }

        let name = words[0];
        let mut base_fret = None;
        let mut frets = Vec::new();

        let mut i = 1;
        while i < words.len() {
            match words[i] {
                "base-fret" if i + 1 < words.len() => {
                    base_fret = leading_integer(words[i + 1]).and_then(|n| u32::try_from(n).ok());
                    i += 2;
                }
                "frets" => {
                    for word in &words[i + 1..] {
                        match parse_fret(word) {
                            Some(fret) => frets.push(fret),
                            None => self.warn(
                                token,
                                format!("Invalid fret '{}' in definition of {}", word, name),
                            ),
                        }
                    }
                    break;
                }
                _ => i += 1,
            }
        }

        let shape = ChordShape {
            name: name.to_string(),
            base_fret,
            frets,
            region: self
                .state
                .current(),
            line: Some(token.line),
        };

        self.document
            .definitions
            .push(shape.clone());
        self.push(Element::ChordShape(shape));

        Ok(())
    }

    fn read_rechorus(&mut self, token: &Token<'i>, value: &str) -> Result<(), ParsingError> {
        let label = if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        };

        let chords = self
            .state
            .recall(Region::Chorus)
            .cloned()
            .unwrap_or_default();

        self.push(Element::Rechorus {
            label,
            chords,
            region: self
                .state
                .current(),
            line: Some(token.line),
        });

        Ok(())
    }

    fn read_image(&mut self, token: &Token<'i>, value: &str) -> Result<(), ParsingError> {
        let mut image = Image {
            src: String::new(),
            width: None,
            height: None,
            title: None,
            region: self
                .state
                .current(),
            line: Some(token.line),
        };

        if value.contains('=') {
            for (name, text) in attributes(value) {
                match name.as_str() {
                    "src" => image.src = text,
                    "width" => image.width = leading_integer(&text).and_then(|n| u32::try_from(n).ok()),
                    "height" => {
                        image.height = leading_integer(&text).and_then(|n| u32::try_from(n).ok())
                    }
                    "title" => image.title = Some(text),
                    _ => self.warn(token, format!("Unknown image attribute '{}'", name)),
                }
            }
        } else {
            image.src = value.to_string();
        }

        if image
            .src
            .is_empty()
        {
            self.warn(token, "Image without a source".to_string());
            return Ok(());
        }

        self.push(Element::Image(image));
        Ok(())
    }

    fn read_comment(&mut self, token: Token<'i>) -> Result<(), ParsingError> {
        if token.kind != TokenKind::Comment {
            return Err(ParsingError::IllegalParserState(token.line));
        }

        let text = token
            .text
            .strip_prefix('#')
            .unwrap_or(token.text)
            .trim();

        self.push(Element::Comment {
            style: CommentStyle::Plain,
            text: text.to_string(),
            region: self
                .state
                .current(),
            line: Some(token.line),
        });

        Ok(())
    }

    fn read_body_line(&mut self, token: Token<'i>) -> Result<(), ParsingError> {
        if token.kind != TokenKind::BodyLine {
            return Err(ParsingError::IllegalParserState(token.line));
        }

        match self
            .state
            .current()
        {
            Region::Tab => {
                self.push(Element::TabLine {
                    text: token
                        .text
                        .to_string(),
                    region: Region::Tab,
                    line: Some(token.line),
                });
                Ok(())
            }
            Region::Grid if !token
                .text
                .contains('[') =>
            {
                self.read_grid_line(token)
            }
            _ => self.read_song_line(token),
        }
    }

    fn read_song_line(&mut self, token: Token<'i>) -> Result<(), ParsingError> {
        let (phrases, sources) = split_chords(token.text);

        let chords: Vec<Option<Chord>> = sources
            .iter()
            .map(|source| self.resolve_chord(source))
            .collect();

        self.register(&chords);

        self.push(Element::SongLine(SongLine {
            region: self
                .state
                .current(),
            phrases,
            chords,
            sources,
            line: Some(token.line),
        }));

        Ok(())
    }

    fn read_grid_line(&mut self, token: Token<'i>) -> Result<(), ParsingError> {
        let words: Vec<&str> = token
            .text
            .split_whitespace()
            .collect();

        let first = words
            .iter()
            .position(|word| is_bar(word));
        let last = words
            .iter()
            .rposition(|word| is_bar(word));

        let (margin, cells, comment) = match (first, last) {
            (Some(first), Some(last)) => (
                &words[..first],
                &words[first..=last],
                &words[last + 1..],
            ),
            _ => (&words[..0], &words[..], &words[..0]),
        };

        let mut tokens = Vec::new();
        let mut chords = Vec::new();

        for cell in cells {
            let cell = *cell;
            let grid = if is_bar(cell) {
                GridToken::Bar {
                    symbol: cell.to_string(),
                }
            } else {
                match cell {
                    "%" | "%%" => GridToken::Repeat {
                        symbol: cell.to_string(),
                    },
                    "/" => GridToken::Slash,
                    "." => GridToken::Space,
                    _ => {
                        let chord = self.resolve_chord(cell);
                        chords.push(chord.clone());
                        GridToken::Chord {
                            chord,
                            source: cell.to_string(),
                        }
                    }
                }
            };
            tokens.push(grid);
        }

        self.register(&chords);

        self.push(Element::GridLine(GridLine {
            tokens,
            margin: join(margin),
            comment: join(comment),
            region: self
                .state
                .current(),
            line: Some(token.line),
        }));

        Ok(())
    }

    /// Parse a chord, applying the current transposition.
    fn resolve_chord(&self, source: &str) -> Option<Chord> {
        let chord = parse_chord(
            source,
            self.options
                .system,
        )?;

        let semitones = self
            .state
            .transpose();
        if semitones == 0 {
            Some(chord)
        } else {
            Some(transpose(&chord, semitones))
        }
    }

    /// Record newly seen chords in the document's chord table, and remember
    /// the sequence if memorizing.
    fn register(&mut self, chords: &[Option<Chord>]) {
        for chord in chords
            .iter()
            .flatten()
        {
            if self
                .document
                .chords
                .insert_new(&chord.key, chord.clone())
            {
                trace!(key = chord.key.as_str(), "new chord");
            }
        }

        if !self
            .state
            .is_memorizing()
        {
            return;
        }

        let keys = chords
            .iter()
            .map(|chord| {
                chord
                    .as_ref()
                    .map(|chord| {
                        chord
                            .key
                            .clone()
                    })
            })
            .collect();

        self.state
            .memorize(keys);
    }
}

/// Split directive text at the first colon into a case-folded key and the
/// trimmed value.
fn split_directive(text: &str) -> (String, &str) {
    let text = text.trim();
    match text.split_once(':') {
        Some((key, value)) => (
            key.trim()
                .to_lowercase(),
            value.trim(),
        ),
        None => (text.to_lowercase(), ""),
    }
}

/// Canonical name of a metadata directive, resolving abbreviations.
fn metadata_name(key: &str) -> Option<&'static str> {
    let name = match key {
        "title" | "t" => "title",
        "subtitle" | "st" => "subtitle",
        "artist" => "artist",
        "composer" => "composer",
        "lyricist" => "lyricist",
        "copyright" => "copyright",
        "album" => "album",
        "year" => "year",
        "key" => "key",
        "time" => "time",
        "tempo" => "tempo",
        "duration" => "duration",
        _ => return None,
    };
    Some(name)
}

/// Parse the integer at the start of text, ignoring anything following it,
/// so "3rd" is 3. Returns None if there are no leading digits.
fn leading_integer(text: &str) -> Option<i32> {
    let re = regex!(r"^[+-]?\d+");
    re.find(text.trim())?
        .as_str()
        .parse::<i32>()
        .ok()
}

fn parse_fret(word: &str) -> Option<Fret> {
    match word {
        "x" | "X" => Some(Fret::Muted),
        _ => word
            .parse::<u32>()
            .ok()
            .map(Fret::Fretted),
    }
}

/// Break a body line into its lyric phrases and the text of each bracketed
/// chord. There is always one more phrase than there are chords.
fn split_chords(text: &str) -> (Vec<String>, Vec<String>) {
    let re = regex!(r"\[([^\]]+)\]");

    let mut phrases = Vec::new();
    let mut sources = Vec::new();
    let mut last = 0;

    for captures in re.captures_iter(text) {
        let (whole, source) = match (captures.get(0), captures.get(1)) {
            (Some(whole), Some(source)) => (whole, source),
            _ => continue,
        };

        phrases.push(text[last..whole.start()].to_string());
        sources.push(
            source
                .as_str()
                .to_string(),
        );
        last = whole.end();
    }

    phrases.push(text[last..].to_string());
    (phrases, sources)
}

/// Bar lines in a grid are built from '|' with optional ':' and '.'
/// decorations, as in "|", "||", "|.", "|:" and ":|".
fn is_bar(word: &str) -> bool {
    word.contains('|')
        && word
            .chars()
            .all(|c| c == '|' || c == ':' || c == '.')
}

fn join(words: &[&str]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Parse name=value pairs, where a value may be double quoted to include
/// spaces.
fn attributes(text: &str) -> Vec<(String, String)> {
    let re = regex!(r#"([^\s=]+)\s*=\s*(?:"([^"]*)"?|(\S*))"#);

    re.captures_iter(text)
        .map(|captures| {
            let name = captures[1].to_lowercase();
            let value = captures
                .get(2)
                .or_else(|| captures.get(3))
                .map(|value| value.as_str())
                .unwrap_or("");
            (name, value.to_string())
        })
        .collect()
}

#[cfg(test)]
#[path = "checks/parser.rs"]
mod check;
