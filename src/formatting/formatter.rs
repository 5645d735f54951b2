//! Plain text layout of a song, with chords above the lyrics

use crate::formatting::*;
use crate::language::*;

pub fn format_song(document: &Document, width: u8) -> Vec<(Syntax, String)> {
    let mut output = Formatter::new(document, width);

    output.format_header();
    output.format_definitions();
    output.format_body();

    // Flush any remaining content
    output.flush_current();

    // Drop a trailing empty line
    if output.gap {
        output
            .fragments
            .pop();
    }

    // Add final newline if needed
    if let Some((_, last_content)) = output
        .fragments
        .last()
    {
        if !last_content.ends_with('\n') {
            output.append_fragment(Syntax::Newline, "\n");
        }
    }

    output.fragments
}

/// Draw a fingering chart for a chord shape, highest string first. Returns
/// no lines if the shape has no frets.
pub fn diagram(shape: &ChordShape) -> Vec<String> {
    const LABELS: [&str; 6] = ["e", "B", "G", "D", "A", "E"];

    if shape
        .frets
        .is_empty()
    {
        return Vec::new();
    }

    let mut lines = Vec::new();

    match shape.base_fret {
        None | Some(0) | Some(1) => lines.push("┌─┬─┬─┬─┐".to_string()),
        Some(base) => lines.push(format!("({}fr)", base)),
    }

    for (i, fret) in shape
        .frets
        .iter()
        .rev()
        .enumerate()
    {
        let label = LABELS
            .get(i)
            .copied()
            .unwrap_or("");
        lines.push(format!("{} | {}", label, fret));
    }

    lines.push("├─┼─┼─┼─┤".to_string());
    lines
}

/// Reconstruct the define directive that would produce this shape.
pub fn directive(shape: &ChordShape) -> String {
    let mut result = format!("{{define: {} ", shape.name);
    if let Some(base) = shape.base_fret {
        result.push_str(&format!("base-fret {} ", base));
    }
    result.push_str("frets");
    for fret in &shape.frets {
        result.push(' ');
        result.push_str(&fret.to_string());
    }
    result.push('}');
    result
}

/// Labelled metadata shown in the header of a song, in display order.
pub fn metadata(document: &Document) -> Vec<(&'static str, String)> {
    let items = [
        ("Artist", &document.artist),
        ("Composer", &document.composer),
        ("Lyricist", &document.lyricist),
        ("Album", &document.album),
        ("Year", &document.year),
        ("Key", &document.key),
        ("Time", &document.time),
        ("Tempo", &document.tempo),
        ("Duration", &document.duration),
    ];

    let mut result: Vec<(&'static str, String)> = items
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .as_ref()
                .map(|value| (label, value.clone()))
        })
        .collect();

    if let Some(capo) = document.capo {
        result.push(("Capo", capo.to_string()));
    }

    result
}

/// Display names for a sequence of recalled chord keys. Keys no longer in
/// the chord table are shown as they are.
pub fn chord_names<'a>(document: &'a Document, keys: &'a [Option<String>]) -> Vec<&'a str> {
    keys.iter()
        .flatten()
        .map(|key| {
            document
                .chords
                .get(key)
                .map(|chord| chord.display.as_str())
                .unwrap_or(key.as_str())
        })
        .collect()
}

/// Capitalized name of a region, used as a section heading.
pub fn heading(region: Region) -> String {
    let name = region.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars)
            .collect(),
        None => String::new(),
    }
}

struct Formatter<'d> {
    document: &'d Document,
    fragments: Vec<(Syntax, String)>,
    width: u8,
    current: Syntax,
    buffer: String,
    region: Region,
    gap: bool,
}

impl<'d> Formatter<'d> {
    fn new(document: &'d Document, width: u8) -> Formatter<'d> {
        Formatter {
            document,
            fragments: Vec::new(),
            width,
            current: Syntax::Neutral,
            buffer: String::new(),
            region: Region::Default,
            gap: false,
        }
    }

    fn append_fragment(&mut self, syntax: Syntax, content: &str) {
        self.fragments
            .push((syntax, content.to_string()));
    }

    /// Append content with specific syntax tagging, maintaining order
    fn append(&mut self, syntax: Syntax, content: &str) {
        // Flush any pending buffer content first to maintain order
        self.flush_current();
        if content.is_empty() {
            return;
        }
        self.fragments
            .push((syntax, content.to_string()));
        self.gap = false;
    }

    fn flush_current(&mut self) {
        if !self
            .buffer
            .is_empty()
        {
            self.fragments
                .push((
                    self.current,
                    self.buffer
                        .clone(),
                ));
            self.buffer
                .clear();
            self.gap = false;
        }
    }

    fn append_char(&mut self, c: char) {
        if c == '\n' {
            // Flush any existing buffer before adding newline
            self.flush_current();
            self.append_fragment(Syntax::Newline, "\n");
        } else {
            self.buffer
                .push(c);
        }
    }

    fn pad(&mut self, count: usize) {
        if count > 0 {
            self.append(Syntax::Indent, &" ".repeat(count));
        }
    }

    fn is_empty(&self) -> bool {
        self.fragments
            .is_empty()
            && self
                .buffer
                .is_empty()
    }

    /// Separate what follows with a single empty line. Repeated gaps
    /// collapse, and nothing is emitted at the very start.
    fn gap(&mut self) {
        if self.is_empty() || self.gap {
            return;
        }
        self.append_char('\n');
        self.gap = true;
    }

    fn format_header(&mut self) {
        let document = self.document;

        if let Some(title) = &document.title {
            self.append(Syntax::Title, title);
            self.append_char('\n');
        }

        for subtitle in &document.subtitles {
            self.append(Syntax::Subtitle, subtitle);
            self.append_char('\n');
        }

        let items = metadata(document);
        for (i, (label, value)) in items
            .iter()
            .enumerate()
        {
            if i > 0 {
                self.pad(2);
            }
            self.append(Syntax::Label, &format!("{}:", label));
            self.append_char(' ');
            self.append(Syntax::Metadata, value);
        }
        if !items.is_empty() {
            self.append_char('\n');
        }

        if let Some(copyright) = &document.copyright {
            self.append(Syntax::Metadata, &format!("© {}", copyright));
            self.append_char('\n');
        }

        self.gap();
    }

    fn format_definitions(&mut self) {
        let document = self.document;

        for shape in &document.definitions {
            self.append(Syntax::Chord, &shape.name);
            self.append_char('\n');
            for line in diagram(shape) {
                self.append(Syntax::Diagram, &line);
                self.append_char('\n');
            }
            self.gap();
        }
    }

    fn format_body(&mut self) {
        let document = self.document;
        let mut previous = None;

        for element in &document.body {
            // Every newline in the source is recorded, including the one
            // ending a line of content, so only a Blank starting its own line
            // is actually an empty line.
            if let Element::Blank { line, .. } = element {
                if line.is_none() || *line != previous {
                    self.gap();
                }
                previous = *line;
                continue;
            }
            previous = element.line();

            self.enter(element.region());

            match element {
                Element::SongLine(line) => self.format_song_line(line),
                Element::Comment { style, text, .. } => self.format_comment(*style, text),
                Element::Blank { .. } => {}
                Element::TabLine { text, .. } => {
                    self.append(Syntax::Tab, text);
                    self.append_char('\n');
                }
                Element::GridLine(grid) => self.format_grid_line(grid),
                Element::ChordShape(_) => {
                    // drawn with the other definitions
                }
                Element::PageBreak { variant, .. } => match variant {
                    PageBreak::NewPage | PageBreak::NewPhysicalPage => {
                        self.gap();
                        self.append(Syntax::Structure, &"-".repeat(self.width as usize));
                        self.append_char('\n');
                        self.gap();
                    }
                    PageBreak::ColumnBreak => {}
                },
                Element::Image(image) => self.format_image(image),
                Element::Rechorus { label, chords, .. } => self.format_rechorus(label, chords),
            }
        }
    }

    fn enter(&mut self, region: Region) {
        if region == self.region {
            return;
        }
        self.region = region;
        self.gap();

        if region != Region::Default {
            self.append(Syntax::Section, &heading(region));
            self.append_char('\n');
        }
    }

    fn format_song_line(&mut self, line: &SongLine) {
        if line
            .chords
            .is_empty()
        {
            for phrase in &line.phrases {
                self.append(Syntax::Lyric, phrase);
            }
            self.append_char('\n');
            return;
        }

        let has_lyrics = line
            .phrases
            .iter()
            .any(|phrase| {
                !phrase
                    .trim()
                    .is_empty()
            });

        let mut segments: Vec<Segment> = Vec::new();
        if let Some(first) = line
            .phrases
            .first()
        {
            if !first.is_empty() {
                segments.push(Segment::new(None, first));
            }
        }
        for (chord, source, phrase) in line.pairs() {
            let label = match chord {
                Some(chord) => chord
                    .display
                    .clone(),
                None => source.to_string(),
            };
            segments.push(Segment::new(Some(label), phrase));
        }

        // Wrap at segment boundaries, always placing at least one segment
        // on each row.
        let limit = self.width as usize;
        let mut start = 0;
        let mut used = 0;
        for i in 0..segments.len() {
            let width = segments[i].width();
            if i > start && used + width > limit {
                self.format_row(&segments[start..i], has_lyrics);
                start = i;
                used = 0;
            }
            used += width;
        }
        self.format_row(&segments[start..], has_lyrics);
    }

    fn format_row(&mut self, segments: &[Segment], has_lyrics: bool) {
        let last = segments
            .len()
            .saturating_sub(1);

        let has_chords = segments
            .iter()
            .any(|segment| {
                segment
                    .chord
                    .is_some()
            });

        if has_chords {
            for (i, segment) in segments
                .iter()
                .enumerate()
            {
                let used = match &segment.chord {
                    Some(chord) => {
                        self.append(Syntax::Chord, chord);
                        chord
                            .chars()
                            .count()
                    }
                    None => 0,
                };
                if i < last {
                    self.pad(segment.width() - used);
                }
            }
            self.append_char('\n');
        }

        if !has_lyrics {
            return;
        }

        for (i, segment) in segments
            .iter()
            .enumerate()
        {
            if i == last {
                self.append(
                    Syntax::Lyric,
                    segment
                        .lyric
                        .trim_end(),
                );
            } else {
                self.append(Syntax::Lyric, &segment.lyric);
                self.pad(
                    segment.width()
                        - segment
                            .lyric
                            .chars()
                            .count(),
                );
            }
        }
        self.append_char('\n');
    }

    fn format_comment(&mut self, style: CommentStyle, text: &str) {
        match style {
            CommentStyle::Plain => self.append(Syntax::Comment, text),
            CommentStyle::Italic => self.append(Syntax::Italic, text),
            CommentStyle::Boxed => {
                let border = format!(
                    "+{}+",
                    "-".repeat(
                        text.chars()
                            .count()
                            + 2
                    )
                );
                self.append(Syntax::Structure, &border);
                self.append_char('\n');
                self.append(Syntax::Structure, "| ");
                self.append(Syntax::Boxed, text);
                self.append(Syntax::Structure, " |");
                self.append_char('\n');
                self.append(Syntax::Structure, &border);
            }
        }
        self.append_char('\n');
    }

    fn format_grid_line(&mut self, grid: &GridLine) {
        if let Some(margin) = &grid.margin {
            self.append(Syntax::Label, margin);
            self.append_char(' ');
        }

        for (i, token) in grid
            .tokens
            .iter()
            .enumerate()
        {
            if i > 0 {
                self.append_char(' ');
            }
            match token {
                GridToken::Bar { symbol } => self.append(Syntax::Bar, symbol),
                GridToken::Chord { chord, source } => {
                    let label = match chord {
                        Some(chord) => &chord.display,
                        None => source,
                    };
                    self.append(Syntax::Chord, label);
                }
                GridToken::Repeat { symbol } => self.append(Syntax::Bar, symbol),
                GridToken::Slash => self.append(Syntax::Neutral, "/"),
                GridToken::Space => self.append(Syntax::Neutral, "."),
            }
        }

        if let Some(comment) = &grid.comment {
            self.append_char(' ');
            self.append(Syntax::Comment, comment);
        }

        self.append_char('\n');
    }

    fn format_image(&mut self, image: &Image) {
        self.append(Syntax::Label, "Image:");
        self.append_char(' ');
        self.append(Syntax::Neutral, &image.src);
        if let Some(title) = &image.title {
            self.append_char(' ');
            self.append(Syntax::Comment, &format!("({})", title));
        }
        self.append_char('\n');
    }

    fn format_rechorus(&mut self, label: &Option<String>, chords: &[Option<String>]) {
        let document = self.document;

        self.gap();
        self.append(Syntax::Section, &heading(Region::Chorus));
        if let Some(label) = label {
            self.append(Syntax::Neutral, ": ");
            self.append(Syntax::Neutral, label);
        }
        self.append_char('\n');

        let names = chord_names(document, chords);

        for (i, name) in names
            .iter()
            .enumerate()
        {
            if i > 0 {
                self.pad(2);
            }
            self.append(Syntax::Chord, name);
        }
        if !names.is_empty() {
            self.append_char('\n');
        }
        self.gap();
    }
}

/// A chord and the lyric beneath it, as laid out in one column.
struct Segment {
    chord: Option<String>,
    lyric: String,
}

impl Segment {
    fn new(chord: Option<String>, lyric: &str) -> Segment {
        Segment {
            chord,
            lyric: lyric.to_string(),
        }
    }

    /// Columns occupied. A chord is always followed by at least one space
    /// so that adjacent chords don't run together.
    fn width(&self) -> usize {
        let lyric = self
            .lyric
            .chars()
            .count();
        match &self.chord {
            Some(chord) => lyric.max(
                chord
                    .chars()
                    .count()
                    + 1,
            ),
            None => lyric,
        }
    }
}

#[cfg(test)]
mod check {
    use super::*;

    fn shape(base_fret: Option<u32>, frets: Vec<Fret>) -> ChordShape {
        ChordShape {
            name: "Am".to_string(),
            base_fret,
            frets,
            region: Region::Default,
            line: Some(1),
        }
    }

    #[test]
    fn segment_widths() {
        assert_eq!(Segment::new(None, "Hello ").width(), 6);
        assert_eq!(Segment::new(Some("G".to_string()), "world").width(), 5);
        assert_eq!(Segment::new(Some("Cmaj7".to_string()), "a").width(), 6);
        assert_eq!(Segment::new(Some("C".to_string()), "").width(), 2);
    }

    #[test]
    fn drawing_diagrams() {
        let frets = vec![
            Fret::Muted,
            Fret::Fretted(0),
            Fret::Fretted(2),
            Fret::Fretted(2),
            Fret::Fretted(1),
            Fret::Fretted(0),
        ];

        let lines = diagram(&shape(Some(1), frets.clone()));
        assert_eq!(
            lines,
            vec![
                "┌─┬─┬─┬─┐",
                "e | 0",
                "B | 1",
                "G | 2",
                "D | 2",
                "A | 0",
                "E | x",
                "├─┼─┼─┼─┤",
            ]
        );

        let lines = diagram(&shape(Some(5), frets));
        assert_eq!(lines[0], "(5fr)");

        assert!(diagram(&shape(None, vec![])).is_empty());
    }

    #[test]
    fn reconstructing_directives() {
        let s = shape(
            Some(3),
            vec![Fret::Muted, Fret::Fretted(0), Fret::Fretted(2)],
        );
        assert_eq!(directive(&s), "{define: Am base-fret 3 frets x 0 2}");

        let s = shape(None, vec![Fret::Fretted(0)]);
        assert_eq!(directive(&s), "{define: Am frets 0}");
    }

    #[test]
    fn region_headings() {
        assert_eq!(heading(Region::Chorus), "Chorus");
        assert_eq!(heading(Region::Tab), "Tab");
    }
}
