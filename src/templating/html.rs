//! Standalone HTML page for a song, with chords set above their lyrics

use serde::Serialize;
use tinytemplate::TinyTemplate;
use tracing::debug;

use crate::formatting::formatter::{chord_names, diagram, directive, heading, metadata};
use crate::language::*;

use super::Template;

static CSS: &str = r#"
body { font-family: sans-serif; margin: 2em; }
h1 { margin-bottom: 0.2em; }
h2 { font-weight: normal; margin-top: 0; }
.meta-label { font-weight: bold; margin-left: 1em; }
.definitions { display: flex; flex-wrap: wrap; gap: 1em; margin: 1em 0; }
.definition { border: 1px solid #ccc; padding: 0.5em; }
.definition-name { font-weight: bold; color: #3465a4; }
.definition-directive { font-size: 0.8em; color: #777; }
.context-label { font-weight: bold; color: #75507b; margin-top: 1em; }
.region { margin-bottom: 1em; }
.region-chorus { border-left: 3px solid #75507b; padding-left: 1em; }
.songline { display: flex; flex-wrap: wrap; }
.pair { display: inline-flex; flex-direction: column; white-space: pre; }
.chord-text { color: #3465a4; font-weight: bold; min-height: 1.2em; padding-right: 0.3em; }
.comment { color: #4e9a06; }
.comment-italic { color: #4e9a06; font-style: italic; }
.comment-box { color: #4e9a06; border: 1px solid #4e9a06; display: inline-block; padding: 0 0.3em; }
.tab, .grid, .diagram { font-family: monospace; white-space: pre; }
.page-break-after { page-break-after: always; border-bottom: 1px dashed #ccc; }
.column-break-after { break-after: column; }
.rechorus { font-style: italic; }
"#;

static TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{css | unescaped}</style>
</head>
<body>
<div class="header">
{{ if title }}<h1>{title}</h1>
{{ endif }}{{ for subtitle in subtitles }}<h2>{subtitle}</h2>
{{ endfor }}{{ if meta }}<div class="meta">{{ for item in meta }}<span class="meta-label">{item.label}:</span> <span class="meta-value">{item.value}</span>{{ endfor }}</div>
{{ endif }}</div>
{{ if definitions }}<div class="definitions">
{{ for card in definitions }}<div class="definition">
<div class="definition-name">{card.name}</div>
<div class="definition-directive">{card.directive}</div>
<div class="diagram">{card.diagram}</div>
</div>
{{ endfor }}</div>
{{ endif }}{{ for section in sections }}{{ if section.heading }}<div class="context-label">{section.heading}</div>
{{ endif }}<div class="region region-{section.region}">
{{ for block in section.blocks }}{{ if block.pairs }}<div class="songline">{{ for pair in block.pairs }}<span class="pair"><span class="chord-text">{pair.chord}</span><span class="lyric-text">{{ if pair.lyric }}{pair.lyric}{{ else }}&nbsp;{{ endif }}</span></span>{{ endfor }}</div>
{{ else }}{{ if block.image }}<img class="image" src="{block.image}" alt="{block.text}">
{{ else }}<div class="{block.class}">{block.text}</div>
{{ endif }}{{ endif }}{{ endfor }}</div>
{{ endfor }}</body>
</html>
"#;

/// Template producing a complete HTML page, styled inline.
pub struct Html;

#[derive(Serialize)]
struct Context {
    css: &'static str,
    title: String,
    subtitles: Vec<String>,
    meta: Vec<Item>,
    definitions: Vec<Card>,
    sections: Vec<Section>,
}

#[derive(Serialize)]
struct Item {
    label: &'static str,
    value: String,
}

#[derive(Serialize)]
struct Card {
    name: String,
    directive: String,
    diagram: String,
}

/// A run of consecutive body elements from the same region.
#[derive(Serialize)]
struct Section {
    heading: String,
    region: &'static str,
    blocks: Vec<Block>,
}

#[derive(Serialize, Default)]
struct Block {
    class: &'static str,
    text: String,
    pairs: Vec<Pair>,
    image: String,
}

#[derive(Serialize)]
struct Pair {
    chord: String,
    lyric: String,
}

impl Template for Html {
    fn render(&self, document: &Document) -> Result<String, RenderingError> {
        let context = context(document);

        let mut tt = TinyTemplate::new();
        tt.add_formatter("unescaped", tinytemplate::format_unescaped);

        tt.add_template("song", TEMPLATE)
            .map_err(|error| failure("Invalid HTML template", error))?;

        tt.render("song", &context)
            .map_err(|error| failure("Failed rendering HTML", error))
    }
}

fn failure(problem: &str, error: tinytemplate::error::Error) -> RenderingError {
    debug!(?error);
    RenderingError {
        problem: problem.to_string(),
        details: error.to_string(),
    }
}

fn context(document: &Document) -> Context {
    let meta = metadata(document)
        .into_iter()
        .map(|(label, value)| Item { label, value })
        .collect();

    let definitions = document
        .definitions
        .iter()
        .map(|shape| Card {
            name: shape
                .name
                .clone(),
            directive: directive(shape),
            diagram: diagram(shape).join("\n"),
        })
        .collect();

    Context {
        css: CSS,
        title: document
            .title
            .clone()
            .unwrap_or_default(),
        subtitles: document
            .subtitles
            .clone(),
        meta,
        definitions,
        sections: sections(document),
    }
}

/// Group body elements by region, opening a new section each time the
/// region changes. Blank lines and chord shapes are not shown in the body
/// and so never open a section.
fn sections(document: &Document) -> Vec<Section> {
    let mut result: Vec<Section> = Vec::new();

    for element in &document.body {
        let block = match block(document, element) {
            Some(block) => block,
            None => continue,
        };

        let region = element.region();
        let same = result
            .last()
            .map(|section| section.region == region.as_str())
            .unwrap_or(false);

        if !same {
            result.push(Section {
                heading: match region {
                    Region::Default => String::new(),
                    _ => heading(region),
                },
                region: region.as_str(),
                blocks: Vec::new(),
            });
        }

        if let Some(section) = result.last_mut() {
            section
                .blocks
                .push(block);
        }
    }

    result
}

fn block(document: &Document, element: &Element) -> Option<Block> {
    let block = match element {
        Element::SongLine(line) => {
            let mut pairs = Vec::new();
            if let Some(first) = line
                .phrases
                .first()
            {
                if !first.is_empty() || line
                    .chords
                    .is_empty()
                {
                    pairs.push(Pair {
                        chord: String::new(),
                        lyric: first.clone(),
                    });
                }
            }
            for (chord, source, phrase) in line.pairs() {
                pairs.push(Pair {
                    chord: match chord {
                        Some(chord) => chord
                            .display
                            .clone(),
                        None => source.to_string(),
                    },
                    lyric: phrase.to_string(),
                });
            }
            Block {
                class: "songline",
                pairs,
                ..Block::default()
            }
        }
        Element::Comment { style, text, .. } => Block {
            class: match style {
                CommentStyle::Plain => "comment",
                CommentStyle::Italic => "comment-italic",
                CommentStyle::Boxed => "comment-box",
            },
            text: text.clone(),
            ..Block::default()
        },
        Element::TabLine { text, .. } => Block {
            class: "tab",
            text: text.clone(),
            ..Block::default()
        },
        Element::GridLine(grid) => Block {
            class: "grid",
            text: grid_text(grid),
            ..Block::default()
        },
        Element::PageBreak { variant, .. } => Block {
            class: match variant {
                PageBreak::NewPage | PageBreak::NewPhysicalPage => "page-break-after",
                PageBreak::ColumnBreak => "column-break-after",
            },
            ..Block::default()
        },
        Element::Image(image) => Block {
            class: "image",
            text: image
                .title
                .clone()
                .unwrap_or_default(),
            image: image
                .src
                .clone(),
            ..Block::default()
        },
        Element::Rechorus { label, chords, .. } => {
            let mut text = heading(Region::Chorus);
            if let Some(label) = label {
                text.push_str(": ");
                text.push_str(label);
            }
            let names = chord_names(document, chords);
            if !names.is_empty() {
                text.push_str(" (");
                text.push_str(&names.join(" "));
                text.push(')');
            }
            Block {
                class: "rechorus",
                text,
                ..Block::default()
            }
        }
        Element::Blank { .. } | Element::ChordShape(_) => return None,
    };

    Some(block)
}

fn grid_text(grid: &GridLine) -> String {
    let mut words: Vec<&str> = Vec::new();

    if let Some(margin) = &grid.margin {
        words.push(margin.as_str());
    }
    for token in &grid.tokens {
        words.push(match token {
            GridToken::Bar { symbol } => symbol.as_str(),
            GridToken::Chord { chord, source } => match chord {
                Some(chord) => chord
                    .display
                    .as_str(),
                None => source.as_str(),
            },
            GridToken::Repeat { symbol } => symbol.as_str(),
            GridToken::Slash => "/",
            GridToken::Space => ".",
        });
    }
    if let Some(comment) = &grid.comment {
        words.push(comment.as_str());
    }

    words.join(" ")
}

#[cfg(test)]
mod check {
    use super::*;
    use crate::parsing::parse;

    fn html(source: &str) -> String {
        let parsed = parse(source);
        Html.render(&parsed.document)
            .unwrap()
    }

    #[test]
    fn header_and_lines() {
        let result = html("{title: Amazing Grace}\n{artist: Newton}\n[G]Amazing [C]grace\n");

        assert!(result.starts_with("<!DOCTYPE html>"));
        assert!(result.contains("<h1>Amazing Grace</h1>"));
        assert!(result.contains(r#"<span class="meta-label">Artist:</span> <span class="meta-value">Newton</span>"#));
        assert!(result.contains(r#"<span class="chord-text">G</span><span class="lyric-text">Amazing </span>"#));
        assert!(result.contains(r#"<span class="chord-text">C</span><span class="lyric-text">grace</span>"#));
        assert!(result.contains(".chord-text {"));
    }

    #[test]
    fn empty_lyrics_are_held_open() {
        let result = html("[G][C]\n");
        assert!(result.contains(r#"<span class="lyric-text">&nbsp;</span>"#));
    }

    #[test]
    fn text_is_escaped() {
        let result = html("{comment: Fish & <chips>}\n");
        assert!(result.contains(r#"<div class="comment">Fish &amp; &lt;chips&gt;</div>"#));
    }

    #[test]
    fn regions_open_sections() {
        let document = parse("Intro\n{soc}\n[C]La\n{eoc}\n\nOutro\n").document;
        let sections = sections(&document);

        let regions: Vec<&str> = sections
            .iter()
            .map(|section| section.region)
            .collect();
        assert_eq!(regions, vec!["default", "chorus", "default"]);
        assert_eq!(sections[0].heading, "");
        assert_eq!(sections[1].heading, "Chorus");
        assert_eq!(sections[1].blocks.len(), 1);
        assert_eq!(sections[2].blocks.len(), 1);
    }

    #[test]
    fn definition_cards() {
        let result = html("{define: Am base-fret 1 frets x 0 2 2 1 0}\n");
        assert!(result.contains(r#"<div class="definition-name">Am</div>"#));
        assert!(result.contains("{define: Am base-fret 1 frets x 0 2 2 1 0}"));
        assert!(result.contains("e | 0\nB | 1"));
    }

    #[test]
    fn breaks_and_grids() {
        let result = html("{np}\n{colb}\n{sog}\n| A . | D |\n{eog}\n");
        assert!(result.contains(r#"<div class="page-break-after"></div>"#));
        assert!(result.contains(r#"<div class="column-break-after"></div>"#));
        assert!(result.contains(r#"<div class="grid">| A . | D |</div>"#));
    }
}
