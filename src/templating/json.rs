//! Document emitted as JSON, for consumption by other programs

use tracing::debug;

use crate::language::{Document, RenderingError};

use super::Template;

pub struct Json;

impl Template for Json {
    fn render(&self, document: &Document) -> Result<String, RenderingError> {
        serde_json::to_string_pretty(document).map_err(|error| {
            debug!(?error);
            RenderingError {
                problem: "Failed converting to JSON".to_string(),
                details: error.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod check {
    use super::*;
    use crate::language::*;

    #[test]
    fn document_as_json() {
        let mut document = Document::default();
        document.title = Some("Amazing Grace".to_string());
        document
            .settings
            .insert("capo", Value::Integer(2));
        document
            .definitions
            .push(ChordShape {
                name: "D".to_string(),
                base_fret: None,
                frets: vec![Fret::Muted, Fret::Fretted(0)],
                region: Region::Default,
                line: Some(1),
            });

        let result = Json
            .render(&document)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(value["title"], "Amazing Grace");
        assert_eq!(value["settings"]["capo"], 2);
        assert_eq!(value["definitions"][0]["frets"][0], -1);
        assert_eq!(value["definitions"][0]["frets"][1], 0);
    }
}
