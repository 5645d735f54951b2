//! Templates for rendering compiled songs into formatted output

mod html;
mod json;
mod template;

pub use html::Html;
pub use json::Json;
pub use template::Template;

use crate::language::{Document, RenderingError};

/// Render a Document using the specified template
pub fn fill(template: &impl Template, document: &Document) -> Result<String, RenderingError> {
    template.render(document)
}
