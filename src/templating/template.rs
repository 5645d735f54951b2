//! Template trait for rendering compiled songs

use crate::language::{Document, RenderingError};

/// Trait for templates that transform a compiled song into a finished
/// output format.
pub trait Template {
    /// Render a Document into the template's output format
    fn render(&self, document: &Document) -> Result<String, RenderingError>;
}
