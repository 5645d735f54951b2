pub mod formatting;
pub mod language;
pub mod parsing;
pub mod rendering;
pub mod templating;
