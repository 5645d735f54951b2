// Types representing songs compiled from ChordPro source

mod chord;
mod diagnostic;
mod error;
mod table;
mod types;

// Re-export all public symbols
pub use chord::*;
pub use diagnostic::*;
pub use error::*;
pub use table::*;
pub use types::*;
