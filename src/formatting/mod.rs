//! Layout of a compiled song as tagged text fragments

pub mod formatter;
mod syntax;

pub use syntax::*;
