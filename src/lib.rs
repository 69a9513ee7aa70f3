//! An element-tree model for XML documents.
//!
//! A [`Document`] owns a mutable tree of tokens (elements, character data,
//! comments, directives and processing instructions) addressed through
//! lightweight [`Node`] handles. Documents can be read from and written to
//! byte streams with structural details preserved (CDATA sections,
//! whitespace, namespace prefixes), pretty-printed in place, and queried
//! with a compiled [`Path`] expression language.

mod access;
mod creation;
mod document;
mod encoding;
mod entity;
mod error;
mod indent;
mod manipulation;
mod namespace;
mod parse;
mod path;
mod serialize;
mod settings;
mod value;

pub use document::{Document, Node};
pub use error::{Error, PathError};
pub use indent::NO_INDENT;
pub use path::Path;
pub use settings::{CharsetReader, ReadSettings, WriteSettings};
pub use value::{
    Attribute, Comment, Directive, Element, ProcessingInstruction, Text, Value, ValueType,
};
