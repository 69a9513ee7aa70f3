use std::rc::Rc;

use ahash::HashMap;

use crate::error::Error;

/// Decodes bytes in the named character set into UTF-8 bytes.
///
/// Installed in [`ReadSettings::charset_reader`] to take over decoding of
/// non-UTF-8 documents from the built-in `encoding_rs` support.
pub type CharsetReader = dyn Fn(&str, &[u8]) -> Result<Vec<u8>, Error>;

/// Settings that determine how a document is read.
#[derive(Clone, Default)]
pub struct ReadSettings {
    /// Decoder hook for non-UTF-8 encodings. When absent, encodings are
    /// sniffed and decoded with `encoding_rs`. Default: `None`.
    pub charset_reader: Option<Rc<CharsetReader>>,

    /// Tolerate input containing common mistakes: elements left open at the
    /// end of input are closed implicitly, and unresolvable entity
    /// references pass through as literal text. Default: `false`.
    pub permissive: bool,

    /// User-defined entities, mapping entity name to replacement text.
    /// Default: empty.
    pub entity: HashMap<String, String>,
}

impl ReadSettings {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Settings that determine how a document is written and indented.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteSettings {
    /// Force explicit end tags, even for elements without children.
    /// Default: `false`.
    pub canonical_end_tags: bool,

    /// Escape only `&`, `<` and `>` in character data. When false, `"` and
    /// `'` are escaped as well. Default: `false`.
    pub canonical_text: bool,

    /// Escape only `&`, `<` and `"` in attribute values. When false, `>`
    /// and `'` are escaped as well. Default: `false`.
    pub canonical_attr_val: bool,

    /// Use `\r\n` instead of `\n` when indenting. Default: `false`.
    pub use_crlf: bool,
}

impl WriteSettings {
    pub fn new() -> Self {
        Self::default()
    }
}
