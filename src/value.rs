use crate::error::Error;

/// The type of an XML token.
///
/// Access it using [`Value::value_type`] or
/// [`Document::value_type`](crate::document::Document::value_type).
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ValueType {
    /// Document container that holds everything. Note that this is not the
    /// same as the root element.
    Root,
    /// Element; it has a namespace prefix, a tag and attributes.
    Element,
    /// Character data, either plain text or a CDATA section.
    Text,
    /// Comment.
    Comment,
    /// Directive, such as a DOCTYPE declaration.
    Directive,
    /// Processing instruction.
    ProcessingInstruction,
}

/// An XML token value.
///
/// Access it using [`Document::value`](crate::document::Document::value) or
/// mutably using [`Document::value_mut`](crate::document::Document::value_mut).
#[derive(Debug, Clone)]
pub enum Value {
    /// Document container that holds everything. Note that this is not the
    /// same as the root element.
    Root,
    /// Element; it has a namespace prefix, a tag and attributes.
    Element(Element),
    /// Character data, either plain text or a CDATA section.
    Text(Text),
    /// Comment.
    Comment(Comment),
    /// Directive, such as a DOCTYPE declaration.
    Directive(Directive),
    /// Processing instruction.
    ProcessingInstruction(ProcessingInstruction),
}

impl Value {
    /// Returns the type of the XML value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Root => ValueType::Root,
            Value::Element(_) => ValueType::Element,
            Value::Text(_) => ValueType::Text,
            Value::Comment(_) => ValueType::Comment,
            Value::Directive(_) => ValueType::Directive,
            Value::ProcessingInstruction(_) => ValueType::ProcessingInstruction,
        }
    }
}

/// XML element value.
///
/// Example: `<foo/>` or `<ns:foo bar="baz"/>`.
///
/// The element name is stored as a namespace prefix (possibly empty) plus a
/// local tag. Prefixes are resolved to namespace URIs dynamically, by walking
/// `xmlns` attributes up the ancestor chain; see
/// [`Document::namespace_uri`](crate::document::Document::namespace_uri).
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) space: String,
    pub(crate) tag: String,
    pub(crate) attributes: Vec<Attribute>,
}

impl Element {
    pub(crate) fn new(space: &str, tag: &str) -> Self {
        Element {
            space: space.to_string(),
            tag: tag.to_string(),
            attributes: Vec::new(),
        }
    }

    /// The namespace prefix of the element, or the empty string.
    pub fn space(&self) -> &str {
        &self.space
    }

    /// The local tag of the element.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Rename the element. The tag may include a namespace prefix followed
    /// by a colon.
    pub fn set_name(&mut self, tag: &str) {
        let (space, tag) = split_name(tag);
        self.space = space.to_string();
        self.tag = tag.to_string();
    }

    /// The complete tag, including the namespace prefix if present.
    pub fn full_tag(&self) -> String {
        if self.space.is_empty() {
            self.tag.clone()
        } else {
            format!("{}:{}", self.space, self.tag)
        }
    }

    /// The attributes of the element, in insertion order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Create an attribute with the given key and value. If an attribute
    /// with the same key already exists, its value is replaced. The key may
    /// include a namespace prefix followed by a colon.
    pub fn create_attr(&mut self, key: &str, value: impl Into<String>) -> &Attribute {
        let (space, key) = split_name(key);
        self.set_attr(space, key, value.into())
    }

    pub(crate) fn set_attr(&mut self, space: &str, key: &str, value: String) -> &Attribute {
        if let Some(i) = self
            .attributes
            .iter()
            .position(|a| a.space == space && a.key == key)
        {
            self.attributes[i].value = value;
            &self.attributes[i]
        } else {
            self.attributes.push(Attribute {
                space: space.to_string(),
                key: key.to_string(),
                value,
            });
            let last = self.attributes.len() - 1;
            &self.attributes[last]
        }
    }

    /// Remove the first attribute whose key matches. Returns the removed
    /// attribute if a match is found. The key may include a namespace prefix
    /// followed by a colon.
    pub fn remove_attr(&mut self, key: &str) -> Option<Attribute> {
        let (space, key) = split_name(key);
        let i = self
            .attributes
            .iter()
            .position(|a| a.space == space && a.key == key)?;
        Some(self.attributes.remove(i))
    }

    /// Find the first attribute matching the key. An unprefixed key matches
    /// attributes in any namespace. Returns `None` if there is no match.
    pub fn select_attr(&self, key: &str) -> Option<&Attribute> {
        let (space, key) = split_name(key);
        self.find_attr(space, key)
    }

    /// The value of the first attribute matching the key, or `default` if
    /// there is no match.
    pub fn select_attr_value<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.select_attr(key) {
            Some(a) => a.value(),
            None => default,
        }
    }

    pub(crate) fn find_attr(&self, space: &str, key: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| space_match(space, &a.space) && a.key == key)
    }

    /// Sort the attributes lexicographically by prefix, then key.
    pub fn sort_attrs(&mut self) {
        self.attributes
            .sort_by(|a, b| (&a.space, &a.key).cmp(&(&b.space, &b.key)));
    }
}

/// A key-value attribute within an element.
///
/// `xmlns` and `xmlns:prefix` declarations are stored as ordinary attributes
/// with key `xmlns` or prefix `xmlns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub(crate) space: String,
    pub(crate) key: String,
    pub(crate) value: String,
}

impl Attribute {
    /// The namespace prefix of the attribute, or the empty string.
    pub fn space(&self) -> &str {
        &self.space
    }

    /// The local key of the attribute.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The attribute value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the attribute value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// The complete key, including the namespace prefix if present.
    pub fn full_key(&self) -> String {
        if self.space.is_empty() {
            self.key.clone()
        } else {
            format!("{}:{}", self.space, self.key)
        }
    }
}

/// Character data value: plain text or a CDATA section.
///
/// Example: `Bar` in `<foo>Bar</foo>`, or `<![CDATA[Bar]]>`.
///
/// A text value carries two flags. `cdata` records that the content came
/// from, and serializes back to, a CDATA section. `whitespace` is true when
/// the content consists entirely of space, tab, carriage return and line
/// feed characters; the indenter only strips text nodes with this flag set.
#[derive(Debug, Clone)]
pub struct Text {
    pub(crate) text: String,
    pub(crate) cdata: bool,
    pub(crate) whitespace: bool,
}

impl Text {
    pub(crate) fn new(text: String) -> Self {
        let whitespace = is_whitespace_str(&text);
        Text {
            text,
            cdata: false,
            whitespace,
        }
    }

    pub(crate) fn new_cdata(text: String) -> Self {
        let whitespace = is_whitespace_str(&text);
        Text {
            text,
            cdata: true,
            whitespace,
        }
    }

    /// Get the text value.
    pub fn get(&self) -> &str {
        &self.text
    }

    /// Set the text value. The whitespace flag is recomputed; the CDATA
    /// flag is left as it is.
    pub fn set<S: Into<String>>(&mut self, text: S) {
        self.text = text.into();
        self.whitespace = is_whitespace_str(&self.text);
    }

    /// True if this value represents a CDATA section.
    pub fn is_cdata(&self) -> bool {
        self.cdata
    }

    /// True if this value contains only whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.whitespace
    }
}

/// XML comment.
///
/// Example: `<!-- foo -->`.
#[derive(Debug, Clone)]
pub struct Comment {
    pub(crate) text: String,
}

impl Comment {
    pub(crate) fn new(text: String) -> Self {
        Comment { text }
    }

    /// Get the comment text.
    pub fn get(&self) -> &str {
        &self.text
    }

    /// Set the comment text. Rejects comments that contain `--` as illegal.
    pub fn set<S: Into<String>>(&mut self, text: S) -> Result<(), Error> {
        let text = text.into();
        if text.contains("--") {
            return Err(Error::InvalidComment(text));
        }
        self.text = text;
        Ok(())
    }
}

/// XML directive.
///
/// Example: `<!DOCTYPE note SYSTEM "note.dtd">`. The stored text is the
/// part between `<!` and `>`.
#[derive(Debug, Clone)]
pub struct Directive {
    pub(crate) text: String,
}

impl Directive {
    pub(crate) fn new(text: String) -> Self {
        Directive { text }
    }

    /// Get the directive text.
    pub fn get(&self) -> &str {
        &self.text
    }

    /// Set the directive text.
    pub fn set<S: Into<String>>(&mut self, text: S) {
        self.text = text.into();
    }
}

/// XML processing instruction value.
///
/// Example: `<?foo?>` or `<?foo bar?>`. The XML declaration of a parsed
/// document is stored as a processing instruction with target `xml`.
#[derive(Debug, Clone)]
pub struct ProcessingInstruction {
    pub(crate) target: String,
    pub(crate) data: Option<String>,
}

impl ProcessingInstruction {
    pub(crate) fn new(target: String, data: Option<String>) -> Self {
        ProcessingInstruction { target, data }
    }

    /// Get processing instruction target.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Get processing instruction data.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// Set target. Rejects any target that is the string `"xml"` (or case
    /// variations) as it's reserved for XML.
    pub fn set_target<S: Into<String>>(&mut self, target: S) -> Result<(), Error> {
        let target = target.into();
        if target.eq_ignore_ascii_case("xml") {
            return Err(Error::InvalidTarget(target));
        }
        self.target = target;
        Ok(())
    }

    /// Set data.
    pub fn set_data<S: Into<String>>(&mut self, data: Option<S>) {
        self.data = data.map(|s| s.into());
    }
}

/// Split a qualified name into its namespace prefix and local part.
pub(crate) fn split_name(name: &str) -> (&str, &str) {
    match name.split_once(':') {
        Some((space, local)) => (space, local),
        None => ("", name),
    }
}

/// An empty prefix pattern matches any prefix; a non-empty one matches
/// exactly.
pub(crate) fn space_match(pattern: &str, space: &str) -> bool {
    pattern.is_empty() || pattern == space
}

pub(crate) fn is_whitespace_str(s: &str) -> bool {
    s.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
}
