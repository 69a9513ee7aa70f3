use xmlparser::{ElementEnd, StrSpan, Token, Tokenizer};

use crate::document::{Document, Node};
use crate::encoding::decode;
use crate::entity::parse_entities;
use crate::error::Error;
use crate::settings::ReadSettings;
use crate::value::{Comment, Directive, Element, ProcessingInstruction, Text, Value};

struct ElementBuilder {
    space: String,
    tag: String,
    attributes: Vec<(String, String, String)>,
}

impl ElementBuilder {
    fn new(prefix: StrSpan<'_>, local: StrSpan<'_>) -> Self {
        ElementBuilder {
            space: prefix.to_string(),
            tag: local.to_string(),
            attributes: Vec::new(),
        }
    }
}

// Builds the tree while the tokenizer streams. `current` tracks the
// innermost open element, seeded with the target container.
struct TreeBuilder {
    container: Node,
    current: Node,
    element: Option<ElementBuilder>,
    dtd_start: Option<usize>,
    // a strict document read allows only one element at container level
    single_root: bool,
}

impl TreeBuilder {
    fn new(container: Node, single_root: bool) -> Self {
        TreeBuilder {
            container,
            current: container,
            element: None,
            dtd_start: None,
            single_root,
        }
    }

    fn add(&mut self, value: Value, doc: &mut Document) -> Node {
        let node = doc.new_node(value);
        self.current.get().append(node.get(), doc.arena_mut());
        node
    }

    fn attribute(&mut self, space: &str, key: &str, value: String) {
        if let Some(builder) = self.element.as_mut() {
            builder
                .attributes
                .push((space.to_string(), key.to_string(), value));
        }
    }

    fn open_element(&mut self, doc: &mut Document) -> Result<(), Error> {
        let builder = match self.element.take() {
            Some(builder) => builder,
            None => return Ok(()),
        };
        if self.single_root && self.current == self.container && doc.root().is_some() {
            return Err(Error::MalformedXml(format!(
                "extra content after root element: <{}>",
                builder.tag
            )));
        }
        let mut element = Element::new(&builder.space, &builder.tag);
        for (space, key, value) in builder.attributes {
            element.set_attr(&space, &key, value);
        }
        let node = self.add(Value::Element(element), doc);
        self.current = node;
        Ok(())
    }

    fn close_element(&mut self, prefix: &str, local: &str, doc: &Document) -> Result<(), Error> {
        if self.current == self.container {
            return Err(Error::MalformedXml(format!(
                "close tag </{}> without matching open tag",
                local
            )));
        }
        match doc.element(self.current) {
            Some(el) if el.space() == prefix && el.tag() == local => {}
            _ => {
                return Err(Error::MalformedXml(format!(
                    "close tag </{}> does not match open tag",
                    local
                )));
            }
        }
        self.close_immediate(doc);
        Ok(())
    }

    fn close_immediate(&mut self, doc: &Document) {
        if let Some(parent) = doc.parent(self.current) {
            self.current = parent;
        }
    }

    fn text(&mut self, content: String, cdata: bool, doc: &mut Document) -> Result<(), Error> {
        let text = if cdata {
            Text::new_cdata(content)
        } else {
            Text::new(content)
        };
        if self.single_root && self.current == self.container && !text.is_whitespace() {
            return Err(Error::MalformedXml(
                "text outside of root element".to_string(),
            ));
        }
        self.add(Value::Text(text), doc);
        Ok(())
    }

    fn declaration(&mut self, span: StrSpan<'_>, doc: &mut Document) {
        // The declaration round-trips as a processing instruction with the
        // reserved target.
        let data = span
            .as_str()
            .trim_start_matches("<?xml")
            .trim_end_matches("?>")
            .trim();
        let pi = ProcessingInstruction::new(
            "xml".to_string(),
            if data.is_empty() {
                None
            } else {
                Some(data.to_string())
            },
        );
        self.add(Value::ProcessingInstruction(pi), doc);
    }

    fn directive(&mut self, text: &str, doc: &mut Document) {
        self.add(Value::Directive(Directive::new(text.to_string())), doc);
    }
}

/// ## Reading
impl Document {
    /// Parse XML from a string and store the result as new children of the
    /// document container. The container is not cleared first; reading into
    /// a non-empty document appends.
    pub fn read_str(&mut self, xml: &str) -> Result<(), Error> {
        let settings = self.read_settings.clone();
        let container = self.container;
        self.read_with(container, xml, &settings, false)
    }

    /// Parse an XML fragment from a string and store the result as new
    /// children of the given element. A fragment may contain multiple
    /// top-level elements and top-level text.
    pub fn read_into(&mut self, element: Node, xml: &str) -> Result<(), Error> {
        if self.element(element).is_none() {
            return Err(Error::InvalidOperation(
                "target must be an element".to_string(),
            ));
        }
        let settings = self.read_settings.clone();
        self.read_with(element, xml, &settings, true)
    }

    /// Decode and parse XML from raw bytes; see
    /// [`Document::read_str`]. The character set is sniffed from the
    /// document, with [`ReadSettings::charset_reader`] taking precedence
    /// for non-UTF-8 input.
    pub fn read_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let settings = self.read_settings.clone();
        let xml = decode(bytes, &settings)?;
        let container = self.container;
        self.read_with(container, &xml, &settings, false)
    }

    /// Read XML from a byte source into the document. Returns the number of
    /// bytes consumed.
    pub fn read_from<R: std::io::Read>(&mut self, mut reader: R) -> Result<u64, Error> {
        let mut bytes = Vec::new();
        let count = reader.read_to_end(&mut bytes)? as u64;
        self.read_bytes(&bytes)?;
        Ok(count)
    }

    fn read_with(
        &mut self,
        container: Node,
        xml: &str,
        settings: &ReadSettings,
        fragment: bool,
    ) -> Result<(), Error> {
        let tokenizer = if fragment {
            Tokenizer::from_fragment(xml, 0..xml.len())
        } else {
            Tokenizer::from(xml)
        };

        let mut builder = TreeBuilder::new(container, !fragment && !settings.permissive);
        for token in tokenizer {
            let token = match token {
                Ok(token) => token,
                // A permissive read keeps whatever was built before the
                // tokenizer gave up.
                Err(_) if settings.permissive => break,
                Err(e) => return Err(e.into()),
            };
            match token {
                Token::Declaration { span, .. } => {
                    builder.declaration(span, self);
                }
                Token::ProcessingInstruction {
                    target, content, ..
                } => {
                    let pi = ProcessingInstruction::new(
                        target.to_string(),
                        content.map(|c| c.to_string()),
                    );
                    builder.add(Value::ProcessingInstruction(pi), self);
                }
                Token::Comment { text, .. } => {
                    builder.add(Value::Comment(Comment::new(text.to_string())), self);
                }
                Token::DtdStart { span, .. } => {
                    builder.dtd_start = Some(span.start());
                }
                Token::EntityDeclaration { .. } => {}
                Token::DtdEnd { span, .. } => {
                    if let Some(start) = builder.dtd_start.take() {
                        let text = &xml[start + 2..span.end() - 1];
                        builder.directive(text, self);
                    }
                }
                Token::EmptyDtd { span, .. } => {
                    let text = &xml[span.start() + 2..span.end() - 1];
                    builder.directive(text, self);
                }
                Token::ElementStart { prefix, local, .. } => {
                    builder.element = Some(ElementBuilder::new(prefix, local));
                }
                Token::Attribute {
                    prefix,
                    local,
                    value,
                    ..
                } => {
                    let value = parse_entities(value.as_str(), settings)?.into_owned();
                    builder.attribute(prefix.as_str(), local.as_str(), value);
                }
                Token::ElementEnd { end, .. } => match end {
                    ElementEnd::Open => builder.open_element(self)?,
                    ElementEnd::Empty => {
                        builder.open_element(self)?;
                        builder.close_immediate(self);
                    }
                    ElementEnd::Close(prefix, local) => {
                        builder.close_element(prefix.as_str(), local.as_str(), self)?;
                    }
                },
                Token::Text { text } => {
                    let content = parse_entities(text.as_str(), settings)?.into_owned();
                    builder.text(content, false, self)?;
                }
                Token::Cdata { text, .. } => {
                    builder.text(text.to_string(), true, self)?;
                }
            }
        }

        if builder.current != container && !settings.permissive {
            return Err(Error::MalformedXml(
                "element left open at end of input".to_string(),
            ));
        }
        Ok(())
    }
}
