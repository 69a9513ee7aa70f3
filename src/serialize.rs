use std::io::{BufWriter, Write};

use indextree::NodeEdge;

use crate::document::{Document, Node};
use crate::entity::{escape, EscapeMode};
use crate::error::Error;
use crate::settings::WriteSettings;
use crate::value::Value;

// Write adapter that keeps an exact count of the bytes passed through.
struct CountingWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        CountingWriter { inner, written: 0 }
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// ## Writing
impl Document {
    /// Serialize the document to the writer: the container's children in
    /// document order, never the container itself. Returns the exact
    /// number of bytes written.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<u64, Error> {
        self.write_node(self.container, writer)
    }

    /// Serialize the subtree rooted at `node` to the writer. Passing the
    /// container is equivalent to [`Document::write_to`]. Returns the
    /// number of bytes written.
    pub fn write_node<W: Write>(&self, node: Node, writer: W) -> Result<u64, Error> {
        let mut counting = CountingWriter::new(writer);
        {
            let mut buffered = BufWriter::new(&mut counting);
            self.write_subtree(node, &mut buffered)?;
            buffered.flush()?;
        }
        Ok(counting.written)
    }

    /// Serialize the document into a byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::new();
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Serialize the document into a string.
    pub fn to_xml_string(&self) -> Result<String, Error> {
        let bytes = self.to_bytes()?;
        Ok(String::from_utf8(bytes).expect("serializer emitted invalid UTF-8"))
    }

    /// Serialize the subtree rooted at `node` into a string.
    pub fn node_to_xml_string(&self, node: Node) -> Result<String, Error> {
        let mut bytes = Vec::new();
        self.write_node(node, &mut bytes)?;
        Ok(String::from_utf8(bytes).expect("serializer emitted invalid UTF-8"))
    }

    fn write_subtree(&self, node: Node, w: &mut impl Write) -> Result<(), Error> {
        let settings = &self.write_settings;
        for edge in node.get().traverse(self.arena()) {
            match edge {
                NodeEdge::Start(id) => self.write_start(Node::new(id), w, settings)?,
                NodeEdge::End(id) => self.write_end(Node::new(id), w, settings)?,
            }
        }
        Ok(())
    }

    fn write_start(&self, node: Node, w: &mut impl Write, s: &WriteSettings) -> Result<(), Error> {
        match self.value(node) {
            Value::Root => {}
            Value::Element(element) => {
                write!(w, "<{}", element.full_tag())?;
                let attr_mode = if s.canonical_attr_val {
                    EscapeMode::CanonicalAttr
                } else {
                    EscapeMode::Normal
                };
                for a in element.attributes() {
                    write!(w, " {}=\"{}\"", a.full_key(), escape(a.value(), attr_mode))?;
                }
                if self.first_child(node).is_some() || s.canonical_end_tags {
                    w.write_all(b">")?;
                } else {
                    w.write_all(b"/>")?;
                }
            }
            Value::Text(text) => {
                if text.is_cdata() {
                    write!(w, "<![CDATA[{}]]>", text.get())?;
                } else {
                    let mode = if s.canonical_text {
                        EscapeMode::CanonicalText
                    } else {
                        EscapeMode::Normal
                    };
                    w.write_all(escape(text.get(), mode).as_bytes())?;
                }
            }
            Value::Comment(comment) => {
                write!(w, "<!--{}-->", comment.get())?;
            }
            Value::Directive(directive) => {
                write!(w, "<!{}>", directive.get())?;
            }
            Value::ProcessingInstruction(pi) => {
                match pi.data() {
                    Some(data) if !data.is_empty() => {
                        write!(w, "<?{} {}?>", pi.target(), data)?;
                    }
                    _ => write!(w, "<?{}?>", pi.target())?,
                }
            }
        }
        Ok(())
    }

    fn write_end(&self, node: Node, w: &mut impl Write, s: &WriteSettings) -> Result<(), Error> {
        if let Value::Element(element) = self.value(node) {
            if self.first_child(node).is_some() || s.canonical_end_tags {
                write!(w, "</{}>", element.full_tag())?;
            }
        }
        Ok(())
    }
}
