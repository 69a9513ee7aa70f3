use crate::document::{Document, Node};
use crate::error::Error;
use crate::value::{
    split_name, Comment, Directive, Element, ProcessingInstruction, Text, Value,
};

/// ## Creation
///
/// Constructors for detached tokens, plus `create_*` convenience methods
/// that construct and append in one step.
impl Document {
    pub(crate) fn new_node(&mut self, value: Value) -> Node {
        Node::new(self.arena_mut().new_node(value))
    }

    /// Create a new, detached element with the given tag. The tag may
    /// include a namespace prefix followed by a colon.
    ///
    /// ```rust
    /// use eltree::Document;
    ///
    /// let mut doc = Document::new();
    /// let root = doc.new_element("doc");
    /// doc.set_root(root)?;
    /// assert_eq!(doc.to_xml_string()?, "<doc/>");
    /// # Ok::<(), eltree::Error>(())
    /// ```
    pub fn new_element(&mut self, tag: &str) -> Node {
        let (space, tag) = split_name(tag);
        self.new_node(Value::Element(Element::new(space, tag)))
    }

    /// Create a new, detached text token.
    pub fn new_text(&mut self, text: &str) -> Node {
        self.new_node(Value::Text(Text::new(text.to_string())))
    }

    /// Create a new, detached CDATA section with `data` as its content.
    pub fn new_cdata(&mut self, data: &str) -> Node {
        self.new_node(Value::Text(Text::new_cdata(data.to_string())))
    }

    /// Create a new, detached comment token.
    pub fn new_comment(&mut self, comment: &str) -> Node {
        self.new_node(Value::Comment(Comment::new(comment.to_string())))
    }

    /// Create a new, detached directive token.
    pub fn new_directive(&mut self, data: &str) -> Node {
        self.new_node(Value::Directive(Directive::new(data.to_string())))
    }

    /// Create a new, detached processing instruction.
    pub fn new_processing_instruction(&mut self, target: &str, data: Option<&str>) -> Node {
        self.new_node(Value::ProcessingInstruction(ProcessingInstruction::new(
            target.to_string(),
            data.map(|s| s.to_string()),
        )))
    }

    /// Create an element with the given tag and add it as the last child of
    /// `parent`.
    ///
    /// ```rust
    /// use eltree::Document;
    ///
    /// let mut doc = Document::parse("<doc/>")?;
    /// let root = doc.root().unwrap();
    /// doc.create_element(root, "child")?;
    /// assert_eq!(doc.to_xml_string()?, "<doc><child/></doc>");
    /// # Ok::<(), eltree::Error>(())
    /// ```
    pub fn create_element(&mut self, parent: Node, tag: &str) -> Result<Node, Error> {
        let node = self.new_element(tag);
        self.add_child(parent, node)?;
        Ok(node)
    }

    /// Create a text token and add it as the last child of `parent`.
    pub fn create_text(&mut self, parent: Node, text: &str) -> Result<Node, Error> {
        let node = self.new_text(text);
        self.add_child(parent, node)?;
        Ok(node)
    }

    /// Create a CDATA section and add it as the last child of `parent`.
    pub fn create_cdata(&mut self, parent: Node, data: &str) -> Result<Node, Error> {
        let node = self.new_cdata(data);
        self.add_child(parent, node)?;
        Ok(node)
    }

    /// Create a comment and add it as the last child of `parent`.
    pub fn create_comment(&mut self, parent: Node, comment: &str) -> Result<Node, Error> {
        let node = self.new_comment(comment);
        self.add_child(parent, node)?;
        Ok(node)
    }

    /// Create a directive and add it as the last child of `parent`.
    pub fn create_directive(&mut self, parent: Node, data: &str) -> Result<Node, Error> {
        let node = self.new_directive(data);
        self.add_child(parent, node)?;
        Ok(node)
    }

    /// Create a processing instruction and add it as the last child of
    /// `parent`.
    pub fn create_processing_instruction(
        &mut self,
        parent: Node,
        target: &str,
        data: Option<&str>,
    ) -> Result<Node, Error> {
        let node = self.new_processing_instruction(target, data);
        self.add_child(parent, node)?;
        Ok(node)
    }
}
