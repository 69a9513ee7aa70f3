use crate::document::{Document, Node};
use crate::value::{
    space_match, split_name, Comment, Directive, Element, ProcessingInstruction, Text, Value,
    ValueType,
};

/// ## Read-only access
impl Document {
    /// The value of a token.
    pub fn value(&self, node: Node) -> &Value {
        self.arena()[node.get()].get()
    }

    /// The mutable value of a token.
    pub fn value_mut(&mut self, node: Node) -> &mut Value {
        self.arena_mut()[node.get()].get_mut()
    }

    /// The type of a token.
    pub fn value_type(&self, node: Node) -> ValueType {
        self.value(node).value_type()
    }

    /// Element accessor. Returns `None` for non-element tokens.
    pub fn element(&self, node: Node) -> Option<&Element> {
        match self.value(node) {
            Value::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Mutable element accessor.
    pub fn element_mut(&mut self, node: Node) -> Option<&mut Element> {
        match self.value_mut(node) {
            Value::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Character data accessor. Returns `None` for non-text tokens.
    pub fn text(&self, node: Node) -> Option<&Text> {
        match self.value(node) {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Mutable character data accessor.
    pub fn text_mut(&mut self, node: Node) -> Option<&mut Text> {
        match self.value_mut(node) {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Comment accessor. Returns `None` for non-comment tokens.
    pub fn comment(&self, node: Node) -> Option<&Comment> {
        match self.value(node) {
            Value::Comment(comment) => Some(comment),
            _ => None,
        }
    }

    /// Mutable comment accessor.
    pub fn comment_mut(&mut self, node: Node) -> Option<&mut Comment> {
        match self.value_mut(node) {
            Value::Comment(comment) => Some(comment),
            _ => None,
        }
    }

    /// Directive accessor. Returns `None` for non-directive tokens.
    pub fn directive(&self, node: Node) -> Option<&Directive> {
        match self.value(node) {
            Value::Directive(directive) => Some(directive),
            _ => None,
        }
    }

    /// Mutable directive accessor.
    pub fn directive_mut(&mut self, node: Node) -> Option<&mut Directive> {
        match self.value_mut(node) {
            Value::Directive(directive) => Some(directive),
            _ => None,
        }
    }

    /// Processing instruction accessor. Returns `None` for other tokens.
    pub fn processing_instruction(&self, node: Node) -> Option<&ProcessingInstruction> {
        match self.value(node) {
            Value::ProcessingInstruction(pi) => Some(pi),
            _ => None,
        }
    }

    /// Mutable processing instruction accessor.
    pub fn processing_instruction_mut(&mut self, node: Node) -> Option<&mut ProcessingInstruction> {
        match self.value_mut(node) {
            Value::ProcessingInstruction(pi) => Some(pi),
            _ => None,
        }
    }

    /// Check whether a token is an element.
    pub fn is_element(&self, node: Node) -> bool {
        matches!(self.value(node), Value::Element(_))
    }

    /// Check whether a token is character data.
    pub fn is_text(&self, node: Node) -> bool {
        matches!(self.value(node), Value::Text(_))
    }

    /// The root element of the document: the first element child of the
    /// container. Returns `None` if the document has no root element.
    ///
    /// ```rust
    /// use eltree::Document;
    ///
    /// let doc = Document::parse("<?pi data?><doc/>")?;
    /// let root = doc.root().unwrap();
    /// assert_eq!(doc.element(root).unwrap().tag(), "doc");
    /// # Ok::<(), eltree::Error>(())
    /// ```
    pub fn root(&self) -> Option<Node> {
        self.children(self.container)
            .find(|child| self.is_element(*child))
    }

    /// Get parent token.
    ///
    /// Returns [`None`] for the document container and for detached tokens.
    pub fn parent(&self, node: Node) -> Option<Node> {
        self.arena()[node.get()].parent().map(Node::new)
    }

    /// The position of a token within its parent's children, or `None` when
    /// the token is detached.
    pub fn index(&self, node: Node) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).position(|child| child == node)
    }

    /// Iterator over the children of a token, in document order.
    pub fn children(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        node.get().children(self.arena()).map(Node::new)
    }

    /// The child at the given position, if any.
    pub fn child_at(&self, node: Node, index: usize) -> Option<Node> {
        self.children(node).nth(index)
    }

    /// Get first child, if any.
    pub fn first_child(&self, node: Node) -> Option<Node> {
        self.arena()[node.get()].first_child().map(Node::new)
    }

    /// Get last child, if any.
    pub fn last_child(&self, node: Node) -> Option<Node> {
        self.arena()[node.get()].last_child().map(Node::new)
    }

    /// Get next sibling, if any.
    pub fn next_sibling(&self, node: Node) -> Option<Node> {
        self.arena()[node.get()].next_sibling().map(Node::new)
    }

    /// Get previous sibling, if any.
    pub fn previous_sibling(&self, node: Node) -> Option<Node> {
        self.arena()[node.get()].previous_sibling().map(Node::new)
    }

    /// Iterator over the ancestors of a token, from its parent up to the
    /// container. Does not include the token itself.
    pub fn ancestors(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        node.get().ancestors(self.arena()).skip(1).map(Node::new)
    }

    /// Iterator over a token and all its descendants, in document order.
    pub fn descendants(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        node.get().descendants(self.arena()).map(Node::new)
    }

    /// Iterator over the element children of a token.
    pub fn child_elements(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        self.children(node)
            .filter(move |child| self.is_element(*child))
    }

    /// The first child element with the given tag. The tag may include a
    /// namespace prefix followed by a colon; an unprefixed tag matches
    /// elements with any prefix.
    pub fn select_element(&self, node: Node, tag: &str) -> Option<Node> {
        let (space, tag) = split_name(tag);
        self.children(node).find(|child| {
            self.element(*child)
                .is_some_and(|el| space_match(space, &el.space) && el.tag == tag)
        })
    }

    /// All child elements with the given tag.
    pub fn select_elements(&self, node: Node, tag: &str) -> Vec<Node> {
        let (space, tag) = split_name(tag);
        self.children(node)
            .filter(|child| {
                self.element(*child)
                    .is_some_and(|el| space_match(space, &el.space) && el.tag == tag)
            })
            .collect()
    }

    /// All character data immediately following the element's opening tag,
    /// concatenated. Stops at the first non-text child.
    pub fn text_content(&self, node: Node) -> String {
        let mut out = String::new();
        for child in self.children(node) {
            match self.text(child) {
                Some(text) => out.push_str(text.get()),
                None => break,
            }
        }
        out
    }

    /// All character data immediately following the element's end tag,
    /// concatenated. Empty for detached tokens.
    pub fn tail_text(&self, node: Node) -> String {
        let mut out = String::new();
        let mut next = self.next_sibling(node);
        while let Some(sibling) = next {
            match self.text(sibling) {
                Some(text) => out.push_str(text.get()),
                None => break,
            }
            next = self.next_sibling(sibling);
        }
        out
    }

    /// The absolute tag path of an element, from the root of its tree.
    ///
    /// ```rust
    /// use eltree::Document;
    ///
    /// let doc = Document::parse("<a><b><c/></b></a>")?;
    /// let c = doc.find_element(doc.root().unwrap(), "b/c")?.unwrap();
    /// assert_eq!(doc.get_path(c), "/a/b/c");
    /// # Ok::<(), eltree::Error>(())
    /// ```
    pub fn get_path(&self, node: Node) -> String {
        let mut tags = Vec::new();
        let mut current = Some(node);
        while let Some(n) = current {
            if let Some(el) = self.element(n) {
                if !el.tag.is_empty() {
                    tags.push(el.tag.clone());
                }
            }
            current = self.parent(n);
        }
        tags.reverse();
        format!("/{}", tags.join("/"))
    }

    /// The path of an element relative to the `source` element, climbing
    /// with `..` segments where necessary. Returns `None` if the two
    /// elements are not part of the same tree.
    pub fn get_relative_path(&self, node: Node, source: Node) -> Option<String> {
        // Build a reverse path from the element toward the root, stopping
        // if the source element is encountered.
        let mut path: Vec<Node> = Vec::new();
        let mut current = Some(node);
        while let Some(n) = current {
            if n == source {
                break;
            }
            path.push(n);
            current = self.parent(n);
        }

        let tag = |n: Node| {
            self.element(n)
                .map(|el| el.tag.clone())
                .unwrap_or_default()
        };

        if current == Some(source) {
            if path.is_empty() {
                return Some(".".to_string());
            }
            let mut parts = vec![".".to_string()];
            parts.extend(path.iter().rev().map(|n| tag(*n)));
            return Some(parts.join("/"));
        }

        // The source wasn't on the chain, so climb from the source toward
        // the root until a node on the reversed path is encountered.
        let mut climb = 0;
        let mut found = None;
        let mut current = Some(source);
        while let Some(n) = current {
            if let Some(i) = path.iter().position(|p| *p == n) {
                found = Some(i);
                break;
            }
            climb += 1;
            current = self.parent(n);
        }

        let i = found?;
        path.truncate(i);
        let mut parts: Vec<String> = std::iter::repeat("..".to_string()).take(climb).collect();
        parts.extend(path.iter().rev().map(|n| tag(*n)));
        Some(parts.join("/"))
    }
}
