use crate::document::{Document, Node};
use crate::value::split_name;

/// ## Namespaces
///
/// Namespace prefixes are resolved dynamically by scanning `xmlns`
/// attributes on the element and its ancestors. Nothing is resolved at
/// parse time, so adding or removing an `xmlns` attribute immediately
/// changes the result of these lookups.
impl Document {
    /// The namespace URI associated with an element. For an unprefixed
    /// element this is the default namespace in scope; otherwise it is the
    /// namespace bound to the element's prefix. Returns the empty string
    /// when nothing is bound, or for non-element tokens.
    ///
    /// ```rust
    /// use eltree::Document;
    ///
    /// let doc = Document::parse(r#"<root xmlns:n="urn:x"><n:foo/></root>"#)?;
    /// let foo = doc.select_element(doc.root().unwrap(), "foo").unwrap();
    /// assert_eq!(doc.namespace_uri(foo), "urn:x");
    /// # Ok::<(), eltree::Error>(())
    /// ```
    pub fn namespace_uri(&self, node: Node) -> String {
        match self.element(node) {
            Some(el) if el.space().is_empty() => self.find_default_namespace_uri(node),
            Some(el) => self.find_local_namespace_uri(node, el.space()),
            None => String::new(),
        }
    }

    /// The namespace URI bound to `prefix` in the scope of `node`: the
    /// value of the nearest `xmlns:prefix` attribute on the node or its
    /// ancestors, or the empty string.
    pub fn find_local_namespace_uri(&self, node: Node, prefix: &str) -> String {
        let mut current = Some(node);
        while let Some(n) = current {
            if let Some(el) = self.element(n) {
                for a in el.attributes() {
                    if a.space() == "xmlns" && a.key() == prefix {
                        return a.value().to_string();
                    }
                }
            }
            current = self.parent(n);
        }
        String::new()
    }

    /// The default namespace URI in the scope of `node`: the value of the
    /// nearest `xmlns` attribute on the node or its ancestors, or the
    /// empty string.
    pub fn find_default_namespace_uri(&self, node: Node) -> String {
        let mut current = Some(node);
        while let Some(n) = current {
            if let Some(el) = self.element(n) {
                for a in el.attributes() {
                    if a.space().is_empty() && a.key() == "xmlns" {
                        return a.value().to_string();
                    }
                }
            }
            current = self.parent(n);
        }
        String::new()
    }

    /// The namespace URI associated with an attribute of the given element.
    /// Unprefixed attributes are in no namespace, not in the default
    /// namespace, so the result is the empty string for them.
    pub fn attribute_namespace_uri(&self, element: Node, key: &str) -> String {
        let (space, _) = split_name(key);
        if space.is_empty() {
            String::new()
        } else {
            self.find_local_namespace_uri(element, space)
        }
    }
}
