use indextree::{Arena, NodeId};

use crate::error::Error;
use crate::settings::{ReadSettings, WriteSettings};
use crate::value::Value;

pub(crate) type TokenArena = Arena<Value>;

/// A token in an XML document tree.
///
/// This is a lightweight value and can be copied. It is only meaningful
/// together with the [`Document`] that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node(NodeId);

impl Node {
    #[inline]
    pub(crate) fn new(node_id: NodeId) -> Self {
        Node(node_id)
    }

    #[inline]
    pub(crate) fn get(&self) -> NodeId {
        self.0
    }
}

/// A `Document` holds a complete XML tree.
///
/// All tokens of the tree live in an arena owned by the document and are
/// addressed through [`Node`] handles. The document has a synthetic
/// container token which is never serialized; only its children are. The
/// root element is the first element child of the container; a document may
/// also hold processing instructions, comments and a DOCTYPE directive at
/// the container level.
///
/// Detached fragments created with the `new_*` constructors or by removing
/// children live in the same arena until they are attached somewhere or the
/// document is dropped.
///
/// The `Document` API is divided into sections focusing on different
/// aspects of working with the tree:
///
/// * Read-only access (`access.rs`)
/// * Creation (`creation.rs`)
/// * Manipulation (`manipulation.rs`)
/// * Namespaces (`namespace.rs`)
/// * Reading (`parse.rs`)
/// * Writing (`serialize.rs`)
/// * Indentation (`indent.rs`)
/// * Path queries (`path.rs`)
pub struct Document {
    pub(crate) arena: TokenArena,
    pub(crate) container: Node,
    /// Settings applied by the `read_*` methods.
    pub read_settings: ReadSettings,
    /// Settings applied by the `write_*` and indentation methods.
    pub write_settings: WriteSettings,
}

impl Document {
    /// Create a new, empty document.
    pub fn new() -> Self {
        let mut arena = TokenArena::new();
        let container = Node::new(arena.new_node(Value::Root));
        Document {
            arena,
            container,
            read_settings: ReadSettings::default(),
            write_settings: WriteSettings::default(),
        }
    }

    /// Create a document and parse the given XML into it.
    ///
    /// ```rust
    /// use eltree::Document;
    ///
    /// let doc = Document::parse("<hello/>")?;
    /// assert!(doc.root().is_some());
    /// # Ok::<(), eltree::Error>(())
    /// ```
    pub fn parse(xml: &str) -> Result<Self, Error> {
        let mut doc = Document::new();
        doc.read_str(xml)?;
        Ok(doc)
    }

    /// Create a document with a root element of the given tag. Returns the
    /// document together with the root element. The tag may include a
    /// namespace prefix followed by a colon.
    ///
    /// ```rust
    /// use eltree::Document;
    ///
    /// let (mut doc, root) = Document::new_with_root("doc");
    /// doc.create_element(root, "child")?;
    /// assert_eq!(doc.to_xml_string()?, "<doc><child/></doc>");
    /// # Ok::<(), eltree::Error>(())
    /// ```
    pub fn new_with_root(tag: &str) -> (Document, Node) {
        let mut doc = Document::new();
        let root = doc.new_element(tag);
        doc.container.get().append(root.get(), &mut doc.arena);
        (doc, root)
    }

    /// The synthetic container token of the document.
    #[inline]
    pub fn container(&self) -> Node {
        self.container
    }

    /// Returns a recursive, deep copy of the document, including its
    /// settings.
    pub fn copy(&self) -> Document {
        let mut doc = Document::new();
        doc.read_settings = self.read_settings.clone();
        doc.write_settings = self.write_settings;
        let children: Vec<Node> = self.children(self.container).collect();
        for child in children {
            let dup = copy_into(self, child, &mut doc);
            doc.container.get().append(dup.get(), &mut doc.arena);
        }
        doc
    }

    #[inline]
    pub(crate) fn arena(&self) -> &TokenArena {
        &self.arena
    }

    #[inline]
    pub(crate) fn arena_mut(&mut self) -> &mut TokenArena {
        &mut self.arena
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn copy_into(src: &Document, node: Node, dst: &mut Document) -> Node {
    let value = src.arena[node.get()].get().clone();
    let new = Node::new(dst.arena.new_node(value));
    for child in src.children(node).collect::<Vec<_>>() {
        let dup = copy_into(src, child, dst);
        new.get().append(dup.get(), &mut dst.arena);
    }
    new
}
