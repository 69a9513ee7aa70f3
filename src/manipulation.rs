use crate::document::{Document, Node};
use crate::error::Error;
use crate::value::Value;

/// ## Manipulation
///
/// Operations that change the tree structure. All of them keep child order
/// contiguous and parent links current, and a token is the child of at most
/// one parent: attaching a token that is already parented detaches it from
/// its current position first, wherever it lives in the arena.
impl Document {
    /// Add `child` as the last child of `parent`.
    pub fn add_child(&mut self, parent: Node, child: Node) -> Result<(), Error> {
        self.attach_check(parent, child)?;
        parent.get().checked_append(child.get(), self.arena_mut())?;
        Ok(())
    }

    /// Insert `child` just before the given position in `parent`'s list of
    /// children. If `index` is greater than or equal to the number of
    /// children, `child` is added to the end. If `child` is already a child
    /// of `parent` at a position greater than `index`, the target position
    /// is adjusted for the removal that precedes the insertion.
    pub fn insert_child_at(&mut self, parent: Node, index: usize, child: Node) -> Result<(), Error> {
        if index >= self.children(parent).count() {
            return self.add_child(parent, child);
        }

        self.attach_check(parent, child)?;

        let mut index = index;
        if self.parent(child) == Some(parent) {
            if let Some(current) = self.index(child) {
                if current > index {
                    index -= 1;
                }
            }
        }
        child.get().detach(self.arena_mut());

        match self.child_at(parent, index) {
            Some(sibling) => {
                sibling
                    .get()
                    .checked_insert_before(child.get(), self.arena_mut())?;
            }
            None => {
                parent.get().checked_append(child.get(), self.arena_mut())?;
            }
        }
        Ok(())
    }

    /// Remove the child at the given position and return it as a detached
    /// fragment. Returns `None` if the index is out of bounds.
    pub fn remove_child_at(&mut self, parent: Node, index: usize) -> Option<Node> {
        let child = self.child_at(parent, index)?;
        child.get().detach(self.arena_mut());
        Some(child)
    }

    /// Remove `child` from `parent`'s list of children and return it as a
    /// detached fragment. Returns `None` if `child` is not a child of
    /// `parent`.
    pub fn remove_child(&mut self, parent: Node, child: Node) -> Option<Node> {
        if self.parent(child) != Some(parent) {
            return None;
        }
        child.get().detach(self.arena_mut());
        Some(child)
    }

    /// Detach a token (and its descendants) from the tree. It becomes a
    /// free-standing fragment.
    pub fn detach(&mut self, node: Node) {
        node.get().detach(self.arena_mut());
    }

    /// Replace the document's root element with `element`. An existing root
    /// element is unbound and replaced in place; otherwise `element` is
    /// appended to the container.
    pub fn set_root(&mut self, element: Node) -> Result<(), Error> {
        if self.element(element).is_none() {
            return Err(Error::InvalidOperation(
                "root must be an element".to_string(),
            ));
        }
        element.get().detach(self.arena_mut());
        match self.root() {
            Some(old_root) => {
                old_root
                    .get()
                    .checked_insert_before(element.get(), self.arena_mut())?;
                old_root.get().detach(self.arena_mut());
            }
            None => {
                let container = self.container;
                container
                    .get()
                    .checked_append(element.get(), self.arena_mut())?;
            }
        }
        Ok(())
    }

    /// Create a recursive, deep copy of a token and all its attributes and
    /// children. The returned token is detached; it can be attached with
    /// [`Document::add_child`] or [`Document::set_root`].
    pub fn copy_node(&mut self, node: Node) -> Node {
        let value = self.value(node).clone();
        let new = self.new_node(value);
        let children: Vec<Node> = self.children(node).collect();
        for child in children {
            let dup = self.copy_node(child);
            new.get().append(dup.get(), self.arena_mut());
        }
        new
    }

    /// Replace all character data immediately following the element's
    /// opening tag with plain text. An empty string removes the run.
    pub fn set_text(&mut self, element: Node, text: &str) {
        self.replace_text(element, 0, text, false);
    }

    /// Replace all character data immediately following the element's
    /// opening tag with a CDATA section.
    pub fn set_cdata(&mut self, element: Node, data: &str) {
        self.replace_text(element, 0, data, true);
    }

    /// Replace all character data immediately following the element's end
    /// tag. Does nothing for detached tokens.
    pub fn set_tail(&mut self, element: Node, text: &str) {
        let (parent, index) = match (self.parent(element), self.index(element)) {
            (Some(parent), Some(index)) => (parent, index),
            _ => return,
        };
        self.replace_text(parent, index + 1, text, false);
    }

    // Replaces the run of text children of `parent` starting at position
    // `start` with a single new text token (or nothing, for empty text).
    fn replace_text(&mut self, parent: Node, start: usize, text: &str, cdata: bool) {
        let children: Vec<Node> = self.children(parent).collect();
        let start = start.min(children.len());
        let mut end = start;
        while end < children.len() && self.is_text(children[end]) {
            end += 1;
        }
        for node in &children[start..end] {
            node.get().remove(self.arena_mut());
        }
        if text.is_empty() {
            return;
        }
        let replacement = if cdata {
            self.new_cdata(text)
        } else {
            self.new_text(text)
        };
        if end < children.len() {
            children[end]
                .get()
                .insert_before(replacement.get(), self.arena_mut());
        } else {
            parent.get().append(replacement.get(), self.arena_mut());
        }
    }

    fn attach_check(&self, parent: Node, child: Node) -> Result<(), Error> {
        if !matches!(self.value(parent), Value::Element(_) | Value::Root) {
            return Err(Error::InvalidOperation(
                "cannot add children to a non-element token".to_string(),
            ));
        }
        if matches!(self.value(child), Value::Root) {
            return Err(Error::InvalidOperation(
                "cannot attach a document container".to_string(),
            ));
        }
        if child == parent || self.ancestors(parent).any(|a| a == child) {
            return Err(Error::InvalidOperation(
                "cannot attach a token into its own subtree".to_string(),
            ));
        }
        Ok(())
    }
}
