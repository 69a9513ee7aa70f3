use crate::document::{Document, Node};

/// Pass to [`Document::indent`] to disable indentation.
pub const NO_INDENT: isize = -1;

/// ## Indentation
///
/// Pretty-printing works by mutating the tree: whitespace text tokens are
/// inserted between the non-text children of every element, so the tree
/// serializes with newlines and indentation. Only text tokens carrying the
/// whitespace flag are ever touched, so document text survives both
/// indenting and stripping.
impl Document {
    /// Indent the tree using the given number of spaces per depth level.
    /// Existing whitespace-only text children are stripped first. A
    /// negative value disables indentation entirely, leaving the tree as
    /// it is.
    ///
    /// The newline sequence is `\n`, or `\r\n` when
    /// [`WriteSettings::use_crlf`](crate::WriteSettings::use_crlf) is set.
    ///
    /// ```rust
    /// use eltree::Document;
    ///
    /// let mut doc = Document::parse("<a><b/></a>")?;
    /// doc.indent(2);
    /// assert_eq!(doc.to_xml_string()?, "<a>\n  <b/>\n</a>\n");
    /// # Ok::<(), eltree::Error>(())
    /// ```
    pub fn indent(&mut self, spaces: isize) {
        if spaces < 0 {
            return;
        }
        let unit = " ".repeat(spaces as usize);
        self.indent_with(&unit);
    }

    /// Indent the tree using one tab per depth level.
    pub fn indent_tabs(&mut self) {
        self.indent_with("\t");
    }

    /// Remove all whitespace-flagged text tokens from the tree, undoing
    /// any previous indentation.
    pub fn strip_indent(&mut self) {
        let container = self.container;
        let mut to_remove = Vec::new();
        for node in self.descendants(container) {
            if let Some(text) = self.text(node) {
                if text.is_whitespace() {
                    to_remove.push(node);
                }
            }
        }
        for node in to_remove {
            node.get().remove(self.arena_mut());
        }
    }

    fn indent_with(&mut self, unit: &str) {
        let newline = if self.write_settings.use_crlf {
            "\r\n"
        } else {
            "\n"
        };
        let container = self.container;
        self.indent_children(container, 0, unit, newline);
    }

    fn indent_children(&mut self, node: Node, depth: usize, unit: &str, newline: &str) {
        self.strip_whitespace_children(node);
        let children: Vec<Node> = self.children(node).collect();
        if children.is_empty() {
            return;
        }

        // Insert newline+indent before each non-text child, except before
        // the first non-text child at container depth.
        let mut first_non_text = true;
        let mut last_was_text = false;
        for child in &children {
            let is_text = self.is_text(*child);
            if !is_text {
                if !first_non_text || depth > 0 {
                    let ws = self.new_text(&indent_text(newline, unit, depth as isize));
                    child.get().insert_before(ws.get(), self.arena_mut());
                }
                first_non_text = false;
            }
            last_was_text = is_text;
        }

        for child in &children {
            if self.is_element(*child) {
                self.indent_children(*child, depth + 1, unit, newline);
            }
        }

        // A closing newline+indent before the end tag, one level up.
        if !last_was_text && (!first_non_text || depth > 0) {
            let ws = self.new_text(&indent_text(newline, unit, depth as isize - 1));
            node.get().append(ws.get(), self.arena_mut());
        }
    }

    fn strip_whitespace_children(&mut self, node: Node) {
        let to_remove: Vec<Node> = self
            .children(node)
            .filter(|child| self.text(*child).is_some_and(|t| t.is_whitespace()))
            .collect();
        for child in to_remove {
            child.get().remove(self.arena_mut());
        }
    }
}

fn indent_text(newline: &str, unit: &str, depth: isize) -> String {
    if depth <= 0 {
        newline.to_string()
    } else {
        let mut s = String::with_capacity(newline.len() + unit.len() * depth as usize);
        s.push_str(newline);
        for _ in 0..depth {
            s.push_str(unit);
        }
        s
    }
}
