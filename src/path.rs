use ahash::{HashSet, HashSetExt};

use crate::document::{Document, Node};
use crate::error::PathError;
use crate::value::{space_match, split_name};

/// A compiled path expression.
///
/// Paths select elements relative to a starting element using a small
/// XPath-like language:
///
/// - `/` separates steps; a leading `/` makes the path absolute (evaluation
///   starts at the top of the tree).
/// - `//` selects an element and all element descendants.
/// - `.` is the starting element itself, `..` its parent.
/// - A step names an element: `tag`, `prefix:tag`, or `*` for any element.
///   An unprefixed tag matches elements with any prefix.
/// - Steps take bracketed predicates, combined with AND:
///   `[n]` (1-based position within the step's selection),
///   `[@attr]` and `[@attr='value']` (attribute tests),
///   `[tag]` and `[tag='value']` (child element tests, the latter against
///   the child's text).
///
/// Compile once with [`Path::compile`] (or [`Path::must_compile`], which
/// panics on syntax errors) and evaluate any number of times.
#[derive(Debug, Clone)]
pub struct Path {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone)]
struct Segment {
    selector: Selector,
    filters: Vec<Filter>,
}

#[derive(Debug, Clone)]
enum Selector {
    /// The top of the tree the candidate lives in.
    Root,
    /// The candidate itself.
    Current,
    /// The candidate's parent.
    Parent,
    /// Element children matching a name test.
    Children { space: String, tag: String },
    /// The candidate and all element descendants matching a name test.
    Descendants { space: String, tag: String },
}

#[derive(Debug, Clone)]
enum Filter {
    /// 1-based rank within the selection produced for one candidate.
    Position(usize),
    AttrExists {
        space: String,
        key: String,
    },
    AttrEquals {
        space: String,
        key: String,
        value: String,
    },
    ChildExists {
        space: String,
        tag: String,
    },
    ChildText {
        space: String,
        tag: String,
        value: String,
    },
}

impl Path {
    /// Compile a path expression. Returns a [`PathError`] for syntactically
    /// invalid paths.
    pub fn compile(path: &str) -> Result<Path, PathError> {
        Compiler::new(path).compile()
    }

    /// Compile a path expression, panicking on syntactically invalid paths.
    pub fn must_compile(path: &str) -> Path {
        match Path::compile(path) {
            Ok(compiled) => compiled,
            Err(e) => panic!("cannot compile path {:?}: {}", path, e),
        }
    }

    /// Evaluate the path starting at `from`, returning the matching
    /// elements in document order, without duplicates.
    pub fn evaluate(&self, doc: &Document, from: Node) -> Vec<Node> {
        let mut queue = vec![from];
        let mut scratch = Vec::new();
        for segment in &self.segments {
            let mut next = Vec::new();
            let mut seen = HashSet::new();
            for candidate in &queue {
                scratch.clear();
                segment.selector.select(doc, *candidate, &mut scratch);
                for filter in &segment.filters {
                    filter.apply(doc, &mut scratch);
                }
                for node in scratch.drain(..) {
                    if seen.insert(node) {
                        next.push(node);
                    }
                }
            }
            queue = next;
        }
        queue.retain(|node| doc.element(*node).is_some());
        queue
    }
}

impl Selector {
    fn select(&self, doc: &Document, from: Node, out: &mut Vec<Node>) {
        match self {
            Selector::Root => {
                let mut top = from;
                while let Some(parent) = doc.parent(top) {
                    top = parent;
                }
                out.push(top);
            }
            Selector::Current => out.push(from),
            Selector::Parent => {
                if let Some(parent) = doc.parent(from) {
                    out.push(parent);
                }
            }
            Selector::Children { space, tag } => {
                for child in doc.children(from) {
                    if name_matches(doc, child, space, tag) {
                        out.push(child);
                    }
                }
            }
            Selector::Descendants { space, tag } => {
                for descendant in doc.descendants(from) {
                    if name_matches(doc, descendant, space, tag) {
                        out.push(descendant);
                    }
                }
            }
        }
    }
}

impl Filter {
    fn apply(&self, doc: &Document, nodes: &mut Vec<Node>) {
        match self {
            Filter::Position(position) => {
                let index = position - 1;
                if index < nodes.len() {
                    let keep = nodes[index];
                    nodes.clear();
                    nodes.push(keep);
                } else {
                    nodes.clear();
                }
            }
            Filter::AttrExists { space, key } => {
                nodes.retain(|node| {
                    doc.element(*node)
                        .is_some_and(|el| el.find_attr(space, key).is_some())
                });
            }
            Filter::AttrEquals { space, key, value } => {
                nodes.retain(|node| {
                    doc.element(*node)
                        .and_then(|el| el.find_attr(space, key))
                        .is_some_and(|a| a.value() == value)
                });
            }
            Filter::ChildExists { space, tag } => {
                nodes.retain(|node| {
                    doc.children(*node)
                        .any(|child| name_matches(doc, child, space, tag))
                });
            }
            Filter::ChildText { space, tag, value } => {
                nodes.retain(|node| {
                    doc.children(*node).any(|child| {
                        name_matches(doc, child, space, tag) && doc.text_content(child) == *value
                    })
                });
            }
        }
    }
}

fn name_matches(doc: &Document, node: Node, space: &str, tag: &str) -> bool {
    match doc.element(node) {
        Some(el) => (tag == "*" || el.tag() == tag) && space_match(space, el.space()),
        None => false,
    }
}

struct Compiler<'a> {
    path: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Compiler<'a> {
    fn new(path: &'a str) -> Self {
        Compiler {
            path,
            bytes: path.as_bytes(),
            pos: 0,
        }
    }

    fn compile(mut self) -> Result<Path, PathError> {
        if self.path.is_empty() {
            return Err(PathError::EmptyPath);
        }

        let mut segments = Vec::new();
        if self.bytes[0] == b'/' {
            segments.push(Segment {
                selector: Selector::Root,
                filters: Vec::new(),
            });
            self.pos = 1;
        }

        while self.pos < self.bytes.len() {
            // A second slash marks a descendant step.
            let descendant = if self.bytes[self.pos] == b'/' {
                self.pos += 1;
                true
            } else {
                false
            };
            if self.pos >= self.bytes.len() {
                return Err(PathError::InvalidStep(self.path.to_string()));
            }

            segments.push(self.step(descendant)?);

            if self.pos < self.bytes.len() {
                if self.bytes[self.pos] != b'/' {
                    return Err(PathError::InvalidStep(self.path.to_string()));
                }
                self.pos += 1;
                if self.pos >= self.bytes.len() {
                    return Err(PathError::InvalidStep(self.path.to_string()));
                }
            }
        }

        Ok(Path { segments })
    }

    fn step(&mut self, descendant: bool) -> Result<Segment, PathError> {
        let start = self.pos;
        while self.pos < self.bytes.len() && !matches!(self.bytes[self.pos], b'/' | b'[') {
            self.pos += 1;
        }
        let name_test = &self.path[start..self.pos];

        let mut filters = Vec::new();
        while self.pos < self.bytes.len() && self.bytes[self.pos] == b'[' {
            filters.push(self.predicate()?);
        }

        let selector = match name_test {
            "." | ".." => {
                if descendant || !filters.is_empty() {
                    return Err(PathError::InvalidStep(self.path.to_string()));
                }
                if name_test == "." {
                    Selector::Current
                } else {
                    Selector::Parent
                }
            }
            _ => {
                let (space, tag) = parse_name_test(name_test)
                    .ok_or_else(|| PathError::InvalidStep(self.path.to_string()))?;
                if descendant {
                    Selector::Descendants { space, tag }
                } else {
                    Selector::Children { space, tag }
                }
            }
        };

        Ok(Segment { selector, filters })
    }

    fn predicate(&mut self) -> Result<Filter, PathError> {
        let start = self.pos + 1;
        let mut i = start;
        let mut quote: Option<u8> = None;
        while i < self.bytes.len() {
            let b = self.bytes[i];
            match quote {
                Some(q) => {
                    if b == q {
                        quote = None;
                    }
                }
                None => {
                    if b == b'\'' || b == b'"' {
                        quote = Some(b);
                    } else if b == b']' {
                        break;
                    }
                }
            }
            i += 1;
        }
        if i >= self.bytes.len() {
            return Err(PathError::UnterminatedPredicate(self.path.to_string()));
        }
        let inner = &self.path[start..i];
        self.pos = i + 1;
        parse_predicate(inner)
    }
}

fn parse_name_test(test: &str) -> Option<(String, String)> {
    if test == "*" {
        return Some((String::new(), "*".to_string()));
    }
    let (space, tag) = split_name(test);
    if tag.is_empty() || tag.contains('*') || space.contains('*') {
        return None;
    }
    if test.contains(':') && space.is_empty() {
        return None;
    }
    Some((space.to_string(), tag.to_string()))
}

fn parse_predicate(inner: &str) -> Result<Filter, PathError> {
    if inner.is_empty() {
        return Err(PathError::InvalidPredicate(inner.to_string()));
    }

    if inner.bytes().next().is_some_and(|b| b.is_ascii_digit()) {
        if !inner.bytes().all(|b| b.is_ascii_digit()) || inner.starts_with('0') {
            return Err(PathError::InvalidPosition(inner.to_string()));
        }
        let position: usize = inner
            .parse()
            .map_err(|_| PathError::InvalidPosition(inner.to_string()))?;
        return Ok(Filter::Position(position));
    }

    if let Some(rest) = inner.strip_prefix('@') {
        return match split_equals(rest)? {
            Some((name, value)) => {
                let (space, key) = check_name(name, inner)?;
                Ok(Filter::AttrEquals { space, key, value })
            }
            None => {
                let (space, key) = check_name(rest, inner)?;
                Ok(Filter::AttrExists { space, key })
            }
        };
    }

    match split_equals(inner)? {
        Some((name, value)) => {
            let (space, tag) = check_name(name, inner)?;
            Ok(Filter::ChildText { space, tag, value })
        }
        None => {
            let (space, tag) = check_name(inner, inner)?;
            Ok(Filter::ChildExists { space, tag })
        }
    }
}

// Splits `name='value'` into its halves, unquoting the value.
fn split_equals(s: &str) -> Result<Option<(&str, String)>, PathError> {
    let (name, quoted) = match s.split_once('=') {
        Some(pair) => pair,
        None => return Ok(None),
    };
    let mut chars = quoted.chars();
    let open = chars.next();
    let close = chars.next_back();
    match (open, close) {
        (Some(q @ ('\'' | '"')), Some(c)) if q == c && quoted.len() >= 2 => {
            Ok(Some((name, chars.as_str().to_string())))
        }
        _ => Err(PathError::InvalidPredicate(s.to_string())),
    }
}

fn check_name(name: &str, predicate: &str) -> Result<(String, String), PathError> {
    let (space, local) = split_name(name);
    if local.is_empty() || local.contains(['@', '=', '\'', '"']) {
        return Err(PathError::InvalidPredicate(predicate.to_string()));
    }
    Ok((space.to_string(), local.to_string()))
}

/// ## Path queries
impl Document {
    /// All elements matched by the path expression, evaluated relative to
    /// `from`, in document order.
    ///
    /// ```rust
    /// use eltree::Document;
    ///
    /// let doc = Document::parse(r#"<r><x id="1"/><x id="2"><y/></x></r>"#)?;
    /// let root = doc.root().unwrap();
    /// let hits = doc.find_elements(root, "//x[@id='2']/y")?;
    /// assert_eq!(hits.len(), 1);
    /// # Ok::<(), eltree::Error>(())
    /// ```
    pub fn find_elements(&self, from: Node, path: &str) -> Result<Vec<Node>, PathError> {
        Ok(Path::compile(path)?.evaluate(self, from))
    }

    /// The first element matched by the path expression, if any.
    pub fn find_element(&self, from: Node, path: &str) -> Result<Option<Node>, PathError> {
        Ok(self.find_elements(from, path)?.into_iter().next())
    }

    /// All elements matched by a compiled path.
    pub fn find_elements_path(&self, from: Node, path: &Path) -> Vec<Node> {
        path.evaluate(self, from)
    }

    /// The first element matched by a compiled path, if any.
    pub fn find_element_path(&self, from: Node, path: &Path) -> Option<Node> {
        path.evaluate(self, from).into_iter().next()
    }
}
