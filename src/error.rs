use std::fmt;

/// Errors produced while reading, mutating or serializing a document.
#[derive(Debug)]
pub enum Error {
    /// The input is not structurally valid XML: mismatched close tag,
    /// a close tag without a matching open tag, or an element left open
    /// at the end of input.
    MalformedXml(String),
    /// An entity reference was not terminated by `;`.
    UnclosedEntity(String),
    /// An entity reference could not be resolved.
    InvalidEntity(String),
    /// Comment text may not contain `--`.
    InvalidComment(String),
    /// The processing instruction target `xml` is reserved.
    InvalidTarget(String),
    /// The input declares an encoding no decoder is available for.
    UnsupportedEncoding(String),
    /// A tree operation that would violate the document structure,
    /// such as attaching a node into its own subtree.
    InvalidOperation(String),
    Io(std::io::Error),
    Parser(xmlparser::Error),
    Path(PathError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedXml(s) => write!(f, "invalid XML format: {}", s),
            Error::UnclosedEntity(s) => write!(f, "unclosed entity: {}", s),
            Error::InvalidEntity(s) => write!(f, "invalid entity: {}", s),
            Error::InvalidComment(s) => write!(f, "invalid comment: {}", s),
            Error::InvalidTarget(s) => write!(f, "invalid processing instruction target: {}", s),
            Error::UnsupportedEncoding(s) => write!(f, "unsupported encoding: {}", s),
            Error::InvalidOperation(s) => write!(f, "invalid operation: {}", s),
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Parser(e) => write!(f, "parser error: {}", e),
            Error::Path(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Parser(e) => Some(e),
            _ => None,
        }
    }
}

impl From<xmlparser::Error> for Error {
    #[inline]
    fn from(e: xmlparser::Error) -> Self {
        Error::Parser(e)
    }
}

impl From<std::io::Error> for Error {
    #[inline]
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<indextree::NodeError> for Error {
    #[inline]
    fn from(e: indextree::NodeError) -> Self {
        Error::InvalidOperation(e.to_string())
    }
}

impl From<PathError> for Error {
    #[inline]
    fn from(e: PathError) -> Self {
        Error::Path(e)
    }
}

/// Errors produced while compiling a path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    EmptyPath,
    InvalidStep(String),
    InvalidPredicate(String),
    UnterminatedPredicate(String),
    InvalidPosition(String),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::EmptyPath => write!(f, "invalid path: path is empty"),
            PathError::InvalidStep(s) => write!(f, "invalid path step: {:?}", s),
            PathError::InvalidPredicate(s) => write!(f, "invalid path predicate: {:?}", s),
            PathError::UnterminatedPredicate(s) => {
                write!(f, "unterminated path predicate: {:?}", s)
            }
            PathError::InvalidPosition(s) => write!(f, "invalid path position: {:?}", s),
        }
    }
}

impl std::error::Error for PathError {}
