use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors that can occur while loading or parsing a document.
///
/// Rendering a well-typed [`Node`](crate::Node) tree never fails; every
/// variant here comes from the boundary where untyped input is turned into
/// nodes.
#[derive(Debug, Error)]
pub enum MinimarkError {
    /// IO error while reading a source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The node JSON was not syntactically valid.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// markdown-rs parser error surfaced through the adapter.
    #[error("Parse error at {location}: {message}")]
    Parse {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// A node with a recognised kind is missing a field its kind requires.
    #[error("Malformed node: {0}")]
    MalformedNode(String),
}

impl MinimarkError {
    /// Create a parse error with location
    pub fn parse_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::Parse {
            message: message.into(),
            location: SourceLocation::new(line, column),
        }
    }

    /// Create a malformed node error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedNode(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        assert_eq!(SourceLocation::new(3, 7).to_string(), "3:7");
        assert_eq!(SourceLocation::default().to_string(), "1:1");
    }

    #[test]
    fn test_parse_error_message() {
        let err = MinimarkError::parse_error("unexpected end", 2, 4);
        assert_eq!(err.to_string(), "Parse error at 2:4: unexpected end");
    }

    #[test]
    fn test_malformed_message() {
        let err = MinimarkError::malformed("heading: missing field `level`");
        assert_eq!(
            err.to_string(),
            "Malformed node: heading: missing field `level`"
        );
    }
}
