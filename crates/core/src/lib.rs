#![warn(missing_docs)]
//! minimark core: the document node model, error types, and the markdown
//! parser adapter that lowers markdown-rs output into nodes.

/// Core error types.
pub mod error;
/// Document node model and its JSON form.
pub mod node;
/// Markdown parsing and lowering.
pub mod parse;

pub use error::{MinimarkError, SourceLocation};
pub use node::{Align, KNOWN_KINDS, Node, nodes_from_json, nodes_to_json};
pub use parse::{ParseOptions, lower_document, parse_document, parse_mdast};
