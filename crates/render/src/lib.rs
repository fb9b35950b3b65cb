#![deny(missing_docs)]
//! minimark renderer: turns document nodes into the restricted HTML dialect
//! of a rich-text preview surface.

/// Parallel rendering of many documents.
pub mod batch;
/// Node-to-HTML transformer and table layout.
pub mod renderer;
/// Stylesheet supplying the classes rendered output references.
pub mod stylesheet;

pub use batch::{BatchInput, BatchOptions, BatchResult, render_batch};
pub use renderer::{
    Options, Transformer, render_all, render_document, render_json, render_markdown,
};
pub use stylesheet::{STYLESHEET, wrap_document};
