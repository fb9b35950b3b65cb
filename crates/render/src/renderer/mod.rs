//! Restricted-dialect HTML renderer.
//!
//! The display surface this targets understands a small subset of HTML/CSS:
//! no `<table>`, no `<input>`, no `white-space`. The renderer walks a
//! [`Node`] tree and emits markup that stays within that subset.
//!
//! # Module Structure
//!
//! - `context` - The [`Transformer`] and escaping helpers
//! - `render` - Node dispatch and inline/block handlers
//! - `table` - Monospace table layout engine
//! - `widgets` - Checkbox and footnote stand-ins

mod context;
pub mod render;
pub mod table;
mod widgets;

pub use context::{BR, NBSP, Transformer, escape_html, escape_text};
pub use widgets::{CHECKBOX_CHECKED_CLASS, CHECKBOX_CLASS, FOOTNOTE_REF_CLASS};

use minimark_core::{MinimarkError, Node, ParseOptions, nodes_from_json, parse_document};
use serde::{Deserialize, Serialize};

/// Rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Attribute carrying a link's destination on `<a>`.
    pub link_attribute: String,
    /// Whether ordered lists render as `<ol>` (honouring `start`) instead of `<ul>`.
    pub ordered_lists: bool,
    /// Whether `raw_html`/`block_html` pass through unescaped.
    pub allow_raw_html: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            link_attribute: "href".to_string(),
            ordered_lists: false,
            allow_raw_html: true,
        }
    }
}

impl Options {
    /// Parser options matching these render options.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            raw_html: self.allow_raw_html,
            ..ParseOptions::default()
        }
    }
}

/// Renders a node sequence with no separator between siblings.
pub fn render_all(nodes: &[Node], options: &Options) -> String {
    Transformer::new(options).render_all(nodes)
}

/// Renders top-level blocks, one per line.
pub fn render_document(nodes: &[Node], options: &Options) -> String {
    let tx = Transformer::new(options);
    nodes
        .iter()
        .map(|node| tx.render(node))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses markdown and renders it.
///
/// # Examples
///
/// ```
/// use minimark_render::{Options, render_markdown};
///
/// let html = render_markdown("## Hi there", &Options::default()).unwrap();
/// assert_eq!(html, "<h2>Hi&nbsp;there</h2>");
/// ```
pub fn render_markdown(input: &str, options: &Options) -> Result<String, MinimarkError> {
    let nodes = parse_document(input, &options.parse_options())?;
    Ok(render_document(&nodes, options))
}

/// Loads a JSON node array and renders it.
pub fn render_json(input: &str, options: &Options) -> Result<String, MinimarkError> {
    let nodes = nodes_from_json(input)?;
    Ok(render_document(&nodes, options))
}
