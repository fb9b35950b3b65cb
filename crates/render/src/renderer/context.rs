//! Transformer state shared by every node handler.

use super::Options;
use super::render::render_node;
use minimark_core::Node;
use std::borrow::Cow;

/// The entity written in place of every literal space.
pub const NBSP: &str = "&nbsp;";

/// The forced line break element.
pub const BR: &str = "<br/>";

/// Escapes `&`, `<`, `>`, `"` and `'` for text and attribute positions alike.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(s)
}

/// Escapes text and protects every space from collapsing.
///
/// The display surface has no `white-space` property, so runs of spaces
/// survive only as `&nbsp;` entities.
pub fn escape_text(s: &str) -> String {
    escape_html(s).replace(' ', NBSP)
}

/// Stateless recursive renderer over a borrowed option set.
///
/// Holds no mutable state; one instance can render any number of trees,
/// from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct Transformer<'a> {
    options: &'a Options,
}

impl<'a> Transformer<'a> {
    /// Creates a transformer for the given options.
    pub fn new(options: &'a Options) -> Self {
        Self { options }
    }

    /// Returns the options this transformer renders with.
    pub fn options(&self) -> &'a Options {
        self.options
    }

    /// Renders one node to a new string.
    pub fn render(&self, node: &Node) -> String {
        let mut out = String::new();
        render_node(node, self, &mut out);
        out
    }

    /// Renders a node sequence with no separator between siblings.
    pub fn render_all(&self, nodes: &[Node]) -> String {
        let mut out = String::new();
        self.render_all_into(nodes, &mut out);
        out
    }

    /// Appends each rendered sibling to `out`.
    pub fn render_all_into(&self, nodes: &[Node], out: &mut String) {
        for node in nodes {
            render_node(node, self, out);
        }
    }

    /// Writes a `name="value"` attribute with the value escaped.
    pub(super) fn push_attr(&self, out: &mut String, name: &str, value: &str) {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_html(value));
        out.push('"');
    }

    /// Writes trusted markup, or its escaped text when raw HTML is disabled.
    pub(super) fn push_trusted_html(&self, out: &mut String, html: &str) {
        if self.options.allow_raw_html {
            log::debug!("Passing raw HTML through: {}", html);
            out.push_str(html);
        } else {
            out.push_str(&escape_html(html));
        }
    }
}
