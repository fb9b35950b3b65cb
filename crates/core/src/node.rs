//! Document node model.
//!
//! Nodes serialise as JSON objects tagged by `"kind"`. Objects with a kind
//! this crate does not know deserialise into [`Node::Unhandled`] so newer
//! producers never break older renderers, while a known kind with a missing
//! field is rejected outright.

use crate::MinimarkError;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Every kind tag with a dedicated [`Node`] variant.
pub const KNOWN_KINDS: &[&str] = &[
    "text",
    "linebreak",
    "thematic_break",
    "newline",
    "raw_html",
    "emphasis",
    "strong",
    "strikethrough",
    "codespan",
    "link",
    "image",
    "footnote_ref",
    "block_code",
    "block_html",
    "paragraph",
    "heading",
    "block_text",
    "block_quote",
    "list",
    "list_item",
    "task_list_item",
    "footnote_item",
    "footnotes",
    "table",
    "table_head",
    "table_body",
    "table_row",
    "table_cell",
];

/// Horizontal alignment of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Pad on the right.
    Left,
    /// Split padding, smaller half on the left.
    Center,
    /// Pad on the left.
    Right,
}

/// One element of a parsed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Literal text.
    Text {
        /// Unescaped content.
        text: String,
    },
    /// Hard line break.
    Linebreak,
    /// Horizontal rule.
    ThematicBreak,
    /// Blank line between blocks; renders nothing.
    Newline,
    /// Trusted inline HTML.
    RawHtml {
        /// Markup passed through verbatim.
        html: String,
    },
    /// Italic span.
    Emphasis {
        /// Inline children.
        children: Vec<Node>,
    },
    /// Bold span.
    Strong {
        /// Inline children.
        children: Vec<Node>,
    },
    /// Struck-through span.
    Strikethrough {
        /// Inline children.
        children: Vec<Node>,
    },
    /// Inline code.
    Codespan {
        /// Unescaped code.
        text: String,
    },
    /// Hyperlink.
    Link {
        /// Destination URL.
        link: String,
        /// Optional title.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Link text; a bare string is normalised into one text node.
        #[serde(default, deserialize_with = "inline_children")]
        children: Vec<Node>,
    },
    /// Image.
    Image {
        /// Image source.
        src: String,
        /// Alternative text.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
        /// Optional title.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    /// Reference to a footnote definition.
    FootnoteRef {
        /// Footnote label.
        key: String,
        /// 1-based position in the footnote list.
        index: usize,
    },
    /// Fenced or indented code block.
    BlockCode {
        /// Unescaped code.
        text: String,
        /// Info string after the opening fence.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        info: Option<String>,
    },
    /// Trusted block-level HTML.
    BlockHtml {
        /// Markup passed through verbatim.
        #[serde(alias = "text")]
        html: String,
    },
    /// Paragraph.
    Paragraph {
        /// Inline children.
        children: Vec<Node>,
    },
    /// ATX or setext heading.
    Heading {
        /// Heading level, 1 to 6.
        level: u8,
        /// Inline children.
        children: Vec<Node>,
    },
    /// Paragraph content of a tight list item.
    BlockText {
        /// Inline children.
        children: Vec<Node>,
    },
    /// Block quote.
    BlockQuote {
        /// Block children.
        children: Vec<Node>,
    },
    /// Bullet or ordered list.
    List {
        /// Whether the source list was numbered.
        ordered: bool,
        /// Nesting depth, starting at 1.
        #[serde(default = "default_level")]
        level: usize,
        /// First number of an ordered list.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<u64>,
        /// List items.
        children: Vec<Node>,
    },
    /// Plain list item.
    ListItem {
        /// Nesting depth, starting at 1.
        #[serde(default = "default_level")]
        level: usize,
        /// Block children.
        children: Vec<Node>,
    },
    /// List item carrying a checkbox.
    TaskListItem {
        /// Checkbox state.
        checked: bool,
        /// Nesting depth, starting at 1.
        #[serde(default = "default_level")]
        level: usize,
        /// Block children.
        children: Vec<Node>,
    },
    /// One footnote definition.
    FootnoteItem {
        /// Footnote label.
        key: String,
        /// 1-based position in the footnote list.
        index: usize,
        /// Block children.
        children: Vec<Node>,
    },
    /// Container for all footnote definitions.
    Footnotes {
        /// Footnote items.
        children: Vec<Node>,
    },
    /// GFM table.
    Table {
        /// One `table_head` followed by row groups.
        children: Vec<Node>,
    },
    /// Header row of a table; its children are cells.
    TableHead {
        /// Header cells.
        children: Vec<Node>,
    },
    /// Group of body rows.
    TableBody {
        /// Body rows.
        children: Vec<Node>,
    },
    /// One body row.
    TableRow {
        /// Row cells.
        children: Vec<Node>,
    },
    /// One table cell.
    TableCell {
        /// Column alignment; unset behaves as left.
        #[serde(default)]
        align: Option<Align>,
        /// Whether the cell belongs to the header row.
        #[serde(default)]
        is_head: bool,
        /// Inline children.
        children: Vec<Node>,
    },
    /// A node whose kind has no handler.
    #[serde(skip)]
    Unhandled {
        /// The unrecognised kind tag.
        kind: String,
    },
}

fn default_level() -> usize {
    1
}

/// Accepts either a bare string or a node array.
fn inline_children<'de, D>(deserializer: D) -> Result<Vec<Node>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Children {
        Text(String),
        Nodes(Vec<Node>),
    }

    Ok(match Children::deserialize(deserializer)? {
        Children::Text(text) => vec![Node::Text { text }],
        Children::Nodes(nodes) => nodes,
    })
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value
            .get("kind")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();

        if !KNOWN_KINDS.contains(&kind) {
            return Ok(Node::Unhandled {
                kind: kind.to_string(),
            });
        }

        let kind = kind.to_string();
        Node::deserialize(value).map_err(|err| de::Error::custom(format!("{}: {}", kind, err)))
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Unhandled { kind } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("kind", kind)?;
                map.end()
            }
            _ => Node::serialize(self, serializer),
        }
    }
}

impl Node {
    /// Creates a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    /// Returns the kind tag of this node.
    pub fn kind(&self) -> &str {
        match self {
            Node::Text { .. } => "text",
            Node::Linebreak => "linebreak",
            Node::ThematicBreak => "thematic_break",
            Node::Newline => "newline",
            Node::RawHtml { .. } => "raw_html",
            Node::Emphasis { .. } => "emphasis",
            Node::Strong { .. } => "strong",
            Node::Strikethrough { .. } => "strikethrough",
            Node::Codespan { .. } => "codespan",
            Node::Link { .. } => "link",
            Node::Image { .. } => "image",
            Node::FootnoteRef { .. } => "footnote_ref",
            Node::BlockCode { .. } => "block_code",
            Node::BlockHtml { .. } => "block_html",
            Node::Paragraph { .. } => "paragraph",
            Node::Heading { .. } => "heading",
            Node::BlockText { .. } => "block_text",
            Node::BlockQuote { .. } => "block_quote",
            Node::List { .. } => "list",
            Node::ListItem { .. } => "list_item",
            Node::TaskListItem { .. } => "task_list_item",
            Node::FootnoteItem { .. } => "footnote_item",
            Node::Footnotes { .. } => "footnotes",
            Node::Table { .. } => "table",
            Node::TableHead { .. } => "table_head",
            Node::TableBody { .. } => "table_body",
            Node::TableRow { .. } => "table_row",
            Node::TableCell { .. } => "table_cell",
            Node::Unhandled { kind } => kind,
        }
    }

    /// Returns the children of a container node, or an empty slice for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Emphasis { children }
            | Node::Strong { children }
            | Node::Strikethrough { children }
            | Node::Link { children, .. }
            | Node::Paragraph { children }
            | Node::Heading { children, .. }
            | Node::BlockText { children }
            | Node::BlockQuote { children }
            | Node::List { children, .. }
            | Node::ListItem { children, .. }
            | Node::TaskListItem { children, .. }
            | Node::FootnoteItem { children, .. }
            | Node::Footnotes { children }
            | Node::Table { children }
            | Node::TableHead { children }
            | Node::TableBody { children }
            | Node::TableRow { children }
            | Node::TableCell { children, .. } => children,
            _ => &[],
        }
    }
}

/// Loads a top-level node sequence from a JSON array.
///
/// Syntax errors surface as [`MinimarkError::Json`]; a recognised node kind
/// missing one of its fields surfaces as [`MinimarkError::MalformedNode`].
pub fn nodes_from_json(input: &str) -> Result<Vec<Node>, MinimarkError> {
    serde_json::from_str(input).map_err(|err| match err.classify() {
        serde_json::error::Category::Data => MinimarkError::malformed(err.to_string()),
        _ => MinimarkError::Json(err),
    })
}

/// Serialises a node sequence as pretty-printed JSON.
pub fn nodes_to_json(nodes: &[Node]) -> Result<String, MinimarkError> {
    Ok(serde_json::to_string_pretty(nodes)?)
}
