//! Markdown parsing and lowering into the minimark node model.
//!
//! markdown-rs produces an mdast tree; the renderer consumes the flatter
//! [`Node`] schema. Lowering resolves link/image references against their
//! definitions, numbers footnotes by first reference and gathers their
//! definitions into one trailing `footnotes` node.

use crate::node::{Align, Node};
use crate::{MinimarkError, SourceLocation};
use markdown::mdast;
use markdown::message::{Message, Place};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parser options for building markdown-rs parse options.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Enable GitHub Flavored Markdown constructs.
    pub gfm: bool,
    /// Keep raw HTML as nodes instead of treating it as text.
    pub raw_html: bool,
    /// Recognise a leading YAML/TOML frontmatter block (and drop it).
    pub frontmatter: bool,
}

impl ParseOptions {
    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: self.frontmatter,
            html_flow: self.raw_html,
            html_text: self.raw_html,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_footnote_definition = true;
            constructs.gfm_label_start_footnote = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        markdown::ParseOptions {
            constructs,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            raw_html: true,
            frontmatter: true,
        }
    }
}

/// Parse markdown into an mdast tree.
pub fn parse_mdast(input: &str, options: &ParseOptions) -> Result<mdast::Node, MinimarkError> {
    markdown::to_mdast(input, &options.to_markdown()).map_err(|err| MinimarkError::Parse {
        message: err.to_string(),
        location: message_location(&err),
    })
}

/// Parse markdown source into top-level block nodes.
pub fn parse_document(input: &str, options: &ParseOptions) -> Result<Vec<Node>, MinimarkError> {
    let root = parse_mdast(input, options)?;
    Ok(lower_document(&root))
}

/// Lower a parsed mdast tree into top-level block nodes.
pub fn lower_document(root: &mdast::Node) -> Vec<Node> {
    let mut lowering = Lowering::default();
    collect_definitions(root, &mut lowering.definitions);

    let mut blocks = match root {
        mdast::Node::Root(root) => lowering.lower_blocks(&root.children),
        other => lowering.lower_blocks(std::slice::from_ref(other)),
    };

    if let Some(footnotes) = lowering.finish_footnotes() {
        blocks.push(footnotes);
    }
    blocks
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::default(),
    }
}

/// Link reference definition target.
struct Definition {
    url: String,
    title: Option<String>,
}

/// A footnote definition waiting to be emitted.
struct PendingFootnote {
    identifier: String,
    key: String,
    children: Vec<Node>,
}

#[derive(Default)]
struct Lowering {
    definitions: HashMap<String, Definition>,
    /// Footnote identifier -> 1-based index, assigned on first reference.
    footnote_indices: HashMap<String, usize>,
    footnotes: Vec<PendingFootnote>,
    list_depth: usize,
}

fn collect_definitions(node: &mdast::Node, out: &mut HashMap<String, Definition>) {
    if let mdast::Node::Definition(def) = node {
        out.entry(def.identifier.clone()).or_insert_with(|| Definition {
            url: def.url.clone(),
            title: def.title.clone(),
        });
    }
    if let Some(children) = node.children() {
        for child in children {
            collect_definitions(child, out);
        }
    }
}

/// Snake-case name for mdast nodes without a minimark counterpart.
///
/// Math and MDX nodes only appear in trees parsed with other markdown-rs
/// options and handed to [`lower_document`].
fn mdast_kind(node: &mdast::Node) -> &'static str {
    match node {
        mdast::Node::Math(_) => "math",
        mdast::Node::InlineMath(_) => "inline_math",
        mdast::Node::MdxJsxFlowElement(_) => "mdx_jsx_flow_element",
        mdast::Node::MdxJsxTextElement(_) => "mdx_jsx_text_element",
        mdast::Node::MdxjsEsm(_) => "mdxjs_esm",
        mdast::Node::MdxFlowExpression(_) => "mdx_flow_expression",
        mdast::Node::MdxTextExpression(_) => "mdx_text_expression",
        mdast::Node::TableRow(_) => "table_row",
        mdast::Node::TableCell(_) => "table_cell",
        mdast::Node::ListItem(_) => "list_item",
        _ => "unknown",
    }
}

fn footnote_key(identifier: &str, label: &Option<String>) -> String {
    label.clone().unwrap_or_else(|| identifier.to_string())
}

impl Lowering {
    fn lower_blocks(&mut self, children: &[mdast::Node]) -> Vec<Node> {
        children
            .iter()
            .filter_map(|child| self.lower_block(child))
            .collect()
    }

    fn lower_inlines(&mut self, children: &[mdast::Node]) -> Vec<Node> {
        children
            .iter()
            .filter_map(|child| self.lower_inline(child))
            .collect()
    }

    fn lower_block(&mut self, node: &mdast::Node) -> Option<Node> {
        let lowered = match node {
            mdast::Node::Paragraph(para) => Node::Paragraph {
                children: self.lower_inlines(&para.children),
            },
            mdast::Node::Heading(heading) => Node::Heading {
                level: heading.depth,
                children: self.lower_inlines(&heading.children),
            },
            mdast::Node::ThematicBreak(_) => Node::ThematicBreak,
            mdast::Node::Blockquote(quote) => Node::BlockQuote {
                children: self.lower_blocks(&quote.children),
            },
            mdast::Node::Code(code) => Node::BlockCode {
                text: code.value.clone(),
                info: code.lang.clone(),
            },
            mdast::Node::Html(html) => Node::BlockHtml {
                html: html.value.clone(),
            },
            mdast::Node::List(list) => self.lower_list(list),
            mdast::Node::Table(table) => self.lower_table(table),
            mdast::Node::FootnoteDefinition(def) => {
                let children = self.lower_blocks(&def.children);
                self.footnotes.push(PendingFootnote {
                    identifier: def.identifier.clone(),
                    key: footnote_key(&def.identifier, &def.label),
                    children,
                });
                return None;
            }
            mdast::Node::Definition(_) | mdast::Node::Yaml(_) | mdast::Node::Toml(_) => {
                return None;
            }
            other => return self.lower_inline(other),
        };
        Some(lowered)
    }

    fn lower_inline(&mut self, node: &mdast::Node) -> Option<Node> {
        let lowered = match node {
            mdast::Node::Text(text) => Node::text(text.value.clone()),
            mdast::Node::Emphasis(em) => Node::Emphasis {
                children: self.lower_inlines(&em.children),
            },
            mdast::Node::Strong(strong) => Node::Strong {
                children: self.lower_inlines(&strong.children),
            },
            mdast::Node::Delete(del) => Node::Strikethrough {
                children: self.lower_inlines(&del.children),
            },
            mdast::Node::InlineCode(code) => Node::Codespan {
                text: code.value.clone(),
            },
            mdast::Node::Break(_) => Node::Linebreak,
            mdast::Node::Html(html) => Node::RawHtml {
                html: html.value.clone(),
            },
            mdast::Node::Link(link) => Node::Link {
                link: link.url.clone(),
                title: link.title.clone(),
                children: self.lower_inlines(&link.children),
            },
            mdast::Node::LinkReference(reference) => {
                match self.definitions.get(&reference.identifier) {
                    Some(def) => Node::Link {
                        link: def.url.clone(),
                        title: def.title.clone(),
                        children: self.lower_inlines(&reference.children),
                    },
                    None => {
                        let label: String =
                            reference.children.iter().map(ToString::to_string).collect();
                        Node::text(format!("[{}]", label))
                    }
                }
            }
            mdast::Node::Image(img) => Node::Image {
                src: img.url.clone(),
                alt: Some(img.alt.clone()),
                title: img.title.clone(),
            },
            mdast::Node::ImageReference(reference) => {
                match self.definitions.get(&reference.identifier) {
                    Some(def) => Node::Image {
                        src: def.url.clone(),
                        alt: Some(reference.alt.clone()),
                        title: def.title.clone(),
                    },
                    None => Node::text(reference.alt.clone()),
                }
            }
            mdast::Node::FootnoteReference(fnref) => {
                let next = self.footnote_indices.len() + 1;
                let index = *self
                    .footnote_indices
                    .entry(fnref.identifier.clone())
                    .or_insert(next);
                Node::FootnoteRef {
                    key: footnote_key(&fnref.identifier, &fnref.label),
                    index,
                }
            }
            other => {
                let kind = mdast_kind(other);
                log::debug!("No minimark counterpart for mdast node: {}", kind);
                Node::Unhandled {
                    kind: kind.to_string(),
                }
            }
        };
        Some(lowered)
    }

    fn lower_list(&mut self, list: &mdast::List) -> Node {
        self.list_depth += 1;
        let level = self.list_depth;

        let children = list
            .children
            .iter()
            .filter_map(|child| match child {
                mdast::Node::ListItem(item) => {
                    Some(self.lower_list_item(item, level, !list.spread && !item.spread))
                }
                other => self.lower_block(other),
            })
            .collect();

        self.list_depth -= 1;
        Node::List {
            ordered: list.ordered,
            level,
            start: list.start.map(u64::from),
            children,
        }
    }

    fn lower_list_item(&mut self, item: &mdast::ListItem, level: usize, tight: bool) -> Node {
        let children = item
            .children
            .iter()
            .filter_map(|child| match child {
                mdast::Node::Paragraph(para) if tight => Some(Node::BlockText {
                    children: self.lower_inlines(&para.children),
                }),
                other => self.lower_block(other),
            })
            .collect();

        match item.checked {
            Some(checked) => Node::TaskListItem {
                checked,
                level,
                children,
            },
            None => Node::ListItem { level, children },
        }
    }

    fn lower_table(&mut self, table: &mdast::Table) -> Node {
        let aligns: Vec<Option<Align>> = table
            .align
            .iter()
            .map(|align| match align {
                mdast::AlignKind::Left => Some(Align::Left),
                mdast::AlignKind::Center => Some(Align::Center),
                mdast::AlignKind::Right => Some(Align::Right),
                mdast::AlignKind::None => None,
            })
            .collect();

        let mut rows = table.children.iter().filter_map(|row| match row {
            mdast::Node::TableRow(row) => Some(row),
            _ => None,
        });

        let mut children = Vec::new();
        if let Some(head) = rows.next() {
            children.push(Node::TableHead {
                children: self.lower_cells(head, &aligns, true),
            });
        }

        let body: Vec<Node> = rows
            .map(|row| Node::TableRow {
                children: self.lower_cells(row, &aligns, false),
            })
            .collect();
        if !body.is_empty() {
            children.push(Node::TableBody { children: body });
        }

        Node::Table { children }
    }

    fn lower_cells(
        &mut self,
        row: &mdast::TableRow,
        aligns: &[Option<Align>],
        is_head: bool,
    ) -> Vec<Node> {
        row.children
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| match cell {
                mdast::Node::TableCell(cell) => Some(Node::TableCell {
                    align: aligns.get(i).copied().flatten(),
                    is_head,
                    children: self.lower_inlines(&cell.children),
                }),
                _ => None,
            })
            .collect()
    }

    /// Emits collected footnote definitions, referenced ones first by index.
    fn finish_footnotes(&mut self) -> Option<Node> {
        if self.footnotes.is_empty() {
            return None;
        }

        let mut pending = std::mem::take(&mut self.footnotes);
        let mut next = self.footnote_indices.len();
        let mut items: Vec<(usize, Node)> = pending
            .drain(..)
            .map(|footnote| {
                let index = match self.footnote_indices.get(&footnote.identifier) {
                    Some(index) => *index,
                    None => {
                        next += 1;
                        next
                    }
                };
                let item = Node::FootnoteItem {
                    key: footnote.key,
                    index,
                    children: footnote.children,
                };
                (index, item)
            })
            .collect();
        items.sort_by_key(|(index, _)| *index);

        Some(Node::Footnotes {
            children: items.into_iter().map(|(_, item)| item).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<Node> {
        parse_document(input, &ParseOptions::default()).unwrap()
    }

    #[test]
    fn test_heading() {
        assert_eq!(
            parse("## Hi there"),
            vec![Node::Heading {
                level: 2,
                children: vec![Node::text("Hi there")],
            }]
        );
    }

    #[test]
    fn test_inline_formatting() {
        let nodes = parse("a *b* **c** ~~d~~ `e`");
        let Node::Paragraph { children } = &nodes[0] else {
            panic!("Expected paragraph, got {:?}", nodes[0]);
        };
        let kinds: Vec<&str> = children.iter().map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec![
                "text",
                "emphasis",
                "text",
                "strong",
                "text",
                "strikethrough",
                "text",
                "codespan"
            ]
        );
    }

    #[test]
    fn test_tight_list_uses_block_text() {
        let nodes = parse("- one\n- two\n");
        let Node::List {
            ordered,
            level,
            children,
            ..
        } = &nodes[0]
        else {
            panic!("Expected list");
        };
        assert!(!ordered);
        assert_eq!(*level, 1);
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].kind(), "list_item");
        assert_eq!(children[0].children()[0].kind(), "block_text");
    }

    #[test]
    fn test_loose_list_keeps_paragraphs() {
        let nodes = parse("- one\n\n- two\n");
        assert_eq!(nodes[0].children()[0].children()[0].kind(), "paragraph");
    }

    #[test]
    fn test_nested_list_level() {
        let nodes = parse("- outer\n  - inner\n");
        let item = &nodes[0].children()[0];
        let nested = item
            .children()
            .iter()
            .find(|child| child.kind() == "list")
            .expect("nested list");
        assert!(matches!(nested, Node::List { level: 2, .. }));
    }

    #[test]
    fn test_ordered_list_start() {
        let nodes = parse("3. three\n4. four\n");
        assert!(matches!(
            nodes[0],
            Node::List {
                ordered: true,
                start: Some(3),
                ..
            }
        ));
    }

    #[test]
    fn test_task_list_items() {
        let nodes = parse("- [x] done\n- [ ] todo\n");
        let items = nodes[0].children();
        assert!(matches!(items[0], Node::TaskListItem { checked: true, .. }));
        assert!(matches!(items[1], Node::TaskListItem { checked: false, .. }));
    }

    #[test]
    fn test_table_structure() {
        let nodes = parse("| a | b |\n| :-: | --: |\n| 1 | 2 |\n| 3 | 4 |\n");
        let Node::Table { children } = &nodes[0] else {
            panic!("Expected table");
        };
        assert_eq!(children.len(), 2);
        let Node::TableHead { children: cells } = &children[0] else {
            panic!("Expected table head");
        };
        assert!(matches!(
            cells[0],
            Node::TableCell {
                align: Some(Align::Center),
                is_head: true,
                ..
            }
        ));
        assert!(matches!(
            cells[1],
            Node::TableCell {
                align: Some(Align::Right),
                ..
            }
        ));
        let Node::TableBody { children: rows } = &children[1] else {
            panic!("Expected table body");
        };
        assert_eq!(rows.len(), 2);
        assert!(matches!(
            rows[0].children()[0],
            Node::TableCell { is_head: false, .. }
        ));
    }

    #[test]
    fn test_head_only_table_has_no_body() {
        let nodes = parse("| a | b |\n| - | - |\n");
        assert_eq!(nodes[0].children().len(), 1);
    }

    #[test]
    fn test_footnotes_are_collected() {
        let nodes = parse("One[^b] two[^a].\n\n[^a]: Alpha\n[^b]: Beta\n");
        assert_eq!(nodes.len(), 2);
        let para = nodes[0].children();
        assert!(para.iter().any(|node| matches!(
            node,
            Node::FootnoteRef { key, index: 1 } if key == "b"
        )));
        assert!(para.iter().any(|node| matches!(
            node,
            Node::FootnoteRef { key, index: 2 } if key == "a"
        )));

        let Node::Footnotes { children } = &nodes[1] else {
            panic!("Expected footnotes");
        };
        assert!(matches!(&children[0], Node::FootnoteItem { key, index: 1, .. } if key == "b"));
        assert!(matches!(&children[1], Node::FootnoteItem { key, index: 2, .. } if key == "a"));
    }

    #[test]
    fn test_link_reference_resolved() {
        let nodes = parse("[home][h]\n\n[h]: https://example.com \"Home\"\n");
        assert_eq!(nodes.len(), 1);
        assert_eq!(
            nodes[0].children()[0],
            Node::Link {
                link: "https://example.com".to_string(),
                title: Some("Home".to_string()),
                children: vec![Node::text("home")],
            }
        );
    }

    #[test]
    fn test_image() {
        let nodes = parse("![alt text](/a.png \"T\")");
        assert_eq!(
            nodes[0].children()[0],
            Node::Image {
                src: "/a.png".to_string(),
                alt: Some("alt text".to_string()),
                title: Some("T".to_string()),
            }
        );
    }

    #[test]
    fn test_code_block() {
        let nodes = parse("```rust\nfn main() {}\n```\n");
        assert_eq!(
            nodes[0],
            Node::BlockCode {
                text: "fn main() {}".to_string(),
                info: Some("rust".to_string()),
            }
        );
    }

    #[test]
    fn test_html_block_and_inline() {
        let nodes = parse("<div>x</div>\n\nsome <b>bold</b>\n");
        assert_eq!(nodes[0].kind(), "block_html");
        assert!(nodes[1].children().iter().any(|n| n.kind() == "raw_html"));
    }

    #[test]
    fn test_raw_html_disabled() {
        let options = ParseOptions {
            raw_html: false,
            ..Default::default()
        };
        let nodes = parse_document("some <b>bold</b>\n", &options).unwrap();
        assert!(nodes[0].children().iter().all(|n| n.kind() == "text"));
    }

    #[test]
    fn test_frontmatter_is_dropped() {
        let nodes = parse("---\ntitle: Notes\n---\n\n# Body\n");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].kind(), "heading");

        let toml = parse("+++\ntitle = \"Notes\"\n+++\n\ntext\n");
        assert_eq!(toml.len(), 1);
        assert_eq!(toml[0].kind(), "paragraph");
    }

    #[test]
    fn test_frontmatter_disabled_keeps_rule() {
        let options = ParseOptions {
            frontmatter: false,
            ..Default::default()
        };
        let nodes = parse_document("---\ntitle: Notes\n---\n", &options).unwrap();
        assert_eq!(nodes[0], Node::ThematicBreak);
    }

    #[test]
    fn test_foreign_mdast_nodes_are_unhandled() {
        let options = markdown::ParseOptions {
            constructs: markdown::Constructs {
                math_flow: true,
                math_text: true,
                ..Default::default()
            },
            ..markdown::ParseOptions::default()
        };
        let root = markdown::to_mdast("$$\nx^2\n$$\n\nAn $y$ value.\n", &options).unwrap();
        let nodes = lower_document(&root);
        assert_eq!(
            nodes[0],
            Node::Unhandled {
                kind: "math".to_string()
            }
        );
        assert!(nodes[1].children().iter().any(|node| node.kind() == "inline_math"));
    }

    #[test]
    fn test_unreferenced_footnotes_follow_referenced() {
        let nodes = parse("Only[^used].\n\n[^late]: Late\n[^early]: Early\n[^used]: Used\n");
        let Node::Footnotes { children } = &nodes[1] else {
            panic!("Expected footnotes");
        };
        let order: Vec<(&str, usize)> = children
            .iter()
            .map(|item| match item {
                Node::FootnoteItem { key, index, .. } => (key.as_str(), *index),
                other => panic!("Expected footnote item, got {}", other.kind()),
            })
            .collect();
        assert_eq!(order, vec![("used", 1), ("late", 2), ("early", 3)]);
    }

    #[test]
    fn test_hard_break() {
        let nodes = parse("a\\\nb");
        assert_eq!(nodes[0].children()[1], Node::Linebreak);
    }
}
