//! Node dispatch and the inline/block handlers.

use super::context::{BR, Transformer, escape_html, escape_text};
use super::table::render_table;
use super::widgets::{render_footnote_item, render_footnote_ref, render_task_list_item};
use minimark_core::Node;

/// Text preceding the kind in [`unhandled_placeholder`].
pub const UNHANDLED_PREFIX: &str = "UNHANDLED: ";

/// Placeholder written for node kinds without a handler.
pub fn unhandled_placeholder(kind: &str) -> String {
    format!("{}{}", UNHANDLED_PREFIX, escape_html(kind))
}

fn render_wrapped(tag: &str, children: &[Node], tx: &Transformer<'_>, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    tx.render_all_into(children, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn render_link(
    link: &str,
    title: Option<&str>,
    children: &[Node],
    tx: &Transformer<'_>,
    out: &mut String,
) {
    out.push_str("<a");
    tx.push_attr(out, &tx.options().link_attribute, link);
    if let Some(title) = title {
        tx.push_attr(out, "title", title);
    }
    out.push('>');
    tx.render_all_into(children, out);
    out.push_str("</a>");
}

fn render_image(
    src: &str,
    alt: Option<&str>,
    title: Option<&str>,
    tx: &Transformer<'_>,
    out: &mut String,
) {
    out.push_str("<img");
    tx.push_attr(out, "src", src);
    tx.push_attr(out, "alt", alt.unwrap_or_default());
    tx.push_attr(out, "title", title.unwrap_or_default());
    out.push_str("/>");
}

fn render_heading(level: u8, children: &[Node], tx: &Transformer<'_>, out: &mut String) {
    let level = level.clamp(1, 6);
    out.push_str(&format!("<h{}>", level));
    tx.render_all_into(children, out);
    out.push_str(&format!("</h{}>", level));
}

/// Code blocks keep their line structure through explicit `<br/>`s.
fn render_block_code(text: &str, out: &mut String) {
    let escaped = escape_html(text);
    out.push_str(r#"<div class="block-code"><pre><code>"#);
    out.push_str(&escaped.trim_end().replace('\n', BR));
    out.push_str("</code></pre></div>");
}

fn render_block_quote(children: &[Node], tx: &Transformer<'_>, out: &mut String) {
    let text: String = children
        .iter()
        .map(|child| tx.render(child))
        .filter(|rendered| !rendered.is_empty())
        .collect();
    out.push_str(r#"<div class="blockquote">"#);
    out.push_str(&text.replace('\n', BR));
    out.push_str("</div>");
}

fn render_list(
    ordered: bool,
    start: Option<u64>,
    children: &[Node],
    tx: &Transformer<'_>,
    out: &mut String,
) {
    if ordered && tx.options().ordered_lists {
        match start {
            Some(start) if start != 1 => out.push_str(&format!(r#"<ol start="{}">"#, start)),
            _ => out.push_str("<ol>"),
        }
        tx.render_all_into(children, out);
        out.push_str("</ol>");
    } else {
        render_wrapped("ul", children, tx, out);
    }
}

/// Recursively renders a node, appending its HTML to `out`.
pub fn render_node(node: &Node, tx: &Transformer<'_>, out: &mut String) {
    match node {
        Node::Text { text } => out.push_str(&escape_text(text)),
        Node::Linebreak => out.push_str(BR),
        Node::Newline => {}
        Node::ThematicBreak => out.push_str(r#"<div class="thematic-break"></div>"#),
        Node::RawHtml { html } | Node::BlockHtml { html } => tx.push_trusted_html(out, html),
        Node::Emphasis { children } => render_wrapped("em", children, tx, out),
        Node::Strong { children } => render_wrapped("strong", children, tx, out),
        Node::Strikethrough { children } => render_wrapped("s", children, tx, out),
        Node::Codespan { text } => {
            out.push_str(r#"<code class="code-span">"#);
            out.push_str(&escape_html(text));
            out.push_str("</code>");
        }
        Node::Link {
            link,
            title,
            children,
        } => render_link(link, title.as_deref(), children, tx, out),
        Node::Image { src, alt, title } => {
            render_image(src, alt.as_deref(), title.as_deref(), tx, out)
        }
        Node::FootnoteRef { key, .. } => render_footnote_ref(key, out),
        Node::BlockCode { text, .. } => render_block_code(text, out),
        Node::Paragraph { children } => render_wrapped("p", children, tx, out),
        Node::Heading { level, children } => render_heading(*level, children, tx, out),
        Node::BlockText { children } | Node::Footnotes { children } => {
            tx.render_all_into(children, out)
        }
        Node::BlockQuote { children } => render_block_quote(children, tx, out),
        Node::List {
            ordered,
            start,
            children,
            ..
        } => render_list(*ordered, *start, children, tx, out),
        Node::ListItem { children, .. } => render_wrapped("li", children, tx, out),
        Node::TaskListItem {
            checked, children, ..
        } => render_task_list_item(*checked, children, tx, out),
        Node::FootnoteItem { key, children, .. } => render_footnote_item(key, children, tx, out),
        Node::Table { children } => render_table(children, tx, out),
        Node::TableHead { .. }
        | Node::TableBody { .. }
        | Node::TableRow { .. }
        | Node::TableCell { .. } => {
            log::warn!("Table part outside a table: {}", node.kind());
            out.push_str(&unhandled_placeholder(node.kind()));
        }
        Node::Unhandled { kind } => {
            log::warn!("Unhandled node kind: {}", kind);
            out.push_str(&unhandled_placeholder(kind));
        }
    }
}
