//! Table layout engine.
//!
//! The display surface cannot lay out `<table>` reliably, so tables are drawn
//! as monospace text inside `<pre>`:
//!
//! ```text
//! +=======+============+
//! | Name  | Role       |
//! +=======+============+
//! | Alice | maintainer |
//! +-------+------------+
//! ```
//!
//! Widths are measured on the raw text of each cell while the cell content is
//! rendered separately; padding is computed from the former and applied to the
//! latter so escaped entities never count towards the width.

use super::context::{NBSP, Transformer};
use super::render::UNHANDLED_PREFIX;
use minimark_core::{Align, Node};

const NL: &str = "<br/>\n";

/// Visual width of an inline node: the characters of its text descendants.
///
/// Footnote markers and unhandled placeholders count the label they print.
/// Images, line breaks and raw HTML take no columns.
pub fn estimate_inline_width(node: &Node) -> usize {
    match node {
        Node::Text { text } | Node::Codespan { text } => text.chars().count(),
        // `[key]`
        Node::FootnoteRef { key, .. } => key.chars().count() + 2,
        Node::Unhandled { kind } => UNHANDLED_PREFIX.chars().count() + kind.chars().count(),
        Node::Image { .. } | Node::Linebreak | Node::RawHtml { .. } => 0,
        other => other.children().iter().map(estimate_inline_width).sum(),
    }
}

/// Visual width of a cell's content.
pub fn estimate_cell_width(cell: &Node) -> usize {
    cell.children().iter().map(estimate_inline_width).sum()
}

/// The cells of a table, split into the head row and the body rows.
#[derive(Debug, Default)]
pub struct TableRows<'a> {
    /// Cells of the header row.
    pub head: Option<&'a [Node]>,
    /// Cells of every body row, in order.
    pub body: Vec<&'a [Node]>,
}

impl<'a> TableRows<'a> {
    /// Collects rows from a table's children.
    ///
    /// Body rows may come wrapped in `table_body` groups or directly as
    /// `table_row` children.
    pub fn collect(children: &'a [Node]) -> Self {
        let mut rows = TableRows::default();
        for child in children {
            match child {
                Node::TableHead { children } => {
                    if rows.head.is_some() {
                        log::warn!("Table has more than one head row; using the first");
                    } else {
                        rows.head = Some(children.as_slice());
                    }
                }
                Node::TableBody { children } => {
                    rows.body.extend(children.iter().filter_map(row_cells));
                }
                Node::TableRow { children } => rows.body.push(children.as_slice()),
                other => log::warn!("Ignoring {} inside a table", other.kind()),
            }
        }
        rows
    }

    /// Column count: the head row's cell count, or the widest body row
    /// when the table has no head.
    pub fn column_count(&self) -> usize {
        match self.head {
            Some(head) => head.len(),
            None => self.body.iter().map(|row| row.len()).max().unwrap_or(0),
        }
    }

    /// The maximum cell width of each column across head and body rows.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths = vec![0; self.column_count()];
        for row in self.head.iter().chain(self.body.iter()) {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(estimate_cell_width(cell));
            }
        }
        widths
    }
}

fn row_cells(row: &Node) -> Option<&[Node]> {
    match row {
        Node::TableRow { children } => Some(children.as_slice()),
        other => {
            log::warn!("Ignoring {} inside a table body", other.kind());
            None
        }
    }
}

fn cell_align(cell: &Node) -> Option<Align> {
    match cell {
        Node::TableCell { align, .. } => *align,
        _ => None,
    }
}

/// Renders a cell and pads it with `&nbsp;` to `width` columns.
///
/// Right alignment pads on the left, center splits the padding with the
/// smaller half on the left, and everything else pads on the right. A
/// missing cell renders as blank padding.
pub fn get_cell_text(cell: Option<&Node>, width: usize, tx: &Transformer<'_>) -> String {
    let (content, text_width, align) = match cell {
        Some(cell) => (
            tx.render_all(cell.children()),
            estimate_cell_width(cell),
            cell_align(cell),
        ),
        None => (String::new(), 0, None),
    };
    let padding = width.saturating_sub(text_width);

    match align {
        Some(Align::Right) => format!("{}{}", NBSP.repeat(padding), content),
        Some(Align::Center) => {
            let lpad = padding / 2;
            let rpad = padding - lpad;
            format!("{}{}{}", NBSP.repeat(lpad), content, NBSP.repeat(rpad))
        }
        Some(Align::Left) | None => format!("{}{}", content, NBSP.repeat(padding)),
    }
}

/// Builds `+=...=+=...=+` style separators; `fill` is `=` or `-`.
fn separator(widths: &[usize], fill: char) -> String {
    let fill = fill.to_string();
    let joint = format!("{}+{}", fill, fill);
    let columns: Vec<String> = widths.iter().map(|width| fill.repeat(*width)).collect();
    format!("+{}{}{}+", fill, columns.join(&joint), fill)
}

/// Formats one data line, padding short rows and truncating long ones.
fn data_line(cells: &[Node], widths: &[usize], tx: &Transformer<'_>) -> String {
    if cells.len() != widths.len() {
        log::warn!(
            "Table row has {} cells but the table has {} columns",
            cells.len(),
            widths.len()
        );
    }
    let columns: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| get_cell_text(cells.get(i), *width, tx))
        .collect();
    format!("| {} |", columns.join(" | "))
}

/// Lines of the head block: separator, data line, separator.
pub fn head_lines(cells: &[Node], widths: &[usize], tx: &Transformer<'_>) -> Vec<String> {
    let sep = separator(widths, '=');
    vec![sep.clone(), data_line(cells, widths, tx), sep]
}

/// Lines of one body row: data line, separator.
pub fn body_row_lines(cells: &[Node], widths: &[usize], tx: &Transformer<'_>) -> Vec<String> {
    vec![data_line(cells, widths, tx), separator(widths, '-')]
}

/// Produces every line of the table: the head block, then each body row.
pub fn table_lines(children: &[Node], tx: &Transformer<'_>) -> Vec<String> {
    let rows = TableRows::collect(children);
    let widths = rows.column_widths();
    let mut lines = Vec::new();

    if let Some(head) = rows.head {
        lines.extend(head_lines(head, &widths, tx));
    }
    for cells in &rows.body {
        lines.extend(body_row_lines(cells, &widths, tx));
    }
    lines
}

/// Renders a table as a `<pre>` block framed by line breaks.
pub(super) fn render_table(children: &[Node], tx: &Transformer<'_>, out: &mut String) {
    out.push_str(NL);
    out.push_str("<pre>");
    out.push_str(&table_lines(children, tx).join(NL));
    out.push_str("</pre>");
    out.push_str(NL);
}
