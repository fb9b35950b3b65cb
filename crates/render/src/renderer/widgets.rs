//! Synthetic widgets standing in for elements the display surface lacks.
//!
//! There is no `<input type="checkbox">` and no `<sup>`, so task checkboxes
//! are styled boxes and footnote references are offset inline blocks. The
//! class names are resolved by [`STYLESHEET`](crate::STYLESHEET).

use super::context::{BR, Transformer, escape_html};
use minimark_core::Node;

/// Class of the empty checkbox box.
pub const CHECKBOX_CLASS: &str = "task-list-item__checkbox";

/// Modifier class filling the box of a checked item.
pub const CHECKBOX_CHECKED_CLASS: &str = "task-list-item__checkbox--checked";

/// Class raising a footnote reference like a superscript.
pub const FOOTNOTE_REF_CLASS: &str = "footnote__ref";

pub(super) fn render_task_list_item(
    checked: bool,
    children: &[Node],
    tx: &Transformer<'_>,
    out: &mut String,
) {
    out.push_str("<li>");
    if checked {
        out.push_str(&format!(
            r#"<div class="{} {}"></div>"#,
            CHECKBOX_CLASS, CHECKBOX_CHECKED_CLASS
        ));
    } else {
        out.push_str(&format!(r#"<div class="{}"></div>"#, CHECKBOX_CLASS));
    }
    out.push(' ');
    tx.render_all_into(children, out);
    out.push_str("</li>");
}

pub(super) fn render_footnote_ref(key: &str, out: &mut String) {
    out.push_str(&format!(
        r#"<div class="{}">[{}]</div>"#,
        FOOTNOTE_REF_CLASS,
        escape_html(key)
    ));
}

/// Renders a definition as `[key]: content` followed by a line break.
pub(super) fn render_footnote_item(
    key: &str,
    children: &[Node],
    tx: &Transformer<'_>,
    out: &mut String,
) {
    out.push_str("<div>[");
    out.push_str(&escape_html(key));
    out.push_str(r#"]: <div style="display: inline-block">"#);
    tx.render_all_into(children, out);
    out.push_str("</div></div>");
    out.push_str(BR);
}
