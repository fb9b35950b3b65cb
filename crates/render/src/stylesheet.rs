//! The stylesheet the host prepends to rendered content.
//!
//! The renderer only emits class references; these rules give them their
//! look. Each class name here must match one the renderer writes.

use crate::renderer::{CHECKBOX_CHECKED_CLASS, CHECKBOX_CLASS, FOOTNOTE_REF_CLASS};

/// `<style>` block defining every class the renderer references.
pub const STYLESHEET: &str = r#"<style type="text/css">
    .blockquote p {
        padding-left: 0.5em;
        border-left: 0.25em solid gray;
    }

    .task-list-item__checkbox {
        width: 0.75em;
        height: 0.75em;
        display: inline-block;
        border: 1px solid white;
        line-height: 1;
    }

    .task-list-item__checkbox--checked {
        background-color: hsl(210, 70%, 50%);
    }

    .footnote__ref {
        display: inline;
        font-size: 0.75em;
        position: relative;
        top: -0.75em;
    }

    .block-code {
        background-color: #333;
        border-radius: 0.25em;
        padding: 0.25em;
        border: 1px solid black;
        display: inline-block
    }

    .code-span {
        background-color: #333;
        border-radius: 0.25em
    }

    .thematic-break {
        border-bottom: 1px solid black;
        width: 100px;
    }
</style>"#;

/// Class names referenced by rendered output.
pub const CLASS_NAMES: &[&str] = &[
    "blockquote",
    CHECKBOX_CLASS,
    CHECKBOX_CHECKED_CLASS,
    FOOTNOTE_REF_CLASS,
    "block-code",
    "code-span",
    "thematic-break",
];

/// Prepends the stylesheet to rendered content.
pub fn wrap_document(content: &str) -> String {
    let mut html = String::with_capacity(STYLESHEET.len() + content.len() + 1);
    html.push_str(STYLESHEET);
    html.push('\n');
    html.push_str(content);
    html
}
