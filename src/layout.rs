use std::fmt::Write as FmtWrite;

use crate::field::Field;
use crate::utils::escape_xml;

pub const DEFAULT_CLASS_PREFIX: &str = "sd-mm-info";
const FIELDS_PER_ROW: usize = 2;
const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Root class; every block class is derived from it (`{prefix}-row`, ...).
    pub class_prefix: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
        }
    }
}

impl LayoutOptions {
    pub fn with_class_prefix(prefix: impl Into<String>) -> Self {
        Self {
            class_prefix: prefix.into(),
        }
    }
}

pub fn render(fields: &[Field]) -> String {
    render_with(fields, &LayoutOptions::default())
}

/// Lays fields out as rows of at most two normal fields, with prompt-like
/// fields as full-width vertical blocks between them.
///
/// Names are written verbatim and values are expected to be escaped already,
/// as [`crate::parse`] does.
pub fn render_with(fields: &[Field], options: &LayoutOptions) -> String {
    let prefix = escape_xml(&options.class_prefix);
    let mut html = String::new();
    let mut row = 0usize;
    let mut rows = 0usize;
    let mut verticals = 0usize;

    line(&mut html, 0, &format!(r#"<div class="{prefix}">"#));

    for field in fields {
        if row == FIELDS_PER_ROW {
            close_row(&mut html, &mut row);
        }

        if field.is_prompt_like() {
            if row > 0 {
                close_row(&mut html, &mut row);
            }
            write_block(&mut html, 1, &prefix, "vertical-field", field);
            verticals += 1;
        } else {
            if row == 0 {
                line(&mut html, 1, &format!(r#"<div class="{prefix}-row">"#));
                rows += 1;
            }
            write_block(&mut html, 2, &prefix, "field", field);
            row += 1;
        }
    }

    if row > 0 {
        close_row(&mut html, &mut row);
    }
    line(&mut html, 0, "</div>");

    tracing::trace!(rows, verticals, "rendered info layout");
    html
}

/// Wraps the layout in a minimal standalone HTML page.
pub fn render_document(fields: &[Field], options: &LayoutOptions, title: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\" />\n");
    let _ = writeln!(html, "<title>{}</title>", escape_xml(title));
    html.push_str("</head>\n<body>\n");
    html.push_str(&render_with(fields, options));
    html.push_str("</body>\n</html>\n");
    html
}

fn write_block(html: &mut String, depth: usize, prefix: &str, kind: &str, field: &Field) {
    line(html, depth, &format!(r#"<div class="{prefix}-{kind}">"#));
    line(
        html,
        depth + 1,
        &format!(r#"<div class="{prefix}-name">{}</div>"#, field.name),
    );
    line(
        html,
        depth + 1,
        &format!(r#"<div class="{prefix}-value">{}</div>"#, field.value),
    );
    line(html, depth, "</div>");
}

fn close_row(html: &mut String, row: &mut usize) {
    line(html, 1, "</div>");
    *row = 0;
}

fn line(html: &mut String, depth: usize, content: &str) {
    for _ in 0..depth {
        html.push_str(INDENT);
    }
    html.push_str(content);
    html.push('\n');
}
