//! Paints grid markup as plain text.

use datagrid::Node;
use datagrid::view::{Element, Tag};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_CELL_WIDTH: usize = 32;

fn text_of(el: &Element) -> String {
    Node::from(el.clone()).text_content()
}

fn with_class<'a>(node: &'a Node, class: &str) -> Vec<&'a Element> {
    node.find_all(&|el| el.has_class(class))
}

/// Cut `text` to at most `width` columns, marking the cut with `…`.
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

/// Render the markup produced by the grid as a text table with its toolbar
/// and footer.
pub fn paint(markup: &Node) -> String {
    let mut out = String::new();

    for label in with_class(markup, "dt-length")
        .into_iter()
        .chain(with_class(markup, "dt-search"))
    {
        let control = Node::from(label.clone());
        let value = control
            .find(&|el| el.tag == Tag::Input)
            .and_then(|input| input.attrs.get("value").cloned());
        match value {
            Some(value) => out.push_str(&format!("Search: [{value}]   ")),
            None => {
                let length = control
                    .find(&|el| el.tag == Tag::Select)
                    .and_then(|select| select.attrs.get("value").cloned())
                    .unwrap_or_default();
                out.push_str(&format!("Show [{length}] entries   "));
            }
        }
    }
    if let Some(processing) = markup.find(&|el| el.has_class("dt-processing")) {
        out.push_str(&text_of(processing));
    }
    out.push('\n');

    let headers: Vec<String> = with_class(markup, "dt-header-cell")
        .into_iter()
        .map(|th| truncate(&text_of(th), MAX_CELL_WIDTH))
        .collect();
    let rows: Vec<Vec<String>> = with_class(markup, "dt-data-row")
        .into_iter()
        .map(|tr| {
            Node::from(tr.clone())
                .find_all(&|el| el.tag == Tag::Td)
                .into_iter()
                .map(|td| truncate(&text_of(td), MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join(" | ")
    };
    let rule: String = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");

    out.push_str(line(&headers).trim_end());
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    if rows.is_empty() {
        if let Some(status) = markup.find(&|el| el.has_class("dt-status-cell")) {
            out.push_str(&text_of(status));
            out.push('\n');
        }
    } else {
        for row in &rows {
            out.push_str(line(row).trim_end());
            out.push('\n');
        }
    }
    out.push_str(&rule);
    out.push('\n');

    if let Some(info) = markup.find(&|el| el.has_class("dt-info")) {
        out.push_str(&text_of(info));
    }
    if let Some(pagination) = markup.find(&|el| el.has_class("dt-pagination")) {
        let buttons: Vec<String> = pagination
            .children
            .iter()
            .filter_map(Node::as_element)
            .map(|el| {
                let label = text_of(el);
                if el.has_class("dt-page-current") {
                    format!("[{label}]")
                } else if el.disabled {
                    format!("({label})")
                } else {
                    label
                }
            })
            .collect();
        out.push_str("   ");
        out.push_str(&buttons.join(" "));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_display_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Integration Specialist", 8), "Integra…");
        assert_eq!(truncate("東京オフィス", 5), "東京…");
    }

    #[test]
    fn test_pad_uses_display_width() {
        assert_eq!(pad("東京", 6), "東京  ");
    }
}
