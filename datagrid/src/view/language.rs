//! User-facing strings and wrappers.

use crate::slot::Slot;
use crate::view::Node;

/// Numbers available to the info text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoContext {
    /// One-based index of the first visible row.
    pub start: usize,
    /// One-based index of the last visible row.
    pub end: usize,
    /// Rows after filtering.
    pub total: usize,
    /// Rows before filtering.
    pub max: usize,
    pub length: usize,
}

/// A rendered control handed to its wrapper slot.
#[derive(Debug, Clone)]
pub struct ControlContext {
    pub control: Node,
}

/// Fill `{start}`, `{end}`, `{total}`, `{max}` and `{length}` in `template`.
pub fn fill_info(template: &str, cx: &InfoContext) -> String {
    template
        .replace("{start}", &cx.start.to_string())
        .replace("{end}", &cx.end.to_string())
        .replace("{total}", &cx.total.to_string())
        .replace("{max}", &cx.max.to_string())
        .replace("{length}", &cx.length.to_string())
}

/// A templated info slot.
///
/// ```
/// use datagrid::{InfoContext, info_template};
///
/// let slot = info_template("{start}-{end} of {total}");
/// let cx = InfoContext { start: 11, end: 20, total: 57, max: 57, length: 10 };
/// assert_eq!(slot.resolve(&cx).text_content(), "11-20 of 57");
/// ```
pub fn info_template(template: impl Into<String>) -> Slot<InfoContext> {
    let template = template.into();
    Slot::dynamic(move |cx: &InfoContext| Node::text(fill_info(&template, cx)))
}

/// Wraps a control with text before and after it.
///
/// `"Show {control} entries"` puts the control between the two halves.
pub fn control_template(template: impl Into<String>) -> Slot<ControlContext> {
    let template = template.into();
    Slot::dynamic(move |cx: &ControlContext| {
        let (before, after) = template
            .split_once("{control}")
            .unwrap_or((template.as_str(), ""));
        Node::Fragment(vec![
            Node::text(before),
            cx.control.clone(),
            Node::text(after),
        ])
    })
}

/// Labels of the pagination buttons.
#[derive(Debug, Clone)]
pub struct Paginate {
    pub first: Slot<()>,
    pub previous: Slot<()>,
    pub next: Slot<()>,
    pub last: Slot<()>,
}

impl Default for Paginate {
    fn default() -> Self {
        Self {
            first: "First".into(),
            previous: "Previous".into(),
            next: "Next".into(),
            last: "Last".into(),
        }
    }
}

/// Every customizable piece of text.
#[derive(Debug, Clone)]
pub struct Language {
    /// Shown in the body while the first response is pending.
    pub loading_records: Slot<()>,
    /// Shown when a search matches nothing.
    pub zero_records: Slot<()>,
    /// Shown when the source has no rows at all.
    pub empty_table: Slot<()>,
    /// Overlay while a fetch is in flight.
    pub processing: Slot<()>,
    pub info: Slot<InfoContext>,
    pub info_empty: Slot<InfoContext>,
    /// Appended to the info text while a search hides rows.
    pub info_filtered: Slot<InfoContext>,
    pub length_menu: Slot<ControlContext>,
    pub search: Slot<ControlContext>,
    pub paginate: Paginate,
    pub sort_ascending: Slot<()>,
    pub sort_descending: Slot<()>,
    pub sort_none: Slot<()>,
}

impl Default for Language {
    fn default() -> Self {
        Self {
            loading_records: "Loading...".into(),
            zero_records: "No matching records found".into(),
            empty_table: "No data available in table".into(),
            processing: "Processing...".into(),
            info: info_template("Showing {start} to {end} of {total} entries"),
            info_empty: info_template("Showing 0 to 0 of 0 entries"),
            info_filtered: info_template(" (filtered from {max} total entries)"),
            length_menu: control_template("Show {control} entries"),
            search: control_template("Search: {control}"),
            paginate: Paginate::default(),
            sort_ascending: "▲".into(),
            sort_descending: "▼".into(),
            sort_none: "⇅".into(),
        }
    }
}
