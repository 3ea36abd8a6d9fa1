//! The renderer: a pure function of state and configuration.

use crate::column::{CellContext, ColumnDef};
use crate::config::{RowKeyFn, Settings};
use crate::engine::{PageButton, PageInfo, page_buttons};
use crate::state::{Direction, EngineState};

use super::event::{Action, EventKind, PageTarget};
use super::language::{ControlContext, InfoContext, Language};
use super::node::{Element, Node, Tag};
use super::theme::{Part, Theme};

/// Numbered pagination buttons shown by default.
pub const DEFAULT_MAX_BUTTONS: usize = 7;

/// Everything besides the state that shapes the output.
#[derive(Clone, Copy)]
pub struct ViewContext<'a> {
    pub columns: &'a [ColumnDef],
    pub settings: &'a Settings,
    pub language: &'a Language,
    pub theme: &'a dyn Theme,
    pub row_key: &'a RowKeyFn,
    pub max_buttons: usize,
}

impl ViewContext<'_> {
    fn el(&self, tag: Tag, part: Part) -> Element {
        Element::new(tag).class_opt(self.theme.class(part))
    }

    fn with_part(&self, el: Element, part: Part) -> Element {
        el.class_opt(self.theme.class(part))
    }
}

/// Render `state`.
///
/// Produces the toolbar (length menu and search box), the processing overlay
/// while loading, the table and the footer (info text and pagination).
pub fn render(state: &EngineState, cx: &ViewContext<'_>) -> Node {
    let info = PageInfo::from_state(state);

    let mut wrapper = cx.el(Tag::Div, Part::Wrapper).child(toolbar(state, cx));
    if state.loading {
        wrapper = wrapper.child(
            cx.el(Tag::Div, Part::Processing)
                .attr("role", "status")
                .child(cx.language.processing.resolve(&())),
        );
    }

    let mut table = cx
        .el(Tag::Table, Part::Table)
        .child(header(state, cx))
        .child(body(state, cx));
    if cx.settings.paging {
        table = table.on(EventKind::Wheel, Action::Wheel);
    }

    wrapper
        .child(table)
        .child(footer(state, &info, cx))
        .into()
}

fn toolbar(state: &EngineState, cx: &ViewContext<'_>) -> Node {
    let mut toolbar = cx.el(Tag::Div, Part::Toolbar);

    if cx.settings.paging {
        let options = cx.settings.length_menu.iter().map(|&length| -> Node {
            let option = Element::new(Tag::Option)
                .attr("value", length.to_string())
                .child(length.to_string());
            if length == state.length {
                option.attr("selected", "selected").into()
            } else {
                option.into()
            }
        });
        let select = Element::new(Tag::Select)
            .attr("value", state.length.to_string())
            .children(options)
            .on(EventKind::Change, Action::SetLength);
        toolbar = toolbar.child(
            cx.el(Tag::Label, Part::Length)
                .child(cx.language.length_menu.resolve(&ControlContext {
                    control: select.into(),
                })),
        );
    }

    let input = Element::new(Tag::Input)
        .attr("type", "search")
        .attr("value", state.search.value.clone())
        .on(EventKind::Input, Action::Search);
    toolbar
        .child(
            cx.el(Tag::Label, Part::Search)
                .child(cx.language.search.resolve(&ControlContext {
                    control: input.into(),
                })),
        )
        .into()
}

fn header(state: &EngineState, cx: &ViewContext<'_>) -> Node {
    let cells = cx.columns.iter().enumerate().map(|(index, col)| -> Node {
        let direction = state.direction_of(index);
        let mut th = cx
            .el(Tag::Th, Part::HeaderCell)
            .key(col.name().map_or_else(|| index.to_string(), str::to_string))
            .class_opt(col.get_class_name())
            .attr("aria-sort", direction.map_or("none", Direction::aria))
            .child(col.title());
        if let Some(style) = col.style() {
            th = th.attr("style", style);
        }

        if col.is_orderable() {
            let (part, icon) = match direction {
                Some(Direction::Asc) => (Some(Part::SortedAsc), &cx.language.sort_ascending),
                Some(Direction::Desc) => (Some(Part::SortedDesc), &cx.language.sort_descending),
                None => (None, &cx.language.sort_none),
            };
            th = cx.with_part(th, Part::Sortable);
            if let Some(part) = part {
                th = cx.with_part(th, part);
            }
            th = th
                .child(cx.el(Tag::Span, Part::SortIcon).child(icon.resolve(&())))
                .on(EventKind::Click, Action::Sort(index));
        }
        th.into()
    });

    cx.el(Tag::Thead, Part::Head)
        .child(cx.el(Tag::Tr, Part::HeaderRow).children(cells))
        .into()
}

fn body(state: &EngineState, cx: &ViewContext<'_>) -> Node {
    let tbody = cx.el(Tag::Tbody, Part::Body);
    if state.data.is_empty() {
        return tbody.child(status_row(state, cx)).into();
    }

    let rows = state.data.iter().enumerate().map(|(row_index, row)| -> Node {
        let parity = if row_index % 2 == 0 { Part::Even } else { Part::Odd };
        let cells = cx.columns.iter().enumerate().map(|(column_index, col)| -> Node {
            let content = match col.renderer() {
                Some(render) => render(&CellContext {
                    raw_value: col.resolve(row, column_index),
                    row,
                    row_index,
                    column_index,
                    state,
                }),
                None => Node::text(col.display_text(row, column_index)),
            };
            cx.el(Tag::Td, Part::DataCell)
                .class_opt(col.get_class_name())
                .child(content)
                .into()
        });
        let tr = cx
            .el(Tag::Tr, Part::DataRow)
            .key((cx.row_key)(row, row_index));
        cx.with_part(tr, parity).children(cells).into()
    });
    tbody.children(rows).into()
}

/// The single row shown when there is nothing to list.
fn status_row(state: &EngineState, cx: &ViewContext<'_>) -> Node {
    let message = if state.loading {
        &cx.language.loading_records
    } else if state.records_total.unwrap_or(0) == 0 {
        &cx.language.empty_table
    } else {
        &cx.language.zero_records
    };
    cx.el(Tag::Tr, Part::StatusRow)
        .child(
            cx.el(Tag::Td, Part::StatusCell)
                .attr("colspan", cx.columns.len().max(1).to_string())
                .child(message.resolve(&())),
        )
        .into()
}

fn footer(state: &EngineState, info: &PageInfo, cx: &ViewContext<'_>) -> Node {
    let mut footer = cx.el(Tag::Div, Part::Footer).child(info_text(info, cx));
    if cx.settings.paging {
        footer = footer.child(pagination(state, info, cx));
    }
    footer.into()
}

fn info_text(info: &PageInfo, cx: &ViewContext<'_>) -> Node {
    let context = InfoContext {
        start: info.display_start,
        end: info.display_end,
        total: info.records_filtered.unwrap_or(0),
        max: info.records_total.unwrap_or(0),
        length: info.length,
    };
    let mut parts = vec![if info.display_start == 0 {
        cx.language.info_empty.resolve(&context)
    } else {
        cx.language.info.resolve(&context)
    }];
    if info.is_filtered() {
        parts.push(cx.language.info_filtered.resolve(&context));
    }
    cx.el(Tag::Div, Part::Info)
        .attr("aria-live", "polite")
        .child(Node::Fragment(parts))
        .into()
}

fn pagination(state: &EngineState, info: &PageInfo, cx: &ViewContext<'_>) -> Node {
    let paginate = &cx.language.paginate;
    let back_disabled = state.loading || !info.has_previous();
    let forward_disabled = state.loading || !info.has_next();

    let nav = |label: Node, target: PageTarget, disabled: bool| -> Node {
        cx.el(Tag::Button, Part::PageButton)
            .child(label)
            .on(EventKind::Click, Action::Page(target))
            .disabled(disabled)
            .into()
    };

    let mut buttons = vec![
        nav(paginate.first.resolve(&()), PageTarget::First, back_disabled),
        nav(paginate.previous.resolve(&()), PageTarget::Previous, back_disabled),
    ];
    for button in page_buttons(info.current_page, info.page_count, cx.max_buttons) {
        buttons.push(match button {
            PageButton::Page(page) if page == info.current_page => {
                let current = cx
                    .el(Tag::Button, Part::PageButton)
                    .attr("aria-current", "page")
                    .child((page + 1).to_string());
                cx.with_part(current, Part::PageCurrent)
                    .disabled(state.loading)
                    .into()
            }
            PageButton::Page(page) => nav(
                Node::text((page + 1).to_string()),
                PageTarget::Page(page),
                state.loading,
            ),
            PageButton::Ellipsis => cx.el(Tag::Span, Part::Ellipsis).child("…").into(),
        });
    }
    buttons.push(nav(paginate.next.resolve(&()), PageTarget::Next, forward_disabled));
    buttons.push(nav(paginate.last.resolve(&()), PageTarget::Last, forward_disabled));

    cx.el(Tag::Div, Part::Pagination).children(buttons).into()
}
