mod common;

use common::{builder, job_columns, jobs, local_grid, numbered, numbered_columns};
use datagrid::view::{Action, Element, EventKind, Modifiers, PageTarget, UiEvent};
use datagrid::{
    ColumnDef, DataGrid, DataSource, EngineState, Language, Node, OrderEntry, Search, Slot,
    info_template,
};

fn with_class<'a>(node: &'a Node, class: &str) -> Vec<&'a Element> {
    node.find_all(&|el| el.has_class(class))
}

fn page_state(start: usize, shown: usize, filtered: usize, total: usize) -> EngineState {
    let mut state = EngineState::new(10);
    state.start = start;
    state.data = common::page_rows(start, shown, "row");
    state.records_filtered = Some(filtered);
    state.records_total = Some(total);
    state.loading = false;
    state
}

#[test]
fn test_header_sort_affordances() {
    let columns = vec![
        ColumnDef::new("Name"),
        ColumnDef::new("Position"),
        ColumnDef::new("Extn.").orderable(false),
    ];
    let grid = local_grid(jobs(), columns);
    let mut state = EngineState::new(10);
    state.order = vec![OrderEntry::desc(1)];

    let markup = grid.render_state(&state);
    let headers = with_class(&markup, "dt-header-cell");
    assert_eq!(headers.len(), 3);

    assert_eq!(headers[0].attrs["aria-sort"], "none");
    assert!(headers[0].has_class("dt-sortable"));
    assert_eq!(headers[0].action(EventKind::Click), Some(&Action::Sort(0)));

    assert_eq!(headers[1].attrs["aria-sort"], "descending");
    assert!(headers[1].has_class("dt-sorted-desc"));
    assert!(Node::from(headers[1].clone()).text_content().contains('▼'));

    assert!(!headers[2].has_class("dt-sortable"));
    assert!(headers[2].bindings.is_empty());
}

#[test]
fn test_rows_alternate_and_carry_keys() {
    let grid = local_grid(numbered(3), numbered_columns());
    let state = page_state(0, 3, 3, 3);

    let markup = grid.render_state(&state);
    let rows = with_class(&markup, "dt-data-row");
    assert_eq!(rows.len(), 3);
    assert!(rows[0].has_class("dt-even"));
    assert!(rows[1].has_class("dt-odd"));
    assert!(rows[2].has_class("dt-even"));
    assert_eq!(rows[2].key.as_deref(), Some("2"));

    let cells = with_class(&markup, "dt-data-cell");
    assert_eq!(Node::from(cells[1].clone()).text_content(), "row 0");
}

#[test]
fn test_render_override_sees_raw_value() {
    let columns = vec![
        ColumnDef::new("Id").data("id"),
        ColumnDef::new("Name")
            .data("name")
            .class_name("name-col")
            .render(|cx| format!("<{}>", cx.raw_value.and_then(|v| v.as_str()).unwrap_or("")).into()),
    ];
    let grid = local_grid(numbered(1), columns);
    let markup = grid.render_state(&page_state(0, 1, 1, 1));

    let cell = markup.find(&|el| el.has_class("name-col")).unwrap();
    assert_eq!(Node::from(cell.clone()).text_content(), "<row 0>");
}

#[test]
fn test_status_rows() {
    let grid = local_grid(jobs(), job_columns());

    let loading = EngineState::new(10);
    let markup = grid.render_state(&loading);
    let status = markup.find(&|el| el.has_class("dt-status-cell")).unwrap();
    assert_eq!(Node::from(status.clone()).text_content(), "Loading...");
    assert_eq!(status.attrs["colspan"], "4");
    assert!(markup.find(&|el| el.has_class("dt-processing")).is_some());

    let empty = page_state(0, 0, 0, 0);
    let text = grid.render_state(&empty).text_content();
    assert!(text.contains("No data available in table"));
    assert!(!text.contains("Processing..."));

    let filtered_out = page_state(0, 0, 0, 7);
    let text = grid.render_state(&filtered_out).text_content();
    assert!(text.contains("No matching records found"));
}

#[test]
fn test_info_text() {
    let grid = local_grid(numbered(57), numbered_columns());

    let markup = grid.render_state(&page_state(10, 10, 57, 57));
    let info = markup.find(&|el| el.has_class("dt-info")).unwrap();
    assert_eq!(
        Node::from(info.clone()).text_content(),
        "Showing 11 to 20 of 57 entries"
    );

    let markup = grid.render_state(&page_state(0, 3, 3, 57));
    let info = markup.find(&|el| el.has_class("dt-info")).unwrap();
    assert_eq!(
        Node::from(info.clone()).text_content(),
        "Showing 1 to 3 of 3 entries (filtered from 57 total entries)"
    );

    let markup = grid.render_state(&page_state(0, 0, 0, 0));
    let info = markup.find(&|el| el.has_class("dt-info")).unwrap();
    assert_eq!(
        Node::from(info.clone()).text_content(),
        "Showing 0 to 0 of 0 entries"
    );
}

#[test]
fn test_pagination_affordances() {
    let grid = local_grid(numbered(57), numbered_columns());

    let first = grid.render_state(&page_state(0, 10, 57, 57));
    let buttons = with_class(&first, "dt-page-button");
    // First, Previous, 1..6, Next, Last
    assert_eq!(buttons.len(), 10);
    assert!(buttons[0].disabled && buttons[1].disabled);
    assert!(buttons[2].has_class("dt-page-current"));
    assert_eq!(
        buttons[3].action(EventKind::Click),
        Some(&Action::Page(PageTarget::Page(1)))
    );
    assert!(!buttons[8].disabled);
    assert_eq!(
        buttons[9].action(EventKind::Click),
        Some(&Action::Page(PageTarget::Last))
    );

    let last = grid.render_state(&page_state(50, 7, 57, 57));
    let buttons = with_class(&last, "dt-page-button");
    assert!(!buttons[0].disabled);
    assert!(buttons[8].disabled && buttons[9].disabled);
    assert!(buttons[8].bindings.is_empty());

    let mut loading = page_state(20, 10, 57, 57);
    loading.loading = true;
    let busy = grid.render_state(&loading);
    assert!(with_class(&busy, "dt-page-button").iter().all(|b| b.disabled));
}

#[test]
fn test_pagination_ellipsis() {
    let grid = local_grid(numbered(200), numbered_columns());
    let markup = grid.render_state(&page_state(100, 10, 200, 200));
    assert_eq!(with_class(&markup, "dt-ellipsis").len(), 2);
}

#[test]
fn test_toolbar_controls() {
    let grid = local_grid(numbered(5), numbered_columns());
    let mut state = page_state(0, 5, 5, 5);
    state.search = Search::text("row");
    state.length = 25;

    let markup = grid.render_state(&state);
    let select = markup.find(&|el| el.tag == datagrid::view::Tag::Select).unwrap();
    assert_eq!(select.action(EventKind::Change), Some(&Action::SetLength));
    assert_eq!(select.children.len(), 4);
    let selected = Node::from(select.clone());
    let selected = selected
        .find(&|el| el.attrs.contains_key("selected"))
        .unwrap();
    assert_eq!(selected.attrs["value"], "25");

    let input = markup.find(&|el| el.tag == datagrid::view::Tag::Input).unwrap();
    assert_eq!(input.attrs["value"], "row");
    assert_eq!(input.action(EventKind::Input), Some(&Action::Search));

    let length = markup.find(&|el| el.has_class("dt-length")).unwrap();
    let text = Node::from(length.clone()).text_content();
    assert!(text.starts_with("Show "));
    assert!(text.ends_with(" entries"));
}

#[test]
fn test_custom_language_slots() {
    let language = Language {
        zero_records: Slot::dynamic(|_: &()| "nothing here".into()),
        info: info_template("{start}-{end} / {total}"),
        ..Language::default()
    };
    let config = builder(DataSource::local(numbered(20)), numbered_columns())
        .language(language)
        .build()
        .unwrap();
    let grid = DataGrid::new(config);

    let text = grid.render_state(&page_state(0, 0, 0, 20)).text_content();
    assert!(text.contains("nothing here"));
    let text = grid.render_state(&page_state(10, 10, 20, 20)).text_content();
    assert!(text.contains("11-20 / 20"));
}

#[tokio::test]
async fn test_dispatch_routes_bindings() {
    let mut grid = local_grid(numbered(30), numbered_columns());
    grid.mount().await.unwrap();

    let markup = grid.render();
    let header = markup.find(&|el| el.has_class("dt-header-cell")).unwrap();
    let action = header.action(EventKind::Click).unwrap().clone();

    let result = grid.dispatch(&action, &UiEvent::Click(Modifiers::NONE));
    assert!(result.is_consumed());
    assert_eq!(grid.state().order, vec![OrderEntry::asc(0)]);

    let result = grid.dispatch(&action, &UiEvent::Click(Modifiers::SHIFT));
    assert!(result.is_consumed());
    assert_eq!(grid.state().order, vec![OrderEntry::desc(0)]);

    let next = Action::Page(PageTarget::Next);
    assert!(grid.dispatch(&next, &UiEvent::Click(Modifiers::NONE)).is_consumed());
    assert_eq!(grid.state().start, 10);

    assert!(!grid.dispatch(&next, &UiEvent::Input("x".into())).is_consumed());
    assert!(!grid.dispatch(&Action::SetLength, &UiEvent::Change("abc".into())).is_consumed());
    assert!(grid.dispatch(&Action::SetLength, &UiEvent::Change("25".into())).is_consumed());
    assert_eq!(grid.state().length, 25);
    assert_eq!(grid.state().start, 0);
}
