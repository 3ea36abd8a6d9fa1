//! Column definitions and cell value resolution.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::slot::Slot;
use crate::state::{EngineState, Search};
use crate::util::{DataPath, get_value};
use crate::view::Node;

/// A row of data. Opaque to the engine beyond path and positional lookup.
pub type Row = Value;

/// Cell render override.
pub type RenderFn = Arc<dyn Fn(&CellContext<'_>) -> Node + Send + Sync>;

/// Everything a render override gets to see.
#[derive(Debug, Clone, Copy)]
pub struct CellContext<'a> {
    /// The resolved cell value, if the row has one.
    pub raw_value: Option<&'a Value>,
    pub row: &'a Row,
    /// Position of the row within the visible page.
    pub row_index: usize,
    pub column_index: usize,
    pub state: &'a EngineState,
}

/// A column definition.
///
/// Columns define how a value is found in a row, the header, and whether the
/// column takes part in sorting and searching.
///
/// # Examples
///
/// ```
/// use datagrid::ColumnDef;
///
/// let columns = vec![
///     ColumnDef::new("Name").data("name").named("name"),
///     ColumnDef::new("Office").data("office.city"),
///     ColumnDef::new("Extn.").orderable(false),
/// ];
/// assert!(!columns[2].is_orderable());
/// ```
#[derive(Clone)]
pub struct ColumnDef {
    data_path: Option<DataPath>,
    name: Option<String>,
    title: Slot<()>,
    orderable: bool,
    searchable: bool,
    class_name: Option<String>,
    width: Option<String>,
    min_width: Option<String>,
    max_width: Option<String>,
    search: Option<Search>,
    render: Option<RenderFn>,
}

impl ColumnDef {
    /// Create a column with a header title.
    ///
    /// Without a data path the column reads the row position matching its
    /// own index (array rows).
    pub fn new(title: impl Into<Slot<()>>) -> Self {
        Self {
            data_path: None,
            name: None,
            title: title.into(),
            orderable: true,
            searchable: true,
            class_name: None,
            width: None,
            min_width: None,
            max_width: None,
            search: None,
            render: None,
        }
    }

    /// Read the cell value from `path` (`"office.city"`, `"tags[0]"`).
    pub fn data(mut self, path: impl Into<DataPath>) -> Self {
        self.data_path = Some(path.into());
        self
    }

    /// Stable identity, used to reference the column by name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Produce the header on every render.
    pub fn title_with(mut self, f: impl Fn() -> Node + Send + Sync + 'static) -> Self {
        self.title = Slot::dynamic(move |_: &()| f());
        self
    }

    pub fn orderable(mut self, orderable: bool) -> Self {
        self.orderable = orderable;
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn min_width(mut self, width: impl Into<String>) -> Self {
        self.min_width = Some(width.into());
        self
    }

    pub fn max_width(mut self, width: impl Into<String>) -> Self {
        self.max_width = Some(width.into());
        self
    }

    /// Per-column search forwarded to remote sources.
    pub fn search(mut self, search: Search) -> Self {
        self.search = Some(search);
        self
    }

    /// Override how cells of this column render.
    pub fn render(mut self, f: impl Fn(&CellContext<'_>) -> Node + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }

    pub fn data_path(&self) -> Option<&DataPath> {
        self.data_path.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn title(&self) -> Node {
        self.title.resolve(&())
    }

    pub fn is_orderable(&self) -> bool {
        self.orderable
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn get_class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn column_search(&self) -> Option<&Search> {
        self.search.as_ref()
    }

    pub fn renderer(&self) -> Option<&RenderFn> {
        self.render.as_ref()
    }

    /// Inline style declaration for the width constraints, if any.
    pub fn style(&self) -> Option<String> {
        let parts: Vec<String> = [
            ("width", &self.width),
            ("min-width", &self.min_width),
            ("max-width", &self.max_width),
        ]
        .into_iter()
        .filter_map(|(prop, value)| value.as_ref().map(|v| format!("{prop}: {v}")))
        .collect();
        (!parts.is_empty()).then(|| parts.join("; "))
    }

    /// Resolve this column's value in `row`.
    ///
    /// Uses the data path when set, otherwise the element at `column_index`
    /// of an array row.
    pub fn resolve<'r>(&self, row: &'r Row, column_index: usize) -> Option<&'r Value> {
        match &self.data_path {
            Some(path) => get_value(row, path),
            None => match row {
                Value::Array(items) => items.get(column_index),
                _ => None,
            },
        }
    }

    /// Text used for searching: the resolved value coerced to a string.
    ///
    /// Render overrides are ignored.
    pub fn display_text(&self, row: &Row, column_index: usize) -> String {
        self.resolve(row, column_index)
            .map(value_text)
            .unwrap_or_default()
    }
}

impl fmt::Debug for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("data_path", &self.data_path)
            .field("name", &self.name)
            .field("title", &self.title)
            .field("orderable", &self.orderable)
            .field("searchable", &self.searchable)
            .field("class_name", &self.class_name)
            .field("search", &self.search)
            .field("render", &self.render.is_some())
            .finish_non_exhaustive()
    }
}

/// Coerce a JSON value to display text.
///
/// Strings are taken verbatim, `null` becomes empty, numbers and booleans use
/// their literal spelling, and arrays/objects are serialized.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
