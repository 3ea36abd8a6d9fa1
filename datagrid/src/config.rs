//! Grid configuration and its normalization.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::column::{ColumnDef, Row};
use crate::error::{ConfigError, GridError};
use crate::handle::GridHandle;
use crate::source::DataSource;
use crate::state::{Direction, OrderEntry, Search};
use crate::view::{DefaultTheme, Language, ThemeRef};

/// Derives a stable key for a row. Receives the row and its position in the
/// visible page.
pub type RowKeyFn = Arc<dyn Fn(&Row, usize) -> String + Send + Sync>;

/// Receives errors from refreshes the engine spawned itself.
pub type ErrorHook = Arc<dyn Fn(&GridError) + Send + Sync>;

/// Receives the external handle on mount and `None` on unmount.
pub type HandleHook = Arc<dyn Fn(Option<GridHandle>) + Send + Sync>;

fn default_page_length() -> usize {
    10
}

fn default_length_menu() -> Vec<usize> {
    vec![10, 25, 50, 100]
}

fn default_search_delay_ms() -> u64 {
    400
}

fn default_true() -> bool {
    true
}

/// Plain-data settings, loadable from JSON.
///
/// ```
/// use datagrid::Settings;
///
/// let settings = Settings::from_json(r#"{ "page_length": 25 }"#).unwrap();
/// assert_eq!(settings.page_length, 25);
/// assert_eq!(settings.search_delay_ms, 400);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Initial page size.
    #[serde(default = "default_page_length")]
    pub page_length: usize,

    /// Page sizes the user may pick from.
    #[serde(default = "default_length_menu")]
    pub length_menu: Vec<usize>,

    /// Quiet period before a search refresh fires.
    #[serde(default = "default_search_delay_ms")]
    pub search_delay_ms: u64,

    /// When false every row is shown on a single page.
    #[serde(default = "default_true")]
    pub paging: bool,

    /// Whether modifier clicks may add secondary sort columns.
    #[serde(default = "default_true")]
    pub multi_sort: bool,

    #[serde(default)]
    pub initial_search: Search,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_length: default_page_length(),
            length_menu: default_length_menu(),
            search_delay_ms: default_search_delay_ms(),
            paging: true,
            multi_sort: true,
            initial_search: Search::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }
}

/// A column referenced by position or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    Index(usize),
    Name(String),
}

impl From<usize> for ColumnRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// An initial sort key before column names are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    pub column: ColumnRef,
    pub direction: Direction,
}

impl OrderSpec {
    pub fn asc(column: impl Into<ColumnRef>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(column: impl Into<ColumnRef>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Desc,
        }
    }
}

/// Normalized grid configuration.
///
/// Built through [`GridConfig::builder`]; every optional field has a default
/// and the initial order is resolved to column indices.
#[derive(Clone)]
pub struct GridConfig {
    pub(crate) source: DataSource,
    pub(crate) columns: Arc<Vec<ColumnDef>>,
    pub(crate) settings: Settings,
    pub(crate) language: Language,
    pub(crate) theme: ThemeRef,
    pub(crate) row_key: RowKeyFn,
    pub(crate) order: Vec<OrderEntry>,
    pub(crate) on_error: ErrorHook,
    pub(crate) on_handle: Option<HandleHook>,
}

impl GridConfig {
    pub fn builder(source: DataSource, columns: Vec<ColumnDef>) -> GridConfigBuilder {
        GridConfigBuilder {
            source,
            columns,
            settings: Settings::default(),
            language: Language::default(),
            theme: Arc::new(DefaultTheme),
            row_key: None,
            order: Vec::new(),
            on_error: None,
            on_handle: None,
        }
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Initial order with column indices resolved.
    pub fn order(&self) -> &[OrderEntry] {
        &self.order
    }

    pub fn is_remote(&self) -> bool {
        self.source.is_remote()
    }
}

impl fmt::Debug for GridConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridConfig")
            .field("source", &self.source)
            .field("columns", &self.columns.len())
            .field("settings", &self.settings)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

/// Builder for [`GridConfig`].
pub struct GridConfigBuilder {
    source: DataSource,
    columns: Vec<ColumnDef>,
    settings: Settings,
    language: Language,
    theme: ThemeRef,
    row_key: Option<RowKeyFn>,
    order: Vec<OrderSpec>,
    on_error: Option<ErrorHook>,
    on_handle: Option<HandleHook>,
}

impl GridConfigBuilder {
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn page_length(mut self, length: usize) -> Self {
        self.settings.page_length = length;
        self
    }

    pub fn length_menu(mut self, menu: Vec<usize>) -> Self {
        self.settings.length_menu = menu;
        self
    }

    pub fn search_delay(mut self, delay: Duration) -> Self {
        self.settings.search_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn paging(mut self, paging: bool) -> Self {
        self.settings.paging = paging;
        self
    }

    pub fn multi_sort(mut self, multi_sort: bool) -> Self {
        self.settings.multi_sort = multi_sort;
        self
    }

    pub fn initial_search(mut self, search: Search) -> Self {
        self.settings.initial_search = search;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn theme(mut self, theme: ThemeRef) -> Self {
        self.theme = theme;
        self
    }

    /// Required: how to key rows.
    pub fn row_key(mut self, f: impl Fn(&Row, usize) -> String + Send + Sync + 'static) -> Self {
        self.row_key = Some(Arc::new(f));
        self
    }

    /// Append an initial sort key.
    pub fn order(mut self, spec: OrderSpec) -> Self {
        self.order.push(spec);
        self
    }

    pub fn on_error(mut self, f: impl Fn(&GridError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(f));
        self
    }

    /// Called with the external handle on mount and with `None` on unmount.
    pub fn on_handle(mut self, f: impl Fn(Option<GridHandle>) + Send + Sync + 'static) -> Self {
        self.on_handle = Some(Arc::new(f));
        self
    }

    /// Validate and normalize.
    pub fn build(self) -> Result<GridConfig, ConfigError> {
        let row_key = self.row_key.ok_or(ConfigError::MissingRowKey)?;

        let mut settings = self.settings;
        if settings.length_menu.is_empty() {
            return Err(ConfigError::EmptyLengthMenu);
        }
        if settings.page_length == 0 || settings.length_menu.contains(&0) {
            return Err(ConfigError::ZeroLength);
        }
        if !settings.length_menu.contains(&settings.page_length) {
            settings.length_menu.push(settings.page_length);
            settings.length_menu.sort_unstable();
        }
        settings.length_menu.dedup();

        let order = resolve_order(&self.order, &self.columns)?;

        let on_error = self.on_error.unwrap_or_else(|| {
            Arc::new(|err: &GridError| log::error!("grid refresh failed: {err}"))
        });

        Ok(GridConfig {
            source: self.source,
            columns: Arc::new(self.columns),
            settings,
            language: self.language,
            theme: self.theme,
            row_key,
            order,
            on_error,
            on_handle: self.on_handle,
        })
    }
}

/// Map name references to indices. Later duplicates of a column are dropped.
fn resolve_order(specs: &[OrderSpec], columns: &[ColumnDef]) -> Result<Vec<OrderEntry>, ConfigError> {
    let mut order: Vec<OrderEntry> = Vec::with_capacity(specs.len());
    for spec in specs {
        let column = match &spec.column {
            ColumnRef::Index(index) if *index < columns.len() => *index,
            ColumnRef::Index(index) => {
                return Err(ConfigError::ColumnOutOfRange {
                    index: *index,
                    count: columns.len(),
                });
            }
            ColumnRef::Name(name) => columns
                .iter()
                .position(|col| col.name() == Some(name.as_str()))
                .ok_or_else(|| ConfigError::UnknownColumn(name.clone()))?,
        };
        if order.iter().all(|entry| entry.column != column) {
            order.push(OrderEntry {
                column,
                direction: spec.direction,
            });
        }
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("Name").named("name"),
            ColumnDef::new("Age").named("age"),
        ]
    }

    #[test]
    fn test_resolve_order_by_name_and_index() {
        let order = resolve_order(&[OrderSpec::desc("age"), OrderSpec::asc(0usize)], &columns())
            .unwrap();
        assert_eq!(order, vec![OrderEntry::desc(1), OrderEntry::asc(0)]);
    }

    #[test]
    fn test_resolve_order_rejects_unknown() {
        assert!(matches!(
            resolve_order(&[OrderSpec::asc("salary")], &columns()),
            Err(ConfigError::UnknownColumn(name)) if name == "salary"
        ));
        assert!(matches!(
            resolve_order(&[OrderSpec::asc(7usize)], &columns()),
            Err(ConfigError::ColumnOutOfRange { index: 7, count: 2 })
        ));
    }

    #[test]
    fn test_resolve_order_drops_duplicates() {
        let order = resolve_order(&[OrderSpec::asc("name"), OrderSpec::desc(0usize)], &columns())
            .unwrap();
        assert_eq!(order, vec![OrderEntry::asc(0)]);
    }

    #[test]
    fn test_settings_defaults_from_empty_json() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }
}
