//! Class-name resolution for rendered parts.

use std::fmt;
use std::sync::Arc;

/// Semantic parts of the rendered grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Wrapper,
    Toolbar,
    Table,
    Head,
    Body,
    HeaderRow,
    DataRow,
    Even,
    Odd,
    Cell,
    HeaderCell,
    DataCell,
    Sortable,
    SortedAsc,
    SortedDesc,
    SortIcon,
    StatusRow,
    StatusCell,
    Footer,
    Info,
    Pagination,
    PageButton,
    PageCurrent,
    Ellipsis,
    Length,
    Search,
    Processing,
}

impl Part {
    /// Kebab-case name of the part.
    pub fn name(self) -> &'static str {
        match self {
            Self::Wrapper => "wrapper",
            Self::Toolbar => "toolbar",
            Self::Table => "table",
            Self::Head => "head",
            Self::Body => "body",
            Self::HeaderRow => "header-row",
            Self::DataRow => "data-row",
            Self::Even => "even",
            Self::Odd => "odd",
            Self::Cell => "cell",
            Self::HeaderCell => "header-cell",
            Self::DataCell => "data-cell",
            Self::Sortable => "sortable",
            Self::SortedAsc => "sorted-asc",
            Self::SortedDesc => "sorted-desc",
            Self::SortIcon => "sort-icon",
            Self::StatusRow => "status-row",
            Self::StatusCell => "status-cell",
            Self::Footer => "footer",
            Self::Info => "info",
            Self::Pagination => "pagination",
            Self::PageButton => "page-button",
            Self::PageCurrent => "page-current",
            Self::Ellipsis => "ellipsis",
            Self::Length => "length",
            Self::Search => "search",
            Self::Processing => "processing",
        }
    }
}

/// Maps parts to class names.
///
/// Returning `None` leaves the part unstyled.
pub trait Theme: Send + Sync + 'static {
    fn class(&self, part: Part) -> Option<String>;
}

/// A thread-safe reference to a theme.
pub type ThemeRef = Arc<dyn Theme>;

/// Prefixes every part name with `dt-`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTheme;

impl Theme for DefaultTheme {
    fn class(&self, part: Part) -> Option<String> {
        Some(format!("dt-{}", part.name()))
    }
}

impl fmt::Debug for dyn Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Theme")
    }
}
