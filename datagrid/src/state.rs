//! Engine state snapshot and its building blocks.

use serde::{Deserialize, Serialize};

use crate::column::Row;

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// The opposite direction.
    pub fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Value for the `aria-sort` attribute.
    pub fn aria(self) -> &'static str {
        match self {
            Self::Asc => "ascending",
            Self::Desc => "descending",
        }
    }
}

/// One sort key: a column index and its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderEntry {
    /// Index into the column definitions.
    pub column: usize,
    /// Sort direction.
    pub direction: Direction,
}

impl OrderEntry {
    /// Ascending sort on `column`.
    pub fn asc(column: usize) -> Self {
        Self {
            column,
            direction: Direction::Asc,
        }
    }

    /// Descending sort on `column`.
    pub fn desc(column: usize) -> Self {
        Self {
            column,
            direction: Direction::Desc,
        }
    }
}

/// Global search input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Search {
    /// The search text.
    pub value: String,
    /// Whether `value` is a regular expression.
    pub regex: bool,
}

impl Search {
    /// Plain-text search.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            regex: false,
        }
    }

    /// Regular expression search.
    pub fn regex(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            regex: true,
        }
    }

    /// Returns `true` when the search text is blank.
    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Snapshot of what the grid is currently showing.
///
/// Snapshots are never mutated in place; every transition publishes a new
/// one (see [`StatePatch`](crate::StatePatch)).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    /// Offset of the first visible row within the filtered set.
    pub start: usize,
    /// Page size.
    pub length: usize,
    /// Global search.
    pub search: Search,
    /// Active sort keys, most significant first.
    pub order: Vec<OrderEntry>,
    /// Rows of the visible page.
    pub data: Vec<Row>,
    /// Rows before filtering, if known.
    pub records_total: Option<usize>,
    /// Rows after filtering and before paging, if known.
    pub records_filtered: Option<usize>,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Error payload from the last fetch response, passed through untouched.
    pub error: Option<serde_json::Value>,
    /// Draw counter of the refresh that produced `data` (0 before the first one).
    pub draw: u64,
}

impl EngineState {
    /// Initial state for the given page length.
    pub fn new(length: usize) -> Self {
        Self {
            start: 0,
            length: length.max(1),
            search: Search::default(),
            order: Vec::new(),
            data: Vec::new(),
            records_total: None,
            records_filtered: None,
            loading: true,
            error: None,
            draw: 0,
        }
    }

    /// Zero-based index of the visible page.
    pub fn current_page(&self) -> usize {
        self.start / self.length.max(1)
    }

    /// Number of pages in the filtered set (0 while unknown).
    pub fn page_count(&self) -> usize {
        self.records_filtered
            .map_or(0, |filtered| filtered.div_ceil(self.length.max(1)))
    }

    /// Sort direction of `column`, if it takes part in the order.
    pub fn direction_of(&self, column: usize) -> Option<Direction> {
        self.order
            .iter()
            .find(|entry| entry.column == column)
            .map(|entry| entry.direction)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new(10)
    }
}
