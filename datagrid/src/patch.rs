//! Partial state updates.
//!
//! A [`StatePatch`] names the fields a transition touches. Each field is a
//! [`Field`]: keep, replace, or derive from the previous value. Nested structs
//! (the search input) carry their own patch and merge recursively.

use serde_json::Value;

use crate::column::Row;
use crate::state::{EngineState, OrderEntry, Search};
use crate::util::{Field, Merge};

/// Partial update of [`Search`].
#[derive(Debug, Default)]
pub struct SearchPatch {
    /// New search text.
    pub value: Field<String>,
    /// New regex flag.
    pub regex: Field<bool>,
}

impl Merge for Search {
    type Patch = SearchPatch;

    fn merge(&self, patch: SearchPatch) -> Self {
        Self {
            value: patch.value.apply(&self.value),
            regex: patch.regex.apply(&self.regex),
        }
    }
}

/// Partial update of [`EngineState`].
///
/// # Example
///
/// ```
/// use datagrid::{EngineState, StatePatch};
/// use datagrid::util::Merge;
///
/// let state = EngineState::new(10);
/// let next = state.merge(StatePatch::new().start_with(|start| start + 10));
/// assert_eq!(next.start, 10);
/// assert_eq!(next.length, 10);
/// ```
#[derive(Debug, Default)]
pub struct StatePatch {
    pub start: Field<usize>,
    pub length: Field<usize>,
    pub search: SearchPatch,
    pub order: Field<Vec<OrderEntry>>,
    pub data: Field<Vec<Row>>,
    pub records_total: Field<Option<usize>>,
    pub records_filtered: Field<Option<usize>>,
    pub loading: Field<bool>,
    pub error: Field<Option<Value>>,
    pub draw: Field<u64>,
}

impl StatePatch {
    /// An empty patch: merging it republishes the current state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, start: usize) -> Self {
        self.start = Field::Set(start);
        self
    }

    /// Derive `start` from its previous value.
    pub fn start_with(mut self, f: impl FnOnce(usize) -> usize + Send + 'static) -> Self {
        self.start = Field::update(move |old: &usize| f(*old));
        self
    }

    pub fn length(mut self, length: usize) -> Self {
        self.length = Field::Set(length);
        self
    }

    pub fn search_value(mut self, value: impl Into<String>) -> Self {
        self.search.value = Field::Set(value.into());
        self
    }

    pub fn search_regex(mut self, regex: bool) -> Self {
        self.search.regex = Field::Set(regex);
        self
    }

    pub fn order(mut self, order: Vec<OrderEntry>) -> Self {
        self.order = Field::Set(order);
        self
    }

    /// Derive the order from its previous value.
    pub fn order_with(
        mut self,
        f: impl FnOnce(&Vec<OrderEntry>) -> Vec<OrderEntry> + Send + 'static,
    ) -> Self {
        self.order = Field::update(f);
        self
    }

    pub fn data(mut self, data: Vec<Row>) -> Self {
        self.data = Field::Set(data);
        self
    }

    pub fn records_total(mut self, total: Option<usize>) -> Self {
        self.records_total = Field::Set(total);
        self
    }

    pub fn records_filtered(mut self, filtered: Option<usize>) -> Self {
        self.records_filtered = Field::Set(filtered);
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = Field::Set(loading);
        self
    }

    pub fn error(mut self, error: Option<Value>) -> Self {
        self.error = Field::Set(error);
        self
    }

    pub fn draw(mut self, draw: u64) -> Self {
        self.draw = Field::Set(draw);
        self
    }
}

impl Merge for EngineState {
    type Patch = StatePatch;

    fn merge(&self, patch: StatePatch) -> Self {
        Self {
            start: patch.start.apply(&self.start),
            length: patch.length.apply(&self.length),
            search: self.search.merge(patch.search),
            order: patch.order.apply(&self.order),
            data: patch.data.apply(&self.data),
            records_total: patch.records_total.apply(&self.records_total),
            records_filtered: patch.records_filtered.apply(&self.records_filtered),
            loading: patch.loading.apply(&self.loading),
            error: patch.error.apply(&self.error),
            draw: patch.draw.apply(&self.draw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Direction;

    #[test]
    fn test_untouched_fields_survive() {
        let mut state = EngineState::new(25);
        state.order = vec![OrderEntry::desc(2)];
        state.search = Search::regex("^a");

        let next = state.merge(StatePatch::new().start(50));
        assert_eq!(next.start, 50);
        assert_eq!(next.length, 25);
        assert_eq!(next.order, vec![OrderEntry::desc(2)]);
        assert_eq!(next.search, Search::regex("^a"));
    }

    #[test]
    fn test_search_merges_recursively() {
        let mut state = EngineState::new(10);
        state.search = Search::regex("old");

        let next = state.merge(StatePatch::new().search_value("new"));
        assert_eq!(next.search.value, "new");
        assert!(next.search.regex);
    }

    #[test]
    fn test_relative_updates_see_previous_value() {
        let mut state = EngineState::new(10);
        state.start = 20;
        state.order = vec![OrderEntry::asc(0)];

        let next = state.merge(
            StatePatch::new()
                .start_with(|start| start.saturating_sub(10))
                .order_with(|order| {
                    let mut order = order.clone();
                    order.push(OrderEntry::asc(3));
                    order
                }),
        );
        assert_eq!(next.start, 10);
        assert_eq!(next.order.len(), 2);
        assert_eq!(next.order[1].direction, Direction::Asc);
    }
}
