//! The paging, search and sort engine.
//!
//! The engine owns the current [`EngineState`] snapshot and turns
//! interactions into state transitions. Each transition is merged and
//! published immediately; the matching refresh (local filtering or a remote
//! fetch) runs on a spawned task. Every refresh takes a new draw number and
//! only the newest draw may write its result back.

mod filter;
mod paging;
mod sort;

pub use filter::filter_rows;
pub use paging::{PageButton, PageInfo, WheelDeltaMode, align_start, page_buttons, wheel_ticks};
pub use sort::{Toggle, compare_values, sort_rows, toggle_order};

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use futures::FutureExt;
use tokio::task::JoinHandle;

use crate::column::{ColumnDef, Row};
use crate::config::{ErrorHook, GridConfig, Settings};
use crate::error::GridError;
use crate::handle::DrawMode;
use crate::patch::StatePatch;
use crate::repaint::RepaintSender;
use crate::source::{ColumnDescriptor, DataSource, FetchRequest, FetchResponse, OrderRequest, RequestLength};
use crate::state::{EngineState, OrderEntry, Search};
use crate::store::StateStore;
use crate::util::{Debouncer, Merge, clamp};

/// Filter and sort `rows` the way a local grid does.
///
/// Also useful on the server side of a remote grid.
pub fn process_local<'r>(
    rows: &'r [Row],
    columns: &[ColumnDef],
    search: &Search,
    order: &[OrderEntry],
) -> Vec<&'r Row> {
    let mut matched = filter_rows(rows, columns, search);
    sort_rows(&mut matched, columns, order);
    matched
}

struct EngineInner {
    columns: Arc<Vec<ColumnDef>>,
    source: DataSource,
    settings: Settings,
    store: StateStore,
    /// Latest issued draw number.
    draw: AtomicU64,
    debouncer: Debouncer,
    on_error: ErrorHook,
    mounted: AtomicBool,
}

/// Shared handle to the engine. Clones refer to the same state.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

/// Non-owning reference to an [`Engine`].
#[derive(Clone, Debug)]
pub(crate) struct WeakEngine(Weak<EngineInner>);

impl WeakEngine {
    pub(crate) fn upgrade(&self) -> Option<Engine> {
        self.0.upgrade().map(|inner| Engine { inner })
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("source", &self.inner.source)
            .field("draw", &self.inner.draw.load(Ordering::SeqCst))
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Build the initial state from `config`. Does not refresh.
    pub fn new(config: &GridConfig) -> Self {
        let settings = config.settings.clone();
        let mut state = EngineState::new(settings.page_length);
        state.search = settings.initial_search.clone();
        state.order = config.order.clone();

        Self {
            inner: Arc::new(EngineInner {
                columns: Arc::clone(&config.columns),
                source: config.source.clone(),
                debouncer: Debouncer::new(settings.search_delay()),
                settings,
                store: StateStore::new(state),
                draw: AtomicU64::new(0),
                on_error: Arc::clone(&config.on_error),
                mounted: AtomicBool::new(false),
            }),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> Arc<EngineState> {
        self.inner.store.get()
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo::from_state(&self.state())
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.inner.columns
    }

    pub fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub fn is_remote(&self) -> bool {
        self.inner.source.is_remote()
    }

    /// Latest issued draw number.
    pub fn latest_draw(&self) -> u64 {
        self.inner.draw.load(Ordering::SeqCst)
    }

    pub(crate) fn downgrade(&self) -> WeakEngine {
        WeakEngine(Arc::downgrade(&self.inner))
    }

    pub(crate) fn is_mounted(&self) -> bool {
        self.inner.mounted.load(Ordering::SeqCst)
    }

    pub(crate) fn set_mounted(&self, mounted: bool) {
        self.inner.mounted.store(mounted, Ordering::SeqCst);
        if !mounted {
            self.inner.debouncer.cancel();
        }
    }

    pub(crate) fn install_repaint(&self, sender: RepaintSender) {
        self.inner.store.install_repaint(sender);
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Merge `patch` into the current state and publish the result.
    ///
    /// The merged state is normalized: `length` is at least one and, with
    /// paging enabled, `start` sits on a page boundary. Without paging
    /// `start` is always 0.
    pub fn merge(&self, patch: StatePatch) -> Arc<EngineState> {
        self.inner
            .store
            .update(|current| self.normalized(current, patch))
    }

    fn normalized(&self, current: &EngineState, patch: StatePatch) -> EngineState {
        let mut next = current.merge(patch);
        next.length = next.length.max(1);
        next.start = if self.inner.settings.paging {
            align_start(next.start, next.length)
        } else {
            0
        };
        next
    }

    /// Merge `patch` and take the next draw number under the same lock, so
    /// draw order always follows the order in which states were published.
    fn issue(&self, patch: StatePatch) -> (Arc<EngineState>, u64) {
        let mut draw = 0;
        let state = self.inner.store.update(|current| {
            draw = self.next_draw();
            self.normalized(current, patch)
        });
        (state, draw)
    }

    /// Take the next draw number for the current snapshot.
    fn issue_current(&self) -> (Arc<EngineState>, u64) {
        self.inner
            .store
            .read(|current| (Arc::clone(current), self.next_draw()))
    }

    fn next_draw(&self) -> u64 {
        self.inner.draw.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Merge `patch` and refresh with the merged state.
    pub fn refresh_state(&self, patch: StatePatch) -> JoinHandle<()> {
        let (state, draw) = self.issue(patch);
        self.spawn_refresh(state, draw)
    }

    /// Merge `patch` now; refresh once the search delay passes without
    /// another debounced call.
    pub fn refresh_state_debounced(&self, patch: StatePatch) {
        self.merge(patch);
        let engine = self.clone();
        self.inner.debouncer.call(move || async move {
            let (state, draw) = engine.issue_current();
            if let Err(err) = engine.run_refresh(&state, draw).await {
                engine.report(&err);
            }
        });
    }

    /// Run a refresh for an already issued draw on a task.
    ///
    /// Errors and panics go to the configured error hook.
    fn spawn_refresh(&self, state: Arc<EngineState>, draw: u64) -> JoinHandle<()> {
        let engine = self.clone();
        tokio::spawn(async move {
            let result = AssertUnwindSafe(engine.run_refresh(&state, draw))
                .catch_unwind()
                .await;
            match result {
                Ok(Ok(())) => {}
                Ok(Err(err)) => engine.report(&err),
                Err(panic) => engine.report(&GridError::RefreshPanicked {
                    message: extract_panic_message(&panic),
                }),
            }
        })
    }

    /// Issue a new draw for `state` and apply its rows unless a newer draw
    /// is issued before they arrive.
    ///
    /// Only `data`, the record counts, `error`, `loading` and `draw` are
    /// written; paging, search and order were already published by the
    /// transition that led here.
    pub async fn refresh_now(&self, state: &EngineState) -> Result<(), GridError> {
        let draw = self.next_draw();
        self.run_refresh(state, draw).await
    }

    async fn run_refresh(&self, state: &EngineState, my_draw: u64) -> Result<(), GridError> {
        match &self.inner.source {
            DataSource::Local(rows) => {
                let matched = process_local(rows, &self.inner.columns, &state.search, &state.order);
                let filtered = matched.len();
                let data: Vec<Row> = if self.inner.settings.paging {
                    matched
                        .into_iter()
                        .skip(state.start)
                        .take(state.length)
                        .cloned()
                        .collect()
                } else {
                    matched.into_iter().cloned().collect()
                };

                let total = rows.len();
                let applied = self.inner.store.update_if(|current| {
                    if self.is_stale(my_draw, my_draw) {
                        return None;
                    }
                    log::debug!(
                        "draw {my_draw}: local {} of {filtered} filtered / {total} total",
                        data.len()
                    );
                    Some(
                        current.merge(
                            StatePatch::new()
                                .data(data)
                                .records_total(Some(total))
                                .records_filtered(Some(filtered))
                                .error(None)
                                .loading(false)
                                .draw(my_draw),
                        ),
                    )
                });
                if !applied {
                    log::debug!("draw {my_draw}: superseded before apply");
                }
                Ok(())
            }
            DataSource::Remote(fetcher) => {
                // A newer draw may already have finished; leave its state alone.
                self.inner.store.update_if(|current| {
                    (!self.is_stale(my_draw, my_draw))
                        .then(|| current.merge(StatePatch::new().loading(true)))
                });

                let request = self.request_for(state, my_draw);
                log::debug!(
                    "draw {my_draw}: fetching start={} length={:?} search={:?}",
                    request.start,
                    request.length,
                    request.search.value
                );

                let response = match fetcher.fetch(request).await {
                    Ok(response) => response,
                    Err(err) => {
                        log::error!("draw {my_draw}: fetch failed: {err}");
                        return Err(err.into());
                    }
                };

                if !self.apply_response(my_draw, response) {
                    log::debug!(
                        "draw {my_draw}: discarding stale response (latest {})",
                        self.latest_draw()
                    );
                }
                Ok(())
            }
        }
    }

    /// Draws are only issued while the store lock is held, so this is
    /// reliable when called from inside a store update.
    fn is_stale(&self, my_draw: u64, response_draw: u64) -> bool {
        let latest = self.latest_draw();
        my_draw < latest || response_draw < latest
    }

    fn apply_response(&self, my_draw: u64, response: FetchResponse) -> bool {
        let paging = self.inner.settings.paging;
        let response_draw = response.draw;
        let FetchResponse {
            records_total,
            records_filtered,
            mut data,
            error,
            ..
        } = response;

        let records_filtered = match (records_filtered, records_total) {
            (Some(filtered), Some(total)) => Some(filtered.min(total)),
            (filtered, _) => filtered,
        };

        self.inner.store.update_if(|current| {
            if self.is_stale(my_draw, response_draw) {
                return None;
            }
            if paging {
                data.truncate(current.length);
            }
            log::debug!("draw {my_draw}: applying {} rows", data.len());
            Some(
                current.merge(
                    StatePatch::new()
                        .data(data)
                        .records_total(records_total)
                        .records_filtered(records_filtered)
                        .error(error)
                        .loading(false)
                        .draw(my_draw),
                ),
            )
        })
    }

    /// The request a remote source receives for `state`.
    pub fn request_for(&self, state: &EngineState, draw: u64) -> FetchRequest {
        let columns = &self.inner.columns;
        FetchRequest {
            draw,
            start: state.start,
            length: if self.inner.settings.paging {
                RequestLength::Bounded(state.length)
            } else {
                RequestLength::All
            },
            search: state.search.clone(),
            order: state
                .order
                .iter()
                .filter(|entry| entry.column < columns.len())
                .map(|entry| OrderRequest {
                    column: entry.column,
                    direction: entry.direction,
                })
                .collect(),
            columns: columns.iter().map(ColumnDescriptor::from).collect(),
        }
    }

    fn report(&self, err: &GridError) {
        (self.inner.on_error)(err);
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Toggle sorting on `column`.
    ///
    /// Returns `None` when the column is out of range or not orderable.
    /// `multi` is ignored unless multi-sort is enabled.
    pub fn sort_column(&self, column: usize, multi: bool) -> Option<JoinHandle<()>> {
        let orderable = self
            .inner
            .columns
            .get(column)
            .is_some_and(ColumnDef::is_orderable);
        if !orderable {
            return None;
        }

        let multi = multi && self.inner.settings.multi_sort;
        let toggle = toggle_order(&self.state().order, column, multi);
        let mut patch = StatePatch::new().order(toggle.order);
        if toggle.reset_start {
            patch = patch.start(0);
        }
        Some(self.refresh_state(patch))
    }

    /// Jump to the zero-based `page`, clamped to the known pages.
    ///
    /// Returns `None` when that is the current page or paging is disabled.
    pub fn go_to_page(&self, page: usize) -> Option<JoinHandle<()>> {
        if !self.inner.settings.paging {
            return None;
        }
        let info = self.page_info();
        let target = clamp(page, 0, info.page_count.saturating_sub(1));
        if target == info.current_page {
            return None;
        }
        Some(self.refresh_state(StatePatch::new().start(target * info.length)))
    }

    pub fn first_page(&self) -> Option<JoinHandle<()>> {
        self.go_to_page(0)
    }

    pub fn previous_page(&self) -> Option<JoinHandle<()>> {
        let info = self.page_info();
        if !self.inner.settings.paging || !info.has_previous() {
            return None;
        }
        let length = info.length;
        Some(self.refresh_state(
            StatePatch::new().start_with(move |start| start.saturating_sub(length)),
        ))
    }

    pub fn next_page(&self) -> Option<JoinHandle<()>> {
        let info = self.page_info();
        if !self.inner.settings.paging || !info.has_next() {
            return None;
        }
        let length = info.length;
        Some(self.refresh_state(StatePatch::new().start_with(move |start| start + length)))
    }

    pub fn last_page(&self) -> Option<JoinHandle<()>> {
        let info = self.page_info();
        if info.page_count == 0 {
            return None;
        }
        self.go_to_page(info.page_count - 1)
    }

    /// Change the page length to one of the menu values.
    ///
    /// The first visible row keeps its page: `start` is realigned to the new
    /// length.
    pub fn set_length(&self, length: usize) -> Option<JoinHandle<()>> {
        if !self.inner.settings.length_menu.contains(&length) {
            log::warn!("ignoring page length {length}: not in the length menu");
            return None;
        }
        if self.state().length == length {
            return None;
        }
        Some(self.refresh_state(
            StatePatch::new()
                .length(length)
                .start_with(move |start| align_start(start, length)),
        ))
    }

    /// Update the search and refresh after the search delay.
    ///
    /// Paging resets to the first page right away.
    pub fn search(&self, value: impl Into<String>, regex: bool) {
        let value = value.into();
        let current = self.state();
        if current.search.value == value && current.search.regex == regex {
            return;
        }
        self.refresh_state_debounced(
            StatePatch::new()
                .search_value(value)
                .search_regex(regex)
                .start(0),
        );
    }

    /// Page with the mouse wheel. Deltas under one tick are ignored.
    pub fn wheel(&self, delta: f64, mode: WheelDeltaMode) -> Option<JoinHandle<()>> {
        let ticks = wheel_ticks(delta, mode);
        if ticks >= 1.0 {
            self.next_page()
        } else if ticks <= -1.0 {
            self.previous_page()
        } else {
            None
        }
    }

    /// Caller-triggered redraw.
    pub fn draw(&self, mode: DrawMode) -> JoinHandle<()> {
        match mode {
            DrawMode::FullReset => {
                self.inner.debouncer.cancel();
                self.refresh_state(StatePatch::new().start(0).search_value(""))
            }
            DrawMode::FullHold | DrawMode::Page => self.refresh_state(StatePatch::new()),
        }
    }
}

fn extract_panic_message(panic: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
