//! The public grid component.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::GridConfig;
use crate::engine::{Engine, PageInfo};
use crate::handle::{DrawMode, GridHandle};
use crate::repaint::{self, RepaintReceiver};
use crate::state::EngineState;
use crate::view::{
    Action, DEFAULT_MAX_BUTTONS, EventResult, Node, PageTarget, UiEvent, ViewContext, render,
};

/// A data grid: configuration, engine and renderer in one place.
///
/// # Lifecycle
///
/// 1. [`DataGrid::new`] builds the engine and performs no I/O.
/// 2. [`mount`](DataGrid::mount) hands a [`GridHandle`] to the registration
///    hook and starts the first refresh.
/// 3. The embedding application calls [`render`](DataGrid::render) whenever
///    the [`RepaintReceiver`] fires and routes events back through
///    [`dispatch`](DataGrid::dispatch).
/// 4. [`unmount`](DataGrid::unmount), or dropping the grid, unregisters the
///    handle.
///
/// # Example
///
/// ```no_run
/// use datagrid::{ColumnDef, DataGrid, DataSource, GridConfig};
/// use serde_json::json;
///
/// # async fn demo() -> Result<(), datagrid::ConfigError> {
/// let rows = vec![json!(["Tiger Nixon", "Edinburgh"]), json!(["Ashton Cox", "Tokyo"])];
/// let config = GridConfig::builder(
///     DataSource::local(rows),
///     vec![ColumnDef::new("Name"), ColumnDef::new("Office")],
/// )
/// .row_key(|row, _| row[0].to_string())
/// .build()?;
///
/// let mut grid = DataGrid::new(config);
/// let mut repaint = grid.subscribe();
/// grid.mount().await.ok();
/// while repaint.recv().await.is_some() {
///     repaint.drain();
///     let _markup = grid.render();
/// }
/// # Ok(())
/// # }
/// ```
pub struct DataGrid {
    config: GridConfig,
    engine: Engine,
    mounted: bool,
    max_buttons: usize,
}

impl DataGrid {
    pub fn new(config: GridConfig) -> Self {
        let engine = Engine::new(&config);
        Self {
            config,
            engine,
            mounted: false,
            max_buttons: DEFAULT_MAX_BUTTONS,
        }
    }

    /// Cap on the numbered pagination buttons (at least 5).
    pub fn with_max_buttons(mut self, max_buttons: usize) -> Self {
        self.max_buttons = max_buttons.max(5);
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn state(&self) -> Arc<EngineState> {
        self.engine.state()
    }

    pub fn page_info(&self) -> PageInfo {
        self.engine.page_info()
    }

    /// Receive a signal after every published state change.
    ///
    /// Only the most recent subscriber is notified.
    pub fn subscribe(&self) -> RepaintReceiver {
        let (tx, rx) = repaint::channel();
        self.engine.install_repaint(tx);
        rx
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Register the external handle and start the first refresh.
    ///
    /// Mounting twice only refreshes again.
    pub fn mount(&mut self) -> JoinHandle<()> {
        if !self.mounted {
            self.mounted = true;
            self.engine.set_mounted(true);
            if let Some(hook) = &self.config.on_handle {
                hook(Some(self.handle()));
            }
            log::debug!("grid mounted ({} columns)", self.config.columns.len());
        }
        self.engine.draw(DrawMode::FullHold)
    }

    /// Unregister the external handle. Pending debounced refreshes are dropped.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.engine.set_mounted(false);
        if let Some(hook) = &self.config.on_handle {
            hook(None);
        }
        log::debug!("grid unmounted");
    }

    /// A handle that redraws this grid for as long as it is mounted.
    pub fn handle(&self) -> GridHandle {
        GridHandle::new(self.engine.downgrade())
    }

    /// Redraw; see [`DrawMode`].
    pub fn draw(&self, mode: impl Into<DrawMode>) -> JoinHandle<()> {
        self.engine.draw(mode.into())
    }

    /// Markup for the current state.
    pub fn render(&self) -> Node {
        self.render_state(&self.engine.state())
    }

    /// Markup for an arbitrary state snapshot.
    pub fn render_state(&self, state: &EngineState) -> Node {
        let cx = ViewContext {
            columns: &self.config.columns,
            settings: &self.config.settings,
            language: &self.config.language,
            theme: self.config.theme.as_ref(),
            row_key: &self.config.row_key,
            max_buttons: self.max_buttons,
        };
        render(state, &cx)
    }

    /// Run the engine operation behind `action` for `event`.
    ///
    /// Events that do not fit the action, and operations that change
    /// nothing, are ignored.
    pub fn dispatch(&self, action: &Action, event: &UiEvent) -> EventResult {
        let engine = &self.engine;
        let consumed = match (action, event) {
            (Action::Sort(column), UiEvent::Click(modifiers)) => engine
                .sort_column(*column, modifiers.multi_sort())
                .is_some(),
            (Action::Page(target), UiEvent::Click(_)) => match target {
                PageTarget::First => engine.first_page(),
                PageTarget::Previous => engine.previous_page(),
                PageTarget::Next => engine.next_page(),
                PageTarget::Last => engine.last_page(),
                PageTarget::Page(page) => engine.go_to_page(*page),
            }
            .is_some(),
            (Action::SetLength, UiEvent::Change(value)) => match value.trim().parse::<usize>() {
                Ok(length) => engine.set_length(length).is_some(),
                Err(_) => {
                    log::warn!("ignoring page length {value:?}: not a number");
                    false
                }
            },
            (Action::Search, UiEvent::Input(value)) => {
                let regex = engine.state().search.regex;
                engine.search(value.clone(), regex);
                true
            }
            (Action::Wheel, UiEvent::Wheel { delta, mode }) => {
                engine.wheel(*delta, *mode).is_some()
            }
            _ => false,
        };

        if consumed {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}

impl Drop for DataGrid {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl std::fmt::Debug for DataGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataGrid")
            .field("config", &self.config)
            .field("engine", &self.engine)
            .field("mounted", &self.mounted)
            .finish()
    }
}
