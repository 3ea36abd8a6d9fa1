//! A presentation-agnostic data grid.
//!
//! Pages, searches and sorts rows from an in-memory collection or a remote
//! fetch collaborator, and renders the visible page as a markup tree that an
//! embedding application paints with its own backend.

pub mod column;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod handle;
pub mod patch;
pub mod repaint;
pub mod slot;
pub mod source;
pub mod state;
mod store;
pub mod util;
pub mod view;

pub use column::{CellContext, ColumnDef, RenderFn, Row, value_text};
pub use config::{
    ColumnRef, ErrorHook, GridConfig, GridConfigBuilder, HandleHook, OrderSpec, RowKeyFn, Settings,
};
pub use engine::{Engine, PageButton, PageInfo, WheelDeltaMode, page_buttons, process_local};
pub use error::{ConfigError, FetchError, GridError};
pub use grid::DataGrid;
pub use handle::{DrawMode, GridHandle};
pub use patch::{SearchPatch, StatePatch};
pub use repaint::{RepaintReceiver, RepaintSender};
pub use slot::Slot;
pub use source::{
    ColumnDescriptor, DataSource, FetchData, FetchRequest, FetchResponse, OrderRequest,
    RequestLength,
};
pub use state::{Direction, EngineState, OrderEntry, Search};
pub use view::{ControlContext, InfoContext, Language, Node, info_template};

pub mod prelude {
    pub use crate::column::{CellContext, ColumnDef};
    pub use crate::config::{GridConfig, OrderSpec, Settings};
    pub use crate::engine::{PageInfo, WheelDeltaMode};
    pub use crate::error::{FetchError, GridError};
    pub use crate::grid::DataGrid;
    pub use crate::handle::{DrawMode, GridHandle};
    pub use crate::source::{DataSource, FetchData, FetchRequest, FetchResponse};
    pub use crate::state::{Direction, EngineState, OrderEntry, Search};
    pub use crate::view::{Action, EventResult, Modifiers, Node, UiEvent};
}
