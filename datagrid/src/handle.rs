//! The external redraw handle.

use crate::engine::WeakEngine;

/// How a caller-triggered redraw treats the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Back to the first page with the search cleared.
    #[default]
    FullReset,
    /// Re-run the refresh with paging, search and order unchanged.
    FullHold,
    /// Same as [`FullHold`](DrawMode::FullHold).
    Page,
}

impl From<bool> for DrawMode {
    fn from(reset: bool) -> Self {
        if reset { Self::FullReset } else { Self::FullHold }
    }
}

/// Lets the embedding application trigger redraws.
///
/// Holds only a weak reference; once the grid is unmounted or dropped,
/// [`draw`](GridHandle::draw) does nothing.
#[derive(Debug, Clone)]
pub struct GridHandle {
    engine: WeakEngine,
}

impl GridHandle {
    pub(crate) fn new(engine: WeakEngine) -> Self {
        Self { engine }
    }

    /// Redraw the grid. Returns `false` if the grid is gone.
    pub fn draw(&self, mode: impl Into<DrawMode>) -> bool {
        match self.engine.upgrade() {
            Some(engine) if engine.is_mounted() => {
                engine.draw(mode.into());
                true
            }
            _ => false,
        }
    }
}
