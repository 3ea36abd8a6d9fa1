//! Interaction events and the actions they trigger.

use crate::engine::WheelDeltaMode;

/// Kinds of events an element can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    /// Text typed into an input.
    Input,
    /// Selection changed.
    Change,
    Wheel,
}

/// Where a pagination button leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    First,
    Previous,
    Next,
    Last,
    /// Zero-based page index.
    Page(usize),
}

/// Engine operation bound to an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Toggle sorting on a column.
    Sort(usize),
    Page(PageTarget),
    /// Take the page length from the change event's value.
    SetLength,
    /// Take the search text from the input event's value.
    Search,
    /// Page with the wheel.
    Wheel,
}

/// Modifier keys state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Control key held
    pub ctrl: bool,
    /// Shift key held
    pub shift: bool,
    /// Alt key held
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    /// Shift only
    pub const SHIFT: Self = Self {
        ctrl: false,
        shift: true,
        alt: false,
    };

    /// Whether a click with these modifiers adds to the sort instead of replacing it.
    pub fn multi_sort(&self) -> bool {
        self.shift || self.ctrl
    }
}

/// An event delivered by the embedding application.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Click(Modifiers),
    Input(String),
    Change(String),
    Wheel { delta: f64, mode: WheelDeltaMode },
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click(_) => EventKind::Click,
            Self::Input(_) => EventKind::Input,
            Self::Change(_) => EventKind::Change,
            Self::Wheel { .. } => EventKind::Wheel,
        }
    }
}

/// Result of dispatching an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// The event changed (or will change) the grid.
    Consumed,
    /// The event had no effect.
    Ignored,
}

impl EventResult {
    pub fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}
