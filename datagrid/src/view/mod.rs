//! Rendering engine state to a markup tree.

mod event;
mod language;
mod node;
mod render;
mod theme;

pub use event::{Action, EventKind, EventResult, Modifiers, PageTarget, UiEvent};
pub use language::{
    ControlContext, InfoContext, Language, Paginate, control_template, fill_info, info_template,
};
pub use node::{Binding, Element, Node, Tag};
pub use render::{DEFAULT_MAX_BUTTONS, ViewContext, render};
pub use theme::{DefaultTheme, Part, Theme, ThemeRef};
