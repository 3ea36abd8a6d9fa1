//! Customizable render slots.

use std::fmt;
use std::sync::Arc;

use crate::view::Node;

/// Content that is either fixed or produced from a context value.
///
/// Titles, language strings, icons and wrappers are all slots, resolved by a
/// single [`resolve`](Slot::resolve) call.
///
/// # Example
///
/// ```
/// use datagrid::Slot;
///
/// let fixed: Slot<usize> = Slot::from("Loading...");
/// let counted: Slot<usize> = Slot::dynamic(|n: &usize| format!("{n} rows").into());
///
/// assert_eq!(fixed.resolve(&3).text_content(), "Loading...");
/// assert_eq!(counted.resolve(&3).text_content(), "3 rows");
/// ```
pub enum Slot<C: ?Sized> {
    Static(Node),
    Dynamic(Arc<dyn Fn(&C) -> Node + Send + Sync>),
}

impl<C: ?Sized> Slot<C> {
    pub fn dynamic(f: impl Fn(&C) -> Node + Send + Sync + 'static) -> Self {
        Self::Dynamic(Arc::new(f))
    }

    pub fn resolve(&self, cx: &C) -> Node {
        match self {
            Self::Static(node) => node.clone(),
            Self::Dynamic(f) => f(cx),
        }
    }
}

impl<C: ?Sized> Clone for Slot<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(node) => Self::Static(node.clone()),
            Self::Dynamic(f) => Self::Dynamic(Arc::clone(f)),
        }
    }
}

impl<C: ?Sized> fmt::Debug for Slot<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(node) => f.debug_tuple("Static").field(node).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl<C: ?Sized> From<Node> for Slot<C> {
    fn from(node: Node) -> Self {
        Self::Static(node)
    }
}

impl<C: ?Sized> From<&str> for Slot<C> {
    fn from(text: &str) -> Self {
        Self::Static(Node::text(text))
    }
}

impl<C: ?Sized> From<String> for Slot<C> {
    fn from(text: String) -> Self {
        Self::Static(Node::text(text))
    }
}
