//! Presentation-agnostic markup tree.
//!
//! The renderer produces [`Node`] trees; embedding applications paint them
//! with whatever backend they use and route events back through
//! [`DataGrid::dispatch`](crate::DataGrid::dispatch) using the [`Binding`]s
//! attached to elements.

use std::collections::BTreeMap;

use super::event::{Action, EventKind};

/// Element kinds the renderer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Div,
    Span,
    Label,
    Table,
    Thead,
    Tbody,
    Tr,
    Th,
    Td,
    Button,
    Input,
    Select,
    Option,
}

impl Tag {
    /// Lower-case tag name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Div => "div",
            Self::Span => "span",
            Self::Label => "label",
            Self::Table => "table",
            Self::Thead => "thead",
            Self::Tbody => "tbody",
            Self::Tr => "tr",
            Self::Th => "th",
            Self::Td => "td",
            Self::Button => "button",
            Self::Input => "input",
            Self::Select => "select",
            Self::Option => "option",
        }
    }
}

/// An event binding: when `event` fires on the element, dispatch `action`.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub event: EventKind,
    pub action: Action,
}

/// A markup element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    /// Stable identity among siblings (row keys, column names).
    pub key: Option<String>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub children: Vec<Node>,
    pub bindings: Vec<Binding>,
    /// Disabled elements carry no bindings.
    pub disabled: bool,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            key: None,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
            bindings: Vec::new(),
            disabled: false,
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add a class. Empty names are skipped.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() {
            self.classes.push(class);
        }
        self
    }

    /// Add a class if present.
    pub fn class_opt(self, class: Option<impl Into<String>>) -> Self {
        match class {
            Some(class) => self.class(class),
            None => self,
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Bind `action` to `event`. Ignored on disabled elements.
    pub fn on(mut self, event: EventKind, action: Action) -> Self {
        if !self.disabled {
            self.bindings.push(Binding { event, action });
        }
        self
    }

    /// Mark the element disabled, dropping any bindings.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        if disabled {
            self.bindings.clear();
            self.attrs.insert("disabled".into(), "disabled".into());
        }
        self
    }

    /// Returns `true` if the element carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// The action bound to `event`, if any.
    pub fn action(&self, event: EventKind) -> Option<&Action> {
        self.bindings
            .iter()
            .find(|binding| binding.event == event)
            .map(|binding| &binding.action)
    }
}

/// A node of the markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Fragment(Vec<Node>),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// A node that renders nothing.
    pub fn empty() -> Self {
        Self::Fragment(Vec::new())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(el) => el.children.iter().for_each(|c| c.collect_text(out)),
            Self::Fragment(nodes) => nodes.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Direct children (fragments are transparent).
    pub fn child_nodes(&self) -> &[Node] {
        match self {
            Self::Element(el) => &el.children,
            Self::Fragment(nodes) => nodes,
            Self::Text(_) => &[],
        }
    }

    /// All elements in document order for which `pred` holds.
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.walk(&mut |el| {
            if pred(el) {
                found.push(el);
            }
        });
        found
    }

    /// First element in document order for which `pred` holds.
    pub fn find<'a>(&'a self, pred: &dyn Fn(&Element) -> bool) -> Option<&'a Element> {
        self.find_all(pred).into_iter().next()
    }

    /// Visit every element depth-first.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Element)) {
        match self {
            Self::Element(el) => {
                visit(el);
                for child in &el.children {
                    child.walk(visit);
                }
            }
            Self::Fragment(nodes) => {
                for child in nodes {
                    child.walk(visit);
                }
            }
            Self::Text(_) => {}
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}
