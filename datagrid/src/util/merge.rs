//! Typed patch cells used to merge partial updates into state.

use std::fmt;

/// A single field of a partial update.
///
/// A field either keeps its previous value, replaces it outright, or derives
/// the new value from the previous one (relative updates such as "advance by
/// one page").
pub enum Field<T> {
    /// Leave the previous value untouched.
    Keep,
    /// Replace the previous value.
    Set(T),
    /// Compute the new value from the previous one.
    Update(Box<dyn FnOnce(&T) -> T + Send>),
}

impl<T> Field<T> {
    /// Creates a relative update.
    pub fn update(f: impl FnOnce(&T) -> T + Send + 'static) -> Self {
        Self::Update(Box::new(f))
    }

    /// Returns `true` if this field leaves the previous value in place.
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

impl<T: Clone> Field<T> {
    /// Resolves the field against the previous value.
    pub fn apply(self, old: &T) -> T {
        match self {
            Self::Keep => old.clone(),
            Self::Set(value) => value,
            Self::Update(f) => f(old),
        }
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T: fmt::Debug> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep => f.write_str("Keep"),
            Self::Set(value) => f.debug_tuple("Set").field(value).finish(),
            Self::Update(_) => f.write_str("Update(..)"),
        }
    }
}

/// Recursive merge over a closed set of fields.
///
/// Implementors pair a value type with a patch type whose fields are
/// [`Field`]s (or nested patches for nested structs).
pub trait Merge: Sized {
    /// The partial update for this type.
    type Patch;

    /// Produces a new value with `patch` applied on top of `self`.
    fn merge(&self, patch: Self::Patch) -> Self;
}
