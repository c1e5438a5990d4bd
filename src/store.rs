//! Owned value stores with a replace-whole-value update discipline.
//!
//! The element tree and the positioned-element collection each live in one
//! [`Store`]. Controllers receive the store by `&mut` for the duration of an
//! event and publish results by replacing the whole value; nobody edits a
//! stored value in place.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::geom::PositionedElement;
use crate::tree::Element;

/// Store for the builder's element tree (the root sequence).
pub type ElementStore = Store<Vec<Element>>;

/// Store for the free-form engine's flat element collection.
pub type PositionedStore = Store<Vec<PositionedElement>>;

/// A single owned value plus a revision counter bumped on every replacement.
#[derive(Debug, Clone, Default)]
pub struct Store<T> {
    value: T,
    revision: u64,
}

impl<T> Store<T> {
    /// Wrap an initial value at revision zero.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self { value, revision: 0 }
    }

    /// The current value.
    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the whole value, returning the previous one.
    pub fn replace(&mut self, value: T) -> T {
        self.revision += 1;
        std::mem::replace(&mut self.value, value)
    }

    /// Number of replacements since construction.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
