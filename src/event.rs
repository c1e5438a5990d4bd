//! Host-neutral event plumbing: drag payloads and handler effects.
//!
//! Handlers never touch host events directly. A drag payload travels in a
//! [`DragData`] value the host copies in and out of its native transfer
//! object, and every handler reports what it wants done to the host event as
//! an [`EventResponse`]: suppress the default action, stop the event from
//! reaching ancestor handlers, both, or neither.

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;

use std::collections::HashMap;

/// Transfer format under which the dragged element's id is stored.
pub const ELEMENT_ID_FORMAT: &str = "elementId";

/// Drag effect hint, mirroring the browser's `effectAllowed` / `dropEffect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Move,
    Link,
}

impl DropEffect {
    /// Host-facing keyword for this effect.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Copy => "copy",
            Self::Move => "move",
            Self::Link => "link",
        }
    }
}

/// Payload carried from drag start to drop.
#[derive(Debug, Clone, Default)]
pub struct DragData {
    entries: HashMap<String, String>,
    effect_allowed: DropEffect,
    drop_effect: DropEffect,
}

impl DragData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` under `format`, replacing any previous value.
    pub fn set_data(&mut self, format: &str, data: &str) {
        self.entries.insert(format.to_owned(), data.to_owned());
    }

    /// Value stored under `format`, if any.
    #[must_use]
    pub fn get_data(&self, format: &str) -> Option<&str> {
        self.entries.get(format).map(String::as_str)
    }

    /// The dragged element id. Empty strings count as absent, since hosts
    /// report a missing format as `""`.
    #[must_use]
    pub fn element_id(&self) -> Option<&str> {
        self.get_data(ELEMENT_ID_FORMAT).filter(|id| !id.is_empty())
    }

    pub fn set_element_id(&mut self, id: &str) {
        self.set_data(ELEMENT_ID_FORMAT, id);
    }

    /// Iterate stored `(format, value)` pairs, for copying back into a host transfer.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn effect_allowed(&self) -> DropEffect {
        self.effect_allowed
    }

    pub fn set_effect_allowed(&mut self, effect: DropEffect) {
        self.effect_allowed = effect;
    }

    #[must_use]
    pub fn drop_effect(&self) -> DropEffect {
        self.drop_effect
    }

    pub fn set_drop_effect(&mut self, effect: DropEffect) {
        self.drop_effect = effect;
    }
}

/// What a handler asks the host to do with the event it just handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    /// Suppress the host's default handling.
    pub prevent_default: bool,
    /// Do not notify ancestor handlers.
    pub stop_propagation: bool,
}

impl EventResponse {
    /// The handler did not claim the event; it continues to ancestors.
    pub const IGNORED: Self = Self { prevent_default: false, stop_propagation: false };

    /// The handler consumed the event completely.
    pub const CLAIMED: Self = Self { prevent_default: true, stop_propagation: true };

    /// Keep ancestors from seeing the event but let the default run.
    pub const STOP: Self = Self { prevent_default: false, stop_propagation: true };

    /// Suppress the default but keep bubbling.
    pub const PREVENT: Self = Self { prevent_default: true, stop_propagation: false };
}

/// A handler's effect on the host event together with what it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Handled<T> {
    pub response: EventResponse,
    pub outcome: T,
}

impl<T> Handled<T> {
    #[must_use]
    pub fn new(response: EventResponse, outcome: T) -> Self {
        Self { response, outcome }
    }
}
