//! Free-form drag/resize engine for absolutely positioned elements.
//!
//! A single interaction runs at a time, tracked by [`InteractMode`]:
//!
//! | Mode | Entered by | Pointer move | Left by |
//! |------|------------|--------------|---------|
//! | `Dragging` | [`FreeformEngine::on_press`] | moves the element, recomputes guides | release |
//! | `Resizing` | [`FreeformEngine::on_resize_press`] | grows/shrinks from the snapshot | release |
//!
//! A press while another interaction is active replaces it.
//!
//! Releasing a drag fades the guides and asks the host to call back after the
//! configured delay via [`Action::ScheduleGuideClear`]. Every clear request
//! carries a token; starting a new drag invalidates outstanding tokens, so a
//! late callback from an earlier drag never wipes the guides of the current one.

#[cfg(test)]
#[path = "freeform_test.rs"]
mod freeform_test;

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::event::{EventResponse, Handled};
use crate::geom::{Point, PositionedElement};
use crate::guides::{Guide, compute_guides};
use crate::store::PositionedStore;

/// Notifications returned from engine handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ElementMoved { id: String, x: f64, y: f64 },
    ElementResized { id: String, width: f64, height: f64 },
    /// The interaction mode changed; `mode` is [`InteractMode::label`].
    ModeChanged { mode: &'static str },
    /// The guide list or its fading flag changed.
    GuidesChanged,
    /// Call [`FreeformEngine::on_guide_clear_elapsed`] with `token` after `delay_ms`.
    ScheduleGuideClear { token: u64, delay_ms: u32 },
}

/// Pointer and size captured when a resize starts.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSnapshot {
    pub id: String,
    pub start_width: f64,
    pub start_height: f64,
    pub start_pointer: Point,
}

/// The active interaction.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractMode {
    #[default]
    None,
    Dragging { id: String },
    Resizing(ResizeSnapshot),
}

#[derive(Debug, Clone, Default)]
struct GuideState {
    guides: Vec<Guide>,
    fading: bool,
    /// Token of the clear the host is currently expected to deliver.
    pending_clear: Option<u64>,
    next_token: u64,
}

/// Drag/resize state machine. The element collection lives in a
/// [`PositionedStore`] passed to each handler.
#[derive(Debug, Clone, Default)]
pub struct FreeformEngine {
    config: EngineConfig,
    mode: InteractMode,
    guides: GuideState,
}

impl InteractMode {
    /// Short name for hosts and logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Dragging { .. } => "dragging",
            Self::Resizing(_) => "resizing",
        }
    }
}

impl FreeformEngine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config, mode: InteractMode::None, guides: GuideState::default() }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn mode(&self) -> &InteractMode {
        &self.mode
    }

    #[must_use]
    pub fn guides(&self) -> &[Guide] {
        &self.guides.guides
    }

    #[must_use]
    pub fn guides_fading(&self) -> bool {
        self.guides.fading
    }

    /// Whether a scheduled guide clear is still outstanding.
    #[must_use]
    pub fn clear_pending(&self) -> bool {
        self.guides.pending_clear.is_some()
    }

    /// Append a new element at the configured default geometry and return its id.
    pub fn add_element(&self, store: &mut PositionedStore) -> String {
        let geometry = self.config.new_element;
        let id = Uuid::new_v4().to_string();
        let mut next = store.get().clone();
        next.push(PositionedElement::new(id.clone(), geometry.x, geometry.y, geometry.width, geometry.height));
        store.replace(next);
        info!(%id, "freeform: element added");
        id
    }

    /// Pointer pressed on an element body: start dragging it.
    ///
    /// Cancels any pending guide clear and drops guides left over from the
    /// previous drag.
    pub fn on_press(&mut self, id: &str, store: &PositionedStore) -> Vec<Action> {
        if !store.get().iter().any(|el| el.id == id) {
            debug!(%id, "freeform: press on unknown element");
            return Vec::new();
        }
        self.mode = InteractMode::Dragging { id: id.to_owned() };
        debug!(%id, "freeform: drag start");

        let mut actions = vec![self.mode_changed()];
        let had_guides = !self.guides.guides.is_empty() || self.guides.fading;
        self.guides.pending_clear = None;
        self.guides.guides.clear();
        self.guides.fading = false;
        if had_guides {
            actions.push(Action::GuidesChanged);
        }
        actions
    }

    /// Pointer pressed on an element's resize handle: snapshot and start resizing.
    ///
    /// Always stops propagation so the element body underneath does not also
    /// start a drag.
    pub fn on_resize_press(&mut self, id: &str, pointer: Point, store: &PositionedStore) -> Handled<Vec<Action>> {
        let Some(el) = store.get().iter().find(|el| el.id == id) else {
            debug!(%id, "freeform: resize press on unknown element");
            return Handled::new(EventResponse::STOP, Vec::new());
        };
        let snapshot = ResizeSnapshot {
            id: id.to_owned(),
            start_width: el.width,
            start_height: el.height,
            start_pointer: pointer,
        };
        debug!(%id, width = el.width, height = el.height, "freeform: resize start");
        self.mode = InteractMode::Resizing(snapshot);
        Handled::new(EventResponse::STOP, vec![self.mode_changed()])
    }

    /// Pointer moved anywhere over the canvas.
    pub fn on_pointer_move(&mut self, pointer: Point, store: &mut PositionedStore) -> Vec<Action> {
        match &self.mode {
            InteractMode::None => Vec::new(),
            InteractMode::Dragging { id } => {
                let id = id.clone();
                self.drag_to(&id, pointer, store)
            }
            InteractMode::Resizing(snapshot) => {
                let snapshot = snapshot.clone();
                resize_to(&snapshot, pointer, store)
            }
        }
    }

    /// Pointer released: end whatever interaction is active.
    pub fn on_release(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.mode) {
            InteractMode::None => Vec::new(),
            InteractMode::Resizing(snapshot) => {
                debug!(id = %snapshot.id, "freeform: resize end");
                vec![self.mode_changed()]
            }
            InteractMode::Dragging { id } => {
                debug!(%id, "freeform: drag end");
                let token = self.guides.next_token;
                self.guides.next_token += 1;
                self.guides.pending_clear = Some(token);
                self.guides.fading = true;
                vec![
                    self.mode_changed(),
                    Action::GuidesChanged,
                    Action::ScheduleGuideClear { token, delay_ms: self.config.guide_clear_delay_ms },
                ]
            }
        }
    }

    /// The host's timer for `token` fired. Stale tokens are ignored.
    pub fn on_guide_clear_elapsed(&mut self, token: u64) -> Vec<Action> {
        if self.guides.pending_clear != Some(token) {
            debug!(token, "freeform: stale guide clear ignored");
            return Vec::new();
        }
        self.guides.pending_clear = None;
        self.guides.guides.clear();
        self.guides.fading = false;
        vec![Action::GuidesChanged]
    }

    fn mode_changed(&self) -> Action {
        Action::ModeChanged { mode: self.mode.label() }
    }

    fn drag_to(&mut self, id: &str, pointer: Point, store: &mut PositionedStore) -> Vec<Action> {
        let x = pointer.x - self.config.grab_offset_px;
        let y = pointer.y - self.config.grab_offset_px;
        if !replace_element(store, id, |el| {
            el.x = x;
            el.y = y;
        }) {
            return Vec::new();
        }
        self.guides.guides = compute_guides(store.get(), id, self.config.align_threshold_px);
        vec![Action::ElementMoved { id: id.to_owned(), x, y }, Action::GuidesChanged]
    }
}

fn resize_to(snapshot: &ResizeSnapshot, pointer: Point, store: &mut PositionedStore) -> Vec<Action> {
    let width = snapshot.start_width + (pointer.x - snapshot.start_pointer.x);
    let height = snapshot.start_height + (pointer.y - snapshot.start_pointer.y);
    if !replace_element(store, &snapshot.id, |el| {
        el.width = width;
        el.height = height;
    }) {
        return Vec::new();
    }
    vec![Action::ElementResized { id: snapshot.id.clone(), width, height }]
}

/// Publish a copy of the collection with `edit` applied to element `id`.
/// Returns false (and leaves the store alone) when the id is absent.
fn replace_element<F>(store: &mut PositionedStore, id: &str, edit: F) -> bool
where
    F: FnOnce(&mut PositionedElement),
{
    let mut next = store.get().clone();
    let Some(el) = next.iter_mut().find(|el| el.id == id) else {
        return false;
    };
    edit(el);
    store.replace(next);
    true
}
