//! Drag-and-drop controller for the builder tree.
//!
//! Each rendered node gets a [`NodeController`] tracking two independent bits
//! of local state: whether the node is the current drag source
//! ([`DragPhase`]) and, for containers, whether a drag is hovering over it
//! (`hover_armed`). The controller validates drops and publishes the moved
//! tree into the [`ElementStore`]. [`CanvasDropZone`] is the fallback target
//! that reattaches a dropped node at the top level.
//!
//! Invalid drops are not failures. They come back as
//! [`DropOutcome::Rejected`] with a [`DropRejection`] reason, are logged at
//! debug level, and leave the store untouched.

#[cfg(test)]
#[path = "dnd_test.rs"]
mod dnd_test;

use tracing::{debug, info};

use crate::event::{DragData, DropEffect, EventResponse, Handled};
use crate::store::ElementStore;
use crate::tree::{self, Element, ElementId};

/// Why a drop was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DropRejection {
    /// Only containers accept drops.
    #[error("drop target {0} is not a container")]
    NotContainer(ElementId),
    /// The drop target is no longer in the tree.
    #[error("drop target {0} not found")]
    TargetNotFound(ElementId),
    /// The drag carried no element id.
    #[error("drag payload carries no element id")]
    MissingPayload,
    /// An element cannot be dropped on itself.
    #[error("cannot drop {0} on itself")]
    SelfDrop(ElementId),
    /// The dragged id is not in the tree.
    #[error("dragged element {0} not found")]
    NotFound(ElementId),
    /// The target sits inside the dragged element's subtree.
    #[error("cannot drop {dragged} into its own descendant {target}")]
    Cycle { dragged: ElementId, target: ElementId },
}

/// Result of a drop attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// `id` is now the last child of `parent`.
    Moved { id: ElementId, parent: ElementId },
    /// `id` is now the last top-level element.
    MovedToRoot { id: ElementId },
    /// Nothing changed.
    Rejected(DropRejection),
}

impl DropOutcome {
    /// Whether the drop changed the tree.
    #[must_use]
    pub fn is_move(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

/// Move `dragged_id` to the end of `target_id`'s children.
///
/// Checks run in order: the target exists and is a container, the element is
/// not dropped on itself, the dragged element exists, and the target is not
/// inside the dragged subtree.
pub fn move_into(tree: &[Element], dragged_id: &str, target_id: &str) -> Result<Vec<Element>, DropRejection> {
    let target = tree::locate(tree, target_id).ok_or_else(|| DropRejection::TargetNotFound(target_id.to_owned()))?;
    if !target.is_container {
        return Err(DropRejection::NotContainer(target_id.to_owned()));
    }
    if dragged_id == target_id {
        return Err(DropRejection::SelfDrop(dragged_id.to_owned()));
    }
    let dragged = tree::locate(tree, dragged_id).ok_or_else(|| DropRejection::NotFound(dragged_id.to_owned()))?;
    if tree::is_descendant(dragged, target_id) {
        return Err(DropRejection::Cycle { dragged: dragged_id.to_owned(), target: target_id.to_owned() });
    }
    let detached = tree::detach(tree, dragged_id).ok_or_else(|| DropRejection::NotFound(dragged_id.to_owned()))?;
    Ok(tree::append_child(&detached.remainder, target_id, detached.removed))
}

/// Move `dragged_id` to the end of the top-level sequence.
pub fn move_to_root(tree: &[Element], dragged_id: &str) -> Result<Vec<Element>, DropRejection> {
    let detached = tree::detach(tree, dragged_id).ok_or_else(|| DropRejection::NotFound(dragged_id.to_owned()))?;
    let mut out = detached.remainder;
    out.push(detached.removed);
    Ok(out)
}

/// Whether this node is the active drag source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// Not being dragged.
    #[default]
    Idle,
    /// Between this node's drag start and drag end.
    Dragging,
}

/// Per-node drag-and-drop state and handlers.
#[derive(Debug, Clone)]
pub struct NodeController {
    id: ElementId,
    is_container: bool,
    phase: DragPhase,
    hover_armed: bool,
}

impl NodeController {
    #[must_use]
    pub fn new(id: impl Into<ElementId>, is_container: bool) -> Self {
        Self { id: id.into(), is_container, phase: DragPhase::Idle, hover_armed: false }
    }

    #[must_use]
    pub fn for_element(element: &Element) -> Self {
        Self::new(element.id.clone(), element.is_container)
    }

    /// Refresh the container flag after the tree was replaced.
    pub fn sync(&mut self, element: &Element) {
        self.is_container = element.is_container;
        if !self.is_container {
            self.hover_armed = false;
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn is_container(&self) -> bool {
        self.is_container
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    #[must_use]
    pub fn is_hover_armed(&self) -> bool {
        self.hover_armed
    }

    /// Whether the renderer should draw the drop-target highlight.
    #[must_use]
    pub fn highlight(&self) -> bool {
        self.hover_armed && self.is_container
    }

    /// This node starts being dragged: write its id into the payload.
    ///
    /// Stops propagation so an enclosing node does not overwrite the payload
    /// with its own id.
    pub fn on_drag_start(&mut self, data: &mut DragData) -> EventResponse {
        data.set_element_id(&self.id);
        data.set_effect_allowed(DropEffect::Move);
        self.phase = DragPhase::Dragging;
        debug!(id = %self.id, "dnd: drag start");
        EventResponse::STOP
    }

    /// The drag this node started is over, whatever its result.
    pub fn on_drag_end(&mut self) -> EventResponse {
        self.phase = DragPhase::Idle;
        EventResponse::IGNORED
    }

    /// A drag moves over this node. Containers arm and claim the event;
    /// everything else lets it bubble to an ancestor.
    pub fn on_drag_over(&mut self, data: &mut DragData) -> EventResponse {
        if !self.is_container {
            return EventResponse::IGNORED;
        }
        self.hover_armed = true;
        data.set_drop_effect(DropEffect::Move);
        EventResponse::CLAIMED
    }

    /// The pointer left this node's own box. `related_inside` tells whether the
    /// element it moved to is still inside this node's rendered subtree; moving
    /// onto a descendant keeps the hover armed.
    pub fn on_drag_leave(&mut self, related_inside: bool) -> EventResponse {
        if !self.is_container {
            return EventResponse::IGNORED;
        }
        if !related_inside {
            self.hover_armed = false;
        }
        EventResponse::CLAIMED
    }

    /// Something was dropped on this node.
    ///
    /// Non-containers ignore the event so it reaches an ancestor container or
    /// the canvas. Containers always claim it and either publish the moved
    /// tree or report why they refused.
    pub fn on_drop(&mut self, data: &DragData, store: &mut ElementStore) -> Handled<DropOutcome> {
        if !self.is_container {
            let reason = DropRejection::NotContainer(self.id.clone());
            debug!(drop_target = %self.id, %reason, "dnd: drop passed to ancestor");
            return Handled::new(EventResponse::IGNORED, DropOutcome::Rejected(reason));
        }
        self.hover_armed = false;

        let Some(dragged) = data.element_id() else {
            debug!(drop_target = %self.id, "dnd: drop without payload");
            return Handled::new(EventResponse::CLAIMED, DropOutcome::Rejected(DropRejection::MissingPayload));
        };

        let outcome = match move_into(store.get(), dragged, &self.id) {
            Ok(next) => {
                store.replace(next);
                info!(id = %dragged, parent = %self.id, "dnd: element moved");
                DropOutcome::Moved { id: dragged.to_owned(), parent: self.id.clone() }
            }
            Err(reason) => {
                debug!(id = %dragged, drop_target = %self.id, %reason, "dnd: drop rejected");
                DropOutcome::Rejected(reason)
            }
        };
        Handled::new(EventResponse::CLAIMED, outcome)
    }
}

/// The top-level canvas: drops here land at the end of the root sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasDropZone;

impl CanvasDropZone {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Allow dropping anywhere on the canvas.
    pub fn on_drag_over(&self, data: &mut DragData) -> EventResponse {
        data.set_drop_effect(DropEffect::Move);
        EventResponse::PREVENT
    }

    pub fn on_drop(&self, data: &DragData, store: &mut ElementStore) -> Handled<DropOutcome> {
        let Some(dragged) = data.element_id() else {
            debug!("dnd: canvas drop without payload");
            return Handled::new(EventResponse::CLAIMED, DropOutcome::Rejected(DropRejection::MissingPayload));
        };

        let outcome = match move_to_root(store.get(), dragged) {
            Ok(next) => {
                store.replace(next);
                info!(id = %dragged, "dnd: element moved to top level");
                DropOutcome::MovedToRoot { id: dragged.to_owned() }
            }
            Err(reason) => {
                debug!(id = %dragged, %reason, "dnd: canvas drop rejected");
                DropOutcome::Rejected(reason)
            }
        };
        Handled::new(EventResponse::CLAIMED, outcome)
    }
}
