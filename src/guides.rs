//! Alignment guides for free-form dragging.
//!
//! Guides are derived data: [`compute_guides`] rebuilds the full list from the
//! current geometry on every move tick. Overlapping guides are not merged.

#[cfg(test)]
#[path = "guides_test.rs"]
mod guides_test;

use serde::{Deserialize, Serialize};

use crate::geom::PositionedElement;

/// A guide line. Serializes as `{"type":"v","x":..}` or `{"type":"h","y":..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Guide {
    /// Vertical line at `x`, from aligned left edges, centers, or right edges.
    #[serde(rename = "v")]
    Vertical { x: f64 },
    /// Horizontal line at `y`, from aligned top edges, centers, or bottom edges.
    #[serde(rename = "h")]
    Horizontal { y: f64 },
}

/// Guides between the element `moving_id` and every other element.
///
/// For each other element, its left/center/right stops are compared with the
/// moving element's matching stops, then top/center/bottom. A difference
/// strictly below `threshold` emits a guide at the other element's stop.
/// Returns nothing when `moving_id` is not in `elements`.
#[must_use]
pub fn compute_guides(elements: &[PositionedElement], moving_id: &str, threshold: f64) -> Vec<Guide> {
    let Some(moving) = elements.iter().find(|el| el.id == moving_id) else {
        return Vec::new();
    };
    let (moving_x, moving_y) = (moving.x_stops(), moving.y_stops());

    let mut guides = Vec::new();
    for other in elements.iter().filter(|el| el.id != moving_id) {
        for (ours, theirs) in moving_x.iter().zip(other.x_stops()) {
            if (theirs - ours).abs() < threshold {
                guides.push(Guide::Vertical { x: theirs });
            }
        }
        for (ours, theirs) in moving_y.iter().zip(other.y_stops()) {
            if (theirs - ours).abs() < threshold {
                guides.push(Guide::Horizontal { y: theirs });
            }
        }
    }
    guides
}
