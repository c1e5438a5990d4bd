//! Default values for the free-form engine.

// ── Alignment guides ────────────────────────────────────────────

/// Two stops closer than this (in CSS pixels) are aligned.
pub const ALIGN_THRESHOLD_PX: f64 = 1.0;

/// Delay between a drag ending and its faded guides being cleared.
pub const GUIDE_CLEAR_DELAY_MS: u32 = 1000;

// ── Dragging ────────────────────────────────────────────────────

/// Fixed grab point: a dragged element's top-left sits this far up and left
/// of the pointer, regardless of where it was grabbed.
pub const GRAB_OFFSET_PX: f64 = 50.0;

// ── New elements ────────────────────────────────────────────────

pub const NEW_ELEMENT_X: f64 = 60.0;
pub const NEW_ELEMENT_Y: f64 = 0.0;
pub const NEW_ELEMENT_WIDTH: f64 = 100.0;
pub const NEW_ELEMENT_HEIGHT: f64 = 100.0;
