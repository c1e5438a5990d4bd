//! Free-form engine configuration handed over by the host as JSON.
//!
//! Every field is optional on the wire; absent fields fall back to the
//! defaults in [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    ALIGN_THRESHOLD_PX, GRAB_OFFSET_PX, GUIDE_CLEAR_DELAY_MS, NEW_ELEMENT_HEIGHT, NEW_ELEMENT_WIDTH, NEW_ELEMENT_X,
    NEW_ELEMENT_Y,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be finite and non-negative, got {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Geometry given to elements created by "add".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewElementGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for NewElementGeometry {
    fn default() -> Self {
        Self { x: NEW_ELEMENT_X, y: NEW_ELEMENT_Y, width: NEW_ELEMENT_WIDTH, height: NEW_ELEMENT_HEIGHT }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum distance (exclusive) at which two stops count as aligned.
    pub align_threshold_px: f64,
    /// Subtracted from the pointer position to get a dragged element's top-left.
    pub grab_offset_px: f64,
    /// How long faded guides stay before they are cleared.
    pub guide_clear_delay_ms: u32,
    pub new_element: NewElementGeometry,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            align_threshold_px: ALIGN_THRESHOLD_PX,
            grab_offset_px: GRAB_OFFSET_PX,
            guide_clear_delay_ms: GUIDE_CLEAR_DELAY_MS,
            new_element: NewElementGeometry::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config object. An empty string yields defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject negative or non-finite distances and sizes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("align_threshold_px", self.align_threshold_px),
            ("grab_offset_px", self.grab_offset_px),
            ("new_element.width", self.new_element.width),
            ("new_element.height", self.new_element.height),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        for (field, value) in [("new_element.x", self.new_element.x), ("new_element.y", self.new_element.y)] {
            if !value.is_finite() {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        Ok(())
    }
}
