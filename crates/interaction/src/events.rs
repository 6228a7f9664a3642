//! Pointer event types fed into the interaction controller.
//!
//! Hit-testing happens in the host layer (the element under the pointer is
//! known at press time), so `Down` already names its target element.
//! Coordinates are stage-local CSS px.

use serde::{Deserialize, Serialize};

use collage_scene_model::ElementId;

/// Discriminated union of pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    /// Press on an element: focuses it and begins drag capture.
    Down { element: ElementId, x: f64, y: f64 },

    /// Pointer motion. Only meaningful while a drag is captured.
    Move { x: f64, y: f64 },

    /// Release: ends drag capture.
    Up,
}
