//! Collage Scene Model
//!
//! The in-memory scene: draggable elements (images, text blocks, glyph
//! icons), each with a position/scale/rotation/stacking transform, owned by
//! a single [`store::SceneStore`]. Render and export code never holds live
//! element references; it works from by-value [`store::SceneSnapshot`]s.

pub mod element;
pub mod stacking;
pub mod store;

pub use element::*;
pub use stacking::paint_order;
pub use store::{SceneSnapshot, SceneStore};
