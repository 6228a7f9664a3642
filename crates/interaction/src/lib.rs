//! Collage Interaction
//!
//! Translates raw pointer events and property-panel edits into scene store
//! calls, and manages the single-focus selection. The controller owns only
//! ephemeral drag state; all durable scene state lives in the
//! [`collage_scene_model::SceneStore`] passed into each call, so there are no
//! process-wide singletons.

pub mod controller;
pub mod events;

pub use controller::InteractionController;
pub use events::PointerEvent;
