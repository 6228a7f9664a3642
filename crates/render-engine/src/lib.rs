//! Collage Render Engine
//!
//! Offline rendering pipeline that flattens a scene snapshot into a single
//! supersampled PNG, reproducing on-screen layout exactly, including the
//! per-kind coordinate-space and rotation-pivot conventions.
//!
//! # Pipeline Architecture
//!
//! ```text
//! SceneSnapshot ──┐
//!                 ├── Decode barrier (concurrent per-image tasks, join-all)
//! image bytes ────┘         │
//!                           ├── Paint pass (z order, single writer)
//! FontCatalog ──────────────┘         │
//!                                     ▼
//!                               Encode (PNG)
//!                                     │
//!                                     ▼
//!                               Vec<u8> bytes
//! ```
//!
//! Draw conventions, preserved from the reference behavior:
//! - Images scale by `transform.scale` and rotate about their destination
//!   center.
//! - Text and icons ignore `transform.scale` and rotate about their top-left
//!   anchor.

pub mod compositor;
pub mod export;
pub mod raster;
pub mod text;

pub use collage_common::{ExportDefaults, StageDefaults};
pub use export::*;
pub use text::FontCatalog;
