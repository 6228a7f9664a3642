//! Collage Common Utilities
//!
//! Shared infrastructure for all Collage crates:
//! - Error types and result aliases
//! - Tracing/logging initialization
//! - Stage and export configuration defaults

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
