//! Temposync - variable-speed audio re-timing for videos
//!
//! The library crate exposes the planning and pipeline code for the
//! binary and for integration tests.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod plan;
pub mod points;

pub use error::{Result, SyncError, ValidationError};
pub use plan::{plan, Segment};
pub use points::{ControlPoint, ControlPointSet};
