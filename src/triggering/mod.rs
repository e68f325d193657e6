//! Threshold edge triggering on looping tracks.
//!
//! This module provides:
//! - `detect_edge` for testing a single keyframe pair
//! - `EdgeIter`, the lazy generator walking cycles in either direction
//! - `EdgeWriter`, a fixed-capacity output writer
//! - `TriggeringJob`, the entry point collecting edges into a caller slice

mod detect;
mod edge;
mod iter;
mod job;

pub use detect::detect_edge;
pub use edge::{Edge, EdgeWriter};
pub use iter::{EdgeIter, MAX_TIME};
pub use job::TriggeringJob;
