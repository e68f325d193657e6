//! Tripwire - threshold edge detection on looping keyframed tracks
//!
//! This library finds where a scalar track crosses a threshold value between
//! two times. Tracks loop over a normalized `[0, 1)` cycle, and queries may
//! span any number of cycles in either time direction.
//!
//! ```
//! use tripwire::{Edge, FloatTrack, Keyframe, TriggeringJob};
//!
//! let track = FloatTrack::new([
//!     Keyframe::new(0.0, 0.0),
//!     Keyframe::new(0.25, 1.0),
//!     Keyframe::new(0.5, 1.0),
//!     Keyframe::new(0.75, 0.0),
//! ])?;
//!
//! let mut buffer = [Edge::default(); 4];
//! let mut job = TriggeringJob::new()
//!     .with_range(0.0, 1.0)
//!     .with_threshold(0.5)
//!     .with_track(&track)
//!     .with_output(&mut buffer);
//!
//! assert_eq!(
//!     job.triggered_edges()?,
//!     &[Edge::rising(0.125), Edge::falling(0.625)]
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod math;
pub mod track;
pub mod triggering;

// Re-export commonly used types at the crate root
pub use error::{InvalidJobReason, TrackError, TriggeringError};
pub use track::{FloatTrack, Interpolation, Keyframe, Track};
pub use triggering::{Edge, EdgeIter, EdgeWriter, MAX_TIME, TriggeringJob, detect_edge};

#[cfg(feature = "macros")]
pub use tripwire_macros::track;
