//! Looping keyframed tracks.
//!
//! This module provides:
//! - `Track` trait, the read-only view edge triggering works on
//! - `FloatTrack`, the owned scalar track implementation
//! - `Keyframe` and `Interpolation` for describing track content

mod float_track;
mod keyframe;

pub use float_track::FloatTrack;
pub use keyframe::{Interpolation, Keyframe};

/// Read-only access to one cycle of a looping scalar track.
///
/// Implementors expose `N` keyframes as parallel slices. Times are strictly
/// increasing inside `[0, 1)`. The segment leaving keyframe `i` ends at
/// keyframe `i + 1`, and the last keyframe connects back to the first one of
/// the next cycle.
pub trait Track {
    /// Keyframe times, strictly increasing in `[0, 1)`.
    fn times(&self) -> &[f64];

    /// Keyframe values, parallel to [`times`](Track::times).
    fn values(&self) -> &[f64];

    /// Whether the segment leaving keyframe `index` holds its value until the
    /// next keyframe instead of interpolating.
    fn is_step(&self, index: usize) -> bool;

    /// Number of keyframes.
    fn len(&self) -> usize {
        self.times().len()
    }

    /// Returns `true` if the track has no keyframe.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Track + ?Sized> Track for &T {
    fn times(&self) -> &[f64] {
        (**self).times()
    }

    fn values(&self) -> &[f64] {
        (**self).values()
    }

    fn is_step(&self, index: usize) -> bool {
        (**self).is_step(index)
    }
}
