//! Keyframes and segment interpolation modes.
//!
//! A keyframe pins the track to a value at a time inside the normalized
//! `[0, 1)` cycle. Its interpolation mode describes the *outgoing* segment,
//! the one running to the next keyframe (or back to the first keyframe of the
//! next cycle for the last one).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a segment moves from one keyframe value to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Interpolation {
    /// Varies linearly from this keyframe value to the next one.
    #[default]
    Linear,

    /// Holds this keyframe value, then jumps to the next value exactly at the
    /// next keyframe time.
    Step,
}

impl Interpolation {
    /// Returns `true` for [`Interpolation::Step`].
    pub fn is_step(self) -> bool {
        self == Interpolation::Step
    }
}

/// A single `(time, value)` sample of a looping track.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keyframe {
    /// Normalized cycle time, in `[0, 1)`.
    pub time: f64,
    /// Track value at `time`.
    pub value: f64,
    /// Interpolation of the segment leaving this keyframe.
    #[cfg_attr(feature = "serde", serde(default))]
    pub interpolation: Interpolation,
}

impl Keyframe {
    /// Creates a keyframe whose outgoing segment is linearly interpolated.
    ///
    /// # Examples
    ///
    /// ```
    /// use tripwire::{Interpolation, Keyframe};
    ///
    /// let key = Keyframe::new(0.25, 1.0);
    /// assert_eq!(key.interpolation, Interpolation::Linear);
    /// ```
    pub fn new(time: f64, value: f64) -> Self {
        Self {
            time,
            value,
            interpolation: Interpolation::Linear,
        }
    }

    /// Creates a keyframe whose value is held until the next keyframe.
    ///
    /// # Examples
    ///
    /// ```
    /// use tripwire::Keyframe;
    ///
    /// assert!(Keyframe::step(0.5, 1.0).interpolation.is_step());
    /// ```
    pub fn step(time: f64, value: f64) -> Self {
        Self {
            time,
            value,
            interpolation: Interpolation::Step,
        }
    }
}
