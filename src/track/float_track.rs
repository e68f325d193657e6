//! Owned looping scalar track.

use super::{Interpolation, Keyframe, Track};
use crate::error::TrackError;
use crate::math::lerp;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A looping scalar track made of keyframes inside one normalized cycle.
///
/// Times and values are stored as parallel arrays, and the per-keyframe step
/// flags are packed one bit per keyframe. The track is immutable once built,
/// so it can be shared by any number of concurrent triggering jobs.
///
/// # Examples
///
/// ```
/// use tripwire::{FloatTrack, Keyframe, Track};
///
/// let track = FloatTrack::new([
///     Keyframe::new(0.0, 0.0),
///     Keyframe::new(0.5, 1.0),
///     Keyframe::step(0.75, 0.5),
/// ])?;
///
/// assert_eq!(track.len(), 3);
/// assert!(track.is_step(2));
/// assert_eq!(track.sample(0.25), 0.5);
/// # Ok::<(), tripwire::TrackError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Keyframe>", into = "Vec<Keyframe>")
)]
pub struct FloatTrack {
    times: Vec<f64>,
    values: Vec<f64>,
    /// Step flag of keyframe `i` is bit `i % 8` of byte `i / 8`.
    steps: Vec<u8>,
}

impl FloatTrack {
    /// Builds a track from keyframes sorted by time.
    ///
    /// # Errors
    ///
    /// - [`TrackError::Empty`] if no keyframe is given
    /// - [`TrackError::TimeOutOfRange`] if a time is not finite or outside `[0, 1)`
    /// - [`TrackError::UnsortedKeyframes`] if times are not strictly increasing
    /// - [`TrackError::NonFiniteValue`] if a value is NaN or infinite
    pub fn new<I>(keyframes: I) -> Result<Self, TrackError>
    where
        I: IntoIterator<Item = Keyframe>,
    {
        let keyframes: Vec<Keyframe> = keyframes.into_iter().collect();
        if let Err(err) = check_keyframes(&keyframes) {
            tracing::trace!(%err, keys = keyframes.len(), "rejected track keyframes");
            return Err(err);
        }
        Ok(Self::from_validated_keyframes(&keyframes))
    }

    /// Builds a track from keyframes that already passed validation.
    ///
    /// Used by the `track!` macro, which checks its input at compile time.
    #[doc(hidden)]
    pub fn from_validated_keyframes(keyframes: &[Keyframe]) -> Self {
        debug_assert!(check_keyframes(keyframes).is_ok());

        let mut steps = vec![0u8; keyframes.len().div_ceil(8)];
        for (index, key) in keyframes.iter().enumerate() {
            if key.interpolation.is_step() {
                steps[index / 8] |= 1 << (index & 7);
            }
        }

        Self {
            times: keyframes.iter().map(|key| key.time).collect(),
            values: keyframes.iter().map(|key| key.value).collect(),
            steps,
        }
    }

    /// Iterates over the keyframes of the track.
    pub fn keyframes(&self) -> impl Iterator<Item = Keyframe> + '_ {
        self.times
            .iter()
            .zip(&self.values)
            .enumerate()
            .map(|(index, (&time, &value))| Keyframe {
                time,
                value,
                interpolation: if self.is_step(index) {
                    Interpolation::Step
                } else {
                    Interpolation::Linear
                },
            })
    }

    /// Evaluates the track at an absolute time.
    ///
    /// The time is wrapped into the `[0, 1)` cycle first. Between the last
    /// keyframe and the end of the cycle, and before the first keyframe, the
    /// track follows the wrap segment that joins the last keyframe to the
    /// first keyframe of the next cycle.
    ///
    /// # Examples
    ///
    /// ```
    /// use tripwire::{FloatTrack, Keyframe};
    ///
    /// let track = FloatTrack::new([Keyframe::new(0.0, 0.0), Keyframe::new(0.5, 1.0)])?;
    ///
    /// assert_eq!(track.sample(0.25), 0.5);
    /// assert_eq!(track.sample(0.75), 0.5); // wrap segment, 1.0 back down to 0.0
    /// assert_eq!(track.sample(2.25), 0.5); // loops
    /// # Ok::<(), tripwire::TrackError>(())
    /// ```
    pub fn sample(&self, time: f64) -> f64 {
        let num_keys = self.times.len();
        let last = num_keys - 1;
        let t = time.rem_euclid(1.0);

        let next = self.times.partition_point(|&key_time| key_time <= t);
        let (i0, t0, t1) = match next {
            0 => (last, self.times[last] - 1.0, self.times[0]),
            n if n == num_keys => (last, self.times[last], self.times[0] + 1.0),
            n => (n - 1, self.times[n - 1], self.times[n]),
        };
        let i1 = if i0 == last { 0 } else { i0 + 1 };

        if self.is_step(i0) {
            return self.values[i0];
        }
        lerp(self.values[i0], self.values[i1], (t - t0) / (t1 - t0))
    }
}

impl Track for FloatTrack {
    fn times(&self) -> &[f64] {
        &self.times
    }

    fn values(&self) -> &[f64] {
        &self.values
    }

    fn is_step(&self, index: usize) -> bool {
        self.steps
            .get(index / 8)
            .is_some_and(|byte| byte & (1 << (index & 7)) != 0)
    }
}

impl TryFrom<Vec<Keyframe>> for FloatTrack {
    type Error = TrackError;

    fn try_from(keyframes: Vec<Keyframe>) -> Result<Self, Self::Error> {
        Self::new(keyframes)
    }
}

impl From<FloatTrack> for Vec<Keyframe> {
    fn from(track: FloatTrack) -> Self {
        track.keyframes().collect()
    }
}

fn check_keyframes(keyframes: &[Keyframe]) -> Result<(), TrackError> {
    if keyframes.is_empty() {
        return Err(TrackError::Empty);
    }

    let mut previous: Option<f64> = None;
    for (index, key) in keyframes.iter().enumerate() {
        if !(0.0..1.0).contains(&key.time) {
            return Err(TrackError::TimeOutOfRange {
                index,
                time: key.time,
            });
        }
        if previous.is_some_and(|previous| key.time <= previous) {
            return Err(TrackError::UnsortedKeyframes { index });
        }
        if !key.value.is_finite() {
            return Err(TrackError::NonFiniteValue { index });
        }
        previous = Some(key.time);
    }
    Ok(())
}
