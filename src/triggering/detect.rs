//! Crossing detection for a single pair of keyframes.

use super::Edge;
use crate::math::{lerp, unlerp};
use crate::track::Track;

/// Tests the segment from keyframe `i0` to keyframe `i1` for a threshold
/// crossing.
///
/// A value is "below" when it is at or below `threshold`. A crossing exists
/// when the two keyframes are on different sides. The returned edge is rising
/// if the track goes up through the threshold while `forward` is `true`, or
/// goes down through it while `forward` is `false`.
///
/// The returned time is local to the cycle:
/// - a step segment jumps exactly at `times[i1]`
/// - a linear segment crosses where the interpolated value reaches `threshold`
/// - the wrap segment (`i1 == 0`) of a linear track is reported at time `0`,
///   the cycle start, without solving inside the wrap
///
/// # Panics
///
/// Panics if `i0` or `i1` is not a keyframe index of `track`.
///
/// # Examples
///
/// ```
/// use tripwire::{FloatTrack, Keyframe, detect_edge};
///
/// let track = FloatTrack::new([Keyframe::new(0.0, 0.0), Keyframe::new(0.5, 1.0)])?;
///
/// let edge = detect_edge(&track, 0, 1, true, 0.5).unwrap();
/// assert_eq!(edge.time, 0.25);
/// assert!(edge.rising);
///
/// assert!(detect_edge(&track, 0, 1, true, 2.0).is_none());
/// # Ok::<(), tripwire::TrackError>(())
/// ```
pub fn detect_edge<T: Track + ?Sized>(
    track: &T,
    i0: usize,
    i1: usize,
    forward: bool,
    threshold: f64,
) -> Option<Edge> {
    let values = track.values();
    let v0 = values[i0];
    let v1 = values[i1];

    let rising = if v0 <= threshold && v1 > threshold {
        forward
    } else if v0 > threshold && v1 <= threshold {
        !forward
    } else {
        return None;
    };

    let times = track.times();
    let time = if track.is_step(i0) {
        times[i1]
    } else if i1 == 0 {
        0.0
    } else {
        // Un-lerp the threshold, then remap to keyframe times.
        lerp(times[i0], times[i1], unlerp(v0, v1, threshold))
    };

    Some(Edge { time, rising })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::{FloatTrack, Keyframe};

    fn ramp_track() -> FloatTrack {
        FloatTrack::new([
            Keyframe::new(0.0, 0.0),
            Keyframe::new(0.25, 1.0),
            Keyframe::new(0.5, 1.0),
            Keyframe::new(0.75, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_rising_crossing() {
        let edge = detect_edge(&ramp_track(), 0, 1, true, 0.5).unwrap();
        assert_eq!(edge, Edge::rising(0.125));
    }

    #[test]
    fn test_falling_crossing() {
        let edge = detect_edge(&ramp_track(), 2, 3, true, 0.5).unwrap();
        assert_eq!(edge, Edge::falling(0.625));
    }

    #[test]
    fn test_backward_inverts_polarity() {
        let track = ramp_track();
        assert_eq!(
            detect_edge(&track, 0, 1, false, 0.5),
            Some(Edge::falling(0.125))
        );
        assert_eq!(
            detect_edge(&track, 2, 3, false, 0.5),
            Some(Edge::rising(0.625))
        );
    }

    #[test]
    fn test_no_crossing_on_same_side() {
        let track = ramp_track();
        assert!(detect_edge(&track, 1, 2, true, 0.5).is_none());
        assert!(detect_edge(&track, 3, 0, true, 0.5).is_none());
    }

    #[test]
    fn test_threshold_equality_counts_as_below() {
        let track = ramp_track();
        // 0 -> 1 with threshold 0: value 0 is "below", 1 is above
        assert_eq!(
            detect_edge(&track, 0, 1, true, 0.0),
            Some(Edge::rising(0.0))
        );
        // 1 -> 1 with threshold 1: both below
        assert!(detect_edge(&track, 1, 2, true, 1.0).is_none());
    }

    #[test]
    fn test_step_segment_jumps_at_end_keyframe() {
        let track = FloatTrack::new([
            Keyframe::step(0.0, 0.0),
            Keyframe::step(0.4, 1.0),
            Keyframe::new(0.8, 0.0),
        ])
        .unwrap();
        assert_eq!(
            detect_edge(&track, 0, 1, true, 0.5),
            Some(Edge::rising(0.4))
        );
        assert_eq!(
            detect_edge(&track, 1, 2, true, 0.5),
            Some(Edge::falling(0.8))
        );
    }

    #[test]
    fn test_step_wrap_segment_jumps_at_first_keyframe() {
        let track = FloatTrack::new([Keyframe::new(0.2, 0.0), Keyframe::step(0.6, 1.0)]).unwrap();
        assert_eq!(
            detect_edge(&track, 1, 0, true, 0.5),
            Some(Edge::falling(0.2))
        );
    }

    // The linear wrap segment is not solved: its crossing is pinned to the
    // cycle start even though the real crossing lies between 0.6 and 1.2.
    #[test]
    fn test_linear_wrap_segment_is_pinned_to_cycle_start() {
        let track = FloatTrack::new([Keyframe::new(0.2, 0.0), Keyframe::new(0.6, 1.0)]).unwrap();
        assert_eq!(
            detect_edge(&track, 1, 0, true, 0.5),
            Some(Edge::falling(0.0))
        );
    }
}
