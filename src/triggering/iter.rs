//! Lazy edge generation across cycles, in both time directions.

use std::iter::FusedIterator;

use super::{Edge, detect_edge};
use crate::track::Track;

/// Largest magnitude a queried time may have, 2^53.
///
/// From there on, adding one cycle to an `f64` time no longer changes it.
pub const MAX_TIME: f64 = 9_007_199_254_740_992.0;

/// Scan position of an [`EdgeIter`].
///
/// `outer` is the whole-cycle offset being scanned. The inner cursor is a
/// keyframe index: the next one to visit going forward, or the count of
/// keyframes still to visit going backward.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Cursor {
    Forward { outer: f64, next: usize },
    Backward { outer: f64, remaining: usize },
    Exhausted,
}

/// Iterator over the edges a looping track crosses between two times.
///
/// Edges come out ordered by time: ascending when `to > from`, descending when
/// `to < from`. Going backward, polarities are mirrored since time flows the
/// other way. Edges are yielded one at a time, so a query spanning many cycles
/// costs no memory.
///
/// The lower end of the queried interval is inclusive and the upper end is
/// exclusive, whatever the direction.
///
/// # Examples
///
/// ```
/// use tripwire::{Edge, EdgeIter, FloatTrack, Keyframe};
///
/// let track = FloatTrack::new([
///     Keyframe::new(0.0, 0.0),
///     Keyframe::new(0.25, 1.0),
///     Keyframe::new(0.5, 1.0),
///     Keyframe::new(0.75, 0.0),
/// ])?;
///
/// let forward: Vec<Edge> = EdgeIter::new(&track, 0.0, 1.0, 0.5).collect();
/// assert_eq!(forward, [Edge::rising(0.125), Edge::falling(0.625)]);
///
/// let backward: Vec<Edge> = EdgeIter::new(&track, 1.0, 0.0, 0.5).collect();
/// assert_eq!(backward, [Edge::rising(0.625), Edge::falling(0.125)]);
/// # Ok::<(), tripwire::TrackError>(())
/// ```
#[derive(Debug)]
pub struct EdgeIter<'a, T: Track + ?Sized> {
    track: &'a T,
    from: f64,
    to: f64,
    threshold: f64,
    cursor: Cursor,
}

impl<'a, T: Track + ?Sized> EdgeIter<'a, T> {
    /// Creates an iterator over the crossings of `threshold` from time `from`
    /// to time `to`.
    ///
    /// An empty range (`from == to`) produces no edge, and neither does a
    /// bound that is NaN or not below [`MAX_TIME`] in magnitude.
    pub fn new(track: &'a T, from: f64, to: f64, threshold: f64) -> Self {
        let countable = from.abs() < MAX_TIME && to.abs() < MAX_TIME;
        let cursor = if !countable {
            Cursor::Exhausted
        } else if to > from {
            Cursor::Forward {
                outer: from.floor(),
                next: 0,
            }
        } else if to < from {
            Cursor::Backward {
                outer: from.floor() + 1.0,
                remaining: track.len(),
            }
        } else {
            Cursor::Exhausted
        };

        Self {
            track,
            from,
            to,
            threshold,
            cursor,
        }
    }

    /// Returns `true` once no edge is left.
    pub fn is_exhausted(&self) -> bool {
        self.cursor == Cursor::Exhausted
    }

    fn scan_forward(&mut self, mut outer: f64, mut next: usize) -> Option<Edge> {
        let track = self.track;
        let times = track.times();
        let num_keys = times.len();

        while outer < self.to {
            while next < num_keys {
                let i1 = next;
                let i0 = if i1 == 0 { num_keys - 1 } else { i1 - 1 };
                next += 1;

                if let Some(mut edge) = detect_edge(track, i0, i1, true, self.threshold) {
                    // Local cycle time to absolute time.
                    edge.time += outer;
                    if edge.time >= self.from && (edge.time < self.to || self.to >= outer + 1.0) {
                        self.cursor = Cursor::Forward { outer, next };
                        return Some(edge);
                    }
                    // Later keyframes are past the range too.
                    if times[i1] + outer >= self.to {
                        break;
                    }
                }
            }
            next = 0;
            outer += 1.0;
        }

        self.cursor = Cursor::Exhausted;
        None
    }

    fn scan_backward(&mut self, mut outer: f64, mut remaining: usize) -> Option<Edge> {
        let track = self.track;
        let times = track.times();
        let num_keys = times.len();

        while outer > self.to {
            while remaining > 0 {
                let i1 = remaining - 1;
                let i0 = if i1 == 0 { num_keys - 1 } else { i1 - 1 };
                remaining = i1;

                if let Some(mut edge) = detect_edge(track, i0, i1, false, self.threshold) {
                    // Backward cycles are scanned from their upper bound,
                    // `outer`, so the keyframes belong to cycle `outer - 1`.
                    edge.time += outer - 1.0;
                    if edge.time >= self.to && (edge.time < self.from || self.from >= outer) {
                        self.cursor = Cursor::Backward { outer, remaining };
                        return Some(edge);
                    }
                }
                // Earlier keyframes are before the range too.
                if times[i1] + outer - 1.0 <= self.to {
                    break;
                }
            }
            remaining = num_keys;
            outer -= 1.0;
        }

        self.cursor = Cursor::Exhausted;
        None
    }
}

impl<T: Track + ?Sized> Iterator for EdgeIter<'_, T> {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        match self.cursor {
            Cursor::Forward { outer, next } => self.scan_forward(outer, next),
            Cursor::Backward { outer, remaining } => self.scan_backward(outer, remaining),
            Cursor::Exhausted => None,
        }
    }
}

impl<T: Track + ?Sized> FusedIterator for EdgeIter<'_, T> {}
