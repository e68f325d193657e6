//! The triggering job: validates a query and collects its edges.

use super::{Edge, EdgeIter, EdgeWriter, MAX_TIME};
use crate::error::{InvalidJobReason, TriggeringError};
use crate::track::{FloatTrack, Track};

/// Detects the edges a looping track crosses between two times.
///
/// The job reads a track and writes every crossing of `threshold` found
/// between `from` and `to` into a caller-provided slice, in time order. The
/// track is never modified, so several jobs may share one track, each with
/// its own output slice.
///
/// `from` and `to` are absolute times: their integer part counts cycles, so
/// a query can span any number of loops. `to < from` plays the track
/// backward, which reverses edge order and mirrors edge polarity.
///
/// # Examples
///
/// ```
/// use tripwire::{Edge, FloatTrack, Keyframe, TriggeringJob};
///
/// let track = FloatTrack::new([
///     Keyframe::new(0.0, 0.0),
///     Keyframe::new(0.25, 1.0),
///     Keyframe::new(0.5, 1.0),
///     Keyframe::new(0.75, 0.0),
/// ])?;
/// let mut buffer = [Edge::default(); 8];
///
/// let mut job = TriggeringJob::new()
///     .with_range(0.0, 2.0)
///     .with_threshold(0.5)
///     .with_track(&track)
///     .with_output(&mut buffer);
///
/// let count = job.run()?;
/// assert_eq!(count, 4);
/// assert_eq!(buffer[2], Edge::rising(1.125));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct TriggeringJob<'a, T: Track + ?Sized = FloatTrack> {
    /// Start of the queried time range.
    pub from: f64,
    /// End of the queried time range.
    pub to: f64,
    /// A rising edge is detected as soon as the track value becomes greater
    /// than `threshold`, a falling edge as soon as it becomes less or equal.
    pub threshold: f64,
    /// Track to scan.
    pub track: Option<&'a T>,
    /// Job output.
    pub edges: Option<&'a mut [Edge]>,
}

impl<T: Track + ?Sized> Default for TriggeringJob<'_, T> {
    fn default() -> Self {
        Self {
            from: 0.0,
            to: 0.0,
            threshold: 0.0,
            track: None,
            edges: None,
        }
    }
}

impl<'a, T: Track + ?Sized> TriggeringJob<'a, T> {
    /// Creates a job with an empty range, a zero threshold, and no track or
    /// output attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style method to set the queried range.
    pub fn with_range(mut self, from: f64, to: f64) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Builder-style method to set the threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Builder-style method to attach the track.
    pub fn with_track(mut self, track: &'a T) -> Self {
        self.track = Some(track);
        self
    }

    /// Builder-style method to attach the output slice.
    pub fn with_output(mut self, edges: &'a mut [Edge]) -> Self {
        self.edges = Some(edges);
        self
    }

    /// Returns `true` if the job can [`run`](TriggeringJob::run).
    ///
    /// A job needs a track and an output slice, a finite threshold, and a
    /// finite range whose bounds stay below [`MAX_TIME`] in magnitude.
    pub fn validate(&self) -> bool {
        self.checked_track().is_ok() && self.edges.is_some()
    }

    /// Lazily iterates over the edges of the query, without writing any
    /// output. Only the track is required.
    ///
    /// # Errors
    ///
    /// Returns [`TriggeringError::InvalidJob`] if the track is missing, the
    /// range is not finite or too large, or the threshold is not finite.
    pub fn iter(&self) -> Result<EdgeIter<'a, T>, TriggeringError> {
        let track = self.checked_track()?;
        Ok(EdgeIter::new(track, self.from, self.to, self.threshold))
    }

    /// Runs the job, returning how many leading output slots were written.
    ///
    /// An empty range (`from == to`) succeeds with no edge.
    ///
    /// # Errors
    ///
    /// - [`TriggeringError::InvalidJob`] if [`validate`](TriggeringJob::validate)
    ///   fails; nothing is written
    /// - [`TriggeringError::Overflow`] if the output slice is too small; its
    ///   content must not be relied on
    pub fn run(&mut self) -> Result<usize, TriggeringError> {
        let track = self.checked_track()?;
        let output = self
            .edges
            .as_deref_mut()
            .ok_or(TriggeringError::InvalidJob(InvalidJobReason::MissingOutput))?;

        if self.from == self.to {
            return Ok(0);
        }

        tracing::debug!(
            from = self.from,
            to = self.to,
            threshold = self.threshold,
            keys = track.len(),
            capacity = output.len(),
            "running triggering job"
        );

        let mut writer = EdgeWriter::new(output);
        for edge in EdgeIter::new(track, self.from, self.to, self.threshold) {
            if let Err(err) = writer.push(edge) {
                tracing::debug!(capacity = writer.capacity(), "triggering output overflow");
                return Err(err);
            }
        }

        tracing::debug!(edges = writer.len(), "triggering job done");
        Ok(writer.len())
    }

    /// Runs the job and returns the written edges.
    ///
    /// # Errors
    ///
    /// Same as [`run`](TriggeringJob::run).
    pub fn triggered_edges(&mut self) -> Result<&[Edge], TriggeringError> {
        let count = self.run()?;
        Ok(match self.edges.as_deref() {
            Some(edges) => &edges[..count],
            None => &[][..],
        })
    }

    fn checked_track(&self) -> Result<&'a T, TriggeringError> {
        let track = self
            .track
            .ok_or(TriggeringError::InvalidJob(InvalidJobReason::MissingTrack))?;
        if !self.from.is_finite() || !self.to.is_finite() {
            return Err(TriggeringError::InvalidJob(InvalidJobReason::NonFiniteRange));
        }
        if self.from.abs() >= MAX_TIME || self.to.abs() >= MAX_TIME {
            return Err(TriggeringError::InvalidJob(InvalidJobReason::RangeTooLarge));
        }
        if !self.threshold.is_finite() {
            return Err(TriggeringError::InvalidJob(
                InvalidJobReason::NonFiniteThreshold,
            ));
        }
        Ok(track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::Keyframe;

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
    fn test_default_job_is_invalid() {
        let job: TriggeringJob = TriggeringJob::new();
        assert!(!job.validate());
    }

    #[test]
    fn test_missing_track() {
        let mut buffer = [Edge::default(); 4];
        let mut job: TriggeringJob = TriggeringJob::new()
            .with_range(0.0, 1.0)
            .with_output(&mut buffer);
        assert!(!job.validate());
        assert_eq!(
            job.run(),
            Err(TriggeringError::InvalidJob(InvalidJobReason::MissingTrack))
        );
    }

    #[test]
    fn test_missing_output() {
        let track = ramp_track();
        let mut job = TriggeringJob::new()
            .with_range(0.0, 1.0)
            .with_track(&track);
        assert!(!job.validate());
        assert_eq!(
            job.run(),
            Err(TriggeringError::InvalidJob(InvalidJobReason::MissingOutput))
        );
        // Iterating does not need an output
        assert_eq!(job.iter().unwrap().count(), 2);
    }

    #[test]
    fn test_non_finite_inputs() {
        let track = ramp_track();
        let mut buffer = [Edge::default(); 4];

        let mut job = TriggeringJob::new()
            .with_range(0.0, f64::INFINITY)
            .with_track(&track)
            .with_output(&mut buffer);
        assert!(!job.validate());
        assert_eq!(
            job.run(),
            Err(TriggeringError::InvalidJob(InvalidJobReason::NonFiniteRange))
        );

        job.to = 1.0;
        job.threshold = f64::NAN;
        assert_eq!(
            job.run(),
            Err(TriggeringError::InvalidJob(
                InvalidJobReason::NonFiniteThreshold
            ))
        );

        job.threshold = 0.5;
        assert!(job.validate());
    }

    #[test]
    fn test_range_beyond_countable_cycles() {
        let track = ramp_track();
        let mut buffer = [Edge::default(); 4];
        let mut job = TriggeringJob::new()
            .with_range(MAX_TIME, MAX_TIME + 4.0)
            .with_threshold(2.0)
            .with_track(&track)
            .with_output(&mut buffer);
        assert!(!job.validate());
        assert_eq!(
            job.run(),
            Err(TriggeringError::InvalidJob(InvalidJobReason::RangeTooLarge))
        );
        assert!(job.iter().is_err());

        job.from = 0.0;
        job.to = -MAX_TIME;
        assert_eq!(
            job.run(),
            Err(TriggeringError::InvalidJob(InvalidJobReason::RangeTooLarge))
        );

        // Checked before the empty-range shortcut.
        job.from = MAX_TIME;
        job.to = MAX_TIME;
        assert!(job.run().is_err());
    }

    #[test]
    fn test_large_range_below_limit_runs() {
        let track = ramp_track();
        let mut buffer = [Edge::default(); 8];
        let mut job = TriggeringJob::new()
            .with_range(MAX_TIME - 4.0, MAX_TIME - 1.0)
            .with_threshold(2.0)
            .with_track(&track)
            .with_output(&mut buffer);
        assert!(job.validate());
        assert_eq!(job.run(), Ok(0));
    }

    #[test]
    fn test_empty_range() {
        let track = ramp_track();
        let mut buffer = [Edge::default(); 0];
        let mut job = TriggeringJob::new()
            .with_range(0.5, 0.5)
            .with_threshold(0.5)
            .with_track(&track)
            .with_output(&mut buffer);
        assert_eq!(job.run(), Ok(0));
    }

    #[test]
    fn test_run_writes_prefix() {
        let track = ramp_track();
        let mut buffer = [Edge::default(); 5];
        let count = {
            let mut job = TriggeringJob::new()
                .with_range(0.0, 1.0)
                .with_threshold(0.5)
                .with_track(&track)
                .with_output(&mut buffer);
            job.run().unwrap()
        };
        assert_eq!(count, 2);
        assert_eq!(
            &buffer[..count],
            &[Edge::rising(0.125), Edge::falling(0.625)]
        );
    }

    #[test]
    fn test_overflow() {
        let track = ramp_track();
        let mut buffer = [Edge::default(); 3];
        let mut job = TriggeringJob::new()
            .with_range(0.0, 2.0)
            .with_threshold(0.5)
            .with_track(&track)
            .with_output(&mut buffer);
        assert_eq!(
            job.run(),
            Err(TriggeringError::Overflow { capacity: 3 })
        );
    }

    #[test]
    fn test_exact_capacity_succeeds() {
        let track = ramp_track();
        let mut buffer = [Edge::default(); 4];
        let mut job = TriggeringJob::new()
            .with_range(0.0, 2.0)
            .with_threshold(0.5)
            .with_track(&track)
            .with_output(&mut buffer);
        assert_eq!(job.triggered_edges().unwrap().len(), 4);
    }

    #[test]
    fn test_rerun_is_stable() {
        let track = ramp_track();
        let mut buffer = [Edge::default(); 4];
        let mut job = TriggeringJob::new()
            .with_range(1.0, 0.0)
            .with_threshold(0.5)
            .with_track(&track)
            .with_output(&mut buffer);
        let first = job.triggered_edges().unwrap().to_vec();
        let second = job.triggered_edges().unwrap().to_vec();
        assert_eq!(first, second);
        assert_eq!(first, [Edge::rising(0.625), Edge::falling(0.125)]);
    }

    #[test]
    fn test_works_with_unsized_track() {
        let track = ramp_track();
        let dyn_track: &dyn Track = &track;
        let mut buffer = [Edge::default(); 2];
        let mut job = TriggeringJob::new()
            .with_range(0.0, 1.0)
            .with_threshold(0.5)
            .with_track(dyn_track)
            .with_output(&mut buffer);
        assert_eq!(job.run(), Ok(2));
    }
}
