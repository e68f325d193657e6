//! Error types for track construction and edge triggering.

use thiserror::Error;

/// Errors raised while building a [`FloatTrack`](crate::FloatTrack).
#[derive(Debug, Error)]
pub enum TrackError {
    /// A track needs at least one keyframe.
    #[error("track has no keyframes")]
    Empty,

    /// A keyframe time is not finite or falls outside the `[0, 1)` cycle.
    #[error("keyframe {index} has time {time}, expected a value in [0, 1)")]
    TimeOutOfRange { index: usize, time: f64 },

    /// A keyframe time is not strictly greater than the previous one.
    #[error("keyframe {index} is not strictly after the previous keyframe")]
    UnsortedKeyframes { index: usize },

    /// A keyframe value is NaN or infinite.
    #[error("keyframe {index} has a non-finite value")]
    NonFiniteValue { index: usize },
}

/// Why a [`TriggeringJob`](crate::TriggeringJob) failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidJobReason {
    #[error("no track to sample")]
    MissingTrack,

    #[error("no output buffer")]
    MissingOutput,

    #[error("time range is not finite")]
    NonFiniteRange,

    /// A bound reaches [`MAX_TIME`](crate::MAX_TIME) in magnitude, where
    /// whole cycles can no longer be counted.
    #[error("time range exceeds the countable cycle range")]
    RangeTooLarge,

    #[error("threshold is not finite")]
    NonFiniteThreshold,
}

/// Errors returned by [`TriggeringJob::run`](crate::TriggeringJob::run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TriggeringError {
    /// The job configuration was rejected before any work started.
    #[error("invalid triggering job: {0}")]
    InvalidJob(InvalidJobReason),

    /// More edges were found than the output buffer can hold.
    ///
    /// The buffer content is unspecified after this error.
    #[error("output buffer overflow, capacity is {capacity} edges")]
    Overflow { capacity: usize },
}
