//! Edge values and the capped output writer.

use crate::error::TriggeringError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A threshold crossing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    /// Absolute (unwrapped) time of the crossing.
    pub time: f64,
    /// `true` if the value goes from at-or-below the threshold to above it,
    /// seen in the direction of the query.
    pub rising: bool,
}

impl Edge {
    /// Creates a rising edge at `time`.
    pub fn rising(time: f64) -> Self {
        Self { time, rising: true }
    }

    /// Creates a falling edge at `time`.
    pub fn falling(time: f64) -> Self {
        Self {
            time,
            rising: false,
        }
    }
}

/// Writes edges into a caller-owned, fixed-capacity slice.
///
/// Writing never allocates. Once the slice is full, [`push`](EdgeWriter::push)
/// reports [`TriggeringError::Overflow`] instead of growing.
///
/// # Examples
///
/// ```
/// use tripwire::{Edge, EdgeWriter, TriggeringError};
///
/// let mut slots = [Edge::default(); 1];
/// let mut writer = EdgeWriter::new(&mut slots);
///
/// writer.push(Edge::rising(0.25))?;
/// assert_eq!(
///     writer.push(Edge::falling(0.5)),
///     Err(TriggeringError::Overflow { capacity: 1 })
/// );
/// assert_eq!(writer.into_written(), &[Edge::rising(0.25)]);
/// # Ok::<(), TriggeringError>(())
/// ```
#[derive(Debug)]
pub struct EdgeWriter<'a> {
    slots: &'a mut [Edge],
    len: usize,
}

impl<'a> EdgeWriter<'a> {
    /// Creates an empty writer over `slots`.
    pub fn new(slots: &'a mut [Edge]) -> Self {
        Self { slots, len: 0 }
    }

    /// Appends an edge to the next free slot.
    ///
    /// # Errors
    ///
    /// Returns [`TriggeringError::Overflow`] if every slot is already written.
    pub fn push(&mut self, edge: Edge) -> Result<(), TriggeringError> {
        let capacity = self.slots.len();
        let slot = self
            .slots
            .get_mut(self.len)
            .ok_or(TriggeringError::Overflow { capacity })?;
        *slot = edge;
        self.len += 1;
        Ok(())
    }

    /// Number of written edges.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Forgets written edges. Slot contents are left untouched.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// The written prefix.
    pub fn as_slice(&self) -> &[Edge] {
        &self.slots[..self.len]
    }

    /// Consumes the writer, returning the written prefix of the slots.
    pub fn into_written(self) -> &'a [Edge] {
        let Self { slots, len } = self;
        &slots[..len]
    }
}
