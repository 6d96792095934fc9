//! Recording implementation of the output FIFO interface

use crate::audio::{AudioOutputBank, FifoHandle, StridedSamples};

/// Everything the processor handed to one FIFO.
#[derive(Debug, Clone, Default)]
pub struct FifoRecord {
    /// `(timestamp, sample_offset)` pairs from timestamp registration
    pub timestamps: Vec<(u32, u32)>,
    /// Maintenance invocations
    pub maintain_calls: u32,
    /// Samples pushed, in order
    pub samples: Vec<u32>,
}

/// [`AudioOutputBank`] that records every call for assertions.
///
/// Maintenance emulates a consumer that wants waking on every packet, so
/// tests can verify the wake signal is coalesced across channels.
#[derive(Debug, Default)]
pub struct RecordingBank {
    fifos: Vec<FifoRecord>,
    /// Wake signals actually sent (at most one per packet when callers
    /// thread the notified flag correctly)
    pub wakes_sent: u32,
}

impl RecordingBank {
    /// Create a bank of `fifo_count` empty FIFOs
    #[must_use]
    pub fn new(fifo_count: usize) -> Self {
        Self {
            fifos: vec![FifoRecord::default(); fifo_count],
            wakes_sent: 0,
        }
    }

    /// The record for one FIFO
    ///
    /// # Panics
    ///
    /// Panics if the handle is outside the bank.
    #[must_use]
    pub fn fifo(&self, handle: FifoHandle) -> &FifoRecord {
        &self.fifos[handle.index()]
    }

    fn fifo_mut(&mut self, handle: FifoHandle) -> &mut FifoRecord {
        &mut self.fifos[handle.index()]
    }
}

impl AudioOutputBank for RecordingBank {
    fn set_presentation_timestamp(&mut self, fifo: FifoHandle, timestamp: u32, sample_offset: u32) {
        self.fifo_mut(fifo).timestamps.push((timestamp, sample_offset));
    }

    fn maintain(&mut self, fifo: FifoHandle, notified: &mut bool) {
        self.fifo_mut(fifo).maintain_calls += 1;
        if !*notified {
            self.wakes_sent += 1;
            *notified = true;
        }
    }

    fn push_strided(&mut self, fifo: FifoHandle, samples: StridedSamples<'_>) {
        self.fifo_mut(fifo).samples.extend(samples);
    }
}
