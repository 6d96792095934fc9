//! Interface to the per-channel audio output FIFO subsystem
//!
//! The packet processor's only side effects outside its own stream state go
//! through [`AudioOutputBank`]. The playback subsystem implements it and
//! owns buffering, underrun/overrun handling and output clocking; these
//! operations may be called from the packet-processing context and must be
//! safe against a concurrently draining consumer per that subsystem's own
//! contract.

/// Opaque index of one per-channel FIFO inside the output subsystem.
///
/// A stream's channel map stores `Option<FifoHandle>`; `None` marks a
/// channel that is not wired to any output and is skipped entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FifoHandle(usize);

impl FifoHandle {
    /// Create a handle for the FIFO at `index`
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The FIFO index this handle addresses
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Iterator over one channel's samples within an interleaved payload.
///
/// Yields 4-byte big-endian sample slots starting at `first_slot` and
/// stepping `stride` slots, ending at the payload boundary. Constructed by
/// the sample distributor so the output subsystem can drain a channel
/// without knowing the interleave geometry.
#[derive(Debug, Clone)]
pub struct StridedSamples<'a> {
    payload: &'a [u8],
    slot: usize,
    stride: usize,
}

impl<'a> StridedSamples<'a> {
    /// Iterate slots `first_slot, first_slot + stride, ...` of `payload`.
    ///
    /// # Panics
    ///
    /// Panics if `stride` is zero.
    #[must_use]
    pub fn new(payload: &'a [u8], first_slot: usize, stride: usize) -> Self {
        assert!(stride > 0, "stride must be non-zero");
        Self {
            payload,
            slot: first_slot,
            stride,
        }
    }
}

impl Iterator for StridedSamples<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let base = self.slot * 4;
        let bytes = self.payload.get(base..base + 4)?;
        self.slot += self.stride;
        Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.payload.len() / 4)
            .saturating_sub(self.slot)
            .div_ceil(self.stride);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for StridedSamples<'_> {}

/// Bank of per-channel audio output FIFOs owned by the playback subsystem.
pub trait AudioOutputBank {
    /// Register the presentation timestamp for the data-block group the
    /// current packet belongs to.
    ///
    /// `sample_offset` is the index within the SYT interval of the data
    /// block the timestamp refers to; together they let the output stage
    /// align the sample stream to a presentation time despite network
    /// jitter. `timestamp` is the raw 32-bit AVTP timestamp.
    fn set_presentation_timestamp(&mut self, fifo: FifoHandle, timestamp: u32, sample_offset: u32);

    /// Run per-packet buffer maintenance for one channel.
    ///
    /// `notified` coalesces consumer wake signals across the channels of a
    /// packet: an implementation that signals its consumer must set the
    /// flag, and must not signal again while it is already set.
    fn maintain(&mut self, fifo: FifoHandle, notified: &mut bool);

    /// Append one channel's samples from the current packet.
    fn push_strided(&mut self, fifo: FifoHandle, samples: StridedSamples<'_>);
}
