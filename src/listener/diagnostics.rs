//! Packet-loss observability for a listening context

use tracing::warn;

/// Tracks AVBTP sequence numbers across every packet a listening context
/// accepts, surfacing loss without touching per-stream state.
///
/// Replaces a hidden process-wide counter: the caller owns one of these per
/// listening context, so multiple listeners stay independent and testable.
/// Pass it to [`process_packet`] when loss accounting is wanted; pass
/// `None` to disable the hook entirely.
///
/// [`process_packet`]: super::process_packet
#[derive(Debug, Default)]
pub struct SequenceDiagnostics {
    last_seq: Option<u8>,
    packets_observed: u64,
    gaps_detected: u64,
    packets_lost: u64,
}

/// Snapshot of loss counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceStats {
    /// Validated packets observed
    pub packets_observed: u64,
    /// Discontinuities detected
    pub gaps_detected: u64,
    /// Packets missed across all gaps
    pub packets_lost: u64,
}

impl SequenceDiagnostics {
    /// Create a tracker with no baseline
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one validated packet's sequence number.
    ///
    /// Returns the number of packets missed when the sequence did not
    /// advance by exactly one (mod 256). The first observation establishes
    /// the baseline and never reports a gap. A repeated sequence number
    /// reports 255 — at this field width it is indistinguishable from a
    /// 255-packet gap.
    pub fn record(&mut self, sequence: u8, timestamp: u32) -> Option<u8> {
        self.packets_observed += 1;

        let gap = self.last_seq.and_then(|last| {
            let advance = sequence.wrapping_sub(last);
            (advance != 1).then(|| advance.wrapping_sub(1))
        });
        self.last_seq = Some(sequence);

        if let Some(missed) = gap {
            self.gaps_detected += 1;
            self.packets_lost += u64::from(missed);
            warn!(sequence, missed, timestamp, "sequence discontinuity");
        }

        gap
    }

    /// Current counters
    #[must_use]
    pub fn stats(&self) -> SequenceStats {
        SequenceStats {
            packets_observed: self.packets_observed,
            gaps_detected: self.gaps_detected,
            packets_lost: self.packets_lost,
        }
    }

    /// Drop the baseline and zero all counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
