//! The per-packet decoding pipeline

use tracing::trace;

use super::{SequenceDiagnostics, StreamInfo};
use crate::audio::{AudioOutputBank, StridedSamples};
use crate::protocol::{AvtpStreamHeader, CipHeader, EthernetHeader, constants};

/// Outcome of processing one received frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketOutcome {
    /// Not a well-formed in-scope audio data packet; no state was touched
    Rejected,
    /// Accepted and used for parameter learning; no samples delivered
    Calibrating,
    /// Accepted; samples were distributed to the output FIFOs
    Delivered,
}

impl PacketOutcome {
    /// Whether the packet produced audio for the output subsystem
    #[must_use]
    pub fn is_delivered(self) -> bool {
        matches!(self, PacketOutcome::Delivered)
    }
}

/// Process one received frame for `stream`.
///
/// Runs the four pipeline stages to completion: header validation, DBC
/// continuity tracking, parameter learning (while unlocked) and sample
/// distribution (once locked). Learning and distribution are mutually
/// exclusive per packet.
///
/// `notified` coalesces output-consumer wake signals across the channels of
/// this packet; the caller clears it per its own signaling protocol. Pass a
/// [`SequenceDiagnostics`] context to account packet loss across the whole
/// listening context, or `None` to disable the hook.
///
/// Malformed and foreign frames are expected high-frequency traffic: they
/// are filtered with [`PacketOutcome::Rejected`] and never escalate to an
/// error. A length-sufficient frame that passes the header checks is
/// trusted; garbage in such a frame produces garbage samples by contract.
pub fn process_packet<B>(
    stream: &mut StreamInfo,
    frame: &[u8],
    outputs: &mut B,
    notified: &mut bool,
    diagnostics: Option<&mut SequenceDiagnostics>,
) -> PacketOutcome
where
    B: AudioOutputBank + ?Sized,
{
    // Stage 1: header validation.
    let Ok(eth) = EthernetHeader::parse(frame) else {
        return PacketOutcome::Rejected;
    };
    let avtp_offset = eth.header_len();
    let payload_offset = avtp_offset + AvtpStreamHeader::SIZE + CipHeader::SIZE;
    if frame.len() <= payload_offset {
        trace!(len = frame.len(), "frame too short for an audio payload");
        return PacketOutcome::Rejected;
    }
    let Ok(avtp) = AvtpStreamHeader::parse(frame, avtp_offset) else {
        return PacketOutcome::Rejected;
    };
    let Ok(cip) = CipHeader::parse(frame, avtp_offset + AvtpStreamHeader::SIZE) else {
        return PacketOutcome::Rejected;
    };
    if avtp.version() != 0 {
        trace!(version = avtp.version(), "unsupported AVBTP version");
        return PacketOutcome::Rejected;
    }
    if avtp.is_control() {
        return PacketOutcome::Rejected;
    }
    if !avtp.stream_valid() {
        return PacketOutcome::Rejected;
    }

    // Loss accounting is independent of per-stream state.
    if let Some(diag) = diagnostics {
        diag.record(avtp.sequence_num(), avtp.timestamp());
    }

    // Stage 2: continuity tracking. DBC and payload-count state advance on
    // every validated packet, locked or not.
    let dbc = cip.dbc();
    let dbc_diff = stream.track_dbc(dbc);
    let data_len = usize::from(avtp.stream_data_length());
    let samples_in_payload =
        data_len.saturating_sub(constants::CIP_OVERHEAD) / constants::BYTES_PER_SAMPLE;
    let prev_samples = stream.note_payload_samples(samples_in_payload);

    // Stage 3: parameter learning. No audio leaves the core while unlocked.
    if !stream.is_locked() {
        stream.calibrate(prev_samples, dbc_diff, samples_in_payload);
        return PacketOutcome::Calibrating;
    }

    // Stage 4: sample distribution.
    if avtp.timestamp_valid() {
        if let Some(rate) = stream.sample_rate() {
            // 61883-6 section 6.2: the timestamp refers to data block
            // (SYT_INTERVAL - dbc % SYT_INTERVAL) % SYT_INTERVAL of the
            // group; the interval is a power of two so the masks suffice.
            let syt_interval = rate.syt_interval();
            let sample_offset = (syt_interval - (dbc & (syt_interval - 1))) & (syt_interval - 1);
            for &fifo in stream.channel_map().iter().flatten() {
                outputs.set_presentation_timestamp(
                    fifo,
                    avtp.timestamp(),
                    u32::from(sample_offset),
                );
            }
        }
        // An unrecognized rate only loses timing metadata; the audio below
        // still flows.
    }

    for &fifo in stream.channel_map().iter().flatten() {
        outputs.maintain(fifo, notified);
    }

    // Interleaved slots follow the CIP header; bound the payload by both
    // the declared data length and the bytes actually received.
    let declared = samples_in_payload * constants::BYTES_PER_SAMPLE;
    let available = frame.len() - payload_offset;
    let payload = &frame[payload_offset..payload_offset + declared.min(available)];

    let stride = stream.payload_channels();
    let deliver_channels = stream.channel_count().min(stride);
    for channel in 0..deliver_channels {
        if let Some(fifo) = stream.channel_output(channel) {
            outputs.push_strided(fifo, StridedSamples::new(payload, channel, stride));
        }
    }

    PacketOutcome::Delivered
}
