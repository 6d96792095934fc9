//! # avb1722
//!
//! Listener-side packet processing for IEEE 1722 (AVB Transport Protocol)
//! audio streams carrying IEC 61883-6 (CIP) payloads.
//!
//! ## Features
//!
//! - AVBTP/CIP header validation with cheap rejection of foreign traffic
//! - Data-block-count (DBC) continuity tracking, wrapping mod 256
//! - Stream parameter auto-discovery: payload channel count and sample rate
//!   inferred from payload geometry over a 16-packet confidence window
//! - Presentation-timestamp to sample-index mapping (61883-6 SYT intervals)
//! - Strided distribution of interleaved samples to per-channel output FIFOs
//! - Optional packet-loss diagnostics across a listening context
//!
//! ## Example
//!
//! ```rust
//! use avb1722::{FifoHandle, StreamInfo, process_packet};
//! use avb1722::testing::{FrameBuilder, RecordingBank};
//!
//! // One stream, two channels wired to FIFOs 0 and 1.
//! let map = vec![Some(FifoHandle::new(0)), Some(FifoHandle::new(1))];
//! let mut stream = StreamInfo::new(map);
//! let mut outputs = RecordingBank::new(2);
//! let mut notified = false;
//!
//! let frame = FrameBuilder::new()
//!     .dbc(4)
//!     .samples(&[0x0040_0001, 0x0040_0002, 0x0040_0003, 0x0040_0004])
//!     .build();
//! let outcome = process_packet(&mut stream, &frame, &mut outputs, &mut notified, None);
//! assert!(!outcome.is_delivered()); // still calibrating
//! ```
//!
//! # Architecture
//!
//! Each received frame flows through four sequential stages, run to
//! completion with no suspension point:
//!
//! 1. **Header validation** — is this a well-formed AVBTP/CIP audio data
//!    packet for us?
//! 2. **Continuity tracking** — DBC delta and payload sample count
//! 3. **Parameter learning** — while unlocked, infer channel count and rate
//! 4. **Sample distribution** — once locked, register timestamps and push
//!    samples to the output FIFOs
//!
//! Stages 3 and 4 are mutually exclusive per packet: a frame either feeds
//! calibration or delivers audio, never both. The caller owns the receive
//! loop and serializes packets per stream.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Audio output FIFO interface
pub mod audio;
/// Stream state and the per-packet pipeline
pub mod listener;
/// Wire-format header views
pub mod protocol;
/// Testing utilities
pub mod testing;

// Re-exports
pub use audio::{AudioOutputBank, FifoHandle, StridedSamples};
pub use listener::{
    Calibration, PacketOutcome, SampleRate, SequenceDiagnostics, SequenceStats, StreamInfo,
    process_packet,
};
pub use protocol::{AvtpStreamHeader, CipHeader, EthernetHeader, FrameError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
