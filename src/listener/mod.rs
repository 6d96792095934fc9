//! Listener-side stream state and the per-packet pipeline

mod diagnostics;
mod processor;
mod stream_info;

#[cfg(test)]
mod stream_info_tests;

pub use diagnostics::{SequenceDiagnostics, SequenceStats};
pub use processor::{PacketOutcome, process_packet};
pub use stream_info::{Calibration, SampleRate, StreamInfo};
