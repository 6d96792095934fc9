//! Testing utilities
//!
//! Tools for exercising the pipeline without a network or a playback
//! subsystem: [`FrameBuilder`] renders bit-exact 1722/61883-6 frames and
//! [`RecordingBank`] captures everything the processor hands to the output
//! FIFOs.

mod frame_builder;
mod recording;


pub use frame_builder::FrameBuilder;
pub use recording::{FifoRecord, RecordingBank};
