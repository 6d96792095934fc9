//! Audio output abstractions shared with the playback subsystem

mod fifo;


pub use fifo::{AudioOutputBank, FifoHandle, StridedSamples};
