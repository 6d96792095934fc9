//! Wire-format views over IEEE 1722 audio frames
//!
//! Each header type wraps a borrowed byte slice and exposes named accessors
//! at the bit-exact offsets of the wire format. Bounds are validated once at
//! parse time; semantic checks (version, discriminator, flags) belong to the
//! pipeline's validation stage.

mod avtp;
mod cip;
mod ethernet;

#[cfg(test)]
mod avtp_tests;
#[cfg(test)]
mod ethernet_tests;

pub use avtp::AvtpStreamHeader;
pub use cip::CipHeader;
pub use ethernet::EthernetHeader;

use thiserror::Error;

/// Errors from the fixed-layout header views
#[derive(Debug, Error)]
pub enum FrameError {
    /// The frame cannot hold the region a header view needs
    #[error("frame too short: need {needed} bytes, have {have}")]
    TooShort {
        /// Bytes the view requires
        needed: usize,
        /// Bytes the frame actually holds
        have: usize,
    },
}

/// Protocol constants for AVB audio streams
pub mod constants {
    /// Ethertype carried by AVTP frames
    pub const ETHERTYPE_AVTP: u16 = 0x22F0;

    /// AVTP subtype for IEC 61883/IIDC encapsulation
    pub const SUBTYPE_61883: u8 = 0x00;

    /// CIP `fmt` value for 61883-6 audio and music data
    pub const FMT_61883_6: u8 = 0x10;

    /// Bytes of CIP framing included in the stream data length
    pub const CIP_OVERHEAD: usize = 8;

    /// Bytes per interleaved sample slot (one AM824 quadlet)
    pub const BYTES_PER_SAMPLE: usize = 4;
}
