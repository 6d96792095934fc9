//! Ethernet header sizing for AVB frames

use super::FrameError;

/// View over the Ethernet header at the start of a received frame.
///
/// AVB frames arrive either untagged (14-byte header) or carrying a single
/// 802.1Q VLAN tag (18 bytes). The tag is detected from the marker byte at
/// offset 12 — the first byte of the 0x8100 TPID — which is all the
/// listener needs to locate the transport header.
#[derive(Debug, Clone, Copy)]
pub struct EthernetHeader<'a> {
    buf: &'a [u8],
    tagged: bool,
}

impl<'a> EthernetHeader<'a> {
    /// Header size without a VLAN tag
    pub const UNTAGGED_LEN: usize = 14;
    /// Header size with one VLAN tag
    pub const TAGGED_LEN: usize = 18;
    /// First byte of the 802.1Q TPID
    pub const VLAN_TAG_MARKER: u8 = 0x81;

    const VLAN_TAG_OFFSET: usize = 12;

    /// Wrap the start of `frame`, detecting the VLAN tag.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::TooShort`] if the frame cannot hold the header.
    pub fn parse(frame: &'a [u8]) -> Result<Self, FrameError> {
        if frame.len() < Self::UNTAGGED_LEN {
            return Err(FrameError::TooShort {
                needed: Self::UNTAGGED_LEN,
                have: frame.len(),
            });
        }

        let tagged = frame[Self::VLAN_TAG_OFFSET] == Self::VLAN_TAG_MARKER;
        if tagged && frame.len() < Self::TAGGED_LEN {
            return Err(FrameError::TooShort {
                needed: Self::TAGGED_LEN,
                have: frame.len(),
            });
        }

        Ok(Self { buf: frame, tagged })
    }

    /// Whether the frame carries an 802.1Q VLAN tag
    #[must_use]
    pub fn is_vlan_tagged(&self) -> bool {
        self.tagged
    }

    /// Total header length: 14 bytes, or 18 when tagged
    #[must_use]
    pub fn header_len(&self) -> usize {
        if self.tagged {
            Self::TAGGED_LEN
        } else {
            Self::UNTAGGED_LEN
        }
    }

    /// Destination MAC address
    #[must_use]
    pub fn destination(&self) -> [u8; 6] {
        [
            self.buf[0],
            self.buf[1],
            self.buf[2],
            self.buf[3],
            self.buf[4],
            self.buf[5],
        ]
    }

    /// Ethertype, read from after the VLAN tag when one is present
    #[must_use]
    pub fn ethertype(&self) -> u16 {
        let offset = if self.tagged { 16 } else { 12 };
        u16::from_be_bytes([self.buf[offset], self.buf[offset + 1]])
    }
}
