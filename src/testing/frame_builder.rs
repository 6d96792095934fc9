//! Synthetic AVB frame construction

use crate::protocol::{AvtpStreamHeader, CipHeader, EthernetHeader, constants};

/// Builds bit-exact IEEE 1722 / 61883-6 audio frames for tests and docs.
///
/// Defaults produce a valid, untagged stream data packet (version 0, sv
/// set, tv clear) with an empty payload; every header field the validator
/// inspects can be overridden to produce malformed frames. This only
/// renders bytes — there is no pacing, no transmit path.
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    vlan: bool,
    control: bool,
    version: u8,
    stream_valid: bool,
    sequence: u8,
    timestamp: Option<u32>,
    stream_id: u64,
    dbc: u8,
    dbs: u8,
    fdf: u8,
    syt: u16,
    samples: Vec<u32>,
    data_length: Option<u16>,
}

impl FrameBuilder {
    /// Start from a valid two-channel 48 kHz-nominal data packet
    #[must_use]
    pub fn new() -> Self {
        Self {
            vlan: false,
            control: false,
            version: 0,
            stream_valid: true,
            sequence: 0,
            timestamp: None,
            stream_id: 0x91E0_F000_0E80_0001,
            dbc: 0,
            dbs: 2,
            fdf: 0x02,
            syt: 0xFFFF,
            samples: Vec::new(),
            data_length: None,
        }
    }

    /// Insert an 802.1Q VLAN tag
    #[must_use]
    pub fn vlan_tagged(mut self, tagged: bool) -> Self {
        self.vlan = tagged;
        self
    }

    /// Set the cd bit (control rather than stream data)
    #[must_use]
    pub fn control_packet(mut self, control: bool) -> Self {
        self.control = control;
        self
    }

    /// Override the AVBTP version field
    #[must_use]
    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    /// Set or clear the sv flag
    #[must_use]
    pub fn stream_valid(mut self, valid: bool) -> Self {
        self.stream_valid = valid;
        self
    }

    /// Sequence number
    #[must_use]
    pub fn sequence(mut self, sequence: u8) -> Self {
        self.sequence = sequence;
        self
    }

    /// Set the presentation timestamp and the tv flag
    #[must_use]
    pub fn timestamp(mut self, timestamp: u32) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Stream identifier
    #[must_use]
    pub fn stream_id(mut self, stream_id: u64) -> Self {
        self.stream_id = stream_id;
        self
    }

    /// Data block count
    #[must_use]
    pub fn dbc(mut self, dbc: u8) -> Self {
        self.dbc = dbc;
        self
    }

    /// CIP data block size (quadlets per sample frame)
    #[must_use]
    pub fn dbs(mut self, dbs: u8) -> Self {
        self.dbs = dbs;
        self
    }

    /// CIP format dependent field
    #[must_use]
    pub fn fdf(mut self, fdf: u8) -> Self {
        self.fdf = fdf;
        self
    }

    /// CIP SYT field
    #[must_use]
    pub fn syt(mut self, syt: u16) -> Self {
        self.syt = syt;
        self
    }

    /// Interleaved payload sample slots
    #[must_use]
    pub fn samples(mut self, samples: &[u32]) -> Self {
        self.samples = samples.to_vec();
        self
    }

    /// Override the stream data length instead of computing it from the
    /// payload (for malformed-length frames)
    #[must_use]
    pub fn data_length(mut self, length: u16) -> Self {
        self.data_length = Some(length);
        self
    }

    /// Render the frame
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "test payloads stay far below the u16 data-length range"
    )]
    pub fn build(&self) -> Vec<u8> {
        let eth_len = if self.vlan {
            EthernetHeader::TAGGED_LEN
        } else {
            EthernetHeader::UNTAGGED_LEN
        };
        let mut frame = Vec::with_capacity(
            eth_len + AvtpStreamHeader::SIZE + CipHeader::SIZE + self.samples.len() * 4,
        );

        // Ethernet: AVB multicast destination, locally administered source
        frame.extend_from_slice(&[0x91, 0xE0, 0xF0, 0x00, 0x0E, 0x80]);
        frame.extend_from_slice(&[0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
        if self.vlan {
            // TPID + TCI (priority 3, VID 2)
            frame.extend_from_slice(&[0x81, 0x00, 0x60, 0x02]);
        }
        frame.extend_from_slice(&constants::ETHERTYPE_AVTP.to_be_bytes());

        // AVBTP stream header
        let cd = u8::from(self.control) << 7;
        frame.push(cd | constants::SUBTYPE_61883);
        let sv = u8::from(self.stream_valid) << 7;
        let tv = u8::from(self.timestamp.is_some());
        frame.push(sv | ((self.version & 0x07) << 4) | tv);
        frame.push(self.sequence);
        frame.push(0x00);
        frame.extend_from_slice(&self.stream_id.to_be_bytes());
        frame.extend_from_slice(&self.timestamp.unwrap_or(0).to_be_bytes());
        frame.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // gateway_info
        let data_length = self.data_length.unwrap_or_else(|| {
            (constants::CIP_OVERHEAD + self.samples.len() * constants::BYTES_PER_SAMPLE) as u16
        });
        frame.extend_from_slice(&data_length.to_be_bytes());
        frame.push(0x5F); // tag 01 (CIP header present), channel 31
        frame.push(0xA0); // tcode 0xA

        // CIP header
        frame.push(0x3F); // qi 00, sid 63
        frame.push(self.dbs);
        frame.push(0x00);
        frame.push(self.dbc);
        frame.push(0x80 | constants::FMT_61883_6);
        frame.push(self.fdf);
        frame.extend_from_slice(&self.syt.to_be_bytes());

        // Interleaved big-endian sample slots
        for sample in &self.samples {
            frame.extend_from_slice(&sample.to_be_bytes());
        }

        frame
    }
}

impl Default for FrameBuilder {
    fn default() -> Self {
        Self::new()
    }
}
