//! Per-stream receive state and format calibration

use tracing::debug;

use crate::audio::FifoHandle;

/// Canonical sample rates of IEC 61883-6 audio streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleRate {
    /// 8 kHz
    Hz8000,
    /// 16 kHz
    Hz16000,
    /// 32 kHz
    Hz32000,
    /// 44.1 kHz (CD quality)
    Hz44100,
    /// 48 kHz (standard digital audio)
    Hz48000,
    /// 88.2 kHz
    Hz88200,
    /// 96 kHz
    Hz96000,
    /// 176.4 kHz
    Hz176400,
    /// 192 kHz
    Hz192000,
}

impl SampleRate {
    /// Map a calibration rate code — the mean samples-per-packet-per-channel
    /// observed over the lock window — to its canonical rate.
    ///
    /// Codes outside the known set mean the stream's rate could not be
    /// recognized.
    #[must_use]
    pub fn from_rate_code(code: usize) -> Option<Self> {
        match code {
            1 => Some(SampleRate::Hz8000),
            2 => Some(SampleRate::Hz16000),
            4 => Some(SampleRate::Hz32000),
            5 => Some(SampleRate::Hz44100),
            6 => Some(SampleRate::Hz48000),
            11 => Some(SampleRate::Hz88200),
            12 => Some(SampleRate::Hz96000),
            24 => Some(SampleRate::Hz192000),
            _ => None,
        }
    }

    /// Rate in Hz
    #[must_use]
    pub fn as_hz(self) -> u32 {
        match self {
            SampleRate::Hz8000 => 8000,
            SampleRate::Hz16000 => 16000,
            SampleRate::Hz32000 => 32000,
            SampleRate::Hz44100 => 44100,
            SampleRate::Hz48000 => 48000,
            SampleRate::Hz88200 => 88200,
            SampleRate::Hz96000 => 96000,
            SampleRate::Hz176400 => 176400,
            SampleRate::Hz192000 => 192000,
        }
    }

    /// Data blocks between embedded presentation timestamps (IEC 61883-6).
    ///
    /// Always a power of two.
    #[must_use]
    pub fn syt_interval(self) -> u8 {
        match self {
            SampleRate::Hz8000 => 1,
            SampleRate::Hz16000 => 2,
            SampleRate::Hz32000 | SampleRate::Hz44100 | SampleRate::Hz48000 => 8,
            SampleRate::Hz88200 | SampleRate::Hz96000 => 16,
            SampleRate::Hz176400 | SampleRate::Hz192000 => 32,
        }
    }
}

/// Calibration state of the stream parameter learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Calibration {
    /// Channel count and rate still being inferred
    Unlocked {
        /// Consecutive packets consistent with the current channel estimate
        streak: u8,
        /// Sum of payload sample counts over the streak
        rate_accumulator: usize,
    },
    /// Parameters frozen until an external reset
    Locked {
        /// Inferred rate; `None` when the rate code was unrecognized
        rate: Option<SampleRate>,
    },
}

/// State record for one listened stream.
///
/// Created by the stream lifecycle manager before the first packet arrives
/// and mutated only by [`process_packet`]. The caller serializes packet
/// delivery per stream; nothing here is shared across streams.
///
/// [`process_packet`]: super::process_packet
#[derive(Debug)]
pub struct StreamInfo {
    /// Logical channel index -> output FIFO; `None` = channel not wired
    channel_map: Vec<Option<FifoHandle>>,
    /// Last observed data block count
    last_dbc: u8,
    /// Sample-slot count carried by the previous packet
    prev_payload_samples: usize,
    /// Learner's estimate of channels present in the payload (0 = none yet)
    payload_channels: usize,
    calibration: Calibration,
}

impl StreamInfo {
    /// Consecutive consistent packets required to lock
    pub const LOCK_THRESHOLD: u8 = 16;

    /// Create zero-initialized state for a stream whose channels map to the
    /// given output FIFOs. The map's length is the configured channel count
    /// and is never resized here.
    #[must_use]
    pub fn new(channel_map: Vec<Option<FifoHandle>>) -> Self {
        Self {
            channel_map,
            last_dbc: 0,
            prev_payload_samples: 0,
            payload_channels: 0,
            calibration: Calibration::Unlocked {
                streak: 0,
                rate_accumulator: 0,
            },
        }
    }

    /// Configured channel count (length of the output map)
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channel_map.len()
    }

    /// The channel-to-FIFO map
    #[must_use]
    pub fn channel_map(&self) -> &[Option<FifoHandle>] {
        &self.channel_map
    }

    /// Output FIFO for a logical channel, `None` if unwired or out of range
    #[must_use]
    pub fn channel_output(&self, channel: usize) -> Option<FifoHandle> {
        self.channel_map.get(channel).copied().flatten()
    }

    /// Last observed data block count
    #[must_use]
    pub fn last_dbc(&self) -> u8 {
        self.last_dbc
    }

    /// Learner's current payload channel estimate (0 while none)
    #[must_use]
    pub fn payload_channels(&self) -> usize {
        self.payload_channels
    }

    /// Current calibration state
    #[must_use]
    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    /// Whether stream parameters are locked
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self.calibration, Calibration::Locked { .. })
    }

    /// Inferred sample rate; `None` while unlocked or when the rate code
    /// was unrecognized at lock time
    #[must_use]
    pub fn sample_rate(&self) -> Option<SampleRate> {
        match self.calibration {
            Calibration::Locked { rate } => rate,
            Calibration::Unlocked { .. } => None,
        }
    }

    /// Update the DBC tracker, returning the delta from the previous packet
    /// normalized mod 256.
    pub fn track_dbc(&mut self, dbc: u8) -> u8 {
        let diff = dbc.wrapping_sub(self.last_dbc);
        self.last_dbc = dbc;
        diff
    }

    /// Record the current packet's payload sample count, returning the
    /// previous packet's.
    pub fn note_payload_samples(&mut self, samples: usize) -> usize {
        std::mem::replace(&mut self.prev_payload_samples, samples)
    }

    /// Run one learner transition while unlocked; no-op once locked.
    ///
    /// `prev_samples` is the *previous* packet's sample count and
    /// `dbc_diff` the *current* packet's DBC delta. One data block is one
    /// sample frame across all channels, so their quotient is the payload
    /// channel count. The one-packet lag between the two inputs is part of
    /// the calibration contract; steady streams repeat the same pair every
    /// packet.
    pub fn calibrate(&mut self, prev_samples: usize, dbc_diff: u8, samples_in_payload: usize) {
        let Calibration::Unlocked {
            mut streak,
            mut rate_accumulator,
        } = self.calibration
        else {
            return;
        };

        // Nothing to infer from the first packet or a zero delta.
        if prev_samples == 0 || dbc_diff == 0 {
            return;
        }

        let candidate = prev_samples / usize::from(dbc_diff);
        if self.payload_channels == 0 || self.payload_channels != candidate {
            debug!(
                previous = self.payload_channels,
                candidate, "payload channel estimate changed"
            );
            self.payload_channels = candidate;
            streak = 0;
            rate_accumulator = 0;
        }

        rate_accumulator += samples_in_payload;
        streak += 1;

        if streak == Self::LOCK_THRESHOLD {
            let code = rate_accumulator / self.payload_channels / usize::from(Self::LOCK_THRESHOLD);
            let rate = SampleRate::from_rate_code(code);
            debug!(
                channels = self.payload_channels,
                code,
                rate_hz = rate.map_or(0, SampleRate::as_hz),
                "stream parameters locked"
            );
            self.calibration = Calibration::Locked { rate };
        } else {
            self.calibration = Calibration::Unlocked {
                streak,
                rate_accumulator,
            };
        }
    }

    /// Reinitialize the learner so the stream re-calibrates from scratch.
    ///
    /// This is the external reset that unfreezes a locked stream; the
    /// channel map is left untouched.
    pub fn reset(&mut self) {
        self.last_dbc = 0;
        self.prev_payload_samples = 0;
        self.payload_channels = 0;
        self.calibration = Calibration::Unlocked {
            streak: 0,
            rate_accumulator: 0,
        };
    }
}
