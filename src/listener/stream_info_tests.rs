use super::*;
use crate::audio::FifoHandle;

fn stereo_stream() -> StreamInfo {
    StreamInfo::new(vec![Some(FifoHandle::new(0)), Some(FifoHandle::new(1))])
}

#[test]
fn test_rate_code_mapping_is_exhaustive() {
    let known = [
        (1, 8000),
        (2, 16000),
        (4, 32000),
        (5, 44100),
        (6, 48000),
        (11, 88200),
        (12, 96000),
        (24, 192000),
    ];
    for (code, hz) in known {
        assert_eq!(SampleRate::from_rate_code(code).unwrap().as_hz(), hz);
    }
    for code in [0, 3, 7, 8, 9, 10, 13, 23, 25, 48, 1000] {
        assert_eq!(SampleRate::from_rate_code(code), None);
    }
}

#[test]
fn test_syt_intervals() {
    assert_eq!(SampleRate::Hz8000.syt_interval(), 1);
    assert_eq!(SampleRate::Hz16000.syt_interval(), 2);
    assert_eq!(SampleRate::Hz32000.syt_interval(), 8);
    assert_eq!(SampleRate::Hz44100.syt_interval(), 8);
    assert_eq!(SampleRate::Hz48000.syt_interval(), 8);
    assert_eq!(SampleRate::Hz88200.syt_interval(), 16);
    assert_eq!(SampleRate::Hz96000.syt_interval(), 16);
    assert_eq!(SampleRate::Hz176400.syt_interval(), 32);
    assert_eq!(SampleRate::Hz192000.syt_interval(), 32);
}

#[test]
fn test_dbc_delta_wraps_mod_256() {
    let mut stream = stereo_stream();
    stream.track_dbc(250);
    assert_eq!(stream.track_dbc(3), 9);
    assert_eq!(stream.last_dbc(), 3);
}

#[test]
fn test_dbc_delta_zero() {
    let mut stream = stereo_stream();
    stream.track_dbc(42);
    assert_eq!(stream.track_dbc(42), 0);
}

#[test]
fn test_candidate_is_previous_samples_over_delta() {
    let mut stream = stereo_stream();
    stream.calibrate(8, 4, 8);
    assert_eq!(stream.payload_channels(), 2);

    stream.calibrate(12, 2, 12);
    assert_eq!(stream.payload_channels(), 6);
}

#[test]
fn test_stable_estimate_never_resets_streak() {
    let mut stream = stereo_stream();
    for i in 1..=10 {
        stream.calibrate(8, 4, 8);
        assert_eq!(
            stream.calibration(),
            Calibration::Unlocked {
                streak: i,
                rate_accumulator: usize::from(i) * 8
            }
        );
    }
}

#[test]
fn test_estimate_change_resets_streak_and_accumulator() {
    let mut stream = stereo_stream();
    for _ in 0..10 {
        stream.calibrate(8, 4, 8);
    }
    stream.calibrate(8, 2, 8); // candidate 4, was 2
    assert_eq!(stream.payload_channels(), 4);
    assert_eq!(
        stream.calibration(),
        Calibration::Unlocked {
            streak: 1,
            rate_accumulator: 8
        }
    );
}

#[test]
fn test_no_advance_without_usable_data() {
    let mut stream = stereo_stream();
    stream.calibrate(0, 4, 8); // no previous payload count
    stream.calibrate(8, 0, 8); // zero delta
    assert_eq!(
        stream.calibration(),
        Calibration::Unlocked {
            streak: 0,
            rate_accumulator: 0
        }
    );
    assert_eq!(stream.payload_channels(), 0);
}

#[test]
fn test_locks_after_sixteen_stable_packets() {
    let mut stream = stereo_stream();
    for _ in 0..15 {
        stream.calibrate(8, 4, 8);
        assert!(!stream.is_locked());
    }
    stream.calibrate(8, 4, 8);
    assert!(stream.is_locked());
    // accumulator 128, channels 2: code 128/2/16 = 4
    assert_eq!(stream.sample_rate(), Some(SampleRate::Hz32000));
}

#[test]
fn test_unknown_rate_code_locks_with_no_rate() {
    let mut stream = stereo_stream();
    // 6 slots per packet over delta 3: 2 channels, code 6*16/2/16 = 3
    for _ in 0..16 {
        stream.calibrate(6, 3, 6);
    }
    assert!(stream.is_locked());
    assert_eq!(stream.sample_rate(), None);
}

#[test]
fn test_locked_state_is_frozen() {
    let mut stream = stereo_stream();
    for _ in 0..16 {
        stream.calibrate(8, 4, 8);
    }
    let locked = stream.calibration();

    // Wildly different geometry must not move anything once locked.
    stream.calibrate(24, 2, 24);
    assert_eq!(stream.calibration(), locked);
    assert_eq!(stream.payload_channels(), 2);
}

#[test]
fn test_reset_restarts_calibration() {
    let mut stream = stereo_stream();
    stream.track_dbc(99);
    stream.note_payload_samples(8);
    for _ in 0..16 {
        stream.calibrate(8, 4, 8);
    }
    assert!(stream.is_locked());

    stream.reset();
    assert!(!stream.is_locked());
    assert_eq!(stream.last_dbc(), 0);
    assert_eq!(stream.payload_channels(), 0);
    assert_eq!(stream.channel_count(), 2); // map untouched
}

#[test]
fn test_note_payload_samples_returns_previous() {
    let mut stream = stereo_stream();
    assert_eq!(stream.note_payload_samples(8), 0);
    assert_eq!(stream.note_payload_samples(12), 8);
}

#[test]
fn test_channel_output_handles() {
    let stream = StreamInfo::new(vec![Some(FifoHandle::new(5)), None]);
    assert_eq!(stream.channel_output(0), Some(FifoHandle::new(5)));
    assert_eq!(stream.channel_output(1), None);
    assert_eq!(stream.channel_output(2), None); // out of range
}
