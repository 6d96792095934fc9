use super::*;

fn header_fixture() -> [u8; 24] {
    let mut buf = [0u8; 24];
    buf[0] = 0x00; // cd = data, subtype 0
    buf[1] = 0x81; // sv set, version 0, tv set
    buf[2] = 0x2A; // sequence
    buf[4..12].copy_from_slice(&0x0011_2233_4455_6677u64.to_be_bytes());
    buf[12..16].copy_from_slice(&0xDEAD_BEEFu32.to_be_bytes());
    buf[20..22].copy_from_slice(&72u16.to_be_bytes());
    buf[22] = 0x5F;
    buf[23] = 0xA0;
    buf
}

#[test]
fn test_field_accessors() {
    let buf = header_fixture();
    let hdr = AvtpStreamHeader::parse(&buf, 0).unwrap();

    assert!(!hdr.is_control());
    assert_eq!(hdr.subtype(), 0);
    assert!(hdr.stream_valid());
    assert_eq!(hdr.version(), 0);
    assert!(hdr.timestamp_valid());
    assert_eq!(hdr.sequence_num(), 0x2A);
    assert_eq!(hdr.stream_id(), 0x0011_2233_4455_6677);
    assert_eq!(hdr.timestamp(), 0xDEAD_BEEF);
    assert_eq!(hdr.stream_data_length(), 72);
}

#[test]
fn test_control_bit() {
    let mut buf = header_fixture();
    buf[0] = 0x80;
    let hdr = AvtpStreamHeader::parse(&buf, 0).unwrap();
    assert!(hdr.is_control());
    assert_eq!(hdr.subtype(), 0);
}

#[test]
fn test_version_bits() {
    let mut buf = header_fixture();
    buf[1] = 0x80 | (0x02 << 4); // sv set, version 2, tv clear
    let hdr = AvtpStreamHeader::parse(&buf, 0).unwrap();
    assert_eq!(hdr.version(), 2);
    assert!(!hdr.timestamp_valid());
    assert!(hdr.stream_valid());
}

#[test]
fn test_parse_at_offset() {
    let mut frame = vec![0xFFu8; 14];
    frame.extend_from_slice(&header_fixture());
    let hdr = AvtpStreamHeader::parse(&frame, 14).unwrap();
    assert_eq!(hdr.sequence_num(), 0x2A);
}

#[test]
fn test_too_short() {
    let buf = [0u8; 23];
    let result = AvtpStreamHeader::parse(&buf, 0);
    assert!(matches!(
        result,
        Err(FrameError::TooShort { needed: 24, have: 23 })
    ));
}

#[test]
fn test_offset_beyond_frame() {
    let buf = [0u8; 30];
    let result = AvtpStreamHeader::parse(&buf, 14);
    assert!(matches!(
        result,
        Err(FrameError::TooShort { needed: 38, have: 30 })
    ));
}
