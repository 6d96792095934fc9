use super::*;

fn untagged_frame() -> Vec<u8> {
    let mut frame = vec![0u8; 20];
    frame[12] = 0x22;
    frame[13] = 0xF0;
    frame
}

#[test]
fn test_untagged_header_len() {
    let frame = untagged_frame();
    let eth = EthernetHeader::parse(&frame).unwrap();
    assert!(!eth.is_vlan_tagged());
    assert_eq!(eth.header_len(), 14);
    assert_eq!(eth.ethertype(), 0x22F0);
}

#[test]
fn test_vlan_marker_selects_tagged_len() {
    let mut frame = vec![0u8; 24];
    frame[12] = 0x81; // TPID high byte
    frame[13] = 0x00;
    frame[16] = 0x22;
    frame[17] = 0xF0;

    let eth = EthernetHeader::parse(&frame).unwrap();
    assert!(eth.is_vlan_tagged());
    assert_eq!(eth.header_len(), 18);
    assert_eq!(eth.ethertype(), 0x22F0);
}

#[test]
fn test_too_short_untagged() {
    let frame = [0u8; 13];
    let result = EthernetHeader::parse(&frame);
    assert!(matches!(
        result,
        Err(FrameError::TooShort { needed: 14, have: 13 })
    ));
}

#[test]
fn test_too_short_for_tag() {
    let mut frame = vec![0u8; 15];
    frame[12] = 0x81;
    let result = EthernetHeader::parse(&frame);
    assert!(matches!(
        result,
        Err(FrameError::TooShort { needed: 18, have: 15 })
    ));
}

#[test]
fn test_destination_mac() {
    let mut frame = untagged_frame();
    frame[..6].copy_from_slice(&[0x91, 0xE0, 0xF0, 0x00, 0x0E, 0x80]);
    let eth = EthernetHeader::parse(&frame).unwrap();
    assert_eq!(eth.destination(), [0x91, 0xE0, 0xF0, 0x00, 0x0E, 0x80]);
}
