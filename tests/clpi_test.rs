mod common;

use bdmvparser::clpi::{read_clpi, read_local_clpi, ClpiExtension, StreamCoding};
use bdmvparser::errors::BdError;
use common::{container, extension_block, with_u32_len, with_u8_len, write_temp};
use std::io::Cursor;

fn clip_info() -> Vec<u8> {
    let mut body = vec![0x00, 0x00, 0x01, 0x01];
    body.extend_from_slice(&0u32.to_be_bytes()); // not CC5
    body.extend_from_slice(&6_000_000u32.to_be_bytes());
    body.extend_from_slice(&1234u32.to_be_bytes());
    body.extend_from_slice(&[0; 128]);
    body.extend_from_slice(&[0x5A; 32]);
    with_u32_len(&body)
}

fn sequence_info() -> Vec<u8> {
    let mut body = vec![0x00, 0x01];
    body.extend_from_slice(&0u32.to_be_bytes());
    body.extend_from_slice(&[0x01, 0x00]);
    body.extend_from_slice(&0x1001u16.to_be_bytes());
    body.extend_from_slice(&0u32.to_be_bytes());
    body.extend_from_slice(&27_000_000u32.to_be_bytes());
    body.extend_from_slice(&54_000_000u32.to_be_bytes());
    with_u32_len(&body)
}

fn program_info() -> Vec<u8> {
    let mut body = vec![0x00, 0x01];
    body.extend_from_slice(&0u32.to_be_bytes());
    body.extend_from_slice(&0x0100u16.to_be_bytes());
    body.extend_from_slice(&[0x02, 0x00]);
    body.extend_from_slice(&0x1011u16.to_be_bytes());
    body.extend(with_u8_len(&[0x1b, 0x61, 0x30]));
    body.extend_from_slice(&0x1100u16.to_be_bytes());
    body.extend(with_u8_len(&[0x81, 0x61, b'e', b'n', b'g']));
    with_u32_len(&body)
}

/// One PID, one coarse and one fine entry. `coarse_addr` is relative to the EP map.
fn cpi(coarse_addr: u32) -> Vec<u8> {
    let mut body = vec![0x00, 0x01, 0x00, 0x01];
    body.extend_from_slice(&0x1011u16.to_be_bytes());
    body.push(0x00);
    body.extend_from_slice(&[0x04, 0x00, 0x04, 0x00, 0x01]); // type 1, 1 coarse, 1 fine
    body.extend_from_slice(&coarse_addr.to_be_bytes());
    body.extend_from_slice(&12u32.to_be_bytes()); // fine table after the coarse entry
    body.extend_from_slice(&[0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x00]);
    body.extend_from_slice(&[0x00, 0x02, 0x00, 0x10]);
    with_u32_len(&body)
}

fn clip_marks() -> Vec<u8> {
    with_u32_len(&[0x00, 0x00])
}

fn extent_start_points(points: &[u32]) -> Vec<u8> {
    let mut body = (points.len() as u32).to_be_bytes().to_vec();
    for p in points {
        body.extend_from_slice(&p.to_be_bytes());
    }
    with_u32_len(&body)
}

fn sample_clip(cpi_section: Vec<u8>, extensions: Option<&[u8]>) -> Vec<u8> {
    container(
        b"HDMV",
        &[
            clip_info(),
            sequence_info(),
            program_info(),
            cpi_section,
            clip_marks(),
        ],
        extensions,
    )
}

#[test]
fn test_read_clip_information() {
    let data = sample_clip(cpi(14), None);
    let clpi = read_clpi(&mut Cursor::new(&data[..])).unwrap();

    assert_eq!(clpi.header.type_indicator, "HDMV");
    assert_eq!(clpi.clip_info.number_of_source_packets, 1234);
    assert_eq!(clpi.clip_info.ts_type_info_block, vec![0x5A; 32]);
    assert!(clpi.clip_info.following_clip.is_none());

    let atc = &clpi.sequence_info.atc_sequences[0];
    assert_eq!(atc.stc_sequences[0].pcr_pid, 0x1001);
    assert_eq!(atc.stc_sequences[0].presentation_end_time, 54_000_000);

    let program = &clpi.program_info.programs[0];
    assert_eq!(program.streams.len(), 2);
    assert_eq!(
        program.streams[0].coding,
        StreamCoding::Video {
            format: 6,
            rate: 1,
            aspect_ratio: 3,
            oc_flag: false,
        }
    );
    assert_eq!(program.streams[0].isrc, None);
    match &program.streams[1].coding {
        StreamCoding::Audio { language, .. } => assert_eq!(language, "eng"),
        other => panic!("unexpected coding {:?}", other),
    }

    let cpi = clpi.cpi.unwrap();
    let ep = &cpi.stream_pid_entries[0];
    assert_eq!(ep.coarse_entries.len(), 1);
    assert_eq!(ep.coarse_entries[0].pts_ep_coarse, 5);
    assert_eq!(ep.fine_entries[0].pts_ep_fine, 1);
    assert_eq!(ep.fine_entries[0].spn_ep_fine, 0x10);

    assert_eq!(clpi.clip_marks.unwrap().marks.len(), 0);
    assert!(clpi.extensions.is_none());
}

#[test]
fn test_clip_extensions() {
    let ext = extension_block(&[
        (1, 2, vec![0xDE, 0xAD]),
        (2, 4, extent_start_points(&[100, 200])),
        (7, 7, vec![0; 8]),
    ]);
    let data = sample_clip(cpi(14), Some(&ext));
    let clpi = read_clpi(&mut Cursor::new(&data[..])).unwrap();

    let table = clpi.extensions.unwrap();
    assert_eq!(table.meta.len(), 3);
    assert_eq!(
        table.entries[0],
        Some(ClpiExtension::LpcmDownMixCoefficients {
            data: vec![0xDE, 0xAD]
        })
    );
    match &table.entries[1] {
        Some(ClpiExtension::ExtentStartPoints(points)) => {
            assert_eq!(points.points, vec![100, 200])
        }
        other => panic!("unexpected entry {:?}", other),
    }
    assert_eq!(table.entries[2], None);
}

#[test]
fn test_cpi_jump_past_section_is_fatal() {
    let data = sample_clip(cpi(0x1000), None);
    let err = read_clpi(&mut Cursor::new(&data[..])).unwrap_err();
    assert!(err.to_string().starts_with("CLPI CPI: "));
    assert!(matches!(err.root(), BdError::VariantDecodeFailure { .. }));
}

#[test]
fn test_unknown_coding_type_is_fatal() {
    let mut data = sample_clip(cpi(14), None);
    // first coding type byte: 17 bytes into ProgramInfo
    let at = 40 + clip_info().len() + sequence_info().len() + 17;
    assert_eq!(data[at], 0x1b);
    data[at] = 0x55;
    let err = read_clpi(&mut Cursor::new(&data[..])).unwrap_err();
    assert!(matches!(
        err.root(),
        BdError::UnknownVariantTag { tag: 0x55, .. }
    ));
}

#[test]
fn test_read_local_clip() {
    let file = write_temp(&sample_clip(cpi(14), None));
    let clpi = read_local_clpi(file.path()).unwrap();
    assert_eq!(clpi.clip_info.application_name(), Some("Main TS for a main-path of Movie"));
}
