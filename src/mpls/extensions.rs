use serde::Serialize;

use super::ext_mvc::{read_mvc, MvcStreamTable};
use super::ext_pip::{read_pip, PipMetadata};
use super::ext_static_metadata::{read_static_metadata, StaticMetadata};
use super::sub_path::SubPath;
use crate::errors::{BdResult, ResultExt};
use crate::extensions::{ExtensionEntryMeta, ExtensionPayload};
use crate::record::RecordSpan;
use crate::streams::SeekableStream;

/// Length value observed on broken discs; never trusted as a real length.
pub const REJECTED_LENGTH_SENTINEL: u32 = 0xFF00;

pub const EXT_PIP_METADATA: (u16, u16) = (1, 1);
pub const EXT_MVC_STREAMS: (u16, u16) = (2, 1);
pub const EXT_SUB_PATHS: (u16, u16) = (2, 2);
pub const EXT_STATIC_METADATA: (u16, u16) = (3, 5);

/// Extension payloads understood in MPLS files.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "extension")]
pub enum MplsExtension {
    PipMetadata(PipMetadata),
    MvcStreams(MvcStreamTable),
    SubPaths(SubPathExtension),
    StaticMetadata(StaticMetadata),
}

/// Additional SubPaths, extension (2,2).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubPathExtension {
    pub length: u32,
    pub sub_paths: Vec<SubPath>,
}

impl ExtensionPayload for MplsExtension {
    const CONTAINER: &'static str = "MPLS";

    fn is_registered(type_tag: u16, version_tag: u16) -> bool {
        matches!(
            (type_tag, version_tag),
            EXT_PIP_METADATA | EXT_MVC_STREAMS | EXT_SUB_PATHS | EXT_STATIC_METADATA
        )
    }

    fn decode<S: SeekableStream>(
        stream: &mut S,
        meta: &ExtensionEntryMeta,
        span: RecordSpan,
    ) -> BdResult<Self> {
        match meta.tag() {
            EXT_PIP_METADATA => read_pip(stream, span).map(MplsExtension::PipMetadata),
            EXT_MVC_STREAMS => read_mvc(stream, span).map(MplsExtension::MvcStreams),
            EXT_SUB_PATHS => read_sub_path_extension(stream).map(MplsExtension::SubPaths),
            _ => read_static_metadata(stream).map(MplsExtension::StaticMetadata),
        }
    }
}

fn read_sub_path_extension<S: SeekableStream>(stream: &mut S) -> BdResult<SubPathExtension> {
    let length = stream.read_u32()?;
    if length == 0 {
        return Ok(SubPathExtension::default());
    }
    let count = stream.read_u16()?;
    let mut sub_paths = Vec::with_capacity(count as usize);
    for i in 0..count {
        sub_paths.push(SubPath::read(stream).context(|| format!("extension SubPath {}", i))?);
    }
    Ok(SubPathExtension { length, sub_paths })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::read_extensions;
    use crate::mpls::ext_pip::PipDataEntry;
    use crate::section::ByteRange;
    use std::io::Cursor;

    fn extension_block(entries: &[((u16, u16), Vec<u8>)]) -> (Vec<u8>, ByteRange) {
        let header_len = 12 + 12 * entries.len();
        let mut metas = Vec::new();
        let mut payload = Vec::new();
        for ((t, v), body) in entries {
            metas.extend_from_slice(&t.to_be_bytes());
            metas.extend_from_slice(&v.to_be_bytes());
            metas.extend_from_slice(&((header_len + payload.len()) as u32).to_be_bytes());
            metas.extend_from_slice(&(body.len() as u32).to_be_bytes());
            payload.extend_from_slice(body);
        }
        let mut data = Vec::new();
        data.extend_from_slice(&((header_len - 4 + payload.len()) as u32).to_be_bytes());
        data.extend_from_slice(&(header_len as u32).to_be_bytes()); // data start
        data.extend_from_slice(&[0, 0, 0]); // reserved
        data.push(entries.len() as u8);
        data.extend_from_slice(&metas);
        data.extend_from_slice(&payload);
        let len = data.len() as u64;
        (data, ByteRange::new(0, len))
    }

    fn pip_payload(length: u32) -> Vec<u8> {
        let mut p = Vec::new();
        p.extend_from_slice(&length.to_be_bytes());
        p.extend_from_slice(&[0x00, 0x01]); // one entry
        p.extend_from_slice(&[
            0x00, 0x02, // clip ref
            0x00, // secondary video ref
            0x00, // reserved
            0x38, // timeline 3, luma key, no trick play
            0x00, // reserved
            0x00, 0xEB, // upper limit luma key 235
            0x00, 0x00, // reserved
            0x00, 0x00, 0x00, 0x14, // data address 20
        ]);
        p.extend_from_slice(&[
            0x00, 0x01, // one data entry
            0x00, 0x00, 0x10, 0x00, // time
            0x12, 0x34, 0x56, // xpos 0x123, ypos 0x456
            0x40, // scale 4
        ]);
        p
    }

    #[test]
    fn test_pip_metadata() {
        let (data, range) = extension_block(&[(EXT_PIP_METADATA, pip_payload(26))]);
        let table = read_extensions::<_, MplsExtension>(&mut Cursor::new(data), range)
            .unwrap()
            .unwrap();
        let pip = match &table.entries[0] {
            Some(MplsExtension::PipMetadata(p)) => p,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(pip.entries.len(), 1);
        let e = &pip.entries[0];
        assert_eq!(e.clip_ref, 2);
        assert_eq!(e.timeline_type, 3);
        assert!(e.luma_key_flag);
        assert!(!e.trick_play_flag);
        assert_eq!(e.upper_limit_luma_key, 235);
        assert_eq!(
            e.data,
            vec![PipDataEntry {
                time: 0x1000,
                xpos: 0x123,
                ypos: 0x456,
                scale_factor: 4
            }]
        );
    }

    #[test]
    fn test_pip_rejected_sentinel_drops_entry_only() {
        let statics = vec![0x00, 0x00, 0x00, 0x00]; // empty static metadata
        let (data, range) = extension_block(&[
            (EXT_PIP_METADATA, pip_payload(REJECTED_LENGTH_SENTINEL)),
            (EXT_STATIC_METADATA, statics),
        ]);
        let table = read_extensions::<_, MplsExtension>(&mut Cursor::new(data), range)
            .unwrap()
            .unwrap();
        assert_eq!(table.entries[0], None);
        assert_eq!(
            table.entries[1],
            Some(MplsExtension::StaticMetadata(StaticMetadata::default()))
        );
    }

    #[test]
    fn test_mvc_segments_keep_reserved_tail() {
        let mut segment = vec![
            0x80, // fixed offset pop-up
            0x00, // reserved
            0x09, 0x01, 0x10, 0x12, 0, 0, 0, 0, 0, 0, // stream entry: PlayItem pid 0x1012
            0x05, 0x20, 0x61, 0, 0, 0, // attributes: MVC video
            0x00, // reserved
            0x20, // 32 offset sequences
        ];
        segment.extend_from_slice(&[0x00, 0x00, 0x01, 0x00, 0x00, 0x00]);
        let mut payload = (segment.len() as u16).to_be_bytes().to_vec();
        payload.extend_from_slice(&segment);
        payload.extend_from_slice(&[0x00, 0x00]); // terminator

        let (data, range) = extension_block(&[(EXT_MVC_STREAMS, payload)]);
        let table = read_extensions::<_, MplsExtension>(&mut Cursor::new(data), range)
            .unwrap()
            .unwrap();
        let mvc = match &table.entries[0] {
            Some(MplsExtension::MvcStreams(m)) => m,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(mvc.streams.len(), 1);
        let s = &mvc.streams[0];
        assert!(s.fixed_offset_popup_flag);
        assert_eq!(s.entry.pid(), 0x1012);
        assert_eq!(s.attributes.basic().coding_type, 0x20);
        assert_eq!(s.number_of_offset_sequences, 32);
        assert_eq!(s.reserved_tail, vec![0x00, 0x00, 0x01, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_mvc_sentinel_segment_stops_walk() {
        let payload = vec![0xFF, 0x00, 0x00, 0x00];
        let (data, range) = extension_block(&[(EXT_MVC_STREAMS, payload)]);
        let table = read_extensions::<_, MplsExtension>(&mut Cursor::new(data), range)
            .unwrap()
            .unwrap();
        assert_eq!(
            table.entries[0],
            Some(MplsExtension::MvcStreams(MvcStreamTable::default()))
        );
    }

    #[test]
    fn test_static_metadata() {
        let mut payload = vec![
            0x00, 0x00, 0x00, 0x20, // length
            0x01, // count
            0x00, 0x00, 0x00, // reserved
            0x10, 0x00, 0x00, 0x00, // HDR10
        ];
        for v in [
            8500u16, 39850, 6550, 2300, 35400, 14600, // primaries x/y
            15635, 16450, // white point
            1000, 50, 1000, 400, // luminance, MaxCLL, MaxFALL
        ] {
            payload.extend_from_slice(&v.to_be_bytes());
        }
        let (data, range) = extension_block(&[(EXT_STATIC_METADATA, payload)]);
        let table = read_extensions::<_, MplsExtension>(&mut Cursor::new(data), range)
            .unwrap()
            .unwrap();
        let sm = match &table.entries[0] {
            Some(MplsExtension::StaticMetadata(sm)) => sm,
            other => panic!("unexpected {:?}", other),
        };
        let e = &sm.entries[0];
        assert_eq!(e.dynamic_range_type, 1);
        assert_eq!(e.display_primaries_x, [8500, 6550, 35400]);
        assert_eq!(e.display_primaries_y, [39850, 2300, 14600]);
        assert_eq!(e.white_point_x, 15635);
        assert_eq!(e.max_cll, 1000);
        assert_eq!(e.max_fall, 400);
    }
}
