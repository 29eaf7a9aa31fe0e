use serde::Serialize;

use crate::bits::reader::ascii;
use crate::errors::BdResult;
use crate::media_tables::clip_application_name;
use crate::record::{read_record, LengthWidth};
use crate::section::ByteRange;
use crate::streams::SeekableStream;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClipInfo {
    pub length: u32,
    pub clip_stream_type: u8,
    pub application_type: u8,
    pub is_cc5: bool,
    /// Bytes per second.
    pub ts_recording_rate: u32,
    pub number_of_source_packets: u32,
    pub ts_type_info_block: Vec<u8>,
    /// Present for connection condition 5 clips only.
    pub following_clip: Option<FollowingClip>,
}

impl ClipInfo {
    pub fn application_name(&self) -> Option<&'static str> {
        clip_application_name(self.application_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowingClip {
    pub stream_type: u8,
    pub clip_name: String,
    pub codec_id: String,
}

pub fn read_clip_info<S: SeekableStream>(stream: &mut S, range: ByteRange) -> BdResult<ClipInfo> {
    stream.seek_absolute(range.start)?;
    read_record(stream, LengthWidth::U32, |s, span| {
        s.skip(2)?;
        let clip_stream_type = s.read_u8()?;
        let application_type = s.read_u8()?;
        let is_cc5 = s.read_u32()? & 0x0000_0001 != 0;
        let ts_recording_rate = s.read_u32()?;
        let number_of_source_packets = s.read_u32()?;
        s.skip(128)?;
        let ts_type_info_block = s.read_vec(32)?;

        let following_clip = if is_cc5 {
            s.skip(1)?;
            let stream_type = s.read_u8()?;
            s.skip(4)?;
            let clip_name = ascii(&s.read_bytes::<5>()?);
            let codec_id = ascii(&s.read_bytes::<4>()?);
            s.skip(1)?;
            Some(FollowingClip {
                stream_type,
                clip_name,
                codec_id,
            })
        } else {
            None
        };

        Ok(ClipInfo {
            length: span.length,
            clip_stream_type,
            application_type,
            is_cc5,
            ts_recording_rate,
            number_of_source_packets,
            ts_type_info_block,
            following_clip,
        })
    })
}
