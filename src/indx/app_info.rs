use serde::Serialize;

use crate::bits::reader::ascii;
use crate::bits::{flag, high_nibble, low_nibble};
use crate::errors::BdResult;
use crate::media_tables::{video_format_name, video_rate};
use crate::record::{read_record, LengthWidth};
use crate::section::ByteRange;
use crate::streams::SeekableStream;

/// Disc-wide presentation hints from `index.bdmv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexAppInfo {
    pub length: u32,
    /// Set when the disc prefers starting in stereoscopic output.
    pub initial_output_mode_preference: bool,
    pub ss_content_exist_flag: bool,
    pub initial_dynamic_range_type: u8,
    pub video_format: u8,
    pub frame_rate: u8,
    pub user_data: String,
}

impl IndexAppInfo {
    pub fn video_format_name(&self) -> Option<&'static str> {
        video_format_name(self.video_format)
    }

    pub fn frame_rate(&self) -> Option<(u32, u32)> {
        video_rate(self.frame_rate)
    }
}

pub fn read_index_app_info<S: SeekableStream>(
    stream: &mut S,
    range: ByteRange,
) -> BdResult<IndexAppInfo> {
    stream.seek_absolute(range.start)?;
    read_record(stream, LengthWidth::U32, |s, span| {
        let flags = s.read_u8()?;
        let video = s.read_u8()?;
        let user_data = s.read_bytes::<32>()?;
        Ok(IndexAppInfo {
            length: span.length,
            initial_output_mode_preference: flag(flags, 0x40),
            ss_content_exist_flag: flag(flags, 0x20),
            initial_dynamic_range_type: low_nibble(flags),
            video_format: high_nibble(video),
            frame_rate: low_nibble(video),
            user_data: ascii(&user_data)
                .trim_end_matches('\0')
                .to_string(),
        })
    })
}
