use serde::Serialize;

use super::stream::StreamTable;
use super::user_options::UserOptions;
use crate::bits::flag;
use crate::bits::reader::ascii;
use crate::errors::{BdError, BdResult, ResultExt};
use crate::record::{read_record, LengthWidth};
use crate::streams::SeekableStream;

/// A clip reference: `NNNNN.clpi` name, codec id (`M2TS`) and STC sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayItemEntry {
    pub clip_name: String,
    pub codec_id: String,
    pub ref_to_stc_id: u8,
}

impl PlayItemEntry {
    pub fn read<S: SeekableStream>(stream: &mut S) -> BdResult<Self> {
        Ok(PlayItemEntry {
            clip_name: ascii(&stream.read_bytes::<5>()?),
            codec_id: ascii(&stream.read_bytes::<4>()?),
            ref_to_stc_id: stream.read_u8()?,
        })
    }
}

/// Read the `count` byte of a multi-angle or multi-clip block and the entries that
/// follow it. Element 0 is `first`; the count is clamped to at least one.
pub(crate) fn read_entry_list<S: SeekableStream>(
    stream: &mut S,
    count: u8,
    first: PlayItemEntry,
) -> BdResult<Vec<PlayItemEntry>> {
    let count = count.max(1);
    let mut entries = Vec::with_capacity(count as usize);
    entries.push(first);
    for _ in 1..count {
        entries.push(PlayItemEntry::read(stream)?);
    }
    Ok(entries)
}

/// One segment of the main path timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayItem {
    pub length: u16,
    pub clip_name: String,
    pub codec_id: String,
    pub is_multi_angle: bool,
    pub connection_condition: u8,
    pub ref_to_stc_id: u8,
    /// 45 kHz ticks.
    pub in_time: u32,
    pub out_time: u32,
    pub user_options: UserOptions,
    pub random_access_flag: bool,
    pub still_mode: u8,
    pub still_time: u16,
    pub number_of_angles: u8,
    pub is_different_audios: bool,
    pub is_seamless_angle_change: bool,
    /// Angle 0 is this PlayItem's own clip.
    pub angles: Vec<PlayItemEntry>,
    pub stream_table: StreamTable,
}

impl PlayItem {
    pub fn duration(&self) -> u32 {
        self.out_time - self.in_time
    }

    /// Parse one PlayItem at the cursor
    pub fn read<S: SeekableStream>(stream: &mut S) -> BdResult<Self> {
        read_record(stream, LengthWidth::U16, |s, span| {
            let clip_name = ascii(&s.read_bytes::<5>()?);
            let codec_id = ascii(&s.read_bytes::<4>()?);
            s.skip(1)?;
            let b = s.read_u8()?;
            let is_multi_angle = flag(b, 0x10);
            let connection_condition = b & 0x0F;
            let ref_to_stc_id = s.read_u8()?;
            let in_time = s.read_u32()?;
            let out_time = s.read_u32()?;
            if in_time > out_time {
                return Err(BdError::variant(
                    "PlayItem",
                    format!("{} IN time {} is after OUT time {}", clip_name, in_time, out_time),
                ));
            }
            let user_options = UserOptions::read(s)?;
            let random_access_flag = flag(s.read_u8()?, 0x80);
            let still_mode = s.read_u8()?;
            let still_time = if still_mode == 0x01 {
                s.read_u16()?
            } else {
                s.skip(2)?;
                0
            };

            let own_clip = PlayItemEntry {
                clip_name: clip_name.clone(),
                codec_id: codec_id.clone(),
                ref_to_stc_id,
            };
            let (angles, is_different_audios, is_seamless_angle_change) = if is_multi_angle {
                let declared = s.read_u8()?;
                let angle_flags = s.read_u8()?;
                (
                    read_entry_list(s, declared, own_clip)?,
                    flag(angle_flags, 0x02),
                    flag(angle_flags, 0x01),
                )
            } else {
                (vec![own_clip], false, false)
            };

            let stream_table =
                StreamTable::read(s).context(|| format!("PlayItem {} stream table", clip_name))?;

            Ok(PlayItem {
                length: span.length as u16,
                clip_name,
                codec_id,
                is_multi_angle,
                connection_condition,
                ref_to_stc_id,
                in_time,
                out_time,
                user_options,
                random_access_flag,
                still_mode,
                still_time,
                number_of_angles: angles.len() as u8,
                is_different_audios,
                is_seamless_angle_change,
                angles,
                stream_table,
            })
        })
    }
}
