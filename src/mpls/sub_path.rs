use serde::Serialize;

use super::play_item::{read_entry_list, PlayItemEntry};
use crate::bits::flag;
use crate::bits::reader::ascii;
use crate::errors::{BdResult, ResultExt};
use crate::record::{read_record, LengthWidth};
use crate::streams::SeekableStream;

/// A secondary timeline (audio commentary, PiP video, subtitles, IG menus, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubPath {
    pub length: u32,
    pub sub_path_type: u8,
    pub is_repeat: bool,
    pub sub_play_items: Vec<SubPlayItem>,
}

impl SubPath {
    pub fn read<S: SeekableStream>(stream: &mut S) -> BdResult<Self> {
        read_record(stream, LengthWidth::U32, |s, span| {
            s.skip(1)?;
            let sub_path_type = s.read_u8()?;
            s.skip(1)?;
            let is_repeat = flag(s.read_u8()?, 0x01);
            s.skip(1)?;
            let count = s.read_u8()?;
            let mut sub_play_items = Vec::with_capacity(count as usize);
            for i in 0..count {
                sub_play_items.push(SubPlayItem::read(s).context(|| format!("SubPlayItem {}", i))?);
            }
            Ok(SubPath {
                length: span.length,
                sub_path_type,
                is_repeat,
                sub_play_items,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubPlayItem {
    pub length: u16,
    pub clip_name: String,
    pub codec_id: String,
    pub connection_condition: u8,
    pub is_multi_clip: bool,
    pub ref_to_stc_id: u8,
    pub in_time: u32,
    pub out_time: u32,
    pub sync_play_item_id: u16,
    pub sync_start_pts: u32,
    pub number_of_multi_clip_entries: u8,
    /// Entry 0 is this SubPlayItem's own clip.
    pub clips: Vec<PlayItemEntry>,
}

impl SubPlayItem {
    pub fn read<S: SeekableStream>(stream: &mut S) -> BdResult<Self> {
        read_record(stream, LengthWidth::U16, |s, span| {
            let clip_name = ascii(&s.read_bytes::<5>()?);
            let codec_id = ascii(&s.read_bytes::<4>()?);
            s.skip(3)?;
            let b = s.read_u8()?;
            let connection_condition = (b & 0x1E) >> 1;
            let is_multi_clip = flag(b, 0x01);
            let ref_to_stc_id = s.read_u8()?;
            let in_time = s.read_u32()?;
            let out_time = s.read_u32()?;
            let sync_play_item_id = s.read_u16()?;
            let sync_start_pts = s.read_u32()?;

            let own_clip = PlayItemEntry {
                clip_name: clip_name.clone(),
                codec_id: codec_id.clone(),
                ref_to_stc_id,
            };
            let clips = if is_multi_clip {
                let declared = s.read_u8()?;
                s.skip(1)?;
                read_entry_list(s, declared, own_clip)?
            } else {
                vec![own_clip]
            };

            Ok(SubPlayItem {
                length: span.length as u16,
                clip_name,
                codec_id,
                connection_condition,
                is_multi_clip,
                ref_to_stc_id,
                in_time,
                out_time,
                sync_play_item_id,
                sync_start_pts,
                number_of_multi_clip_entries: clips.len() as u8,
                clips,
            })
        })
    }
}
