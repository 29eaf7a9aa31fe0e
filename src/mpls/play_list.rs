use serde::Serialize;

use super::play_item::PlayItem;
use super::sub_path::SubPath;
use crate::errors::{BdResult, ResultExt};
use crate::record::{read_record, LengthWidth};
use crate::section::ByteRange;
use crate::streams::SeekableStream;

/// Main path PlayItems plus the SubPaths that run alongside them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayList {
    pub length: u32,
    pub number_of_play_items: u16,
    pub number_of_sub_paths: u16,
    pub play_items: Vec<PlayItem>,
    pub sub_paths: Vec<SubPath>,
}

impl PlayList {
    /// Sum of PlayItem durations in 45 kHz ticks.
    pub fn duration(&self) -> u64 {
        self.play_items.iter().map(|p| p.duration() as u64).sum()
    }
}

/// Parse the PlayList section
pub fn read_play_list<S: SeekableStream>(stream: &mut S, range: ByteRange) -> BdResult<PlayList> {
    stream.seek_absolute(range.start)?;
    read_record(stream, LengthWidth::U32, |s, span| {
        s.skip(2)?;
        let number_of_play_items = s.read_u16()?;
        let number_of_sub_paths = s.read_u16()?;

        let mut play_items = Vec::with_capacity(number_of_play_items as usize);
        for i in 0..number_of_play_items {
            play_items.push(PlayItem::read(s).context(|| format!("PlayItem {}", i))?);
        }
        let mut sub_paths = Vec::with_capacity(number_of_sub_paths as usize);
        for i in 0..number_of_sub_paths {
            sub_paths.push(SubPath::read(s).context(|| format!("SubPath {}", i))?);
        }

        Ok(PlayList {
            length: span.length,
            number_of_play_items,
            number_of_sub_paths,
            play_items,
            sub_paths,
        })
    })
}
