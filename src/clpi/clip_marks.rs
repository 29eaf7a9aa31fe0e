use serde::Serialize;

use crate::errors::BdResult;
use crate::record::{read_record, LengthWidth};
use crate::section::ByteRange;
use crate::streams::SeekableStream;

const CLIP_MARK_SIZE: u64 = 16;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClipMarks {
    pub length: u32,
    pub number_of_clip_marks: u16,
    pub marks: Vec<ClipMark>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClipMark {
    pub mark_type: u8,
    pub mark_pid: u16,
    pub mark_timestamp: u32,
    pub entry_point: u32,
    pub duration: u32,
}

/// Decode the ClipMark block. An empty range means the clip has none.
pub fn read_clip_marks<S: SeekableStream>(
    stream: &mut S,
    range: ByteRange,
) -> BdResult<Option<ClipMarks>> {
    if range.is_empty() {
        return Ok(None);
    }
    stream.seek_absolute(range.start)?;
    read_record(stream, LengthWidth::U32, |s, span| {
        if span.is_empty() {
            return Ok(ClipMarks::default());
        }
        let number_of_clip_marks = s.read_u16()?;
        let mut marks = Vec::with_capacity(number_of_clip_marks as usize);
        for _ in 0..number_of_clip_marks {
            if span.remaining(s.tell()?) < CLIP_MARK_SIZE {
                log::debug!(
                    "clip marks declare {} entries, record holds {}",
                    number_of_clip_marks,
                    marks.len()
                );
                break;
            }
            s.skip(1)?;
            marks.push(ClipMark {
                mark_type: s.read_u8()?,
                mark_pid: s.read_u16()?,
                mark_timestamp: s.read_u32()?,
                entry_point: s.read_u32()?,
                duration: s.read_u32()?,
            });
        }
        Ok(ClipMarks {
            length: span.length,
            number_of_clip_marks,
            marks,
        })
    })
    .map(Some)
}
