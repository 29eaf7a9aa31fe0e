use serde::Serialize;

use crate::errors::BdResult;
use crate::media_tables::mark_type_name;
use crate::record::{read_record, LengthWidth};
use crate::section::ByteRange;
use crate::streams::SeekableStream;

/// Chapter (entry) and link marks on the main path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayListMark {
    pub mark_type: u8,
    pub ref_to_play_item_id: u16,
    pub mark_timestamp: u32,
    pub entry_es_pid: u16,
    pub duration: u32,
}

impl PlayListMark {
    pub fn type_name(&self) -> Option<&'static str> {
        mark_type_name(self.mark_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayListMarks {
    pub length: u32,
    pub marks: Vec<PlayListMark>,
}

/// Parse the PlayListMark section
pub fn read_marks<S: SeekableStream>(stream: &mut S, range: ByteRange) -> BdResult<PlayListMarks> {
    stream.seek_absolute(range.start)?;
    read_record(stream, LengthWidth::U32, |s, span| {
        if span.is_empty() {
            return Ok(PlayListMarks::default());
        }
        let count = s.read_u16()?;
        let mut marks = Vec::with_capacity(count as usize);
        for _ in 0..count {
            s.skip(1)?;
            marks.push(PlayListMark {
                mark_type: s.read_u8()?,
                ref_to_play_item_id: s.read_u16()?,
                mark_timestamp: s.read_u32()?,
                entry_es_pid: s.read_u16()?,
                duration: s.read_u32()?,
            });
        }
        Ok(PlayListMarks {
            length: span.length,
            marks,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_marks() {
        let data = [
            0x00, 0x00, 0x00, 0x1E, // length
            0x00, 0x02, // count
            0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, // entry mark @0
            0x00, 0x02, 0x00, 0x01, 0x00, 0x01, 0x5F, 0x90, 0x10, 0x11, 0x00, 0x00, 0x00, 0x00, // link mark @90000
        ];
        let marks = read_marks(&mut Cursor::new(&data[..]), ByteRange::new(0, 34)).unwrap();
        assert_eq!(marks.marks.len(), 2);
        assert_eq!(marks.marks[0].type_name(), Some("Entry Mark"));
        assert_eq!(marks.marks[0].entry_es_pid, 0xFFFF);
        assert_eq!(marks.marks[1].ref_to_play_item_id, 1);
        assert_eq!(marks.marks[1].mark_timestamp, 90_000);
    }
}
