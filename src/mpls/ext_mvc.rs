use serde::Serialize;

use super::extensions::REJECTED_LENGTH_SENTINEL;
use super::stream::{StreamAttributes, StreamEntry, StreamKind};
use crate::bits::flag;
use crate::errors::BdResult;
use crate::record::{read_record, LengthWidth, RecordSpan};
use crate::streams::SeekableStream;

/// Stereoscopic (MVC) stream table, extension (2,1).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MvcStreamTable {
    pub streams: Vec<MvcStream>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MvcStream {
    pub length: u16,
    pub fixed_offset_popup_flag: bool,
    pub entry: StreamEntry,
    pub attributes: StreamAttributes,
    pub number_of_offset_sequences: u8,
    /// Bytes after the known fields, kept as found.
    pub reserved_tail: Vec<u8>,
}

/// Walk u16-length segments until the payload is exhausted.
pub fn read_mvc<S: SeekableStream>(stream: &mut S, span: RecordSpan) -> BdResult<MvcStreamTable> {
    let mut table = MvcStreamTable::default();
    let mut start = span.start;

    while start + 2 <= span.end {
        stream.seek_absolute(start)?;
        let length = stream.read_u16()?;
        let end = start + 2 + length as u64;
        if length == 0 {
            break;
        }
        if length == REJECTED_LENGTH_SENTINEL as u16 {
            log::warn!("MVC segment at {} carries the rejected length {:#x}", start, length);
            break;
        }
        if end > span.end {
            log::debug!("MVC segment at {} runs past the payload end {}", start, span.end);
            break;
        }

        stream.seek_absolute(start)?;
        match read_record(stream, LengthWidth::U16, read_mvc_stream) {
            Ok(s) => table.streams.push(s),
            Err(e) => log::warn!("MVC segment at {} skipped: {}", start, e),
        }
        start = end;
    }

    Ok(table)
}

fn read_mvc_stream<S: SeekableStream>(s: &mut S, span: RecordSpan) -> BdResult<MvcStream> {
    let fixed_offset_popup_flag = flag(s.read_u8()?, 0x80);
    s.skip(1)?;
    let entry = StreamEntry::read(s)?;
    let attributes = StreamAttributes::read(s, StreamKind::PrimaryVideo)?;
    s.skip(1)?;
    let number_of_offset_sequences = s.read_u8()?;
    let tail = span.remaining(s.tell()?);
    let reserved_tail = s.read_vec(tail as usize)?;

    Ok(MvcStream {
        length: span.length as u16,
        fixed_offset_popup_flag,
        entry,
        attributes,
        number_of_offset_sequences,
        reserved_tail,
    })
}
