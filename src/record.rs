//! Length-prefixed records.
//!
//! A record's length counts the bytes after the length field. Decoders read the fields
//! they know about and the reader then seeks to the computed end, so trailing padding
//! never shifts the following sibling.

use serde::Serialize;

use crate::errors::BdResult;
use crate::streams::SeekableStream;

/// Width of a record's length prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthWidth {
    U8,
    U16,
    U32,
}

/// Where a record lives once its length has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordSpan {
    /// First byte after the length field.
    pub start: u64,
    pub length: u32,
    pub end: u64,
}

impl RecordSpan {
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Bytes left between `pos` and the end of the record.
    pub fn remaining(&self, pos: u64) -> u64 {
        self.end.saturating_sub(pos)
    }
}

/// Read a length prefix of `width` at the cursor, decode the body, land on its end.
pub fn read_record<S, T, F>(stream: &mut S, width: LengthWidth, decode: F) -> BdResult<T>
where
    S: SeekableStream,
    F: FnOnce(&mut S, RecordSpan) -> BdResult<T>,
{
    let length = match width {
        LengthWidth::U8 => stream.read_u8()? as u32,
        LengthWidth::U16 => stream.read_u16()? as u32,
        LengthWidth::U32 => stream.read_u32()?,
    };
    let start = stream.tell()?;
    let span = RecordSpan {
        start,
        length,
        end: start + length as u64,
    };
    decode_span(stream, span, decode)
}

/// Decode a record whose placement is known from outside: `base + addr` for `length`
/// bytes. Extension payloads are addressed this way.
pub fn read_record_at<S, T, F>(
    stream: &mut S,
    base: u64,
    addr: u32,
    length: u32,
    decode: F,
) -> BdResult<T>
where
    S: SeekableStream,
    F: FnOnce(&mut S, RecordSpan) -> BdResult<T>,
{
    let start = base + addr as u64;
    stream.seek_absolute(start)?;
    let span = RecordSpan {
        start,
        length,
        end: start + length as u64,
    };
    decode_span(stream, span, decode)
}

fn decode_span<S, T, F>(stream: &mut S, span: RecordSpan, decode: F) -> BdResult<T>
where
    S: SeekableStream,
    F: FnOnce(&mut S, RecordSpan) -> BdResult<T>,
{
    let value = decode(stream, span)?;
    let pos = stream.tell()?;
    if pos > span.end {
        log::warn!(
            "record at {} overran its length {} by {} bytes",
            span.start,
            span.length,
            pos - span.end
        );
    } else if pos < span.end {
        log::trace!(
            "record at {} leaves {} trailing bytes unread",
            span.start,
            span.end - pos
        );
    }
    stream.seek_absolute(span.end)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_cursor_lands_on_end_despite_padding() {
        let data = [
            0x00, 0x06, // length
            0xAB, // the only field the decoder knows
            0xEE, 0xEE, 0xEE, 0xEE, 0xEE, // undocumented padding
            0x42, // next sibling
        ];
        let mut s = Cursor::new(&data[..]);
        let (value, span) = read_record(&mut s, LengthWidth::U16, |s, span| {
            Ok((s.read_u8()?, span))
        })
        .unwrap();
        assert_eq!(value, 0xAB);
        assert_eq!(span.end, 8);
        assert_eq!(s.tell().unwrap(), span.end);
        assert_eq!(s.read_u8().unwrap(), 0x42);
    }

    #[test]
    fn test_overrun_still_lands_on_end() {
        let data = [0x01, 0x11, 0x22, 0x33];
        let mut s = Cursor::new(&data[..]);
        let v = read_record(&mut s, LengthWidth::U8, |s, _| s.read_u16()).unwrap();
        assert_eq!(v, 0x1122);
        assert_eq!(s.tell().unwrap(), 2);
    }

    #[test]
    fn test_zero_length_record() {
        let data = [0x00, 0x00, 0x00, 0x00, 0x7F];
        let mut s = Cursor::new(&data[..]);
        let empty = read_record(&mut s, LengthWidth::U32, |_, span| Ok(span.is_empty())).unwrap();
        assert!(empty);
        assert_eq!(s.tell().unwrap(), 4);
    }

    #[test]
    fn test_record_at_external_base() {
        let data = [0u8; 32];
        let mut s = Cursor::new(&data[..]);
        let start = read_record_at(&mut s, 10, 6, 8, |s, span| {
            s.skip(2)?;
            Ok(span.start)
        })
        .unwrap();
        assert_eq!(start, 16);
        assert_eq!(s.tell().unwrap(), 24);
    }
}
