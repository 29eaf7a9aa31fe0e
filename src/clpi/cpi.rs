/*
# Characteristic Point Information

 The EP (entry point) map of a clip. For every indexed PID a two level table maps
 presentation timestamps to source packet numbers:

 - coarse entries: `{ref_to_ep_fine_id:18, pts_ep:14}` + `spn_ep u32`
 - fine entries:   `{is_angle_change_point:1, i_end_position_offset:3, pts_ep:11, spn_ep:17}`

 Per-PID tables are addressed relative to the EP map start, six bytes into the
 section (after the length field and the CPI type).
*/

use serde::Serialize;

use crate::bits::{bits, bits64, low_nibble};
use crate::errors::{BdError, BdResult, ResultExt};
use crate::record::{read_record, LengthWidth, RecordSpan};
use crate::section::ByteRange;
use crate::streams::SeekableStream;

/// Offset of the EP map from the start of the CPI block.
const EP_MAP_OFFSET: u64 = 6;

const EP_STREAM_TYPE_MASK: u64 = 0x3C_0000_0000;
const EP_COARSE_COUNT_MASK: u64 = 0x03_FFFC_0000;
const EP_FINE_COUNT_MASK: u64 = 0x3FFFF;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cpi {
    pub length: u32,
    pub cpi_type: u8,
    pub stream_pid_entries: Vec<StreamPidEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamPidEntry {
    pub stream_pid: u16,
    pub ep_stream_type: u8,
    pub number_of_ep_coarse_entries: u16,
    pub number_of_ep_fine_entries: u32,
    pub ep_map_stream_start_addr: u32,
    /// Read at the coarse table jump target; relative to that target.
    pub ep_fine_table_start_addr: u32,
    pub coarse_entries: Vec<CoarseEntry>,
    pub fine_entries: Vec<FineEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoarseEntry {
    pub ref_to_ep_fine_id: u32,
    pub pts_ep_coarse: u16,
    pub spn_ep_coarse: u32,
}

impl CoarseEntry {
    pub fn from_words(packed: u32, spn_ep_coarse: u32) -> Self {
        CoarseEntry {
            ref_to_ep_fine_id: bits(packed, 0xFFFF_C000, 14),
            pts_ep_coarse: bits(packed, 0x0000_3FFF, 0) as u16,
            spn_ep_coarse,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FineEntry {
    pub is_angle_change_point: bool,
    pub i_end_position_offset: u8,
    pub pts_ep_fine: u16,
    pub spn_ep_fine: u32,
}

impl FineEntry {
    pub fn from_word(word: u32) -> Self {
        FineEntry {
            is_angle_change_point: word & 0x8000_0000 != 0,
            i_end_position_offset: bits(word, 0x7000_0000, 28) as u8,
            pts_ep_fine: bits(word, 0x0FFE_0000, 17) as u16,
            spn_ep_fine: bits(word, 0x0001_FFFF, 0),
        }
    }
}

/// Decode the CPI block at `range`. An empty range means the clip has no CPI.
pub fn read_cpi<S: SeekableStream>(stream: &mut S, range: ByteRange) -> BdResult<Option<Cpi>> {
    if range.is_empty() {
        return Ok(None);
    }
    stream.seek_absolute(range.start)?;
    read_record(stream, LengthWidth::U32, |s, span| {
        if span.is_empty() {
            return Ok(Cpi::default());
        }
        s.skip(1)?;
        let cpi_type = low_nibble(s.read_u8()?);
        s.skip(1)?;
        let count = s.read_u8()?;

        let mut stream_pid_entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            stream_pid_entries.push(read_stream_pid_entry(s)?);
        }
        for (i, entry) in stream_pid_entries.iter_mut().enumerate() {
            read_ep_map(s, range.start, span, entry).context(|| format!("EP map {}", i))?;
        }

        Ok(Cpi {
            length: span.length,
            cpi_type,
            stream_pid_entries,
        })
    })
    .map(Some)
}

fn read_stream_pid_entry<S: SeekableStream>(s: &mut S) -> BdResult<StreamPidEntry> {
    let stream_pid = s.read_u16()?;
    s.skip(1)?;
    let window = s.read_u40()?;
    Ok(StreamPidEntry {
        stream_pid,
        ep_stream_type: bits64(window, EP_STREAM_TYPE_MASK, 34) as u8,
        number_of_ep_coarse_entries: bits64(window, EP_COARSE_COUNT_MASK, 18) as u16,
        number_of_ep_fine_entries: bits64(window, EP_FINE_COUNT_MASK, 0) as u32,
        ep_map_stream_start_addr: s.read_u32()?,
        ep_fine_table_start_addr: 0,
        coarse_entries: Vec::new(),
        fine_entries: Vec::new(),
    })
}

fn read_ep_map<S: SeekableStream>(
    s: &mut S,
    cpi_start: u64,
    span: RecordSpan,
    entry: &mut StreamPidEntry,
) -> BdResult<()> {
    let target = cpi_start + EP_MAP_OFFSET + entry.ep_map_stream_start_addr as u64;
    check_target(target, span, "coarse table")?;
    s.seek_absolute(target)?;
    entry.ep_fine_table_start_addr = s.read_u32()?;

    entry.coarse_entries = Vec::with_capacity(entry.number_of_ep_coarse_entries as usize);
    for _ in 0..entry.number_of_ep_coarse_entries {
        let packed = s.read_u32()?;
        let spn = s.read_u32()?;
        entry.coarse_entries.push(CoarseEntry::from_words(packed, spn));
    }

    let fine_target = target + entry.ep_fine_table_start_addr as u64;
    check_target(fine_target, span, "fine table")?;
    s.seek_absolute(fine_target)?;
    entry.fine_entries = Vec::with_capacity(entry.number_of_ep_fine_entries as usize);
    for _ in 0..entry.number_of_ep_fine_entries {
        entry.fine_entries.push(FineEntry::from_word(s.read_u32()?));
    }
    Ok(())
}

fn check_target(target: u64, span: RecordSpan, what: &str) -> BdResult<()> {
    if target > span.end {
        return Err(BdError::variant(
            "CPI",
            format!("{} at {} lies past the CPI end {}", what, target, span.end),
        ));
    }
    Ok(())
}
