use serde::Serialize;

use crate::errors::BdResult;
use crate::record::{read_record, LengthWidth};
use crate::section::ByteRange;
use crate::streams::SeekableStream;

/// Arrival-time and system-time-clock sequences of a clip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SequenceInfo {
    pub length: u32,
    pub atc_sequences: Vec<AtcSequence>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtcSequence {
    pub spn_atc_start: u32,
    pub offset_stc_id: u8,
    pub stc_sequences: Vec<StcSequence>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StcSequence {
    pub pcr_pid: u16,
    pub spn_stc_start: u32,
    pub presentation_start_time: u32,
    pub presentation_end_time: u32,
}

pub fn read_sequence_info<S: SeekableStream>(
    stream: &mut S,
    range: ByteRange,
) -> BdResult<SequenceInfo> {
    stream.seek_absolute(range.start)?;
    read_record(stream, LengthWidth::U32, |s, span| {
        if span.is_empty() {
            return Ok(SequenceInfo::default());
        }
        s.skip(1)?;
        let atc_count = s.read_u8()?;
        let mut atc_sequences = Vec::with_capacity(atc_count as usize);
        for _ in 0..atc_count {
            let spn_atc_start = s.read_u32()?;
            let stc_count = s.read_u8()?;
            let offset_stc_id = s.read_u8()?;
            let mut stc_sequences = Vec::with_capacity(stc_count as usize);
            for _ in 0..stc_count {
                stc_sequences.push(StcSequence {
                    pcr_pid: s.read_u16()?,
                    spn_stc_start: s.read_u32()?,
                    presentation_start_time: s.read_u32()?,
                    presentation_end_time: s.read_u32()?,
                });
            }
            atc_sequences.push(AtcSequence {
                spn_atc_start,
                offset_stc_id,
                stc_sequences,
            });
        }
        Ok(SequenceInfo {
            length: span.length,
            atc_sequences,
        })
    })
}
