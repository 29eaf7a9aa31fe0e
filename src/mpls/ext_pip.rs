use serde::Serialize;

use super::extensions::REJECTED_LENGTH_SENTINEL;
use crate::bits::{flag, high_nibble};
use crate::errors::{BdError, BdResult, ResultExt};
use crate::record::RecordSpan;
use crate::streams::SeekableStream;

/// Picture-in-picture ("Bonus View") metadata, extension (1,1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipMetadata {
    pub length: u32,
    pub entries: Vec<PipEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipEntry {
    pub clip_ref: u16,
    pub secondary_video_ref: u8,
    pub timeline_type: u8,
    pub luma_key_flag: bool,
    pub trick_play_flag: bool,
    pub upper_limit_luma_key: u8,
    /// Relative to the start of the PiP block.
    pub data_address: u32,
    pub data: Vec<PipDataEntry>,
}

/// Window position and scale from `time` onwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipDataEntry {
    pub time: u32,
    pub xpos: u16,
    pub ypos: u16,
    pub scale_factor: u8,
}

impl PipDataEntry {
    pub fn from_bytes(b: [u8; 8]) -> Self {
        let packed = u32::from_be_bytes([0, b[4], b[5], b[6]]);
        PipDataEntry {
            time: u32::from_be_bytes([b[0], b[1], b[2], b[3]]),
            xpos: ((packed & 0xFFF000) >> 12) as u16,
            ypos: (packed & 0x000FFF) as u16,
            scale_factor: high_nibble(b[7]),
        }
    }
}

pub fn read_pip<S: SeekableStream>(stream: &mut S, span: RecordSpan) -> BdResult<PipMetadata> {
    let length = stream.read_u32()?;
    if length == REJECTED_LENGTH_SENTINEL {
        return Err(BdError::variant(
            "PiP metadata",
            format!("rejected length sentinel {:#x} at {}", length, span.start),
        ));
    }
    let count = stream.read_u16()?;

    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        entries.push(read_pip_entry(stream)?);
    }
    for (i, entry) in entries.iter_mut().enumerate() {
        stream.seek_absolute(span.start + entry.data_address as u64)?;
        entry.data = read_pip_data(stream).context(|| format!("PiP entry {} data", i))?;
    }

    Ok(PipMetadata { length, entries })
}

fn read_pip_entry<S: SeekableStream>(s: &mut S) -> BdResult<PipEntry> {
    let clip_ref = s.read_u16()?;
    let secondary_video_ref = s.read_u8()?;
    s.skip(1)?;
    let b = s.read_u8()?;
    let luma_key_flag = flag(b, 0x08);
    s.skip(1)?;
    let upper_limit_luma_key = if luma_key_flag {
        s.skip(1)?;
        s.read_u8()?
    } else {
        s.skip(2)?;
        0
    };
    s.skip(2)?;
    Ok(PipEntry {
        clip_ref,
        secondary_video_ref,
        timeline_type: high_nibble(b),
        luma_key_flag,
        trick_play_flag: flag(b, 0x04),
        upper_limit_luma_key,
        data_address: s.read_u32()?,
        data: Vec::new(),
    })
}

fn read_pip_data<S: SeekableStream>(s: &mut S) -> BdResult<Vec<PipDataEntry>> {
    let count = s.read_u16()?;
    let mut data = Vec::with_capacity(count as usize);
    for _ in 0..count {
        data.push(PipDataEntry::from_bytes(s.read_bytes::<8>()?));
    }
    Ok(data)
}
