use serde::Serialize;

use crate::bits::high_nibble;
use crate::errors::BdResult;
use crate::streams::SeekableStream;

/// HDR mastering display metadata, extension (3,5).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StaticMetadata {
    pub length: u32,
    pub entries: Vec<StaticMetadataEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StaticMetadataEntry {
    pub dynamic_range_type: u8,
    pub display_primaries_x: [u16; 3],
    pub display_primaries_y: [u16; 3],
    pub white_point_x: u16,
    pub white_point_y: u16,
    pub max_display_mastering_luminance: u16,
    pub min_display_mastering_luminance: u16,
    pub max_cll: u16,
    pub max_fall: u16,
}

pub fn read_static_metadata<S: SeekableStream>(stream: &mut S) -> BdResult<StaticMetadata> {
    let length = stream.read_u32()?;
    if length == 0 {
        return Ok(StaticMetadata::default());
    }
    let count = stream.read_u8()?;
    stream.skip(3)?;

    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let dynamic_range_type = high_nibble(stream.read_u8()?);
        stream.skip(3)?;
        let mut display_primaries_x = [0u16; 3];
        let mut display_primaries_y = [0u16; 3];
        for i in 0..3 {
            display_primaries_x[i] = stream.read_u16()?;
            display_primaries_y[i] = stream.read_u16()?;
        }
        entries.push(StaticMetadataEntry {
            dynamic_range_type,
            display_primaries_x,
            display_primaries_y,
            white_point_x: stream.read_u16()?,
            white_point_y: stream.read_u16()?,
            max_display_mastering_luminance: stream.read_u16()?,
            min_display_mastering_luminance: stream.read_u16()?,
            max_cll: stream.read_u16()?,
            max_fall: stream.read_u16()?,
        });
    }

    Ok(StaticMetadata { length, entries })
}
