use serde::Serialize;

use crate::bits::{flag, high_nibble};
use crate::errors::BdResult;
use crate::extensions::{ExtensionEntryMeta, ExtensionPayload};
use crate::record::RecordSpan;
use crate::streams::SeekableStream;

pub const EXT_HEVC: (u16, u16) = (3, 1);

/// Extension payloads understood in INDX files.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "extension")]
pub enum IndxExtension {
    Hevc(HevcCapabilities),
}

/// UHD disc capabilities, extension (3,1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HevcCapabilities {
    pub length: u32,
    pub disc_type: u8,
    pub exist_4k_flag: bool,
    pub hdr_plus_flag: bool,
    pub dolby_vision_flag: bool,
    /// Bit 1: HDR10, bit 0: SDR.
    pub hdr_flags: u8,
}

impl ExtensionPayload for IndxExtension {
    const CONTAINER: &'static str = "INDX";

    fn is_registered(type_tag: u16, version_tag: u16) -> bool {
        (type_tag, version_tag) == EXT_HEVC
    }

    fn decode<S: SeekableStream>(
        stream: &mut S,
        _: &ExtensionEntryMeta,
        _: RecordSpan,
    ) -> BdResult<Self> {
        read_hevc(stream).map(IndxExtension::Hevc)
    }
}

fn read_hevc<S: SeekableStream>(stream: &mut S) -> BdResult<HevcCapabilities> {
    let length = stream.read_u32()?;
    let disc = stream.read_u8()?;
    stream.skip(1)?;
    let hdr = stream.read_u8()?;
    stream.skip(5)?;
    Ok(HevcCapabilities {
        length,
        disc_type: high_nibble(disc),
        exist_4k_flag: flag(disc, 0x01),
        hdr_plus_flag: flag(hdr, 0x10),
        dolby_vision_flag: flag(hdr, 0x04),
        hdr_flags: hdr & 0x03,
    })
}
