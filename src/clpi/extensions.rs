use serde::Serialize;

use super::cpi::{read_cpi, Cpi};
use super::program_info::{read_program_info, ProgramInfo};
use crate::errors::{BdError, BdResult};
use crate::extensions::{ExtensionEntryMeta, ExtensionPayload};
use crate::record::RecordSpan;
use crate::section::ByteRange;
use crate::streams::SeekableStream;

pub const EXT_LPCM_DOWN_MIX: (u16, u16) = (1, 2);
pub const EXT_EXTENT_START_POINTS: (u16, u16) = (2, 4);
pub const EXT_PROGRAM_INFO_SS: (u16, u16) = (2, 5);
pub const EXT_CPI_SS: (u16, u16) = (2, 6);

/// Extension payloads understood in CLPI files.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "extension")]
pub enum ClpiExtension {
    /// Kept opaque; the coefficient layout is not decoded.
    LpcmDownMixCoefficients { data: Vec<u8> },
    ExtentStartPoints(ExtentStartPoints),
    ProgramInfoSs(ProgramInfo),
    CpiSs(Cpi),
}

/// SPNs where each interleaved extent of a stereoscopic clip begins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtentStartPoints {
    pub length: u32,
    pub points: Vec<u32>,
}

impl ExtensionPayload for ClpiExtension {
    const CONTAINER: &'static str = "CLPI";

    fn is_registered(type_tag: u16, version_tag: u16) -> bool {
        matches!(
            (type_tag, version_tag),
            EXT_LPCM_DOWN_MIX | EXT_EXTENT_START_POINTS | EXT_PROGRAM_INFO_SS | EXT_CPI_SS
        )
    }

    fn decode<S: SeekableStream>(
        stream: &mut S,
        meta: &ExtensionEntryMeta,
        span: RecordSpan,
    ) -> BdResult<Self> {
        let range = ByteRange::new(span.start, span.end);
        match meta.tag() {
            EXT_LPCM_DOWN_MIX => Ok(ClpiExtension::LpcmDownMixCoefficients {
                data: stream.read_vec(span.length as usize)?,
            }),
            EXT_EXTENT_START_POINTS => {
                read_extent_start_points(stream, span).map(ClpiExtension::ExtentStartPoints)
            }
            EXT_PROGRAM_INFO_SS => read_program_info(stream, range).map(ClpiExtension::ProgramInfoSs),
            _ => match read_cpi(stream, range)? {
                Some(cpi) => Ok(ClpiExtension::CpiSs(cpi)),
                None => Err(BdError::variant("CPI SS", "empty payload")),
            },
        }
    }
}

fn read_extent_start_points<S: SeekableStream>(
    stream: &mut S,
    span: RecordSpan,
) -> BdResult<ExtentStartPoints> {
    let length = stream.read_u32()?;
    let count = stream.read_u32()?;
    let fits = span.remaining(stream.tell()?) / 4;
    if count as u64 > fits {
        return Err(BdError::variant(
            "extent start points",
            format!("{} points declared, payload holds {}", count, fits),
        ));
    }
    let mut points = Vec::with_capacity(count as usize);
    for _ in 0..count {
        points.push(stream.read_u32()?);
    }
    Ok(ExtentStartPoints { length, points })
}
