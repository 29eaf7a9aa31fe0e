/*
# Program Info

 The PMT-level description of a clip: one or more program sequences, each listing its
 elementary streams with a coding-type dependent attribute block. The same layout is
 reused by the stereoscopic ProgramInfo SS extension.
*/

use serde::Serialize;

use crate::bits::reader::{ascii, language};
use crate::bits::{flag, high_nibble, low_nibble};
use crate::errors::{BdError, BdResult, ResultExt};
use crate::media_tables::{coding_family, CodingFamily};
use crate::record::{read_record, LengthWidth};
use crate::section::ByteRange;
use crate::streams::SeekableStream;

const ISRC_LEN: u64 = 12;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgramInfo {
    pub length: u32,
    pub programs: Vec<Program>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    pub spn_program_sequence_start: u32,
    pub program_map_pid: u16,
    pub number_of_groups: u8,
    pub streams: Vec<ProgramStream>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramStream {
    pub pid: u16,
    pub length: u8,
    pub coding_type: u8,
    pub coding: StreamCoding,
    /// International Standard Recording Code, when the record has room for it.
    pub isrc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum StreamCoding {
    Video {
        format: u8,
        rate: u8,
        aspect_ratio: u8,
        oc_flag: bool,
    },
    Hevc {
        format: u8,
        rate: u8,
        aspect_ratio: u8,
        oc_flag: bool,
        cr_flag: bool,
        dynamic_range_type: u8,
        color_space: u8,
        hdr_plus_flag: bool,
    },
    Audio {
        format: u8,
        rate: u8,
        language: String,
    },
    Graphics {
        language: String,
    },
    Text {
        character_code: u8,
        language: String,
    },
}

/// Parse a ProgramInfo block at `range.start`
pub fn read_program_info<S: SeekableStream>(
    stream: &mut S,
    range: ByteRange,
) -> BdResult<ProgramInfo> {
    stream.seek_absolute(range.start)?;
    read_record(stream, LengthWidth::U32, |s, span| {
        if span.is_empty() {
            return Ok(ProgramInfo::default());
        }
        s.skip(1)?;
        let count = s.read_u8()?;
        let mut programs = Vec::with_capacity(count as usize);
        for i in 0..count {
            programs.push(read_program(s).context(|| format!("program {}", i))?);
        }
        Ok(ProgramInfo {
            length: span.length,
            programs,
        })
    })
}

fn read_program<S: SeekableStream>(s: &mut S) -> BdResult<Program> {
    let spn_program_sequence_start = s.read_u32()?;
    let program_map_pid = s.read_u16()?;
    let stream_count = s.read_u8()?;
    let number_of_groups = s.read_u8()?;

    let mut streams = Vec::with_capacity(stream_count as usize);
    for i in 0..stream_count {
        streams.push(read_program_stream(s).context(|| format!("program stream {}", i))?);
    }
    Ok(Program {
        spn_program_sequence_start,
        program_map_pid,
        number_of_groups,
        streams,
    })
}

fn read_program_stream<S: SeekableStream>(s: &mut S) -> BdResult<ProgramStream> {
    let pid = s.read_u16()?;
    read_record(s, LengthWidth::U8, |s, span| {
        let at = s.tell()?;
        let coding_type = s.read_u8()?;
        let family = coding_family(coding_type).ok_or(BdError::UnknownVariantTag {
            what: "stream coding type",
            tag: coding_type as u32,
            offset: at,
        })?;
        let coding = read_coding(s, family)?;

        let isrc = if span.remaining(s.tell()?) >= ISRC_LEN {
            Some(ascii(&s.read_bytes::<12>()?))
        } else {
            None
        };

        Ok(ProgramStream {
            pid,
            length: span.length as u8,
            coding_type,
            coding,
            isrc,
        })
    })
}

fn read_coding<S: SeekableStream>(s: &mut S, family: CodingFamily) -> BdResult<StreamCoding> {
    Ok(match family {
        CodingFamily::Video => {
            let fr = s.read_u8()?;
            let ar = s.read_u8()?;
            StreamCoding::Video {
                format: high_nibble(fr),
                rate: low_nibble(fr),
                aspect_ratio: high_nibble(ar),
                oc_flag: flag(ar, 0x02),
            }
        }
        CodingFamily::Hevc => {
            let fr = s.read_u8()?;
            let ar = s.read_u8()?;
            let dc = s.read_u8()?;
            let hdr = s.read_u8()?;
            StreamCoding::Hevc {
                format: high_nibble(fr),
                rate: low_nibble(fr),
                aspect_ratio: high_nibble(ar),
                oc_flag: flag(ar, 0x02),
                cr_flag: flag(ar, 0x01),
                dynamic_range_type: high_nibble(dc),
                color_space: low_nibble(dc),
                hdr_plus_flag: flag(hdr, 0x80),
            }
        }
        CodingFamily::Audio => {
            let fr = s.read_u8()?;
            StreamCoding::Audio {
                format: high_nibble(fr),
                rate: low_nibble(fr),
                language: language(s.read_bytes::<3>()?),
            }
        }
        CodingFamily::Graphics => StreamCoding::Graphics {
            language: language(s.read_bytes::<3>()?),
        },
        CodingFamily::Text => StreamCoding::Text {
            character_code: s.read_u8()?,
            language: language(s.read_bytes::<3>()?),
        },
    })
}
