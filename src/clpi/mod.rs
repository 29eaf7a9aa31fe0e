/*
# CLPI (Clip Information)

 `BDMV/CLIPINF/NNNNN.clpi`: transport stream properties, sequence and program
 descriptions, and the EP map used to seek inside the matching `.m2ts`.
*/

pub mod clip_info;
pub mod clip_marks;
pub mod cpi;
pub mod extensions;
pub mod program_info;
pub mod sequence_info;

#[cfg(test)]
mod cpi_test;

pub use clip_info::{read_clip_info, ClipInfo, FollowingClip};
pub use clip_marks::{read_clip_marks, ClipMark, ClipMarks};
pub use cpi::{read_cpi, CoarseEntry, Cpi, FineEntry, StreamPidEntry};
pub use extensions::{ClpiExtension, ExtentStartPoints};
pub use program_info::{read_program_info, Program, ProgramInfo, ProgramStream, StreamCoding};
pub use sequence_info::{read_sequence_info, AtcSequence, SequenceInfo, StcSequence};

use serde::Serialize;
use std::path::Path;

use crate::errors::{BdResult, ResultExt};
use crate::extensions::{read_extensions, ExtensionTable};
use crate::section::{read_header, Header};
use crate::streams::{LocalSeekableStream, SeekableStream};

pub const CLPI_TYPE_INDICATOR: &str = "HDMV";

pub const CLPI_SECTIONS: [&str; 6] = [
    "ClipInfo",
    "SequenceInfo",
    "ProgramInfo",
    "CPI",
    "ClipMark",
    "Extensions",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clpi {
    pub header: Header,
    pub clip_info: ClipInfo,
    pub sequence_info: SequenceInfo,
    pub program_info: ProgramInfo,
    pub cpi: Option<Cpi>,
    pub clip_marks: Option<ClipMarks>,
    pub extensions: Option<ExtensionTable<ClpiExtension>>,
}

/// Decode a clip information file from a local path
pub fn read_local_clpi<P: AsRef<Path>>(path: P) -> BdResult<Clpi> {
    let mut stream = LocalSeekableStream::open(path)?;
    read_clpi(&mut stream)
}

pub fn read_clpi<S: SeekableStream>(stream: &mut S) -> BdResult<Clpi> {
    let header =
        read_header(stream, CLPI_TYPE_INDICATOR, &CLPI_SECTIONS).context(|| "CLPI header")?;
    let sections = &header.sections;

    let clip_info = read_clip_info(stream, sections.range(0)).context(|| "CLPI ClipInfo")?;
    let sequence_info =
        read_sequence_info(stream, sections.range(1)).context(|| "CLPI SequenceInfo")?;
    let program_info =
        read_program_info(stream, sections.range(2)).context(|| "CLPI ProgramInfo")?;
    let cpi = read_cpi(stream, sections.range(3)).context(|| "CLPI CPI")?;
    let clip_marks = read_clip_marks(stream, sections.range(4)).context(|| "CLPI ClipMark")?;
    let extensions =
        read_extensions(stream, sections.extensions()).context(|| "CLPI Extensions")?;

    log::debug!(
        "CLPI {}: {} source packets, {} programs",
        header.version_number,
        clip_info.number_of_source_packets,
        program_info.programs.len()
    );

    Ok(Clpi {
        header,
        clip_info,
        sequence_info,
        program_info,
        cpi,
        clip_marks,
        extensions,
    })
}
