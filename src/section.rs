/*
# Section Resolver

 Every BDMV database file opens with a 40-byte header: a 4-byte type indicator, a
 4-byte version number, and a run of 32-bit absolute section offsets. Each offset closes
 the previous section and opens the next one. The final offset addresses the optional
 extension data block; zero means the file carries none.
*/

use serde::Serialize;

use crate::bits::reader::ascii;
use crate::errors::{BdError, BdResult};
use crate::streams::SeekableStream;

/// Size of the fixed file header. The first section always starts here.
pub const HEADER_SIZE: u64 = 40;

/// Half-open absolute byte interval `[start, stop)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ByteRange {
    pub start: u64,
    pub stop: u64,
}

impl ByteRange {
    pub const ABSENT: ByteRange = ByteRange { start: 0, stop: 0 };

    pub fn new(start: u64, stop: u64) -> Self {
        ByteRange { start, stop }
    }

    pub fn len(&self) -> u64 {
        self.stop.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    /// The `{0, 0}` range used for a missing trailing section.
    pub fn is_absent(&self) -> bool {
        *self == Self::ABSENT
    }

    pub fn contains_range(&self, start: u64, len: u64) -> bool {
        start >= self.start && start.saturating_add(len) <= self.stop
    }
}

/// Named ranges in declaration order. The last entry is always `Extensions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionTable {
    pub sections: Vec<(&'static str, ByteRange)>,
    pub eof: u64,
}

impl SectionTable {
    pub fn get(&self, name: &str) -> Option<ByteRange> {
        self.sections
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, r)| *r)
    }

    /// Range of the `index`th section; callers index by their own layout constants.
    pub fn range(&self, index: usize) -> ByteRange {
        self.sections
            .get(index)
            .map(|(_, r)| *r)
            .unwrap_or(ByteRange::ABSENT)
    }

    pub fn extensions(&self) -> ByteRange {
        self.sections
            .last()
            .map(|(_, r)| *r)
            .unwrap_or(ByteRange::ABSENT)
    }
}

/// Type indicator, version and section table of one database file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub type_indicator: String,
    pub version_number: String,
    pub sections: SectionTable,
}

/// Read the header of a file whose type indicator must equal `magic`.
///
/// `layout` names the sections in file order, the last one being `Extensions`.
/// `layout.len() - 1` boundary offsets are read after the version number.
pub fn read_header<S: SeekableStream>(
    stream: &mut S,
    magic: &'static str,
    layout: &[&'static str],
) -> BdResult<Header> {
    stream.seek_absolute(0)?;
    let eof = stream.eof_offset()?;

    let type_indicator = ascii(&stream.read_bytes::<4>()?);
    if type_indicator != magic {
        return Err(BdError::BadTypeIndicator {
            expected: magic,
            found: type_indicator,
        });
    }
    let version_number = ascii(&stream.read_bytes::<4>()?);

    let mut boundaries = Vec::with_capacity(layout.len().saturating_sub(1));
    for _ in 1..layout.len() {
        boundaries.push(stream.read_u32()? as u64);
    }

    let sections = resolve_sections(layout, &boundaries, eof)?;
    log::trace!("{} sections: {:?}", magic, sections.sections);

    Ok(Header {
        type_indicator,
        version_number,
        sections,
    })
}

/// Turn raw boundary offsets into a validated section table.
pub fn resolve_sections(
    layout: &[&'static str],
    boundaries: &[u64],
    eof: u64,
) -> BdResult<SectionTable> {
    if layout.len() < 2 || boundaries.len() != layout.len() - 1 {
        return Err(BdError::bounds(format!(
            "{} boundaries for {} sections",
            boundaries.len(),
            layout.len()
        )));
    }

    let body = &layout[..layout.len() - 1];
    let ext_name = layout[layout.len() - 1];
    let ext_start = boundaries[boundaries.len() - 1];

    let mut sections = Vec::with_capacity(layout.len());
    let mut start = HEADER_SIZE;
    for (i, name) in body.iter().enumerate() {
        let stop = if i + 1 < body.len() {
            boundaries[i]
        } else if ext_start == 0 {
            eof
        } else {
            ext_start
        };
        sections.push((*name, ByteRange::new(start, stop)));
        start = stop;
    }

    let extensions = if ext_start == 0 {
        ByteRange::ABSENT
    } else {
        ByteRange::new(ext_start, eof)
    };
    sections.push((ext_name, extensions));

    let table = SectionTable { sections, eof };
    check_contiguity(&table)?;
    Ok(table)
}

/// Ranges are ordered, contiguous, inside the file, and (with extensions present)
/// add up to the file length together with the header.
pub fn check_contiguity(table: &SectionTable) -> BdResult<()> {
    let (ext_name, ext) = match table.sections.last() {
        Some(last) => *last,
        None => return Err(BdError::bounds("empty section table")),
    };
    let body = &table.sections[..table.sections.len() - 1];

    let mut expected_start = HEADER_SIZE;
    for (name, range) in body {
        if range.start != expected_start {
            return Err(BdError::bounds(format!(
                "{} starts at {}, expected {}",
                name, range.start, expected_start
            )));
        }
        if range.start > range.stop {
            return Err(BdError::bounds(format!(
                "{} stops at {} before its start {}",
                name, range.stop, range.start
            )));
        }
        if range.stop > table.eof {
            return Err(BdError::bounds(format!(
                "{} stops at {} past end of file {}",
                name, range.stop, table.eof
            )));
        }
        expected_start = range.stop;
    }

    if ext.is_absent() {
        return Ok(());
    }
    if ext.start != expected_start || ext.stop != table.eof {
        return Err(BdError::bounds(format!(
            "{} spans {}..{}, expected {}..{}",
            ext_name, ext.start, ext.stop, expected_start, table.eof
        )));
    }
    let total: u64 = HEADER_SIZE + table.sections.iter().map(|(_, r)| r.len()).sum::<u64>();
    if total != table.eof {
        return Err(BdError::bounds(format!(
            "header plus sections cover {} bytes of a {} byte file",
            total, table.eof
        )));
    }
    Ok(())
}
