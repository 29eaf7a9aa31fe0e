/*
# Extension Data

 The trailing `Extensions` section shared by every BDMV database file:

 ```text
 length            u32   bytes after this field, up to the end of the section
 data_start_addr   u32
 reserved          [3]
 entry_count       u8
 entry_count x {
     type_tag      u16
     version_tag   u16
     start_addr    u32   relative to the start of the Extensions section
     length        u32
 }
 ... payloads ...
 ```

 Each container registers the `(type, version)` pairs it can decode. Anything else is
 skipped so newer discs keep decoding, and a registered payload that fails to decode
 is dropped without aborting the file.
*/

use serde::Serialize;

use crate::errors::{BdError, BdResult};
use crate::record::{read_record_at, RecordSpan};
use crate::section::ByteRange;
use crate::streams::SeekableStream;

/// Size of the fixed table header and of each entry descriptor.
const TABLE_HEADER_SIZE: u64 = 12;
const ENTRY_META_SIZE: u64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtensionEntryMeta {
    pub type_tag: u16,
    pub version_tag: u16,
    pub start_addr: u32,
    pub length: u32,
}

impl ExtensionEntryMeta {
    pub fn tag(&self) -> (u16, u16) {
        (self.type_tag, self.version_tag)
    }
}

/// Decoded extension block. `meta` and `entries` are parallel and both hold
/// `entry_count` items; unknown or broken payloads are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtensionTable<E> {
    pub declared_length: u32,
    pub data_start_addr: u32,
    pub entry_count: u8,
    pub meta: Vec<ExtensionEntryMeta>,
    pub entries: Vec<Option<E>>,
}

impl<E> ExtensionTable<E> {
    /// Decoded payloads paired with their descriptors.
    pub fn decoded(&self) -> impl Iterator<Item = (&ExtensionEntryMeta, &E)> {
        self.meta
            .iter()
            .zip(self.entries.iter())
            .filter_map(|(m, e)| e.as_ref().map(|e| (m, e)))
    }
}

/// A container's closed set of extension payloads.
pub trait ExtensionPayload: Sized {
    /// Container name used in diagnostics.
    const CONTAINER: &'static str;

    fn is_registered(type_tag: u16, version_tag: u16) -> bool;

    /// Decode a registered payload. The stream is positioned at `span.start` and the
    /// dispatcher reseeks to `span.end` afterwards.
    fn decode<S: SeekableStream>(
        stream: &mut S,
        meta: &ExtensionEntryMeta,
        span: RecordSpan,
    ) -> BdResult<Self>;
}

/// Payload set for containers without registered extensions (MOBJ, BCLK).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NoExtensionPayload {}

impl ExtensionPayload for NoExtensionPayload {
    const CONTAINER: &'static str = "BDMV";

    fn is_registered(_: u16, _: u16) -> bool {
        false
    }

    fn decode<S: SeekableStream>(
        _: &mut S,
        meta: &ExtensionEntryMeta,
        _: RecordSpan,
    ) -> BdResult<Self> {
        Err(BdError::variant(
            "extension",
            format!("no payload registered for {:?}", meta.tag()),
        ))
    }
}

/// Read the extension table in `range`. An absent range yields `None`.
pub fn read_extensions<S, E>(stream: &mut S, range: ByteRange) -> BdResult<Option<ExtensionTable<E>>>
where
    S: SeekableStream,
    E: ExtensionPayload,
{
    if range.is_absent() {
        return Ok(None);
    }
    if range.start + TABLE_HEADER_SIZE > range.stop {
        return Err(BdError::bounds(format!(
            "{} extensions {}..{} cannot hold the table header",
            E::CONTAINER,
            range.start,
            range.stop
        )));
    }

    stream.seek_absolute(range.start)?;
    let declared_length = stream.read_u32()?;
    if range.start + 4 + declared_length as u64 != range.stop {
        return Err(BdError::bounds(format!(
            "{} extensions declare {} bytes at {} but the section stops at {}",
            E::CONTAINER,
            declared_length,
            range.start,
            range.stop
        )));
    }
    let data_start_addr = stream.read_u32()?;
    stream.skip(3)?;
    let entry_count = stream.read_u8()?;
    if range.start + TABLE_HEADER_SIZE + ENTRY_META_SIZE * entry_count as u64 > range.stop {
        return Err(BdError::bounds(format!(
            "{} extension table lists {} entries past the section end {}",
            E::CONTAINER,
            entry_count,
            range.stop
        )));
    }

    let mut meta = Vec::with_capacity(entry_count as usize);
    for _ in 0..entry_count {
        meta.push(ExtensionEntryMeta {
            type_tag: stream.read_u16()?,
            version_tag: stream.read_u16()?,
            start_addr: stream.read_u32()?,
            length: stream.read_u32()?,
        });
    }

    let mut entries = Vec::with_capacity(meta.len());
    for m in &meta {
        entries.push(read_entry::<S, E>(stream, range, m)?);
    }

    Ok(Some(ExtensionTable {
        declared_length,
        data_start_addr,
        entry_count,
        meta,
        entries,
    }))
}

fn read_entry<S, E>(stream: &mut S, range: ByteRange, meta: &ExtensionEntryMeta) -> BdResult<Option<E>>
where
    S: SeekableStream,
    E: ExtensionPayload,
{
    let data_start = range.start + meta.start_addr as u64;

    if !E::is_registered(meta.type_tag, meta.version_tag) {
        let skipped = BdError::UnknownVariantTag {
            what: "extension",
            tag: (meta.type_tag as u32) << 16 | meta.version_tag as u32,
            offset: data_start,
        };
        log::debug!("{} extension skipped: {}", E::CONTAINER, skipped);
        stream.seek_absolute(data_start + meta.length as u64)?;
        return Ok(None);
    }

    if !range.contains_range(data_start, meta.length as u64) {
        log::warn!(
            "{} extension {:?} at {}+{} leaves the section {}..{}",
            E::CONTAINER,
            meta.tag(),
            data_start,
            meta.length,
            range.start,
            range.stop
        );
        return Ok(None);
    }

    match read_record_at(stream, range.start, meta.start_addr, meta.length, |s, span| {
        E::decode(s, meta, span)
    }) {
        Ok(entry) => Ok(Some(entry)),
        Err(e) => {
            log::warn!(
                "{} extension {:?} dropped: {}",
                E::CONTAINER,
                meta.tag(),
                e
            );
            stream.seek_absolute(data_start + meta.length as u64)?;
            Ok(None)
        }
    }
}
