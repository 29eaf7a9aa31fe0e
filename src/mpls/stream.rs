/*
# Stream Number Table

 Each PlayItem lists the elementary streams a player may select while it plays. A
 stream is a pair of u8-length records:

 - `StreamEntry`: where the stream lives (type 1: the PlayItem's own clip, type 2: a
   SubPath clip, types 3/4: a SubPath multiplexed into the main clip)
 - `StreamAttributes`: coding type plus codec specific attributes

 Secondary audio and secondary video streams carry reference lists after their
 attribute record, so the attribute variant depends on the caller's `StreamKind` as
 well as on the coding type.
*/

use serde::Serialize;

use crate::bits::reader::language;
use crate::bits::{flag, high_nibble, low_nibble};
use crate::errors::{BdError, BdResult, ResultExt};
use crate::media_tables::{coding_family, CodingFamily};
use crate::record::{read_record, LengthWidth};
use crate::streams::SeekableStream;

/// The eight stream lists of a stream table, in header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StreamKind {
    PrimaryVideo,
    PrimaryAudio,
    PresentationGraphics,
    InteractiveGraphics,
    SecondaryAudio,
    SecondaryVideo,
    PipPresentationGraphics,
    DolbyVision,
}

impl StreamKind {
    pub const ALL: [StreamKind; 8] = [
        StreamKind::PrimaryVideo,
        StreamKind::PrimaryAudio,
        StreamKind::PresentationGraphics,
        StreamKind::InteractiveGraphics,
        StreamKind::SecondaryAudio,
        StreamKind::SecondaryVideo,
        StreamKind::PipPresentationGraphics,
        StreamKind::DolbyVision,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StreamKind::PrimaryVideo => "PrimaryVideo",
            StreamKind::PrimaryAudio => "PrimaryAudio",
            StreamKind::PresentationGraphics => "PG",
            StreamKind::InteractiveGraphics => "IG",
            StreamKind::SecondaryAudio => "SecondaryAudio",
            StreamKind::SecondaryVideo => "SecondaryVideo",
            StreamKind::PipPresentationGraphics => "PipPG",
            StreamKind::DolbyVision => "DolbyVision",
        }
    }
}

/// Where a stream's packets come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum StreamEntry {
    /// Type 1.
    PlayItem { pid: u16 },
    /// Type 2.
    SubPath {
        sub_path_id: u8,
        sub_clip_id: u8,
        pid: u16,
    },
    /// Types 3 and 4.
    SubPathInMux {
        stream_type: u8,
        sub_path_id: u8,
        pid: u16,
    },
}

impl StreamEntry {
    pub fn read<S: SeekableStream>(stream: &mut S) -> BdResult<Self> {
        let at = stream.tell()?;
        read_record(stream, LengthWidth::U8, |s, _| {
            let stream_type = s.read_u8()?;
            match stream_type {
                1 => Ok(StreamEntry::PlayItem { pid: s.read_u16()? }),
                2 => Ok(StreamEntry::SubPath {
                    sub_path_id: s.read_u8()?,
                    sub_clip_id: s.read_u8()?,
                    pid: s.read_u16()?,
                }),
                3 | 4 => Ok(StreamEntry::SubPathInMux {
                    stream_type,
                    sub_path_id: s.read_u8()?,
                    pid: s.read_u16()?,
                }),
                other => Err(BdError::UnknownVariantTag {
                    what: "stream entry type",
                    tag: other as u32,
                    offset: at,
                }),
            }
        })
    }

    pub fn pid(&self) -> u16 {
        match self {
            StreamEntry::PlayItem { pid }
            | StreamEntry::SubPath { pid, .. }
            | StreamEntry::SubPathInMux { pid, .. } => *pid,
        }
    }
}

/// Prefix shared by every attribute variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BasicAttributes {
    pub coding_type: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoAttributes {
    pub basic: BasicAttributes,
    pub format: u8,
    pub rate: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HevcAttributes {
    pub basic: BasicAttributes,
    pub format: u8,
    pub rate: u8,
    pub dynamic_range_type: u8,
    pub color_space: u8,
    pub cr_flag: bool,
    pub hdr_plus_flag: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioAttributes {
    pub basic: BasicAttributes,
    pub format: u8,
    pub rate: u8,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphicsAttributes {
    pub basic: BasicAttributes,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextAttributes {
    pub basic: BasicAttributes,
    pub character_code: u8,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecondaryAudioAttributes {
    pub audio: AudioAttributes,
    pub primary_audio_refs: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecondaryVideoAttributes {
    pub video: VideoAttributes,
    pub secondary_audio_refs: Vec<u8>,
    pub pip_pg_refs: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum StreamAttributes {
    Video(VideoAttributes),
    Hevc(HevcAttributes),
    SecondaryVideo(SecondaryVideoAttributes),
    Audio(AudioAttributes),
    SecondaryAudio(SecondaryAudioAttributes),
    Graphics(GraphicsAttributes),
    Text(TextAttributes),
}

impl StreamAttributes {
    /// Read the attribute record and, for secondary streams, the reference lists that
    /// follow it.
    pub fn read<S: SeekableStream>(stream: &mut S, kind: StreamKind) -> BdResult<Self> {
        let at = stream.tell()?;
        let attrs = read_record(stream, LengthWidth::U8, |s, _| read_attribute_body(s, kind, at))?;

        Ok(match attrs {
            StreamAttributes::SecondaryAudio(mut sa) => {
                sa.primary_audio_refs = read_ref_list(stream)?;
                StreamAttributes::SecondaryAudio(sa)
            }
            StreamAttributes::SecondaryVideo(mut sv) => {
                sv.secondary_audio_refs = read_ref_list(stream)?;
                sv.pip_pg_refs = read_ref_list(stream)?;
                StreamAttributes::SecondaryVideo(sv)
            }
            other => other,
        })
    }

    pub fn basic(&self) -> BasicAttributes {
        match self {
            StreamAttributes::Video(v) => v.basic,
            StreamAttributes::Hevc(v) => v.basic,
            StreamAttributes::SecondaryVideo(v) => v.video.basic,
            StreamAttributes::Audio(a) => a.basic,
            StreamAttributes::SecondaryAudio(a) => a.audio.basic,
            StreamAttributes::Graphics(g) => g.basic,
            StreamAttributes::Text(t) => t.basic,
        }
    }
}

fn read_attribute_body<S: SeekableStream>(
    s: &mut S,
    kind: StreamKind,
    at: u64,
) -> BdResult<StreamAttributes> {
    let basic = BasicAttributes {
        coding_type: s.read_u8()?,
    };
    let family = coding_family(basic.coding_type).ok_or(BdError::UnknownVariantTag {
        what: "stream coding type",
        tag: basic.coding_type as u32,
        offset: at,
    })?;

    match (family, kind) {
        (CodingFamily::Video, StreamKind::SecondaryVideo) => {
            Ok(StreamAttributes::SecondaryVideo(SecondaryVideoAttributes {
                video: read_video(s, basic)?,
                secondary_audio_refs: Vec::new(),
                pip_pg_refs: Vec::new(),
            }))
        }
        (CodingFamily::Video, _) => Ok(StreamAttributes::Video(read_video(s, basic)?)),
        (CodingFamily::Hevc, StreamKind::SecondaryVideo) => Err(BdError::variant(
            "stream attributes",
            format!("HEVC coding at {} is not valid for secondary video", at),
        )),
        (CodingFamily::Hevc, _) => {
            let fr = s.read_u8()?;
            let dc = s.read_u8()?;
            let flags = s.read_u8()?;
            Ok(StreamAttributes::Hevc(HevcAttributes {
                basic,
                format: high_nibble(fr),
                rate: low_nibble(fr),
                dynamic_range_type: high_nibble(dc),
                color_space: low_nibble(dc),
                cr_flag: flag(flags, 0x80),
                hdr_plus_flag: flag(flags, 0x40),
            }))
        }
        (CodingFamily::Audio, StreamKind::SecondaryAudio) => {
            Ok(StreamAttributes::SecondaryAudio(SecondaryAudioAttributes {
                audio: read_audio(s, basic)?,
                primary_audio_refs: Vec::new(),
            }))
        }
        (CodingFamily::Audio, _) => Ok(StreamAttributes::Audio(read_audio(s, basic)?)),
        (CodingFamily::Graphics, _) => Ok(StreamAttributes::Graphics(GraphicsAttributes {
            basic,
            language: language(s.read_bytes::<3>()?),
        })),
        (CodingFamily::Text, _) => Ok(StreamAttributes::Text(TextAttributes {
            basic,
            character_code: s.read_u8()?,
            language: language(s.read_bytes::<3>()?),
        })),
    }
}

fn read_video<S: SeekableStream>(s: &mut S, basic: BasicAttributes) -> BdResult<VideoAttributes> {
    let fr = s.read_u8()?;
    Ok(VideoAttributes {
        basic,
        format: high_nibble(fr),
        rate: low_nibble(fr),
    })
}

fn read_audio<S: SeekableStream>(s: &mut S, basic: BasicAttributes) -> BdResult<AudioAttributes> {
    let fr = s.read_u8()?;
    Ok(AudioAttributes {
        basic,
        format: high_nibble(fr),
        rate: low_nibble(fr),
        language: language(s.read_bytes::<3>()?),
    })
}

/// `count u8`, reserved byte, `count` ids, one pad byte when `count` is odd.
fn read_ref_list<S: SeekableStream>(s: &mut S) -> BdResult<Vec<u8>> {
    let count = s.read_u8()?;
    s.skip(1)?;
    let refs = s.read_vec(count as usize)?;
    if count % 2 == 1 {
        s.skip(1)?;
    }
    Ok(refs)
}

/// One selectable stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stream {
    pub entry: StreamEntry,
    pub attributes: StreamAttributes,
}

impl Stream {
    pub fn read<S: SeekableStream>(stream: &mut S, kind: StreamKind) -> BdResult<Self> {
        let entry = StreamEntry::read(stream)?;
        let attributes = StreamAttributes::read(stream, kind)?;
        Ok(Stream { entry, attributes })
    }
}

/// STN table of a PlayItem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamTable {
    pub length: u16,
    pub primary_video: Vec<Stream>,
    pub primary_audio: Vec<Stream>,
    pub presentation_graphics: Vec<Stream>,
    pub interactive_graphics: Vec<Stream>,
    pub secondary_audio: Vec<Stream>,
    pub secondary_video: Vec<Stream>,
    pub pip_presentation_graphics: Vec<Stream>,
    pub dolby_vision: Vec<Stream>,
}

impl StreamTable {
    pub fn streams(&self, kind: StreamKind) -> &[Stream] {
        match kind {
            StreamKind::PrimaryVideo => &self.primary_video,
            StreamKind::PrimaryAudio => &self.primary_audio,
            StreamKind::PresentationGraphics => &self.presentation_graphics,
            StreamKind::InteractiveGraphics => &self.interactive_graphics,
            StreamKind::SecondaryAudio => &self.secondary_audio,
            StreamKind::SecondaryVideo => &self.secondary_video,
            StreamKind::PipPresentationGraphics => &self.pip_presentation_graphics,
            StreamKind::DolbyVision => &self.dolby_vision,
        }
    }

    pub fn total(&self) -> usize {
        StreamKind::ALL.iter().map(|k| self.streams(*k).len()).sum()
    }

    /// Parse the stream table at the cursor
    pub fn read<S: SeekableStream>(stream: &mut S) -> BdResult<Self> {
        read_record(stream, LengthWidth::U16, |s, span| {
            if span.is_empty() {
                return Ok(StreamTable::default());
            }
            s.skip(2)?;
            let counts = s.read_bytes::<8>()?;
            s.skip(4)?;

            let mut table = StreamTable {
                length: span.length as u16,
                ..StreamTable::default()
            };
            table.primary_video = read_list(s, StreamKind::PrimaryVideo, counts[0])?;
            table.primary_audio = read_list(s, StreamKind::PrimaryAudio, counts[1])?;
            // PiP PG streams follow the primary PG streams directly.
            table.presentation_graphics =
                read_list(s, StreamKind::PresentationGraphics, counts[2])?;
            table.pip_presentation_graphics =
                read_list(s, StreamKind::PipPresentationGraphics, counts[6])?;
            table.interactive_graphics =
                read_list(s, StreamKind::InteractiveGraphics, counts[3])?;
            table.secondary_audio = read_list(s, StreamKind::SecondaryAudio, counts[4])?;
            table.secondary_video = read_list(s, StreamKind::SecondaryVideo, counts[5])?;
            table.dolby_vision = read_list(s, StreamKind::DolbyVision, counts[7])?;
            Ok(table)
        })
    }
}

fn read_list<S: SeekableStream>(s: &mut S, kind: StreamKind, count: u8) -> BdResult<Vec<Stream>> {
    let mut streams = Vec::with_capacity(count as usize);
    for i in 0..count {
        streams.push(Stream::read(s, kind).context(|| format!("{} stream {}", kind.name(), i))?);
    }
    Ok(streams)
}
