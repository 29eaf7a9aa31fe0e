/*
# Title Indexes

 The entry points of a disc: the first playback object, the top menu, and the
 numbered titles. Every entry is a fixed 12-byte object reference:

 ```text
 object_type:2 access_type:2 reserved:28
 playback_type:2 reserved:14
 HDMV: movie_object_id u16, reserved [4]
 BD-J: bdj_object_name [5], reserved [1]
 ```
*/

use serde::Serialize;

use crate::bits::reader::ascii;
use crate::bits::bits;
use crate::errors::{BdError, BdResult, ResultExt};
use crate::record::{read_record, LengthWidth};
use crate::section::ByteRange;
use crate::streams::SeekableStream;

pub const OBJECT_TYPE_HDMV: u8 = 1;
pub const OBJECT_TYPE_BDJ: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indexes {
    pub length: u32,
    pub first_playback: Title,
    pub top_menu: Title,
    pub number_of_titles: u16,
    pub titles: Vec<Title>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    pub object_type: u8,
    /// Reserved for first playback and top menu.
    pub access_type: u8,
    pub object: TitleObject,
}

/// What a title entry launches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum TitleObject {
    Hdmv {
        playback_type: u8,
        movie_object_id: u16,
    },
    Bdj {
        playback_type: u8,
        name: String,
    },
}

impl Title {
    pub fn read<S: SeekableStream>(stream: &mut S) -> BdResult<Self> {
        let offset = stream.tell()?;
        let b0 = stream.read_u8()? as u32;
        let object_type = bits(b0, 0xC0, 6) as u8;
        let access_type = bits(b0, 0x30, 4) as u8;
        stream.skip(3)?;
        let playback_type = bits(stream.read_u8()? as u32, 0xC0, 6) as u8;
        stream.skip(1)?;

        let object = match object_type {
            OBJECT_TYPE_HDMV => {
                let movie_object_id = stream.read_u16()?;
                stream.skip(4)?;
                TitleObject::Hdmv {
                    playback_type,
                    movie_object_id,
                }
            }
            OBJECT_TYPE_BDJ => {
                let name = ascii(&stream.read_bytes::<5>()?);
                stream.skip(1)?;
                TitleObject::Bdj {
                    playback_type,
                    name,
                }
            }
            other => {
                return Err(BdError::UnknownVariantTag {
                    what: "title object type",
                    tag: other as u32,
                    offset,
                })
            }
        };

        Ok(Title {
            object_type,
            access_type,
            object,
        })
    }

    /// The movie object an HDMV title starts, if any.
    pub fn movie_object_id(&self) -> Option<u16> {
        match self.object {
            TitleObject::Hdmv {
                movie_object_id, ..
            } => Some(movie_object_id),
            TitleObject::Bdj { .. } => None,
        }
    }
}

pub fn read_indexes<S: SeekableStream>(stream: &mut S, range: ByteRange) -> BdResult<Indexes> {
    stream.seek_absolute(range.start)?;
    read_record(stream, LengthWidth::U32, |s, span| {
        let first_playback = Title::read(s).context(|| "first playback")?;
        let top_menu = Title::read(s).context(|| "top menu")?;
        let number_of_titles = s.read_u16()?;
        let mut titles = Vec::with_capacity(number_of_titles as usize);
        for i in 0..number_of_titles {
            titles.push(Title::read(s).context(|| format!("title {}", i + 1))?);
        }
        Ok(Indexes {
            length: span.length,
            first_playback,
            top_menu,
            number_of_titles,
            titles,
        })
    })
}
