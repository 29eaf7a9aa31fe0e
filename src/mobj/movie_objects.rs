use serde::Serialize;

use super::navigation_command::NavigationCommand;
use crate::bits::flag;
use crate::errors::{BdResult, ResultExt};
use crate::record::{read_record, LengthWidth};
use crate::section::ByteRange;
use crate::streams::SeekableStream;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MovieObjects {
    pub length: u32,
    pub number_of_movie_objects: u16,
    pub movie_objects: Vec<MovieObject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieObject {
    pub resume_intention_flag: bool,
    pub menu_call_mask: bool,
    pub title_search_mask: bool,
    pub number_of_navigation_commands: u16,
    pub navigation_commands: Vec<NavigationCommand>,
}

impl MovieObject {
    pub fn read<S: SeekableStream>(stream: &mut S) -> BdResult<Self> {
        let flags = stream.read_u8()?;
        stream.skip(1)?;
        let number_of_navigation_commands = stream.read_u16()?;
        let mut navigation_commands = Vec::with_capacity(number_of_navigation_commands as usize);
        for _ in 0..number_of_navigation_commands {
            navigation_commands.push(NavigationCommand::read(stream)?);
        }
        Ok(MovieObject {
            resume_intention_flag: flag(flags, 0x80),
            menu_call_mask: flag(flags, 0x40),
            title_search_mask: flag(flags, 0x20),
            number_of_navigation_commands,
            navigation_commands,
        })
    }
}

/// Parse the MovieObjects section
pub fn read_movie_objects<S: SeekableStream>(
    stream: &mut S,
    range: ByteRange,
) -> BdResult<MovieObjects> {
    stream.seek_absolute(range.start)?;
    read_record(stream, LengthWidth::U32, |s, span| {
        if span.is_empty() {
            return Ok(MovieObjects::default());
        }
        s.skip(4)?;
        let number_of_movie_objects = s.read_u16()?;
        let mut movie_objects = Vec::with_capacity(number_of_movie_objects as usize);
        for i in 0..number_of_movie_objects {
            movie_objects.push(MovieObject::read(s).context(|| format!("movie object {}", i))?);
        }
        Ok(MovieObjects {
            length: span.length,
            number_of_movie_objects,
            movie_objects,
        })
    })
}
