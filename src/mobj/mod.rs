/*
# MOBJ (Movie Objects)

 `BDMV/MovieObject.bdmv`: the HDMV navigation programs that titles and menus jump
 into. Each movie object is a list of 12-byte navigation commands.
*/

pub mod movie_objects;
pub mod navigation_command;

pub use movie_objects::{read_movie_objects, MovieObject, MovieObjects};
pub use navigation_command::NavigationCommand;

use serde::Serialize;
use std::path::Path;

use crate::errors::{BdResult, ResultExt};
use crate::extensions::{read_extensions, ExtensionTable, NoExtensionPayload};
use crate::section::{read_header, Header};
use crate::streams::{LocalSeekableStream, SeekableStream};

pub const MOBJ_TYPE_INDICATOR: &str = "MOBJ";

pub const MOBJ_SECTIONS: [&str; 2] = ["MovieObjects", "Extensions"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mobj {
    pub header: Header,
    pub movie_objects: MovieObjects,
    /// No payloads are registered; entries are listed but never decoded.
    pub extensions: Option<ExtensionTable<NoExtensionPayload>>,
}

/// Decode `MovieObject.bdmv` from a local path
pub fn read_local_mobj<P: AsRef<Path>>(path: P) -> BdResult<Mobj> {
    let mut stream = LocalSeekableStream::open(path)?;
    read_mobj(&mut stream)
}

pub fn read_mobj<S: SeekableStream>(stream: &mut S) -> BdResult<Mobj> {
    let header =
        read_header(stream, MOBJ_TYPE_INDICATOR, &MOBJ_SECTIONS).context(|| "MOBJ header")?;
    let sections = &header.sections;

    let movie_objects =
        read_movie_objects(stream, sections.range(0)).context(|| "MOBJ MovieObjects")?;
    let extensions =
        read_extensions(stream, sections.extensions()).context(|| "MOBJ Extensions")?;

    log::debug!(
        "MOBJ {}: {} movie objects",
        header.version_number,
        movie_objects.movie_objects.len()
    );

    Ok(Mobj {
        header,
        movie_objects,
        extensions,
    })
}
