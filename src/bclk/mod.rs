/*
# BCLK (Sound Data)

 `BDMV/AUXDATA/sound.bdmv`: the short LPCM clips played as menu button sounds. The
 SoundIndex section describes every clip; the SoundData section holds the samples.
*/

pub mod sound_data;
pub mod sound_index;

pub use sound_data::{read_sound_data, Sound};
pub use sound_index::{read_sound_index, SoundAttributes, SoundIndex};

use serde::Serialize;
use std::path::Path;

use crate::errors::{BdResult, ResultExt};
use crate::extensions::{read_extensions, ExtensionTable, NoExtensionPayload};
use crate::section::{read_header, Header};
use crate::streams::{LocalSeekableStream, SeekableStream};

pub const BCLK_TYPE_INDICATOR: &str = "BCLK";

pub const BCLK_SECTIONS: [&str; 3] = ["SoundIndex", "SoundData", "Extensions"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bclk {
    pub header: Header,
    pub sound_index: SoundIndex,
    pub sounds: Vec<Sound>,
    pub extensions: Option<ExtensionTable<NoExtensionPayload>>,
}

/// Decode `sound.bdmv` from a local path
pub fn read_local_bclk<P: AsRef<Path>>(path: P) -> BdResult<Bclk> {
    let mut stream = LocalSeekableStream::open(path)?;
    read_bclk(&mut stream)
}

pub fn read_bclk<S: SeekableStream>(stream: &mut S) -> BdResult<Bclk> {
    let header =
        read_header(stream, BCLK_TYPE_INDICATOR, &BCLK_SECTIONS).context(|| "BCLK header")?;
    let sections = &header.sections;

    let sound_index = read_sound_index(stream, sections.range(0)).context(|| "BCLK SoundIndex")?;
    let sounds =
        read_sound_data(stream, sections.range(1), &sound_index).context(|| "BCLK SoundData")?;
    let extensions =
        read_extensions(stream, sections.extensions()).context(|| "BCLK Extensions")?;

    log::debug!("BCLK {}: {} sounds", header.version_number, sounds.len());

    Ok(Bclk {
        header,
        sound_index,
        sounds,
        extensions,
    })
}
