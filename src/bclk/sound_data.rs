use serde::Serialize;

use super::sound_index::{SoundAttributes, SoundIndex};
use crate::errors::{BdError, BdResult, ResultExt};
use crate::section::ByteRange;
use crate::streams::SeekableStream;

/// Interleaved big-endian 16-bit LPCM samples of one sound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sound {
    pub number_of_channels: u8,
    pub samples: Vec<u16>,
}

impl Sound {
    /// Samples of `channel` in frame order.
    pub fn channel(&self, channel: u8) -> impl Iterator<Item = u16> + '_ {
        let step = self.number_of_channels.max(1) as usize;
        self.samples
            .iter()
            .skip(channel as usize)
            .step_by(step)
            .copied()
    }
}

/// Read the samples of every sound listed in `index` from the SoundData section.
pub fn read_sound_data<S: SeekableStream>(
    stream: &mut S,
    range: ByteRange,
    index: &SoundIndex,
) -> BdResult<Vec<Sound>> {
    index
        .sounds
        .iter()
        .enumerate()
        .map(|(i, attrs)| read_sound(stream, range, attrs).context(|| format!("sound {}", i)))
        .collect()
}

fn read_sound<S: SeekableStream>(
    stream: &mut S,
    range: ByteRange,
    attrs: &SoundAttributes,
) -> BdResult<Sound> {
    let start = range.start + attrs.data_index as u64;
    let byte_len = attrs.sample_count() * 2;
    if !range.contains_range(start, byte_len) {
        return Err(BdError::bounds(format!(
            "{} sample bytes at {} leave SoundData {}..{}",
            byte_len, start, range.start, range.stop
        )));
    }

    stream.seek_absolute(start)?;
    let mut samples = Vec::with_capacity(attrs.sample_count() as usize);
    for _ in 0..attrs.sample_count() {
        samples.push(stream.read_u16()?);
    }
    Ok(Sound {
        number_of_channels: attrs.number_of_channels,
        samples,
    })
}
