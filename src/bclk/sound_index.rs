use serde::Serialize;

use crate::bits::{bits, high_nibble, low_nibble};
use crate::errors::{BdError, BdResult, ResultExt};
use crate::record::{read_record, LengthWidth};
use crate::section::ByteRange;
use crate::streams::SeekableStream;

/// Per-sound attribute record: two code bytes, `data_index u32`, `byte_count u32`.
pub const SOUND_ATTRIBUTES_SIZE: u64 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SoundIndex {
    pub length: u32,
    pub number_of_sounds: u8,
    pub sounds: Vec<SoundAttributes>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SoundAttributes {
    pub number_of_channels: u8,
    pub sample_rate: u32,
    pub bits_per_sample: u8,
    /// Offset of the samples from the start of the SoundData section.
    pub data_index: u32,
    pub byte_count: u32,
    pub number_of_frames: u32,
}

impl SoundAttributes {
    pub fn read<S: SeekableStream>(stream: &mut S) -> BdResult<Self> {
        let offset = stream.tell()?;
        let format = stream.read_u8()?;
        let number_of_channels = match high_nibble(format) {
            1 => 1,
            3 => 2,
            code => return Err(unknown("channel configuration", code, offset)),
        };
        let sample_rate = match low_nibble(format) {
            1 => 48_000,
            code => return Err(unknown("sample rate", code, offset)),
        };
        let bits_per_sample = match bits(stream.read_u8()? as u32, 0xC0, 6) as u8 {
            1 => 16,
            code => return Err(unknown("bits per sample", code, offset + 1)),
        };
        let data_index = stream.read_u32()?;
        let byte_count = stream.read_u32()?;
        let frame_size = (bits_per_sample / 8) as u32 * number_of_channels as u32;

        Ok(SoundAttributes {
            number_of_channels,
            sample_rate,
            bits_per_sample,
            data_index,
            byte_count,
            number_of_frames: byte_count / frame_size,
        })
    }

    /// Number of 16-bit samples across all channels.
    pub fn sample_count(&self) -> u64 {
        self.number_of_frames as u64 * self.number_of_channels as u64
    }

    /// Playback length in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.number_of_frames as u64 * 1000 / self.sample_rate as u64
    }
}

fn unknown(what: &'static str, code: u8, offset: u64) -> BdError {
    BdError::UnknownVariantTag {
        what,
        tag: code as u32,
        offset,
    }
}

/// Parse the SoundIndex section
pub fn read_sound_index<S: SeekableStream>(
    stream: &mut S,
    range: ByteRange,
) -> BdResult<SoundIndex> {
    stream.seek_absolute(range.start)?;
    read_record(stream, LengthWidth::U32, |s, span| {
        if span.is_empty() {
            return Ok(SoundIndex::default());
        }
        s.skip(1)?;
        let number_of_sounds = s.read_u8()?;
        let mut sounds = Vec::with_capacity(number_of_sounds as usize);
        for i in 0..number_of_sounds {
            sounds.push(SoundAttributes::read(s).context(|| format!("sound {}", i))?);
        }
        Ok(SoundIndex {
            length: span.length,
            number_of_sounds,
            sounds,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_sound_index() {
        let data = [
            0x00, 0x00, 0x00, 0x16, // length 22
            0x00, // reserved
            0x02, // two sounds
            0x11, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08, // mono, 8 bytes
            0x31, 0x40, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x0A, // stereo, 10 bytes
        ];
        let index = read_sound_index(&mut Cursor::new(&data[..]), ByteRange::new(0, 26)).unwrap();
        assert_eq!(index.number_of_sounds, 2);

        let mono = index.sounds[0];
        assert_eq!(mono.number_of_channels, 1);
        assert_eq!(mono.sample_rate, 48_000);
        assert_eq!(mono.bits_per_sample, 16);
        assert_eq!(mono.number_of_frames, 4);
        assert_eq!(mono.sample_count(), 4);

        let stereo = index.sounds[1];
        assert_eq!(stereo.number_of_channels, 2);
        assert_eq!(stereo.data_index, 8);
        // 10 bytes hold two whole stereo frames
        assert_eq!(stereo.number_of_frames, 2);
        assert_eq!(stereo.sample_count(), 4);
    }

    #[test]
    fn test_unknown_channel_code_is_fatal() {
        let data = [
            0x00, 0x00, 0x00, 0x0C, 0x00, 0x01, // length 12, one sound
            0x21, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08,
        ];
        let err = read_sound_index(&mut Cursor::new(&data[..]), ByteRange::new(0, 16)).unwrap_err();
        match err.root() {
            BdError::UnknownVariantTag { what, tag, offset } => {
                assert_eq!(*what, "channel configuration");
                assert_eq!(*tag, 2);
                assert_eq!(*offset, 6);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unknown_bit_depth_is_fatal() {
        let data = [
            0x00, 0x00, 0x00, 0x0C, 0x00, 0x01, // length 12, one sound
            0x11, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08,
        ];
        let err = read_sound_index(&mut Cursor::new(&data[..]), ByteRange::new(0, 16)).unwrap_err();
        assert!(matches!(
            err.root(),
            BdError::UnknownVariantTag { tag: 2, offset: 7, .. }
        ));
    }
}
