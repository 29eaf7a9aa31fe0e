use serde::Serialize;

use super::user_options::UserOptions;
use crate::bits::flag;
use crate::errors::BdResult;
use crate::record::{read_record, LengthWidth};
use crate::section::ByteRange;
use crate::streams::SeekableStream;

/// Playlist-wide playback settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppInfo {
    pub length: u32,
    pub playback_type: u8,
    /// Meaningful for random (2) and shuffle (3) playback only.
    pub playback_count: u16,
    pub user_options: UserOptions,
    pub random_access_flag: bool,
    pub audio_mix_flag: bool,
    pub lossless_bypass_flag: bool,
    pub mvc_base_view_r_flag: bool,
    pub sdr_conversion_notification_flag: bool,
}

/// Parse the AppInfoPlayList section
pub fn read_app_info<S: SeekableStream>(stream: &mut S, range: ByteRange) -> BdResult<AppInfo> {
    stream.seek_absolute(range.start)?;
    read_record(stream, LengthWidth::U32, |s, span| {
        s.skip(1)?;
        let playback_type = s.read_u8()?;
        let playback_count = s.read_u16()?;
        let user_options = UserOptions::read(s)?;
        let flags = s.read_u8()?;
        s.skip(1)?;
        Ok(AppInfo {
            length: span.length,
            playback_type,
            playback_count,
            user_options,
            random_access_flag: flag(flags, 0x80),
            audio_mix_flag: flag(flags, 0x40),
            lossless_bypass_flag: flag(flags, 0x20),
            mvc_base_view_r_flag: flag(flags, 0x10),
            sdr_conversion_notification_flag: flag(flags, 0x08),
        })
    })
}
