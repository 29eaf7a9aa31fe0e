use serde::Serialize;

use crate::bits::flag;
use crate::errors::BdResult;
use crate::streams::SeekableStream;

/// 64-bit user operation mask. A set bit prohibits the operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserOptions {
    pub menu_call: bool,
    pub title_search: bool,
    pub chapter_search: bool,
    pub time_search: bool,
    pub skip_to_next_point: bool,
    pub skip_to_prev_point: bool,
    pub stop: bool,
    pub pause_on: bool,
    pub still_off: bool,
    pub forward_play: bool,
    pub backward_play: bool,
    pub resume: bool,
    pub move_up_selected_button: bool,
    pub move_down_selected_button: bool,
    pub move_left_selected_button: bool,
    pub move_right_selected_button: bool,
    pub select_button: bool,
    pub activate_button: bool,
    pub select_and_activate_button: bool,
    pub primary_audio_stream_number_change: bool,
    pub angle_number_change: bool,
    pub popup_on: bool,
    pub popup_off: bool,
    pub primary_pg_enable_disable: bool,
    pub primary_pg_stream_number_change: bool,
    pub secondary_video_enable_disable: bool,
    pub secondary_video_stream_number_change: bool,
    pub secondary_audio_enable_disable: bool,
    pub secondary_audio_stream_number_change: bool,
    pub secondary_pg_stream_number_change: bool,
    pub raw: u64,
}

impl UserOptions {
    pub fn read<S: SeekableStream>(stream: &mut S) -> BdResult<Self> {
        let b = stream.read_bytes::<8>()?;
        Ok(Self::from_bytes(b))
    }

    pub fn from_bytes(b: [u8; 8]) -> Self {
        UserOptions {
            menu_call: flag(b[0], 0x80),
            title_search: flag(b[0], 0x40),
            chapter_search: flag(b[0], 0x20),
            time_search: flag(b[0], 0x10),
            skip_to_next_point: flag(b[0], 0x08),
            skip_to_prev_point: flag(b[0], 0x04),
            stop: flag(b[0], 0x01),
            pause_on: flag(b[1], 0x80),
            still_off: flag(b[1], 0x20),
            forward_play: flag(b[1], 0x10),
            backward_play: flag(b[1], 0x08),
            resume: flag(b[1], 0x04),
            move_up_selected_button: flag(b[1], 0x02),
            move_down_selected_button: flag(b[1], 0x01),
            move_left_selected_button: flag(b[2], 0x80),
            move_right_selected_button: flag(b[2], 0x40),
            select_button: flag(b[2], 0x20),
            activate_button: flag(b[2], 0x10),
            select_and_activate_button: flag(b[2], 0x08),
            primary_audio_stream_number_change: flag(b[2], 0x04),
            angle_number_change: flag(b[2], 0x01),
            popup_on: flag(b[3], 0x80),
            popup_off: flag(b[3], 0x40),
            primary_pg_enable_disable: flag(b[3], 0x20),
            primary_pg_stream_number_change: flag(b[3], 0x10),
            secondary_video_enable_disable: flag(b[3], 0x08),
            secondary_video_stream_number_change: flag(b[3], 0x04),
            secondary_audio_enable_disable: flag(b[3], 0x02),
            secondary_audio_stream_number_change: flag(b[3], 0x01),
            secondary_pg_stream_number_change: flag(b[4], 0x40),
            raw: u64::from_be_bytes(b),
        }
    }
}
