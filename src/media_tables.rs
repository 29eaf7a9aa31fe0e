//! Code tables shared by MPLS, CLPI and INDX. Decoded structures keep raw codes;
//! these lookups give display names and classify stream coding types.

pub const STREAM_TYPE_VIDEO_MPEG1: u8 = 0x01;
pub const STREAM_TYPE_VIDEO_MPEG2: u8 = 0x02;
pub const STREAM_TYPE_AUDIO_MPEG1: u8 = 0x03;
pub const STREAM_TYPE_AUDIO_MPEG2: u8 = 0x04;
pub const STREAM_TYPE_VIDEO_H264: u8 = 0x1b;
pub const STREAM_TYPE_VIDEO_H264_MVC: u8 = 0x20;
pub const STREAM_TYPE_VIDEO_HEVC: u8 = 0x24;
pub const STREAM_TYPE_AUDIO_LPCM: u8 = 0x80;
pub const STREAM_TYPE_AUDIO_AC3: u8 = 0x81;
pub const STREAM_TYPE_AUDIO_DTS: u8 = 0x82;
pub const STREAM_TYPE_AUDIO_TRUHD: u8 = 0x83;
pub const STREAM_TYPE_AUDIO_AC3PLUS: u8 = 0x84;
pub const STREAM_TYPE_AUDIO_DTSHD: u8 = 0x85;
pub const STREAM_TYPE_AUDIO_DTSHD_MASTER: u8 = 0x86;
pub const STREAM_TYPE_SUB_PG: u8 = 0x90;
pub const STREAM_TYPE_SUB_IG: u8 = 0x91;
pub const STREAM_TYPE_SUB_TEXT: u8 = 0x92;
pub const STREAM_TYPE_AUDIO_AC3PLUS_SECONDARY: u8 = 0xa1;
pub const STREAM_TYPE_AUDIO_DTSHD_SECONDARY: u8 = 0xa2;
pub const STREAM_TYPE_VIDEO_VC1: u8 = 0xea;

/// Broad family of a stream coding type; selects the attribute layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodingFamily {
    Video,
    Hevc,
    Audio,
    Graphics,
    Text,
}

pub fn coding_family(code: u8) -> Option<CodingFamily> {
    match code {
        STREAM_TYPE_VIDEO_MPEG1
        | STREAM_TYPE_VIDEO_MPEG2
        | STREAM_TYPE_VIDEO_H264
        | STREAM_TYPE_VIDEO_H264_MVC
        | STREAM_TYPE_VIDEO_VC1 => Some(CodingFamily::Video),
        STREAM_TYPE_VIDEO_HEVC => Some(CodingFamily::Hevc),
        STREAM_TYPE_AUDIO_MPEG1
        | STREAM_TYPE_AUDIO_MPEG2
        | STREAM_TYPE_AUDIO_LPCM..=STREAM_TYPE_AUDIO_DTSHD_MASTER
        | STREAM_TYPE_AUDIO_AC3PLUS_SECONDARY
        | STREAM_TYPE_AUDIO_DTSHD_SECONDARY => Some(CodingFamily::Audio),
        STREAM_TYPE_SUB_PG | STREAM_TYPE_SUB_IG => Some(CodingFamily::Graphics),
        STREAM_TYPE_SUB_TEXT => Some(CodingFamily::Text),
        _ => None,
    }
}

pub fn stream_codec_name(code: u8) -> Option<&'static str> {
    Some(match code {
        STREAM_TYPE_VIDEO_MPEG1 => "MPEG1 VIDEO",
        STREAM_TYPE_VIDEO_MPEG2 => "MPEG2 VIDEO",
        STREAM_TYPE_AUDIO_MPEG1 => "MPEG1 AUDIO",
        STREAM_TYPE_AUDIO_MPEG2 => "MPEG2 AUDIO",
        STREAM_TYPE_VIDEO_H264 => "H264 VIDEO",
        STREAM_TYPE_VIDEO_H264_MVC => "H264 MVC (STEREOSCOPIC 3D) VIDEO",
        STREAM_TYPE_VIDEO_HEVC => "HEVC VIDEO",
        STREAM_TYPE_AUDIO_LPCM => "LPCM AUDIO",
        STREAM_TYPE_AUDIO_AC3 => "AC3 AUDIO",
        STREAM_TYPE_AUDIO_DTS => "DTS AUDIO",
        STREAM_TYPE_AUDIO_TRUHD => "TRUEHD AUDIO",
        STREAM_TYPE_AUDIO_AC3PLUS => "AC3PLUS AUDIO",
        STREAM_TYPE_AUDIO_DTSHD => "DTSHD AUDIO",
        STREAM_TYPE_AUDIO_DTSHD_MASTER => "DTSHD MASTER AUDIO",
        STREAM_TYPE_SUB_PG => "PRESENTATION GRAPHICS",
        STREAM_TYPE_SUB_IG => "INTERACTIVE GRAPHICS",
        STREAM_TYPE_SUB_TEXT => "TEXT SUBTITLE",
        STREAM_TYPE_AUDIO_AC3PLUS_SECONDARY => "AC3PLUS SECONDARY AUDIO",
        STREAM_TYPE_AUDIO_DTSHD_SECONDARY => "DTSHD SECONDARY AUDIO",
        STREAM_TYPE_VIDEO_VC1 => "VC1 VIDEO",
        _ => return None,
    })
}

pub fn video_format_name(code: u8) -> Option<&'static str> {
    Some(match code {
        1 => "480i",
        2 => "576i",
        3 => "480p",
        4 => "1080i",
        5 => "720p",
        6 => "1080p",
        7 => "576p",
        8 => "2160p",
        _ => return None,
    })
}

/// Frame rate as a rational `(numerator, denominator)`.
pub fn video_rate(code: u8) -> Option<(u32, u32)> {
    Some(match code {
        1 => (24000, 1001),
        2 => (24, 1),
        3 => (25, 1),
        4 => (30000, 1001),
        6 => (50, 1),
        7 => (60000, 1001),
        _ => return None,
    })
}

pub fn aspect_ratio_name(code: u8) -> Option<&'static str> {
    match code {
        2 => Some("4:3"),
        3 => Some("16:9"),
        _ => None,
    }
}

pub fn audio_format_name(code: u8) -> Option<&'static str> {
    Some(match code {
        1 => "Mono",
        3 => "Stereo",
        6 => "Multi-Channel",
        12 => "Stereo + Multi-Channel",
        _ => return None,
    })
}

pub fn audio_rate_hz(code: u8) -> Option<u32> {
    match code {
        1 => Some(48_000),
        4 => Some(96_000),
        5 => Some(192_000),
        // core rate plus extension rate
        12 => Some(192_000),
        14 => Some(96_000),
        _ => None,
    }
}

pub fn character_code_name(code: u8) -> Option<&'static str> {
    Some(match code {
        0x01 => "UTF-8",
        0x02 => "UTF-16BE",
        0x03 => "Shift-JIS",
        0x04 => "EUC-KR",
        0x05 => "GB18030-2000",
        0x06 => "GB2312",
        0x07 => "BIG5",
        _ => return None,
    })
}

pub fn clip_application_name(code: u8) -> Option<&'static str> {
    Some(match code {
        1 => "Main TS for a main-path of Movie",
        2 => "Main TS for a main-path of Time based slide show",
        3 => "Main TS for a main-path of Browsable slide show",
        4 => "Sub TS for a sub-path of Browsable slide show",
        5 => "Sub TS for a sub-path of Interactive Graphics menu",
        6 => "Sub TS for a sub-path of Text subtitle",
        7 => "Sub TS for a sub-path of one or more elementary streams path",
        8 => "Sub TS for a main-path of Enhanced LR View",
        _ => return None,
    })
}

pub fn playback_type_name(code: u8) -> Option<&'static str> {
    Some(match code {
        1 => "Sequential",
        2 => "Random",
        3 => "Shuffle",
        _ => return None,
    })
}

pub fn sub_path_type_name(code: u8) -> Option<&'static str> {
    Some(match code {
        2 => "Primary audio of the Browsable slideshow",
        3 => "Interactive Graphics presentation menu",
        4 => "Text Subtitle presentation",
        5 => "Out-of-mux Synchronous elementary streams",
        6 => "Out-of-mux Asynchronous Picture-in-Picture presentation",
        7 => "In-mux Synchronous Picture-in-Picture presentation",
        8 => "Stereoscopic Video",
        9 => "Stereoscopic Interactive Graphics menu",
        10 => "Dolby Vision Enhancement Layer",
        _ => return None,
    })
}

pub fn mark_type_name(code: u8) -> Option<&'static str> {
    match code {
        1 => Some("Entry Mark"),
        2 => Some("Link Point"),
        _ => None,
    }
}
