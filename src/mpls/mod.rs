/*
# MPLS (Movie PlayList)

 `BDMV/PLAYLIST/NNNNN.mpls`: the ordered PlayItems that make up a title, the SubPaths
 that run alongside them, chapter marks, and optional extension data.
*/

pub mod app_info;
pub mod ext_mvc;
pub mod ext_pip;
pub mod ext_static_metadata;
pub mod extensions;
pub mod marks;
pub mod play_item;
pub mod play_list;
pub mod stream;
pub mod sub_path;
pub mod user_options;


pub use app_info::{read_app_info, AppInfo};
pub use extensions::{MplsExtension, REJECTED_LENGTH_SENTINEL};
pub use marks::{read_marks, PlayListMark, PlayListMarks};
pub use play_item::{PlayItem, PlayItemEntry};
pub use play_list::{read_play_list, PlayList};
pub use stream::{Stream, StreamAttributes, StreamEntry, StreamKind, StreamTable};
pub use sub_path::{SubPath, SubPlayItem};
pub use user_options::UserOptions;

use serde::Serialize;
use std::path::Path;

use crate::errors::{BdResult, ResultExt};
use crate::extensions::{read_extensions, ExtensionTable};
use crate::section::{read_header, Header};
use crate::streams::{LocalSeekableStream, SeekableStream};

pub const MPLS_TYPE_INDICATOR: &str = "MPLS";

/// Section names in file order.
pub const MPLS_SECTIONS: [&str; 4] = ["AppInfo", "PlayList", "PlayListMark", "Extensions"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mpls {
    pub header: Header,
    pub app_info: AppInfo,
    pub play_list: PlayList,
    pub marks: PlayListMarks,
    pub extensions: Option<ExtensionTable<MplsExtension>>,
}

/// Decode a playlist file from a local path
pub fn read_local_mpls<P: AsRef<Path>>(path: P) -> BdResult<Mpls> {
    let mut stream = LocalSeekableStream::open(path)?;
    read_mpls(&mut stream)
}

pub fn read_mpls<S: SeekableStream>(stream: &mut S) -> BdResult<Mpls> {
    let header =
        read_header(stream, MPLS_TYPE_INDICATOR, &MPLS_SECTIONS).context(|| "MPLS header")?;
    let sections = &header.sections;

    let app_info = read_app_info(stream, sections.range(0)).context(|| "MPLS AppInfo")?;
    let play_list = read_play_list(stream, sections.range(1)).context(|| "MPLS PlayList")?;
    let marks = read_marks(stream, sections.range(2)).context(|| "MPLS PlayListMark")?;
    let extensions =
        read_extensions(stream, sections.extensions()).context(|| "MPLS Extensions")?;

    log::debug!(
        "MPLS {}: {} play items, {} sub paths, {} marks",
        header.version_number,
        play_list.play_items.len(),
        play_list.sub_paths.len(),
        marks.marks.len()
    );

    Ok(Mpls {
        header,
        app_info,
        play_list,
        marks,
        extensions,
    })
}
