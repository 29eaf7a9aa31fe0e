/*
# INDX (Index Table)

 `BDMV/index.bdmv`: disc presentation hints and the title table that maps the first
 playback, top menu and numbered titles to HDMV movie objects or BD-J objects.
*/

pub mod app_info;
pub mod extensions;
pub mod indexes;

pub use app_info::{read_index_app_info, IndexAppInfo};
pub use extensions::{HevcCapabilities, IndxExtension};
pub use indexes::{read_indexes, Indexes, Title, TitleObject};

use serde::Serialize;
use std::path::Path;

use crate::errors::{BdResult, ResultExt};
use crate::extensions::{read_extensions, ExtensionTable};
use crate::section::{read_header, Header};
use crate::streams::{LocalSeekableStream, SeekableStream};

pub const INDX_TYPE_INDICATOR: &str = "INDX";

pub const INDX_SECTIONS: [&str; 3] = ["AppInfo", "Indexes", "Extensions"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indx {
    pub header: Header,
    pub app_info: IndexAppInfo,
    pub indexes: Indexes,
    pub extensions: Option<ExtensionTable<IndxExtension>>,
}

/// Decode `index.bdmv` from a local path
pub fn read_local_indx<P: AsRef<Path>>(path: P) -> BdResult<Indx> {
    let mut stream = LocalSeekableStream::open(path)?;
    read_indx(&mut stream)
}

pub fn read_indx<S: SeekableStream>(stream: &mut S) -> BdResult<Indx> {
    let header =
        read_header(stream, INDX_TYPE_INDICATOR, &INDX_SECTIONS).context(|| "INDX header")?;
    let sections = &header.sections;

    let app_info = read_index_app_info(stream, sections.range(0)).context(|| "INDX AppInfo")?;
    let indexes = read_indexes(stream, sections.range(1)).context(|| "INDX Indexes")?;
    let extensions =
        read_extensions(stream, sections.extensions()).context(|| "INDX Extensions")?;

    log::debug!(
        "INDX {}: {} titles",
        header.version_number,
        indexes.titles.len()
    );

    Ok(Indx {
        header,
        app_info,
        indexes,
        extensions,
    })
}
