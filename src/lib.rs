pub mod bits;
pub use bits::{bits, bits64, flag, high_nibble, low_nibble, mask};

pub mod streams;
pub use streams::{LocalSeekableStream, SeekableStream};

pub mod errors;
pub use errors::{BdError, BdResult, ResultExt};

pub mod section;
pub use section::{read_header, ByteRange, Header, SectionTable, HEADER_SIZE};

pub mod record;
pub use record::{read_record, read_record_at, LengthWidth, RecordSpan};

pub mod extensions;
pub use extensions::{
    read_extensions, ExtensionEntryMeta, ExtensionPayload, ExtensionTable, NoExtensionPayload,
};

pub mod media_tables;

pub mod mpls;
pub use mpls::{read_local_mpls, read_mpls, Mpls};

pub mod clpi;
pub use clpi::{read_clpi, read_local_clpi, Clpi};

pub mod indx;
pub use indx::{read_indx, read_local_indx, Indx};

pub mod mobj;
pub use mobj::{read_local_mobj, read_mobj, Mobj};

pub mod bclk;
pub use bclk::{read_bclk, read_local_bclk, Bclk};

pub mod database;
pub use database::{read_database, read_local_database, ContainerKind, Database};
