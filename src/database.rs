//! Container detection and format-agnostic decoding.

use serde::Serialize;
use std::path::Path;

use crate::bclk::{read_bclk, Bclk, BCLK_TYPE_INDICATOR};
use crate::bits::reader::ascii;
use crate::clpi::{read_clpi, Clpi, CLPI_TYPE_INDICATOR};
use crate::errors::{BdError, BdResult};
use crate::indx::{read_indx, Indx, INDX_TYPE_INDICATOR};
use crate::mobj::{read_mobj, Mobj, MOBJ_TYPE_INDICATOR};
use crate::mpls::{read_mpls, Mpls, MPLS_TYPE_INDICATOR};
use crate::streams::{LocalSeekableStream, SeekableStream};

/// The database file kinds found under `BDMV/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContainerKind {
    Mpls,
    Clpi,
    Mobj,
    Indx,
    Bclk,
}

impl ContainerKind {
    pub const ALL: [ContainerKind; 5] = [
        ContainerKind::Mpls,
        ContainerKind::Clpi,
        ContainerKind::Mobj,
        ContainerKind::Indx,
        ContainerKind::Bclk,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ContainerKind::Mpls => "MPLS",
            ContainerKind::Clpi => "CLPI",
            ContainerKind::Mobj => "MOBJ",
            ContainerKind::Indx => "INDX",
            ContainerKind::Bclk => "BCLK",
        }
    }

    /// The 4-byte type indicator a file of this kind starts with.
    pub fn type_indicator(&self) -> &'static str {
        match self {
            ContainerKind::Mpls => MPLS_TYPE_INDICATOR,
            ContainerKind::Clpi => CLPI_TYPE_INDICATOR,
            ContainerKind::Mobj => MOBJ_TYPE_INDICATOR,
            ContainerKind::Indx => INDX_TYPE_INDICATOR,
            ContainerKind::Bclk => BCLK_TYPE_INDICATOR,
        }
    }

    pub fn from_type_indicator(indicator: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.type_indicator() == indicator)
    }

    /// Identify a stream by its type indicator. The cursor is left at offset 0.
    pub fn detect<S: SeekableStream>(stream: &mut S) -> BdResult<Self> {
        stream.seek_absolute(0)?;
        let found = ascii(&stream.read_bytes::<4>()?);
        stream.seek_absolute(0)?;
        Self::from_type_indicator(&found).ok_or(BdError::BadTypeIndicator {
            expected: "MPLS, HDMV, MOBJ, INDX or BCLK",
            found,
        })
    }
}

/// Any decoded database file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "container")]
pub enum Database {
    Mpls(Mpls),
    Clpi(Clpi),
    Mobj(Mobj),
    Indx(Indx),
    Bclk(Bclk),
}

impl Database {
    pub fn kind(&self) -> ContainerKind {
        match self {
            Database::Mpls(_) => ContainerKind::Mpls,
            Database::Clpi(_) => ContainerKind::Clpi,
            Database::Mobj(_) => ContainerKind::Mobj,
            Database::Indx(_) => ContainerKind::Indx,
            Database::Bclk(_) => ContainerKind::Bclk,
        }
    }
}

/// Detect and decode a database file from a local path
pub fn read_local_database<P: AsRef<Path>>(path: P) -> BdResult<Database> {
    let mut stream = LocalSeekableStream::open(path)?;
    read_database(&mut stream)
}

/// Detect the container kind and delegate to its decoder
pub fn read_database<S: SeekableStream>(stream: &mut S) -> BdResult<Database> {
    let kind = ContainerKind::detect(stream)?;
    log::debug!("detected {} database", kind.name());

    Ok(match kind {
        ContainerKind::Mpls => Database::Mpls(read_mpls(stream)?),
        ContainerKind::Clpi => Database::Clpi(read_clpi(stream)?),
        ContainerKind::Mobj => Database::Mobj(read_mobj(stream)?),
        ContainerKind::Indx => Database::Indx(read_indx(stream)?),
        ContainerKind::Bclk => Database::Bclk(read_bclk(stream)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_detect_kinds() {
        for kind in ContainerKind::ALL {
            let mut data = kind.type_indicator().as_bytes().to_vec();
            data.extend_from_slice(b"0200");
            let mut s = Cursor::new(data);
            assert_eq!(ContainerKind::detect(&mut s).unwrap(), kind);
            assert_eq!(s.position(), 0);
        }
    }

    #[test]
    fn test_clip_info_uses_hdmv_indicator() {
        assert_eq!(
            ContainerKind::from_type_indicator("HDMV"),
            Some(ContainerKind::Clpi)
        );
        assert_eq!(ContainerKind::Clpi.name(), "CLPI");
    }

    #[test]
    fn test_detect_unknown() {
        let err = ContainerKind::detect(&mut Cursor::new(b"ftypisom".to_vec())).unwrap_err();
        match err {
            BdError::BadTypeIndicator { found, .. } => assert_eq!(found, "ftyp"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_detect_short_stream() {
        let err = ContainerKind::detect(&mut Cursor::new(b"MP".to_vec())).unwrap_err();
        assert!(matches!(err, BdError::ShortRead { .. }));
    }
}
