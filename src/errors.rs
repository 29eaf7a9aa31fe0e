use std::io::{self, SeekFrom};
use thiserror::Error;

/// Enumeration of all possible errors that can occur while decoding a BD-ROM database file
#[derive(Debug, Error)]
pub enum BdError {
    /// The stream ended before a field could be read.
    #[error("short read: wanted {wanted} bytes at offset {offset}")]
    ShortRead {
        offset: u64,
        wanted: usize,
        #[source]
        source: io::Error,
    },

    /// The stream refused a seek.
    #[error("seek to {pos:?} failed")]
    SeekFailure {
        pos: SeekFrom,
        #[source]
        source: io::Error,
    },

    /// Header offsets or extension table bounds do not describe a consistent file.
    #[error("section bounds violation: {message}")]
    SectionBoundsInvariantViolation { message: String },

    /// The 4-byte type indicator does not name the requested container.
    #[error("bad type indicator {found:?}, expected {expected:?}")]
    BadTypeIndicator {
        expected: &'static str,
        found: String,
    },

    /// A byte code selecting a variant has no known decoder.
    #[error("unknown {what} tag {tag:#x} at offset {offset}")]
    UnknownVariantTag {
        what: &'static str,
        tag: u32,
        offset: u64,
    },

    /// A variant decoder rejected its payload.
    #[error("failed to decode {what}: {message}")]
    VariantDecodeFailure { what: &'static str, message: String },

    /// A fatal error annotated with the record or section it occurred in.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<BdError>,
    },

    /// Opening a local file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl BdError {
    pub fn bounds(message: impl Into<String>) -> Self {
        BdError::SectionBoundsInvariantViolation {
            message: message.into(),
        }
    }

    pub fn variant(what: &'static str, message: impl Into<String>) -> Self {
        BdError::VariantDecodeFailure {
            what,
            message: message.into(),
        }
    }

    /// The innermost error, with every `Context` layer peeled off.
    pub fn root(&self) -> &BdError {
        match self {
            BdError::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Attach location context to fatal errors as they bubble up.
pub trait ResultExt<T> {
    fn context<C, F>(self, f: F) -> BdResult<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T> ResultExt<T> for BdResult<T> {
    fn context<C, F>(self, f: F) -> BdResult<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|source| BdError::Context {
            context: f().into(),
            source: Box::new(source),
        })
    }
}

// Type alias for Result with BdError
pub type BdResult<T> = Result<T, BdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_peels_context() {
        let err: BdResult<()> = Err(BdError::bounds("AppInfo stops after EOF"));
        let err = err
            .context(|| "PlayList")
            .context(|| "MPLS")
            .unwrap_err();
        assert!(matches!(
            err.root(),
            BdError::SectionBoundsInvariantViolation { .. }
        ));
        assert_eq!(
            err.to_string(),
            "MPLS: PlayList: section bounds violation: AppInfo stops after EOF"
        );
    }
}
