use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::bits::reader::{read_array, read_u16_be, read_u32_be, read_u40_be, read_u8};
use crate::errors::{BdError, BdResult};

/// Cursor-oriented access to a BD-ROM database source.
///
/// Every read reports the offset it started at when the source runs dry, and every
/// seek failure carries its target. Implemented for any `Read + Seek`.
pub trait SeekableStream: Read + Seek {
    /// Current cursor offset.
    fn tell(&mut self) -> BdResult<u64> {
        self.stream_position().map_err(|source| BdError::SeekFailure {
            pos: SeekFrom::Current(0),
            source,
        })
    }

    fn seek_absolute(&mut self, offset: u64) -> BdResult<u64> {
        seek_to(self, SeekFrom::Start(offset))
    }

    fn seek_by(&mut self, delta: i64) -> BdResult<u64> {
        seek_to(self, SeekFrom::Current(delta))
    }

    /// Step over `n` reserved bytes.
    fn skip(&mut self, n: u64) -> BdResult<()> {
        seek_to(self, SeekFrom::Current(n as i64)).map(|_| ())
    }

    /// End-of-stream offset. The cursor is restored afterwards.
    fn eof_offset(&mut self) -> BdResult<u64> {
        let here = self.tell()?;
        let eof = seek_to(self, SeekFrom::End(0))?;
        self.seek_absolute(here)?;
        Ok(eof)
    }

    fn read_u8(&mut self) -> BdResult<u8> {
        let at = self.tell()?;
        read_u8(self).map_err(|e| short_read(at, 1, e))
    }

    fn read_u16(&mut self) -> BdResult<u16> {
        let at = self.tell()?;
        read_u16_be(self).map_err(|e| short_read(at, 2, e))
    }

    fn read_u32(&mut self) -> BdResult<u32> {
        let at = self.tell()?;
        read_u32_be(self).map_err(|e| short_read(at, 4, e))
    }

    fn read_u40(&mut self) -> BdResult<u64> {
        let at = self.tell()?;
        read_u40_be(self).map_err(|e| short_read(at, 5, e))
    }

    fn read_bytes<const N: usize>(&mut self) -> BdResult<[u8; N]> {
        let at = self.tell()?;
        read_array::<_, N>(self).map_err(|e| short_read(at, N, e))
    }

    fn read_vec(&mut self, len: usize) -> BdResult<Vec<u8>> {
        let at = self.tell()?;
        let mut buf = vec![0u8; len];
        self.read_exact(&mut buf)
            .map_err(|e| short_read(at, len, e))?;
        Ok(buf)
    }
}

impl<T: Read + Seek + ?Sized> SeekableStream for T {}

fn seek_to<S: Seek + ?Sized>(stream: &mut S, pos: SeekFrom) -> BdResult<u64> {
    stream
        .seek(pos)
        .map_err(|source| BdError::SeekFailure { pos, source })
}

fn short_read(offset: u64, wanted: usize, source: io::Error) -> BdError {
    BdError::ShortRead {
        offset,
        wanted,
        source,
    }
}

/// Local file wrapper
pub struct LocalSeekableStream(BufReader<File>);

impl LocalSeekableStream {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(LocalSeekableStream(BufReader::new(File::open(path)?)))
    }
}

impl Read for LocalSeekableStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl Seek for LocalSeekableStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.0.seek(pos)
    }
}
