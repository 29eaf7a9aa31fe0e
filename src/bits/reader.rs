/*
# Bits Reader Module

 Byte-aligned big endian readers over any `Read` implementation. These are the raw
 building blocks behind `SeekableStream`, which adds offset-aware error reporting.

 Key components:
 - Integer readers: `read_u8()`, `read_u16_be()`, `read_u32_be()`, `read_u40_be()`
 - Fixed arrays: `read_array::<N>()`
 - Text helpers for the ASCII identifiers used throughout the BDMV tree
*/

use std::io::{self, Read};

/// Read one byte from a `Read` implementation.
pub fn read_u8<R: Read + ?Sized>(r: &mut R) -> io::Result<u8> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a 16-bit big endian value from `r`.
pub fn read_u16_be<R: Read + ?Sized>(r: &mut R) -> io::Result<u16> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_be_bytes(buf))
}

/// Read a 32-bit big endian value from `r`.
pub fn read_u32_be<R: Read + ?Sized>(r: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

/// Read a 40-bit big endian window into the low bits of a `u64`.
pub fn read_u40_be<R: Read + ?Sized>(r: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf[3..])?;
    Ok(u64::from_be_bytes(buf))
}

/// Read exactly `N` bytes.
pub fn read_array<R: Read + ?Sized, const N: usize>(r: &mut R) -> io::Result<[u8; N]> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

/// Lossy ASCII view of a fixed identifier such as a clip name or codec id.
pub fn ascii(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// ISO 639-2 language code; trailing NULs and spaces are dropped.
pub fn language(bytes: [u8; 3]) -> String {
    ascii(&bytes)
        .trim_end_matches(|c: char| c == '\0' || c == ' ')
        .to_string()
}
