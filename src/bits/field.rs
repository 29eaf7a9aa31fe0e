//! Pure extraction of packed fields from already-read bytes and big endian words.

/// Mask for the `n` least significant bits.
pub fn mask(n: u32) -> u32 {
    if n >= 32 {
        u32::MAX
    } else {
        (1u32 << n) - 1
    }
}

/// Upper four bits of `b`, shifted down.
#[inline]
pub fn high_nibble(b: u8) -> u8 {
    (b & 0xF0) >> 4
}

/// Lower four bits of `b`.
#[inline]
pub fn low_nibble(b: u8) -> u8 {
    b & 0x0F
}

/// True when any bit of `mask` is set in `b`.
#[inline]
pub fn flag(b: u8, mask: u8) -> bool {
    b & mask != 0
}

/// Extract `(word & mask) >> shift`.
#[inline]
pub fn bits(word: u32, mask: u32, shift: u32) -> u32 {
    (word & mask) >> shift
}

/// Same as [`bits`] over a wider window (the CPI stream header is read as 40 bits).
#[inline]
pub fn bits64(window: u64, mask: u64, shift: u32) -> u64 {
    (window & mask) >> shift
}
