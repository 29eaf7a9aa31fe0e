pub mod field;
pub mod reader;

pub use field::{bits, bits64, flag, high_nibble, low_nibble, mask};
