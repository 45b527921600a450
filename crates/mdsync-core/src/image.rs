//! Packed periodic image flags.
//!
//! Engines record how many times each atom has crossed each periodic
//! boundary as three signed counts packed into one integer word. Each
//! axis occupies `AXIS_BITS` bits holding `count + 2^(AXIS_BITS-1)`; x is
//! in the low bits, z in the high bits. 32-bit words use 10 bits per axis and
//! 64-bit words use 21.

use std::fmt;

/// Signed boundary-crossing counts along x, y and z.
pub type ImageCounts = [i32; 3];

/// An integer word holding packed [`ImageCounts`].
///
/// Counts outside `[-2^(AXIS_BITS-1), 2^(AXIS_BITS-1))` wrap on encode,
/// as they do inside the engine.
pub trait ImageWord: Copy + PartialEq + Default + fmt::Debug + 'static {
    /// Bits per axis.
    const AXIS_BITS: u32;

    /// Pack three counts into a word.
    fn encode(counts: ImageCounts) -> Self;

    /// Unpack a word into three counts.
    fn decode(self) -> ImageCounts;

    /// The word for an atom that has never crossed a boundary.
    fn home() -> Self {
        Self::encode([0, 0, 0])
    }
}

fn encode_raw(counts: ImageCounts, bits: u32) -> i64 {
    let mask = (1i64 << bits) - 1;
    let offset = 1i64 << (bits - 1);
    let [x, y, z] = counts.map(|c| (i64::from(c) + offset) & mask);
    (z << (2 * bits)) | (y << bits) | x
}

fn decode_raw(raw: i64, bits: u32) -> ImageCounts {
    let mask = (1i64 << bits) - 1;
    let offset = 1i64 << (bits - 1);
    [
        ((raw & mask) - offset) as i32,
        (((raw >> bits) & mask) - offset) as i32,
        (((raw >> (2 * bits)) & mask) - offset) as i32,
    ]
}

impl ImageWord for i32 {
    const AXIS_BITS: u32 = 10;

    fn encode(counts: ImageCounts) -> Self {
        encode_raw(counts, Self::AXIS_BITS) as i32
    }

    fn decode(self) -> ImageCounts {
        decode_raw(i64::from(self), Self::AXIS_BITS)
    }
}

impl ImageWord for i64 {
    const AXIS_BITS: u32 = 21;

    fn encode(counts: ImageCounts) -> Self {
        encode_raw(counts, Self::AXIS_BITS)
    }

    fn decode(self) -> ImageCounts {
        decode_raw(self, Self::AXIS_BITS)
    }
}
