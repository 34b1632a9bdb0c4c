//! Fixed-width two-state bit vectors.
//!
//! Every value that flows through a composed SoC (CSR storage, pad levels,
//! generator controls) is at most [`MAX_WIDTH`] bits wide and strictly
//! synchronous, so a masked `u64` is enough to model it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// The widest value a [`Bits`] can hold.
pub const MAX_WIDTH: u32 = 64;

/// A bit vector of `width` bits, bit 0 being the least significant.
///
/// Bits above `width` are always zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bits {
    width: u32,
    value: u64,
}

fn mask(width: u32) -> u64 {
    if width >= MAX_WIDTH {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

impl Bits {
    /// Creates a value of the given width, truncating `value` to fit.
    ///
    /// # Panics
    ///
    /// Panics if `width` exceeds [`MAX_WIDTH`].
    pub fn new(value: u64, width: u32) -> Self {
        assert!(
            width <= MAX_WIDTH,
            "width {width} exceeds the maximum of {MAX_WIDTH}"
        );
        Self {
            width,
            value: value & mask(width),
        }
    }

    /// All-zero value of the given width.
    pub fn zero(width: u32) -> Self {
        Self::new(0, width)
    }

    /// All-one value of the given width.
    pub fn ones(width: u32) -> Self {
        Self::new(u64::MAX, width)
    }

    /// A single bit.
    pub fn bit(value: bool) -> Self {
        Self::new(u64::from(value), 1)
    }

    /// Returns the width in bits.
    pub fn width(self) -> u32 {
        self.width
    }

    /// Returns the value as an unsigned integer.
    pub fn value(self) -> u64 {
        self.value
    }

    /// Returns `true` if every bit is zero.
    pub fn is_zero(self) -> bool {
        self.value == 0
    }

    /// Returns bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn get(self, index: u32) -> bool {
        assert!(
            index < self.width,
            "index {index} out of bounds for width {}",
            self.width
        );
        (self.value >> index) & 1 == 1
    }

    /// Returns a copy with bit `index` set to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn with_bit(self, index: u32, value: bool) -> Self {
        assert!(
            index < self.width,
            "index {index} out of bounds for width {}",
            self.width
        );
        let cleared = self.value & !(1u64 << index);
        Self {
            width: self.width,
            value: cleared | (u64::from(value) << index),
        }
    }

    /// Extracts `width` bits starting at bit `low`.
    ///
    /// # Panics
    ///
    /// Panics if the range runs past the end of the value.
    pub fn slice(self, low: u32, width: u32) -> Self {
        assert!(
            low + width <= self.width,
            "slice [{low}+:{width}] out of bounds for width {}",
            self.width
        );
        let shifted = if low >= MAX_WIDTH { 0 } else { self.value >> low };
        Self::new(shifted, width)
    }

    /// Concatenates `parts`, the first part landing in the least significant bits.
    ///
    /// # Panics
    ///
    /// Panics if the combined width exceeds [`MAX_WIDTH`].
    pub fn concat<I: IntoIterator<Item = Bits>>(parts: I) -> Self {
        let mut width = 0u32;
        let mut value = 0u64;
        for part in parts {
            assert!(
                width + part.width <= MAX_WIDTH,
                "concatenation exceeds {MAX_WIDTH} bits"
            );
            if part.width > 0 {
                value |= part.value << width;
            }
            width += part.width;
        }
        Self { width, value }
    }
}

impl fmt::Debug for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bits({self})")
    }
}

/// Verilog-style sized hex literal, e.g. `8'h3f`.
impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'h{:x}", self.width, self.value)
    }
}

impl Not for Bits {
    type Output = Self;

    fn not(self) -> Self {
        Self::new(!self.value, self.width)
    }
}

/// Bitwise AND; the result takes the wider operand's width.
impl BitAnd for Bits {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self::new(self.value & rhs.value, self.width.max(rhs.width))
    }
}

/// Bitwise OR; the result takes the wider operand's width.
impl BitOr for Bits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::new(self.value | rhs.value, self.width.max(rhs.width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_truncates() {
        let b = Bits::new(0x1ff, 8);
        assert_eq!(b.value(), 0xff);
        assert_eq!(b.width(), 8);
    }

    #[test]
    fn full_width_mask() {
        assert_eq!(Bits::ones(64).value(), u64::MAX);
        assert_eq!(Bits::ones(0).value(), 0);
    }

    #[test]
    fn get_and_with_bit() {
        let b = Bits::zero(32).with_bit(31, true).with_bit(0, true);
        assert!(b.get(31));
        assert!(b.get(0));
        assert!(!b.get(1));
        assert_eq!(b.with_bit(31, false).value(), 1);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_out_of_range_panics() {
        Bits::zero(4).get(4);
    }

    #[test]
    fn slice_low_bits() {
        let b = Bits::new(0x8000_0123, 32);
        assert_eq!(b.slice(0, 31), Bits::new(0x123, 31));
        assert_eq!(b.slice(31, 1), Bits::bit(true));
    }

    #[test]
    fn concat_lsb_first() {
        let v = Bits::concat([Bits::bit(true), Bits::bit(false), Bits::bit(true)]);
        assert_eq!(v, Bits::new(0b101, 3));
    }

    #[test]
    fn concat_empty_is_zero_width() {
        let v = Bits::concat(std::iter::empty());
        assert_eq!(v.width(), 0);
    }

    #[test]
    fn not_stays_in_width() {
        assert_eq!(!Bits::new(0b1010, 4), Bits::new(0b0101, 4));
    }

    #[test]
    fn and_or() {
        let a = Bits::new(0b1100, 4);
        let b = Bits::new(0b1010, 4);
        assert_eq!(a & b, Bits::new(0b1000, 4));
        assert_eq!(a | b, Bits::new(0b1110, 4));
    }

    #[test]
    fn display_hex() {
        assert_eq!(Bits::new(0x3f, 8).to_string(), "8'h3f");
    }
}
