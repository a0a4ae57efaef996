//! Bitboard implementation for the 24 board fields

use serde::{Deserialize, Serialize};

use super::{Pos, FIELD_COUNT};

const FIELD_MASK: u32 = (1 << FIELD_COUNT) - 1;

/// One bit per field; bits 24..32 are always zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Bitboard {
    bits: u32,
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Build from a raw mask; bits above field 23 are dropped
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            bits: bits & FIELD_MASK,
        }
    }

    #[inline]
    pub fn bits(self) -> u32 {
        self.bits
    }

    /// Set a bit at position
    #[inline]
    pub fn set(&mut self, pos: Pos) {
        self.bits |= 1 << pos.to_index();
    }

    /// Clear a bit at position
    #[inline]
    pub fn clear(&mut self, pos: Pos) {
        self.bits &= !(1 << pos.to_index());
    }

    /// Check if bit is set at position
    #[inline]
    pub fn get(self, pos: Pos) -> bool {
        (self.bits >> pos.to_index()) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(self) -> u32 {
        self.bits.count_ones()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Fields not set in this bitboard
    #[inline]
    pub fn complement(self) -> Self {
        Self::from_bits(!self.bits)
    }

    #[inline]
    pub fn union(self, other: Bitboard) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[inline]
    pub fn intersects(self, other: Bitboard) -> bool {
        self.bits & other.bits != 0
    }

    /// Iterate over set bit positions in ascending order
    pub fn iter_ones(self) -> BitboardIter {
        BitboardIter { bits: self.bits }
    }
}

impl TryFrom<u32> for Bitboard {
    type Error = String;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        if bits & !FIELD_MASK != 0 {
            return Err(format!("bitboard {bits:#x} has bits beyond field {}", FIELD_COUNT - 1));
        }
        Ok(Self { bits })
    }
}

impl From<Bitboard> for u32 {
    fn from(bitboard: Bitboard) -> u32 {
        bitboard.bits
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    bits: u32,
}

impl Iterator for BitboardIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros() as u8;
        // Clear the bit we just found
        self.bits &= self.bits - 1;
        Some(Pos::new(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitboardIter {}
