//! # Packed Unit Ranks
//!
//! Eight unit ranks share one little-endian `u32`, four bits per unit, unit
//! `i` at bit offset `i * 4`.
//!
//! ## Bit mapping
//!
//! The game client does not store a dense 4-bit count. Packing and unpacking
//! walk the same four slots but give slot 3 a different meaning on each side:
//!
//! ```text
//! slot k        0   1   2   3
//! pack reads    1   2   4   8     (rank & mask)
//! unpack sets   1   2   4   16    (1 << {0,1,2,4})
//! ```
//!
//! A rank using bit 3 packs into slot 3 and comes back as 16. A rank using
//! bit 4 is dropped by packing. Codes in the wild depend on this, so it stays.

use bytemuck::Zeroable;

/// Units per packed word.
pub const RANKS_PER_WORD: usize = 8;

/// Bits per unit in a packed word.
pub const BITS_PER_RANK: usize = 4;

/// Input masks tested when packing, indexed by slot.
const PACK_MASKS: [u8; BITS_PER_RANK] = [1, 2, 4, 8];

/// Output bit positions set when unpacking, indexed by slot.
const UNPACK_BITS: [u8; BITS_PER_RANK] = [0, 1, 2, 4];

/// Mask covering one unit's slots.
const SLOT_MASK: u32 = (1 << BITS_PER_RANK) - 1;

/// A 32-bit word holding the rank flags of up to eight units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Zeroable)]
#[repr(transparent)]
pub struct PackedRanks(u32);

impl PackedRanks {
    /// Size of a packed word on the wire.
    pub const SIZE: usize = 4;

    /// Wraps a raw word as read from a record.
    #[inline]
    #[must_use]
    pub const fn from_raw(word: u32) -> Self {
        Self(word)
    }

    /// The raw word as written to a record.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Packs up to eight ranks. Missing trailing ranks are zero; ranks past
    /// the eighth are ignored.
    #[must_use]
    pub fn pack(ranks: &[u8]) -> Self {
        ranks
            .iter()
            .take(RANKS_PER_WORD)
            .enumerate()
            .fold(Self(0), |packed, (index, &rank)| packed.with_rank(index, rank))
    }

    /// Unpacks all eight ranks.
    #[must_use]
    pub fn unpack(self) -> [u8; RANKS_PER_WORD] {
        let mut ranks = [0u8; RANKS_PER_WORD];
        for (index, rank) in ranks.iter_mut().enumerate() {
            *rank = self.rank(index);
        }
        ranks
    }

    /// Unpacks the rank of a single unit.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 8`.
    #[must_use]
    pub fn rank(self, index: usize) -> u8 {
        assert!(index < RANKS_PER_WORD, "rank index {index} out of range");
        let slots = (self.0 >> (index * BITS_PER_RANK)) & SLOT_MASK;
        UNPACK_BITS
            .iter()
            .enumerate()
            .filter(|&(slot, _)| slots & (1 << slot) != 0)
            .fold(0u8, |rank, (_, &bit)| rank | (1 << bit))
    }

    /// Returns a copy with one unit's slots replaced by the packed form of
    /// `rank`. Other units are untouched.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 8`.
    #[must_use]
    pub fn with_rank(self, index: usize, rank: u8) -> Self {
        assert!(index < RANKS_PER_WORD, "rank index {index} out of range");
        let shift = index * BITS_PER_RANK;
        let cleared = self.0 & !(SLOT_MASK << shift);
        Self(cleared | (u32::from(pack_slots(rank)) << shift))
    }

    /// Encodes the word little-endian.
    #[inline]
    #[must_use]
    pub const fn to_bytes(self) -> [u8; Self::SIZE] {
        self.0.to_le_bytes()
    }

    /// Decodes a little-endian word.
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }
}

impl From<u32> for PackedRanks {
    fn from(word: u32) -> Self {
        Self(word)
    }
}

impl From<PackedRanks> for u32 {
    fn from(packed: PackedRanks) -> Self {
        packed.0
    }
}

/// Maps one rank byte onto its four slot bits.
fn pack_slots(rank: u8) -> u8 {
    PACK_MASKS
        .iter()
        .enumerate()
        .filter(|&(_, &mask)| rank & mask == mask)
        .fold(0u8, |slots, (slot, _)| slots | (1 << slot))
}
