//! # Equipped Item Slots
//!
//! An item reference occupies 24 bits on the wire even though the id is only
//! 16 bits wide. The game client lays the slot out as
//!
//! ```text
//! ┌──────────┬──────────┬──────────┐
//! │ id low   │ id high  │ 0x00     │
//! └──────────┴──────────┴──────────┘
//! ```
//!
//! The trailing byte is always written as zero and never looked at on read.

use bytemuck::Zeroable;

/// Item id meaning "no item".
pub const EMPTY_ITEM: u16 = 0;

/// One equipped-item slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Zeroable)]
#[repr(transparent)]
pub struct ItemSlot {
    item_id: u16,
}

impl ItemSlot {
    /// Size of a slot on the wire.
    pub const SIZE: usize = 3;

    /// The empty slot.
    pub const EMPTY: Self = Self::new(EMPTY_ITEM);

    /// Creates a slot holding `item_id`.
    #[inline]
    #[must_use]
    pub const fn new(item_id: u16) -> Self {
        Self { item_id }
    }

    /// The item id held in this slot.
    #[inline]
    #[must_use]
    pub const fn item_id(self) -> u16 {
        self.item_id
    }

    /// Returns true if no item is equipped.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.item_id == EMPTY_ITEM
    }

    /// Encodes the slot as `[low, high, 0]`.
    #[inline]
    #[must_use]
    pub const fn to_bytes(self) -> [u8; Self::SIZE] {
        let [low, high] = self.item_id.to_le_bytes();
        [low, high, 0]
    }

    /// Decodes a slot. The third byte is discarded, whatever it holds.
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        Self::new(u16::from_le_bytes([bytes[0], bytes[1]]))
    }
}

impl From<u16> for ItemSlot {
    fn from(item_id: u16) -> Self {
        Self::new(item_id)
    }
}

impl From<ItemSlot> for u16 {
    fn from(slot: ItemSlot) -> Self {
        slot.item_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_ITEMS: [(u16, [u8; 3]); 3] = [
        (10170, [186, 39, 0]),
        (10171, [187, 39, 0]),
        (10201, [217, 39, 0]),
    ];

    #[test]
    fn test_known_item_encoding() {
        for (item_id, bytes) in KNOWN_ITEMS {
            assert_eq!(ItemSlot::new(item_id).to_bytes(), bytes, "item {item_id}");
        }
    }

    #[test]
    fn test_known_item_decoding() {
        for (item_id, bytes) in KNOWN_ITEMS {
            assert_eq!(ItemSlot::from_bytes(bytes).item_id(), item_id);
        }
    }

    #[test]
    fn test_every_item_id_survives() {
        for item_id in 0..=u16::MAX {
            let bytes = ItemSlot::new(item_id).to_bytes();
            assert_eq!(bytes[2], 0);
            assert_eq!(ItemSlot::from_bytes(bytes).item_id(), item_id);
        }
    }

    #[test]
    fn test_pad_byte_ignored() {
        let slot = ItemSlot::from_bytes([187, 39, 0xFF]);
        assert_eq!(slot.item_id(), 10171);
        assert_eq!(slot.to_bytes(), [187, 39, 0]);
    }

    #[test]
    fn test_empty_slot() {
        assert!(ItemSlot::EMPTY.is_empty());
        assert!(ItemSlot::default().is_empty());
        assert_eq!(ItemSlot::EMPTY.to_bytes(), [0, 0, 0]);
        assert!(!ItemSlot::new(1).is_empty());
    }
}
