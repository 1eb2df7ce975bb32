//! # Share Code Record
//!
//! The v8 board record and its fixed 424-byte image.
//!
//! ## Design
//!
//! - Fields are written one by one, in wire order, through [`RecordWriter`]
//! - The alignment hole before the rank words is written explicitly
//! - Reading never fails: short input is zero-extended, long input truncated
//!
//! Grids are indexed `[row][col]`. The rank of board cell `(row, col)` lives in
//! `packed_unit_ranks[row]`, unit `col`.

use bytemuck::Zeroable;

use crate::item::ItemSlot;
use crate::layout::{self, RECORD_SIZE};
use crate::rank::PackedRanks;
use crate::{BOARD_CELLS, MAX_TALENTS, MAX_UNEQUIPPED_ITEMS, UNDERLORD_SLOTS};

/// Value written to the reserved format tag byte.
const FORMAT_TAG: u8 = 0;

/// One v8 share code: a board snapshot as the game client serializes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Zeroable)]
pub struct ShareCode {
    /// Equipped item for each board cell.
    pub unit_items: [[ItemSlot; BOARD_CELLS]; BOARD_CELLS],
    /// Unit id for each board cell. 0 is empty, 255 marks the underlord.
    pub board_unit_ids: [[u8; BOARD_CELLS]; BOARD_CELLS],
    /// Raw talent selections, opaque to the codec.
    pub selected_talents: [[u8; 2]; MAX_TALENTS],
    /// Rank flags, one word per board row.
    pub packed_unit_ranks: [PackedRanks; BOARD_CELLS],
    /// Equipped item for each bench slot.
    pub bench_unit_items: [ItemSlot; BOARD_CELLS],
    /// Unit id for each bench slot.
    pub benched_unit_ids: [u8; BOARD_CELLS],
    /// Rank flags for the bench.
    pub packed_bench_ranks: PackedRanks,
    /// Underlord id per player slot.
    pub underlord_ids: [u8; UNDERLORD_SLOTS],
    /// Underlord rank per player slot.
    pub underlord_ranks: [u8; UNDERLORD_SLOTS],
    /// Items held but not equipped.
    pub unequipped_items: [[ItemSlot; 2]; MAX_UNEQUIPPED_ITEMS],
}

impl Default for ShareCode {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl ShareCode {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::zeroed()
    }

    /// Serializes the record to its fixed image.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut writer = RecordWriter::new();

        writer.write_u8(FORMAT_TAG);
        for row in &self.unit_items {
            writer.write_slots(row);
        }
        writer.write_bytes(bytemuck::bytes_of(&self.board_unit_ids));
        writer.write_bytes(bytemuck::bytes_of(&self.selected_talents));
        writer.write_padding(layout::RANK_PADDING.size);
        debug_assert_eq!(writer.position(), layout::PACKED_UNIT_RANKS.offset);
        for ranks in self.packed_unit_ranks {
            writer.write_ranks(ranks);
        }
        writer.write_slots(&self.bench_unit_items);
        writer.write_bytes(&self.benched_unit_ids);
        writer.write_ranks(self.packed_bench_ranks);
        writer.write_bytes(&self.underlord_ids);
        writer.write_bytes(&self.underlord_ranks);
        for pair in &self.unequipped_items {
            writer.write_slots(pair);
        }

        writer.finish()
    }

    /// Rebuilds a record from an image of any length.
    ///
    /// Bytes past the record size are ignored; a short image behaves as if
    /// padded with zeros. The format tag and the padding are skipped.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut reader = RecordReader::new(bytes);
        let mut code = Self::zeroed();

        reader.skip(layout::FORMAT_TAG.size);
        for row in &mut code.unit_items {
            reader.read_slots(row);
        }
        reader.read_into(bytemuck::bytes_of_mut(&mut code.board_unit_ids));
        reader.read_into(bytemuck::bytes_of_mut(&mut code.selected_talents));
        reader.skip(layout::RANK_PADDING.size);
        for ranks in &mut code.packed_unit_ranks {
            *ranks = reader.read_ranks();
        }
        reader.read_slots(&mut code.bench_unit_items);
        reader.read_into(&mut code.benched_unit_ids);
        code.packed_bench_ranks = reader.read_ranks();
        reader.read_into(&mut code.underlord_ids);
        reader.read_into(&mut code.underlord_ranks);
        for pair in &mut code.unequipped_items {
            reader.read_slots(pair);
        }
        debug_assert_eq!(reader.position(), RECORD_SIZE);

        code
    }

    /// Item id equipped on board cell `(row, col)`.
    #[must_use]
    pub fn unit_item(&self, row: usize, col: usize) -> u16 {
        self.unit_items[row][col].item_id()
    }

    /// Equips `item_id` on board cell `(row, col)`.
    pub fn set_unit_item(&mut self, row: usize, col: usize, item_id: u16) {
        self.unit_items[row][col] = ItemSlot::new(item_id);
    }

    /// Rank of the unit on board cell `(row, col)`.
    #[must_use]
    pub fn unit_rank(&self, row: usize, col: usize) -> u8 {
        self.packed_unit_ranks[row].rank(col)
    }

    /// Sets the rank of the unit on board cell `(row, col)`.
    pub fn set_unit_rank(&mut self, row: usize, col: usize, rank: u8) {
        self.packed_unit_ranks[row] = self.packed_unit_ranks[row].with_rank(col, rank);
    }

    /// Rank of the unit in bench slot `slot`.
    #[must_use]
    pub fn bench_rank(&self, slot: usize) -> u8 {
        self.packed_bench_ranks.rank(slot)
    }

    /// Sets the rank of the unit in bench slot `slot`.
    pub fn set_bench_rank(&mut self, slot: usize, rank: u8) {
        self.packed_bench_ranks = self.packed_bench_ranks.with_rank(slot, rank);
    }
}

/// Sequential writer over a record image.
struct RecordWriter {
    buffer: [u8; RECORD_SIZE],
    position: usize,
}

impl RecordWriter {
    const fn new() -> Self {
        Self {
            buffer: [0u8; RECORD_SIZE],
            position: 0,
        }
    }

    const fn position(&self) -> usize {
        self.position
    }

    fn write_u8(&mut self, value: u8) {
        self.write_bytes(&[value]);
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let end = self.position + bytes.len();
        self.buffer[self.position..end].copy_from_slice(bytes);
        self.position = end;
    }

    fn write_slots(&mut self, slots: &[ItemSlot]) {
        for slot in slots {
            self.write_bytes(&slot.to_bytes());
        }
    }

    fn write_ranks(&mut self, ranks: PackedRanks) {
        self.write_bytes(&ranks.to_bytes());
    }

    fn write_padding(&mut self, len: usize) {
        // Buffer starts zeroed.
        self.position += len;
    }

    fn finish(self) -> [u8; RECORD_SIZE] {
        debug_assert_eq!(self.position, RECORD_SIZE);
        self.buffer
    }
}

/// Sequential reader over a zero-extended record image.
struct RecordReader {
    buffer: [u8; RECORD_SIZE],
    position: usize,
}

impl RecordReader {
    fn new(bytes: &[u8]) -> Self {
        let mut buffer = [0u8; RECORD_SIZE];
        let len = bytes.len().min(RECORD_SIZE);
        buffer[..len].copy_from_slice(&bytes[..len]);
        Self { buffer, position: 0 }
    }

    const fn position(&self) -> usize {
        self.position
    }

    fn skip(&mut self, len: usize) {
        self.position += len;
    }

    fn read_into(&mut self, out: &mut [u8]) {
        let end = self.position + out.len();
        out.copy_from_slice(&self.buffer[self.position..end]);
        self.position = end;
    }

    fn read_array<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        self.read_into(&mut out);
        out
    }

    fn read_slots(&mut self, slots: &mut [ItemSlot]) {
        for slot in slots {
            *slot = ItemSlot::from_bytes(self.read_array());
        }
    }

    fn read_ranks(&mut self) -> PackedRanks {
        PackedRanks::from_bytes(self.read_array())
    }
}
