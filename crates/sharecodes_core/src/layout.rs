//! # Record Layout
//!
//! Static description of where every field of a v8 record lives.
//!
//! The game client produces the record by dumping a C-style struct, so the
//! byte image carries that struct's alignment rules. Only one field is
//! affected: the packed unit ranks need 4-byte alignment, which opens a
//! 3-byte hole after the talents.
//!
//! ```text
//! offset  size  field
//! ──────  ────  ─────────────────────
//!      0     1  format tag (always 0)
//!      1   192  unit item slots
//!    193    64  board unit ids
//!    257    32  selected talents
//!    289     3  padding (always 0)
//!    292    32  packed unit ranks
//!    324    24  bench item slots
//!    348     8  benched unit ids
//!    356     4  packed bench ranks
//!    360     2  underlord ids
//!    362     2  underlord ranks
//!    364    60  unequipped item slots
//!    424        end
//! ```
//!
//! The table is built from sizes and alignments at compile time and pinned
//! by const assertions, so a change that moves any offset fails the build.

use crate::item::ItemSlot;
use crate::rank::PackedRanks;
use crate::{BOARD_CELLS, MAX_TALENTS, MAX_UNEQUIPPED_ITEMS, UNDERLORD_SLOTS};

/// Placement of one field inside the record image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    /// Field name.
    pub name: &'static str,
    /// Byte offset from the start of the record.
    pub offset: usize,
    /// Size in bytes.
    pub size: usize,
    /// Alignment the originating struct layout imposes.
    pub align: usize,
}

impl FieldLayout {
    /// First field of a record.
    const fn first(name: &'static str, size: usize, align: usize) -> Self {
        Self { name, offset: 0, size, align }
    }

    /// Field placed after `prev`, rounded up to `align`.
    const fn after(prev: Self, name: &'static str, size: usize, align: usize) -> Self {
        let end = prev.end();
        let offset = (end + align - 1) / align * align;
        Self { name, offset, size, align }
    }

    /// The gap `next`'s alignment opens after `prev`.
    const fn gap(prev: Self, next: Self) -> Self {
        Self {
            name: "padding",
            offset: prev.end(),
            size: next.offset - prev.end(),
            align: 1,
        }
    }

    /// One past the last byte of this field.
    #[inline]
    #[must_use]
    pub const fn end(self) -> usize {
        self.offset + self.size
    }

    /// Byte range of this field within the record image.
    #[inline]
    #[must_use]
    pub const fn range(self) -> std::ops::Range<usize> {
        self.offset..self.end()
    }
}

/// Reserved version byte.
pub const FORMAT_TAG: FieldLayout = FieldLayout::first("format_tag", 1, 1);

/// Item slots for the 8x8 board.
pub const UNIT_ITEMS: FieldLayout =
    FieldLayout::after(FORMAT_TAG, "unit_items", BOARD_CELLS * BOARD_CELLS * ItemSlot::SIZE, 1);

/// Unit ids for the 8x8 board.
pub const BOARD_UNIT_IDS: FieldLayout =
    FieldLayout::after(UNIT_ITEMS, "board_unit_ids", BOARD_CELLS * BOARD_CELLS, 1);

/// Talent bytes.
pub const SELECTED_TALENTS: FieldLayout =
    FieldLayout::after(BOARD_UNIT_IDS, "selected_talents", MAX_TALENTS * 2, 1);

/// One packed rank word per board row.
pub const PACKED_UNIT_RANKS: FieldLayout = FieldLayout::after(
    SELECTED_TALENTS,
    "packed_unit_ranks",
    BOARD_CELLS * PackedRanks::SIZE,
    PackedRanks::SIZE,
);

/// The hole in front of [`PACKED_UNIT_RANKS`].
pub const RANK_PADDING: FieldLayout = FieldLayout::gap(SELECTED_TALENTS, PACKED_UNIT_RANKS);

/// Item slots for the bench.
pub const BENCH_UNIT_ITEMS: FieldLayout =
    FieldLayout::after(PACKED_UNIT_RANKS, "bench_unit_items", BOARD_CELLS * ItemSlot::SIZE, 1);

/// Unit ids on the bench.
pub const BENCHED_UNIT_IDS: FieldLayout =
    FieldLayout::after(BENCH_UNIT_ITEMS, "benched_unit_ids", BOARD_CELLS, 1);

/// Packed ranks for the bench.
pub const PACKED_BENCH_RANKS: FieldLayout = FieldLayout::after(
    BENCHED_UNIT_IDS,
    "packed_bench_ranks",
    PackedRanks::SIZE,
    PackedRanks::SIZE,
);

/// Underlord id per player slot.
pub const UNDERLORD_IDS: FieldLayout =
    FieldLayout::after(PACKED_BENCH_RANKS, "underlord_ids", UNDERLORD_SLOTS, 1);

/// Underlord rank per player slot.
pub const UNDERLORD_RANKS: FieldLayout =
    FieldLayout::after(UNDERLORD_IDS, "underlord_ranks", UNDERLORD_SLOTS, 1);

/// Items held but not equipped.
pub const UNEQUIPPED_ITEMS: FieldLayout = FieldLayout::after(
    UNDERLORD_RANKS,
    "unequipped_items",
    MAX_UNEQUIPPED_ITEMS * 2 * ItemSlot::SIZE,
    1,
);

/// Size of a v8 record image.
pub const RECORD_SIZE: usize = UNEQUIPPED_ITEMS.end();

/// Every region of the record, padding included, in wire order.
pub const RECORD_LAYOUT: [FieldLayout; 12] = [
    FORMAT_TAG,
    UNIT_ITEMS,
    BOARD_UNIT_IDS,
    SELECTED_TALENTS,
    RANK_PADDING,
    PACKED_UNIT_RANKS,
    BENCH_UNIT_ITEMS,
    BENCHED_UNIT_IDS,
    PACKED_BENCH_RANKS,
    UNDERLORD_IDS,
    UNDERLORD_RANKS,
    UNEQUIPPED_ITEMS,
];

const _: () = assert!(RANK_PADDING.offset == 289 && RANK_PADDING.size == 3);
const _: () = assert!(PACKED_UNIT_RANKS.offset == 292);
const _: () = assert!(PACKED_BENCH_RANKS.offset % PackedRanks::SIZE == 0);
const _: () = assert!(RECORD_SIZE == 424);

/// Logs the layout table, one event per region.
pub fn log_layout() {
    tracing::info!(size = RECORD_SIZE, "share code v8 record layout");
    for field in &RECORD_LAYOUT {
        tracing::info!(
            field = field.name,
            offset = field.offset,
            size = field.size,
            align = field.align,
            "record field"
        );
    }
}

/// Renders the layout table as text.
#[must_use]
pub fn layout_table() -> String {
    let mut out = format!("{:>6}  {:>4}  {:>5}  field\n", "offset", "size", "align");
    for field in &RECORD_LAYOUT {
        out.push_str(&format!(
            "{:>6}  {:>4}  {:>5}  {}\n",
            field.offset, field.size, field.align, field.name
        ));
    }
    out.push_str(&format!("{RECORD_SIZE:>6}        total\n"));
    out
}

/// Space-separated lower-case hex of `bytes`.
#[must_use]
pub fn hex_dump(bytes: &[u8]) -> String {
    join_bytes(bytes, |byte| format!("{byte:02x}"))
}

/// Space-separated decimal of `bytes`.
#[must_use]
pub fn decimal_dump(bytes: &[u8]) -> String {
    join_bytes(bytes, |byte| byte.to_string())
}

fn join_bytes(bytes: &[u8], render: impl Fn(u8) -> String) -> String {
    bytes.iter().map(|&byte| render(byte)).collect::<Vec<_>>().join(" ")
}
