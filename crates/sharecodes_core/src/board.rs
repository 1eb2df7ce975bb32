//! # Board Descriptions
//!
//! Human-editable TOML view of a share code. Only occupied cells are listed;
//! everything else is empty.
//!
//! ```toml
//! [[units]]
//! row = 6
//! col = 6
//! id = 11
//! rank = 2
//! item = 10171
//!
//! [[underlords]]
//! player = 1
//! id = 4
//! rank = 4
//! ```
//!
//! Ranks are written as the unpacked value, so a rank of 8 in a file is read
//! back from the code as 16, and 16 does not survive encoding. See
//! [`crate::rank`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ShareCodeError, ShareCodeResult};
use crate::item::ItemSlot;
use crate::record::ShareCode;
use crate::{BOARD_CELLS, EMPTY_UNIT, MAX_TALENTS, MAX_UNEQUIPPED_ITEMS, UNDERLORD_SLOTS};

/// A unit placed on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardUnit {
    /// Board row.
    pub row: usize,
    /// Board column.
    pub col: usize,
    /// Unit id. 255 marks the underlord's cell.
    pub id: u8,
    /// Unit rank.
    #[serde(default, skip_serializing_if = "is_zero_u8")]
    pub rank: u8,
    /// Equipped item id.
    #[serde(default, skip_serializing_if = "is_zero_u16")]
    pub item: u16,
}

/// A unit waiting on the bench.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BenchUnit {
    /// Bench slot.
    pub slot: usize,
    /// Unit id.
    pub id: u8,
    /// Unit rank.
    #[serde(default, skip_serializing_if = "is_zero_u8")]
    pub rank: u8,
    /// Equipped item id.
    #[serde(default, skip_serializing_if = "is_zero_u16")]
    pub item: u16,
}

/// The underlord chosen for a player slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Underlord {
    /// Player slot.
    pub player: usize,
    /// Underlord id.
    pub id: u8,
    /// Underlord rank.
    #[serde(default)]
    pub rank: u8,
}

/// An item held but not equipped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnequippedItem {
    /// Row in the unequipped grid.
    pub row: usize,
    /// Column in the unequipped grid.
    pub col: usize,
    /// Item id.
    pub item: u16,
}

/// Raw talent selection bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Talent {
    /// Talent slot.
    pub slot: usize,
    /// The two opaque bytes stored for the slot.
    pub value: [u8; 2],
}

/// A whole board, as read from or written to a TOML file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardFile {
    /// Units on the board.
    pub units: Vec<BoardUnit>,
    /// Units on the bench.
    pub bench: Vec<BenchUnit>,
    /// Underlords per player slot.
    pub underlords: Vec<Underlord>,
    /// Unequipped items.
    pub unequipped: Vec<UnequippedItem>,
    /// Talent selections.
    pub talents: Vec<Talent>,
}

impl BoardFile {
    /// Parses a board description.
    ///
    /// # Errors
    ///
    /// Returns [`ShareCodeError::InvalidBoardFile`] if the text is not a valid
    /// board description.
    pub fn from_toml_str(text: &str) -> ShareCodeResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a board description from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ShareCodeError::Io`] if the file cannot be read, otherwise
    /// as [`BoardFile::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> ShareCodeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded board file");
        Self::from_toml_str(&text)
    }

    /// Renders the description as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ShareCodeError::BoardSerialization`] if TOML emission fails.
    pub fn to_toml_string(&self) -> ShareCodeResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Builds the share code this description stands for.
    ///
    /// Later entries for the same cell overwrite earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`ShareCodeError::CellOutOfRange`] for any coordinate outside
    /// its grid.
    pub fn to_share_code(&self) -> ShareCodeResult<ShareCode> {
        let mut code = ShareCode::new();

        for unit in &self.units {
            check_index("board row", unit.row, BOARD_CELLS)?;
            check_index("board column", unit.col, BOARD_CELLS)?;
            code.board_unit_ids[unit.row][unit.col] = unit.id;
            code.set_unit_item(unit.row, unit.col, unit.item);
            code.set_unit_rank(unit.row, unit.col, unit.rank);
        }

        for unit in &self.bench {
            check_index("bench slot", unit.slot, BOARD_CELLS)?;
            code.benched_unit_ids[unit.slot] = unit.id;
            code.bench_unit_items[unit.slot] = ItemSlot::new(unit.item);
            code.set_bench_rank(unit.slot, unit.rank);
        }

        for underlord in &self.underlords {
            check_index("underlord player", underlord.player, UNDERLORD_SLOTS)?;
            code.underlord_ids[underlord.player] = underlord.id;
            code.underlord_ranks[underlord.player] = underlord.rank;
        }

        for item in &self.unequipped {
            check_index("unequipped row", item.row, MAX_UNEQUIPPED_ITEMS)?;
            check_index("unequipped column", item.col, 2)?;
            code.unequipped_items[item.row][item.col] = ItemSlot::new(item.item);
        }

        for talent in &self.talents {
            check_index("talent slot", talent.slot, MAX_TALENTS)?;
            code.selected_talents[talent.slot] = talent.value;
        }

        Ok(code)
    }

    /// Lists every occupied cell of `code`.
    #[must_use]
    pub fn from_share_code(code: &ShareCode) -> Self {
        let mut board = Self::default();

        for row in 0..BOARD_CELLS {
            for col in 0..BOARD_CELLS {
                let unit = BoardUnit {
                    row,
                    col,
                    id: code.board_unit_ids[row][col],
                    rank: code.unit_rank(row, col),
                    item: code.unit_item(row, col),
                };
                if unit.id != EMPTY_UNIT || unit.rank != 0 || unit.item != 0 {
                    board.units.push(unit);
                }
            }
        }

        for slot in 0..BOARD_CELLS {
            let unit = BenchUnit {
                slot,
                id: code.benched_unit_ids[slot],
                rank: code.bench_rank(slot),
                item: code.bench_unit_items[slot].item_id(),
            };
            if unit.id != EMPTY_UNIT || unit.rank != 0 || unit.item != 0 {
                board.bench.push(unit);
            }
        }

        for player in 0..UNDERLORD_SLOTS {
            let (id, rank) = (code.underlord_ids[player], code.underlord_ranks[player]);
            if id != 0 || rank != 0 {
                board.underlords.push(Underlord { player, id, rank });
            }
        }

        for (row, pair) in code.unequipped_items.iter().enumerate() {
            for (col, slot) in pair.iter().enumerate() {
                if !slot.is_empty() {
                    board.unequipped.push(UnequippedItem { row, col, item: slot.item_id() });
                }
            }
        }

        for (slot, &value) in code.selected_talents.iter().enumerate() {
            if value != [0, 0] {
                board.talents.push(Talent { slot, value });
            }
        }

        board
    }
}

fn check_index(section: &'static str, index: usize, limit: usize) -> ShareCodeResult<()> {
    if index < limit {
        Ok(())
    } else {
        Err(ShareCodeError::CellOutOfRange { section, index, limit })
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero_u8(value: &u8) -> bool {
    *value == 0
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero_u16(value: &u16) -> bool {
    *value == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
talents = [{ slot = 2, value = [5, 1] }]

[[units]]
row = 0
col = 0
id = 46
rank = 2
item = 10171

[[units]]
row = 4
col = 4
id = 255

[[bench]]
slot = 3
id = 12
rank = 1

[[underlords]]
player = 1
id = 4
rank = 4

[[unequipped]]
row = 0
col = 0
item = 10170
"#;

    #[test]
    fn test_parse_and_build() {
        let board = BoardFile::from_toml_str(SAMPLE).unwrap();
        let code = board.to_share_code().unwrap();

        assert_eq!(code.board_unit_ids[0][0], 46);
        assert_eq!(code.unit_rank(0, 0), 2);
        assert_eq!(code.unit_item(0, 0), 10171);
        assert_eq!(code.board_unit_ids[4][4], crate::UNDERLORD_MARKER);
        assert_eq!(code.benched_unit_ids[3], 12);
        assert_eq!(code.bench_rank(3), 1);
        assert_eq!(code.underlord_ids, [0, 4]);
        assert_eq!(code.underlord_ranks, [0, 4]);
        assert_eq!(code.unequipped_items[0][0].item_id(), 10170);
        assert_eq!(code.selected_talents[2], [5, 1]);
    }

    #[test]
    fn test_description_is_stable() {
        let board = BoardFile::from_toml_str(SAMPLE).unwrap();
        let code = board.to_share_code().unwrap();
        let listed = BoardFile::from_share_code(&code);

        assert_eq!(listed.to_share_code().unwrap(), code);
        assert_eq!(listed.units.len(), 2);
        assert_eq!(listed.bench.len(), 1);
    }

    #[test]
    fn test_toml_roundtrip() {
        let board = BoardFile::from_toml_str(SAMPLE).unwrap();
        let listed = BoardFile::from_share_code(&board.to_share_code().unwrap());
        let text = listed.to_toml_string().unwrap();
        assert_eq!(BoardFile::from_toml_str(&text).unwrap(), listed);
    }

    #[test]
    fn test_empty_file_is_empty_board() {
        let board = BoardFile::from_toml_str("").unwrap();
        assert_eq!(board.to_share_code().unwrap(), ShareCode::new());
        assert_eq!(BoardFile::from_share_code(&ShareCode::new()), BoardFile::default());
    }

    #[test]
    fn test_out_of_range_cell_rejected() {
        let board = BoardFile::from_toml_str("[[units]]\nrow = 8\ncol = 0\nid = 1\n").unwrap();
        match board.to_share_code() {
            Err(ShareCodeError::CellOutOfRange { section, index, limit }) => {
                assert_eq!(section, "board row");
                assert_eq!(index, 8);
                assert_eq!(limit, BOARD_CELLS);
            }
            other => panic!("expected CellOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_load_reads_board_file() {
        let path = std::env::temp_dir()
            .join(format!("sharecodes_board_{}.toml", std::process::id()));
        std::fs::write(&path, SAMPLE).unwrap();
        let loaded = BoardFile::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.unwrap(), BoardFile::from_toml_str(SAMPLE).unwrap());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("sharecodes_no_such_board.toml");
        assert!(matches!(BoardFile::load(path), Err(ShareCodeError::Io(_))));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = BoardFile::from_toml_str("[[units]]\nrow = 0\ncol = 0\nid = 1\nstars = 3\n");
        assert!(matches!(result, Err(ShareCodeError::InvalidBoardFile(_))));
    }
}
