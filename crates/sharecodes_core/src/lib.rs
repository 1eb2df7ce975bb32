//! # Sharecodes Core
//!
//! Codec for Dota Underlords v8 share codes: the strings players paste to
//! hand each other a board.
//!
//! ## Layers
//!
//! 1. **Field codecs** - [`ItemSlot`] (3 bytes) and [`PackedRanks`] (4 bits per unit)
//! 2. **Record layout** - [`ShareCode`], a fixed 424-byte image
//! 3. **Envelope** - version tag, snappy, base64
//!
//! ```text
//! ShareCode ──to_bytes──► [u8; 424] ──snappy──► bytes ──base64──► "8" + text
//! ```
//!
//! Every operation is a pure transform over values. Nothing is cached and no
//! state outlives a call, so codes may be encoded and decoded from any number
//! of threads at once.
//!
//! ## Example
//!
//! ```rust
//! use sharecodes_core::ShareCode;
//!
//! let mut code = ShareCode::new();
//! code.board_unit_ids[6][6] = 11;
//! code.set_unit_item(6, 6, 10171);
//! code.set_unit_rank(6, 6, 2);
//!
//! let text = code.to_code_string();
//! let back: ShareCode = text.parse()?;
//! assert_eq!(back, code);
//! # Ok::<(), sharecodes_core::ShareCodeError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod board;
pub mod envelope;
pub mod error;
pub mod item;
pub mod layout;
pub mod rank;
pub mod record;

pub use board::{BenchUnit, BoardFile, BoardUnit, Talent, UnequippedItem, Underlord};
pub use envelope::{decode, encode};
pub use error::{ShareCodeError, ShareCodeResult};
pub use item::ItemSlot;
pub use layout::{FieldLayout, RECORD_LAYOUT, RECORD_SIZE};
pub use rank::PackedRanks;
pub use record::ShareCode;

/// Record layout version these codes carry.
pub const SHARE_CODE_VERSION: u32 = 8;

/// First character of every v8 share code.
pub const VERSION_TAG: char = '8';

/// Board width and height, also the bench size.
pub const BOARD_CELLS: usize = 8;

/// Talent slots in a record.
pub const MAX_TALENTS: usize = 16;

/// Rows of the unequipped item grid (two slots per row).
pub const MAX_UNEQUIPPED_ITEMS: usize = 10;

/// Player slots that carry an underlord.
pub const UNDERLORD_SLOTS: usize = 2;

/// Board unit id marking the cell the underlord stands on.
pub const UNDERLORD_MARKER: u8 = 255;

/// Board unit id of an empty cell.
pub const EMPTY_UNIT: u8 = 0;

const _: () = assert!(matches!(char::from_digit(SHARE_CODE_VERSION, 16), Some(VERSION_TAG)));
