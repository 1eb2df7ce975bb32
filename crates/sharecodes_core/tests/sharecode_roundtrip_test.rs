//! Integration tests for the share code codec.
//!
//! Covers the reference code captured from the game client, randomized full
//! round trips, and the failure paths of the envelope.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sharecodes_core::{
    decode, encode, BoardFile, ItemSlot, PackedRanks, ShareCode, ShareCodeError, RECORD_LAYOUT,
    RECORD_SIZE,
};

const REFERENCE_CODE: &str = "8qAMAAP4BAK4BAATjJ/5uAEZuAAAgEVM0LgAAAG0AbQAACwAAAP8BDAABCRsI/wAJARcBAQAOAQUBAQAGES0QbUBHOlcBEmoBAAFIACABaBABAyAAEAEpLAIgIAAwAAAGAgEgAAWCAHUR2gB0EQkBAQRjAAVyLBAAAgABBAMGdycAdy4fAK4BAA==";

fn random_share_code(rng: &mut ChaCha8Rng) -> ShareCode {
    let mut code = ShareCode::new();
    for row in &mut code.unit_items {
        for slot in row.iter_mut() {
            *slot = ItemSlot::new(rng.gen());
        }
    }
    for row in &mut code.board_unit_ids {
        rng.fill(&mut row[..]);
    }
    for talent in &mut code.selected_talents {
        rng.fill(&mut talent[..]);
    }
    for ranks in &mut code.packed_unit_ranks {
        *ranks = PackedRanks::from_raw(rng.gen());
    }
    for slot in &mut code.bench_unit_items {
        *slot = ItemSlot::new(rng.gen());
    }
    rng.fill(&mut code.benched_unit_ids[..]);
    code.packed_bench_ranks = PackedRanks::from_raw(rng.gen());
    rng.fill(&mut code.underlord_ids[..]);
    rng.fill(&mut code.underlord_ranks[..]);
    for pair in &mut code.unequipped_items {
        for slot in pair.iter_mut() {
            *slot = ItemSlot::new(rng.gen());
        }
    }
    code
}

#[test]
fn test_reference_code_unit_at_six_six() {
    let code = decode(REFERENCE_CODE).unwrap();
    assert_eq!(code.board_unit_ids[6][6], 6);
}

#[test]
fn test_reference_code_rank_word() {
    let code = decode(REFERENCE_CODE).unwrap();
    assert_eq!(code.packed_unit_ranks[1].raw(), 8224);
    assert_eq!(code.packed_unit_ranks[1].unpack(), [0, 2, 0, 2, 0, 0, 0, 0]);
}

#[test]
fn test_demo_client_code() {
    let code = decode("8qAMMALsnAP4BAP4BAPIBAAAuir4AAP82JAAMNAAACxkSCEcAVxkNUgEAAAI2FgAEAQABAwkBAAMJB4oBABgEAAG6JwC63m4B")
        .unwrap();
    assert_eq!(code.board_unit_ids[6][3], 52);
    assert_eq!(code.board_unit_ids[6][6], 11);
}

#[test]
fn test_reference_code_survives_board_file() {
    let code = decode(REFERENCE_CODE).unwrap();
    let board = BoardFile::from_share_code(&code);
    let text = board.to_toml_string().unwrap();
    let rebuilt = BoardFile::from_toml_str(&text).unwrap().to_share_code().unwrap();

    assert_eq!(rebuilt.board_unit_ids, code.board_unit_ids);
    assert_eq!(rebuilt.unit_items, code.unit_items);
    assert_eq!(rebuilt.underlord_ids, code.underlord_ids);
}

#[test]
fn test_randomized_full_roundtrip() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED_0008);
    for _ in 0..500 {
        let code = random_share_code(&mut rng);
        let text = encode(&code);
        let decoded = decode(&text).unwrap();

        assert_eq!(decoded.to_bytes(), code.to_bytes());
        assert_eq!(decoded, code);
    }
}

#[test]
fn test_image_is_always_record_size() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..50 {
        let image = random_share_code(&mut rng).to_bytes();
        assert_eq!(image.len(), RECORD_SIZE);
        assert_eq!(image.len(), 424);
    }
}

#[test]
fn test_padding_regions_always_zero() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let padding = RECORD_LAYOUT
        .iter()
        .find(|field| field.name == "padding")
        .unwrap();

    for _ in 0..50 {
        let image = random_share_code(&mut rng).to_bytes();
        assert_eq!(image[0], 0, "format tag");
        assert!(image[padding.range()].iter().all(|&b| b == 0));
    }
}

#[test]
fn test_truncated_image_zero_fills() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let code = random_share_code(&mut rng);
    let image = code.to_bytes();

    for cut in [0, 1, 100, 289, 292, 300, 423] {
        let partial = ShareCode::from_bytes(&image[..cut]);
        let rebuilt = partial.to_bytes();

        for (offset, &byte) in rebuilt.iter().enumerate().skip(cut) {
            assert_eq!(byte, 0, "byte {offset} after cut {cut}");
        }
    }
}

#[test]
fn test_truncated_payload_decodes() {
    let mut code = ShareCode::new();
    code.board_unit_ids[0][0] = 46;
    let image = code.to_bytes();

    let compressed = snap::raw::Encoder::new().compress_vec(&image[..200]).unwrap();
    let text = format!("8{}", base64_encode(&compressed));

    let decoded = decode(&text).unwrap();
    assert_eq!(decoded.board_unit_ids[0][0], 46);
}

#[test]
fn test_corrupted_text_never_yields_record() {
    for position in [1, 5, 40, 100] {
        let mut text = REFERENCE_CODE.to_string();
        text.replace_range(position..=position, "*");
        match decode(&text) {
            Err(ShareCodeError::MalformedText(_) | ShareCodeError::DecompressionFailure(_)) => {}
            other => panic!("corruption at {position} produced {other:?}"),
        }
    }
}

#[test]
fn test_wrong_alphabet_rejected() {
    let url_safe = REFERENCE_CODE.replace('/', "_").replace('+', "-");
    assert!(matches!(decode(&url_safe), Err(ShareCodeError::MalformedText(_))));
}

fn base64_encode(bytes: &[u8]) -> String {
    use base64::Engine as _;
    base64::engine::general_purpose::STANDARD.encode(bytes)
}
