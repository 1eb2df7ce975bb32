//! # Sharecodes
//!
//! Command-line tool to build, read and inspect Underlords share codes.
//!
//! Log verbosity comes from `SHARECODES_LOG` (an `EnvFilter` directive,
//! default `info`). Logs go to stderr so stdout stays pipeable.

#![deny(missing_docs)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use sharecodes_core::layout::{self, decimal_dump, hex_dump};
use sharecodes_core::{BoardFile, ItemSlot, PackedRanks, ShareCode, ShareCodeResult, UNDERLORD_MARKER};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "SHARECODES_LOG";

/// Code decoded by the demo, captured from the game client.
const DEMO_CODE: &str = "8qAMMALsnAP4BAP4BAPIBAAAuir4AAP82JAAMNAAACxkSCEcAVxkNUgEAAAI2FgAEAQABAwkBAAMJB4oBABgEAAG6JwC63m4B";

fn main() -> ExitCode {
    init_logging();
    tracing::info!("Starting sharecodes {}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print_usage();
        return ExitCode::FAILURE;
    };

    let result = match (command.as_str(), args.get(1)) {
        ("encode", Some(path)) => encode_board(path),
        ("decode", Some(code)) => decode_code(code),
        ("bytes", Some(code)) => dump_bytes(code),
        ("layout", None) => {
            show_layout();
            Ok(())
        }
        ("demo", None) => run_demo(),
        _ => {
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{command} failed: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    eprintln!("Usage: sharecodes <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  encode <board.toml>   Print the share code for a board file");
    eprintln!("  decode <code>         Print a share code as a board file");
    eprintln!("  bytes <code>          Dump the raw 424-byte record");
    eprintln!("  layout                Show the v8 record layout");
    eprintln!("  demo                  Build a sample board and decode a known code");
}

fn encode_board(path: &str) -> ShareCodeResult<()> {
    let board = BoardFile::load(path)?;
    let code = board.to_share_code()?;
    println!("{code}");
    Ok(())
}

fn decode_code(text: &str) -> ShareCodeResult<()> {
    let code = ShareCode::from_code(text)?;
    let board = BoardFile::from_share_code(&code);
    print!("{}", board.to_toml_string()?);
    Ok(())
}

fn dump_bytes(text: &str) -> ShareCodeResult<()> {
    let image = ShareCode::from_code(text)?.to_bytes();
    println!("{}", hex_dump(&image));
    println!();
    println!("{}", decimal_dump(&image));
    Ok(())
}

fn show_layout() {
    layout::log_layout();
    print!("{}", layout::layout_table());
}

fn run_demo() -> ShareCodeResult<()> {
    let mut code = ShareCode::new();

    code.board_unit_ids[0][0] = 46; // Alchemist
    code.board_unit_ids[6][6] = 11; // Antimage
    code.board_unit_ids[6][3] = 52; // Lich

    code.board_unit_ids[4][4] = UNDERLORD_MARKER;
    code.underlord_ids[1] = 4; // Hobgen
    code.underlord_ranks[1] = 4;

    code.unit_items[0][0] = ItemSlot::new(10171);
    code.unequipped_items[0][0] = ItemSlot::new(10170);

    code.packed_unit_ranks[0] = PackedRanks::pack(&[2]);
    code.packed_unit_ranks[6] = PackedRanks::pack(&[0, 0, 0, 0, 0, 0, 3, 0]);

    println!("{}", code.to_code_string());

    let known = ShareCode::from_code(DEMO_CODE)?;
    tracing::info!("Unit at 6x3: {}", known.board_unit_ids[6][3]);
    println!("Unit at 6x3: {}", known.board_unit_ids[6][3]);
    Ok(())
}
