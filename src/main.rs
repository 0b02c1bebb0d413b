mod board;
mod config;
mod fen;
mod render;
mod square;

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, Write};
use std::time::Instant;

use board::PackedBoard;
use config::{Config, OutputFormat};

/// Everything the JSON output reports about a board
#[derive(Serialize)]
struct BoardSnapshot {
    bytes: Vec<u8>,
    rows: Vec<String>,
    fen: String,
}

impl BoardSnapshot {
    fn from_board(board: &PackedBoard) -> Result<BoardSnapshot> {
        Ok(BoardSnapshot {
            bytes: board.as_bytes().to_vec(),
            rows: render::rows(board),
            fen: fen::to_fen(board)?,
        })
    }
}

fn print_board<W: Write>(board: &PackedBoard, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Grid => {
            render::write_board(board, out).context("Failed to write board")?;
        }
        OutputFormat::Fen => {
            let fen = fen::to_fen(board).context("Failed to build FEN")?;
            writeln!(out, "{}", fen).context("Failed to write FEN")?;
        }
        OutputFormat::Json => {
            let snapshot = BoardSnapshot::from_board(board)?;
            serde_json::to_writer_pretty(&mut *out, &snapshot)
                .context("Failed to serialize board snapshot")?;
            writeln!(out).context("Failed to write board snapshot")?;
        }
    }
    Ok(())
}

/// Re-encodes the rendered grid and compares it with the packed bytes
fn check_round_trip(board: &PackedBoard) -> Result<()> {
    let reparsed = PackedBoard::from_text(&render::render(board))
        .context("Rendered grid could not be re-encoded")?;
    if reparsed.as_bytes() != board.as_bytes() {
        anyhow::bail!(
            "Re-encoded bytes {:?} differ from board bytes {:?}",
            reparsed.as_bytes(),
            board.as_bytes()
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let matches = config::cli().get_matches();
    let config = Config::from_matches(&matches)?;

    let start = Instant::now();

    // Fixed-size board on the stack, filled with the starting position
    let board = PackedBoard::starting();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_board(&board, config.format, &mut out)?;
    out.flush().context("Failed to flush stdout")?;

    if config.debug {
        eprintln!("Render latency ({}): {:?}", config.format, start.elapsed()); // stderr keeps stdout byte-exact
        match check_round_trip(&board) {
            Ok(()) => eprintln!("Round trip: rendered grid re-encodes to the same 32 bytes"),
            Err(e) => eprintln!("⚠ Round trip failed: {:#}", e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_grid() {
        let mut out = Vec::new();
        print_board(&PackedBoard::starting(), OutputFormat::Grid, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "rnbqkbnr\npppppppp\n........\n........\n........\n........\nPPPPPPPP\nRNBQKBNR\n"
        );
    }

    #[test]
    fn test_print_fen() {
        let mut out = Vec::new();
        print_board(&PackedBoard::starting(), OutputFormat::Fen, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1\n"
        );
    }

    #[test]
    fn test_round_trip_check_passes_for_starting_board() {
        assert!(check_round_trip(&PackedBoard::starting()).is_ok());
    }

    #[test]
    fn test_round_trip_check_reports_reserved_codes() {
        let mut bytes = board::STARTING_POSITION;
        bytes[8] = board::pack_pair(15, 0);
        let err = check_round_trip(&PackedBoard::from_bytes(bytes)).unwrap_err();
        assert!(err.to_string().contains("re-encoded"));
    }

    #[test]
    fn test_print_json_snapshot() {
        let mut out = Vec::new();
        print_board(&PackedBoard::starting(), OutputFormat::Json, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["bytes"].as_array().unwrap().len(), 32);
        assert_eq!(value["bytes"][0], 66);
        assert_eq!(value["bytes"][31], 172);
        assert_eq!(value["rows"][0], "rnbqkbnr");
        assert_eq!(
            value["fen"],
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }
}
