//! FEN export.
//! Builds a FEN string from the packed board and checks it with `shakmaty`.
//! There is no turn tracking, so the side to move is always White.

use anyhow::{Context, Result};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess};

use crate::board::PackedBoard;
use crate::render;

/// Piece placement field, rank 8 first. Empty runs collapse to digits.
pub fn board_placement(board: &PackedBoard) -> Result<String> {
    board.validate().context("Board holds reserved square codes")?;

    let mut ranks = Vec::with_capacity(8);
    for row in render::rows(board) {
        let mut rank = String::new();
        let mut empty = 0;
        for c in row.chars() {
            if c == '.' {
                empty += 1;
                continue;
            }
            if empty > 0 {
                rank.push_str(&empty.to_string());
                empty = 0;
            }
            rank.push(c);
        }
        if empty > 0 {
            rank.push_str(&empty.to_string());
        }
        ranks.push(rank);
    }
    Ok(ranks.join("/"))
}

/// Castling rights implied by king and rook home squares.
/// Row 7 is White's back rank, row 0 Black's; e-file is column 4.
pub fn castling_rights(board: &PackedBoard) -> String {
    let glyph = |row, col| board.at(row, col).and_then(crate::square::decode_char);

    let white_king_e1 = glyph(7, 4) == Some('K');
    let white_rook_a1 = glyph(7, 0) == Some('R');
    let white_rook_h1 = glyph(7, 7) == Some('R');
    let black_king_e8 = glyph(0, 4) == Some('k');
    let black_rook_a8 = glyph(0, 0) == Some('r');
    let black_rook_h8 = glyph(0, 7) == Some('r');

    let mut castling = String::new();
    if white_king_e1 && white_rook_h1 {
        castling.push('K');
    }
    if white_king_e1 && white_rook_a1 {
        castling.push('Q');
    }
    if black_king_e8 && black_rook_h8 {
        castling.push('k');
    }
    if black_king_e8 && black_rook_a8 {
        castling.push('q');
    }

    if castling.is_empty() {
        castling = "-".to_string();
    }
    castling
}

/// Full FEN for the board, validated for syntax and legality.
pub fn to_fen(board: &PackedBoard) -> Result<String> {
    let fen = format!("{} w {} - 0 1", board_placement(board)?, castling_rights(board));

    let parsed = Fen::from_ascii(fen.as_bytes())
        .map_err(|e| anyhow::anyhow!("Invalid FEN syntax: {} (built: '{}')", e, fen))?;
    parsed
        .into_position::<Chess>(CastlingMode::Standard)
        .map_err(|e| anyhow::anyhow!("Illegal position: {} (built: '{}')", e, fen))?;

    Ok(fen)
}
