//! Text renderer.
//! Emits the packed board as 8 lines of 8 glyphs, no separators or labels.

use std::io::{self, Write};

use crate::board::{high, low, PackedBoard, BYTES_PER_ROW};
use crate::square::decode_char;

/// Undefined codes have no glyph; a NUL is emitted in their place.
const NO_GLYPH: char = '\0';

fn glyph(code: u8) -> char {
    decode_char(code).unwrap_or(NO_GLYPH)
}

/// Renders the board, high nibble before low nibble, a newline after every 4th byte.
pub fn render(board: &PackedBoard) -> String {
    let mut text = String::with_capacity(72);
    for (i, &byte) in board.as_bytes().iter().enumerate() {
        text.push(glyph(high(byte)));
        text.push(glyph(low(byte)));
        if (i + 1) % BYTES_PER_ROW == 0 {
            text.push('\n');
        }
    }
    text
}

/// Writes the rendered board to `out`.
pub fn write_board<W: Write>(board: &PackedBoard, out: &mut W) -> io::Result<()> {
    out.write_all(render(board).as_bytes())
}

/// Rows of the rendered grid, without newlines.
pub fn rows(board: &PackedBoard) -> Vec<String> {
    render(board).lines().map(str::to_string).collect()
}
