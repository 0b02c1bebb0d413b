//! Packed board module.
//! 64 square codes stored two per byte (high nibble first), 32 bytes total.
//! Rows run from the black back rank (row 0) to the white back rank (row 7).

use anyhow::{bail, Context, Result};
use crate::square::{encode_char, SquareCode};

pub const BOARD_SIZE: usize = 32;
pub const SQUARE_COUNT: usize = BOARD_SIZE * 2;
pub const BYTES_PER_ROW: usize = 4;

/// Standard starting position, byte-for-byte.
pub const STARTING_POSITION: [u8; BOARD_SIZE] = [
    66, 53, 99, 36,         // (r n) (b q) (k b) (n r)
    17, 17, 17, 17,         // (p p) x4
    0, 0, 0, 0,
    0, 0, 0, 0,
    0, 0, 0, 0,
    0, 0, 0, 0,
    153, 153, 153, 153,     // (P P) x4
    202, 189, 235, 172,     // (R N) (B Q) (K B) (N R)
];

pub fn high(byte: u8) -> u8 {
    byte >> 4
}

pub fn low(byte: u8) -> u8 {
    byte & 0x0F
}

/// Packs two square codes into one byte. Only the low 4 bits of each are kept.
pub fn pack_pair(high: u8, low: u8) -> u8 {
    (high & 0x0F) << 4 | (low & 0x0F)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedBoard {
    bytes: [u8; BOARD_SIZE],
}

impl PackedBoard {
    pub fn starting() -> PackedBoard {
        PackedBoard { bytes: STARTING_POSITION }
    }

    /// Wraps a raw buffer as-is. Reserved nibbles are kept; see `validate`.
    #[cfg(test)]
    pub fn from_bytes(bytes: [u8; BOARD_SIZE]) -> PackedBoard {
        PackedBoard { bytes }
    }

    /// Parses an 8x8 text grid (as produced by the renderer) back into packed form.
    pub fn from_text(text: &str) -> Result<PackedBoard> {
        let rows: Vec<&str> = text.lines().collect();
        if rows.len() != 8 {
            bail!("Expected 8 rows, got {}", rows.len());
        }

        let mut codes = [0u8; SQUARE_COUNT];
        for (r, row) in rows.iter().enumerate() {
            let glyphs: Vec<char> = row.chars().collect();
            if glyphs.len() != 8 {
                bail!("Row {} has {} squares, expected 8: '{}'", r, glyphs.len(), row);
            }
            for (c, glyph) in glyphs.into_iter().enumerate() {
                codes[r * 8 + c] = encode_char(glyph)
                    .with_context(|| format!("Unknown glyph {:?} at row {}, column {}", glyph, r, c))?;
            }
        }

        let mut bytes = [0u8; BOARD_SIZE];
        for (i, pair) in codes.chunks_exact(2).enumerate() {
            bytes[i] = pack_pair(pair[0], pair[1]);
        }
        Ok(PackedBoard { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; BOARD_SIZE] {
        &self.bytes
    }

    /// All 64 raw square codes in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = u8> + '_ {
        self.bytes.iter().flat_map(|&b| [high(b), low(b)])
    }

    /// Raw code of the square at `index` (0..64), `None` when out of range.
    pub fn square(&self, index: usize) -> Option<u8> {
        let byte = *self.bytes.get(index / 2)?;
        Some(if index % 2 == 0 { high(byte) } else { low(byte) })
    }

    /// Raw code at (`row`, `col`), both 0..8.
    pub fn at(&self, row: usize, col: usize) -> Option<u8> {
        if row >= 8 || col >= 8 {
            return None;
        }
        self.square(row * 8 + col)
    }

    /// Checks that every nibble holds a defined square code.
    pub fn validate(&self) -> Result<()> {
        for (i, code) in self.squares().enumerate() {
            SquareCode::try_from(code).with_context(|| {
                format!("Invalid packed byte {} at index {}", self.bytes[i / 2], i / 2)
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_bytes_exact() {
        let board = PackedBoard::starting();
        let expected: [u8; 32] = [
            66, 53, 99, 36, 17, 17, 17, 17, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            153, 153, 153, 153, 202, 189, 235, 172,
        ];
        assert_eq!(board.as_bytes(), &expected);
    }

    #[test]
    fn test_nibble_order_high_first() {
        let board = PackedBoard::starting();
        // a8 is the black rook, b8 the black knight
        assert_eq!(board.square(0), Some(4));
        assert_eq!(board.square(1), Some(2));
        assert_eq!(board.at(7, 4), Some(14));
        assert_eq!(board.at(0, 4), Some(6));
        assert_eq!(board.square(64), None);
        assert_eq!(board.at(8, 0), None);
    }

    #[test]
    fn test_squares_yields_64_codes() {
        let codes: Vec<u8> = PackedBoard::starting().squares().collect();
        assert_eq!(codes.len(), SQUARE_COUNT);
        assert_eq!(&codes[8..16], &[1; 8]);
        assert!(codes[16..48].iter().all(|&c| c == 0));
        assert_eq!(&codes[48..56], &[9; 8]);
    }

    #[test]
    fn test_pack_pair() {
        assert_eq!(pack_pair(4, 2), 66);
        assert_eq!(pack_pair(12, 10), 202);
        assert_eq!(high(235), 14);
        assert_eq!(low(235), 11);
    }

    #[test]
    fn test_validate_starting_ok() {
        assert!(PackedBoard::starting().validate().is_ok());
    }

    #[test]
    fn test_validate_flags_reserved_nibble() {
        let mut bytes = STARTING_POSITION;
        bytes[10] = pack_pair(0, 15);
        let err = PackedBoard::from_bytes(bytes).validate().unwrap_err();
        assert!(err.to_string().contains("index 10"));
    }

    #[test]
    fn test_from_text_round_trip() {
        let text = "rnbqkbnr\npppppppp\n........\n........\n........\n........\nPPPPPPPP\nRNBQKBNR\n";
        let board = PackedBoard::from_text(text).unwrap();
        assert_eq!(board, PackedBoard::starting());
    }

    #[test]
    fn test_from_text_rejects_bad_grid() {
        assert!(PackedBoard::from_text("rnbqkbnr\n").is_err());
        let short_row = "rnbqkbn\npppppppp\n........\n........\n........\n........\nPPPPPPPP\nRNBQKBNR\n";
        assert!(PackedBoard::from_text(short_row).is_err());
        let bad_glyph = "rnbqkbnr\npppppppp\n...x....\n........\n........\n........\nPPPPPPPP\nRNBQKBNR\n";
        let err = PackedBoard::from_text(bad_glyph).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }
}
