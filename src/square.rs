//! Square codec.
//! Each square is a 4-bit code: bit 3 is the color (0 = black, 1 = white),
//! bits 0-2 are the piece kind (0 = empty .. 6 = king).
//! Codes 7 and 15 are undefined; decoding them yields no glyph.

use anyhow::{bail, Result};

/// Side owning a square. Empty squares still carry a color bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Black = 0,
    White = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceKind {
    Empty = 0,
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceKind {
    fn from_bits(bits: u8) -> Option<PieceKind> {
        match bits {
            0 => Some(PieceKind::Empty),
            1 => Some(PieceKind::Pawn),
            2 => Some(PieceKind::Knight),
            3 => Some(PieceKind::Bishop),
            4 => Some(PieceKind::Rook),
            5 => Some(PieceKind::Queen),
            6 => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Lowercase letter for the kind, `.` for empty.
    fn letter(self) -> char {
        match self {
            PieceKind::Empty => '.',
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

const COLOR_BIT: u8 = 0b1000;
const KIND_MASK: u8 = 0b0111;

/// A validated square code (one of the 14 defined values).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SquareCode(u8);

impl SquareCode {
    pub const BLACK_EMPTY: SquareCode = SquareCode(0);

    pub fn new(color: Color, kind: PieceKind) -> SquareCode {
        SquareCode((color as u8) << 3 | kind as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn color(self) -> Color {
        if self.0 & COLOR_BIT == 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn kind(self) -> PieceKind {
        // Construction guarantees the kind bits are 0..=6
        PieceKind::from_bits(self.0 & KIND_MASK).unwrap_or(PieceKind::Empty)
    }

    pub fn to_char(self) -> char {
        let c = self.kind().letter();
        match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

impl TryFrom<u8> for SquareCode {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self> {
        if value > 0x0F {
            bail!("Square code {} does not fit in a nibble", value);
        }
        if PieceKind::from_bits(value & KIND_MASK).is_none() {
            bail!("Square code {} is reserved/undefined", value);
        }
        Ok(SquareCode(value))
    }
}

/// Maps a raw square code to its display glyph.
/// Both empty variants (0 and 8) show as `.`. Undefined codes return `None`
/// instead of an error; callers decide how to emit the missing glyph.
pub fn decode_char(code: u8) -> Option<char> {
    SquareCode::try_from(code).ok().map(SquareCode::to_char)
}

/// Inverse of `decode_char`. `.` maps to the black-empty code, which is the
/// filler the starting position uses.
pub fn encode_char(c: char) -> Option<u8> {
    if c == '.' {
        return Some(SquareCode::BLACK_EMPTY.value());
    }
    let color = if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    let kind = match c.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };
    Some(SquareCode::new(color, kind).value())
}
