use std::fmt::{self, Display};
use std::hint;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordParseError {
    #[error("unexpected file char {0:?}")]
    UnexpectedFileChar(char),
    #[error("unexpected rank char {0:?}")]
    UnexpectedRankChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PieceParseError {
    #[error("unexpected piece char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("unexpected color char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Self {
        match val {
            0 => File::A,
            1 => File::B,
            2 => File::C,
            3 => File::D,
            4 => File::E,
            5 => File::F,
            6 => File::G,
            7 => File::H,
            _ => hint::unreachable_unchecked(),
        }
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "file index must be between 0 and 7");
        unsafe { Self::from_index_unchecked(val) }
    }

    pub const fn try_from_index(val: usize) -> Option<Self> {
        if val < 8 {
            Some(unsafe { Self::from_index_unchecked(val) })
        } else {
            None
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..8).map(|x| unsafe { Self::from_index_unchecked(x) })
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(unsafe {
                Self::from_index_unchecked((u32::from(c) - u32::from('a')) as usize)
            }),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'a' + *self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Rank on the board
///
/// Ranks are indexed from the top of the board: [`Rank::R8`] has index 0 and [`Rank::R1`]
/// has index 7. Use [`Rank::number()`] to get the conventional number from 1 to 8.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    R8 = 0,
    R7 = 1,
    R6 = 2,
    R5 = 3,
    R4 = 4,
    R3 = 5,
    R2 = 6,
    R1 = 7,
}

impl Rank {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Self {
        match val {
            0 => Rank::R8,
            1 => Rank::R7,
            2 => Rank::R6,
            3 => Rank::R5,
            4 => Rank::R4,
            5 => Rank::R3,
            6 => Rank::R2,
            7 => Rank::R1,
            _ => hint::unreachable_unchecked(),
        }
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "rank index must be between 0 and 7");
        unsafe { Self::from_index_unchecked(val) }
    }

    /// Returns the conventional rank number, from 1 to 8
    pub const fn number(&self) -> u8 {
        8 - *self as u8
    }

    /// Creates a rank from its conventional number, returning `None` unless `num` is in `1..=8`
    pub const fn from_number(num: u8) -> Option<Self> {
        if num >= 1 && num <= 8 {
            Some(unsafe { Self::from_index_unchecked((8 - num) as usize) })
        } else {
            None
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..8).map(|x| unsafe { Self::from_index_unchecked(x) })
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Self::from_number((u32::from(c) - u32::from('0')) as u8),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'0' + self.number()) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Returns `true` if `file` is in `0..8` and `rank` is in `1..=8`
///
/// ```
/// # use rookery_base::types::is_within_bounds;
/// assert!(is_within_bounds(0, 1));
/// assert!(is_within_bounds(7, 8));
/// assert!(!is_within_bounds(8, 4));
/// assert!(!is_within_bounds(3, 0));
/// ```
pub const fn is_within_bounds(file: i8, rank: i8) -> bool {
    file >= 0 && file < 8 && rank >= 1 && rank <= 8
}

/// Square on the board
///
/// A `Coord` is always valid, so out-of-bounds squares are rejected when a coordinate is
/// created (see [`Coord::try_new()`], [`Coord::offset()`] and the [`FromStr`] implementation).
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Coord(u8);

impl Coord {
    pub const fn from_index(val: usize) -> Coord {
        assert!(val < 64, "coord must be between 0 and 63");
        Coord(val as u8)
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Coord {
        Coord(val as u8)
    }

    pub const fn from_parts(file: File, rank: Rank) -> Coord {
        Coord(((rank as u8) << 3) | file as u8)
    }

    /// Creates a coordinate from file index `0..8` and rank number `1..=8`
    pub const fn try_new(file: i8, rank: i8) -> Option<Coord> {
        if !is_within_bounds(file, rank) {
            return None;
        }
        Some(Coord::from_parts(
            File::from_index(file as usize),
            Rank::from_index((8 - rank) as usize),
        ))
    }

    pub const fn file(&self) -> File {
        unsafe { File::from_index_unchecked((self.0 & 7) as usize) }
    }

    pub const fn rank(&self) -> Rank {
        unsafe { Rank::from_index_unchecked((self.0 >> 3) as usize) }
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Shifts the coordinate by `d_file` files and `d_rank` ranks
    ///
    /// Positive `d_rank` moves towards the 8th rank. Returns `None` if the result is off
    /// the board.
    ///
    /// ```
    /// # use rookery_base::types::Coord;
    /// let e2: Coord = "e2".parse().unwrap();
    /// assert_eq!(e2.offset(0, 2), Some("e4".parse().unwrap()));
    /// assert_eq!(e2.offset(-1, -1), Some("d1".parse().unwrap()));
    /// assert_eq!(e2.offset(0, -2), None);
    /// assert_eq!(e2.offset(4, 0), None);
    /// ```
    pub const fn offset(self, d_file: i8, d_rank: i8) -> Option<Coord> {
        let file = match (self.file().index() as i8).checked_add(d_file) {
            Some(f) => f,
            None => return None,
        };
        let rank = match (self.rank().number() as i8).checked_add(d_rank) {
            Some(r) => r,
            None => return None,
        };
        Coord::try_new(file, rank)
    }

    /// Returns the `(file, rank)` distance from `self` to `other`, with ranks growing towards the
    /// 8th rank
    pub const fn delta_to(self, other: Coord) -> (i8, i8) {
        (
            other.file().index() as i8 - self.file().index() as i8,
            other.rank().number() as i8 - self.rank().number() as i8,
        )
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0_u8..64_u8).map(Coord)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.0 < 64 {
            return write!(f, "Coord({})", self);
        }
        write!(f, "Coord(?{:?})", self.0)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.file().as_char(), self.rank().as_char())
    }
}

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file_ch), Some(rank_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(CoordParseError::BadLength);
        };
        Ok(Coord::from_parts(
            File::from_char(file_ch).ok_or(CoordParseError::UnexpectedFileChar(file_ch))?,
            Rank::from_char(rank_ch).ok_or(CoordParseError::UnexpectedRankChar(rank_ch))?,
        ))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Coord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Coord {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Coord::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn as_char(&self) -> char {
        match *self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" => return Ok(Color::White),
            "black" => return Ok(Color::Black),
            _ => {}
        }
        let mut chars = s.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return Err(ColorParseError::BadLength);
        };
        Color::from_char(ch).ok_or(ColorParseError::UnexpectedChar(ch))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    King = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
}

impl PieceKind {
    pub const COUNT: usize = 6;

    pub const ALL: [PieceKind; Self::COUNT] = [
        PieceKind::Pawn,
        PieceKind::King,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    /// Returns the capital letter used for this kind in algebraic notation
    pub fn as_char(&self) -> char {
        b"PKNBRQ"[self.index()] as char
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'K' => Some(PieceKind::King),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            _ => None,
        }
    }

    /// Returns `true` for the sliding pieces, which require a clear path
    pub const fn is_slider(&self) -> bool {
        matches!(*self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let name = match *self {
            PieceKind::Pawn => "Pawn",
            PieceKind::King => "King",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
        };
        f.write_str(name)
    }
}

/// A piece standing on the board
///
/// Apart from kind and color, a piece carries the history flags needed by the special
/// moves: `has_moved` for castling and `just_double_moved` for en passant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    /// Set once the piece has made any move
    #[cfg_attr(feature = "serde", serde(default))]
    pub has_moved: bool,
    /// Set only for a pawn which has just advanced two squares
    #[cfg_attr(feature = "serde", serde(default))]
    pub just_double_moved: bool,
}

impl Piece {
    /// Creates a piece which has never moved
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        Piece {
            kind,
            color,
            has_moved: false,
            just_double_moved: false,
        }
    }

    /// Returns the same piece with `has_moved` set
    pub const fn moved(self) -> Piece {
        Piece {
            has_moved: true,
            ..self
        }
    }

    pub const fn is(&self, color: Color, kind: PieceKind) -> bool {
        self.color as u8 == color as u8 && self.kind as u8 == kind as u8
    }

    /// Returns the letter of the piece, uppercase for White and lowercase for Black
    pub fn as_char(&self) -> char {
        match self.color {
            Color::White => self.kind.as_char(),
            Color::Black => self.kind.as_char().to_ascii_lowercase(),
        }
    }

    pub fn as_utf8_char(&self) -> char {
        let idx = self.kind.index() + PieceKind::COUNT * self.color as usize;
        ['♙', '♔', '♘', '♗', '♖', '♕', '♟', '♚', '♞', '♝', '♜', '♛'][idx]
    }

    /// Parses a piece letter, using uppercase for White and lowercase for Black
    ///
    /// The resulting piece has never moved.
    pub fn from_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(color, PieceKind::from_char(c)?))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Piece {
    type Err = PieceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return Err(PieceParseError::BadLength);
        };
        Piece::from_char(ch).ok_or(PieceParseError::UnexpectedChar(ch))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastlingSide {
    Queen = 0,
    King = 1,
}

impl CastlingSide {
    /// File on which the king lands after castling
    pub const fn king_dst_file(&self) -> File {
        match *self {
            CastlingSide::King => File::G,
            CastlingSide::Queen => File::C,
        }
    }

    /// File on which the castling rook starts
    pub const fn rook_src_file(&self) -> File {
        match *self {
            CastlingSide::King => File::H,
            CastlingSide::Queen => File::A,
        }
    }

    /// File on which the castling rook lands
    pub const fn rook_dst_file(&self) -> File {
        match *self {
            CastlingSide::King => File::F,
            CastlingSide::Queen => File::D,
        }
    }
}
