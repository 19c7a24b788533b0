//! Board and related things

use crate::bitboard::Bitboard;
use crate::types::{Color, Coord, File, Piece, PieceKind, Rank};

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// Error indicating that a side has no king on the board
///
/// A board without a king is not a valid chess position, so the functions which need the
/// king (like [`Board::find_king()`] or [`is_check()`](crate::movegen::is_check)) report it as
/// an error instead of guessing.
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
#[error("no king of color {0}")]
pub struct NoKingError(pub Color);

/// Error converting a [`Snapshot`] into a [`Board`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum SnapshotError {
    /// Two pieces are placed on the same square
    #[error("square {0} is occupied twice")]
    DuplicateSquare(Coord),
    /// One of the sides doesn't have a king
    #[error("no king of color {0}")]
    NoKing(Color),
    /// One of the sides has more than one king
    #[error("more than one king of color {0}")]
    TooManyKings(Color),
    /// There is a pawn on the 1st or on the 8th rank
    #[error("invalid pawn position {0}")]
    InvalidPawn(Coord),
}

/// Chess board
///
/// The board only holds the pieces. Each piece carries its own history flags (see [`Piece`]),
/// so the board alone is enough to decide on castling and en passant, and no other state
/// needs to be kept between calls.
///
/// Unlike a board restored from [`Snapshot`], a board built with [`Board::empty()`] and
/// [`Board::put()`] is not validated in any way.
///
/// # Example
///
/// ```
/// # use rookery::{Board, Color, Coord, File, Piece, PieceKind, Rank};
/// #
/// let mut board = Board::empty();
/// board.put2(File::E, Rank::R1, Piece::new(Color::White, PieceKind::King));
/// board.put2(File::E, Rank::R8, Piece::new(Color::Black, PieceKind::King));
///
/// assert_eq!(board.find_king(Color::Black), Ok(Coord::from_parts(File::E, Rank::R8)));
/// assert_eq!(board.get_label("e1").map(|p| p.kind), Some(PieceKind::King));
/// assert_eq!(board.get_label("e9"), None);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "Snapshot", try_from = "Snapshot")
)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Board {
    /// Returns a board without any pieces
    pub const fn empty() -> Board {
        Board { cells: [None; 64] }
    }

    /// Returns a board with the initial position
    pub fn initial() -> Board {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut res = Board::empty();
        for file in File::iter() {
            res.put2(file, Rank::R2, Piece::new(Color::White, PieceKind::Pawn));
            res.put2(file, Rank::R7, Piece::new(Color::Black, PieceKind::Pawn));
        }
        for (color, rank) in [(Color::White, Rank::R1), (Color::Black, Rank::R8)] {
            for (file, kind) in File::iter().zip(BACK_RANK) {
                res.put2(file, rank, Piece::new(color, kind));
            }
        }
        res
    }

    /// Returns the contents of the square with coordinate `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Option<Piece> {
        self.cells[c.index()]
    }

    /// Returns the contents of the square with file `file` and rank `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Option<Piece> {
        self.get(Coord::from_parts(file, rank))
    }

    /// Returns the contents of the square with label `label`, like `"e4"`
    ///
    /// Malformed labels are treated as empty squares.
    pub fn get_label(&self, label: &str) -> Option<Piece> {
        self.get(Coord::from_str(label).ok()?)
    }

    /// Puts `piece` to the square with coordinate `c`, replacing its previous contents
    #[inline]
    pub fn put(&mut self, c: Coord, piece: Piece) {
        self.cells[c.index()] = Some(piece);
    }

    /// Puts `piece` to the square with file `file` and rank `rank`
    #[inline]
    pub fn put2(&mut self, file: File, rank: Rank, piece: Piece) {
        self.put(Coord::from_parts(file, rank), piece);
    }

    /// Removes the piece from the square with coordinate `c` and returns it
    #[inline]
    pub fn take(&mut self, c: Coord) -> Option<Piece> {
        self.cells[c.index()].take()
    }

    /// Iterates over all the pieces on the board, from a8 to h1
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::iter().filter_map(|c| Some((c, self.get(c)?)))
    }

    /// Returns all the occupied squares
    pub fn occupied(&self) -> Bitboard {
        self.iter().map(|(c, _)| c).collect()
    }

    /// Returns all the squares occupied by pieces of color `color`
    pub fn color(&self, color: Color) -> Bitboard {
        self.iter()
            .filter(|(_, p)| p.color == color)
            .map(|(c, _)| c)
            .collect()
    }

    /// Returns all the squares occupied by pieces with color `color` and kind `kind`
    pub fn piece(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.iter()
            .filter(|(_, p)| p.is(color, kind))
            .map(|(c, _)| c)
            .collect()
    }

    /// Returns the position of the king with color `color`
    ///
    /// If there are several such kings, returns the first one in iteration order.
    pub fn find_king(&self, color: Color) -> Result<Coord, NoKingError> {
        self.iter()
            .find(|(_, p)| p.is(color, PieceKind::King))
            .map(|(c, _)| c)
            .ok_or(NoKingError(color))
    }

    /// Clears the en passant flag on every pawn
    pub(crate) fn clear_double_moves(&mut self) {
        for piece in self.cells.iter_mut().flatten() {
            piece.just_double_moved = false;
        }
    }

    /// Returns the listing of pieces suitable for saving the position
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(self)
    }

    /// Wraps the board to allow pretty-printing with the given style `style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use rookery::{Board, board::PrettyStyle};
    /// #
    /// let b = Board::initial();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    ///  |abcdefgh
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    ///
    /// let res = r#"
    /// 8│♜♞♝♛♚♝♞♜
    /// 7│♟♟♟♟♟♟♟♟
    /// 6│........
    /// 5│........
    /// 4│........
    /// 3│........
    /// 2│♙♙♙♙♙♙♙♙
    /// 1│♖♘♗♕♔♗♘♖
    /// ─┼────────
    ///  │abcdefgh
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Utf8).to_string().trim(), res.trim());
    /// ```
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::empty()
    }
}

/// Piece placed on a given square, as stored in [`Snapshot`]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedPiece {
    pub coord: Coord,
    pub piece: Piece,
}

/// Piece-by-square listing of a board
///
/// Together with the flags stored in each [`Piece`], the listing is enough to restore the
/// board, including its castling and en passant possibilities. Restoring is done via
/// [`Board::try_from()`], which also validates the position.
///
/// # Example
///
/// ```
/// # use rookery::{Board, board::Snapshot};
/// #
/// let board = Board::initial();
/// let snapshot: Snapshot = board.snapshot();
/// assert_eq!(snapshot.pieces.len(), 32);
/// assert_eq!(Board::try_from(snapshot), Ok(board));
/// ```
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub pieces: Vec<PlacedPiece>,
}

impl From<&Board> for Snapshot {
    fn from(b: &Board) -> Snapshot {
        Snapshot {
            pieces: b
                .iter()
                .map(|(coord, piece)| PlacedPiece { coord, piece })
                .collect(),
        }
    }
}

impl From<Board> for Snapshot {
    fn from(b: Board) -> Snapshot {
        Snapshot::from(&b)
    }
}

impl TryFrom<&Snapshot> for Board {
    type Error = SnapshotError;

    fn try_from(s: &Snapshot) -> Result<Board, Self::Error> {
        let mut res = Board::empty();
        for &PlacedPiece { coord, piece } in &s.pieces {
            if res.get(coord).is_some() {
                return Err(SnapshotError::DuplicateSquare(coord));
            }
            if piece.kind == PieceKind::Pawn && matches!(coord.rank(), Rank::R1 | Rank::R8) {
                return Err(SnapshotError::InvalidPawn(coord));
            }
            res.put(coord, piece);
        }

        for color in [Color::White, Color::Black] {
            match res.piece(color, PieceKind::King).popcount() {
                0 => return Err(SnapshotError::NoKing(color)),
                1 => {}
                _ => return Err(SnapshotError::TooManyKings(color)),
            }
        }

        Ok(res)
    }
}

impl TryFrom<Snapshot> for Board {
    type Error = SnapshotError;

    fn try_from(s: Snapshot) -> Result<Board, Self::Error> {
        Board::try_from(&s)
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;

    fn piece(p: Piece) -> char;

    fn cell(c: Option<Piece>) -> char {
        c.map_or('.', Self::piece)
    }

    fn fmt(b: &Board, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            write!(f, "{}{}", rank, Self::VERT_FRAME)?;
            for file in File::iter() {
                write!(f, "{}", Self::cell(b.get2(file, rank)))?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in File::iter() {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, " {}", Self::VERT_FRAME)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';

    fn piece(p: Piece) -> char {
        p.as_char()
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';

    fn piece(p: Piece) -> char {
        p.as_utf8_char()
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.board, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(color: Color, kind: PieceKind) -> Piece {
        Piece::new(color, kind)
    }

    #[test]
    fn test_initial() {
        let b = Board::initial();
        for color in [Color::White, Color::Black] {
            assert_eq!(b.color(color).popcount(), 16);
            assert_eq!(b.piece(color, PieceKind::Pawn).popcount(), 8);
            assert_eq!(b.piece(color, PieceKind::King).popcount(), 1);
            assert_eq!(b.piece(color, PieceKind::Queen).popcount(), 1);
            assert!(b.iter().all(|(_, p)| !p.has_moved && !p.just_double_moved));
        }
        assert_eq!(b.occupied().popcount(), 32);

        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, kind) in File::iter().zip(back) {
            assert_eq!(b.get2(file, Rank::R1), Some(piece(Color::White, kind)));
            assert_eq!(b.get2(file, Rank::R8), Some(piece(Color::Black, kind)));
            assert_eq!(b.get2(file, Rank::R4), None);
        }
        assert_eq!(
            b.find_king(Color::White),
            Ok(Coord::from_parts(File::E, Rank::R1))
        );
        assert_eq!(
            b.find_king(Color::Black),
            Ok(Coord::from_parts(File::E, Rank::R8))
        );
    }

    #[test]
    fn test_labels() {
        let b = Board::initial();
        assert_eq!(b.get_label("d8"), Some(piece(Color::Black, PieceKind::Queen)));
        assert_eq!(b.get_label("a2"), Some(piece(Color::White, PieceKind::Pawn)));
        assert_eq!(b.get_label("e5"), None);
        for bad in ["", "e", "e10", "i1", "a0", "a9", "11", "ee"] {
            assert_eq!(b.get_label(bad), None);
        }
    }

    #[test]
    fn test_put_take() {
        let mut b = Board::empty();
        let d4 = Coord::from_parts(File::D, Rank::R4);
        assert_eq!(b.find_king(Color::White), Err(NoKingError(Color::White)));

        b.put(d4, piece(Color::White, PieceKind::King));
        assert_eq!(b.find_king(Color::White), Ok(d4));
        assert_eq!(b.occupied(), Bitboard::from_coord(d4));

        assert_eq!(b.take(d4), Some(piece(Color::White, PieceKind::King)));
        assert_eq!(b.take(d4), None);
        assert_eq!(b, Board::empty());
    }

    #[test]
    fn test_clear_double_moves() {
        let mut b = Board::initial();
        let e4 = Coord::from_parts(File::E, Rank::R4);
        let mut pawn = piece(Color::White, PieceKind::Pawn).moved();
        pawn.just_double_moved = true;
        b.put(e4, pawn);
        b.clear_double_moves();
        assert_eq!(b.get(e4), Some(piece(Color::White, PieceKind::Pawn).moved()));
    }

    #[test]
    fn test_snapshot() {
        let mut b = Board::initial();
        let rook = b.take(Coord::from_parts(File::H, Rank::R1)).unwrap();
        b.put2(File::H, Rank::R3, rook.moved());

        let snapshot = b.snapshot();
        assert_eq!(snapshot.pieces.len(), 32);
        assert!(snapshot.pieces.contains(&PlacedPiece {
            coord: Coord::from_parts(File::H, Rank::R3),
            piece: rook.moved(),
        }));
        assert_eq!(Board::try_from(&snapshot), Ok(b));
    }

    #[test]
    fn test_snapshot_errors() {
        let e1 = Coord::from_parts(File::E, Rank::R1);
        let e8 = Coord::from_parts(File::E, Rank::R8);
        let wk = PlacedPiece {
            coord: e1,
            piece: piece(Color::White, PieceKind::King),
        };
        let bk = PlacedPiece {
            coord: e8,
            piece: piece(Color::Black, PieceKind::King),
        };

        let s = Snapshot {
            pieces: vec![wk, bk, wk],
        };
        assert_eq!(Board::try_from(s), Err(SnapshotError::DuplicateSquare(e1)));

        let s = Snapshot { pieces: vec![wk] };
        assert_eq!(Board::try_from(s), Err(SnapshotError::NoKing(Color::Black)));

        let second = PlacedPiece {
            coord: Coord::from_parts(File::A, Rank::R1),
            ..wk
        };
        let s = Snapshot {
            pieces: vec![wk, bk, second],
        };
        assert_eq!(
            Board::try_from(s),
            Err(SnapshotError::TooManyKings(Color::White))
        );

        let a8 = Coord::from_parts(File::A, Rank::R8);
        let pawn = PlacedPiece {
            coord: a8,
            piece: piece(Color::White, PieceKind::Pawn),
        };
        let s = Snapshot {
            pieces: vec![wk, bk, pawn],
        };
        assert_eq!(Board::try_from(s), Err(SnapshotError::InvalidPawn(a8)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() {
        let b = Board::initial();
        let json = serde_json::to_string(&b).unwrap();
        assert!(json.contains("\"e1\""));
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), b);

        let json = r#"{"pieces":[{"coord":"e1","piece":{"kind":"King","color":"white"}}]}"#;
        assert!(serde_json::from_str::<Board>(json).is_err());
    }
}
