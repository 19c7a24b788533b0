//! Records of the applied moves

use super::base::{Move, MoveKind, PromoteKind};
use crate::board::Board;
use crate::movegen::GameStatus;
use crate::types::{Color, Coord, PieceKind};
use crate::validate::{self, ValidateOptions};

use std::fmt;

/// Which parts of the source square are needed to tell the move apart from the others
///
/// Two knights on `b1` and `f3` can both go to `d2`, so the move is written as `Nbd2` or
/// `Nfd2`. The file is preferred, and the rank is used only when the file alone is not
/// enough.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Disambiguation {
    /// Source file must be written
    pub file: bool,
    /// Source rank must be written
    pub rank: bool,
}

impl Disambiguation {
    /// Detects the disambiguation for the move `mv` on the board `b` before the move is made
    pub(crate) fn detect(b: &Board, mv: Move) -> Disambiguation {
        let piece = match b.get(mv.src) {
            Some(p) => p,
            None => return Disambiguation::default(),
        };
        if matches!(piece.kind, PieceKind::Pawn | PieceKind::King) {
            return Disambiguation::default();
        }

        let (mut any, mut same_file, mut same_rank) = (false, false, false);
        for src in b.piece(piece.color, piece.kind).without(mv.src) {
            if !validate::is_move_valid(b, src, mv.dst, ValidateOptions::new()) {
                continue;
            }
            any = true;
            same_file |= src.file() == mv.src.file();
            same_rank |= src.rank() == mv.src.rank();
        }

        Disambiguation {
            file: any && (same_rank || !same_file),
            rank: any && same_file,
        }
    }
}

/// Description of a move applied by [`apply_move()`](super::apply_move)
///
/// The record keeps everything needed to show the move to the user: the moving piece, the
/// captured piece, the move kind and the status of the opponent after the move. Its
/// [`Display`](fmt::Display) implementation writes the move in standard algebraic notation,
/// like `Nbxd2`, `e8=Q+` or `O-O-O#`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRecord {
    /// Source square
    pub src: Coord,
    /// Destination square
    pub dst: Coord,
    /// Kind of the moving piece (before promotion)
    pub piece: PieceKind,
    /// Side which made the move
    pub color: Color,
    /// Kind of the captured piece, if any
    pub captured: Option<PieceKind>,
    /// Move kind
    pub kind: MoveKind,
    /// Piece chosen on promotion
    pub promote: Option<PromoteKind>,
    /// Disambiguation for the notation
    pub disambiguation: Disambiguation,
    /// Status of the opponent after the move
    pub status: GameStatus,
}

impl MoveRecord {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_castling(&self) -> bool {
        self.kind.is_castling()
    }

    #[inline]
    pub fn is_enpassant(&self) -> bool {
        self.kind == MoveKind::Enpassant
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.kind == MoveKind::Promote
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.kind {
            MoveKind::CastlingKingside => write!(f, "O-O")?,
            MoveKind::CastlingQueenside => write!(f, "O-O-O")?,
            _ if self.piece == PieceKind::Pawn => {
                if self.src.file() != self.dst.file() {
                    write!(f, "{}x", self.src.file().as_char())?;
                }
                write!(f, "{}", self.dst)?;
                if let Some(p) = self.promote {
                    write!(f, "={}", PieceKind::from(p).as_char())?;
                }
            }
            _ => {
                write!(f, "{}", self.piece.as_char())?;
                if self.disambiguation.file {
                    write!(f, "{}", self.src.file().as_char())?;
                }
                if self.disambiguation.rank {
                    write!(f, "{}", self.src.rank().as_char())?;
                }
                if self.is_capture() {
                    write!(f, "x")?;
                }
                write!(f, "{}", self.dst)?;
            }
        }
        match self.status {
            GameStatus::Normal => {}
            GameStatus::Check => write!(f, "+")?,
            GameStatus::Checkmate => write!(f, "#")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{apply_move, MoveRequest};
    use crate::types::Piece;

    use std::str::FromStr;

    fn c(s: &str) -> Coord {
        Coord::from_str(s).unwrap()
    }

    fn san(b: &Board, req: &str) -> String {
        let (_, record) = apply_move(b, MoveRequest::from_str(req).unwrap()).unwrap();
        record.to_string()
    }

    #[test]
    fn test_pieces() {
        let b = Board::initial();
        assert_eq!(san(&b, "e2e4"), "e4");
        assert_eq!(san(&b, "b1c3"), "Nc3");
        assert_eq!(san(&b, "g8h6"), "Nh6");
    }

    #[test]
    fn test_disambiguation() {
        let mut b = Board::empty();
        b.put(c("h1"), Piece::new(Color::White, PieceKind::King));
        b.put(c("h8"), Piece::new(Color::Black, PieceKind::King));
        b.put(c("b1"), Piece::new(Color::White, PieceKind::Knight));
        b.put(c("f3"), Piece::new(Color::White, PieceKind::Knight));
        b.put(c("b3"), Piece::new(Color::White, PieceKind::Knight));
        b.put(c("a5"), Piece::new(Color::White, PieceKind::Rook));
        b.put(c("a1"), Piece::new(Color::White, PieceKind::Rook));
        b.put(c("d2"), Piece::new(Color::Black, PieceKind::Pawn));

        // Three knights reach d2, b1 and b3 share the file, b3 and f3 share the rank
        assert_eq!(san(&b, "f3d2"), "Nfxd2");
        assert_eq!(san(&b, "b1d2"), "N1xd2");
        assert_eq!(san(&b, "b3d2"), "Nb3xd2");
        // Only one knight reaches d4
        assert_eq!(san(&b, "f3d4"), "Nfd4");
        assert_eq!(san(&b, "b3d4"), "Nbd4");
        assert_eq!(san(&b, "f3g5"), "Ng5");
        // Rooks on the same file
        assert_eq!(san(&b, "a1a3"), "R1a3");
        assert_eq!(san(&b, "a5a2"), "R5a2");
        assert_eq!(san(&b, "a5e5"), "Re5");
    }

    #[test]
    fn test_pinned_rival() {
        // Pinned knight doesn't make the move ambiguous
        let mut b = Board::empty();
        b.put(c("e1"), Piece::new(Color::White, PieceKind::King));
        b.put(c("e2"), Piece::new(Color::White, PieceKind::Knight));
        b.put(c("e8"), Piece::new(Color::Black, PieceKind::Rook));
        b.put(c("a8"), Piece::new(Color::Black, PieceKind::King));
        b.put(c("b1"), Piece::new(Color::White, PieceKind::Knight));
        assert_eq!(san(&b, "b1c3"), "Nc3");
    }

    #[test]
    fn test_special() {
        let mut b = Board::empty();
        b.put(c("e1"), Piece::new(Color::White, PieceKind::King));
        b.put(c("h1"), Piece::new(Color::White, PieceKind::Rook));
        b.put(c("a1"), Piece::new(Color::White, PieceKind::Rook));
        b.put(c("f8"), Piece::new(Color::Black, PieceKind::King));
        b.put(c("b7"), Piece::new(Color::White, PieceKind::Pawn));
        b.put(c("c8"), Piece::new(Color::Black, PieceKind::Bishop));

        assert_eq!(san(&b, "e1g1"), "O-O+");
        assert_eq!(san(&b, "e1c1"), "O-O-O");
        assert_eq!(san(&b, "b7b8q"), "b8=Q");
        assert_eq!(san(&b, "b7c8q"), "bxc8=Q+");
        assert_eq!(san(&b, "b7c8n"), "bxc8=N");
    }

    #[test]
    fn test_flags() {
        let b = Board::initial();
        let (_, record) = apply_move(&b, MoveRequest::from_str("d2d4").unwrap()).unwrap();
        assert!(!record.is_capture());
        assert!(!record.is_castling());
        assert!(!record.is_enpassant());
        assert!(!record.is_promotion());
        assert_eq!(record.disambiguation, Disambiguation::default());
    }
}
