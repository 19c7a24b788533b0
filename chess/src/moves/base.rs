use crate::types::{CastlingSide, Coord, PieceKind};

use std::fmt;

/// Move kind
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MoveKind {
    /// Non-pawn move or capture (except castling)
    Simple = 0,
    /// Kingside castling
    CastlingKingside = 1,
    /// Queenside castling
    CastlingQueenside = 2,
    /// Single pawn move (either non-capture or capture) which doesn't promote
    PawnSimple = 3,
    /// Double pawn move
    PawnDouble = 4,
    /// En passant capture
    Enpassant = 5,
    /// Pawn move to the last rank (either non-capture or capture)
    Promote = 6,
}

impl MoveKind {
    /// Returns `true` if this is a pawn move of any kind
    #[inline]
    pub const fn is_pawn(self) -> bool {
        matches!(
            self,
            Self::PawnSimple | Self::PawnDouble | Self::Enpassant | Self::Promote
        )
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, Self::CastlingKingside | Self::CastlingQueenside)
    }
}

impl From<CastlingSide> for MoveKind {
    #[inline]
    fn from(side: CastlingSide) -> Self {
        match side {
            CastlingSide::King => Self::CastlingKingside,
            CastlingSide::Queen => Self::CastlingQueenside,
        }
    }
}

impl TryFrom<MoveKind> for CastlingSide {
    type Error = ();

    #[inline]
    fn try_from(kind: MoveKind) -> Result<Self, Self::Error> {
        match kind {
            MoveKind::CastlingKingside => Ok(Self::King),
            MoveKind::CastlingQueenside => Ok(Self::Queen),
            _ => Err(()),
        }
    }
}

/// Target piece for promotion
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PromoteKind {
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
}

impl PromoteKind {
    /// Promotion choices, in the order they are usually offered to the player
    pub const ALL: [PromoteKind; 4] = [
        PromoteKind::Queen,
        PromoteKind::Knight,
        PromoteKind::Bishop,
        PromoteKind::Rook,
    ];

    /// Returns the lowercase letter used for this piece in coordinate notation
    pub fn as_char(self) -> char {
        match self {
            PromoteKind::Knight => 'n',
            PromoteKind::Bishop => 'b',
            PromoteKind::Rook => 'r',
            PromoteKind::Queen => 'q',
        }
    }

    /// Parses a promotion letter, either lowercase or uppercase
    pub fn from_char(c: char) -> Option<Self> {
        PieceKind::from_char(c)?.try_into().ok()
    }
}

impl From<PromoteKind> for PieceKind {
    #[inline]
    fn from(p: PromoteKind) -> Self {
        match p {
            PromoteKind::Knight => PieceKind::Knight,
            PromoteKind::Bishop => PieceKind::Bishop,
            PromoteKind::Rook => PieceKind::Rook,
            PromoteKind::Queen => PieceKind::Queen,
        }
    }
}

impl TryFrom<PieceKind> for PromoteKind {
    type Error = ();

    #[inline]
    fn try_from(p: PieceKind) -> Result<Self, Self::Error> {
        match p {
            PieceKind::Knight => Ok(PromoteKind::Knight),
            PieceKind::Bishop => Ok(PromoteKind::Bishop),
            PieceKind::Rook => Ok(PromoteKind::Rook),
            PieceKind::Queen => Ok(PromoteKind::Queen),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PromoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        fmt::Display::fmt(&PieceKind::from(*self), f)
    }
}

/// Classified chess move
///
/// Unlike [`MoveRequest`](super::MoveRequest), which is just a pair of squares supplied by the
/// caller, a `Move` knows which rule it follows. Moves are produced by the validator (see
/// [`validate::semi_validate()`](crate::validate::semi_validate)), so a `Move` obtained from
/// this crate is always shaped correctly for the board it was produced from.
///
/// For [`MoveKind::Promote`], the promotion target may be left unset while the move is only
/// being examined. In this case, the pawn is assumed to become a queen.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub(crate) kind: MoveKind,
    pub(crate) src: Coord,
    pub(crate) dst: Coord,
    pub(crate) promote: Option<PromoteKind>,
}

impl Move {
    pub(crate) const fn new(kind: MoveKind, src: Coord, dst: Coord) -> Move {
        Move {
            kind,
            src,
            dst,
            promote: None,
        }
    }

    /// Returns the move kind
    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Returns the move source square
    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    /// Returns the move destination square
    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }

    /// Returns the promotion target
    ///
    /// Always `None` for non-promoting moves.
    #[inline]
    pub const fn promote(&self) -> Option<PromoteKind> {
        self.promote
    }

    /// Returns the same move with the promotion target set to `promote`
    ///
    /// Returns `None` if this move is not a promotion.
    #[inline]
    pub fn with_promote(self, promote: PromoteKind) -> Option<Move> {
        if self.kind != MoveKind::Promote {
            return None;
        }
        Some(Move {
            promote: Some(promote),
            ..self
        })
    }

    /// Returns the square of the pawn captured en passant
    ///
    /// Returns `None` if this move is not an en passant capture.
    #[inline]
    pub fn enpassant_victim(&self) -> Option<Coord> {
        if self.kind != MoveKind::Enpassant {
            return None;
        }
        Some(Coord::from_parts(self.dst.file(), self.src.rank()))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)?;
        if let Some(p) = self.promote {
            write!(f, "{}", p.as_char())?;
        }
        Ok(())
    }
}
