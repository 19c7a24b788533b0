//! Move validation
//!
//! The validator works in two stages. First, [`semi_validate()`] checks that the move follows
//! the rules of the moving piece: its shape, the obstacles on its path and the preconditions of
//! the special moves. Such moves are called _semilegal_. Then, unless disabled by
//! [`ValidateOptions::check_check`], the move is played on a scratch copy of the board to make
//! sure that it doesn't leave the mover's king under attack.

use crate::between;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::geometry;
use crate::movegen;
use crate::moves::{self, Move, MoveKind};
use crate::types::{CastlingSide, Color, Coord, File, Piece, PieceKind};

use std::str::FromStr;

/// Options for [`is_move_valid()`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ValidateOptions {
    /// Reject the moves which leave the mover's own king under attack
    ///
    /// Enabled by default. Disabling it turns [`is_move_valid()`] into a plain semilegality
    /// check.
    pub check_check: bool,
}

impl ValidateOptions {
    /// Returns the default options, with all the checks enabled
    pub const fn new() -> ValidateOptions {
        ValidateOptions { check_check: true }
    }

    /// Returns the options which skip the self-check test
    pub const fn semilegal() -> ValidateOptions {
        ValidateOptions { check_check: false }
    }
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
pub(crate) fn is_knight_shape(src: Coord, dst: Coord) -> bool {
    let (df, dr) = src.delta_to(dst);
    matches!((df.abs(), dr.abs()), (1, 2) | (2, 1))
}

#[inline]
pub(crate) fn is_king_shape(src: Coord, dst: Coord) -> bool {
    let (df, dr) = src.delta_to(dst);
    src != dst && df.abs() <= 1 && dr.abs() <= 1
}

#[inline]
pub(crate) fn is_pawn_capture_shape(color: Color, src: Coord, dst: Coord) -> bool {
    let (df, dr) = src.delta_to(dst);
    df.abs() == 1 && dr == geometry::pawn_direction(color)
}

fn is_slide(src: Coord, dst: Coord, kind: PieceKind, occupied: Bitboard) -> bool {
    if !kind.is_slider() {
        return false;
    }
    let aligned = match kind {
        PieceKind::Bishop => between::is_bishop_aligned(src, dst),
        PieceKind::Rook => between::is_rook_aligned(src, dst),
        _ => between::is_bishop_aligned(src, dst) || between::is_rook_aligned(src, dst),
    };
    aligned && between::is_path_clear(src, dst, occupied)
}

/// Returns `true` if `piece` standing on `src` attacks the square `dst`
///
/// Attacks follow the capture rules, so pawns attack diagonally regardless of what stands
/// on `dst`. Pawn pushes and castling never attack.
pub(crate) fn attacks(src: Coord, piece: Piece, dst: Coord, occupied: Bitboard) -> bool {
    match piece.kind {
        PieceKind::Pawn => is_pawn_capture_shape(piece.color, src, dst),
        PieceKind::Knight => is_knight_shape(src, dst),
        PieceKind::King => is_king_shape(src, dst),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            is_slide(src, dst, piece.kind, occupied)
        }
    }
}

fn pawn_move_kind(b: &Board, src: Coord, dst: Coord, color: Color) -> Option<MoveKind> {
    let dir = geometry::pawn_direction(color);
    let (df, dr) = src.delta_to(dst);
    let single = if dst.rank() == geometry::promote_rank(color) {
        MoveKind::Promote
    } else {
        MoveKind::PawnSimple
    };

    if df == 0 && dr == dir {
        return b.get(dst).is_none().then_some(single);
    }
    if df == 0 && dr == 2 * dir {
        let mid = src.offset(0, dir)?;
        let ok = src.rank() == geometry::pawn_start_rank(color)
            && b.get(mid).is_none()
            && b.get(dst).is_none();
        return ok.then_some(MoveKind::PawnDouble);
    }
    if df.abs() == 1 && dr == dir {
        // Own pieces on `dst` are already rejected by the caller
        if b.get(dst).is_some() {
            return Some(single);
        }
        let victim = Coord::from_parts(dst.file(), src.rank());
        let ok = src.rank() == geometry::enpassant_src_rank(color)
            && b.get(victim).map_or(false, |p| {
                p.is(color.inv(), PieceKind::Pawn) && p.just_double_moved
            });
        return ok.then_some(MoveKind::Enpassant);
    }
    None
}

/// Classifies the king move from `src` to `dst` as castling
///
/// The king must stand unmoved on its home square (e1 or e8). A king on another square of
/// the back rank never castles, even if it has not moved, which can only happen on a
/// hand-made board.
fn castling_kind(b: &Board, src: Coord, dst: Coord, king: Piece) -> Option<MoveKind> {
    let color = king.color;
    let rank = geometry::castling_rank(color);
    if king.has_moved || src != Coord::from_parts(File::E, rank) || dst.rank() != rank {
        return None;
    }
    let side = match dst.file() {
        File::G => CastlingSide::King,
        File::C => CastlingSide::Queen,
        _ => return None,
    };

    let rook_src = Coord::from_parts(side.rook_src_file(), rank);
    match b.get(rook_src) {
        Some(rook) if rook.is(color, PieceKind::Rook) && !rook.has_moved => {}
        _ => return None,
    }
    if (between::strict(src, rook_src) & b.occupied()).is_nonempty() {
        return None;
    }

    // The king may not leave, cross or enter an attacked square
    let transit = between::strict(src, dst).with(src).with(dst);
    if transit
        .into_iter()
        .any(|c| movegen::is_cell_attacked(b, c, color.inv()))
    {
        return None;
    }

    Some(MoveKind::from(side))
}

/// Checks that the move from `src` to `dst` is semilegal and classifies it
///
/// Returns `None` if the move breaks the rules of the moving piece. The returned move
/// may still leave the mover's king under attack, see [`leaves_king_attacked()`].
///
/// For promotions, the returned move has no promotion target set.
///
/// # Example
///
/// ```
/// # use rookery::{Board, Coord, MoveKind, validate};
/// #
/// let b = Board::initial();
/// let c = |s: &str| s.parse::<Coord>().unwrap();
/// let mv = validate::semi_validate(&b, c("e2"), c("e4")).unwrap();
/// assert_eq!(mv.kind(), MoveKind::PawnDouble);
/// assert_eq!(validate::semi_validate(&b, c("e2"), c("e5")), None);
/// assert_eq!(validate::semi_validate(&b, c("a1"), c("a3")), None);
/// ```
pub fn semi_validate(b: &Board, src: Coord, dst: Coord) -> Option<Move> {
    if src == dst {
        return None;
    }
    let piece = b.get(src)?;
    if b.get(dst).map_or(false, |p| p.color == piece.color) {
        return None;
    }

    let kind = match piece.kind {
        PieceKind::Pawn => pawn_move_kind(b, src, dst, piece.color)?,
        PieceKind::Knight => is_knight_shape(src, dst).then_some(MoveKind::Simple)?,
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            is_slide(src, dst, piece.kind, b.occupied()).then_some(MoveKind::Simple)?
        }
        PieceKind::King => {
            if is_king_shape(src, dst) {
                MoveKind::Simple
            } else {
                castling_kind(b, src, dst, piece)?
            }
        }
    };

    Some(Move::new(kind, src, dst))
}

/// Returns `true` if the semilegal move `mv` leaves the mover's king under attack
///
/// The move is played on a scratch copy of `b`, and `b` itself is not changed. If the mover
/// has no king on the board, there is nothing to leave under attack, so `false` is returned.
pub fn leaves_king_attacked(b: &Board, mv: Move) -> bool {
    let Some(piece) = b.get(mv.src()) else {
        return false;
    };
    let mut scratch = *b;
    moves::make_move_unchecked(&mut scratch, mv);
    match scratch.find_king(piece.color) {
        Ok(king) => movegen::is_cell_attacked(&scratch, king, piece.color.inv()),
        Err(_) => false,
    }
}

/// Returns `true` if the piece on `src` can move to `dst`
///
/// This is a pure predicate: it never fails and never changes the board. Moves from an empty
/// square and null moves are simply invalid.
///
/// # Example
///
/// ```
/// # use rookery::{Board, Coord, validate::{self, ValidateOptions}};
/// #
/// let b = Board::initial();
/// let c = |s: &str| s.parse::<Coord>().unwrap();
/// assert!(validate::is_move_valid(&b, c("g1"), c("f3"), ValidateOptions::default()));
/// assert!(!validate::is_move_valid(&b, c("f1"), c("c4"), ValidateOptions::default()));
/// assert!(!validate::is_move_valid(&b, c("e4"), c("e5"), ValidateOptions::default()));
/// ```
pub fn is_move_valid(b: &Board, src: Coord, dst: Coord, opts: ValidateOptions) -> bool {
    match semi_validate(b, src, dst) {
        Some(mv) => !opts.check_check || !leaves_king_attacked(b, mv),
        None => false,
    }
}

/// Same as [`is_move_valid()`], but takes square labels like `"e2"`
///
/// Malformed labels make the move invalid.
pub fn is_move_valid_label(b: &Board, src: &str, dst: &str, opts: ValidateOptions) -> bool {
    match (Coord::from_str(src), Coord::from_str(dst)) {
        (Ok(src), Ok(dst)) => is_move_valid(b, src, dst, opts),
        _ => false,
    }
}
