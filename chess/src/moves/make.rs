use super::base::{Move, MoveKind, PromoteKind};
use super::record::{Disambiguation, MoveRecord};
use super::request::MoveRequest;
use crate::board::{Board, NoKingError};
use crate::movegen::{self, GameStatus};
use crate::types::{CastlingSide, Coord, Piece};
use crate::validate;

use log::{debug, trace};
use thiserror::Error;

/// Error applying a [`MoveRequest`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ApplyError {
    /// Move is not legal
    #[error("move is not legal")]
    Illegal,
    /// Move is legal, but promotes a pawn and the promotion choice is missing
    #[error("promotion choice required")]
    PromotionRequired,
    /// Promotion choice is given for a move which doesn't promote
    #[error("move is not a promotion")]
    UnexpectedPromotion,
    /// Moving side has no king
    #[error(transparent)]
    NoKing(#[from] NoKingError),
}

/// Makes the move `mv` on the board `b` and returns the captured piece
///
/// The move is not validated. It is expected to be produced by
/// [`validate::semi_validate()`] on the same board.
pub(crate) fn make_move_unchecked(b: &mut Board, mv: Move) -> Option<Piece> {
    let mut piece = b.take(mv.src)?;
    b.clear_double_moves();

    let captured = match mv.enpassant_victim() {
        Some(victim) => b.take(victim),
        None => b.take(mv.dst),
    };

    piece.has_moved = true;
    piece.just_double_moved = mv.kind == MoveKind::PawnDouble;
    if mv.kind == MoveKind::Promote {
        piece.kind = mv.promote.unwrap_or(PromoteKind::Queen).into();
    }
    b.put(mv.dst, piece);

    if let Ok(side) = CastlingSide::try_from(mv.kind) {
        let rank = mv.src.rank();
        if let Some(rook) = b.take(Coord::from_parts(side.rook_src_file(), rank)) {
            b.put(Coord::from_parts(side.rook_dst_file(), rank), rook.moved());
        }
    }

    captured
}

fn do_apply_move(b: &Board, req: MoveRequest) -> Result<(Board, MoveRecord), ApplyError> {
    let piece = b.get(req.src).ok_or(ApplyError::Illegal)?;
    b.find_king(piece.color)?;

    let mut mv = validate::semi_validate(b, req.src, req.dst).ok_or(ApplyError::Illegal)?;
    if validate::leaves_king_attacked(b, mv) {
        return Err(ApplyError::Illegal);
    }
    match (mv.kind, req.promote) {
        (MoveKind::Promote, None) => return Err(ApplyError::PromotionRequired),
        (MoveKind::Promote, Some(p)) => mv.promote = Some(p),
        (_, Some(_)) => return Err(ApplyError::UnexpectedPromotion),
        (_, None) => {}
    }

    let disambiguation = Disambiguation::detect(b, mv);
    let mut next = *b;
    let captured = make_move_unchecked(&mut next, mv);
    // The opponent's king may be absent on a hand-made board
    let status = movegen::status(&next, piece.color.inv()).unwrap_or(GameStatus::Normal);

    let record = MoveRecord {
        src: mv.src,
        dst: mv.dst,
        piece: piece.kind,
        color: piece.color,
        captured: captured.map(|p| p.kind),
        kind: mv.kind,
        promote: mv.promote,
        disambiguation,
        status,
    };
    Ok((next, record))
}

/// Applies the move request `req` to the board `b`
///
/// Returns the board after the move together with the record describing the move. The
/// original board is not changed.
///
/// Apart from moving the piece, this also handles the special moves: the rook is moved
/// when castling, the pawn is removed after en passant, and the pawn is replaced with the
/// chosen piece on promotion. The en passant flag is cleared on all the pawns except the
/// one which has just made a double move.
///
/// # Errors
///
/// - [`ApplyError::Illegal`] if the move is not valid (see
///   [`is_move_valid()`](crate::validate::is_move_valid))
/// - [`ApplyError::PromotionRequired`] if a pawn reaches the last rank and `req.promote`
///   is `None`
/// - [`ApplyError::UnexpectedPromotion`] if `req.promote` is set for a non-promoting move
/// - [`ApplyError::NoKing`] if the moving side has no king on the board
///
/// # Example
///
/// ```
/// # use rookery::{apply_move, Board, MoveRequest, PieceKind};
/// #
/// let b = Board::initial();
/// let (b, record) = apply_move(&b, "g1f3".parse().unwrap()).unwrap();
/// assert_eq!(record.piece, PieceKind::Knight);
/// assert_eq!(record.to_string(), "Nf3");
/// assert_eq!(b.get_label("f3").map(|p| p.kind), Some(PieceKind::Knight));
/// assert_eq!(b.get_label("g1"), None);
/// ```
pub fn apply_move(b: &Board, req: MoveRequest) -> Result<(Board, MoveRecord), ApplyError> {
    let res = do_apply_move(b, req);
    match &res {
        Ok((_, record)) => trace!("applied move {} ({})", req, record),
        Err(e) => debug!("rejected move {}: {}", req, e),
    }
    res
}
