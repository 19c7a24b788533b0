//! Attack queries, check and checkmate detection, and move enumeration

use crate::bitboard::Bitboard;
use crate::board::{Board, NoKingError};
use crate::moves::Move;
use crate::types::{Color, Coord};
use crate::validate;

use std::ops::Deref;
use std::slice;

use arrayvec::ArrayVec;

/// Status of a side after a move, as seen by the side to move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    /// The king is not attacked
    #[default]
    Normal,
    /// The king is attacked, but the side has a move to escape
    Check,
    /// The king is attacked and there is no move to escape
    Checkmate,
}

/// Returns `true` if any piece of color `by` attacks the square `coord`
///
/// A piece standing on `coord` itself doesn't count. See [`cell_attackers()`] for the
/// definition of an attack.
pub fn is_cell_attacked(b: &Board, coord: Coord, by: Color) -> bool {
    let occupied = b.occupied();
    b.iter()
        .any(|(src, p)| p.color == by && validate::attacks(src, p, coord, occupied))
}

/// Returns the squares of all the pieces of color `by` which attack the square `coord`
///
/// A piece attacks a square if it could capture an enemy piece standing there. So, pawns
/// attack only diagonally, and castling never attacks.
pub fn cell_attackers(b: &Board, coord: Coord, by: Color) -> Bitboard {
    let occupied = b.occupied();
    b.iter()
        .filter(|&(src, p)| p.color == by && validate::attacks(src, p, coord, occupied))
        .map(|(src, _)| src)
        .collect()
}

/// Returns `true` if the king of color `color` is under attack
pub fn is_check(b: &Board, color: Color) -> Result<bool, NoKingError> {
    let king = b.find_king(color)?;
    Ok(is_cell_attacked(b, king, color.inv()))
}

/// Returns the squares of the pieces which attack the king of color `color`
pub fn checkers(b: &Board, color: Color) -> Result<Bitboard, NoKingError> {
    let king = b.find_king(color)?;
    Ok(cell_attackers(b, king, color.inv()))
}

/// List of moves made by a single piece
///
/// All the moves in the list start from the same square, so there cannot be more than 63
/// of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveList(ArrayVec<Move, 64>);

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }

    /// Returns the destination squares of all the moves
    pub fn destinations(&self) -> Bitboard {
        self.iter().map(Move::dst).collect()
    }
}

impl Deref for MoveList {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = arrayvec::IntoIter<Move, 64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Returns the semilegal moves of the piece standing on `src`
///
/// Returns an empty list if `src` is empty.
pub fn semilegal_moves_from(b: &Board, src: Coord) -> MoveList {
    let mut res = MoveList::new();
    if b.get(src).is_none() {
        return res;
    }
    for dst in Coord::iter() {
        if let Some(mv) = validate::semi_validate(b, src, dst) {
            res.0.push(mv);
        }
    }
    res
}

/// Returns the legal moves of the piece standing on `src`
///
/// Each candidate returned by [`semilegal_moves_from()`] is played once on a scratch board to
/// reject the moves which leave the king under attack. Promotions are listed once, without
/// the promotion target.
pub fn legal_moves_from(b: &Board, src: Coord) -> MoveList {
    let mut res = semilegal_moves_from(b, src);
    res.0.retain(|mv| !validate::leaves_king_attacked(b, *mv));
    res
}

/// Returns all the legal moves of the pieces with color `color`
pub fn legal_moves(b: &Board, color: Color) -> Vec<Move> {
    b.color(color)
        .into_iter()
        .flat_map(|src| legal_moves_from(b, src))
        .collect()
}

/// Returns all the squares to which the piece on `src` can legally move
///
/// The result is recomputed on every call. It is empty if `src` is empty.
///
/// # Example
///
/// ```
/// # use rookery::{Board, Coord, movegen};
/// #
/// let b = Board::initial();
/// let c = |s: &str| s.parse::<Coord>().unwrap();
/// let moves = movegen::calculate_possible_moves(&b, c("g1"));
/// assert_eq!(moves.into_iter().collect::<Vec<_>>(), vec![c("f3"), c("h3")]);
/// assert!(movegen::calculate_possible_moves(&b, c("e4")).is_empty());
/// ```
pub fn calculate_possible_moves(b: &Board, src: Coord) -> Bitboard {
    legal_moves_from(b, src).destinations()
}

/// Returns `true` if the side with color `color` has at least one legal move
///
/// Unlike [`is_checkmate()`], doesn't require the king to be present or attacked, so it can
/// also be used to detect stalemate.
pub fn has_legal_moves(b: &Board, color: Color) -> bool {
    b.color(color).into_iter().any(|src| {
        Coord::iter().any(|dst| {
            validate::semi_validate(b, src, dst)
                .map_or(false, |mv| !validate::leaves_king_attacked(b, mv))
        })
    })
}

/// Returns `true` if the king of color `color` is checkmated
///
/// The king must be under attack, and every semilegal move of its side must leave it under
/// attack.
pub fn is_checkmate(b: &Board, color: Color) -> Result<bool, NoKingError> {
    if !is_check(b, color)? {
        return Ok(false);
    }
    Ok(!has_legal_moves(b, color))
}

/// Returns the status of the side with color `color`
///
/// # Example
///
/// ```
/// # use rookery::{Board, Color, GameStatus, movegen};
/// #
/// let b = Board::initial();
/// assert_eq!(movegen::status(&b, Color::White), Ok(GameStatus::Normal));
/// assert!(movegen::status(&Board::empty(), Color::Black).is_err());
/// ```
pub fn status(b: &Board, color: Color) -> Result<GameStatus, NoKingError> {
    if !is_check(b, color)? {
        return Ok(GameStatus::Normal);
    }
    if has_legal_moves(b, color) {
        Ok(GameStatus::Check)
    } else {
        Ok(GameStatus::Checkmate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{apply_move, MoveKind, MoveRequest};
    use crate::types::{Piece, PieceKind};

    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use std::str::FromStr;

    use Color::{Black, White};
    use PieceKind::{Bishop, King, Knight, Pawn, Queen, Rook};

    fn c(s: &str) -> Coord {
        Coord::from_str(s).unwrap()
    }

    fn board(pieces: &[(&str, Color, PieceKind)]) -> Board {
        let mut b = Board::empty();
        for &(sq, color, kind) in pieces {
            b.put(c(sq), Piece::new(color, kind).moved());
        }
        b
    }

    fn coords(list: &[&str]) -> Bitboard {
        list.iter().map(|s| c(s)).collect()
    }

    #[test]
    fn test_initial() {
        let b = Board::initial();
        for color in [White, Black] {
            assert_eq!(is_check(&b, color), Ok(false));
            assert_eq!(is_checkmate(&b, color), Ok(false));
            assert_eq!(status(&b, color), Ok(GameStatus::Normal));
            assert_eq!(legal_moves(&b, color).len(), 20);
            assert!(has_legal_moves(&b, color));
        }
        assert_eq!(calculate_possible_moves(&b, c("e2")), coords(&["e3", "e4"]));
        assert_eq!(calculate_possible_moves(&b, c("b8")), coords(&["a6", "c6"]));
        assert!(calculate_possible_moves(&b, c("a1")).is_empty());
        assert!(calculate_possible_moves(&b, c("d5")).is_empty());
    }

    #[test]
    fn test_attacks() {
        let b = board(&[
            ("e1", White, King),
            ("e8", Black, King),
            ("d4", White, Pawn),
            ("c6", Black, Knight),
            ("a1", White, Rook),
            ("h8", Black, Bishop),
        ]);
        assert!(is_cell_attacked(&b, c("e5"), White));
        assert!(is_cell_attacked(&b, c("c5"), White));
        assert!(!is_cell_attacked(&b, c("d5"), White));
        assert!(is_cell_attacked(&b, c("d4"), Black));
        assert_eq!(cell_attackers(&b, c("d4"), Black), coords(&["c6", "h8"]));
        assert_eq!(cell_attackers(&b, c("a8"), White), coords(&["a1"]));
        assert_eq!(cell_attackers(&b, c("a2"), Black), Bitboard::EMPTY);
        assert_eq!(cell_attackers(&b, c("e2"), White), coords(&["e1"]));
    }

    #[test]
    fn test_check() {
        let b = board(&[
            ("e1", White, King),
            ("e8", Black, King),
            ("b4", Black, Bishop),
            ("e5", Black, Rook),
            ("e2", White, Knight),
        ]);
        assert_eq!(is_check(&b, White), Ok(true));
        assert_eq!(checkers(&b, White), Ok(coords(&["b4"])));
        assert_eq!(is_check(&b, Black), Ok(false));
        assert_eq!(status(&b, White), Ok(GameStatus::Check));
        // The knight is pinned by the rook
        assert!(calculate_possible_moves(&b, c("e2")).is_empty());
        assert_eq!(
            calculate_possible_moves(&b, c("e1")),
            coords(&["d1", "f1", "f2"])
        );
    }

    #[test]
    fn test_back_rank_mate() {
        let mut b = board(&[("a1", White, King), ("a8", White, Queen)]);
        b.put(c("h8"), Piece::new(Black, King));
        b.put(c("g7"), Piece::new(Black, Pawn));
        b.put(c("h7"), Piece::new(Black, Pawn));
        assert_eq!(is_check(&b, Black), Ok(true));
        assert_eq!(is_checkmate(&b, Black), Ok(true));
        assert_eq!(status(&b, Black), Ok(GameStatus::Checkmate));
        assert!(!has_legal_moves(&b, Black));
        assert!(legal_moves(&b, Black).is_empty());

        // A rook can interpose on c8
        let mut saved = b;
        saved.put(c("c2"), Piece::new(Black, Rook));
        assert_eq!(is_checkmate(&saved, Black), Ok(false));
        // Without the g7 pawn, the king escapes
        let mut escape = b;
        escape.take(c("g7"));
        assert_eq!(is_checkmate(&escape, Black), Ok(false));
        assert_eq!(status(&escape, Black), Ok(GameStatus::Check));
    }

    #[test]
    fn test_interposition() {
        let b = board(&[
            ("a1", White, King),
            ("e1", White, Rook),
            ("e8", Black, King),
            ("d8", Black, Queen),
            ("f8", Black, Bishop),
            ("d7", Black, Pawn),
            ("f7", Black, Pawn),
            ("c6", Black, Knight),
        ]);
        assert_eq!(is_check(&b, Black), Ok(true));
        assert_eq!(is_checkmate(&b, Black), Ok(false));
        assert!(legal_moves(&b, Black)
            .iter()
            .all(|mv| mv.dst() == c("e7") || mv.dst() == c("e5")));
    }

    #[test]
    fn test_stalemate() {
        let b = board(&[("h8", Black, King), ("f7", White, Queen), ("a1", White, King)]);
        assert_eq!(is_check(&b, Black), Ok(false));
        assert!(!has_legal_moves(&b, Black));
        assert_eq!(is_checkmate(&b, Black), Ok(false));
        assert_eq!(status(&b, Black), Ok(GameStatus::Normal));
    }

    #[test]
    fn test_missing_king() {
        let b = board(&[("a1", White, King), ("a8", Black, Rook)]);
        assert_eq!(is_check(&b, Black), Err(NoKingError(Black)));
        assert_eq!(is_checkmate(&b, Black), Err(NoKingError(Black)));
        assert_eq!(status(&b, Black), Err(NoKingError(Black)));
        assert_eq!(checkers(&b, Black), Err(NoKingError(Black)));
        assert!(has_legal_moves(&b, Black));
    }

    #[test]
    fn test_promotion_moves() {
        let b = board(&[
            ("a1", White, King),
            ("h8", Black, King),
            ("e7", White, Pawn),
            ("d8", Black, Rook),
        ]);
        assert_eq!(
            calculate_possible_moves(&b, c("e7")),
            coords(&["e8", "d8"])
        );
        let moves = legal_moves_from(&b, c("e7"));
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|mv| mv.kind() == MoveKind::Promote));
    }

    #[test]
    fn test_castling_moves() {
        let mut b = Board::initial();
        for sq in ["f1", "g1", "b1", "c1", "d1"] {
            b.take(c(sq));
        }
        let moves = legal_moves_from(&b, c("e1"));
        let kinds: Vec<_> = moves.iter().map(|mv| mv.kind()).collect();
        assert!(kinds.contains(&MoveKind::CastlingKingside));
        assert!(kinds.contains(&MoveKind::CastlingQueenside));
        assert_eq!(
            calculate_possible_moves(&b, c("e1")),
            coords(&["c1", "d1", "f1", "g1"])
        );
    }

    #[test]
    fn test_random_playouts() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            let mut b = Board::initial();
            let mut side = White;
            for _ in 0..80 {
                let moves = legal_moves(&b, side);
                let Some(&mv) = moves.choose(&mut rng) else {
                    break;
                };
                let req = MoveRequest {
                    src: mv.src(),
                    dst: mv.dst(),
                    promote: (mv.kind() == MoveKind::Promote)
                        .then_some(crate::moves::PromoteKind::Queen),
                };
                assert!(calculate_possible_moves(&b, mv.src()).has(mv.dst()));
                let (next, record) = apply_move(&b, req).unwrap();
                assert_eq!(is_check(&next, side), Ok(false));
                assert_eq!(record.status, status(&next, side.inv()).unwrap());
                assert!(next.find_king(side.inv()).is_ok());
                b = next;
                side = side.inv();
            }
        }
    }
}
