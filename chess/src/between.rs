//! Squares lying between two squares on a line

use crate::bitboard::Bitboard;
use crate::types::Coord;

/// Returns `true` if `src` and `dst` are distinct and share a file or a rank
#[inline]
pub fn is_rook_aligned(src: Coord, dst: Coord) -> bool {
    let (df, dr) = src.delta_to(dst);
    src != dst && (df == 0 || dr == 0)
}

/// Returns `true` if `src` and `dst` are distinct and lie on the same diagonal
#[inline]
pub fn is_bishop_aligned(src: Coord, dst: Coord) -> bool {
    let (df, dr) = src.delta_to(dst);
    src != dst && df.abs() == dr.abs()
}

/// Returns the unit step leading from `src` towards `dst`, if they are aligned
fn step(src: Coord, dst: Coord) -> Option<(i8, i8)> {
    if !is_rook_aligned(src, dst) && !is_bishop_aligned(src, dst) {
        return None;
    }
    let (df, dr) = src.delta_to(dst);
    Some((df.signum(), dr.signum()))
}

/// Returns the squares strictly between `src` and `dst`
///
/// The result is empty if the squares are adjacent, or if they are not on a common file,
/// rank or diagonal.
///
/// ```
/// # use rookery::{between, Coord, Bitboard};
/// let c = |s: &str| s.parse::<Coord>().unwrap();
/// let res: Bitboard = [c("c5"), c("d6")].into_iter().collect();
/// assert_eq!(between::strict(c("b4"), c("e7")), res);
/// assert_eq!(between::strict(c("b4"), c("c6")), Bitboard::EMPTY);
/// ```
pub fn strict(src: Coord, dst: Coord) -> Bitboard {
    let mut res = Bitboard::EMPTY;
    let Some((df, dr)) = step(src, dst) else {
        return res;
    };
    let mut cur = src;
    while let Some(next) = cur.offset(df, dr) {
        if next == dst {
            break;
        }
        res.set(next);
        cur = next;
    }
    res
}

/// Returns `true` if `src` and `dst` are aligned and no square of `occupied` lies between them
#[inline]
pub fn is_path_clear(src: Coord, dst: Coord, occupied: Bitboard) -> bool {
    step(src, dst).is_some() && (strict(src, dst) & occupied).is_empty()
}
