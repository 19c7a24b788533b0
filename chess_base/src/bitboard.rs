use crate::types::{Coord, File, Rank};
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::fmt;
use std::iter::{FromIterator, IntoIterator};

/// Set of squares on the board
///
/// Bit `i` corresponds to the square with [`Coord::index()`] equal to `i`, so iteration goes
/// from a8 to h1.
#[derive(
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct Bitboard(u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const FULL: Bitboard = Bitboard(u64::MAX);

    pub const fn from_coord(coord: Coord) -> Bitboard {
        Bitboard(1_u64 << coord.index())
    }

    /// Returns all the squares of the given rank
    pub const fn from_rank(rank: Rank) -> Bitboard {
        Bitboard(0xff_u64 << (rank.index() * 8))
    }

    /// Returns all the squares of the given file
    pub const fn from_file(file: File) -> Bitboard {
        Bitboard(0x0101_0101_0101_0101_u64 << file.index())
    }

    pub const fn with(self, coord: Coord) -> Bitboard {
        Bitboard(self.0 | (1_u64 << coord.index()))
    }

    pub const fn without(self, coord: Coord) -> Bitboard {
        Bitboard(self.0 & !(1_u64 << coord.index()))
    }

    pub fn set(&mut self, coord: Coord) {
        *self = self.with(coord);
    }

    pub fn unset(&mut self, coord: Coord) {
        *self = self.without(coord);
    }

    pub const fn has(&self, coord: Coord) -> bool {
        ((self.0 >> coord.index()) & 1) != 0
    }

    pub const fn popcount(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }

    /// Returns the only square in the set, or `None` if the set does not hold exactly one square
    pub fn single(&self) -> Option<Coord> {
        if self.popcount() != 1 {
            return None;
        }
        self.into_iter().next()
    }
}

impl From<Bitboard> for u64 {
    fn from(b: Bitboard) -> u64 {
        b.0
    }
}

impl From<u64> for Bitboard {
    fn from(u: u64) -> Bitboard {
        Bitboard(u)
    }
}

impl From<Coord> for Bitboard {
    fn from(c: Coord) -> Bitboard {
        Bitboard::from_coord(c)
    }
}

impl FromIterator<Coord> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Bitboard {
        iter.into_iter().fold(Bitboard::EMPTY, Bitboard::with)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_set().entries(self.into_iter()).finish()
    }
}

/// Formats the set as eight ranks from the 8th down to the 1st, separated with `/`
///
/// Occupied squares are shown as `x`, empty ones as `.`.
impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            if rank != Rank::R8 {
                write!(f, "/")?;
            }
            for file in File::iter() {
                let ch = if self.has(Coord::from_parts(file, rank)) {
                    'x'
                } else {
                    '.'
                };
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}

pub struct Iter(u64);

impl Iterator for Iter {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros();
        self.0 &= self.0.wrapping_sub(1_u64);
        unsafe { Some(Coord::from_index_unchecked(bit as usize)) }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter {}

impl IntoIterator for Bitboard {
    type Item = Coord;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        Iter(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter() {
        let bb = Bitboard::EMPTY
            .with(Coord::from_parts(File::A, Rank::R4))
            .with(Coord::from_parts(File::E, Rank::R2))
            .with(Coord::from_parts(File::F, Rank::R3));
        assert_eq!(bb.into_iter().len(), 3);
        assert_eq!(
            bb.into_iter().collect::<Vec<_>>(),
            vec![
                Coord::from_parts(File::A, Rank::R4),
                Coord::from_parts(File::F, Rank::R3),
                Coord::from_parts(File::E, Rank::R2)
            ],
        );
        assert_eq!(bb.into_iter().collect::<Bitboard>(), bb);
    }

    #[test]
    fn test_bitops() {
        let ca = Coord::from_parts(File::A, Rank::R4);
        let cb = Coord::from_parts(File::E, Rank::R2);
        let cc = Coord::from_parts(File::F, Rank::R3);

        let bb1 = Bitboard::EMPTY.with(ca).with(cb);
        let bb2 = Bitboard::EMPTY.with(cb).with(cc);
        assert_eq!(bb1 & bb2, Bitboard::from_coord(cb));
        assert_eq!(bb1 | bb2, Bitboard::EMPTY.with(ca).with(cb).with(cc));
        assert_eq!(bb1 ^ bb2, Bitboard::EMPTY.with(ca).with(cc));

        assert_eq!((!bb1).into_iter().count(), 62);
        assert_eq!((!bb1).popcount(), 62);
        assert_eq!((bb1 & bb2).single(), Some(cb));
        assert_eq!(bb1.single(), None);
    }

    #[test]
    fn test_lines() {
        let rank = Bitboard::from_rank(Rank::R2);
        let file = Bitboard::from_file(File::E);
        assert_eq!(rank.popcount(), 8);
        assert_eq!(file.popcount(), 8);
        assert!(rank.into_iter().all(|c| c.rank() == Rank::R2));
        assert!(file.into_iter().all(|c| c.file() == File::E));
        assert_eq!(
            (rank & file).single(),
            Some(Coord::from_parts(File::E, Rank::R2))
        );
    }

    #[test]
    fn test_format() {
        let bb = Bitboard::EMPTY
            .with(Coord::from_parts(File::A, Rank::R4))
            .with(Coord::from_parts(File::E, Rank::R2))
            .with(Coord::from_parts(File::F, Rank::R3))
            .with(Coord::from_parts(File::H, Rank::R8));
        assert_eq!(
            bb.to_string(),
            ".......x/......../......../......../x......./.....x../....x.../........"
        );
    }
}
