//! Color-dependent board geometry

use crate::types::{Color, Rank};

/// Back rank on which the king and rooks start
pub const fn castling_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    }
}

/// Rank from which a pawn may advance two squares
pub const fn pawn_start_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
    }
}

/// Rank on which a pawn is promoted
pub const fn promote_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R8,
        Color::Black => Rank::R1,
    }
}

/// Rank on which a pawn must stand to capture en passant
pub const fn enpassant_src_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R5,
        Color::Black => Rank::R4,
    }
}

pub const fn enpassant_dst_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R6,
        Color::Black => Rank::R3,
    }
}

/// Rank delta of a single pawn step, positive towards the 8th rank
pub const fn pawn_direction(c: Color) -> i8 {
    match c {
        Color::White => 1,
        Color::Black => -1,
    }
}
