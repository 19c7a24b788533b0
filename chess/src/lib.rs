//! # Rookery
//!
//! Stateless rules engine for standard chess. The board is a plain value, and every
//! function takes the board it works on. Nothing is kept between calls, so the caller
//! decides whose turn it is and when the game ends.
//!
//! The engine answers the questions a chess user interface asks:
//!
//! - is the move from one square to another legal ([`is_move_valid()`])
//! - where can the piece on a square go ([`calculate_possible_moves()`])
//! - is the king in check or checkmated ([`is_check()`], [`is_checkmate()`], [`status()`])
//! - what is the board after the move ([`apply_move()`])
//!
//! Castling, en passant and promotion are handled by the same functions. For convenience,
//! [`Game`] keeps a board together with the side to move and the move history.
//!
//! # Example
//!
//! ```
//! # use rookery::{apply_move, movegen, validate, Board, Color, GameStatus, ValidateOptions};
//! #
//! let b = Board::initial();
//! assert!(validate::is_move_valid_label(&b, "e2", "e4", ValidateOptions::new()));
//! assert!(!validate::is_move_valid_label(&b, "e2", "e5", ValidateOptions::new()));
//!
//! let (b, record) = apply_move(&b, "e2e4".parse().unwrap()).unwrap();
//! assert_eq!(record.to_string(), "e4");
//! assert_eq!(movegen::status(&b, Color::Black), Ok(GameStatus::Normal));
//!
//! let e7 = "e7".parse().unwrap();
//! assert_eq!(movegen::calculate_possible_moves(&b, e7).popcount(), 2);
//! ```

pub use rookery_base::{bitboard, geometry, types};

pub mod between;
pub mod board;
pub mod chain;
pub mod movegen;
pub mod moves;
pub mod validate;

pub use bitboard::Bitboard;
pub use board::{Board, NoKingError, PrettyStyle, Snapshot, SnapshotError};
pub use chain::{Game, GameError, Outcome, WinReason};
pub use movegen::{
    calculate_possible_moves, has_legal_moves, is_cell_attacked, is_check, is_checkmate,
    status, GameStatus,
};
pub use moves::{apply_move, ApplyError, Move, MoveKind, MoveRecord, MoveRequest, PromoteKind};
pub use types::{CastlingSide, Color, Coord, File, Piece, PieceKind, Rank};
pub use validate::{is_move_valid, ValidateOptions};
