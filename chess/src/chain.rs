//! Game helper on top of the stateless engine
//!
//! The engine functions never keep a board between calls. [`Game`] is what a user
//! interface would build on top of them: it owns the current board, the side to move and
//! the history of applied moves, and decides when the game is over.

use crate::board::{Board, NoKingError};
use crate::movegen::{self, GameStatus};
use crate::moves::{self, ApplyError, MoveRecord, MoveRequest, RequestParseError};
use crate::types::Color;

use std::fmt;
use std::str::FromStr;

use log::debug;
use thiserror::Error;

/// Reason why the game is won
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WinReason {
    /// Opponent is checkmated
    Checkmate,
    /// Opponent ran out of time
    TimeForfeit,
    /// Opponent resigned
    Resign,
}

impl fmt::Display for WinReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let s = match self {
            WinReason::Checkmate => "checkmate",
            WinReason::TimeForfeit => "time forfeit",
            WinReason::Resign => "resignation",
        };
        write!(f, "{}", s)
    }
}

/// Result of a finished game
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    pub winner: Color,
    pub reason: WinReason,
}

impl Outcome {
    #[inline]
    pub const fn new(winner: Color, reason: WinReason) -> Outcome {
        Outcome { winner, reason }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} wins by {}", self.winner, self.reason)
    }
}

/// Error pushing a move into the [`Game`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum GameError {
    /// The game is already over
    #[error("game is finished")]
    Finished,
    /// The piece on the source square doesn't belong to the side to move
    #[error("cannot move {0} piece, it's not its turn")]
    WrongSide(Color),
    /// The move cannot be parsed
    #[error("cannot parse move: {0}")]
    Parse(#[from] RequestParseError),
    /// The move cannot be applied
    #[error(transparent)]
    Apply(#[from] ApplyError),
}

/// Error pushing a list of moves into the [`Game`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
#[error("cannot apply move #{}: {}", .pos + 1, .source)]
pub struct ListError {
    /// Zero-based position of the bad move in the list
    pub pos: usize,
    pub source: GameError,
}

/// Chess game with the history of moves
///
/// # Example
///
/// ```
/// # use rookery::{Color, Game, Outcome, WinReason};
/// #
/// let mut game = Game::new_initial();
/// game.push_list("f2f3 e7e5 g2g4 d8h4").unwrap();
/// assert_eq!(game.outcome(), Some(Outcome::new(Color::Black, WinReason::Checkmate)));
/// assert_eq!(game.notation().to_string(), "1. f3 e5 2. g4 Qh4#");
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Game {
    board: Board,
    side: Color,
    start_side: Color,
    stack: Vec<(Board, MoveRecord)>,
    outcome: Option<Outcome>,
}

impl Game {
    /// Creates a game from an arbitrary position with `side` to move
    pub fn from_board(board: Board, side: Color) -> Game {
        Game {
            board,
            side,
            start_side: side,
            stack: Vec::new(),
            outcome: None,
        }
    }

    /// Creates a game from the initial position
    pub fn new_initial() -> Game {
        Game::from_board(Board::initial(), Color::White)
    }

    /// Current board
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Iterates over the applied moves, from the first one
    pub fn history(&self) -> impl ExactSizeIterator<Item = &MoveRecord> + '_ {
        self.stack.iter().map(|(_, record)| record)
    }

    /// Returns the last applied move
    pub fn last(&self) -> Option<&MoveRecord> {
        self.stack.last().map(|(_, record)| record)
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Finishes the game with the given outcome
    ///
    /// This is used for the outcomes the board cannot detect, like resignation or time
    /// forfeit reported by an external clock.
    pub fn set_outcome(&mut self, outcome: Outcome) -> Result<(), GameError> {
        if self.is_finished() {
            return Err(GameError::Finished);
        }
        debug!("game finished: {}", outcome);
        self.outcome = Some(outcome);
        Ok(())
    }

    pub fn clear_outcome(&mut self) {
        self.outcome = None;
    }

    /// Status of the side to move
    pub fn status(&self) -> Result<GameStatus, NoKingError> {
        movegen::status(&self.board, self.side)
    }

    /// Applies the move for the side to move
    ///
    /// If the move checkmates the opponent, the game is finished automatically.
    pub fn push(&mut self, req: MoveRequest) -> Result<MoveRecord, GameError> {
        if self.is_finished() {
            return Err(GameError::Finished);
        }
        if let Some(piece) = self.board.get(req.src) {
            if piece.color != self.side {
                return Err(GameError::WrongSide(piece.color));
            }
        }

        let (next, record) = moves::apply_move(&self.board, req)?;
        self.stack.push((self.board, record));
        self.board = next;
        self.side = self.side.inv();

        if record.status == GameStatus::Checkmate {
            let outcome = Outcome::new(record.color, WinReason::Checkmate);
            debug!("game finished after {}: {}", record, outcome);
            self.outcome = Some(outcome);
        }
        Ok(record)
    }

    /// Parses the move in coordinate notation and applies it
    pub fn push_str(&mut self, s: &str) -> Result<MoveRecord, GameError> {
        self.push(MoveRequest::from_str(s)?)
    }

    /// Applies the whitespace-separated list of moves in coordinate notation
    ///
    /// On error, the moves before the bad one remain applied.
    pub fn push_list(&mut self, list: &str) -> Result<(), ListError> {
        for (pos, token) in list.split_ascii_whitespace().enumerate() {
            self.push_str(token)
                .map_err(|source| ListError { pos, source })?;
        }
        Ok(())
    }

    /// Undoes the last move
    ///
    /// The outcome is cleared, as the game continues from the previous position.
    pub fn pop(&mut self) -> Option<MoveRecord> {
        let (board, record) = self.stack.pop()?;
        self.board = board;
        self.side = record.color;
        self.outcome = None;
        Some(record)
    }

    /// Returns the numbered move listing, like `1. e4 e5 2. Nf3`
    pub fn notation(&self) -> Notation<'_> {
        Notation(self)
    }

    /// Returns the moves in coordinate notation, like `e2e4 e7e5 g1f3`
    pub fn coord_list(&self) -> CoordList<'_> {
        CoordList(self)
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new_initial()
    }
}

pub struct Notation<'a>(&'a Game);

impl<'a> fmt::Display for Notation<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let offset = match self.0.start_side {
            Color::White => 0,
            Color::Black => 1,
        };
        for (i, record) in self.0.history().enumerate() {
            let num = (i + offset) / 2 + 1;
            if i != 0 {
                write!(f, " ")?;
            }
            match record.color {
                Color::White => write!(f, "{}. ", num)?,
                Color::Black if i == 0 => write!(f, "{}... ", num)?,
                Color::Black => {}
            }
            write!(f, "{}", record)?;
        }
        Ok(())
    }
}

pub struct CoordList<'a>(&'a Game);

impl<'a> fmt::Display for CoordList<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, record) in self.0.history().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            let req = MoveRequest {
                src: record.src,
                dst: record.dst,
                promote: record.promote,
            };
            write!(f, "{}", req)?;
        }
        Ok(())
    }
}
