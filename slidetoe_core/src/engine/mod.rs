use crate::logic::board::{Board, BoardCoordinate, Player};
use crate::logic::rules::MoveError;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod eval;
pub mod search;
pub mod tt;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Place { to: BoardCoordinate },
    Slide { from: BoardCoordinate, to: BoardCoordinate },
}

impl Move {
    pub const fn destination(self) -> BoardCoordinate {
        match self {
            Self::Place { to } | Self::Slide { to, .. } => to,
        }
    }

    pub const fn source(self) -> Option<BoardCoordinate> {
        match self {
            Self::Place { .. } => None,
            Self::Slide { from, .. } => Some(from),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Place { to } => write!(f, "place {to}"),
            Self::Slide { from, to } => write!(f, "slide {from} -> {to}"),
        }
    }
}

/// Outcome scores from the Computer's point of view. Computer maximizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum Score {
    HumanWin = 0,
    Cutoff = 1,
    Draw = 2,
    ComputerWin = 3,
}

impl Score {
    pub const fn value(self) -> i8 {
        self as i8
    }
}

/// Initial window bounds; both lie strictly outside the score domain.
pub const ALPHA_FLOOR: i8 = -1;
pub const BETA_CEILING: i8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub score: Score,
    pub best_move: Option<Move>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub nodes: u64,
    pub cache_hits: u64,
    pub cache_entries: usize,
    pub max_ply: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no legal move for {side:?} in a position that is not terminal")]
    NoLegalMove { side: Player },
    #[error("it is not the computer's turn")]
    OutOfTurn,
    #[error("searcher chose {mv}, which the game rejects: {reason}")]
    IllegalChoice { mv: Move, reason: MoveError },
}

pub trait Evaluator {
    /// Scores `board` right after `mover` played. The draw test is made for
    /// `mover`, not for the side about to reply.
    fn evaluate(&self, board: &Board, mover: Player) -> Score;
}

pub trait Searcher {
    /// Picks a move for `side`. The board is borrowed mutably for the whole
    /// call and is back in its original state when the call returns.
    fn search(
        &mut self,
        board: &mut Board,
        side: Player,
    ) -> Result<(SearchResult, SearchStats), SearchError>;
}
