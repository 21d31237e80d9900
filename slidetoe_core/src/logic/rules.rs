use crate::engine::Move;
use crate::logic::board::{Board, BoardCoordinate, Player};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("That square is off the board.")]
    OutOfBounds,
    #[error("Pick an empty square.")]
    TargetOccupied,
    #[error("Select one of your tiles to move.")]
    NotYourTile,
    #[error("Moves must go to an adjacent empty square.")]
    NotAdjacent,
    #[error("That move does not belong to the current phase.")]
    WrongPhase,
    #[error("Select a tile before choosing where it goes.")]
    NoSelection,
    #[error("Wait for your turn.")]
    NotYourTurn,
    #[error("The game is over.")]
    GameOver,
}

impl MoveError {
    /// True for moves that break the current phase's legality rule.
    pub const fn is_illegal_move(self) -> bool {
        matches!(
            self,
            Self::TargetOccupied
                | Self::NotYourTile
                | Self::NotAdjacent
                | Self::WrongPhase
                | Self::NoSelection
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Placement,
    Sliding,
}

impl Phase {
    /// Derived from the live empty count; never cache it across mutations.
    pub fn of(board: &Board, target_vacancies: usize) -> Self {
        if board.count_empty() > target_vacancies {
            Self::Placement
        } else {
            Self::Sliding
        }
    }
}

/// Any full row, full column or either diagonal owned by `player`.
pub fn has_line(board: &Board, player: Player) -> bool {
    let n = board.size();
    let cell = player.cell();
    let owned = |r: usize, c: usize| board.cell_at(r, c) == cell;

    (0..n).any(|r| (0..n).all(|c| owned(r, c)))
        || (0..n).any(|c| (0..n).all(|r| owned(r, c)))
        || (0..n).all(|i| owned(i, i))
        || (0..n).all(|i| owned(i, n - 1 - i))
}

pub fn winner(board: &Board) -> Option<Player> {
    [Player::Computer, Player::Human]
        .into_iter()
        .find(|&p| has_line(board, p))
}

/// Whether any 8-neighbour of `pos` holds one of `player`'s tiles.
pub fn has_adjacent(board: &Board, pos: BoardCoordinate, player: Player) -> bool {
    let cell = player.cell();
    board
        .neighbors(pos)
        .any(|n| board.get(n) == Some(cell))
}

/// Draw test for the side about to move.
///
/// With vacancies configured, the position is blocked once placement is over
/// and `side_to_move` has no tile next to any empty cell. With no vacancies
/// there is no sliding phase, so a full board without a line is the draw.
pub fn is_blocked(board: &Board, side_to_move: Player, target_vacancies: usize) -> bool {
    if winner(board).is_some() {
        return false;
    }

    let empty = board.count_empty();
    if target_vacancies == 0 {
        return empty == 0;
    }
    if empty != target_vacancies {
        return false;
    }

    !board
        .empty_cells()
        .any(|e| has_adjacent(board, e, side_to_move))
}

/// Checks an externally supplied move against the phase's legality rule.
pub fn validate_move(
    board: &Board,
    mv: Move,
    player: Player,
    target_vacancies: usize,
) -> Result<(), MoveError> {
    let to = mv.destination();
    let target = board.get(to).ok_or(MoveError::OutOfBounds)?;
    let source = match mv {
        Move::Place { .. } => None,
        Move::Slide { from, .. } => Some((from, board.get(from).ok_or(MoveError::OutOfBounds)?)),
    };

    match (Phase::of(board, target_vacancies), source) {
        (Phase::Placement, Some(_)) | (Phase::Sliding, None) => return Err(MoveError::WrongPhase),
        (Phase::Sliding, Some((from, cell))) => {
            if cell != player.cell() {
                return Err(MoveError::NotYourTile);
            }
            if !target.is_empty() {
                return Err(MoveError::TargetOccupied);
            }
            if !from.is_adjacent(to) {
                return Err(MoveError::NotAdjacent);
            }
        }
        (Phase::Placement, None) => {
            if !target.is_empty() {
                return Err(MoveError::TargetOccupied);
            }
        }
    }
    Ok(())
}
