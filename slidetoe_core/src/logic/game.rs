use crate::engine::config::GameConfig;
use crate::engine::search::AlphaBetaEngine;
use crate::engine::{Move, SearchError, SearchStats, Searcher};
use crate::logic::board::{Board, BoardCoordinate, Cell, ParseBoardError, Player};
use crate::logic::rules::{has_line, is_blocked, validate_move, MoveError, Phase};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won(Player),
    Drawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: Player,
    pub mv: Move,
}

/// Result of a click on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// First half of a slide: one of the human's tiles is now selected.
    Selected(BoardCoordinate),
    Moved(Move, GameStatus),
}

/// The live game: board, configuration, side to move and outcome.
///
/// The human always opens. After every half-move the mover is checked for a
/// line, then the opponent for being blocked; otherwise the turn passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GameStateJson")]
pub struct GameState {
    board: Board,
    config: GameConfig,
    turn: Player,
    status: GameStatus,
    selection: Option<BoardCoordinate>,
    history: Vec<MoveRecord>,
}

#[derive(Deserialize)]
struct GameStateJson {
    board: Board,
    config: GameConfig,
    turn: Player,
    status: GameStatus,
    selection: Option<BoardCoordinate>,
    history: Vec<MoveRecord>,
}

impl TryFrom<GameStateJson> for GameState {
    type Error = ParseBoardError;

    fn try_from(json: GameStateJson) -> Result<Self, Self::Error> {
        if json.board.size() != json.config.board_size() {
            return Err(ParseBoardError::ConfigMismatch {
                board: json.board.size(),
                config: json.config.board_size(),
            });
        }
        Ok(Self {
            board: json.board,
            config: json.config,
            turn: json.turn,
            status: json.status,
            selection: json.selection,
            history: json.history,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GameState {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            board: Board::new(config.board_size()),
            config,
            turn: Player::Human,
            status: GameStatus::Playing,
            selection: None,
            history: Vec::new(),
        }
    }

    /// Discards the current game and starts over with `config`.
    pub fn new_game(&mut self, config: GameConfig) {
        log::info!(
            "new game: {0}x{0} board, {1} vacancies, search depth {2}",
            config.board_size(),
            config.target_vacancies(),
            config.max_search_depth()
        );
        *self = Self::new(config);
    }

    pub const fn board(&self) -> &Board {
        &self.board
    }

    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    pub const fn turn(&self) -> Player {
        self.turn
    }

    pub const fn status(&self) -> GameStatus {
        self.status
    }

    pub const fn selection(&self) -> Option<BoardCoordinate> {
        self.selection
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<MoveRecord> {
        self.history.last().copied()
    }

    pub fn phase(&self) -> Phase {
        Phase::of(&self.board, self.config.target_vacancies())
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    /// An engine configured for this game.
    pub fn new_engine(&self) -> AlphaBetaEngine {
        AlphaBetaEngine::new(Arc::new(self.config))
    }

    pub fn phase_label(&self) -> &'static str {
        match self.phase() {
            Phase::Placement => "Phase: place tiles",
            Phase::Sliding => "Phase: slide tiles",
        }
    }

    pub fn status_text(&self) -> &'static str {
        match (self.status, self.turn) {
            (GameStatus::Won(Player::Human), _) => "You win.",
            (GameStatus::Won(Player::Computer), _) => "Computer wins.",
            (GameStatus::Drawn, _) => "Draw: no legal moves remain.",
            (GameStatus::Playing, Player::Computer) => "Computer turn...",
            (GameStatus::Playing, Player::Human) => {
                if self.selection.is_some() {
                    "Now click an adjacent empty square."
                } else if self.history.is_empty() {
                    "Your turn: place a tile."
                } else {
                    "Your turn."
                }
            }
        }
    }

    fn ensure_turn(&self, player: Player) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if self.turn != player {
            return Err(MoveError::NotYourTurn);
        }
        Ok(())
    }

    /// Applies a complete human move. A rejected move leaves the board as it
    /// was.
    pub fn human_move(&mut self, mv: Move) -> Result<GameStatus, MoveError> {
        self.ensure_turn(Player::Human)?;
        if let Err(err) = validate_move(&self.board, mv, Player::Human, self.config.target_vacancies())
        {
            log::warn!("rejected human move {mv}: {err}");
            return Err(err);
        }
        self.selection = None;
        Ok(self.play(mv, Player::Human))
    }

    /// Applies a move chosen for the computer, validated like a human move.
    pub fn apply_computer_move(&mut self, mv: Move) -> Result<GameStatus, MoveError> {
        self.ensure_turn(Player::Computer)?;
        validate_move(&self.board, mv, Player::Computer, self.config.target_vacancies())?;
        Ok(self.play(mv, Player::Computer))
    }

    /// Cell-by-cell input. During placement a click places a tile. During
    /// sliding the first click selects one of the human's tiles and the
    /// second picks the destination; a bad destination drops the selection.
    pub fn click(&mut self, pos: BoardCoordinate) -> Result<ClickOutcome, MoveError> {
        self.ensure_turn(Player::Human)?;
        let cell = self.board.get(pos).ok_or(MoveError::OutOfBounds)?;

        if self.phase() == Phase::Placement {
            let mv = Move::Place { to: pos };
            return self.human_move(mv).map(|status| ClickOutcome::Moved(mv, status));
        }

        match self.selection.take() {
            None => {
                if cell == Cell::Human {
                    self.selection = Some(pos);
                    Ok(ClickOutcome::Selected(pos))
                } else {
                    Err(MoveError::NotYourTile)
                }
            }
            Some(from) => {
                let mv = Move::Slide { from, to: pos };
                self.human_move(mv).map(|status| ClickOutcome::Moved(mv, status))
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Runs a fresh search for the computer on the live board and plays the
    /// result. `engine` must be configured for this game (see `new_engine`).
    pub fn computer_move<S: Searcher>(
        &mut self,
        engine: &mut S,
    ) -> Result<(Move, SearchStats), SearchError> {
        if self.is_over() || self.turn != Player::Computer {
            return Err(SearchError::OutOfTurn);
        }

        let (result, stats) = engine.search(&mut self.board, Player::Computer)?;
        let mv = result.best_move.ok_or(SearchError::NoLegalMove {
            side: Player::Computer,
        })?;

        if let Err(err) = self.apply_computer_move(mv) {
            log::error!("engine chose an illegal move {mv}: {err}");
            return Err(SearchError::IllegalChoice { mv, reason: err });
        }
        Ok((mv, stats))
    }

    fn play(&mut self, mv: Move, player: Player) -> GameStatus {
        self.board.apply_move(mv, player);
        self.history.push(MoveRecord { player, mv });
        self.finish_turn(player);
        self.status
    }

    fn finish_turn(&mut self, mover: Player) {
        let opponent = mover.opposite();
        if has_line(&self.board, mover) {
            self.status = GameStatus::Won(mover);
            log::info!("{mover:?} wins after {} moves", self.history.len());
        } else if is_blocked(&self.board, opponent, self.config.target_vacancies()) {
            self.status = GameStatus::Drawn;
            log::info!("draw: {opponent:?} cannot move");
        } else {
            self.turn = opponent;
        }
    }
}
