use crate::engine::search::AlphaBetaEngine;
use crate::engine::{Move, Score, SearchStats, Searcher};
use crate::logic::board::Player;
use crate::logic::game::GameState;
use gloo_worker::{HandlerId, Worker, WorkerScope};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub enum Input {
    ComputeMove(GameState),
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Output {
    MoveFound {
        mv: Move,
        score: Score,
        stats: SearchStats,
    },
    NoMove,
}

/// Runs the computer's search off the input thread. The engine is built on
/// the first request and reconfigured from each incoming game after that.
pub struct GameWorker {
    engine: Option<AlphaBetaEngine>,
}

impl Worker for GameWorker {
    type Input = Input;
    type Message = ();
    type Output = Output;

    fn create(_scope: &WorkerScope<Self>) -> Self {
        Self::new()
    }

    fn update(&mut self, _scope: &WorkerScope<Self>, _msg: Self::Message) {}

    fn received(&mut self, scope: &WorkerScope<Self>, msg: Self::Input, id: HandlerId) {
        scope.respond(id, self.handle(msg));
    }
}

impl GameWorker {
    pub const fn new() -> Self {
        Self { engine: None }
    }

    /// Answers one request. `received` forwards every message here.
    pub fn handle(&mut self, msg: Input) -> Output {
        match msg {
            Input::ComputeMove(state) => compute_move(&mut self.engine, &state),
        }
    }
}

impl Default for GameWorker {
    fn default() -> Self {
        Self::new()
    }
}

/// Searches `state` for the computer with a cached engine, creating or
/// updating it to match the game's configuration.
pub fn compute_move(engine: &mut Option<AlphaBetaEngine>, state: &GameState) -> Output {
    let config = Arc::new(*state.config());
    let engine = match engine.take() {
        Some(mut cached) => {
            cached.update_config(config);
            engine.insert(cached)
        }
        None => engine.insert(AlphaBetaEngine::new(config)),
    };

    if state.is_over() || state.turn() != Player::Computer {
        log::warn!("move requested while the computer is not to move");
        return Output::NoMove;
    }

    let mut board = state.board().clone();
    match engine.search(&mut board, Player::Computer) {
        Ok((result, stats)) => match result.best_move {
            Some(mv) => Output::MoveFound {
                mv,
                score: result.score,
                stats,
            },
            None => Output::NoMove,
        },
        Err(err) => {
            log::error!("search failed: {err}");
            Output::NoMove
        }
    }
}
