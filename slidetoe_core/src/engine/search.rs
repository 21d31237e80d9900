use crate::engine::config::GameConfig;
use crate::engine::eval::OutcomeEvaluator;
use crate::engine::tt::{position_key, TTEntry, TranspositionTable};
use crate::engine::{
    Evaluator, Move, Score, SearchError, SearchResult, SearchStats, Searcher, ALPHA_FLOOR,
    BETA_CEILING,
};
use crate::logic::board::{Board, Player};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::{has_line, is_blocked, Phase};
use std::sync::Arc;

/// Depth-limited minimax with alpha-beta pruning. Computer maximizes and
/// Human minimizes over the same `Score` scale at every ply.
pub struct AlphaBetaEngine {
    config: Arc<GameConfig>,
    evaluator: OutcomeEvaluator,
    generator: MoveGenerator,
    stats: SearchStats,
}

impl AlphaBetaEngine {
    pub fn new(config: Arc<GameConfig>) -> Self {
        Self {
            evaluator: OutcomeEvaluator::new(config.clone()),
            config,
            generator: MoveGenerator::new(),
            stats: SearchStats::default(),
        }
    }

    pub fn update_config(&mut self, config: Arc<GameConfig>) {
        self.evaluator = OutcomeEvaluator::new(config.clone());
        self.config = config;
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Counters from the most recent search.
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// One node of the search: `side` to move at ply `depth` with window
    /// `(alpha, beta)`.
    ///
    /// Each move is applied through a scoped guard, so the board is restored
    /// before the next sibling is tried and on every early return. Fails with
    /// `NoLegalMove` when `side` has nothing to play; terminal positions are
    /// caught one ply earlier, so reaching that means the draw or win test
    /// missed something.
    pub fn search_node(
        &mut self,
        board: &mut Board,
        side: Player,
        mut alpha: i8,
        mut beta: i8,
        depth: u8,
        tt: &mut TranspositionTable,
    ) -> Result<SearchResult, SearchError> {
        let target = self.config.target_vacancies();
        let max_depth = self.config.max_search_depth();
        let opponent = side.opposite();

        let moves = self
            .generator
            .generate_moves(board, side, Phase::of(board, target));
        if moves.is_empty() {
            log::error!(
                "no legal move for {side:?} at ply {depth} in {}; terminal detection missed this position",
                board.encode()
            );
            return Err(SearchError::NoLegalMove { side });
        }

        self.stats.max_ply = self.stats.max_ply.max(depth);
        let mut best: Option<(Score, Move)> = None;

        for mv in moves {
            self.stats.nodes += 1;

            let reply = {
                let mut applied = board.apply_scoped(mv, side);

                if has_line(&applied, side)
                    || is_blocked(&applied, opponent, target)
                    || depth >= max_depth
                {
                    self.evaluator.evaluate(&applied, side)
                } else {
                    let key = position_key(&applied, opponent);
                    let remaining = max_depth - depth - 1;
                    match tt.probe(&key).filter(|e| e.usable(remaining, alpha, beta)) {
                        Some(entry) => {
                            self.stats.cache_hits += 1;
                            entry.score
                        }
                        None => {
                            let child =
                                self.search_node(&mut applied, opponent, alpha, beta, depth + 1, tt)?;
                            tt.store(key, TTEntry::from_search(child.score, remaining, alpha, beta));
                            child.score
                        }
                    }
                }
            };

            let improves = best.map_or(true, |(score, _)| match side {
                Player::Computer => reply > score,
                Player::Human => reply < score,
            });
            if improves {
                best = Some((reply, mv));
                match side {
                    Player::Computer => alpha = alpha.max(reply.value()),
                    Player::Human => beta = beta.min(reply.value()),
                }
                if alpha >= beta {
                    break;
                }
            }
        }

        let (score, best_move) = best.ok_or(SearchError::NoLegalMove { side })?;
        Ok(SearchResult {
            score,
            best_move: Some(best_move),
        })
    }
}

impl Searcher for AlphaBetaEngine {
    fn search(
        &mut self,
        board: &mut Board,
        side: Player,
    ) -> Result<(SearchResult, SearchStats), SearchError> {
        self.stats = SearchStats::default();
        let mut tt = TranspositionTable::new();

        let result = self.search_node(board, side, ALPHA_FLOOR, BETA_CEILING, 0, &mut tt)?;
        self.stats.cache_entries = tt.len();

        log::debug!(
            "{side:?} search on {}: {:?} with score {:?} ({} nodes, {} cache hits, {} entries)",
            board.encode(),
            result.best_move,
            result.score,
            self.stats.nodes,
            self.stats.cache_hits,
            self.stats.cache_entries,
        );

        Ok((result, self.stats))
    }
}
