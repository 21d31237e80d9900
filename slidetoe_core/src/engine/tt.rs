use crate::engine::Score;
use crate::logic::board::{Board, Player};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TTFlag {
    Exact,
    LowerBound, // Fail-high: true score is at least `score`
    UpperBound, // Fail-low: true score is at most `score`
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub score: Score,
    /// Plies left before the depth cutoff when the entry was searched.
    pub depth: u8,
    pub flag: TTFlag,
}

impl TTEntry {
    /// Classifies a fail-soft result against the window it was searched with.
    pub fn from_search(score: Score, depth: u8, alpha: i8, beta: i8) -> Self {
        let flag = if score.value() <= alpha {
            TTFlag::UpperBound
        } else if score.value() >= beta {
            TTFlag::LowerBound
        } else {
            TTFlag::Exact
        };
        Self { score, depth, flag }
    }

    /// Whether this entry answers a probe at `depth` plies with window
    /// `(alpha, beta)` as well as a fresh search would.
    pub fn usable(&self, depth: u8, alpha: i8, beta: i8) -> bool {
        if self.depth < depth {
            return false;
        }
        match self.flag {
            TTFlag::Exact => true,
            TTFlag::LowerBound => self.score.value() >= beta,
            TTFlag::UpperBound => self.score.value() <= alpha,
        }
    }
}

/// Cache key: the board's canonical encoding followed by the side to move.
pub fn position_key(board: &Board, side_to_move: Player) -> String {
    let mut key = board.encode();
    key.push(side_to_move.symbol());
    key
}

/// Position cache owned by a single top-level search and dropped with it.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<String, TTEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe(&self, key: &str) -> Option<TTEntry> {
        self.entries.get(key).copied()
    }

    /// Keeps the deeper of two results for the same position.
    pub fn store(&mut self, key: String, entry: TTEntry) {
        self.entries
            .entry(key)
            .and_modify(|old| {
                if entry.depth >= old.depth {
                    *old = entry;
                }
            })
            .or_insert(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
