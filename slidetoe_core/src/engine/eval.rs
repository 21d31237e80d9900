use crate::engine::config::GameConfig;
use crate::engine::{Evaluator, Score};
use crate::logic::board::{Board, Player};
use crate::logic::rules::{has_line, is_blocked};
use std::sync::Arc;

/// Scores a position by its outcome only. A position that is neither won nor
/// drawn gets the constant `Cutoff` value: past the depth limit the search
/// has no information.
pub struct OutcomeEvaluator {
    config: Arc<GameConfig>,
}

impl OutcomeEvaluator {
    pub const fn new(config: Arc<GameConfig>) -> Self {
        Self { config }
    }
}

impl Evaluator for OutcomeEvaluator {
    fn evaluate(&self, board: &Board, mover: Player) -> Score {
        if has_line(board, Player::Computer) {
            Score::ComputerWin
        } else if has_line(board, Player::Human) {
            Score::HumanWin
        } else if is_blocked(board, mover, self.config.target_vacancies()) {
            Score::Draw
        } else {
            Score::Cutoff
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator(target_vacancies: i64) -> OutcomeEvaluator {
        OutcomeEvaluator::new(Arc::new(GameConfig::new(3, target_vacancies, 4)))
    }

    fn eval(target: i64, board: &str, side: Player) -> Score {
        evaluator(target).evaluate(&board.parse().unwrap(), side)
    }

    #[test]
    fn test_wins_dominate() {
        assert_eq!(eval(1, "RRR/BBE/BEE", Player::Human), Score::ComputerWin);
        assert_eq!(eval(1, "BRR/BRE/BEE", Player::Computer), Score::HumanWin);
    }

    #[test]
    fn test_blocked_is_draw() {
        assert_eq!(eval(1, "EBR/BBR/RRB", Player::Computer), Score::Draw);
        assert_eq!(eval(1, "EBR/BBR/RRB", Player::Human), Score::Cutoff);
        assert_eq!(eval(0, "BRB/BRR/RBB", Player::Human), Score::Draw);
    }

    #[test]
    fn test_draw_is_judged_for_the_mover() {
        // Human is walled off from the last vacancy, Computer is not.
        assert_eq!(eval(1, "ERB/RRB/BBR", Player::Computer), Score::Cutoff);
        assert_eq!(eval(1, "ERB/RRB/BBR", Player::Human), Score::Draw);
    }

    #[test]
    fn test_open_position_is_cutoff() {
        assert_eq!(eval(1, "BEE/ERE/EEE", Player::Human), Score::Cutoff);
    }

    #[test]
    fn test_score_order() {
        assert!(Score::HumanWin < Score::Cutoff);
        assert!(Score::Cutoff < Score::Draw);
        assert!(Score::Draw < Score::ComputerWin);
        assert_eq!(Score::ComputerWin.value(), 3);
    }
}
