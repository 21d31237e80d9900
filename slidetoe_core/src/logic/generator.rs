use crate::engine::Move;
use crate::logic::board::{Board, Player};
use crate::logic::rules::{has_adjacent, Phase};

#[derive(Debug, Default, Clone, Copy)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub const fn new() -> Self {
        Self
    }

    /// Legal moves for `player` in the given phase.
    ///
    /// Placement yields every empty cell in row-major order. Sliding walks the
    /// empty destinations in row-major order and, for each, the mover's tiles
    /// in its 3x3 neighbourhood in row-major order. Search keeps the first of
    /// equally scored moves, so this order is the tie-break.
    pub fn generate_moves(&self, board: &Board, player: Player, phase: Phase) -> Vec<Move> {
        let mut moves = Vec::with_capacity(board.size() * board.size());
        match phase {
            Phase::Placement => {
                moves.extend(board.empty_cells().map(|to| Move::Place { to }));
            }
            Phase::Sliding => {
                let own = player.cell();
                for to in board.empty_cells() {
                    moves.extend(
                        board
                            .neighbors(to)
                            .filter(|&from| board.get(from) == Some(own))
                            .map(|from| Move::Slide { from, to }),
                    );
                }
            }
        }
        moves
    }

    /// Returns as soon as one legal move is found.
    pub fn has_legal_moves(&self, board: &Board, player: Player, phase: Phase) -> bool {
        match phase {
            Phase::Placement => board.empty_cells().next().is_some(),
            Phase::Sliding => board.empty_cells().any(|e| has_adjacent(board, e, player)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::BoardCoordinate;

    fn at(row: usize, col: usize) -> BoardCoordinate {
        BoardCoordinate::new(row, col)
    }

    #[test]
    fn test_placement_moves_row_major() {
        let board: Board = "BEE/ERE/EEB".parse().unwrap();
        let moves = MoveGenerator::new().generate_moves(&board, Player::Computer, Phase::Placement);
        let targets: Vec<_> = moves.iter().map(|m| m.destination()).collect();
        assert_eq!(
            targets,
            vec![at(0, 1), at(0, 2), at(1, 0), at(1, 2), at(2, 0), at(2, 1)]
        );
        assert!(moves.iter().all(|m| matches!(m, Move::Place { .. })));
    }

    #[test]
    fn test_sliding_moves_are_adjacent_own_tiles() {
        let board: Board = "BRB/ERB/RBR".parse().unwrap();
        let generator = MoveGenerator::new();

        let computer = generator.generate_moves(&board, Player::Computer, Phase::Sliding);
        assert_eq!(
            computer,
            vec![
                Move::Slide { from: at(0, 1), to: at(1, 0) },
                Move::Slide { from: at(1, 1), to: at(1, 0) },
                Move::Slide { from: at(2, 0), to: at(1, 0) },
            ]
        );

        let human = generator.generate_moves(&board, Player::Human, Phase::Sliding);
        assert_eq!(
            human,
            vec![
                Move::Slide { from: at(0, 0), to: at(1, 0) },
                Move::Slide { from: at(2, 1), to: at(1, 0) },
            ]
        );
    }

    #[test]
    fn test_sliding_order_by_destination_then_source() {
        let board: Board = "EBE/RRR/BBB".parse().unwrap();
        let moves = MoveGenerator::new().generate_moves(&board, Player::Computer, Phase::Sliding);
        assert_eq!(
            moves,
            vec![
                Move::Slide { from: at(1, 0), to: at(0, 0) },
                Move::Slide { from: at(1, 1), to: at(0, 0) },
                Move::Slide { from: at(1, 1), to: at(0, 2) },
                Move::Slide { from: at(1, 2), to: at(0, 2) },
            ]
        );
    }

    #[test]
    fn test_has_legal_moves_matches_generation() {
        let board: Board = "EBR/BBR/RRB".parse().unwrap();
        let generator = MoveGenerator::new();
        assert!(!generator.has_legal_moves(&board, Player::Computer, Phase::Sliding));
        assert!(generator
            .generate_moves(&board, Player::Computer, Phase::Sliding)
            .is_empty());
        assert!(generator.has_legal_moves(&board, Player::Human, Phase::Sliding));
    }
}
