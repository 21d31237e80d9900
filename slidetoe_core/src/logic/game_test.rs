use crate::engine::config::GameConfig;
use crate::engine::{Move, Score, SearchError, SearchResult, SearchStats, Searcher};
use crate::logic::board::{Board, BoardCoordinate, Player};
use crate::logic::game::{ClickOutcome, GameState, GameStatus, MoveRecord};
use crate::logic::rules::{MoveError, Phase};

fn at(row: usize, col: usize) -> BoardCoordinate {
    BoardCoordinate::new(row, col)
}

fn place(row: usize, col: usize) -> Move {
    Move::Place { to: at(row, col) }
}

/// Plays alternating placements starting with the human; the computer's
/// moves are scripted rather than searched.
fn play_placements(state: &mut GameState, cells: &[(usize, usize)]) -> GameStatus {
    let mut status = state.status();
    for (i, &(row, col)) in cells.iter().enumerate() {
        status = if i % 2 == 0 {
            state.human_move(place(row, col)).unwrap()
        } else {
            state.apply_computer_move(place(row, col)).unwrap()
        };
    }
    status
}

/// Reaches `BRB/ERB/RBR` with the human to slide.
fn sliding_game() -> GameState {
    let mut state = GameState::new(GameConfig::new(3, 1, 4));
    let status = play_placements(
        &mut state,
        &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    );
    assert_eq!(status, GameStatus::Playing);
    state
}

#[test]
fn test_new_game_prompts_human() {
    let state = GameState::default();
    assert_eq!(state.turn(), Player::Human);
    assert_eq!(state.status(), GameStatus::Playing);
    assert_eq!(state.phase(), Phase::Placement);
    assert_eq!(state.status_text(), "Your turn: place a tile.");
    assert_eq!(state.phase_label(), "Phase: place tiles");
    assert!(state.history().is_empty());
    assert_eq!(state.board().count_empty(), 9);
}

#[test]
fn test_click_places_and_passes_turn() {
    let mut state = GameState::default();
    let outcome = state.click(at(1, 1)).unwrap();
    assert_eq!(outcome, ClickOutcome::Moved(place(1, 1), GameStatus::Playing));
    assert_eq!(state.turn(), Player::Computer);
    assert_eq!(state.status_text(), "Computer turn...");
    assert_eq!(
        state.last_move(),
        Some(MoveRecord {
            player: Player::Human,
            mv: place(1, 1)
        })
    );

    assert_eq!(state.click(at(0, 0)), Err(MoveError::NotYourTurn));
    assert_eq!(state.human_move(place(0, 0)), Err(MoveError::NotYourTurn));
}

#[test]
fn test_rejected_placement_keeps_turn() {
    let mut state = GameState::default();
    state.click(at(0, 0)).unwrap();
    state.apply_computer_move(place(1, 1)).unwrap();

    let before = state.board().clone();
    assert_eq!(state.click(at(1, 1)), Err(MoveError::TargetOccupied));
    assert_eq!(state.click(at(3, 0)), Err(MoveError::OutOfBounds));
    assert_eq!(state.board(), &before);
    assert_eq!(state.turn(), Player::Human);
    assert_eq!(state.status_text(), "Your turn.");
}

#[test]
fn test_computer_move_answers_and_returns_turn() {
    let mut state = GameState::new(GameConfig::new(3, 1, 3));
    let mut engine = state.new_engine();
    assert_eq!(state.computer_move(&mut engine), Err(SearchError::OutOfTurn));

    state.human_move(place(1, 1)).unwrap();
    let (mv, stats) = state.computer_move(&mut engine).unwrap();

    assert!(matches!(mv, Move::Place { .. }));
    assert!(stats.nodes > 0);
    assert_eq!(state.turn(), Player::Human);
    assert_eq!(state.history().len(), 2);
    assert_eq!(state.board().count_empty(), 7);
}

#[test]
fn test_computer_blocks_open_row() {
    let mut state = GameState::new(GameConfig::new(3, 0, 7));
    play_placements(&mut state, &[(0, 0), (1, 1), (0, 1)]);

    let mut engine = state.new_engine();
    let (mv, _) = state.computer_move(&mut engine).unwrap();
    assert_eq!(mv, place(0, 2));
}

#[test]
fn test_human_line_ends_game() {
    let mut state = GameState::new(GameConfig::new(3, 0, 4));
    let status = play_placements(&mut state, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);

    assert_eq!(status, GameStatus::Won(Player::Human));
    assert!(state.is_over());
    assert_eq!(state.status_text(), "You win.");
    assert_eq!(state.human_move(place(2, 2)), Err(MoveError::GameOver));
    assert_eq!(state.click(at(2, 2)), Err(MoveError::GameOver));

    let mut engine = state.new_engine();
    assert_eq!(state.computer_move(&mut engine), Err(SearchError::OutOfTurn));
}

#[test]
fn test_computer_line_ends_game() {
    let mut state = GameState::new(GameConfig::new(3, 0, 4));
    let status = play_placements(
        &mut state,
        &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (1, 2)],
    );
    assert_eq!(status, GameStatus::Won(Player::Computer));
    assert_eq!(state.status_text(), "Computer wins.");
}

#[test]
fn test_full_board_without_line_is_a_draw() {
    let mut state = GameState::new(GameConfig::new(3, 0, 4));
    let status = play_placements(
        &mut state,
        &[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 0),
            (1, 2),
            (2, 1),
            (2, 0),
            (2, 2),
        ],
    );

    assert_eq!(state.board().to_string(), "BRB/BRR/RBB");
    assert_eq!(status, GameStatus::Drawn);
    assert_eq!(state.status_text(), "Draw: no legal moves remain.");
}

#[test]
fn test_sliding_selection_flow() {
    let mut state = sliding_game();
    assert_eq!(state.phase(), Phase::Sliding);
    assert_eq!(state.phase_label(), "Phase: slide tiles");

    assert_eq!(state.click(at(0, 1)), Err(MoveError::NotYourTile));
    assert_eq!(state.click(at(1, 0)), Err(MoveError::NotYourTile));
    assert_eq!(state.selection(), None);

    assert_eq!(state.click(at(0, 0)), Ok(ClickOutcome::Selected(at(0, 0))));
    assert_eq!(state.status_text(), "Now click an adjacent empty square.");

    let slide = Move::Slide {
        from: at(0, 0),
        to: at(1, 0),
    };
    assert_eq!(
        state.click(at(1, 0)),
        Ok(ClickOutcome::Moved(slide, GameStatus::Playing))
    );
    assert_eq!(state.board().to_string(), "ERB/BRB/RBR");
    assert_eq!(state.turn(), Player::Computer);
    assert_eq!(state.selection(), None);
}

#[test]
fn test_bad_destination_drops_selection() {
    let mut state = sliding_game();
    let before = state.board().clone();

    state.click(at(0, 2)).unwrap();
    assert_eq!(state.click(at(1, 0)), Err(MoveError::NotAdjacent));
    assert_eq!(state.selection(), None);

    state.click(at(0, 0)).unwrap();
    assert_eq!(state.click(at(2, 2)), Err(MoveError::TargetOccupied));
    assert_eq!(state.selection(), None);

    assert_eq!(state.board(), &before);
    assert_eq!(state.turn(), Player::Human);
}

#[test]
fn test_computer_slides_into_the_vacancy() {
    let mut state = sliding_game();
    state
        .human_move(Move::Slide {
            from: at(0, 0),
            to: at(1, 0),
        })
        .unwrap();

    let mut engine = state.new_engine();
    let (mv, _) = state.computer_move(&mut engine).unwrap();
    assert!(matches!(mv, Move::Slide { to, .. } if to == at(0, 0)));
    assert_eq!(state.board().count_empty(), 1);
}

#[test]
fn test_new_game_replaces_config() {
    let mut state = sliding_game();
    state.new_game(GameConfig::new(4, 2, 2));

    assert_eq!(state.board().size(), 4);
    assert_eq!(state.config().target_vacancies(), 2);
    assert_eq!(state.config().max_search_depth(), 2);
    assert!(state.history().is_empty());
    assert_eq!(state.turn(), Player::Human);
    assert_eq!(state.status(), GameStatus::Playing);
}

/// Always answers with the same move, legal or not.
struct FixedSearcher(Move);

impl Searcher for FixedSearcher {
    fn search(
        &mut self,
        _board: &mut Board,
        _side: Player,
    ) -> Result<(SearchResult, SearchStats), SearchError> {
        let result = SearchResult {
            score: Score::Cutoff,
            best_move: Some(self.0),
        };
        Ok((result, SearchStats::default()))
    }
}

#[test]
fn test_illegal_engine_choice_is_reported() {
    let mut state = GameState::default();
    state.human_move(place(1, 1)).unwrap();
    let before = state.board().clone();

    let err = state
        .computer_move(&mut FixedSearcher(place(1, 1)))
        .unwrap_err();
    assert_eq!(
        err,
        SearchError::IllegalChoice {
            mv: place(1, 1),
            reason: MoveError::TargetOccupied
        }
    );
    assert_eq!(state.board(), &before);
    assert_eq!(state.turn(), Player::Computer);

    let (mv, _) = state.computer_move(&mut FixedSearcher(place(0, 0))).unwrap();
    assert_eq!(mv, place(0, 0));
}

#[test]
fn test_saved_state_must_match_its_config() {
    let state = sliding_game();
    let json = serde_json::to_string(&state).unwrap();
    let restored: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.board(), state.board());
    assert_eq!(restored.history(), state.history());

    let mut value = serde_json::to_value(&state).unwrap();
    value["board"] = serde_json::to_value(Board::new(5)).unwrap();
    let err = serde_json::from_value::<GameState>(value).unwrap_err();
    assert!(err.to_string().contains("configured for 3x3"), "{err}");
}
