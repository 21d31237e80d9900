use crate::logic::board::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use serde::{Deserialize, Serialize};

pub const MIN_SEARCH_DEPTH: u8 = 1;
pub const MAX_SEARCH_DEPTH: u8 = 7;

pub const DEFAULT_BOARD_SIZE: usize = 3;
pub const DEFAULT_TARGET_VACANCIES: usize = 1;
pub const DEFAULT_MAX_SEARCH_DEPTH: u8 = 4;

/// Settings for one game. Every constructor clamps into range, so a value of
/// this type is always within bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GameConfigJson")]
pub struct GameConfig {
    board_size: usize,
    target_vacancies: usize,
    max_search_depth: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            target_vacancies: DEFAULT_TARGET_VACANCIES,
            max_search_depth: DEFAULT_MAX_SEARCH_DEPTH,
        }
    }
}

#[derive(Deserialize)]
struct GameConfigJson {
    board_size: Option<i64>,
    target_vacancies: Option<i64>,
    max_search_depth: Option<i64>,
}

impl From<GameConfigJson> for GameConfig {
    fn from(json: GameConfigJson) -> Self {
        Self::from_optional(json.board_size, json.target_vacancies, json.max_search_depth)
    }
}

impl GameConfig {
    /// Out-of-range values are clamped to the nearest bound, not rejected.
    pub fn new(board_size: i64, target_vacancies: i64, max_search_depth: i64) -> Self {
        let board_size = clamp_to(board_size, MIN_BOARD_SIZE, MAX_BOARD_SIZE);
        let target_vacancies = clamp_to(target_vacancies, 0, board_size * board_size - 1);
        let max_search_depth = clamp_to(
            max_search_depth,
            usize::from(MIN_SEARCH_DEPTH),
            usize::from(MAX_SEARCH_DEPTH),
        );
        Self {
            board_size,
            target_vacancies,
            max_search_depth: u8::try_from(max_search_depth).unwrap_or(MAX_SEARCH_DEPTH),
        }
    }

    /// Missing fields take their defaults before clamping.
    pub fn from_optional(
        board_size: Option<i64>,
        target_vacancies: Option<i64>,
        max_search_depth: Option<i64>,
    ) -> Self {
        Self::new(
            board_size.unwrap_or(DEFAULT_BOARD_SIZE as i64),
            target_vacancies.unwrap_or(DEFAULT_TARGET_VACANCIES as i64),
            max_search_depth.unwrap_or(i64::from(DEFAULT_MAX_SEARCH_DEPTH)),
        )
    }

    /// Builds a config from raw form text. Each field is read like an integer
    /// input box: leading whitespace, optional sign, then digits; anything
    /// after the digits is ignored and a field with no digits falls back to
    /// its default.
    pub fn from_form(board_size: &str, target_vacancies: &str, max_search_depth: &str) -> Self {
        Self::from_optional(
            parse_int_prefix(board_size),
            parse_int_prefix(target_vacancies),
            parse_int_prefix(max_search_depth),
        )
    }

    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    pub const fn board_size(&self) -> usize {
        self.board_size
    }

    pub const fn target_vacancies(&self) -> usize {
        self.target_vacancies
    }

    pub const fn max_search_depth(&self) -> u8 {
        self.max_search_depth
    }

    pub const fn total_cells(&self) -> usize {
        self.board_size * self.board_size
    }
}

#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn clamp_to(value: i64, min: usize, max: usize) -> usize {
    value.clamp(min as i64, max as i64) as usize
}

fn parse_int_prefix(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = digits.get(..end).filter(|d| !d.is_empty())?;
    // Anything too long for i64 is far outside every bound anyway.
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
