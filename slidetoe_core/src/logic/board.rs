use crate::engine::Move;
use crate::logic::rules::MoveError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

pub const MIN_BOARD_SIZE: usize = 3;
pub const MAX_BOARD_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Human => Self::Computer,
            Self::Computer => Self::Human,
        }
    }

    pub const fn cell(self) -> Cell {
        match self {
            Self::Human => Cell::Human,
            Self::Computer => Cell::Computer,
        }
    }

    pub const fn symbol(self) -> char {
        self.cell().symbol()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    Human,
    Computer,
    #[default]
    Empty,
}

impl Cell {
    pub const fn symbol(self) -> char {
        match self {
            Self::Human => 'B',
            Self::Computer => 'R',
            Self::Empty => 'E',
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'B' => Some(Self::Human),
            'R' => Some(Self::Computer),
            'E' => Some(Self::Empty),
            _ => None,
        }
    }

    pub const fn owner(self) -> Option<Player> {
        match self {
            Self::Human => Some(Player::Human),
            Self::Computer => Some(Player::Computer),
            Self::Empty => None,
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardCoordinate {
    pub row: usize,
    pub col: usize,
}

impl BoardCoordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// King-move adjacency: both deltas at most one, not the same cell.
    pub const fn is_adjacent(self, other: Self) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr <= 1 && dc <= 1 && (dr | dc) != 0
    }
}

impl fmt::Display for BoardCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("board must have between 3 and 5 rows, got {0}")]
    BadSize(usize),
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("unknown cell symbol {0:?}")]
    BadSymbol(char),
    #[error("board of size {size} needs {expected} cells, got {len}")]
    CellCount {
        size: usize,
        len: usize,
        expected: usize,
    },
    #[error("board is {board}x{board} but the game is configured for {config}x{config}")]
    ConfigMismatch { board: usize, config: usize },
}

/// Square grid of cells stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardJson")]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

#[derive(Deserialize)]
struct BoardJson {
    size: usize,
    cells: Vec<Cell>,
}

impl TryFrom<BoardJson> for Board {
    type Error = ParseBoardError;

    fn try_from(json: BoardJson) -> Result<Self, Self::Error> {
        let BoardJson { size, cells } = json;
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(ParseBoardError::BadSize(size));
        }
        if cells.len() != size * size {
            return Err(ParseBoardError::CellCount {
                size,
                len: cells.len(),
                expected: size * size,
            });
        }
        Ok(Self { size, cells })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(MIN_BOARD_SIZE)
    }
}

impl Board {
    /// Empty board. Callers pass a size already clamped by `GameConfig`.
    #[must_use]
    pub fn new(size: usize) -> Self {
        debug_assert!((MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size));
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    pub const fn contains(&self, pos: BoardCoordinate) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    const fn index(&self, pos: BoardCoordinate) -> usize {
        pos.row * self.size + pos.col
    }

    const fn coord(&self, index: usize) -> BoardCoordinate {
        BoardCoordinate::new(index / self.size, index % self.size)
    }

    pub fn get(&self, pos: BoardCoordinate) -> Option<Cell> {
        if self.contains(pos) {
            self.cells.get(self.index(pos)).copied()
        } else {
            None
        }
    }

    pub fn set(&mut self, pos: BoardCoordinate, cell: Cell) -> Result<(), MoveError> {
        if !self.contains(pos) {
            return Err(MoveError::OutOfBounds);
        }
        let idx = self.index(pos);
        self.cells[idx] = cell;
        Ok(())
    }

    /// In-bounds access for positions the caller already validated.
    pub(crate) fn cell_at(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size + col]
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        !self.cells.iter().any(|c| c.is_empty())
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = BoardCoordinate> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| self.coord(i))
    }

    /// The clipped 3x3 neighbourhood of `pos`, centre excluded, row-major.
    pub fn neighbors(&self, pos: BoardCoordinate) -> impl Iterator<Item = BoardCoordinate> {
        let last = self.size - 1;
        let rows = pos.row.saturating_sub(1)..=(pos.row + 1).min(last);
        let cols = pos.col.saturating_sub(1)..=(pos.col + 1).min(last);
        rows.flat_map(move |r| cols.clone().map(move |c| BoardCoordinate::new(r, c)))
            .filter(move |&n| n != pos)
    }

    /// Row-major cell symbols, `size * size` characters. Used as the cache key.
    pub fn encode(&self) -> String {
        self.cells.iter().map(|c| c.symbol()).collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    /// Applies a move the generator or validator already accepted.
    pub fn apply_move(&mut self, mv: Move, player: Player) {
        if let Move::Slide { from, .. } = mv {
            let idx = self.index(from);
            debug_assert_eq!(self.cells[idx], player.cell());
            self.cells[idx] = Cell::Empty;
        }
        let idx = self.index(mv.destination());
        debug_assert!(self.cells[idx].is_empty());
        self.cells[idx] = player.cell();
    }

    pub fn undo_move(&mut self, mv: Move, player: Player) {
        let idx = self.index(mv.destination());
        debug_assert_eq!(self.cells[idx], player.cell());
        self.cells[idx] = Cell::Empty;
        if let Move::Slide { from, .. } = mv {
            let idx = self.index(from);
            self.cells[idx] = player.cell();
        }
    }

    /// Applies `mv` for as long as the returned guard lives.
    pub fn apply_scoped(&mut self, mv: Move, player: Player) -> AppliedMove<'_> {
        self.apply_move(mv, player);
        AppliedMove {
            board: self,
            mv,
            player,
        }
    }
}

/// A board with one move applied; dropping it restores the previous cells.
pub struct AppliedMove<'a> {
    board: &'a mut Board,
    mv: Move,
    player: Player,
}

impl Deref for AppliedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for AppliedMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for AppliedMove<'_> {
    fn drop(&mut self) {
        self.board.undo_move(self.mv, self.player);
    }
}

/// Rows separated by `/`, one symbol per cell: `BRB/ERB/RBR`.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.trim().split('/').collect();
        let size = rows.len();
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(ParseBoardError::BadSize(size));
        }
        let mut cells = Vec::with_capacity(size * size);
        for (row, text) in rows.iter().enumerate() {
            let len = text.chars().count();
            if len != size {
                return Err(ParseBoardError::RaggedRow {
                    row,
                    len,
                    expected: size,
                });
            }
            for ch in text.chars() {
                cells.push(Cell::from_symbol(ch).ok_or(ParseBoardError::BadSymbol(ch))?);
            }
        }
        Ok(Self { size, cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}
