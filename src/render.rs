use slidetoe_core::logic::board::{BoardCoordinate, Cell};
use slidetoe_core::logic::game::GameState;
use std::fmt;

/// Text view of a game: column header, one line per row, then the phase and
/// status lines. Empty squares print as `.` and the selected tile is
/// bracketed.
pub struct Screen<'a>(pub &'a GameState);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        let size = state.board().size();

        write!(f, "   ")?;
        for col in 0..size {
            write!(f, " {col} ")?;
        }
        writeln!(f)?;

        for (row, cells) in state.board().rows().enumerate() {
            write!(f, "{row:>2} ")?;
            for (col, &cell) in cells.iter().enumerate() {
                let symbol = match cell {
                    Cell::Empty => '.',
                    other => other.symbol(),
                };
                if state.selection() == Some(BoardCoordinate::new(row, col)) {
                    write!(f, "[{symbol}]")?;
                } else {
                    write!(f, " {symbol} ")?;
                }
            }
            writeln!(f)?;
        }

        writeln!(f, "{}", state.phase_label())?;
        write!(f, "{}", state.status_text())
    }
}
