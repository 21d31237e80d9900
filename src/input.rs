use slidetoe_core::engine::config::GameConfig;
use slidetoe_core::logic::board::BoardCoordinate;

pub const USAGE: &str = "Commands: `<row> <col>` to click a square (0-based), \
`new [size] [vacancies] [depth]` to start over, `quit` to leave.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Click(BoardCoordinate),
    NewGame(GameConfig),
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        match words.next()? {
            "quit" | "q" | "exit" => Some(Self::Quit),
            "new" => {
                let mut field = || words.next().unwrap_or("");
                let (size, vacancies, depth) = (field(), field(), field());
                Some(Self::NewGame(GameConfig::from_form(size, vacancies, depth)))
            }
            row => {
                let row = row.parse().ok()?;
                let col = words.next()?.parse().ok()?;
                if words.next().is_some() {
                    return None;
                }
                Some(Self::Click(BoardCoordinate::new(row, col)))
            }
        }
    }
}
