use slidetoe_core::engine::config::GameConfig;
use slidetoe_core::logic::board::Player;
use slidetoe_core::logic::game::{ClickOutcome, GameState};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod input;
mod render;

use input::Command;
use render::Screen;

#[tokio::main]
async fn main() {
    // `log` records from the core are forwarded into this subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = load_config(std::env::args().nth(1).as_deref()).await;
    let mut state = GameState::new(config);
    println!("{}", input::USAGE);
    println!("{}", Screen(&state));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let Some(command) = Command::parse(&line) else {
            println!("{}", input::USAGE);
            continue;
        };

        match command {
            Command::Quit => break,
            Command::NewGame(config) => state.new_game(config),
            Command::Click(pos) => match state.click(pos) {
                Ok(ClickOutcome::Selected(_)) => {}
                Ok(ClickOutcome::Moved(mv, _)) => {
                    tracing::debug!(%mv, "human moved");
                    if state.turn() == Player::Computer && !state.is_over() {
                        println!("{}", Screen(&state));
                        computer_turn(&mut state).await;
                    }
                }
                Err(err) => println!("{err}"),
            },
        }
        println!("{}", Screen(&state));
    }
}

async fn load_config(path: Option<&str>) -> GameConfig {
    let Some(path) = path else {
        return GameConfig::default();
    };

    let loaded = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| e.to_string())
        .and_then(|text| GameConfig::load_from_json(&text).map_err(|e| e.to_string()));
    loaded.unwrap_or_else(|err| {
        tracing::warn!(%path, %err, "could not load config, using defaults");
        GameConfig::default()
    })
}

/// Runs the search on the blocking pool; input is not read until it returns.
async fn computer_turn(state: &mut GameState) {
    let mut snapshot = state.clone();
    let task = tokio::task::spawn_blocking(move || {
        let mut engine = snapshot.new_engine();
        let result = snapshot.computer_move(&mut engine);
        (snapshot, result)
    });

    match task.await {
        Ok((next, Ok((mv, stats)))) => {
            tracing::info!(
                %mv,
                nodes = stats.nodes,
                cache_hits = stats.cache_hits,
                cache_entries = stats.cache_entries,
                "computer moved"
            );
            *state = next;
        }
        Ok((_, Err(err))) => tracing::error!(%err, "computer could not move"),
        Err(err) => tracing::error!(%err, "search task failed"),
    }
}
