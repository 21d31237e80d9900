pub mod board;
pub mod game;
pub mod generator;
pub mod rules;

#[cfg(test)]
mod game_test;
