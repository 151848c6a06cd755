pub mod board;
pub mod game;
pub mod opening;
pub mod rules;
