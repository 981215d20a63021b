pub mod game;
pub mod mode;
