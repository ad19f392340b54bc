pub mod game;
pub mod pan;
