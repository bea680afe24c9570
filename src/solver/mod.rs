pub mod board;
pub mod engine;
pub mod race;
pub mod rules;
pub mod stats;
