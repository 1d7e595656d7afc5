//! Query modules for each corpus table.

pub mod languages;
pub mod oracles;
pub mod predictions;
pub mod statements;
