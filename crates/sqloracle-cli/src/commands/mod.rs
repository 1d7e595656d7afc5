pub mod list_oracles;
pub mod predict;
