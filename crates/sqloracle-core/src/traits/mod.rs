//! Trait seams.

pub mod oracle;

pub use oracle::Oracle;
