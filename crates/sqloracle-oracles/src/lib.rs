//! Oracle variants.
//!
//! Each variant observes one external signal and maps it to `Invalid` on a
//! positive match or `Unknown` otherwise. None of them can say "valid".
//!
//! - [`psql::PsqlOracle`]: pipes the statement through the psql client and
//!   classifies its failure text ([`psql::classify`]).
//! - [`driver::DriverOracle`]: round-trips the statement through a database
//!   driver; any server-side failure is `Invalid`.
//! - [`doblock::DoBlockOracle`]: wraps the statement in a never-executed
//!   `DO` block and delegates to a driver round-trip.
//! - [`parser::ParserOracle`]: parses with `sqlparser`.

pub mod catalog;
pub mod doblock;
pub mod driver;
pub mod parser;
pub mod psql;
pub mod service;

pub use catalog::{OracleKind, PreparedOracle};
