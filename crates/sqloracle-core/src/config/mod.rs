//! Configuration system for sqloracle.
//! TOML-based, layered resolution: CLI > env > project file > defaults.

pub mod corpus_config;
pub mod run_config;
pub mod service_config;
pub mod sqloracle_config;

pub use corpus_config::CorpusConfig;
pub use run_config::{RunConfig, MAX_BATCH_SIZE};
pub use service_config::{PsqlConfig, ServiceConfig};
pub use sqloracle_config::{CliOverrides, SqloracleConfig};
