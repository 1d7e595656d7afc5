//! Containerized postgres service and psql client settings.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// docker-compose file defining the `pg-<version>` services.
    /// Default: compose's own lookup in the working directory.
    pub compose_file: Option<PathBuf>,
    /// Default: `0.0.0.0`.
    pub host: Option<String>,
    /// Default: `postgres`.
    pub user: Option<String>,
    /// Default: `password`.
    pub password: Option<String>,
    /// Port is `<port_prefix><version>`, e.g. `50014`. Default: `500`.
    pub port_prefix: Option<String>,
    /// `pg_isready` polls before giving up. Default: 15.
    pub ready_attempts: Option<u32>,
    /// Delay between polls in milliseconds. Default: 1000.
    pub ready_interval_ms: Option<u64>,
    /// Connections opened per driver oracle. Default: 4.
    pub pool_size: Option<usize>,
}

impl ServiceConfig {
    pub fn effective_host(&self) -> &str {
        self.host.as_deref().unwrap_or("0.0.0.0")
    }

    pub fn effective_user(&self) -> &str {
        self.user.as_deref().unwrap_or("postgres")
    }

    pub fn effective_password(&self) -> &str {
        self.password.as_deref().unwrap_or("password")
    }

    pub fn effective_port_prefix(&self) -> &str {
        self.port_prefix.as_deref().unwrap_or("500")
    }

    pub fn effective_ready_attempts(&self) -> u32 {
        self.ready_attempts.unwrap_or(15)
    }

    pub fn effective_ready_interval(&self) -> Duration {
        Duration::from_millis(self.ready_interval_ms.unwrap_or(1000))
    }

    pub fn effective_pool_size(&self) -> usize {
        self.pool_size.unwrap_or(4)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PsqlConfig {
    /// Program that runs psql inside the service. Default: `docker-compose`.
    pub program: Option<String>,
}

impl PsqlConfig {
    pub fn effective_program(&self) -> &str {
        self.program.as_deref().unwrap_or("docker-compose")
    }
}
