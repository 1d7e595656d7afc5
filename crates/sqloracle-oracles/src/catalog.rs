//! The catalog of oracle kinds and how to bring one up for a version.

use std::fmt;

use sqloracle_core::config::SqloracleConfig;
use sqloracle_core::errors::{ConfigError, OracleError};
use sqloracle_core::types::{Language, PgVersion};
use sqloracle_core::Oracle;

use crate::doblock::{self, DoBlockOracle};
use crate::driver::{DriverOracle, PostgresDriver};
use crate::parser::{self, ParserOracle};
use crate::psql::PsqlOracle;
use crate::service::{ComposeService, ReadinessPolicy, RunningService};

pub const RAW_LANGUAGES: &[Language] = &[Language::PgSql];
pub const PSQL_LANGUAGES: &[Language] = &[Language::Psql];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OracleKind {
    Psql,
    DoBlock,
    Raw,
    SqlParser,
}

impl OracleKind {
    pub const ALL: [OracleKind; 4] = [Self::Psql, Self::DoBlock, Self::Raw, Self::SqlParser];

    /// Catalog name, as accepted by `--oracles`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Psql => "psql",
            Self::DoBlock => "do-block",
            Self::Raw => "raw",
            Self::SqlParser => "sqlparser",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownOracle {
                name: name.to_string(),
            })
    }

    /// Versions this kind can run against. Empty for version-independent
    /// kinds.
    pub fn versions(self) -> &'static [PgVersion] {
        match self {
            Self::SqlParser => &[],
            _ => &PgVersion::ALL,
        }
    }

    pub fn version_independent(self) -> bool {
        self.versions().is_empty()
    }

    /// The name stored in the registry for this kind at `version`.
    pub fn oracle_name(self, version: PgVersion) -> String {
        match self {
            Self::Psql => PsqlOracle::oracle_name(version),
            Self::DoBlock => DoBlockOracle::<PostgresDriver>::oracle_name(version),
            Self::Raw => format!("postgres {version} raw"),
            Self::SqlParser => parser::ORACLE_NAME.to_string(),
        }
    }

    pub fn supported_languages(self) -> &'static [Language] {
        match self {
            Self::Psql => PSQL_LANGUAGES,
            Self::DoBlock => doblock::LANGUAGES,
            Self::Raw => RAW_LANGUAGES,
            Self::SqlParser => parser::LANGUAGES,
        }
    }

    pub fn supports(self, language: Language) -> bool {
        self.supported_languages().contains(&language)
    }

    /// Whether running this kind needs a database service up.
    pub fn needs_service(self) -> bool {
        !self.version_independent()
    }
}

impl fmt::Display for OracleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A ready-to-call oracle plus the service it depends on, if any.
///
/// Fields drop in order: the oracle's connections close before the service
/// is stopped.
pub struct PreparedOracle {
    pub oracle: Box<dyn Oracle>,
    pub service: Option<RunningService>,
}

impl PreparedOracle {
    /// Start whatever `kind` needs for `version` and build the oracle.
    pub fn prepare(
        kind: OracleKind,
        version: PgVersion,
        config: &SqloracleConfig,
    ) -> Result<Self, OracleError> {
        if !kind.needs_service() {
            return Ok(Self {
                oracle: Box::new(ParserOracle::new()),
                service: None,
            });
        }

        let service = ComposeService::new(version, &config.service, config.psql.effective_program());
        let running = service.start(ReadinessPolicy::from_config(&config.service))?;
        let name = kind.oracle_name(version);
        let pool_size = config.service.effective_pool_size();

        let oracle: Box<dyn Oracle> = match kind {
            OracleKind::Psql => Box::new(PsqlOracle::for_service(&service)),
            OracleKind::DoBlock => {
                let driver = PostgresDriver::connect(&name, service.dsn(), pool_size)?;
                Box::new(DoBlockOracle::new(version, driver))
            }
            OracleKind::Raw => {
                let driver = PostgresDriver::connect(&name, service.dsn(), pool_size)?;
                Box::new(DriverOracle::new(name, driver, RAW_LANGUAGES))
            }
            OracleKind::SqlParser => Box::new(ParserOracle::new()),
        };
        tracing::info!(oracle = %oracle.name(), "oracle prepared");

        Ok(Self {
            oracle,
            service: Some(running),
        })
    }

    pub fn name(&self) -> &str {
        self.oracle.name()
    }
}
