//! Expanding the configured oracles × versions into concrete runs.

use std::collections::HashSet;

use sqloracle_core::config::SqloracleConfig;
use sqloracle_core::errors::{OracleError, PipelineError};
use sqloracle_core::types::{Language, PgVersion};
use sqloracle_oracles::OracleKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRun {
    pub kind: OracleKind,
    pub version: PgVersion,
    /// Registry name of the oracle.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub language: Language,
    pub runs: Vec<PlannedRun>,
}

impl RunPlan {
    /// Every version × oracle in configured order. A version-independent
    /// oracle runs once, at the first version. Fails before anything runs
    /// if a name is unknown or an oracle cannot handle the language.
    pub fn from_config(config: &SqloracleConfig) -> Result<Self, PipelineError> {
        let language = config.run.effective_language()?;
        let versions = config.run.effective_versions()?;
        let kinds = config
            .run
            .effective_oracles()
            .iter()
            .map(|name| OracleKind::from_name(name))
            .collect::<Result<Vec<_>, _>>()?;

        for kind in &kinds {
            if !kind.supports(language) {
                return Err(OracleError::UnsupportedLanguage {
                    oracle: kind.name().to_string(),
                    language: language.to_string(),
                }
                .into());
            }
        }

        let mut seen = HashSet::new();
        let mut runs = Vec::new();
        for version in versions {
            for kind in &kinds {
                let name = kind.oracle_name(version);
                if seen.insert(name.clone()) {
                    runs.push(PlannedRun {
                        kind: *kind,
                        version,
                        name,
                    });
                }
            }
        }
        Ok(Self { language, runs })
    }

    pub fn needs_service(&self) -> bool {
        self.runs.iter().any(|r| r.kind.needs_service())
    }
}
