//! Dialect tags a statement can carry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// The languages a corpus statement can be tagged with. The discriminants
/// are the persisted ids in the `languages` table and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    PgSql = 0,
    PlPgSql = 1,
    Psql = 2,
    PlPerl = 3,
    PlTcl = 4,
    #[serde(rename = "plpython2u")]
    PlPython2 = 5,
    #[serde(rename = "plpython3u")]
    PlPython3 = 6,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::PgSql,
        Language::PlPgSql,
        Language::Psql,
        Language::PlPerl,
        Language::PlTcl,
        Language::PlPython2,
        Language::PlPython3,
    ];

    /// Persisted id.
    pub fn id(self) -> i64 {
        self as i64
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::PgSql => "pgsql",
            Self::PlPgSql => "plpgsql",
            Self::Psql => "psql",
            Self::PlPerl => "plperl",
            Self::PlTcl => "pltcl",
            Self::PlPython2 => "plpython2u",
            Self::PlPython3 => "plpython3u",
        }
    }

    /// Case-insensitive lookup. `plpythonu` is accepted as the historical
    /// alias of `plpython2u`.
    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        if lowered == "plpythonu" {
            return Some(Self::PlPython2);
        }
        Self::ALL.into_iter().find(|l| l.name() == lowered)
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.id() == id)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ConfigError::UnknownLanguage {
            name: s.to_string(),
        })
    }
}
