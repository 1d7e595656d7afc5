//! Postgres dialect versions the containerized oracles can target.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PgVersion {
    V10,
    V11,
    V12,
    V13,
    V14,
}

impl PgVersion {
    pub const ALL: [PgVersion; 5] = [
        PgVersion::V10,
        PgVersion::V11,
        PgVersion::V12,
        PgVersion::V13,
        PgVersion::V14,
    ];

    /// Major version number, e.g. `"14"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V10 => "10",
            Self::V11 => "11",
            Self::V12 => "12",
            Self::V13 => "13",
            Self::V14 => "14",
        }
    }
}

impl fmt::Display for PgVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PgVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == trimmed)
            .ok_or_else(|| ConfigError::UnsupportedVersion {
                version: s.to_string(),
            })
    }
}
