//! Integer identifiers for persisted entities.
//!
//! Each ID type wraps an `i64` (SQLite's native integer) so a `StatementId`
//! cannot be passed where an `OracleId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl $name {
            /// Get the raw integer value.
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Statement key in the corpus.
    StatementId
);

define_id!(
    /// Small stable integer standing in for an oracle name in predictions.
    OracleId
);

impl StatementId {
    /// The corpus keys statements by the xxh3-64 hash of their text,
    /// reinterpreted as a signed integer so it fits an SQLite INTEGER.
    pub fn of_text(text: &str) -> Self {
        Self(xxh3_64(text.as_bytes()) as i64)
    }
}

/// A registered oracle: its persisted id and the stable name it was
/// registered under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OracleIdentity {
    pub id: OracleId,
    pub name: String,
}

impl OracleIdentity {
    pub fn new(id: OracleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
