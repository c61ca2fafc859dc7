use crate::token::Token;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A normalized absolute URL that a token redirects to.
///
/// Values are produced by [`validate_link`](crate::validator::validate_link),
/// so holding a `Destination` means the link has a recognized scheme and a
/// non-empty host.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Destination(String);

impl Destination {
    pub(crate) fn new(url: String) -> Self {
        Self(url)
    }

    /// Rehydrates a destination that was validated before it was stored.
    pub fn from_trusted(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Destination {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A committed `(token, destination)` pair.
///
/// Mappings are immutable: once stored, a token resolves to the same
/// destination for the lifetime of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMapping {
    pub token: Token,
    pub destination: Destination,
    /// When the mapping was committed.
    pub created_at: Timestamp,
}

impl LinkMapping {
    pub fn new(token: Token, destination: Destination) -> Self {
        Self {
            token,
            destination,
            created_at: Timestamp::now(),
        }
    }
}
