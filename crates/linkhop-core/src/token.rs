use crate::error::InvalidTokenError;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

/// A short opaque identifier bound to exactly one destination.
///
/// Tokens are 1-64 characters long and contain only alphanumeric
/// characters, hyphens, or underscores, so they are always safe to use
/// as a single URL path segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(SmolStr);

const MIN_LENGTH: usize = 1;
/// Longest accepted token.
pub const MAX_TOKEN_LENGTH: usize = 64;

impl Token {
    /// Parses caller-supplied text into a token.
    pub fn parse(token: &str) -> Result<Self, InvalidTokenError> {
        Self::validate(token)?;
        Ok(Self(SmolStr::new(token)))
    }

    /// Creates a `Token` without validation.
    ///
    /// Use this only for tokens produced by trusted internal sources
    /// (generators, or rows read back from storage).
    pub fn new_unchecked(token: impl AsRef<str>) -> Self {
        Self(SmolStr::new(token))
    }

    /// Generates the public short URL for this token.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(token: &str) -> Result<(), InvalidTokenError> {
        if token.len() < MIN_LENGTH || token.len() > MAX_TOKEN_LENGTH {
            return Err(InvalidTokenError::Length {
                min: MIN_LENGTH,
                max: MAX_TOKEN_LENGTH,
                len: token.len(),
            });
        }

        if !token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(InvalidTokenError::Charset(token.to_string()));
        }

        Ok(())
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
