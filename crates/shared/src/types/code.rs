//! Account codes for chart-of-accounts references.
//!
//! Codes follow the `N-NNN` convention (major segment, dash, minor segment),
//! e.g. `1-110` for a bank account. The segments are parsed once at the
//! boundary so the rest of the system can order codes numerically instead of
//! lexicographically.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when text cannot be parsed as an account code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeParseError {
    /// The code is empty or whitespace.
    #[error("account code is empty")]
    Empty,
    /// The code does not match the `N-NNN` shape.
    #[error("account code `{0}` must look like `1-110` (digits, dash, digits)")]
    Malformed(String),
}

/// A chart-of-accounts code such as `1-110`.
///
/// The original text is preserved verbatim for storage and display; the
/// parsed segments drive ordering and the contra-account proximity heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountCode {
    raw: String,
    major: u32,
    minor: u32,
}

impl AccountCode {
    /// Parses an account code from text.
    ///
    /// # Errors
    ///
    /// Returns `CodeParseError` if the text is empty or not `digits-digits`.
    pub fn parse(text: &str) -> Result<Self, CodeParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CodeParseError::Empty);
        }

        let malformed = || CodeParseError::Malformed(trimmed.to_string());
        let (major_text, minor_text) = trimmed.split_once('-').ok_or_else(malformed)?;
        if major_text.is_empty()
            || minor_text.is_empty()
            || !major_text.bytes().all(|b| b.is_ascii_digit())
            || !minor_text.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }

        let major: u32 = major_text.parse().map_err(|_| malformed())?;
        let minor: u32 = minor_text.parse().map_err(|_| malformed())?;

        Ok(Self {
            raw: trimmed.to_string(),
            major,
            minor,
        })
    }

    /// Returns the code as originally written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the major segment (account class), e.g. `1` for `1-110`.
    #[must_use]
    pub const fn major(&self) -> u32 {
        self.major
    }

    /// Returns the minor segment, e.g. `110` for `1-110`.
    #[must_use]
    pub const fn minor(&self) -> u32 {
        self.minor
    }

    /// Absolute distance between the minor segments of two codes.
    ///
    /// Used by the contra-account linking heuristic to find the nearest
    /// candidate parent within the same account class.
    #[must_use]
    pub const fn minor_distance(&self, other: &Self) -> u32 {
        self.minor.abs_diff(other.minor)
    }
}

impl PartialOrd for AccountCode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AccountCode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.major, self.minor, &self.raw).cmp(&(other.major, other.minor, &other.raw))
    }
}

impl std::fmt::Display for AccountCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl std::str::FromStr for AccountCode {
    type Err = CodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccountCode {
    type Error = CodeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccountCode> for String {
    fn from(code: AccountCode) -> Self {
        code.raw
    }
}
