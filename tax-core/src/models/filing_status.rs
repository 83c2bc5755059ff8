use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when text does not name a known filing status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognised filing status '{0}' (expected 'single' or 'married')")]
pub struct ParseFilingStatusError(pub String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    #[default]
    Single,
    Married,
}

impl FilingStatus {
    pub fn all() -> &'static [FilingStatus] {
        &[FilingStatus::Single, FilingStatus::Married]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Married => "married",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Married => "Married",
        }
    }

    /// Case-insensitive; accepts the short codes `s`, `m` and `mfj`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "s" => Some(Self::Single),
            "married" | "m" | "mfj" => Some(Self::Married),
            _ => None,
        }
    }
}

impl FromStr for FilingStatus {
    type Err = ParseFilingStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseFilingStatusError(s.to_string()))
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
