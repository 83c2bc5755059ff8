use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when text does not name a known income type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognised income type '{0}' (expected 'w2' or 'self_employed')")]
pub struct ParseIncomeTypeError(pub String);

/// How the filer earns their income.
///
/// Self-employed filers pay the flat self-employment surcharge on top of
/// the bracket tax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeType {
    #[default]
    #[serde(rename = "w2")]
    W2Employee,
    #[serde(rename = "self_employed")]
    SelfEmployed,
}

impl IncomeType {
    pub fn all() -> &'static [IncomeType] {
        &[IncomeType::W2Employee, IncomeType::SelfEmployed]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::W2Employee => "w2",
            Self::SelfEmployed => "self_employed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::W2Employee => "W-2 Employee",
            Self::SelfEmployed => "Self-Employed",
        }
    }

    pub fn is_self_employed(&self) -> bool {
        matches!(self, Self::SelfEmployed)
    }

    /// Case-insensitive; `-` and `_` are interchangeable.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "w2" | "w_2" => Some(Self::W2Employee),
            "self_employed" | "se" => Some(Self::SelfEmployed),
            _ => None,
        }
    }
}

impl FromStr for IncomeType {
    type Err = ParseIncomeTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseIncomeTypeError(s.to_string()))
    }
}

impl fmt::Display for IncomeType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_spelling_variants() {
        assert_eq!(IncomeType::parse("w2"), Some(IncomeType::W2Employee));
        assert_eq!(IncomeType::parse("W-2"), Some(IncomeType::W2Employee));
        assert_eq!(
            IncomeType::parse("self-employed"),
            Some(IncomeType::SelfEmployed)
        );
        assert_eq!(
            IncomeType::parse("SELF_EMPLOYED"),
            Some(IncomeType::SelfEmployed)
        );
        assert_eq!(IncomeType::parse("se"), Some(IncomeType::SelfEmployed));
    }

    #[test]
    fn from_str_rejects_unknown_type() {
        assert_eq!(
            "1099".parse::<IncomeType>(),
            Err(ParseIncomeTypeError("1099".to_string()))
        );
    }

    #[test]
    fn only_self_employed_flags_surcharge() {
        assert!(IncomeType::SelfEmployed.is_self_employed());
        assert!(!IncomeType::W2Employee.is_self_employed());
    }
}
