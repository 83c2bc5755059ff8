//! Validated, ordered bracket schedules.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::TaxBracket;

/// Reasons a bracket list cannot form a schedule.
///
/// Indices are 0-based positions in the list passed to
/// [`TaxBracketSchedule::new`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("a schedule needs at least one bracket")]
    Empty,

    #[error("bracket {index} has non-positive upper limit {limit}")]
    NonPositiveLimit { index: usize, limit: Decimal },

    #[error("bracket {index} upper limit {limit} does not exceed the previous limit {previous}")]
    LimitNotIncreasing {
        index: usize,
        limit: Decimal,
        previous: Decimal,
    },

    #[error("bracket {index} rate {rate} is outside 0..=1")]
    RateOutOfRange { index: usize, rate: Decimal },

    #[error("bracket {index} rate {rate} is lower than the previous rate {previous}")]
    RateDecreasing {
        index: usize,
        rate: Decimal,
        previous: Decimal,
    },

    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd { index: usize },

    #[error("the last bracket must be unbounded")]
    MissingUnboundedBracket,
}

/// An ordered set of bands partitioning `[0, ∞)`.
///
/// Upper limits strictly increase, rates never decrease, and the final band
/// is unbounded. Construct with [`TaxBracketSchedule::new`], which enforces
/// all of the above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxBracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl TaxBracketSchedule {
    /// Validates `brackets` and wraps them in a schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] describing the first bracket that breaks
    /// the ordering or rate rules.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, ScheduleError> {
        if brackets.is_empty() {
            return Err(ScheduleError::Empty);
        }

        let last = brackets.len() - 1;
        let mut previous_limit = Decimal::ZERO;
        let mut previous_rate = Decimal::ZERO;

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(ScheduleError::RateOutOfRange {
                    index,
                    rate: bracket.rate,
                });
            }
            if bracket.rate < previous_rate {
                return Err(ScheduleError::RateDecreasing {
                    index,
                    rate: bracket.rate,
                    previous: previous_rate,
                });
            }

            match bracket.upper_limit {
                Some(limit) if limit <= Decimal::ZERO => {
                    return Err(ScheduleError::NonPositiveLimit { index, limit });
                }
                Some(limit) if index > 0 && limit <= previous_limit => {
                    return Err(ScheduleError::LimitNotIncreasing {
                        index,
                        limit,
                        previous: previous_limit,
                    });
                }
                Some(_) if index == last => {
                    return Err(ScheduleError::MissingUnboundedBracket);
                }
                Some(limit) => previous_limit = limit,
                None if index != last => {
                    return Err(ScheduleError::UnboundedBeforeEnd { index });
                }
                None => {}
            }

            previous_rate = bracket.rate;
        }

        Ok(Self { brackets })
    }

    /// Wraps a compiled-in table whose ordering is covered by tests.
    pub(crate) fn from_static(brackets: &'static [TaxBracket]) -> Self {
        Self {
            brackets: brackets.to_vec(),
        }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Yields `(lower_bound, bracket)` pairs in ascending order.
    pub fn bands(&self) -> impl Iterator<Item = (Decimal, &TaxBracket)> + '_ {
        let lowers = std::iter::once(Decimal::ZERO).chain(
            self.brackets
                .iter()
                .filter_map(|bracket| bracket.upper_limit),
        );
        lowers.zip(self.brackets.iter())
    }

    /// Top marginal rate (the rate of the unbounded band).
    pub fn top_rate(&self) -> Decimal {
        self.brackets
            .last()
            .map(|bracket| bracket.rate)
            .unwrap_or(Decimal::ZERO)
    }
}
