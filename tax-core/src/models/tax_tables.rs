//! Rate tables used by the estimator.
//!
//! [`TaxTables::us_federal_2024`] returns the compiled-in simplified federal
//! schedule. Callers that need different figures can assemble their own
//! tables with [`TaxTables::new`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use thiserror::Error;

use super::{FilingStatus, StandardDeductionTable, TaxBracket, TaxBracketSchedule};

static SINGLE_BRACKETS_2024: [TaxBracket; 7] = [
    TaxBracket::bounded(dec!(10275), dec!(0.10)),
    TaxBracket::bounded(dec!(41775), dec!(0.12)),
    TaxBracket::bounded(dec!(89075), dec!(0.22)),
    TaxBracket::bounded(dec!(170050), dec!(0.24)),
    TaxBracket::bounded(dec!(215950), dec!(0.32)),
    TaxBracket::bounded(dec!(539900), dec!(0.35)),
    TaxBracket::unbounded(dec!(0.37)),
];

static MARRIED_BRACKETS_2024: [TaxBracket; 7] = [
    TaxBracket::bounded(dec!(20550), dec!(0.10)),
    TaxBracket::bounded(dec!(83550), dec!(0.12)),
    TaxBracket::bounded(dec!(178150), dec!(0.22)),
    TaxBracket::bounded(dec!(340100), dec!(0.24)),
    TaxBracket::bounded(dec!(431900), dec!(0.32)),
    TaxBracket::bounded(dec!(647850), dec!(0.35)),
    TaxBracket::unbounded(dec!(0.37)),
];

const STANDARD_DEDUCTIONS_2024: StandardDeductionTable = StandardDeductionTable {
    single: dec!(13850),
    married: dec!(27700),
};

/// Combined employer and employee payroll rate (FICA).
pub const SELF_EMPLOYMENT_TAX_RATE: Decimal = dec!(0.153);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxTableError {
    #[error("standard deduction for {filing_status} must be non-negative, got {amount}")]
    NegativeStandardDeduction {
        filing_status: FilingStatus,
        amount: Decimal,
    },

    #[error("self-employment tax rate must be between 0 and 1, got {0}")]
    InvalidSelfEmploymentRate(Decimal),
}

/// Bracket schedules, standard deductions and the self-employment rate
/// for one tax year. Every filing status has an entry, so lookups cannot
/// fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxTables {
    tax_year: i32,
    single: TaxBracketSchedule,
    married: TaxBracketSchedule,
    standard_deductions: StandardDeductionTable,
    self_employment_tax_rate: Decimal,
}

impl TaxTables {
    /// Assembles custom tables.
    ///
    /// # Errors
    ///
    /// Returns [`TaxTableError`] if a standard deduction is negative or the
    /// self-employment rate is outside `0..=1`.
    pub fn new(
        tax_year: i32,
        single: TaxBracketSchedule,
        married: TaxBracketSchedule,
        standard_deductions: StandardDeductionTable,
        self_employment_tax_rate: Decimal,
    ) -> Result<Self, TaxTableError> {
        for &filing_status in FilingStatus::all() {
            let amount = standard_deductions.amount(filing_status);
            if amount < Decimal::ZERO {
                return Err(TaxTableError::NegativeStandardDeduction {
                    filing_status,
                    amount,
                });
            }
        }
        if self_employment_tax_rate < Decimal::ZERO || self_employment_tax_rate > Decimal::ONE {
            return Err(TaxTableError::InvalidSelfEmploymentRate(
                self_employment_tax_rate,
            ));
        }

        Ok(Self {
            tax_year,
            single,
            married,
            standard_deductions,
            self_employment_tax_rate,
        })
    }

    /// The simplified 2024 federal tables.
    pub fn us_federal_2024() -> Self {
        Self {
            tax_year: 2024,
            single: TaxBracketSchedule::from_static(&SINGLE_BRACKETS_2024),
            married: TaxBracketSchedule::from_static(&MARRIED_BRACKETS_2024),
            standard_deductions: STANDARD_DEDUCTIONS_2024,
            self_employment_tax_rate: SELF_EMPLOYMENT_TAX_RATE,
        }
    }

    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    pub fn schedule(
        &self,
        filing_status: FilingStatus,
    ) -> &TaxBracketSchedule {
        match filing_status {
            FilingStatus::Single => &self.single,
            FilingStatus::Married => &self.married,
        }
    }

    pub fn standard_deduction(
        &self,
        filing_status: FilingStatus,
    ) -> Decimal {
        self.standard_deductions.amount(filing_status)
    }

    pub fn self_employment_tax_rate(&self) -> Decimal {
        self.self_employment_tax_rate
    }
}

impl Default for TaxTables {
    fn default() -> Self {
        Self::us_federal_2024()
    }
}
