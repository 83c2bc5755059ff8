//! Federal income tax and take-home pay estimate.
//!
//! # Calculation
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Adjusted income: income − deductions − employee salaries, minimum 0 |
//! | 2    | Taxable income: adjusted income − standard deduction, minimum 0 |
//! | 3    | Income tax: each band's rate applied to the slice of taxable income inside it |
//! | 4    | Self-employment tax: adjusted income × 15.3% (self-employed only) |
//! | 5    | Total tax: step 3 + step 4 |
//! | 6    | Take-home pay: adjusted income − total tax (may be negative) |
//!
//! The self-employment surcharge is charged on adjusted income, not taxable
//! income, so it is unaffected by the standard deduction.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{FilingStatus, IncomeType, TaxEstimator, TaxInput, TaxTables};
//!
//! let tables = TaxTables::us_federal_2024();
//! let estimator = TaxEstimator::new(&tables);
//!
//! let input = TaxInput::new(dec!(50000), FilingStatus::Single, IncomeType::SelfEmployed);
//! let result = estimator.estimate(&input);
//!
//! assert_eq!(result.taxable_income, dec!(36150));
//! assert_eq!(result.income_tax, dec!(4132.50));
//! assert_eq!(result.self_employment_tax, dec!(7650.00));
//! assert_eq!(result.total_tax, dec!(11782.50));
//! assert_eq!(result.take_home_pay, dec!(38217.50));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::floor_at_zero;
use crate::{BandTax, IncomeType, TaxBracketSchedule, TaxInput, TaxResult, TaxTables};

/// Estimates tax using the built-in 2024 tables.
pub fn estimate(input: &TaxInput) -> TaxResult {
    let tables = TaxTables::us_federal_2024();
    TaxEstimator::new(&tables).estimate(input)
}

/// Calculator bound to one set of [`TaxTables`].
///
/// Holds no state between calls; the same estimator can serve any number of
/// inputs.
#[derive(Debug, Clone, Copy)]
pub struct TaxEstimator<'a> {
    tables: &'a TaxTables,
}

impl<'a> TaxEstimator<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'a TaxTables {
        self.tables
    }

    /// Runs the full calculation for `input`.
    ///
    /// Every filing status has a schedule and a standard deduction, so this
    /// cannot fail. Zero incomes and deductions larger than income produce a
    /// zero result rather than an error.
    pub fn estimate(
        &self,
        input: &TaxInput,
    ) -> TaxResult {
        let adjusted_income = self.adjusted_income(
            input.income,
            input.deductions,
            input.employee_salaries,
        );

        let standard_deduction = self.tables.standard_deduction(input.filing_status);
        let taxable_income = self.taxable_income(adjusted_income, standard_deduction);

        let schedule = self.tables.schedule(input.filing_status);
        let (bands, marginal_rate) = self.bracket_tax(schedule, taxable_income);
        let income_tax = bands.iter().map(|band| band.tax).sum::<Decimal>();

        let self_employment_tax = self.self_employment_tax(adjusted_income, input.income_type);
        let total_tax = income_tax + self_employment_tax;
        let take_home_pay = adjusted_income - total_tax;

        debug!(
            filing_status = %input.filing_status,
            income_type = %input.income_type,
            %adjusted_income,
            %taxable_income,
            %income_tax,
            %self_employment_tax,
            %take_home_pay,
            "estimated tax"
        );

        TaxResult {
            adjusted_income,
            standard_deduction,
            taxable_income,
            income_tax,
            self_employment_tax,
            total_tax,
            take_home_pay,
            marginal_rate,
            bands,
        }
    }

    /// Income less deductions and employee salaries, never negative.
    ///
    /// Saturates at the `Decimal` range so a negative deduction on a huge
    /// income cannot overflow.
    fn adjusted_income(
        &self,
        income: Decimal,
        deductions: Decimal,
        employee_salaries: Decimal,
    ) -> Decimal {
        floor_at_zero(
            income
                .saturating_sub(deductions)
                .saturating_sub(employee_salaries),
        )
    }

    fn taxable_income(
        &self,
        adjusted_income: Decimal,
        standard_deduction: Decimal,
    ) -> Decimal {
        floor_at_zero(adjusted_income - standard_deduction)
    }

    /// Walks the bands from the bottom, taxing each full band the income
    /// clears and stopping in the band that contains it.
    ///
    /// Returns the per-band taxes and the rate of the band where the walk
    /// stopped.
    fn bracket_tax(
        &self,
        schedule: &TaxBracketSchedule,
        taxable_income: Decimal,
    ) -> (Vec<BandTax>, Decimal) {
        let mut bands = Vec::new();
        let mut previous_limit = Decimal::ZERO;
        let mut marginal_rate = Decimal::ZERO;

        for bracket in schedule.brackets() {
            marginal_rate = bracket.rate;
            match bracket.upper_limit {
                Some(limit) if taxable_income > limit => {
                    let taxed_amount = limit - previous_limit;
                    bands.push(BandTax {
                        lower_bound: previous_limit,
                        upper_bound: Some(limit),
                        rate: bracket.rate,
                        taxed_amount,
                        tax: taxed_amount * bracket.rate,
                    });
                    previous_limit = limit;
                }
                _ => {
                    let taxed_amount = taxable_income - previous_limit;
                    bands.push(BandTax {
                        lower_bound: previous_limit,
                        upper_bound: bracket.upper_limit,
                        rate: bracket.rate,
                        taxed_amount,
                        tax: taxed_amount * bracket.rate,
                    });
                    break;
                }
            }
        }

        (bands, marginal_rate)
    }

    fn self_employment_tax(
        &self,
        adjusted_income: Decimal,
        income_type: IncomeType,
    ) -> Decimal {
        if income_type.is_self_employed() {
            adjusted_income * self.tables.self_employment_tax_rate()
        } else {
            Decimal::ZERO
        }
    }
}
