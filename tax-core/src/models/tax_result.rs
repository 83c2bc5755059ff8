use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tax owed on the slice of taxable income that fell inside one band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandTax {
    pub lower_bound: Decimal,
    /// `None` for the open-ended top band.
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
    pub taxed_amount: Decimal,
    pub tax: Decimal,
}

/// Outcome of a single estimate.
///
/// Amounts are exact; round only for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Income less deductions and employee salaries, floored at zero.
    pub adjusted_income: Decimal,
    pub standard_deduction: Decimal,
    pub taxable_income: Decimal,
    /// Progressive bracket tax.
    pub income_tax: Decimal,
    pub self_employment_tax: Decimal,
    pub total_tax: Decimal,
    /// Adjusted income less total tax. Not floored, so it can go negative.
    pub take_home_pay: Decimal,
    /// Rate of the band in which the bracket walk stopped.
    pub marginal_rate: Decimal,
    pub bands: Vec<BandTax>,
}

impl TaxResult {
    /// Share of adjusted income paid as tax; zero when there is no income.
    pub fn effective_rate(&self) -> Decimal {
        if self.adjusted_income.is_zero() {
            Decimal::ZERO
        } else {
            self.total_tax / self.adjusted_income
        }
    }
}
