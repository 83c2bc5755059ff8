use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FilingStatus, IncomeType};

/// Everything the estimator needs for one calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInput {
    /// Gross income for the period.
    pub income: Decimal,
    pub filing_status: FilingStatus,
    pub income_type: IncomeType,
    /// Subtracted from income before any tax is computed.
    pub deductions: Decimal,
    /// Wages paid to others by the filer's business.
    pub employee_salaries: Decimal,
}

impl TaxInput {
    /// A filer with no deductions and no employees.
    pub fn new(
        income: Decimal,
        filing_status: FilingStatus,
        income_type: IncomeType,
    ) -> Self {
        Self {
            income,
            filing_status,
            income_type,
            ..Default::default()
        }
    }
}
