use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FilingStatus;

/// Fixed standard deduction amount for each filing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardDeductionTable {
    pub single: Decimal,
    pub married: Decimal,
}

impl StandardDeductionTable {
    pub fn amount(
        &self,
        filing_status: FilingStatus,
    ) -> Decimal {
        match filing_status {
            FilingStatus::Single => self.single,
            FilingStatus::Married => self.married,
        }
    }
}
