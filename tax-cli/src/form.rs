//! The calculator form: raw field text in, [`TaxInput`] out.

use rust_decimal::Decimal;
use tax_core::{FilingStatus, IncomeType, TaxInput};
use thiserror::Error;

use crate::utils::{ParseAmountError, parse_amount, parse_required_amount};

/// Notice shown whenever any amount field fails to parse.
pub const INVALID_INPUT_MESSAGE: &str =
    "Please enter valid numbers for income, deductions, and employee salaries.";

/// One or more amount fields could not be parsed.
#[derive(Debug, Error)]
#[error("Invalid Input: {}", INVALID_INPUT_MESSAGE)]
pub struct FormError {
    pub fields: Vec<ParseAmountError>,
}

impl FormError {
    /// The notice followed by one line per offending field.
    pub fn details(&self) -> String {
        let mut out = self.to_string();
        for field in &self.fields {
            out.push_str("\n  ");
            out.push_str(&field.to_string());
        }
        out
    }
}

/// Field values as typed by the user.
///
/// Selections are already enumerations; only the amounts are free text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxForm {
    pub income: String,
    pub filing_status: FilingStatus,
    pub income_type: IncomeType,
    pub deductions: String,
    pub employee_salaries: String,
}

impl TaxForm {
    /// Parses every amount field and builds the estimator input.
    ///
    /// Income must be filled in; blank deductions and salaries count as 0.
    /// All fields are checked so the error lists every bad value, not just
    /// the first.
    pub fn submit(&self) -> Result<TaxInput, FormError> {
        let mut fields = Vec::new();

        let mut amount = |parsed: Result<Decimal, ParseAmountError>| {
            parsed.map_err(|e| fields.push(e)).unwrap_or_default()
        };
        let income = amount(parse_required_amount("income", &self.income));
        let deductions = amount(parse_amount("deductions", &self.deductions));
        let employee_salaries = amount(parse_amount(
            "employee salaries",
            &self.employee_salaries,
        ));

        if !fields.is_empty() {
            return Err(FormError { fields });
        }

        Ok(TaxInput {
            income,
            filing_status: self.filing_status,
            income_type: self.income_type,
            deductions,
            employee_salaries,
        })
    }
}
