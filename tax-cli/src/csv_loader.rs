//! CSV loader for batch estimate input.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does **not** matter.
//! Header names are case-sensitive. Whitespace around values is trimmed.
//!
//! | Column              | Required | Type    | Notes                                   |
//! |---------------------|----------|---------|-----------------------------------------|
//! | `income`            | yes      | amount  | e.g. `50000.00`, `"$50,000"`, `5e4`     |
//! | `filing_status`     | yes      | string  | `single` or `married`                   |
//! | `income_type`       | yes      | string  | `w2` or `self_employed`                 |
//! | `deductions`        | no       | amount  | Empty cell or missing column means 0    |
//! | `employee_salaries` | no       | amount  | Empty cell or missing column means 0    |
//!
//! Amount cells follow the same rules as the command line: `$` and `,`
//! thousands separators are allowed (quote cells containing commas).
//!
//! ### Example
//!
//! ```csv
//! income,filing_status,income_type,deductions,employee_salaries
//! 50000.00,single,w2,,
//! 50000.00,single,self_employed,,
//! 250000.00,married,self_employed,10000.00,90000.00
//! ```
use serde::Deserialize;
use tax_core::{FilingStatus, IncomeType, TaxInput};

use crate::utils::{ParseAmountError, parse_amount, parse_required_amount};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    income: String,
    filing_status: String,
    income_type: String,
    deductions: Option<String>,
    employee_salaries: Option<String>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A `filing_status` cell held an unknown value. `row` is 1-based,
    /// counting data rows only.
    #[error("unrecognised filing status '{status}' on row {row}")]
    InvalidFilingStatus { status: String, row: usize },

    /// An `income_type` cell held an unknown value.
    #[error("unrecognised income type '{income_type}' on row {row}")]
    InvalidIncomeType { income_type: String, row: usize },

    /// An amount cell was empty where required, or not a number.
    #[error("{source} on row {row}")]
    InvalidAmount {
        #[source]
        source: ParseAmountError,
        row: usize,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<TaxInput, CsvLoadError> {
    let filing_status = FilingStatus::parse(&row.filing_status).ok_or_else(|| {
        CsvLoadError::InvalidFilingStatus {
            status: row.filing_status.clone(),
            row: row_number,
        }
    })?;
    let income_type =
        IncomeType::parse(&row.income_type).ok_or_else(|| CsvLoadError::InvalidIncomeType {
            income_type: row.income_type.clone(),
            row: row_number,
        })?;

    let invalid_amount = |source| CsvLoadError::InvalidAmount {
        source,
        row: row_number,
    };
    let income = parse_required_amount("income", &row.income).map_err(invalid_amount)?;
    let deductions = parse_amount("deductions", row.deductions.as_deref().unwrap_or(""))
        .map_err(invalid_amount)?;
    let employee_salaries = parse_amount(
        "employee_salaries",
        row.employee_salaries.as_deref().unwrap_or(""),
    )
    .map_err(invalid_amount)?;

    Ok(TaxInput {
        income,
        filing_status,
        income_type,
        deductions,
        employee_salaries,
    })
}

/// Parses CSV text into estimator inputs, in file order.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [`CsvLoadError::InvalidFilingStatus`] / [`CsvLoadError::InvalidIncomeType`]
///   if a selection column holds an unknown value.
/// * [`CsvLoadError::InvalidAmount`] if `income` is blank or any amount cell
///   is not a number.
pub fn load_from_str(input: &str) -> Result<Vec<TaxInput>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Reads a file from disk and delegates to [`load_from_str`].
pub fn load_from_file(path: &std::path::Path) -> anyhow::Result<Vec<TaxInput>> {
    use anyhow::Context;

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let inputs = load_from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), rows = inputs.len(), "loaded batch input");
    Ok(inputs)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const MINIMAL_CSV: &str = "\
income,filing_status,income_type
50000.00,single,w2
";

    const MULTI_ROW_CSV: &str = "\
income,filing_status,income_type,deductions,employee_salaries
50000.00,single,w2,,
50000.00,single,self_employed,,
250000.00,married,self_employed,10000.00,90000.00
0,married,w2,,
";

    // -----------------------------------------------------------------------
    // 1. Minimal CSV – optional amounts default to zero
    // -----------------------------------------------------------------------
    #[test]
    fn test_minimal_csv_defaults_optional_amounts() {
        let inputs = load_from_str(MINIMAL_CSV).expect("should parse minimal CSV");

        assert_eq!(
            inputs,
            vec![TaxInput::new(
                dec!(50000.00),
                FilingStatus::Single,
                IncomeType::W2Employee
            )]
        );
    }

    // -----------------------------------------------------------------------
    // 2. Multiple rows – order and per-row values
    // -----------------------------------------------------------------------
    #[test]
    fn test_multi_row_order_and_values() {
        let inputs = load_from_str(MULTI_ROW_CSV).expect("should parse multi-row CSV");

        assert_eq!(inputs.len(), 4);
        assert_eq!(inputs[1].income_type, IncomeType::SelfEmployed);
        assert_eq!(inputs[2].filing_status, FilingStatus::Married);
        assert_eq!(inputs[2].deductions, dec!(10000.00));
        assert_eq!(inputs[2].employee_salaries, dec!(90000.00));
        assert_eq!(inputs[3].income, dec!(0));
    }

    // -----------------------------------------------------------------------
    // 3. Selection errors report the data row
    // -----------------------------------------------------------------------
    #[test]
    fn test_invalid_filing_status_reports_row() {
        let csv = "\
income,filing_status,income_type
1.00,single,w2
2.00,widowed,w2
";
        match load_from_str(csv).unwrap_err() {
            CsvLoadError::InvalidFilingStatus { status, row } => {
                assert_eq!(status, "widowed");
                assert_eq!(row, 2);
            }
            other => panic!("expected InvalidFilingStatus, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_income_type_reports_row() {
        let csv = "income,filing_status,income_type\n1.00,married,1099\n";

        match load_from_str(csv).unwrap_err() {
            CsvLoadError::InvalidIncomeType { income_type, row } => {
                assert_eq!(income_type, "1099");
                assert_eq!(row, 1);
            }
            other => panic!("expected InvalidIncomeType, got {:?}", other),
        }
    }

    // -----------------------------------------------------------------------
    // 4. Structural errors
    // -----------------------------------------------------------------------
    #[test]
    fn test_missing_required_column_returns_parse_error() {
        let csv = "filing_status,income_type\nsingle,w2\n";

        assert!(matches!(load_from_str(csv), Err(CsvLoadError::Parse(_))));
    }

    #[test]
    fn test_non_numeric_amount_reports_field_and_row() {
        let csv = "income,filing_status,income_type,deductions\n1.00,single,w2,\n2.00,single,w2,plenty\n";

        match load_from_str(csv).unwrap_err() {
            CsvLoadError::InvalidAmount { source, row } => {
                assert_eq!(source.field, "deductions");
                assert_eq!(source.input, "plenty");
                assert_eq!(row, 2);
            }
            other => panic!("expected InvalidAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_income_is_rejected() {
        let csv = "income,filing_status,income_type\n,single,w2\n";

        match load_from_str(csv).unwrap_err() {
            CsvLoadError::InvalidAmount { source, row } => {
                assert_eq!(source.field, "income");
                assert_eq!(row, 1);
            }
            other => panic!("expected InvalidAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_amount_cells_accept_currency_text() {
        let csv = "\
income,filing_status,income_type,deductions,employee_salaries
\"$50,000\",single,w2,\"$1,500.00\",5e3
";
        let inputs = load_from_str(csv).expect("currency text is a valid amount");

        assert_eq!(inputs[0].income, dec!(50000));
        assert_eq!(inputs[0].deductions, dec!(1500.00));
        assert_eq!(inputs[0].employee_salaries, dec!(5000));
    }

    #[test]
    fn test_header_only_returns_empty_vec() {
        let inputs = load_from_str("income,filing_status,income_type\n")
            .expect("header-only CSV is valid");

        assert!(inputs.is_empty());
    }

    // -----------------------------------------------------------------------
    // 5. Layout tolerance
    // -----------------------------------------------------------------------
    #[test]
    fn test_whitespace_and_column_order() {
        let csv = "\
 income_type , deductions , income , filing_status
 Self-Employed , 500 , 12000 , MARRIED
";
        let inputs = load_from_str(csv).expect("should tolerate whitespace and order");

        assert_eq!(inputs[0].income, dec!(12000));
        assert_eq!(inputs[0].deductions, dec!(500));
        assert_eq!(inputs[0].filing_status, FilingStatus::Married);
        assert_eq!(inputs[0].income_type, IncomeType::SelfEmployed);
    }
}
