//! Interactive prompt session.
//!
//! Asks for each field in turn, prints the summary, and starts over until
//! the input runs out. A bad amount shows the invalid-input notice and
//! drops that attempt; an unknown selection is asked again.

use std::io::{BufRead, Write};

use anyhow::Result;
use tax_core::{FilingStatus, IncomeType, TaxEstimator};
use tracing::{debug, info};

use crate::display::{render_breakdown, render_summary};
use crate::form::TaxForm;

/// Outcome of one pass through the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Calculated,
    Rejected,
}

pub struct Session<'a, R, W> {
    input: R,
    output: W,
    estimator: TaxEstimator<'a>,
    breakdown: bool,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        input: R,
        output: W,
        estimator: TaxEstimator<'a>,
        breakdown: bool,
    ) -> Self {
        Self {
            input,
            output,
            estimator,
            breakdown,
        }
    }

    /// Runs attempts until end of input. Returns every attempt's outcome.
    pub fn run(&mut self) -> Result<Vec<Attempt>> {
        writeln!(
            self.output,
            "{} US Tax Calculator",
            self.estimator.tables().tax_year()
        )?;

        let mut attempts = Vec::new();
        while let Some(form) = self.read_form()? {
            attempts.push(self.calculate(&form)?);
        }

        info!(attempts = attempts.len(), "form session finished");
        Ok(attempts)
    }

    fn calculate(
        &mut self,
        form: &TaxForm,
    ) -> Result<Attempt> {
        match form.submit() {
            Ok(input) => {
                let result = self.estimator.estimate(&input);
                writeln!(self.output, "{}", render_summary(&result))?;
                if self.breakdown {
                    writeln!(self.output, "{}", render_breakdown(&result))?;
                }
                writeln!(self.output)?;
                Ok(Attempt::Calculated)
            }
            Err(err) => {
                writeln!(self.output, "{}\n", err.details())?;
                Ok(Attempt::Rejected)
            }
        }
    }

    /// Collects one form's worth of answers; `None` once input is exhausted.
    fn read_form(&mut self) -> Result<Option<TaxForm>> {
        let Some(income) = self.prompt("Total Income (USD): ")? else {
            return Ok(None);
        };
        let Some(filing_status) = self.select(
            "Filing Status [single/married]",
            FilingStatus::default(),
            FilingStatus::parse,
        )?
        else {
            return Ok(None);
        };
        let Some(income_type) = self.select(
            "Income Type [w2/self_employed]",
            IncomeType::default(),
            IncomeType::parse,
        )?
        else {
            return Ok(None);
        };
        let Some(deductions) = self.prompt("Deductions (USD): ")? else {
            return Ok(None);
        };
        let Some(employee_salaries) = self.prompt("Employee Salaries (USD): ")? else {
            return Ok(None);
        };

        Ok(Some(TaxForm {
            income,
            filing_status,
            income_type,
            deductions,
            employee_salaries,
        }))
    }

    /// Asks until the answer parses; a blank answer takes `default`.
    fn select<T: std::fmt::Display + Copy>(
        &mut self,
        question: &str,
        default: T,
        parse: fn(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.prompt(&format!("{question} ({default}): "))? else {
                return Ok(None);
            };
            if answer.trim().is_empty() {
                return Ok(Some(default));
            }
            if let Some(value) = parse(&answer) {
                return Ok(Some(value));
            }
            debug!(answer = %answer.trim(), "unrecognised selection");
            writeln!(self.output, "'{}' is not one of the choices.", answer.trim())?;
        }
    }

    fn prompt(
        &mut self,
        question: &str,
    ) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tax_core::TaxTables;

    fn run_session(script: &str) -> (Vec<Attempt>, String) {
        let tables = TaxTables::us_federal_2024();
        let mut output = Vec::new();
        let attempts = Session::new(
            script.as_bytes(),
            &mut output,
            TaxEstimator::new(&tables),
            false,
        )
        .run()
        .unwrap();
        (attempts, String::from_utf8(output).unwrap())
    }

    #[test]
    fn session_prints_summary_for_each_form() {
        let (attempts, output) = run_session("50000\nsingle\nw2\n0\n0\n50000\n\nself_employed\n\n\n");

        assert_eq!(attempts, vec![Attempt::Calculated, Attempt::Calculated]);
        assert!(output.starts_with("2024 US Tax Calculator\n"));
        assert!(output.contains("Total Tax: $4,132.50\nTake-Home Pay: $45,867.50"));
        assert!(output.contains("Total Tax: $11,782.50\nTake-Home Pay: $38,217.50"));
    }

    #[test]
    fn session_rejects_bad_amount_and_continues() {
        let (attempts, output) = run_session("fifty\nsingle\nw2\n0\n0\n0\nmarried\nw2\n0\n0\n");

        assert_eq!(attempts, vec![Attempt::Rejected, Attempt::Calculated]);
        assert!(output.contains("Invalid Input: Please enter valid numbers"));
        assert!(output.contains("income: 'fifty' is not a valid amount"));
        assert!(output.contains("Total Tax: $0.00\nTake-Home Pay: $0.00"));
    }

    #[test]
    fn session_rejects_blank_income() {
        let (attempts, output) = run_session("\nsingle\nw2\n0\n0\n");

        assert_eq!(attempts, vec![Attempt::Rejected]);
        assert!(output.contains("Invalid Input: Please enter valid numbers"));
        assert!(output.contains("income: '' is not a valid amount"));
        assert!(!output.contains("Total Tax:"));
    }

    #[test]
    fn session_reasks_unknown_selection() {
        let (attempts, output) = run_session("50000\nwidowed\nsingle\nw2\n0\n0\n");

        assert_eq!(attempts, vec![Attempt::Calculated]);
        assert!(output.contains("'widowed' is not one of the choices."));
        assert_eq!(output.matches("Filing Status [single/married] (single): ").count(), 2);
    }

    #[test]
    fn session_ends_quietly_on_partial_form() {
        let (attempts, _) = run_session("50000\nsingle\n");

        assert!(attempts.is_empty());
    }
}
