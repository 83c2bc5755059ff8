//! Command handlers.
//!
//! Each handler writes its output to the supplied writer so the binary can
//! hand in stdout and tests can hand in a buffer.

use std::io::{BufRead, Write};

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::calculations::common::round_half_up;
use tax_core::{FilingStatus, IncomeType, TaxBracket, TaxEstimator, TaxInput, TaxResult, TaxTables};
use tracing::{debug, info};

use crate::cli::{BatchArgs, BracketsArgs, Cli, Command, EstimateArgs, FormArgs, OutputFormat};
use crate::csv_loader;
use crate::display::{format_currency, render_breakdown, render_schedule, render_summary};
use crate::session::Session;

/// Dispatches the parsed command line.
pub fn run(
    cli: &Cli,
    input: impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    let tables = TaxTables::us_federal_2024();
    let estimator = TaxEstimator::new(&tables);

    match &cli.command {
        Command::Estimate(args) => run_estimate(args, estimator, output),
        Command::Form(args) => run_form(args, estimator, input, output),
        Command::Batch(args) => run_batch(args, estimator, output),
        Command::Brackets(args) => run_brackets(args, &tables, output),
    }
}

pub fn run_estimate(
    args: &EstimateArgs,
    estimator: TaxEstimator<'_>,
    output: &mut impl Write,
) -> Result<()> {
    let input = args.to_form().submit()?;
    debug!(?input, "estimate requested");
    let result = estimator.estimate(&input);

    match args.format {
        OutputFormat::Text => {
            writeln!(output, "{}", render_summary(&result))?;
            if args.breakdown {
                writeln!(output, "\n{}", render_breakdown(&result))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *output, &Estimate::new(&input, &result))?;
            writeln!(output)?;
        }
        OutputFormat::Csv => write_csv(output, &[(input, result)])?,
    }
    Ok(())
}

pub fn run_form(
    args: &FormArgs,
    estimator: TaxEstimator<'_>,
    input: impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    Session::new(input, output, estimator, args.breakdown).run()?;
    Ok(())
}

pub fn run_batch(
    args: &BatchArgs,
    estimator: TaxEstimator<'_>,
    output: &mut impl Write,
) -> Result<()> {
    let inputs = csv_loader::load_from_file(&args.file)?;
    info!(rows = inputs.len(), file = %args.file.display(), "running batch");

    let estimates: Vec<(TaxInput, TaxResult)> = inputs
        .into_iter()
        .map(|input| {
            let result = estimator.estimate(&input);
            (input, result)
        })
        .collect();

    match args.format {
        OutputFormat::Text => write_table(output, &estimates)?,
        OutputFormat::Json => {
            let rows: Vec<Estimate<'_>> = estimates
                .iter()
                .map(|(input, result)| Estimate::new(input, result))
                .collect();
            serde_json::to_writer_pretty(&mut *output, &rows)?;
            writeln!(output)?;
        }
        OutputFormat::Csv => write_csv(output, &estimates)?,
    }
    Ok(())
}

pub fn run_brackets(
    args: &BracketsArgs,
    tables: &TaxTables,
    output: &mut impl Write,
) -> Result<()> {
    let statuses: Vec<FilingStatus> = match args.filing_status {
        Some(status) => vec![status],
        None => FilingStatus::all().to_vec(),
    };

    match args.format {
        OutputFormat::Text => {
            let blocks: Vec<String> = statuses
                .iter()
                .map(|&status| render_schedule(tables, status))
                .collect();
            writeln!(output, "{}", blocks.join("\n\n"))?;
        }
        OutputFormat::Json => {
            let schedules: Vec<Schedule<'_>> = statuses
                .iter()
                .map(|&status| Schedule::new(tables, status))
                .collect();
            serde_json::to_writer_pretty(&mut *output, &schedules)?;
            writeln!(output)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *output);
            for &status in &statuses {
                for (lower, bracket) in tables.schedule(status).bands() {
                    writer.serialize(BandRow {
                        filing_status: status,
                        lower_bound: lower,
                        upper_bound: bracket.upper_limit,
                        rate: bracket.rate,
                    })?;
                }
            }
            writer.flush()?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Output shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct Estimate<'a> {
    input: &'a TaxInput,
    result: &'a TaxResult,
}

impl<'a> Estimate<'a> {
    fn new(
        input: &'a TaxInput,
        result: &'a TaxResult,
    ) -> Self {
        Self { input, result }
    }
}

#[derive(Debug, Serialize)]
struct Schedule<'a> {
    tax_year: i32,
    filing_status: FilingStatus,
    standard_deduction: Decimal,
    self_employment_tax_rate: Decimal,
    brackets: &'a [TaxBracket],
}

impl<'a> Schedule<'a> {
    fn new(
        tables: &'a TaxTables,
        filing_status: FilingStatus,
    ) -> Self {
        Self {
            tax_year: tables.tax_year(),
            filing_status,
            standard_deduction: tables.standard_deduction(filing_status),
            self_employment_tax_rate: tables.self_employment_tax_rate(),
            brackets: tables.schedule(filing_status).brackets(),
        }
    }
}

#[derive(Debug, Serialize)]
struct BandRow {
    filing_status: FilingStatus,
    lower_bound: Decimal,
    upper_bound: Option<Decimal>,
    rate: Decimal,
}

/// One flat CSV line per calculation, amounts rounded to cents.
#[derive(Debug, Serialize)]
struct ResultRow {
    income: Decimal,
    filing_status: FilingStatus,
    income_type: IncomeType,
    deductions: Decimal,
    employee_salaries: Decimal,
    adjusted_income: Decimal,
    taxable_income: Decimal,
    income_tax: Decimal,
    self_employment_tax: Decimal,
    total_tax: Decimal,
    take_home_pay: Decimal,
}

impl ResultRow {
    fn new(
        input: &TaxInput,
        result: &TaxResult,
    ) -> Self {
        Self {
            income: input.income,
            filing_status: input.filing_status,
            income_type: input.income_type,
            deductions: input.deductions,
            employee_salaries: input.employee_salaries,
            adjusted_income: round_half_up(result.adjusted_income),
            taxable_income: round_half_up(result.taxable_income),
            income_tax: round_half_up(result.income_tax),
            self_employment_tax: round_half_up(result.self_employment_tax),
            total_tax: round_half_up(result.total_tax),
            take_home_pay: round_half_up(result.take_home_pay),
        }
    }
}

fn write_csv(
    output: &mut impl Write,
    estimates: &[(TaxInput, TaxResult)],
) -> Result<()> {
    let mut writer = csv::Writer::from_writer(output);
    for (input, result) in estimates {
        writer.serialize(ResultRow::new(input, result))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_table(
    output: &mut impl Write,
    estimates: &[(TaxInput, TaxResult)],
) -> Result<()> {
    writeln!(
        output,
        "{:>4}  {:<8} {:<14}{:>16}{:>16}{:>16}",
        "Row", "Status", "Income Type", "Income", "Total Tax", "Take-Home Pay"
    )?;
    for (idx, (input, result)) in estimates.iter().enumerate() {
        writeln!(
            output,
            "{:>4}  {:<8} {:<14}{:>16}{:>16}{:>16}",
            idx + 1,
            input.filing_status.as_str(),
            input.income_type.as_str(),
            format_currency(input.income),
            format_currency(result.total_tax),
            format_currency(result.take_home_pay)
        )?;
    }
    Ok(())
}
