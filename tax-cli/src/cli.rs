use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tax_core::{FilingStatus, IncomeType};

use crate::form::TaxForm;
use crate::logging::LogConfig;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Simplified US federal income tax and take-home pay estimator.
///
/// Applies the 2024 progressive bracket schedule, the standard deduction for
/// the filing status and, for self-employed filers, the 15.3%
/// self-employment tax.
#[derive(Debug, Parser)]
#[command(name = "tax-estimator", version, about)]
pub struct Cli {
    /// Log filter (`warn`, `debug`, `tax_core=trace`, ...). Overrides RUST_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log lines to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            filter: self.log_level.clone(),
            file: self.log_file.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate tax for a single set of inputs.
    Estimate(EstimateArgs),
    /// Fill in the calculator form interactively.
    Form(FormArgs),
    /// Estimate every row of a CSV file.
    Batch(BatchArgs),
    /// Show the bracket schedule for a filing status.
    Brackets(BracketsArgs),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Args)]
pub struct EstimateArgs {
    /// Total income in USD, e.g. `50,000`.
    #[arg(long, allow_hyphen_values = true)]
    pub income: String,

    /// `single` or `married`.
    #[arg(long, default_value = "single")]
    pub filing_status: FilingStatus,

    /// `w2` or `self_employed`.
    #[arg(long, default_value = "w2")]
    pub income_type: IncomeType,

    /// Deductions in USD.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub deductions: String,

    /// Salaries paid to employees, in USD.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub employee_salaries: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print every intermediate amount (text format only).
    #[arg(long)]
    pub breakdown: bool,
}

impl EstimateArgs {
    pub fn to_form(&self) -> TaxForm {
        TaxForm {
            income: self.income.clone(),
            filing_status: self.filing_status,
            income_type: self.income_type,
            deductions: self.deductions.clone(),
            employee_salaries: self.employee_salaries.clone(),
        }
    }
}

#[derive(Debug, Args)]
pub struct FormArgs {
    /// Print every intermediate amount after each calculation.
    #[arg(long)]
    pub breakdown: bool,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// CSV file with `income`, `filing_status`, `income_type` and optional
    /// `deductions` / `employee_salaries` columns.
    #[arg(short, long)]
    pub file: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct BracketsArgs {
    /// Show only this filing status; both when omitted.
    #[arg(long)]
    pub filing_status: Option<FilingStatus>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
