//! Text rendering for results and schedules.

use rust_decimal::{Decimal, RoundingStrategy};
use tax_core::calculations::common::{as_percent, round_half_up};
use tax_core::{FilingStatus, TaxResult, TaxTables};

/// Formats an amount as dollars with thousands separators and two decimals.
///
/// Negative amounts keep the sign after the dollar symbol: `$-1,234.50`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    format!("${sign}{}.{cents}", group_thousands(whole))
}

fn group_thousands(whole: &str) -> String {
    let mut out = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats a fractional rate as a percentage with at most two decimals.
pub fn format_rate(rate: Decimal) -> String {
    let percent = as_percent(rate)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    format!("{percent}%")
}

/// The two-line result shown after every calculation.
pub fn render_summary(result: &TaxResult) -> String {
    format!(
        "Total Tax: {}\nTake-Home Pay: {}",
        format_currency(result.total_tax),
        format_currency(result.take_home_pay)
    )
}

fn line(
    label: &str,
    value: String,
) -> String {
    format!("{label:<24}{value:>16}")
}

/// Worksheet view: every intermediate amount plus one line per band.
pub fn render_breakdown(result: &TaxResult) -> String {
    let mut lines = vec![
        line("Adjusted income", format_currency(result.adjusted_income)),
        line("Standard deduction", format_currency(result.standard_deduction)),
        line("Taxable income", format_currency(result.taxable_income)),
    ];

    for band in &result.bands {
        let range = match band.upper_bound {
            Some(upper) => format!(
                "{} to {}",
                format_currency(band.lower_bound),
                format_currency(upper)
            ),
            None => format!("{} and up", format_currency(band.lower_bound)),
        };
        lines.push(format!(
            "  {:>4} of {} ({range}) = {}",
            format_rate(band.rate),
            format_currency(band.taxed_amount),
            format_currency(band.tax)
        ));
    }

    lines.extend([
        line("Income tax", format_currency(result.income_tax)),
        line("Self-employment tax", format_currency(result.self_employment_tax)),
        line("Total tax", format_currency(result.total_tax)),
        line("Take-home pay", format_currency(result.take_home_pay)),
        line("Marginal rate", format_rate(result.marginal_rate)),
        line("Effective rate", format_rate(result.effective_rate())),
    ]);

    lines.join("\n")
}

/// Bracket schedule and deductions for one filing status.
pub fn render_schedule(
    tables: &TaxTables,
    filing_status: FilingStatus,
) -> String {
    let mut lines = vec![
        format!("{} ({})", filing_status.label(), tables.tax_year()),
        line(
            "Standard deduction",
            format_currency(tables.standard_deduction(filing_status)),
        ),
        line(
            "Self-employment rate",
            format_rate(tables.self_employment_tax_rate()),
        ),
    ];

    for (lower, bracket) in tables.schedule(filing_status).bands() {
        let range = match bracket.upper_limit {
            Some(upper) => format!("{} to {}", format_currency(lower), format_currency(upper)),
            None => format!("{} and up", format_currency(lower)),
        };
        lines.push(format!("  {range:<30}{:>6}", format_rate(bracket.rate)));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::{IncomeType, TaxInput, estimate};

    // -----------------------------------------------------------------------
    // format_currency
    // -----------------------------------------------------------------------

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(dec!(45867.5)), "$45,867.50");
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(100)), "$100.00");
        assert_eq!(format_currency(dec!(0)), "$0.00");
    }

    #[test]
    fn format_currency_rounds_half_up() {
        assert_eq!(format_currency(dec!(999.995)), "$1,000.00");
    }

    #[test]
    fn format_currency_negative_sign_after_symbol() {
        assert_eq!(format_currency(dec!(-1234.5)), "$-1,234.50");
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
    }

    // -----------------------------------------------------------------------
    // format_rate
    // -----------------------------------------------------------------------

    #[test]
    fn format_rate_trims_and_rounds() {
        assert_eq!(format_rate(dec!(0.12)), "12%");
        assert_eq!(format_rate(dec!(0.153)), "15.3%");
        assert_eq!(format_rate(dec!(0.08265)), "8.27%");
    }

    // -----------------------------------------------------------------------
    // render_*
    // -----------------------------------------------------------------------

    #[test]
    fn render_summary_matches_form_output() {
        let result = estimate(&TaxInput::new(
            dec!(50000),
            FilingStatus::Single,
            IncomeType::W2Employee,
        ));

        assert_eq!(
            render_summary(&result),
            "Total Tax: $4,132.50\nTake-Home Pay: $45,867.50"
        );
    }

    #[test]
    fn render_breakdown_lists_bands_and_rates() {
        let result = estimate(&TaxInput::new(
            dec!(50000),
            FilingStatus::Single,
            IncomeType::W2Employee,
        ));

        let text = render_breakdown(&result);

        assert!(text.contains("$10,275.00 to $41,775.00"));
        assert!(text.contains("= $3,105.00"));
        assert!(text.lines().any(|l| l.starts_with("Taxable income") && l.ends_with("$36,150.00")));
        assert!(text.lines().any(|l| l.starts_with("Effective rate") && l.ends_with("8.27%")));
    }

    #[test]
    fn render_schedule_shows_open_top_band() {
        let tables = TaxTables::us_federal_2024();

        let text = render_schedule(&tables, FilingStatus::Married);

        assert!(text.starts_with("Married (2024)"));
        assert!(text.contains("$27,700.00"));
        assert!(text.contains("15.3%"));
        assert!(text.lines().last().is_some_and(|l| l.contains("$647,850.00 and up") && l.ends_with("37%")));
    }
}
