use rust_decimal::Decimal;
use thiserror::Error;

/// Why an amount field was rejected.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AmountErrorKind {
    #[error("a value is required")]
    Missing,

    #[error(transparent)]
    Malformed(#[from] rust_decimal::Error),
}

/// Error returned when an amount field does not hold a number.
#[derive(Debug, Clone, Error)]
#[error("{field}: '{input}' is not a valid amount")]
pub struct ParseAmountError {
    pub field: &'static str,
    pub input: String,
    #[source]
    pub kind: AmountErrorKind,
}

/// Trims whitespace and drops a leading `$` and any `,` thousands separators.
fn normalize_amount_input(s: &str) -> String {
    let trimmed = s.trim();
    let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed);
    unsigned.trim_start().replace(',', "")
}

/// Plain decimal first, then exponent notation such as `5e4`.
fn parse_decimal(normalized: &str) -> Result<Decimal, rust_decimal::Error> {
    normalized.parse::<Decimal>().or_else(|e| {
        if normalized.contains(['e', 'E']) {
            Decimal::from_scientific(normalized).map_err(|_| e)
        } else {
            Err(e)
        }
    })
}

fn reject(
    field: &'static str,
    s: &str,
    kind: AmountErrorKind,
) -> ParseAmountError {
    tracing::warn!(field, input = %s, "invalid amount: {}", kind);
    ParseAmountError {
        field,
        input: s.to_string(),
        kind,
    }
}

/// Parses the text of the amount field named `field` into a [`Decimal`].
///
/// Accepts `"1,234.56"`, `"$1,234.56"` and `"5e4"`. Empty or
/// whitespace-only input is treated as 0; use [`parse_required_amount`]
/// for fields that must be filled in.
pub fn parse_amount(
    field: &'static str,
    s: &str,
) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    parse_decimal(&normalized).map_err(|e| reject(field, s, e.into()))
}

/// Like [`parse_amount`], but empty input is an error.
pub fn parse_required_amount(
    field: &'static str,
    s: &str,
) -> Result<Decimal, ParseAmountError> {
    if normalize_amount_input(s).is_empty() {
        return Err(reject(field, s, AmountErrorKind::Missing));
    }
    parse_amount(field, s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_amount_accepts_comma_thousands_separator() {
        assert_eq!(parse_amount("income", "50,000").unwrap(), dec!(50000));
        assert_eq!(
            parse_amount("income", "1,234,567.89").unwrap(),
            dec!(1234567.89)
        );
    }

    #[test]
    fn parse_amount_accepts_dollar_sign() {
        assert_eq!(parse_amount("income", "$ 1,200.50").unwrap(), dec!(1200.50));
    }

    #[test]
    fn parse_amount_trims_whitespace() {
        assert_eq!(parse_amount("deductions", "  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_amount_accepts_exponent_notation() {
        assert_eq!(parse_amount("income", "5e4").unwrap(), dec!(50000));
        assert_eq!(parse_amount("income", "1.5E3").unwrap(), dec!(1500));
        assert_eq!(parse_amount("income", "2.5e-1").unwrap(), dec!(0.25));
    }

    #[test]
    fn parse_amount_rejects_bad_exponent() {
        let err = parse_amount("income", "5e").unwrap_err();

        assert!(matches!(err.kind, AmountErrorKind::Malformed(_)));
    }

    #[test]
    fn parse_amount_empty_treated_as_zero() {
        assert_eq!(parse_amount("deductions", "").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("deductions", "   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_required_amount_rejects_empty() {
        for text in ["", "   ", "$"] {
            let err = parse_required_amount("income", text).unwrap_err();

            assert_eq!(err.field, "income");
            assert_eq!(err.kind, AmountErrorKind::Missing);
        }
    }

    #[test]
    fn parse_required_amount_accepts_filled_field() {
        assert_eq!(parse_required_amount("income", "$50,000").unwrap(), dec!(50000));
    }

    #[test]
    fn parse_amount_invalid_reports_field() {
        let err = parse_amount("employee salaries", "abc").unwrap_err();

        assert_eq!(err.field, "employee salaries");
        assert_eq!(err.input, "abc");
        assert_eq!(
            err.to_string(),
            "employee salaries: 'abc' is not a valid amount"
        );
    }
}
