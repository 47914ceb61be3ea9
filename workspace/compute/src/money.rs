//! The single entry point through which amounts enter the system.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{ComputeError, Result};

/// Stored amounts are `DECIMAL(12, 2)`.
pub const AMOUNT_SCALE: u32 = 2;
pub const AMOUNT_INTEGER_DIGITS: u32 = 10;

/// Parses a non-negative decimal amount such as `"1234.50"`.
///
/// Surrounding whitespace and `,` thousands separators are accepted.
/// Anything else that is not a plain decimal number is a
/// [`ComputeError::Parse`]; a negative value, more than two decimal places
/// or more than ten integer digits is a [`ComputeError::InvalidInput`].
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    parse_amount_for("amount", raw)
}

/// [`parse_amount`] reporting failures against `field`.
pub fn parse_amount_for(field: &'static str, raw: &str) -> Result<Decimal> {
    let amount = parse_non_negative(field, raw)?;
    check_precision(field, amount)?;
    debug!(field, %amount, "Parsed amount");
    Ok(amount)
}

/// Parses a non-negative annual interest rate in percent, e.g. `"2.125"`.
/// Rates are not stored, so any precision is kept.
pub fn parse_rate(raw: &str) -> Result<Decimal> {
    parse_non_negative("annual_interest_rate", raw)
}

fn parse_non_negative(field: &'static str, raw: &str) -> Result<Decimal> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        warn!(field, "Empty amount");
        return Err(ComputeError::Parse(format!("{} is empty", field)));
    }

    let value = Decimal::from_str(&cleaned).map_err(|e| {
        warn!(field, raw, "Not a decimal number: {}", e);
        ComputeError::Parse(format!("'{}' is not a decimal {}", raw.trim(), field))
    })?;

    if value.is_sign_negative() && !value.is_zero() {
        warn!(field, %value, "Negative value rejected");
        return Err(ComputeError::invalid_input(field, "must not be negative"));
    }
    Ok(value)
}

/// Fails unless `value` fits a `DECIMAL(12, 2)` column.
pub fn check_precision(field: &'static str, value: Decimal) -> Result<()> {
    if value.normalize().scale() > AMOUNT_SCALE {
        warn!(%value, "Too many decimal places");
        return Err(ComputeError::invalid_input(
            field,
            format!("at most {} decimal places are allowed", AMOUNT_SCALE),
        ));
    }
    let limit = Decimal::from(10_i64.pow(AMOUNT_INTEGER_DIGITS));
    if value.abs() >= limit {
        warn!(%value, "Too many integer digits");
        return Err(ComputeError::invalid_input(
            field,
            format!("at most {} integer digits are allowed", AMOUNT_INTEGER_DIGITS),
        ));
    }
    Ok(())
}

/// Sums `amounts`, failing instead of overflowing.
pub(crate) fn checked_total(
    field: &'static str,
    amounts: impl IntoIterator<Item = Decimal>,
) -> Result<Decimal> {
    amounts.into_iter().try_fold(Decimal::ZERO, |acc, amount| {
        acc.checked_add(amount)
            .ok_or_else(|| ComputeError::invalid_input(field, "total overflows"))
    })
}

/// `part / whole * 100`, failing instead of overflowing.
pub(crate) fn percent_of(field: &'static str, part: Decimal, whole: Decimal) -> Result<Decimal> {
    if whole.is_zero() {
        return Err(ComputeError::DivisionByZero(format!("{} of a zero total", field)));
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| ComputeError::invalid_input(field, "percentage overflows"))
}
