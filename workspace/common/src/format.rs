//! Display formatting. Amounts are shown in whole New Taiwan dollars.

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{iso, Formatter, Money, Params, Position};

/// Formats an amount as whole TWD with thousands separators, e.g.
/// `NT$22,478`.
pub fn format_twd(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        // no "-NT$0"
        rounded = Decimal::ZERO;
    }
    let money = Money::from_decimal(rounded, iso::TWD);
    Formatter::money(
        &money,
        Params {
            digit_separator: ',',
            exponent_separator: '.',
            separator_pattern: vec![3; 8],
            rounding: Some(0),
            symbol: Some("NT$"),
            positions: vec![Position::Sign, Position::Symbol, Position::Amount],
            ..Default::default()
        },
    )
}

/// Formats a percentage with two decimals, e.g. `24.98%`.
pub fn format_percent(value: Decimal) -> String {
    format!(
        "{:.2}%",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}
