//! Currency rounding and comparison helpers
//!
//! Every amount in the system is held at a scale of two. Sums are rounded
//! before they are compared, individual amounts never are.

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};

/// Number of decimal places in the canonical currency unit
pub const CURRENCY_SCALE: i64 = 2;

/// Round an amount to cents
pub fn round_currency(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale_round(CURRENCY_SCALE, RoundingMode::HalfEven)
}

/// Sum a sequence of amounts and round the total to cents
pub fn sum_rounded<'a, I>(amounts: I) -> BigDecimal
where
    I: IntoIterator<Item = &'a BigDecimal>,
{
    let total: BigDecimal = amounts.into_iter().sum();
    round_currency(&total)
}

/// Whether an amount rounds to exactly 0.00
pub fn is_zero_currency(amount: &BigDecimal) -> bool {
    round_currency(amount) == BigDecimal::from(0)
}

/// Convert an amount to whole cents
pub fn to_cents(amount: &BigDecimal) -> Option<i64> {
    (round_currency(amount) * BigDecimal::from(100)).to_i64()
}

/// Parse a monetary string, tolerating whitespace and thousands separators
pub fn parse_amount(raw: &str) -> Option<BigDecimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<BigDecimal>().ok()
}
