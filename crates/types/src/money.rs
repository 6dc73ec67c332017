//! Fixed-point money helpers. Rounding happens once at the summed total,
//! never per line item, using round-half-to-even.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to 2 decimal places using banker's rounding (round-half-to-even),
/// matching `rust_decimal`'s `MidpointNearestEven` strategy.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Sum per-seat prices (`base_price * seat.price_modifier` for each seat)
/// and round once at the sum, not per-term.
pub fn total_price(base_price: Decimal, price_modifiers: &[Decimal]) -> Decimal {
    let sum: Decimal = price_modifiers.iter().map(|m| base_price * m).sum();
    round_money(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(round_money(d("10.125")), d("10.12"));
        assert_eq!(round_money(d("10.135")), d("10.14"));
    }

    #[test]
    fn sums_then_rounds_once() {
        let base = d("33.333");
        let modifiers = [d("1"), d("1"), d("1")];
        // 3 * 33.333 = 99.999, rounded once -> 100.00
        assert_eq!(total_price(base, &modifiers), d("100.00"));
    }
}
