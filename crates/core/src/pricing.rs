use rust_decimal::Decimal;
use seatlock_types::money;

/// `total_price = Σ (event.base_price × seat.price_modifier)`, rounded once
/// at the sum.
pub fn price_seats(base_price: Decimal, price_modifiers: &[Decimal]) -> Decimal {
    money::total_price(base_price, price_modifiers)
}

/// Per-seat price recorded on each booking-seat row, unrounded until summed
/// with its siblings by `price_seats`.
pub fn price_seat(base_price: Decimal, price_modifier: Decimal) -> Decimal {
    money::round_money(base_price * price_modifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn single_seat_matches_base_price_times_modifier() {
        let total = price_seats(d("50.00"), &[d("1.5")]);
        assert_eq!(total, d("75.00"));
    }

    #[test]
    fn multiple_seats_sum_before_rounding() {
        // 3 seats at base 33.333 with modifier 1 each: raw sum 99.999,
        // which must round to 100.00 rather than 3 * round(33.33) = 99.99.
        let total = price_seats(d("33.333"), &[d("1"), d("1"), d("1")]);
        assert_eq!(total, d("100.00"));
    }

    #[test]
    fn price_modifiers_below_one_discount_the_seat() {
        let premium = price_seat(d("80.00"), d("1.25"));
        let discount = price_seat(d("80.00"), d("0.5"));
        assert_eq!(premium, d("100.00"));
        assert_eq!(discount, d("40.00"));
    }
}
