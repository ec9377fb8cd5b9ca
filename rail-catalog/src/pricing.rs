use rail_core::app_config::BookingRules;
use rail_core::{BookingError, BookingResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TAX_RATE: f64 = 0.05;

/// Price breakdown shown in the booking summary. Amounts are whole
/// currency units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FareBreakdown {
    pub price_per_seat: i64,
    pub seat_count: usize,
    pub base_fare: i64,
    pub tax: i64,
    pub total: i64,
}

pub fn compute_base_fare(price_per_seat: i64, seat_count: usize) -> BookingResult<i64> {
    if price_per_seat < 0 {
        return Err(BookingError::InvalidArgument(format!(
            "price per seat must not be negative, got {}",
            price_per_seat
        )));
    }
    i64::try_from(seat_count)
        .ok()
        .and_then(|count| price_per_seat.checked_mul(count))
        .ok_or_else(|| BookingError::InvalidArgument("base fare overflows".to_string()))
}

pub fn compute_tax(base_fare: i64, rate: f64) -> BookingResult<i64> {
    check_base_fare(base_fare)?;
    check_rate(rate)?;
    Ok(round_half_up(base_fare as f64 * rate))
}

pub fn compute_total(base_fare: i64, rate: f64) -> BookingResult<i64> {
    check_base_fare(base_fare)?;
    check_rate(rate)?;
    Ok(round_half_up(base_fare as f64 * (1.0 + rate)))
}

/// Inputs are non-negative, so `f64::round` (half away from zero) is
/// round-half-up here.
fn round_half_up(amount: f64) -> i64 {
    amount.round() as i64
}

fn check_base_fare(base_fare: i64) -> BookingResult<()> {
    if base_fare < 0 {
        return Err(BookingError::InvalidArgument(format!(
            "base fare must not be negative, got {}",
            base_fare
        )));
    }
    Ok(())
}

fn check_rate(rate: f64) -> BookingResult<()> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(BookingError::InvalidArgument(format!(
            "tax rate must be a non-negative number, got {}",
            rate
        )));
    }
    Ok(())
}

/// Fare calculator bound to a tax rate
#[derive(Debug, Clone, Copy)]
pub struct FareCalculator {
    tax_rate: f64,
}

impl Default for FareCalculator {
    fn default() -> Self {
        Self { tax_rate: DEFAULT_TAX_RATE }
    }
}

impl FareCalculator {
    pub fn new(tax_rate: f64) -> BookingResult<Self> {
        check_rate(tax_rate)?;
        Ok(Self { tax_rate })
    }

    pub fn from_rules(rules: &BookingRules) -> BookingResult<Self> {
        Self::new(rules.tax_rate)
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    pub fn base_fare(&self, price_per_seat: i64, seat_count: usize) -> BookingResult<i64> {
        compute_base_fare(price_per_seat, seat_count)
    }

    pub fn tax(&self, base_fare: i64) -> BookingResult<i64> {
        compute_tax(base_fare, self.tax_rate)
    }

    pub fn total(&self, base_fare: i64) -> BookingResult<i64> {
        compute_total(base_fare, self.tax_rate)
    }

    /// Total is rounded from the base fare directly, so `base_fare + tax`
    /// can differ from `total` by one unit on half-way amounts.
    pub fn breakdown(&self, price_per_seat: i64, seat_count: usize) -> BookingResult<FareBreakdown> {
        let base_fare = self.base_fare(price_per_seat, seat_count)?;
        Ok(FareBreakdown {
            price_per_seat,
            seat_count,
            base_fare,
            tax: self.tax(base_fare)?,
            total: self.total(base_fare)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_two_third_ac_seats() {
        let calculator = FareCalculator::default();
        let fare = calculator.breakdown(1400, 2).unwrap();

        assert_eq!(fare.base_fare, 2800);
        assert_eq!(fare.tax, 140);
        assert_eq!(fare.total, 2940);
    }

    #[test]
    fn test_zero_seats_is_zero_fare() {
        let fare = FareCalculator::default().breakdown(1400, 0).unwrap();
        assert_eq!(fare.base_fare, 0);
        assert_eq!(fare.tax, 0);
        assert_eq!(fare.total, 0);
    }

    #[test]
    fn test_rounds_half_up() {
        // 10 * 0.05 = 0.5
        assert_eq!(compute_tax(10, 0.05).unwrap(), 1);
        // 2200 * 1.05 = 2310
        assert_eq!(compute_total(2200, 0.05).unwrap(), 2310);
        assert_eq!(compute_tax(29, 0.05).unwrap(), 1);
    }

    #[test]
    fn test_negative_inputs_rejected() {
        assert!(matches!(compute_base_fare(-1, 2), Err(BookingError::InvalidArgument(_))));
        assert!(matches!(compute_tax(-100, 0.05), Err(BookingError::InvalidArgument(_))));
        assert!(matches!(compute_total(-100, 0.05), Err(BookingError::InvalidArgument(_))));
        assert!(FareCalculator::new(-0.05).is_err());
        assert!(FareCalculator::new(f64::NAN).is_err());
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(compute_base_fare(i64::MAX, 2).is_err());
    }

    proptest! {
        #[test]
        fn total_matches_rounded_fare_with_tax(price in 0i64..100_000, seats in 0usize..=6) {
            let calculator = FareCalculator::default();
            let base = calculator.base_fare(price, seats).unwrap();
            let expected = ((price * seats as i64) as f64 * 1.05).round() as i64;
            prop_assert_eq!(calculator.total(base).unwrap(), expected);
        }
    }
}
