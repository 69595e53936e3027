//! Conversions between the annual/hourly units shown in the setup form and
//! the weekly units the simulation service runs on.
//!
//! All functions are pure and total over finite inputs; callers screen out
//! blank or non-numeric fields before converting.

pub const HOURS_PER_WEEK: f64 = 40.0;
pub const WEEKS_PER_YEAR: f64 = 52.0;

pub fn percent_to_decimal(percent: f64) -> f64 {
    percent / 100.0
}

pub fn decimal_to_percent(decimal: f64) -> f64 {
    decimal * 100.0
}

/// Weekly compounding rate whose 52-fold compounding reproduces the given
/// annual percentage rate.
pub fn annual_percent_to_weekly_decimal(percent: f64) -> f64 {
    (1.0 + percent / 100.0).powf(1.0 / WEEKS_PER_YEAR) - 1.0
}

pub fn weekly_decimal_to_annual_percent(weekly: f64) -> f64 {
    ((1.0 + weekly).powi(52) - 1.0) * 100.0
}

pub fn hourly_wage_to_weekly(hourly: f64) -> f64 {
    hourly * HOURS_PER_WEEK
}

pub fn weekly_wage_to_hourly(weekly: f64) -> f64 {
    weekly / HOURS_PER_WEEK
}

pub fn annual_salary_to_weekly(annual: f64) -> f64 {
    annual / WEEKS_PER_YEAR
}

pub fn weekly_wage_to_annual(weekly: f64) -> f64 {
    weekly * WEEKS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < TOLERANCE,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn percent_round_trips() {
        for value in [-3.0, 0.0, 0.01, 8.25, 100.0] {
            assert_close(decimal_to_percent(percent_to_decimal(value)), value);
        }
    }

    #[test]
    fn annual_rate_round_trips_through_weekly_compounding() {
        for value in [-1.5, 0.0, 0.1, 2.0, 21.0, 95.0] {
            assert_close(
                weekly_decimal_to_annual_percent(annual_percent_to_weekly_decimal(value)),
                value,
            );
        }
    }

    #[test]
    fn weekly_compounding_reproduces_annual_growth() {
        let weekly = annual_percent_to_weekly_decimal(2.0);
        assert_close((1.0 + weekly).powi(52), 1.02);
    }

    #[test]
    fn wage_round_trips() {
        for value in [0.0, 7.25, 16.0, 41.5] {
            assert_close(weekly_wage_to_hourly(hourly_wage_to_weekly(value)), value);
        }
    }

    #[test]
    fn salary_round_trips() {
        for value in [0.0, 28_000.0, 61_999.99, 140_000.0] {
            assert_close(weekly_wage_to_annual(annual_salary_to_weekly(value)), value);
        }
    }
}
