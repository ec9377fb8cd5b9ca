use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub booking: BookingRules,
    #[serde(default)]
    pub coach: CoachLayout,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingRules {
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    #[serde(default = "default_max_seats")]
    pub max_seats: usize,
    #[serde(default = "default_max_passengers")]
    pub max_passengers: usize,
    /// Simulated gateway latency
    #[serde(default = "default_payment_delay_ms")]
    pub payment_delay_ms: u64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CoachLayout {
    #[serde(default = "default_rows")]
    pub rows: u32,
    #[serde(default = "default_cols")]
    pub cols: u32,
    /// Probability that a generated seat is still open
    #[serde(default = "default_available_ratio")]
    pub available_ratio: f64,
}

fn default_tax_rate() -> f64 { 0.05 }
fn default_max_seats() -> usize { 6 }
fn default_max_passengers() -> usize { 6 }
fn default_payment_delay_ms() -> u64 { 2000 }
fn default_currency() -> String { "INR".to_string() }
fn default_rows() -> u32 { 20 }
fn default_cols() -> u32 { 6 }
fn default_available_ratio() -> f64 { 0.4 }

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
            max_seats: default_max_seats(),
            max_passengers: default_max_passengers(),
            payment_delay_ms: default_payment_delay_ms(),
            currency: default_currency(),
        }
    }
}

impl Default for CoachLayout {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            available_ratio: default_available_ratio(),
        }
    }
}

/// Upper bound on seats per generated coach
pub const MAX_COACH_SEATS: u32 = 1_000;

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `RAIL_BOOKING__TAX_RATE=0.12`
            .add_source(
                config::Environment::with_prefix("RAIL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let rules = &self.booking;
        if !rules.tax_rate.is_finite() || rules.tax_rate < 0.0 {
            return Err(config::ConfigError::Message(format!(
                "booking.tax_rate must be a non-negative number, got {}",
                rules.tax_rate
            )));
        }
        if rules.max_seats == 0 || rules.max_passengers == 0 {
            return Err(config::ConfigError::Message(
                "booking.max_seats and booking.max_passengers must be at least 1".to_string(),
            ));
        }
        if self.coach.rows == 0 || self.coach.cols == 0 {
            return Err(config::ConfigError::Message(
                "coach.rows and coach.cols must be at least 1".to_string(),
            ));
        }
        if self.coach.rows.saturating_mul(self.coach.cols) > MAX_COACH_SEATS {
            return Err(config::ConfigError::Message(format!(
                "coach.rows x coach.cols must be at most {} seats, got {}x{}",
                MAX_COACH_SEATS, self.coach.rows, self.coach.cols
            )));
        }
        if !(0.0..=1.0).contains(&self.coach.available_ratio) {
            return Err(config::ConfigError::Message(format!(
                "coach.available_ratio must be within 0..=1, got {}",
                self.coach.available_ratio
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_booking_rules() {
        let config = Config::default();
        assert_eq!(config.booking.tax_rate, 0.05);
        assert_eq!(config.booking.max_seats, 6);
        assert_eq!(config.booking.max_passengers, 6);
        assert_eq!(config.booking.payment_delay_ms, 2000);
        assert_eq!(config.coach.rows, 20);
        assert_eq!(config.coach.cols, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_source_fills_defaults() {
        let s = config::Config::builder()
            .set_override("booking.tax_rate", 0.12)
            .unwrap()
            .build()
            .unwrap();
        let config: Config = s.try_deserialize().unwrap();

        assert_eq!(config.booking.tax_rate, 0.12);
        assert_eq!(config.booking.max_seats, 6);
        assert_eq!(config.coach.cols, 6);
    }

    #[test]
    fn test_rejects_negative_tax_rate() {
        let mut config = Config::default();
        config.booking.tax_rate = -0.01;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.coach.available_ratio = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_coach() {
        let mut config = Config::default();
        config.coach.rows = u32::MAX;
        config.coach.cols = 2;
        assert!(config.validate().is_err());

        config.coach.rows = 100;
        config.coach.cols = 10;
        assert!(config.validate().is_ok());
        config.coach.cols = 11;
        assert!(config.validate().is_err());
    }
}
