//! Engine configuration
//!
//! Tunables for allocation and recommendations. Defaults match the
//! planning policy; every value can be overridden from the environment.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::env;
use std::str::FromStr;
use tracing::warn;

pub const ENV_TRANCHE_CAP: &str = "GOAL_ENGINE_TRANCHE_CAP";
pub const ENV_MAX_FUNDED_GOALS: &str = "GOAL_ENGINE_MAX_FUNDED_GOALS";
pub const ENV_HIGH_PRIORITY_WINDOW_DAYS: &str = "GOAL_ENGINE_HIGH_PRIORITY_WINDOW_DAYS";
pub const ENV_PREPAYMENT_MATERIALITY: &str = "GOAL_ENGINE_PREPAYMENT_MATERIALITY";
pub const ENV_DEBT_STRESS_RATIO: &str = "GOAL_ENGINE_DEBT_STRESS_RATIO";
pub const ENV_STRICT_VALIDATION: &str = "GOAL_ENGINE_STRICT_VALIDATION";

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Largest amount a single goal receives in one allocation pass
    pub tranche_cap: Decimal,
    /// How many goals one allocation pass may fund
    pub max_funded_goals: usize,
    /// Goals due within this many days are high priority
    pub high_priority_window_days: i64,
    /// Minimum interest saving worth a prepayment recommendation
    pub prepayment_materiality: Decimal,
    /// EMI-to-monthly-income ratio above which debt stress is flagged
    pub debt_stress_ratio: Decimal,
    /// Reject suspect goal/surplus input instead of only logging it
    pub strict_validation: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tranche_cap: dec!(50000),
            max_funded_goals: 5,
            high_priority_window_days: 365,
            prepayment_materiality: dec!(10000),
            debt_stress_ratio: dec!(0.40),
            strict_validation: false,
        }
    }
}

impl EngineConfig {
    /// Build from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            tranche_cap: env_or(ENV_TRANCHE_CAP, defaults.tranche_cap),
            max_funded_goals: env_or(ENV_MAX_FUNDED_GOALS, defaults.max_funded_goals),
            high_priority_window_days: env_or(
                ENV_HIGH_PRIORITY_WINDOW_DAYS,
                defaults.high_priority_window_days,
            ),
            prepayment_materiality: env_or(
                ENV_PREPAYMENT_MATERIALITY,
                defaults.prepayment_materiality,
            ),
            debt_stress_ratio: env_or(ENV_DEBT_STRESS_RATIO, defaults.debt_stress_ratio),
            strict_validation: env_or(ENV_STRICT_VALIDATION, defaults.strict_validation),
        }
    }
}

fn env_or<T: FromStr + Copy + std::fmt::Debug>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(key, value = %raw, fallback = ?default, "Unparseable config value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.tranche_cap, dec!(50000));
        assert_eq!(config.max_funded_goals, 5);
        assert!(!config.strict_validation);
    }

    #[test]
    fn test_env_override_and_fallback() {
        // Keys unique to this test so parallel tests do not interfere.
        env::set_var(ENV_TRANCHE_CAP, "75000");
        env::set_var(ENV_MAX_FUNDED_GOALS, "not-a-number");

        let config = EngineConfig::from_env();
        assert_eq!(config.tranche_cap, dec!(75000));
        assert_eq!(config.max_funded_goals, 5);

        env::remove_var(ENV_TRANCHE_CAP);
        env::remove_var(ENV_MAX_FUNDED_GOALS);
    }
}
