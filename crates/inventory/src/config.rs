//! Degradation configuration.
//!
//! Values come from JSON (serde) or from the process environment. Missing
//! fields fall back to the conventional defaults.

use serde::{Deserialize, Serialize};

use shelflife_core::{DomainError, DomainResult};

use crate::degradation::{DEFAULT_STANDARD_DEGRADATION_AMOUNT, DegradationPolicy};
use crate::policy::{DEFAULT_QUALITY_CEILING, QualityPolicy};

pub const ENV_STANDARD_DEGRADATION_AMOUNT: &str = "SHELFLIFE_STANDARD_DEGRADATION_AMOUNT";
pub const ENV_QUALITY_CEILING: &str = "SHELFLIFE_QUALITY_CEILING";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DegradationConfig {
    pub standard_degradation_amount: i64,
    pub quality_ceiling: i64,
}

impl Default for DegradationConfig {
    fn default() -> Self {
        Self {
            standard_degradation_amount: DEFAULT_STANDARD_DEGRADATION_AMOUNT,
            quality_ceiling: DEFAULT_QUALITY_CEILING,
        }
    }
}

impl DegradationConfig {
    /// The ceiling must be positive and `1 <= |amount| <= ceiling`.
    pub fn validate(&self) -> DomainResult<()> {
        if self.quality_ceiling <= 0 {
            return Err(DomainError::validation("quality_ceiling must be positive"));
        }
        if self.standard_degradation_amount == 0 {
            return Err(DomainError::validation(
                "standard_degradation_amount cannot be zero (use a preserved policy)",
            ));
        }
        if !amount_within_ceiling(self.standard_degradation_amount, self.quality_ceiling) {
            return Err(DomainError::validation(format!(
                "standard_degradation_amount {} exceeds quality_ceiling {}",
                self.standard_degradation_amount, self.quality_ceiling
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("invalid degradation config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Unset keys use the default. Values that do not parse, or that fail
    /// validation, are logged and replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str, default: i64, valid: &dyn Fn(i64) -> bool| -> i64 {
            let Some(raw) = lookup(key) else {
                return default;
            };
            match raw.trim().parse::<i64>() {
                Ok(value) if valid(value) => value,
                _ => {
                    tracing::warn!(key, value = %raw, default, "invalid config value; using default");
                    default
                }
            }
        };

        let quality_ceiling = read(
            ENV_QUALITY_CEILING,
            defaults.quality_ceiling,
            &|v: i64| v > 0,
        );
        let standard_degradation_amount = read(
            ENV_STANDARD_DEGRADATION_AMOUNT,
            defaults.standard_degradation_amount,
            &|v: i64| v != 0 && amount_within_ceiling(v, quality_ceiling),
        );

        Self {
            standard_degradation_amount,
            quality_ceiling,
        }
    }

    pub fn degradation_policy(&self) -> DegradationPolicy {
        DegradationPolicy::new(self.standard_degradation_amount)
    }

    pub fn standard_policy(&self) -> QualityPolicy {
        QualityPolicy::standard(self.degradation_policy())
    }

    /// Improving policy that gains the configured amount per tick.
    pub fn improving_policy(&self) -> QualityPolicy {
        QualityPolicy::improving(self.standard_degradation_amount, self.quality_ceiling)
    }
}

fn amount_within_ceiling(amount: i64, ceiling: i64) -> bool {
    ceiling > 0 && amount.unsigned_abs() <= ceiling.unsigned_abs()
}
