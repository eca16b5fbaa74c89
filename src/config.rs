// Engine configuration passed from JS as JSON. Every field has a default,
// so "{}" yields the built-in marketplace presets.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::platform::{default_profiles, PlatformFeeProfile, DEFAULT_TRANSACTION_FEE_RATE};
use crate::scenario::{CALCULATOR_MARGINS, STANDARD_MARGINS};
use crate::types::Rate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Marketplace presets, selectable by id.
    #[serde(default = "default_profiles")]
    pub profiles: Vec<PlatformFeeProfile>,
    /// Transaction fee used alongside a manual commission override.
    #[serde(default = "default_transaction_fee_rate")]
    pub default_transaction_fee_rate: Rate,
    /// Candidate margins (percent of cost) for the result table.
    #[serde(default = "default_standard_margins")]
    pub standard_margins: Vec<f64>,
    /// Candidate margins for the full calculator view.
    #[serde(default = "default_calculator_margins")]
    pub calculator_margins: Vec<f64>,
    /// Round every amount to cents before returning it.
    #[serde(default)]
    pub round_output: bool,
}

fn default_transaction_fee_rate() -> Rate {
    DEFAULT_TRANSACTION_FEE_RATE
}

fn default_standard_margins() -> Vec<f64> {
    STANDARD_MARGINS.to_vec()
}

fn default_calculator_margins() -> Vec<f64> {
    CALCULATOR_MARGINS.to_vec()
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            profiles: default_profiles(),
            default_transaction_fee_rate: default_transaction_fee_rate(),
            standard_margins: default_standard_margins(),
            calculator_margins: default_calculator_margins(),
            round_output: false,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, PricingError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PricingError> {
        let mut seen = HashSet::new();
        for profile in &self.profiles {
            if profile.id.is_empty() {
                return Err(PricingError::InvalidConfig(
                    "profile id must not be empty".to_string(),
                ));
            }
            if !seen.insert(profile.id.as_str()) {
                return Err(PricingError::InvalidConfig(format!(
                    "duplicate profile id: {}",
                    profile.id
                )));
            }
            profile.validate()?;
        }

        self.default_transaction_fee_rate
            .validate("default_transaction_fee_rate")?;

        for margin in self.standard_margins.iter().chain(&self.calculator_margins) {
            if !margin.is_finite() || *margin < 0.0 {
                return Err(PricingError::InvalidConfig(format!(
                    "scenario margin must be a non-negative number, got {}",
                    margin
                )));
            }
        }
        Ok(())
    }
}
