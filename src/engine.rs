// Config-bound pricing engine. Callers state the mode explicitly, so cost-based
// markups and price-based margins never get mixed.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::PricingError;
use crate::form::FormRequest;
use crate::markup::compute_markup_price;
use crate::platform::{resolve_fees, PlatformFeeProfile, ResolvedFees};
use crate::reverse::compute_reverse_price;
use crate::scenario::scenario_rows;
use crate::standard::price_with_fees;
use crate::types::{
    CalculationResult, CostInputs, MarkupInputs, MarkupResult, ReverseInputs, ReverseResult,
};

/// Which candidate margin list feeds the scenario table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioList {
    #[default]
    Standard,
    Calculator,
    Custom(Vec<f64>),
    Disabled,
}

/// A pricing request, tagged by mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PricingRequest {
    /// Price from cost; margin is a fraction of product cost.
    Standard {
        inputs: CostInputs,
        /// Profile id. Optional only when a manual commission override is set.
        #[serde(default)]
        platform: Option<String>,
        #[serde(default)]
        scenario: ScenarioList,
    },
    /// Max cost from a target price; margin is a fraction of that price.
    Reverse { inputs: ReverseInputs },
    /// Markup on cost with a flat tax estimate.
    Markup { inputs: MarkupInputs },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PricingOutcome {
    Standard { result: CalculationResult },
    Reverse { result: ReverseResult },
    Markup { result: MarkupResult },
}

impl PricingOutcome {
    pub fn rounded(&self) -> Self {
        match self {
            PricingOutcome::Standard { result } => PricingOutcome::Standard {
                result: result.rounded(),
            },
            PricingOutcome::Reverse { result } => PricingOutcome::Reverse {
                result: result.rounded(),
            },
            PricingOutcome::Markup { result } => PricingOutcome::Markup {
                result: result.rounded(),
            },
        }
    }
}

/// Pricing engine bound to a validated configuration. Immutable and stateless
/// between calls.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: EngineConfig,
}

impl PricingEngine {
    pub fn new(config: EngineConfig) -> Result<Self, PricingError> {
        config.validate()?;
        Ok(PricingEngine { config })
    }

    pub fn from_json(config_json: &str) -> Result<Self, PricingError> {
        Ok(PricingEngine {
            config: EngineConfig::from_json(config_json)?,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn platforms(&self) -> &[PlatformFeeProfile] {
        &self.config.profiles
    }

    pub fn profile(&self, id: &str) -> Result<&PlatformFeeProfile, PricingError> {
        self.config
            .profiles
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| PricingError::UnknownPlatform(id.to_string()))
    }

    /// Effective fees for `inputs`. The manual override wins over any platform.
    pub fn resolve(
        &self,
        inputs: &CostInputs,
        platform: Option<&str>,
    ) -> Result<ResolvedFees, PricingError> {
        let manual_transaction_rate = self.config.default_transaction_fee_rate;
        if let Some(rate) = inputs.manual_commission_rate_override {
            return Ok(ResolvedFees::manual(rate, manual_transaction_rate));
        }

        let id = platform.ok_or_else(|| {
            PricingError::InvalidConfig(
                "a platform is required without a manual commission rate".to_string(),
            )
        })?;
        Ok(resolve_fees(inputs, self.profile(id)?, manual_transaction_rate))
    }

    fn margins<'a>(&'a self, scenario: &'a ScenarioList) -> &'a [f64] {
        match scenario {
            ScenarioList::Standard => self.config.standard_margins.as_slice(),
            ScenarioList::Calculator => self.config.calculator_margins.as_slice(),
            ScenarioList::Custom(margins) => margins.as_slice(),
            ScenarioList::Disabled => &[],
        }
    }

    pub fn standard_price(
        &self,
        inputs: &CostInputs,
        platform: Option<&str>,
        scenario: &ScenarioList,
    ) -> Result<CalculationResult, PricingError> {
        let fees = self.resolve(inputs, platform)?;
        let mut result = price_with_fees(inputs, &fees)?;
        result.scenario_table = scenario_rows(inputs, &fees, self.margins(scenario))?;
        Ok(result)
    }

    pub fn reverse_price(&self, inputs: &ReverseInputs) -> Result<ReverseResult, PricingError> {
        compute_reverse_price(inputs)
    }

    pub fn markup_price(&self, inputs: &MarkupInputs) -> Result<MarkupResult, PricingError> {
        compute_markup_price(inputs)
    }

    /// Dispatch a request by mode. Amounts are rounded only when configured to.
    pub fn calculate(&self, request: &PricingRequest) -> Result<PricingOutcome, PricingError> {
        let outcome = match request {
            PricingRequest::Standard {
                inputs,
                platform,
                scenario,
            } => PricingOutcome::Standard {
                result: self.standard_price(inputs, platform.as_deref(), scenario)?,
            },
            PricingRequest::Reverse { inputs } => PricingOutcome::Reverse {
                result: self.reverse_price(inputs)?,
            },
            PricingRequest::Markup { inputs } => PricingOutcome::Markup {
                result: self.markup_price(inputs)?,
            },
        };

        if self.config.round_output {
            Ok(outcome.rounded())
        } else {
            Ok(outcome)
        }
    }

    /// JSON-in/JSON-out form of [`PricingEngine::calculate`].
    pub fn calculate_json(&self, request_json: &str) -> Result<String, PricingError> {
        let request: PricingRequest = serde_json::from_str(request_json)?;
        let outcome = self.calculate(&request)?;
        Ok(serde_json::to_string(&outcome)?)
    }

    /// Calculate from raw form fields, parsed permissively.
    pub fn calculate_form_json(&self, form_json: &str) -> Result<String, PricingError> {
        let form: FormRequest = serde_json::from_str(form_json)?;
        let outcome = self.calculate(&form.to_request())?;
        Ok(serde_json::to_string(&outcome)?)
    }

    pub fn platforms_json(&self) -> Result<String, PricingError> {
        Ok(serde_json::to_string(self.platforms())?)
    }
}
