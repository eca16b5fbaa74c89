// pricing_core: ProfitAI Rust/WASM pricing engine.
// All pricing arithmetic lives here; the JS side only renders what comes back.

mod config;
mod engine;
mod error;
mod form;
mod markup;
mod platform;
mod reverse;
mod scenario;
mod standard;
mod types;

use wasm_bindgen::prelude::*;

pub use config::EngineConfig;
pub use engine::{PricingEngine, PricingOutcome, PricingRequest, ScenarioList};
pub use error::PricingError;
pub use form::{parse_number, CostForm, FormRequest, FormValue, MarkupForm, ReverseForm};
pub use markup::{compute_markup_price, quick_estimate};
pub use platform::{
    default_profiles, resolve_fees, EntityFixedFees, PlatformFeeProfile, ResolvedFees,
    DEFAULT_TRANSACTION_FEE_RATE,
};
pub use reverse::compute_reverse_price;
pub use scenario::{build_scenario_table, CALCULATOR_MARGINS, STANDARD_MARGINS};
pub use standard::{compute_standard_price, price_with_fees};
pub use types::*;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Engine interface exposed to JavaScript. JSON in, JSON out.
#[wasm_bindgen]
pub struct Engine {
    inner: PricingEngine,
}

#[wasm_bindgen]
impl Engine {
    /// Build an engine from a JSON `EngineConfig`. `"{}"` selects the built-in presets.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<Engine, JsValue> {
        let inner = PricingEngine::from_json(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        Ok(Engine { inner })
    }

    /// Run a mode-tagged `PricingRequest` and return the `PricingOutcome` as JSON.
    ///
    /// # Example request
    /// ```json
    /// {
    ///   "mode": "standard",
    ///   "inputs": { "product_cost": 100, "desired_markup": 0.5, "free_shipping_promotion": true },
    ///   "platform": "shopee",
    ///   "scenario": "calculator"
    /// }
    /// ```
    pub fn calculate(&self, request_json: &str) -> Result<String, JsValue> {
        self.inner
            .calculate_json(request_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Same as `calculate`, but from raw form strings (percent fields as typed).
    /// Unparseable numbers read as 0.
    pub fn calculate_form(&self, form_json: &str) -> Result<String, JsValue> {
        self.inner
            .calculate_form_json(form_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Configured marketplace profiles, as JSON, for the platform picker.
    pub fn platforms(&self) -> Result<String, JsValue> {
        self.inner
            .platforms_json()
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Cost plus markup, ignoring fees. Used by the canvas price card.
    pub fn quick_estimate(&self, product_cost: f64, markup_percent: f64) -> Result<f64, JsValue> {
        quick_estimate(product_cost, Markup::from_percent(markup_percent))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_creation_works() {
        let engine = Engine::new("{}");
        assert!(engine.is_ok());
    }

    #[test]
    fn engine_calculates_reference_scenario() {
        let engine = Engine::new(r#"{"round_output": true}"#).expect("Should parse valid config");
        let request = r#"{
            "mode": "standard",
            "inputs": { "product_cost": 100, "desired_markup": 0.5 },
            "platform": "shopee",
            "scenario": "disabled"
        }"#;

        let output = engine.calculate(request).expect("Should calculate");
        let outcome: PricingOutcome = serde_json::from_str(&output).expect("Should parse output");
        match outcome {
            PricingOutcome::Standard { result } => {
                assert_eq!(result.recommended_price, 186.9);
                assert!(result.scenario_table.is_empty());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn engine_calculates_reverse_form() {
        let engine = Engine::new("{}").expect("Should parse valid config");
        let form = r#"{
            "mode": "reverse",
            "target_price": "99.90",
            "desired_margin_percent": "25",
            "tax_percent": "18",
            "shipping_cost": "0"
        }"#;

        let output = engine.calculate_form(form).expect("Should calculate");
        let outcome: PricingOutcome = serde_json::from_str(&output).expect("Should parse output");
        match outcome {
            PricingOutcome::Reverse { result } => {
                assert!((result.max_allowable_cost - 56.943).abs() < 1e-9);
                assert!(result.is_viable);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn engine_lists_platforms() {
        let engine = Engine::new("{}").expect("Should parse valid config");
        let json = engine.platforms().expect("Should serialize");
        assert!(json.contains("mercadolivre"));
    }

    #[test]
    fn engine_quick_estimate() {
        let engine = Engine::new("{}").expect("Should parse valid config");
        let estimate = engine.quick_estimate(40.0, 50.0).expect("Should estimate");
        assert!((estimate - 60.0).abs() < 1e-9);
    }

    // Error paths build a JsValue, which is only available on wasm32; see tests/web.rs.
}
