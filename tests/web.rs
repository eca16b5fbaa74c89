// Browser-side checks of the JS-facing Engine, including the error paths that
// need a real JsValue. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use pricing_core::{Engine, PricingOutcome};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn invalid_config_is_rejected() {
    let err = Engine::new("{ not json").err().expect("Should reject malformed config");
    let message = err.as_string().unwrap_or_default();
    assert!(message.starts_with("Invalid config"));
}

#[wasm_bindgen_test]
fn unpriceable_rates_surface_as_error() {
    let engine = Engine::new("{}").expect("Should parse valid config");
    let request = r#"{
        "mode": "standard",
        "inputs": {
            "product_cost": 100,
            "desired_markup": 0.5,
            "manual_commission_rate_override": 0.99
        }
    }"#;

    let err = engine.calculate(request).err().expect("Should reject rates");
    let message = err.as_string().unwrap_or_default();
    assert!(message.contains("Invalid rate configuration"));
}

#[wasm_bindgen_test]
fn unknown_platform_surfaces_as_error() {
    let engine = Engine::new("{}").expect("Should parse valid config");
    let form = r#"{ "mode": "standard", "product_cost": "100", "platform": "ebay" }"#;

    let err = engine.calculate_form(form).err().expect("Should reject platform");
    assert!(err.as_string().unwrap_or_default().contains("ebay"));
}

#[wasm_bindgen_test]
fn shopee_free_shipping_in_browser() {
    let engine = Engine::new("{}").expect("Should parse valid config");
    let form = r#"{
        "mode": "standard",
        "product_cost": "100",
        "margin_percent": "50",
        "platform": "shopee",
        "seller_type": "cnpj",
        "free_shipping": true
    }"#;

    let output = engine.calculate_form(form).expect("Should calculate");
    let outcome: PricingOutcome = serde_json::from_str(&output).expect("Should parse output");
    match outcome {
        PricingOutcome::Standard { result } => {
            // 20% commission with free shipping, 2% transaction fee, fixed fee 4.
            let expected = 154.0 / 0.78;
            assert!((result.recommended_price - expected).abs() < 1e-6);
        }
        _ => panic!("expected a standard outcome"),
    }
}

#[wasm_bindgen_test]
fn quick_estimate_rejects_negative_cost() {
    let engine = Engine::new("{}").expect("Should parse valid config");
    let err = engine.quick_estimate(-10.0, 50.0).err().expect("Should reject cost");
    assert!(err.as_string().unwrap_or_default().contains("product_cost"));
}
