// Permissive conversion of raw calculator form fields into typed inputs.
// Unparseable numeric fields read as 0 so the UI keeps recomputing while the user types;
// negative numbers pass through and are rejected by the engine.

use serde::{Deserialize, Serialize};

use crate::engine::{PricingRequest, ScenarioList};
use crate::types::{
    CostInputs, Markup, MarkupInputs, NetMargin, Rate, ReverseInputs, SellerEntityType,
};

/// Platform id the form sends when the manual commission field is filled in.
pub const MANUAL_PLATFORM: &str = "manual";

/// A form field as sent by JS: the raw input string, an already-numeric value, or
/// `null` (what `JSON.stringify` makes of a `NaN` from an empty number input).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(f64),
    Text(String),
    Empty,
}

impl Default for FormValue {
    fn default() -> Self {
        FormValue::Text(String::new())
    }
}

impl FormValue {
    /// Numeric value, or 0 when the field is empty or unparseable.
    pub fn amount(&self) -> f64 {
        self.parsed().unwrap_or(0.0)
    }

    /// Numeric value, or `None` when the field is empty or unparseable.
    pub fn parsed(&self) -> Option<f64> {
        match self {
            FormValue::Number(value) => Some(*value).filter(|v| v.is_finite()),
            FormValue::Text(raw) => parse_number_prefix(raw),
            FormValue::Empty => None,
        }
    }
}

impl From<&str> for FormValue {
    fn from(raw: &str) -> Self {
        FormValue::Text(raw.to_string())
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        FormValue::Number(value)
    }
}

/// Parse the longest numeric prefix of `raw`, like the browser's `parseFloat`.
/// "12.5kg" reads as 12.5, "12,50" as 12, "abc" as `None`.
pub fn parse_number_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < len && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            mantissa_digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < len && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `parseFloat(raw) || 0`.
pub fn parse_number(raw: &str) -> f64 {
    parse_number_prefix(raw).unwrap_or(0.0)
}

/// Standard calculator form. Percent fields are percents, as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CostForm {
    pub product_cost: FormValue,
    pub shipping_cost: FormValue,
    pub other_costs: FormValue,
    pub margin_percent: FormValue,
    pub platform: String,
    pub seller_type: String,
    pub free_shipping: bool,
    pub manual_tax_percent: FormValue,
    pub scenario: ScenarioList,
}

impl CostForm {
    /// A filled-in manual commission field overrides the selected platform.
    pub fn manual_commission_rate(&self) -> Option<Rate> {
        self.manual_tax_percent.parsed().map(Rate::from_percent)
    }

    pub fn seller_entity_type(&self) -> SellerEntityType {
        if self.seller_type.eq_ignore_ascii_case("cnpj")
            || self.seller_type.eq_ignore_ascii_case("business")
        {
            SellerEntityType::Business
        } else {
            SellerEntityType::Individual
        }
    }

    pub fn to_inputs(&self) -> CostInputs {
        CostInputs {
            product_cost: self.product_cost.amount(),
            shipping_cost: self.shipping_cost.amount(),
            other_costs: self.other_costs.amount(),
            desired_markup: Markup::from_percent(self.margin_percent.amount()),
            seller_entity_type: self.seller_entity_type(),
            free_shipping_promotion: self.free_shipping,
            manual_commission_rate_override: self.manual_commission_rate(),
        }
    }

    pub fn to_request(&self) -> PricingRequest {
        let inputs = self.to_inputs();
        let platform = if inputs.manual_commission_rate_override.is_some()
            || self.platform.is_empty()
            || self.platform == MANUAL_PLATFORM
        {
            None
        } else {
            Some(self.platform.clone())
        };

        PricingRequest::Standard {
            inputs,
            platform,
            scenario: self.scenario.clone(),
        }
    }
}

/// Reverse simulator form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReverseForm {
    pub target_price: FormValue,
    pub desired_margin_percent: FormValue,
    pub tax_percent: FormValue,
    pub shipping_cost: FormValue,
}

impl ReverseForm {
    pub fn to_inputs(&self) -> ReverseInputs {
        ReverseInputs {
            target_sell_price: self.target_price.amount(),
            desired_net_margin: NetMargin::from_percent(self.desired_margin_percent.amount()),
            commission_rate_or_tax: Rate::from_percent(self.tax_percent.amount()),
            shipping_cost: self.shipping_cost.amount(),
        }
    }
}

/// Markup calculator form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupForm {
    pub product_cost: FormValue,
    pub extra_costs: FormValue,
    pub markup_percent: FormValue,
    pub tax_percent: FormValue,
}

impl MarkupForm {
    pub fn to_inputs(&self) -> MarkupInputs {
        MarkupInputs {
            product_cost: self.product_cost.amount(),
            extra_costs: self.extra_costs.amount(),
            markup: Markup::from_percent(self.markup_percent.amount()),
            tax_rate: Rate::from_percent(self.tax_percent.amount()),
        }
    }
}

/// Any calculator form, tagged by mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FormRequest {
    Standard(CostForm),
    Reverse(ReverseForm),
    Markup(MarkupForm),
}

impl FormRequest {
    pub fn to_request(&self) -> PricingRequest {
        match self {
            FormRequest::Standard(form) => form.to_request(),
            FormRequest::Reverse(form) => PricingRequest::Reverse {
                inputs: form.to_inputs(),
            },
            FormRequest::Markup(form) => PricingRequest::Markup {
                inputs: form.to_inputs(),
            },
        }
    }
}
