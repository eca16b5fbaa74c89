// Strong typing over bare floats. Newtypes keep rates, cost markups and price margins apart.

use serde::{Deserialize, Serialize};

use crate::error::PricingError;

/// A proportional fee expressed as a fraction of the sell price (0.14 = 14%).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Rate(f64);

impl Rate {
    pub const ZERO: Rate = Rate(0.0);

    pub const fn from_fraction(fraction: f64) -> Self {
        Rate(fraction)
    }

    pub fn from_percent(percent: f64) -> Self {
        Rate(percent / 100.0)
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }

    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }

    /// Check the rate is a finite fraction in [0, 1).
    pub fn validate(self, field: &'static str) -> Result<Rate, PricingError> {
        if !self.0.is_finite() {
            return Err(PricingError::NonFiniteInput { field });
        }
        if !(0.0..1.0).contains(&self.0) {
            return Err(PricingError::RateOutOfRange {
                field,
                value: self.0,
            });
        }
        Ok(self)
    }
}

impl std::ops::Add for Rate {
    type Output = Rate;

    fn add(self, rhs: Rate) -> Rate {
        Rate(self.0 + rhs.0)
    }
}

/// Desired profit as a fraction of product cost (standard mode).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Markup(f64);

impl Markup {
    pub const fn from_fraction(fraction: f64) -> Self {
        Markup(fraction)
    }

    pub fn from_percent(percent: f64) -> Self {
        Markup(percent / 100.0)
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }

    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }

    /// Express a price-based margin as the equivalent markup on `product_cost`.
    /// Returns `None` when there is no cost to express it against.
    pub fn from_net_margin(margin: NetMargin, sell_price: f64, product_cost: f64) -> Option<Self> {
        if product_cost <= 0.0 {
            return None;
        }
        Some(Markup(sell_price * margin.fraction() / product_cost))
    }

    pub(crate) fn validate(self, field: &'static str) -> Result<Markup, PricingError> {
        check_margin(field, self.0).map(Markup)
    }
}

/// Desired profit as a fraction of the target sell price (reverse mode).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct NetMargin(f64);

impl NetMargin {
    pub const fn from_fraction(fraction: f64) -> Self {
        NetMargin(fraction)
    }

    pub fn from_percent(percent: f64) -> Self {
        NetMargin(percent / 100.0)
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }

    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }

    pub(crate) fn validate(self, field: &'static str) -> Result<NetMargin, PricingError> {
        check_margin(field, self.0).map(NetMargin)
    }
}

fn check_margin(field: &'static str, value: f64) -> Result<f64, PricingError> {
    if !value.is_finite() {
        return Err(PricingError::NonFiniteInput { field });
    }
    if value < 0.0 {
        return Err(PricingError::NegativeMargin { field, value });
    }
    Ok(value)
}

/// Seller legal-entity type. Some marketplaces charge a different fixed fee per type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SellerEntityType {
    /// Natural person (CPF).
    #[default]
    #[serde(alias = "cpf")]
    Individual,
    /// Registered business (CNPJ).
    #[serde(alias = "cnpj")]
    Business,
}

/// Per-calculation input for standard pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostInputs {
    pub product_cost: f64,
    #[serde(default)]
    pub shipping_cost: f64,
    #[serde(default)]
    pub other_costs: f64,
    pub desired_markup: Markup,
    #[serde(default)]
    pub seller_entity_type: SellerEntityType,
    #[serde(default)]
    pub free_shipping_promotion: bool,
    /// Supersedes the platform profile entirely when present.
    #[serde(default)]
    pub manual_commission_rate_override: Option<Rate>,
}

impl CostInputs {
    pub fn new(product_cost: f64, desired_markup: Markup) -> Self {
        CostInputs {
            product_cost,
            shipping_cost: 0.0,
            other_costs: 0.0,
            desired_markup,
            seller_entity_type: SellerEntityType::default(),
            free_shipping_promotion: false,
            manual_commission_rate_override: None,
        }
    }

    pub fn with_markup(&self, desired_markup: Markup) -> Self {
        CostInputs {
            desired_markup,
            ..self.clone()
        }
    }
}

/// Result badge shown next to the recommended price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitStatus {
    /// Real margin above 40%.
    High,
    /// Real margin above 20%.
    Healthy,
    Tight,
}

impl ProfitStatus {
    pub fn from_margin_percent(margin_percent: f64) -> Self {
        if margin_percent > 40.0 {
            ProfitStatus::High
        } else if margin_percent > 20.0 {
            ProfitStatus::Healthy
        } else {
            ProfitStatus::Tight
        }
    }
}

/// Label for a scenario table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioTier {
    Ideal,
    Low,
}

impl ScenarioTier {
    pub fn for_margin_percent(margin_percent: f64) -> Self {
        if margin_percent >= 40.0 {
            ScenarioTier::Ideal
        } else {
            ScenarioTier::Low
        }
    }
}

/// One row of the price/margin simulation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRow {
    pub margin_percent: f64,
    pub price: f64,
    pub net_profit: f64,
    /// `None` when product cost is zero.
    pub roi_percent: Option<f64>,
    pub tier: ScenarioTier,
}

impl ScenarioRow {
    pub fn rounded(&self) -> Self {
        ScenarioRow {
            price: round_currency(self.price),
            net_profit: round_currency(self.net_profit),
            roi_percent: self.roi_percent.map(round_currency),
            ..self.clone()
        }
    }
}

/// Output of standard pricing. Never persisted; recomputed on every input change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub recommended_price: f64,
    pub net_profit: f64,
    pub real_margin_percent: f64,
    /// Commission plus transaction fee.
    pub platform_fee_amount: f64,
    pub fixed_fee_amount: f64,
    pub commission_amount: f64,
    pub transaction_fee_amount: f64,
    pub total_fixed_costs: f64,
    pub desired_profit: f64,
    pub commission_capped: bool,
    pub status: ProfitStatus,
    #[serde(default)]
    pub scenario_table: Vec<ScenarioRow>,
}

impl CalculationResult {
    /// Copy rounded to cents for display. Only call at the output boundary.
    pub fn rounded(&self) -> Self {
        CalculationResult {
            recommended_price: round_currency(self.recommended_price),
            net_profit: round_currency(self.net_profit),
            real_margin_percent: round_currency(self.real_margin_percent),
            platform_fee_amount: round_currency(self.platform_fee_amount),
            fixed_fee_amount: round_currency(self.fixed_fee_amount),
            commission_amount: round_currency(self.commission_amount),
            transaction_fee_amount: round_currency(self.transaction_fee_amount),
            total_fixed_costs: round_currency(self.total_fixed_costs),
            desired_profit: round_currency(self.desired_profit),
            scenario_table: self.scenario_table.iter().map(ScenarioRow::rounded).collect(),
            ..self.clone()
        }
    }
}

/// Input for reverse pricing: what can I pay for a product I want to sell at `target_sell_price`?
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReverseInputs {
    pub target_sell_price: f64,
    pub desired_net_margin: NetMargin,
    pub commission_rate_or_tax: Rate,
    #[serde(default)]
    pub shipping_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseResult {
    pub max_allowable_cost: f64,
    pub profit_amount: f64,
    pub fee_amount: f64,
    pub net_revenue: f64,
    /// False when no positive product cost reaches the margin.
    pub is_viable: bool,
}

impl ReverseResult {
    pub fn rounded(&self) -> Self {
        ReverseResult {
            max_allowable_cost: round_currency(self.max_allowable_cost),
            profit_amount: round_currency(self.profit_amount),
            fee_amount: round_currency(self.fee_amount),
            net_revenue: round_currency(self.net_revenue),
            is_viable: self.is_viable,
        }
    }
}

/// Input for markup-on-cost pricing with a flat tax estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkupInputs {
    pub product_cost: f64,
    #[serde(default)]
    pub extra_costs: f64,
    pub markup: Markup,
    pub tax_rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupResult {
    pub final_price: f64,
    pub tax_amount: f64,
    pub profit: f64,
    pub margin_percent: f64,
}

impl MarkupResult {
    pub fn rounded(&self) -> Self {
        MarkupResult {
            final_price: round_currency(self.final_price),
            tax_amount: round_currency(self.tax_amount),
            profit: round_currency(self.profit),
            margin_percent: round_currency(self.margin_percent),
        }
    }
}

/// Round a currency amount to two decimal places.
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
