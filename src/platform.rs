// Marketplace fee profiles and the surcharge policy table.
// Per-platform quirks live in profile data, not in per-call-site branches.

use serde::{Deserialize, Serialize};

use crate::error::{check_amount, PricingError};
use crate::types::{CostInputs, Rate, SellerEntityType};

/// Transaction fee applied when a manual commission override replaces the profile.
pub const DEFAULT_TRANSACTION_FEE_RATE: Rate = Rate::from_fraction(0.02);

/// Fixed fee that depends on the seller's legal-entity type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityFixedFees {
    pub business: f64,
    pub individual: f64,
}

impl EntityFixedFees {
    pub fn for_entity(&self, entity: SellerEntityType) -> f64 {
        match entity {
            SellerEntityType::Business => self.business,
            SellerEntityType::Individual => self.individual,
        }
    }
}

/// A named preset describing a marketplace's take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformFeeProfile {
    pub id: String,
    pub name: String,
    pub commission_rate: Rate,
    #[serde(default)]
    pub fixed_fee: f64,
    /// Cap on the commission charge in currency units. 0 = uncapped.
    #[serde(default)]
    pub max_commission_amount: f64,
    pub transaction_fee_rate: Rate,
    /// Added to the commission rate while a free-shipping promotion is active.
    #[serde(default)]
    pub free_shipping_surcharge: Option<Rate>,
    /// Replaces `fixed_fee` according to the seller's entity type.
    #[serde(default)]
    pub entity_fixed_fees: Option<EntityFixedFees>,
}

impl PlatformFeeProfile {
    pub fn shopee() -> Self {
        PlatformFeeProfile {
            id: "shopee".to_string(),
            name: "Shopee".to_string(),
            commission_rate: Rate::from_fraction(0.14),
            fixed_fee: 7.0,
            max_commission_amount: 105.0,
            transaction_fee_rate: Rate::from_fraction(0.02),
            free_shipping_surcharge: Some(Rate::from_fraction(0.06)),
            entity_fixed_fees: Some(EntityFixedFees {
                business: 4.0,
                individual: 7.0,
            }),
        }
    }

    pub fn mercado_livre() -> Self {
        PlatformFeeProfile {
            id: "mercadolivre".to_string(),
            name: "Mercado Livre".to_string(),
            commission_rate: Rate::from_fraction(0.14),
            fixed_fee: 6.5,
            max_commission_amount: 0.0,
            transaction_fee_rate: Rate::from_fraction(0.02),
            free_shipping_surcharge: None,
            entity_fixed_fees: None,
        }
    }

    pub fn amazon() -> Self {
        PlatformFeeProfile {
            id: "amazon".to_string(),
            name: "Amazon".to_string(),
            commission_rate: Rate::from_fraction(0.20),
            fixed_fee: 0.0,
            max_commission_amount: 0.0,
            transaction_fee_rate: Rate::from_fraction(0.02),
            free_shipping_surcharge: None,
            entity_fixed_fees: None,
        }
    }

    pub fn magalu() -> Self {
        PlatformFeeProfile {
            id: "magalu".to_string(),
            name: "Magalu".to_string(),
            commission_rate: Rate::from_fraction(0.14),
            fixed_fee: 0.0,
            max_commission_amount: 0.0,
            transaction_fee_rate: Rate::from_fraction(0.02),
            free_shipping_surcharge: None,
            entity_fixed_fees: None,
        }
    }

    /// Check the profile's own numbers, before any surcharge is applied.
    pub fn validate(&self) -> Result<(), PricingError> {
        self.commission_rate.validate("commission_rate")?;
        self.transaction_fee_rate.validate("transaction_fee_rate")?;
        if let Some(surcharge) = self.free_shipping_surcharge {
            surcharge.validate("free_shipping_surcharge")?;
        }
        check_amount("fixed_fee", self.fixed_fee)?;
        check_amount("max_commission_amount", self.max_commission_amount)?;
        if let Some(fees) = &self.entity_fixed_fees {
            check_amount("entity_fixed_fees.business", fees.business)?;
            check_amount("entity_fixed_fees.individual", fees.individual)?;
        }
        Ok(())
    }
}

/// Built-in marketplace presets.
pub fn default_profiles() -> Vec<PlatformFeeProfile> {
    vec![
        PlatformFeeProfile::shopee(),
        PlatformFeeProfile::mercado_livre(),
        PlatformFeeProfile::amazon(),
        PlatformFeeProfile::magalu(),
    ]
}

/// Effective fees for one calculation, after the policy table or manual override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFees {
    pub commission_rate: Rate,
    pub transaction_fee_rate: Rate,
    pub fixed_fee: f64,
    pub max_commission_amount: f64,
}

impl ResolvedFees {
    /// Fees for a manual commission override: no fixed fee and no cap.
    pub fn manual(commission_rate: Rate, transaction_fee_rate: Rate) -> Self {
        ResolvedFees {
            commission_rate,
            transaction_fee_rate,
            fixed_fee: 0.0,
            max_commission_amount: 0.0,
        }
    }

    /// Combined proportional take on the sell price.
    pub fn variable_rate(&self) -> f64 {
        self.commission_rate.fraction() + self.transaction_fee_rate.fraction()
    }

    /// Reject configurations that cannot be priced.
    pub fn validate(&self) -> Result<(), PricingError> {
        self.commission_rate.validate("commission_rate")?;
        self.transaction_fee_rate.validate("transaction_fee_rate")?;
        check_amount("fixed_fee", self.fixed_fee)?;
        check_amount("max_commission_amount", self.max_commission_amount)?;

        if self.variable_rate() >= 1.0 {
            tracing::warn!(
                commission_rate = self.commission_rate.fraction(),
                transaction_fee_rate = self.transaction_fee_rate.fraction(),
                "unpriceable rate configuration"
            );
            return Err(PricingError::InvalidRateConfiguration {
                commission_rate: self.commission_rate.fraction(),
                transaction_fee_rate: self.transaction_fee_rate.fraction(),
            });
        }
        Ok(())
    }
}

/// Apply the surcharge policy table to `profile` for these inputs.
///
/// A manual commission override ignores the profile entirely: no fixed fee, no cap,
/// and `manual_transaction_fee_rate` as the transaction fee.
pub fn resolve_fees(
    inputs: &CostInputs,
    profile: &PlatformFeeProfile,
    manual_transaction_fee_rate: Rate,
) -> ResolvedFees {
    if let Some(rate) = inputs.manual_commission_rate_override {
        return ResolvedFees::manual(rate, manual_transaction_fee_rate);
    }

    let mut commission_rate = profile.commission_rate;
    if inputs.free_shipping_promotion {
        if let Some(surcharge) = profile.free_shipping_surcharge {
            commission_rate = commission_rate + surcharge;
        }
    }

    let fixed_fee = profile
        .entity_fixed_fees
        .map(|fees| fees.for_entity(inputs.seller_entity_type))
        .unwrap_or(profile.fixed_fee);

    ResolvedFees {
        commission_rate,
        transaction_fee_rate: profile.transaction_fee_rate,
        fixed_fee,
        max_commission_amount: profile.max_commission_amount,
    }
}
