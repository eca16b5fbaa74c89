// Standard pricing: cost plus desired markup, grossed up over proportional marketplace fees.
// Fees are a rate of the sell price, so the price is solved in closed form.
// Intermediate values are never rounded.

use crate::error::{check_amount, check_result, PricingError};
use crate::platform::{resolve_fees, PlatformFeeProfile, ResolvedFees, DEFAULT_TRANSACTION_FEE_RATE};
use crate::scenario::{scenario_rows, STANDARD_MARGINS};
use crate::types::{CalculationResult, CostInputs, ProfitStatus};

/// Compute the recommended sell price for `inputs` on `profile`, with the standard
/// scenario table attached.
pub fn compute_standard_price(
    inputs: &CostInputs,
    profile: &PlatformFeeProfile,
) -> Result<CalculationResult, PricingError> {
    let fees = resolve_fees(inputs, profile, DEFAULT_TRANSACTION_FEE_RATE);
    let mut result = price_with_fees(inputs, &fees)?;
    result.scenario_table = scenario_rows(inputs, &fees, &STANDARD_MARGINS)?;
    Ok(result)
}

/// Price against already-resolved fees. The scenario table is left empty.
pub fn price_with_fees(
    inputs: &CostInputs,
    fees: &ResolvedFees,
) -> Result<CalculationResult, PricingError> {
    let product_cost = check_amount("product_cost", inputs.product_cost)?;
    let shipping_cost = check_amount("shipping_cost", inputs.shipping_cost)?;
    let other_costs = check_amount("other_costs", inputs.other_costs)?;
    let markup = inputs.desired_markup.validate("desired_markup")?;
    fees.validate()?;

    let commission_rate = fees.commission_rate.fraction();
    let transaction_rate = fees.transaction_fee_rate.fraction();

    let desired_profit = product_cost * markup.fraction();
    let total_fixed_costs = product_cost + shipping_cost + other_costs + fees.fixed_fee;

    let mut recommended_price =
        (total_fixed_costs + desired_profit) / (1.0 - commission_rate - transaction_rate);

    // Single pass: once repriced with the flat cap, the cap condition is not re-checked.
    let mut commission_capped = false;
    if fees.max_commission_amount > 0.0 {
        let uncapped_commission = recommended_price * commission_rate;
        if uncapped_commission > fees.max_commission_amount {
            recommended_price = (total_fixed_costs + desired_profit + fees.max_commission_amount)
                / (1.0 - transaction_rate);
            commission_capped = true;
            tracing::debug!(
                uncapped_commission,
                cap = fees.max_commission_amount,
                recommended_price,
                "commission cap applied"
            );
        }
    }

    let commission_amount = if commission_capped {
        fees.max_commission_amount
    } else {
        recommended_price * commission_rate
    };
    let transaction_fee_amount = recommended_price * transaction_rate;
    let net_profit =
        recommended_price - total_fixed_costs - commission_amount - transaction_fee_amount;
    let real_margin_percent = if recommended_price > 0.0 {
        net_profit / recommended_price * 100.0
    } else {
        0.0
    };

    check_result("total_fixed_costs", total_fixed_costs)?;
    check_result("desired_profit", desired_profit)?;
    check_result("recommended_price", recommended_price)?;
    check_result("platform_fee_amount", commission_amount + transaction_fee_amount)?;
    check_result("net_profit", net_profit)?;
    check_result("real_margin_percent", real_margin_percent)?;

    tracing::debug!(
        recommended_price,
        net_profit,
        real_margin_percent,
        "standard price computed"
    );

    Ok(CalculationResult {
        recommended_price,
        net_profit,
        real_margin_percent,
        platform_fee_amount: commission_amount + transaction_fee_amount,
        fixed_fee_amount: fees.fixed_fee,
        commission_amount,
        transaction_fee_amount,
        total_fixed_costs,
        desired_profit,
        commission_capped,
        status: ProfitStatus::from_margin_percent(real_margin_percent),
        scenario_table: Vec::new(),
    })
}
