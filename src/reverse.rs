// Reverse pricing: from a fixed target sell price, find the most a product may cost.
// The margin here is a fraction of the target price, not of cost.

use crate::error::{check_amount, check_result, PricingError};
use crate::types::{ReverseInputs, ReverseResult};

/// Highest product cost that still leaves the desired net margin after fees and shipping.
///
/// A non-viable scenario (`max_allowable_cost <= 0`) is a valid result, not an error.
pub fn compute_reverse_price(inputs: &ReverseInputs) -> Result<ReverseResult, PricingError> {
    let target = check_amount("target_sell_price", inputs.target_sell_price)?;
    let shipping_cost = check_amount("shipping_cost", inputs.shipping_cost)?;
    let rate = inputs
        .commission_rate_or_tax
        .validate("commission_rate_or_tax")?;
    let margin = inputs.desired_net_margin.validate("desired_net_margin")?;

    let fee_amount = target * rate.fraction();
    let net_revenue = target - fee_amount;
    let profit_amount = target * margin.fraction();
    let max_allowable_cost = net_revenue - profit_amount - shipping_cost;

    check_result("profit_amount", profit_amount)?;
    check_result("max_allowable_cost", max_allowable_cost)?;

    tracing::debug!(
        target_sell_price = target,
        max_allowable_cost,
        "reverse price computed"
    );

    Ok(ReverseResult {
        max_allowable_cost,
        profit_amount,
        fee_amount,
        net_revenue,
        is_viable: max_allowable_cost > 0.0,
    })
}
