// Markup-on-cost pricing with a flat tax estimate, and the quick estimate used by the
// flow canvas price card. No fee gross-up: tax is taken from the marked-up price.

use crate::error::{check_amount, check_result, PricingError};
use crate::types::{Markup, MarkupInputs, MarkupResult};

pub fn compute_markup_price(inputs: &MarkupInputs) -> Result<MarkupResult, PricingError> {
    let product_cost = check_amount("product_cost", inputs.product_cost)?;
    let extra_costs = check_amount("extra_costs", inputs.extra_costs)?;
    let markup = inputs.markup.validate("markup")?;
    let tax_rate = inputs.tax_rate.validate("tax_rate")?;

    let total_cost = product_cost + extra_costs;
    let final_price = total_cost * (1.0 + markup.fraction());
    let tax_amount = final_price * tax_rate.fraction();
    let profit = final_price - total_cost - tax_amount;
    let margin_percent = if final_price > 0.0 {
        profit / final_price * 100.0
    } else {
        0.0
    };

    check_result("total_cost", total_cost)?;
    check_result("final_price", final_price)?;
    check_result("profit", profit)?;
    check_result("margin_percent", margin_percent)?;

    Ok(MarkupResult {
        final_price,
        tax_amount,
        profit,
        margin_percent,
    })
}

/// Rough sell price: cost plus markup, ignoring every fee.
pub fn quick_estimate(product_cost: f64, markup: Markup) -> Result<f64, PricingError> {
    let product_cost = check_amount("product_cost", product_cost)?;
    let markup = markup.validate("markup")?;
    check_result("estimate", product_cost * (1.0 + markup.fraction()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rate;

    fn inputs(cost: f64, extra: f64, markup_percent: f64, tax_percent: f64) -> MarkupInputs {
        MarkupInputs {
            product_cost: cost,
            extra_costs: extra,
            markup: Markup::from_percent(markup_percent),
            tax_rate: Rate::from_percent(tax_percent),
        }
    }

    #[test]
    fn default_calculator_values() {
        // 50% markup and 11% tax, the calculator's starting values.
        let result = compute_markup_price(&inputs(100.0, 0.0, 50.0, 11.0)).unwrap();
        assert!((result.final_price - 150.0).abs() < 1e-9);
        assert!((result.tax_amount - 16.5).abs() < 1e-9);
        assert!((result.profit - 33.5).abs() < 1e-9);
        assert!((result.margin_percent - 33.5 / 150.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn extra_costs_are_marked_up() {
        let result = compute_markup_price(&inputs(80.0, 20.0, 100.0, 0.0)).unwrap();
        assert!((result.final_price - 200.0).abs() < 1e-9);
        assert!((result.profit - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_cost_has_zero_margin() {
        let result = compute_markup_price(&inputs(0.0, 0.0, 50.0, 11.0)).unwrap();
        assert_eq!(result.final_price, 0.0);
        assert_eq!(result.margin_percent, 0.0);
    }

    #[test]
    fn high_tax_can_lose_money() {
        let result = compute_markup_price(&inputs(100.0, 0.0, 10.0, 20.0)).unwrap();
        assert!(result.profit < 0.0);
    }

    #[test]
    fn quick_estimate_is_plain_markup() {
        assert!((quick_estimate(40.0, Markup::from_percent(50.0)).unwrap() - 60.0).abs() < 1e-9);
        assert_eq!(quick_estimate(0.0, Markup::from_percent(50.0)).unwrap(), 0.0);
    }

    #[test]
    fn quick_estimate_validates_inputs() {
        assert!(matches!(
            quick_estimate(-10.0, Markup::from_percent(50.0)),
            Err(PricingError::NegativeCost { field: "product_cost", .. })
        ));
        assert!(matches!(
            quick_estimate(10.0, Markup::from_percent(-5.0)),
            Err(PricingError::NegativeMargin { field: "markup", .. })
        ));
        assert!(matches!(
            quick_estimate(10.0, Markup::from_fraction(f64::NAN)),
            Err(PricingError::NonFiniteInput { field: "markup" })
        ));
    }

    #[test]
    fn overflowing_markup_is_an_error() {
        let result = compute_markup_price(&inputs(1e308, 1e308, 50.0, 11.0));
        assert!(matches!(
            result,
            Err(PricingError::NonFiniteResult { field: "total_cost" })
        ));
    }
}
