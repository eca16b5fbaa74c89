// Price/margin simulation table.
// Rows follow the order of the candidate margin list; that order is what the UI renders.

use crate::error::{check_result, PricingError};
use crate::platform::{resolve_fees, PlatformFeeProfile, ResolvedFees, DEFAULT_TRANSACTION_FEE_RATE};
use crate::standard::price_with_fees;
use crate::types::{CostInputs, Markup, ScenarioRow, ScenarioTier};

/// Candidate markups (percent of cost) for the result table.
pub const STANDARD_MARGINS: [f64; 8] = [10.0, 20.0, 30.0, 40.0, 50.0, 75.0, 100.0, 150.0];

/// Denser list used by the full calculator view.
pub const CALCULATOR_MARGINS: [f64; 13] = [
    5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 40.0, 50.0, 60.0, 75.0, 100.0, 150.0, 200.0,
];

/// Run standard pricing once per candidate margin (percent of product cost).
pub fn build_scenario_table(
    inputs: &CostInputs,
    profile: &PlatformFeeProfile,
    margins: &[f64],
) -> Result<Vec<ScenarioRow>, PricingError> {
    let fees = resolve_fees(inputs, profile, DEFAULT_TRANSACTION_FEE_RATE);
    scenario_rows(inputs, &fees, margins)
}

pub(crate) fn scenario_rows(
    inputs: &CostInputs,
    fees: &ResolvedFees,
    margins: &[f64],
) -> Result<Vec<ScenarioRow>, PricingError> {
    margins
        .iter()
        .map(|&margin_percent| {
            let result =
                price_with_fees(&inputs.with_markup(Markup::from_percent(margin_percent)), fees)?;
            let roi_percent = if inputs.product_cost > 0.0 {
                Some(check_result(
                    "roi_percent",
                    result.net_profit / inputs.product_cost * 100.0,
                )?)
            } else {
                None
            };

            Ok(ScenarioRow {
                margin_percent,
                price: result.recommended_price,
                net_profit: result.net_profit,
                roi_percent,
                tier: ScenarioTier::for_margin_percent(margin_percent),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rate;
    use proptest::prelude::*;

    fn inputs() -> CostInputs {
        CostInputs::new(100.0, Markup::from_percent(50.0))
    }

    #[test]
    fn one_row_per_margin() {
        let rows = build_scenario_table(&inputs(), &PlatformFeeProfile::amazon(), &STANDARD_MARGINS)
            .unwrap();
        assert_eq!(rows.len(), 8);
        let margins: Vec<f64> = rows.iter().map(|r| r.margin_percent).collect();
        assert_eq!(margins, STANDARD_MARGINS.to_vec());
    }

    #[test]
    fn roi_matches_markup_on_cost() {
        // Net profit equals the desired profit, so ROI on product cost is the markup itself.
        let rows = build_scenario_table(&inputs(), &PlatformFeeProfile::magalu(), &[40.0]).unwrap();
        let roi = rows[0].roi_percent.unwrap();
        assert!((roi - 40.0).abs() < 1e-6);
        assert_eq!(rows[0].tier, ScenarioTier::Ideal);
    }

    #[test]
    fn zero_cost_has_no_roi() {
        let inputs = CostInputs::new(0.0, Markup::from_percent(50.0));
        let rows = build_scenario_table(&inputs, &PlatformFeeProfile::amazon(), &[10.0]).unwrap();
        assert_eq!(rows[0].roi_percent, None);
        assert_eq!(rows[0].tier, ScenarioTier::Low);
    }

    #[test]
    fn empty_margin_list() {
        let rows = build_scenario_table(&inputs(), &PlatformFeeProfile::amazon(), &[]).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn invalid_configuration_propagates() {
        let mut inputs = inputs();
        inputs.manual_commission_rate_override = Some(Rate::from_fraction(0.99));
        assert!(matches!(
            build_scenario_table(&inputs, &PlatformFeeProfile::amazon(), &STANDARD_MARGINS),
            Err(PricingError::InvalidRateConfiguration { .. })
        ));
    }

    #[test]
    fn calculator_margins_ascending() {
        assert!(CALCULATOR_MARGINS.windows(2).all(|w| w[0] < w[1]));
        assert!(STANDARD_MARGINS.windows(2).all(|w| w[0] < w[1]));
    }

    mod property_tests {
        use super::*;

        proptest! {
            /// Output rows keep the input order, whatever order that is.
            #[test]
            fn rows_follow_input_order(
                margins in prop::collection::vec(0.0f64..300.0, 0..20),
                product_cost in 0.0f64..5_000.0,
            ) {
                let inputs = CostInputs::new(product_cost, Markup::from_percent(50.0));
                let rows = build_scenario_table(&inputs, &PlatformFeeProfile::shopee(), &margins).unwrap();

                prop_assert_eq!(rows.len(), margins.len());
                for (row, margin) in rows.iter().zip(&margins) {
                    prop_assert_eq!(row.margin_percent, *margin);
                }
            }
        }
    }
}
