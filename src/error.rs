// Typed errors with thiserror. Messages are surfaced verbatim to the JS caller.

use thiserror::Error;

/// Pricing engine error types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Commission plus transaction fee leaves no revenue to price against.
    #[error(
        "Invalid rate configuration: commission {commission_rate} + transaction fee {transaction_fee_rate} must be below 1"
    )]
    InvalidRateConfiguration {
        commission_rate: f64,
        transaction_fee_rate: f64,
    },

    #[error("Rate out of range for {field}: {value} (expected a fraction in [0, 1))")]
    RateOutOfRange { field: &'static str, value: f64 },

    #[error("Negative amount for {field}: {value}")]
    NegativeCost { field: &'static str, value: f64 },

    #[error("Negative margin for {field}: {value}")]
    NegativeMargin { field: &'static str, value: f64 },

    #[error("Non-finite value for {field}")]
    NonFiniteInput { field: &'static str },

    /// Inputs were finite but the arithmetic on them overflowed.
    #[error("Result out of range for {field}: inputs too large to price")]
    NonFiniteResult { field: &'static str },

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PricingError {
    fn from(err: serde_json::Error) -> Self {
        PricingError::Serialization(err.to_string())
    }
}

/// Reject NaN/infinite values and negative amounts.
pub(crate) fn check_amount(field: &'static str, value: f64) -> Result<f64, PricingError> {
    if !value.is_finite() {
        return Err(PricingError::NonFiniteInput { field });
    }
    if value < 0.0 {
        return Err(PricingError::NegativeCost { field, value });
    }
    Ok(value)
}

/// Reject derived amounts that overflowed to infinity or NaN.
pub(crate) fn check_result(field: &'static str, value: f64) -> Result<f64, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        tracing::warn!(field, "derived amount is not finite");
        Err(PricingError::NonFiniteResult { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PricingError::InvalidRateConfiguration {
            commission_rate: 0.7,
            transaction_fee_rate: 0.4,
        };
        assert!(err.to_string().contains("0.7"));
        assert!(err.to_string().contains("0.4"));
    }

    #[test]
    fn serde_error_converts() {
        let parse: Result<u32, _> = serde_json::from_str("not json");
        let err: PricingError = parse.unwrap_err().into();
        assert!(matches!(err, PricingError::Serialization(_)));
    }

    #[test]
    fn check_amount_rejects_negative_and_nan() {
        assert_eq!(check_amount("product_cost", 0.0), Ok(0.0));
        assert!(matches!(
            check_amount("product_cost", -1.0),
            Err(PricingError::NegativeCost { field: "product_cost", .. })
        ));
        assert!(matches!(
            check_amount("shipping_cost", f64::NAN),
            Err(PricingError::NonFiniteInput { field: "shipping_cost" })
        ));
    }

    #[test]
    fn check_result_rejects_overflow() {
        assert_eq!(check_result("recommended_price", 186.9), Ok(186.9));
        assert!(matches!(
            check_result("recommended_price", f64::INFINITY),
            Err(PricingError::NonFiniteResult { field: "recommended_price" })
        ));
        assert!(matches!(
            check_result("net_profit", f64::NAN),
            Err(PricingError::NonFiniteResult { field: "net_profit" })
        ));
    }
}
