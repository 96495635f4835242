//! Configuration for order pricing and shipping estimates.

use serde::{Deserialize, Serialize};

use crate::orders::error::{OrderError, OrderResult};

/// Order settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Pricing settings.
    pub pricing: PricingConfig,
    /// Shipping estimate settings.
    pub shipping: ShippingConfig,
}

/// Finite and not below zero.
pub(crate) const fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl OrderConfig {
    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any rate is negative or a divisor is not positive.
    pub fn validate(&self) -> OrderResult<()> {
        if !is_non_negative(self.pricing.gateway_fee) {
            return Err(OrderError::Config(
                "pricing.gateway_fee must be >= 0".to_string(),
            ));
        }

        if self.pricing.payment_link_base.trim().is_empty() {
            return Err(OrderError::Config(
                "pricing.payment_link_base must not be empty".to_string(),
            ));
        }

        let shipping = &self.shipping;
        if ![shipping.base_rate, shipping.per_kg_rate, shipping.cod_surcharge]
            .into_iter()
            .all(is_non_negative)
        {
            return Err(OrderError::Config(
                "shipping rates must be >= 0".to_string(),
            ));
        }

        if !(is_non_negative(shipping.volumetric_divisor) && shipping.volumetric_divisor > 0.0) {
            return Err(OrderError::Config(
                "shipping.volumetric_divisor must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Pricing settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Flat payment gateway fee added to the fees line.
    pub gateway_fee: f64,
    /// Base URL of generated payment links.
    pub payment_link_base: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            gateway_fee: 15.0,
            payment_link_base: "https://razorpay.com/pay/".to_string(),
        }
    }
}

/// Rate card of the built-in shipping estimator.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingConfig {
    /// Flat charge per shipment.
    pub base_rate: f64,
    /// Charge per started kilogram of chargeable weight.
    pub per_kg_rate: f64,
    /// Divisor turning cm³ into volumetric kilograms.
    pub volumetric_divisor: f64,
    /// Extra charge for cash-on-delivery shipments.
    pub cod_surcharge: f64,
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            base_rate: 40.0,
            per_kg_rate: 30.0,
            volumetric_divisor: 5000.0,
            cod_surcharge: 25.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(OrderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_nan_and_negative_rates_rejected() {
        let mut config = OrderConfig::default();
        config.pricing.gateway_fee = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = OrderConfig::default();
        config.shipping.per_kg_rate = -1.0;
        assert!(config.validate().is_err());

        let mut config = OrderConfig::default();
        config.shipping.volumetric_divisor = 0.0;
        assert!(config.validate().is_err());
    }
}
