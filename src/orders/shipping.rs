//! Shipping cost estimation.
//!
//! The console asks a courier aggregator for a rate; [`ShippingQuoter`] is the
//! seam for that call. [`VolumetricQuoter`] prices locally from a rate card.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::orders::config::ShippingConfig;
use crate::orders::error::{OrderError, OrderResult};

/// Package and route details for a shipping estimate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShippingRequest {
    /// Vendor pickup postcode.
    pub pickup_postcode: String,
    /// Customer delivery postcode.
    pub delivery_postcode: String,
    /// Cash on delivery.
    #[serde(default)]
    pub cod: bool,
    /// Weight in kilograms.
    pub weight: f64,
    /// Length in centimetres.
    pub length: f64,
    /// Breadth in centimetres.
    pub breadth: f64,
    /// Height in centimetres.
    pub height: f64,
}

impl ShippingRequest {
    /// Check that every field is filled in and positive.
    ///
    /// # Errors
    /// Returns `InvalidShipping` naming the first offending field.
    pub fn validate(&self) -> OrderResult<()> {
        for (name, value) in [
            ("pickup_postcode", &self.pickup_postcode),
            ("delivery_postcode", &self.delivery_postcode),
        ] {
            if value.trim().is_empty() {
                return Err(OrderError::InvalidShipping(format!("{name} is required")));
            }
        }

        for (name, value) in [
            ("weight", self.weight),
            ("length", self.length),
            ("breadth", self.breadth),
            ("height", self.height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(OrderError::InvalidShipping(format!(
                    "{name} must be greater than zero"
                )));
            }
        }

        Ok(())
    }

    /// Volume in cubic centimetres.
    #[must_use]
    pub const fn volume_cm3(&self) -> f64 {
        self.length * self.breadth * self.height
    }
}

/// A priced shipment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShippingQuote {
    /// Logistics cost.
    pub cost: f64,
    /// Weight the cost was computed on.
    pub chargeable_weight: f64,
}

/// Source of shipping quotes.
#[async_trait]
pub trait ShippingQuoter: Send + Sync {
    /// Price a shipment.
    async fn quote(&self, request: &ShippingRequest) -> OrderResult<ShippingQuote>;
}

/// Rate-card quoter using the greater of actual and volumetric weight.
#[derive(Clone, Debug, Default)]
pub struct VolumetricQuoter {
    rates: ShippingConfig,
}

impl VolumetricQuoter {
    /// Create a quoter from a rate card.
    #[must_use]
    pub const fn new(rates: ShippingConfig) -> Self {
        Self { rates }
    }

    /// Synchronous pricing used by [`ShippingQuoter::quote`].
    ///
    /// # Errors
    /// Returns `InvalidShipping` if the request is incomplete and `QuoteFailed`
    /// if the rate card cannot price it.
    pub fn price(&self, request: &ShippingRequest) -> OrderResult<ShippingQuote> {
        request.validate()?;

        let volumetric = request.volume_cm3() / self.rates.volumetric_divisor;
        let chargeable_weight = request.weight.max(volumetric);
        let mut cost = self
            .rates
            .per_kg_rate
            .mul_add(chargeable_weight.ceil(), self.rates.base_rate);
        if request.cod {
            cost += self.rates.cod_surcharge;
        }
        if !cost.is_finite() {
            return Err(OrderError::QuoteFailed(format!(
                "no finite rate for chargeable weight {chargeable_weight} kg"
            )));
        }

        debug!(
            pickup = %request.pickup_postcode,
            delivery = %request.delivery_postcode,
            chargeable_weight,
            cost,
            "shipping quote computed"
        );

        Ok(ShippingQuote {
            cost,
            chargeable_weight,
        })
    }
}

#[async_trait]
impl ShippingQuoter for VolumetricQuoter {
    async fn quote(&self, request: &ShippingRequest) -> OrderResult<ShippingQuote> {
        self.price(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(weight: f64, side: f64, cod: bool) -> ShippingRequest {
        ShippingRequest {
            pickup_postcode: "560001".to_string(),
            delivery_postcode: "110001".to_string(),
            cod,
            weight,
            length: side,
            breadth: side,
            height: side,
        }
    }

    #[tokio::test]
    async fn test_actual_weight_dominates_small_box() {
        let quoter = VolumetricQuoter::default();
        let quote = quoter.quote(&request(0.5, 10.0, true)).await.unwrap();
        assert!((quote.chargeable_weight - 0.5).abs() < 1e-9);
        assert!((quote.cost - 95.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_volumetric_weight_dominates_large_box() {
        let quoter = VolumetricQuoter::default();
        let quote = quoter.quote(&request(1.0, 30.0, false)).await.unwrap();
        assert!((quote.chargeable_weight - 5.4).abs() < 1e-9);
        assert!((quote.cost - 220.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unpriceable_package_fails_quote() {
        let quoter = VolumetricQuoter::default();
        let err = quoter.quote(&request(f64::MAX, 10.0, false)).await.unwrap_err();
        assert!(matches!(err, OrderError::QuoteFailed(_)));
        assert!(!err.is_user_fixable());
    }

    #[test]
    fn test_missing_details_rejected() {
        let mut req = request(1.0, 10.0, false);
        req.delivery_postcode = " ".to_string();
        assert!(matches!(req.validate(), Err(OrderError::InvalidShipping(_))));

        let req = request(0.0, 10.0, false);
        assert!(matches!(
            VolumetricQuoter::default().price(&req),
            Err(OrderError::InvalidShipping(_))
        ));
    }
}
