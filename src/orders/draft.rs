//! Manually drafted orders.
//!
//! Pricing rules:
//! - subtotal: buffered unit price times quantity, summed
//! - fees: gateway fee plus platform commission on the base price
//! - total: subtotal plus shipping
//!
//! Fees and the referral commission are informational; they are not added to
//! the amount the customer pays.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::orders::catalog::{Customer, Product};
use crate::orders::config::PricingConfig;
use crate::orders::error::{OrderError, OrderResult};
use crate::orders::shipping::{ShippingQuote, ShippingQuoter, ShippingRequest};

/// A product in the draft with its quantity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product snapshot taken when it was added.
    pub product: Product,
    /// Quantity, at least 1.
    pub quantity: u32,
}

impl OrderItem {
    /// Customer-facing line total.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.product.buffered_price() * f64::from(self.quantity)
    }

    /// Platform commission on this line.
    #[must_use]
    pub fn commission(&self) -> f64 {
        self.product.price * f64::from(self.quantity) * (self.product.commission_rate() / 100.0)
    }
}

/// Totals shown in the pricing summary.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Sum of buffered line totals.
    pub subtotal: f64,
    /// Shipping cost.
    pub shipping: f64,
    /// Gateway fee plus platform commission.
    pub fees: f64,
    /// Referral commission entered by the admin.
    pub referral_commission: f64,
    /// Amount charged to the customer.
    pub total: f64,
}

/// A finalized order ready to be stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Customer the order is assigned to.
    pub customer: Customer,
    /// Line items.
    pub items: Vec<OrderItem>,
    /// Pricing.
    pub pricing: PriceBreakdown,
}

/// Order being assembled in the admin form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    customer: Option<Customer>,
    items: Vec<OrderItem>,
    shipping_cost: f64,
    referral_commission: f64,
}

impl OrderDraft {
    /// Start an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the customer.
    pub fn select_customer(&mut self, customer: Customer) {
        self.customer = Some(customer);
    }

    /// Remove the customer.
    pub fn clear_customer(&mut self) {
        self.customer = None;
    }

    /// Current customer.
    #[must_use]
    pub const fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Add a product with quantity 1. Returns `false` if it is already present.
    pub fn add_product(&mut self, product: Product) -> bool {
        if self.items.iter().any(|item| item.product.id == product.id) {
            return false;
        }
        self.items.push(OrderItem {
            product,
            quantity: 1,
        });
        true
    }

    /// Set the quantity of a product, clamped to at least 1.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.product.id == product_id) else {
            return false;
        };
        item.quantity = quantity.max(1);
        true
    }

    /// Remove a product from the draft.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product.id != product_id);
        self.items.len() != before
    }

    /// Set the shipping cost directly.
    pub const fn set_shipping_cost(&mut self, cost: f64) {
        self.shipping_cost = cost;
    }

    /// Set the referral commission shown in the summary.
    pub const fn set_referral_commission(&mut self, amount: f64) {
        self.referral_commission = amount;
    }

    /// Quote shipping and store the cost; a failed quote resets it to zero.
    ///
    /// # Errors
    /// Returns the quoter's error after resetting the shipping cost.
    pub async fn estimate_shipping(
        &mut self,
        quoter: &dyn ShippingQuoter,
        request: &ShippingRequest,
    ) -> OrderResult<ShippingQuote> {
        match quoter.quote(request).await {
            Ok(quote) => {
                self.shipping_cost = quote.cost;
                info!(cost = quote.cost, "shipping cost estimated");
                Ok(quote)
            }
            Err(err) => {
                self.shipping_cost = 0.0;
                warn!(error = %err, "shipping estimate failed");
                Err(err)
            }
        }
    }

    /// Sum of buffered line totals.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// Gateway fee plus platform commission.
    #[must_use]
    pub fn fees(&self, pricing: &PricingConfig) -> f64 {
        pricing.gateway_fee + self.items.iter().map(OrderItem::commission).sum::<f64>()
    }

    /// Amount charged to the customer.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.subtotal() + self.shipping_cost
    }

    /// Full pricing summary.
    #[must_use]
    pub fn breakdown(&self, pricing: &PricingConfig) -> PriceBreakdown {
        PriceBreakdown {
            subtotal: self.subtotal(),
            shipping: self.shipping_cost,
            fees: self.fees(pricing),
            referral_commission: self.referral_commission,
            total: self.total(),
        }
    }

    /// Turn the draft into an order.
    ///
    /// # Errors
    /// Returns `MissingCustomer` or `EmptyOrder` when the draft is incomplete.
    pub fn finalize(self, pricing: &PricingConfig) -> OrderResult<OrderSummary> {
        let breakdown = self.breakdown(pricing);
        let customer = self.customer.ok_or(OrderError::MissingCustomer)?;
        if self.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        info!(
            customer = %customer.id,
            items = self.items.len(),
            total = breakdown.total,
            "order created"
        );

        Ok(OrderSummary {
            customer,
            items: self.items,
            pricing: breakdown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::catalog::{AccountStatus, CommissionTerms, PriceBuffer};
    use crate::orders::shipping::VolumetricQuoter;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn watch() -> Product {
        Product {
            id: "watch".to_string(),
            name: "Classic Leather Watch".to_string(),
            price: 100.0,
            commission: Some(CommissionTerms {
                commission: 10.0,
                buffer: Some(PriceBuffer::Fixed(5.0)),
            }),
        }
    }

    fn tote() -> Product {
        Product {
            id: "tote".to_string(),
            name: "Canvas Tote".to_string(),
            price: 40.0,
            commission: Some(CommissionTerms {
                commission: 5.0,
                buffer: Some(PriceBuffer::Percentage(25.0)),
            }),
        }
    }

    fn customer() -> Customer {
        Customer {
            id: "c1".to_string(),
            name: "Priya".to_string(),
            email: "priya@example.com".to_string(),
            avatar: String::new(),
            status: AccountStatus::Active,
            joined: None,
        }
    }

    #[test]
    fn test_items_dedupe_and_clamp() {
        let mut draft = OrderDraft::new();
        assert!(draft.add_product(watch()));
        assert!(!draft.add_product(watch()));
        assert!(draft.set_quantity("watch", 0));
        assert_eq!(draft.items()[0].quantity, 1);
        assert!(!draft.set_quantity("missing", 3));
        assert!(draft.remove_item("watch"));
        assert!(draft.items().is_empty());
    }

    #[test]
    fn test_pricing_breakdown() {
        let mut draft = OrderDraft::new();
        draft.add_product(watch());
        draft.add_product(tote());
        draft.set_quantity("watch", 2);
        draft.set_shipping_cost(70.0);
        draft.set_referral_commission(12.0);

        let pricing = PricingConfig::default();
        let b = draft.breakdown(&pricing);
        // 2 * 105 + 1 * 50
        assert!(approx(b.subtotal, 260.0));
        // 15 + 2 * 100 * 10% + 40 * 5%
        assert!(approx(b.fees, 37.0));
        assert!(approx(b.total, 330.0));
        assert!(approx(b.referral_commission, 12.0));
    }

    #[test]
    fn test_finalize_requires_customer_and_items() {
        let pricing = PricingConfig::default();

        let mut draft = OrderDraft::new();
        draft.add_product(watch());
        assert!(matches!(
            draft.clone().finalize(&pricing),
            Err(OrderError::MissingCustomer)
        ));

        let mut empty = OrderDraft::new();
        empty.select_customer(customer());
        assert!(matches!(empty.finalize(&pricing), Err(OrderError::EmptyOrder)));

        draft.select_customer(customer());
        let order = draft.finalize(&pricing).unwrap();
        assert_eq!(order.items.len(), 1);
        assert!(approx(order.pricing.total, 105.0));
    }

    #[tokio::test]
    async fn test_failed_estimate_resets_shipping() {
        let quoter = VolumetricQuoter::default();
        let mut draft = OrderDraft::new();
        let mut request = ShippingRequest {
            pickup_postcode: "560001".to_string(),
            delivery_postcode: "110001".to_string(),
            cod: false,
            weight: 0.5,
            length: 10.0,
            breadth: 10.0,
            height: 10.0,
        };

        draft.estimate_shipping(&quoter, &request).await.unwrap();
        assert!(approx(draft.total(), 70.0));

        request.height = 0.0;
        assert!(draft.estimate_shipping(&quoter, &request).await.is_err());
        assert!(approx(draft.total(), 0.0));
    }
}
