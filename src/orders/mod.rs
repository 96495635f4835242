//! Manual order creation for the admin console.
//!
//! - `catalog`: customers, products, buffers and search
//! - `draft`: line items and pricing
//! - `shipping`: shipping estimate seam and the rate-card quoter
//! - `payment`: simulated payment links

pub mod catalog;
pub mod config;
pub mod draft;
pub mod error;
pub mod payment;
pub mod shipping;

pub use catalog::{
    AccountStatus, CommissionTerms, Customer, NewCustomer, PriceBuffer, Product, search_customers,
    search_products,
};
pub use config::{OrderConfig, PricingConfig, ShippingConfig};
pub use draft::{OrderDraft, OrderItem, OrderSummary, PriceBreakdown};
pub use error::{OrderError, OrderResult};
pub use payment::PaymentLink;
pub use shipping::{ShippingQuote, ShippingQuoter, ShippingRequest, VolumetricQuoter};
