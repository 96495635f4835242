//! Simulated payment links.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Length of the random token in a simulated link.
const TOKEN_LEN: usize = 10;

/// A payment link for an order total.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentLink {
    /// Link to share with the customer.
    pub url: String,
    /// Amount requested.
    pub amount: f64,
}

impl PaymentLink {
    /// Build a mock link under `base` for `amount`. No gateway is contacted.
    #[must_use]
    pub fn simulated(base: &str, amount: f64) -> Self {
        let token: String = Uuid::new_v4().simple().to_string().chars().take(TOKEN_LEN).collect();
        let url = format!("{}/mock_{token}", base.trim_end_matches('/'));
        info!(amount, "simulated payment link generated");
        Self { url, amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_links_are_unique() {
        let a = PaymentLink::simulated("https://razorpay.com/pay/", 120.5);
        let b = PaymentLink::simulated("https://razorpay.com/pay", 120.5);
        assert!(a.url.starts_with("https://razorpay.com/pay/mock_"));
        assert_eq!(a.url.len(), "https://razorpay.com/pay/mock_".len() + TOKEN_LEN);
        assert_ne!(a.url, b.url);
    }
}
