//! Customers and products as seen by the order form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::orders::error::{OrderError, OrderResult};

/// Markup applied on top of the vendor price.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PriceBuffer {
    /// Absolute amount added to the unit price.
    Fixed(f64),
    /// Percentage of the unit price added on top.
    Percentage(f64),
}

impl PriceBuffer {
    /// Apply the buffer to a unit price.
    #[must_use]
    pub const fn apply(self, price: f64) -> f64 {
        match self {
            Self::Fixed(value) => price + value,
            Self::Percentage(value) => price * (1.0 + value / 100.0),
        }
    }
}

/// Platform terms attached to a product.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CommissionTerms {
    /// Platform commission in percent of the base price.
    #[serde(default)]
    pub commission: f64,
    /// Optional customer-facing markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer: Option<PriceBuffer>,
}

/// A product listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Vendor base price.
    pub price: f64,
    /// Commission and buffer terms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission: Option<CommissionTerms>,
}

impl Product {
    /// Unit price charged to the customer (base price plus buffer).
    #[must_use]
    pub fn buffered_price(&self) -> f64 {
        self.commission
            .and_then(|terms| terms.buffer)
            .map_or(self.price, |buffer| buffer.apply(self.price))
    }

    /// Commission rate in percent.
    #[must_use]
    pub fn commission_rate(&self) -> f64 {
        self.commission.map_or(0.0, |terms| terms.commission)
    }
}

/// Account status of a customer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum AccountStatus {
    /// Account in good standing.
    #[default]
    Active,
    /// Account suspended by an admin.
    Suspended,
}

/// A customer account.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Avatar reference.
    #[serde(default)]
    pub avatar: String,
    /// Account status.
    #[serde(default)]
    pub status: AccountStatus,
    /// Day the account was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined: Option<NaiveDate>,
}

/// Details collected by the "add new customer" dialog.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

impl Customer {
    /// Register a new customer created from the order form.
    ///
    /// # Errors
    /// Returns an error if the name is blank or the email has no `@`.
    pub fn register(details: &NewCustomer, avatar: &str, joined: NaiveDate) -> OrderResult<Self> {
        let name = details.name.trim();
        let email = details.email.trim();
        if name.is_empty() {
            return Err(OrderError::InvalidCustomer("name is required".to_string()));
        }
        if !email.contains('@') {
            return Err(OrderError::InvalidCustomer(format!(
                "invalid email address: {email}"
            )));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            avatar: avatar.to_string(),
            status: AccountStatus::Active,
            joined: Some(joined),
        })
    }
}

/// Customers whose name or email contains `term`, case-insensitively.
/// An empty term matches nothing.
#[must_use]
pub fn search_customers<'a>(customers: &'a [Customer], term: &str) -> Vec<&'a Customer> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    customers
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&needle) || c.email.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Products whose name contains `term`, case-insensitively.
/// An empty term matches nothing.
#[must_use]
pub fn search_products<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}
