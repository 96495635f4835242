//! Commission discount computation for the vendor referrals dashboard.

use serde::{Deserialize, Serialize};

/// Program constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferralProgram {
    /// Onboarding discount in percentage points.
    pub onboarding_discount: f64,
    /// Referral discount for vendors who joined without a referral.
    pub referral_discount: f64,
    /// Referral discount for vendors who were referred themselves.
    pub referred_vendor_discount: f64,
    /// Ceiling on the combined discount.
    pub max_total_discount: f64,
    /// Referrals required to unlock the referral discount.
    pub referrals_needed: u32,
    /// Sign-up page shared with invitees.
    pub signup_url: String,
}

impl Default for ReferralProgram {
    fn default() -> Self {
        Self {
            onboarding_discount: 2.0,
            referral_discount: 1.0,
            referred_vendor_discount: 0.75,
            max_total_discount: 3.0,
            referrals_needed: 5,
            signup_url: "https://shopsphere.example.com/signup?ref=vendor".to_string(),
        }
    }
}

/// Referral standing of one vendor.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct VendorReferralState {
    /// Code the vendor shares.
    pub referral_code: String,
    /// Whether this vendor joined through someone else's code.
    pub is_referred_vendor: bool,
    /// Vendors referred so far.
    pub referrals: u32,
    /// Whether the onboarding discount is still running.
    pub onboarding_active: bool,
    /// Whether the referral discount has been unlocked.
    pub referral_active: bool,
}

/// One discount line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    /// Percentage points.
    pub rate: f64,
    /// Whether it currently applies.
    pub active: bool,
}

impl Discount {
    const fn applied(self) -> f64 {
        if self.active { self.rate } else { 0.0 }
    }
}

/// Everything the referrals dashboard shows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferralSummary {
    /// Onboarding discount line.
    pub onboarding: Discount,
    /// Referral discount line.
    pub referral: Discount,
    /// Combined discount after the cap.
    pub total_discount: f64,
    /// Progress towards the referral bonus, 0 to 100.
    pub progress_percent: f64,
    /// Referrals still needed.
    pub referrals_remaining: u32,
}

impl ReferralProgram {
    /// Referral discount rate for `vendor`.
    #[must_use]
    pub const fn referral_rate(&self, vendor: &VendorReferralState) -> f64 {
        if vendor.is_referred_vendor {
            self.referred_vendor_discount
        } else {
            self.referral_discount
        }
    }

    /// Compute the dashboard summary.
    #[must_use]
    pub fn summarize(&self, vendor: &VendorReferralState) -> ReferralSummary {
        let onboarding = Discount {
            rate: self.onboarding_discount,
            active: vendor.onboarding_active,
        };
        let referral = Discount {
            rate: self.referral_rate(vendor),
            active: vendor.referral_active,
        };

        let total_discount =
            (onboarding.applied() + referral.applied()).min(self.max_total_discount);

        let progress_percent = if self.referrals_needed == 0 {
            100.0
        } else {
            (f64::from(vendor.referrals) / f64::from(self.referrals_needed) * 100.0).min(100.0)
        };

        ReferralSummary {
            onboarding,
            referral,
            total_discount,
            progress_percent,
            referrals_remaining: self.referrals_needed.saturating_sub(vendor.referrals),
        }
    }
}

/// Invitation text with the vendor's code and the sign-up link.
#[must_use]
pub fn share_message(referral_code: &str, signup_url: &str) -> String {
    format!(
        "Join our community of vendors on ShopSphere! Use my code to get special onboarding benefits: {referral_code}\n\nSign up here: {signup_url}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor(referred: bool, referrals: u32, onboarding: bool, referral: bool) -> VendorReferralState {
        VendorReferralState {
            referral_code: "VENDOR-A1B2".to_string(),
            is_referred_vendor: referred,
            referrals,
            onboarding_active: onboarding,
            referral_active: referral,
        }
    }

    #[test]
    fn test_referred_vendor_gets_reduced_rate() {
        let program = ReferralProgram::default();
        let summary = program.summarize(&vendor(true, 3, true, false));
        assert!((summary.referral.rate - 0.75).abs() < 1e-9);
        assert!((summary.total_discount - 2.0).abs() < 1e-9);
        assert!((summary.progress_percent - 60.0).abs() < 1e-9);
        assert_eq!(summary.referrals_remaining, 2);
    }

    #[test]
    fn test_total_discount_is_capped() {
        let program = ReferralProgram {
            onboarding_discount: 2.5,
            ..ReferralProgram::default()
        };
        let summary = program.summarize(&vendor(false, 9, true, true));
        assert!((summary.total_discount - 3.0).abs() < 1e-9);
        assert!((summary.progress_percent - 100.0).abs() < 1e-9);
        assert_eq!(summary.referrals_remaining, 0);
    }

    #[test]
    fn test_share_message_mentions_code_and_link() {
        let text = share_message("VENDOR-A1B2", "https://shop.test/signup");
        assert!(text.contains("VENDOR-A1B2"));
        assert!(text.ends_with("Sign up here: https://shop.test/signup"));
    }
}
