//! Vendor referral rewards.
//!
//! Vendors earn commission discounts from two programs: an onboarding discount
//! for new sign-ups and a referral discount once they refer enough vendors. The
//! combined discount is capped.

pub mod rewards;

pub use rewards::{
    Discount, ReferralProgram, ReferralSummary, VendorReferralState, share_message,
};
