//! Coupon service

use crate::LoyaltyClient;
use loyalty_core::{Coupon, NewCoupon, Result};
use tracing::info;

/// Create a coupon attached to a program and a tier
pub async fn create(client: &LoyaltyClient, coupon: &NewCoupon) -> Result<Coupon> {
    info!(
        "Creating coupon '{}' for program {} (tier {})",
        coupon.coupon_title, coupon.program_id, coupon.tier_id
    );
    client.create_coupon(coupon).await
}
