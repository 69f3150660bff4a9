//! Command handlers

pub mod cache;
pub mod coupons;
pub mod partner;
pub mod tiers;
