//! Loyalty Networking - HTTP client and the Tier/Coupon service wrappers

pub mod api;
pub mod http;

pub use http::{LoyaltyClient, DEFAULT_API_BASE};
