//! Service contracts for the loyalty endpoints
//!
//! Thin wrappers around the raw HTTP client. Each call is one request and
//! hands back an explicit `Result`; callers decide what a failure means.

pub mod coupons;
pub mod tiers;
