//! HTTP transport for the loyalty backend

mod client;

pub use client::{LoyaltyClient, DEFAULT_API_BASE};
