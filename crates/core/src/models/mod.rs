//! Data models for loyalty entities

mod coupon;
mod de;
mod tier;

pub use coupon::*;
pub use tier::*;
