//! Loyalty Core - Shared data models, types, validation and errors

pub mod colour;
pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

pub use colour::{lighten, text_colour, Rgb, TextColour};
pub use errors::{Error, Result};
pub use models::*;
pub use types::*;
pub use validation::{
    validate_coupon, validate_free_tier, validate_paid_tier, FieldError, ValidationErrors,
};
