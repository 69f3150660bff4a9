//! Add-tier and add-coupon forms

mod coupon_form;
mod tier_form;

pub use coupon_form::{AddCouponForm, TierOption, NO_TIERS_LABEL};
pub use tier_form::AddTierForm;

use loyalty_core::{Error, ValidationErrors};

/// Result of pressing submit
///
/// `submit` borrows the form mutably, so a second submit cannot start while one is in flight.
#[derive(Debug)]
pub enum SubmitOutcome<T> {
    /// Validation blocked the submit; nothing was sent
    Invalid(ValidationErrors),
    /// The backend created the record
    Created(T),
    /// The request failed; `navigated_back` tells whether the input was abandoned
    Failed { error: Error, navigated_back: bool },
}

impl<T> SubmitOutcome<T> {
    pub fn is_created(&self) -> bool {
        matches!(self, SubmitOutcome::Created(_))
    }
}
