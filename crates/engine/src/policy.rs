//! What a form does when its create request fails

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmitFailurePolicy {
    /// Keep the user on the form with their input
    Stay,
    /// Return to the previous screen; the input is lost
    NavigateBack,
}

/// Failure policy per form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormPolicies {
    pub tier: SubmitFailurePolicy,
    pub coupon: SubmitFailurePolicy,
}

impl Default for FormPolicies {
    fn default() -> Self {
        // The tier form stays put on failure, the coupon form always leaves
        Self {
            tier: SubmitFailurePolicy::Stay,
            coupon: SubmitFailurePolicy::NavigateBack,
        }
    }
}
