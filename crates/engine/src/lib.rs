//! Loyalty Engine - screens, navigation and submit policies
//!
//! Each screen owns its local state and decides where the user goes next.
//! Screens only talk to each other through the service layer and the
//! [`Navigator`].

pub mod forms;
pub mod navigation;
pub mod pages;
pub mod policy;
pub mod prompt;

pub use forms::{AddCouponForm, AddTierForm, SubmitOutcome, TierOption};
pub use navigation::{Navigator, Route};
pub use pages::{CardStyle, DeleteOutcome, DetailRow, TierCard, TiersPage, TiersView, ViewAction};
pub use policy::{FormPolicies, SubmitFailurePolicy};
pub use prompt::{Answer, Confirm};
