//! List screens

mod tiers;

pub(crate) use tiers::TierSnapshot;
pub use tiers::{
    CardStyle, DeleteOutcome, DetailRow, TierCard, TiersPage, TiersView, ViewAction,
    DELETE_PROMPT, WELCOME_MESSAGE,
};
