//! Tier models: the server record, the form draft and the validated payload

use super::de;
use crate::errors::Result;
use crate::types::{HexColour, PartnerId, TierId};
use crate::validation::{validate_free_tier, validate_paid_tier, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Tier as returned by `GET /tiers/getAllPartnerTiers` and friends
///
/// Every field but the id tolerates `null`, so one sparse row cannot fail a whole listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub tier_id: TierId,
    /// The backend has been seen to use both spellings
    #[serde(rename = "partnerId", alias = "partner_id", default)]
    pub partner_id: Option<PartnerId>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub tier_name: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub trigger_amount: f64,
    /// Months; null for free tiers
    #[serde(default, deserialize_with = "de::count_option")]
    pub trigger_duration: Option<u32>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub accrual_multiplier: f64,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub redemption_limit_of_purchase: f64,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub conversion: f64,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub coupon_probability: f64,
    /// Kept raw so one badly stored colour cannot break a whole listing
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub colour: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_free_tier: Option<bool>,
}

impl Tier {
    /// Entry tier: flagged free by the server, or no trigger at all
    pub fn is_free(&self) -> bool {
        if let Some(flag) = self.is_free_tier {
            return flag;
        }
        self.trigger_amount == 0.0 && self.trigger_duration.map_or(true, |d| d == 0)
    }

    /// Parsed colour, falling back to white when the stored value is not hex
    pub fn colour(&self) -> HexColour {
        HexColour::parse(&self.colour).unwrap_or_default()
    }
}

/// Qualification terms, one variant per tier kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TierTerms {
    /// Entry tier: no spend threshold, no duration
    Free,
    Paid {
        trigger_amount: f64,
        trigger_duration: u32,
    },
}

/// Raw values of the add-tier form
#[derive(Debug, Clone, PartialEq)]
pub struct TierDraft {
    pub tier_name: String,
    pub trigger_amount: Option<f64>,
    pub trigger_duration: Option<f64>,
    pub accrual_multiplier: Option<f64>,
    pub redemption_limit_of_purchase: Option<f64>,
    pub conversion: Option<f64>,
    pub description: String,
    pub coupon_probability: Option<f64>,
    pub colour: String,
    /// Client-only flag; never sent to the backend
    pub is_free_tier: bool,
}

impl TierDraft {
    /// Initial values for a free tier; the trigger fields are locked
    pub fn new_free() -> Self {
        Self {
            trigger_amount: Some(0.0),
            trigger_duration: None,
            is_free_tier: true,
            ..Self::new_paid()
        }
    }

    /// Initial values for a paid tier
    pub fn new_paid() -> Self {
        Self {
            tier_name: String::new(),
            trigger_amount: None,
            trigger_duration: None,
            accrual_multiplier: None,
            redemption_limit_of_purchase: None,
            conversion: None,
            description: String::new(),
            coupon_probability: Some(0.0),
            colour: HexColour::default().to_string(),
            is_free_tier: false,
        }
    }

    /// Run the rules for the variant selected by the free-tier flag
    pub fn validate(&self) -> std::result::Result<ValidTier, ValidationErrors> {
        if self.is_free_tier {
            validate_free_tier(self)
        } else {
            validate_paid_tier(self)
        }
    }
}

impl Default for TierDraft {
    fn default() -> Self {
        Self::new_paid()
    }
}

/// A tier draft that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTier {
    pub tier_name: String,
    pub terms: TierTerms,
    pub accrual_multiplier: f64,
    pub redemption_limit_of_purchase: f64,
    pub conversion: f64,
    pub description: String,
    pub coupon_probability: f64,
    pub colour: HexColour,
}

impl ValidTier {
    pub fn is_free(&self) -> bool {
        matches!(self.terms, TierTerms::Free)
    }

    /// Build the create-tier body for `partner_id`
    pub fn into_payload(self, partner_id: PartnerId) -> NewTier {
        let (trigger_amount, trigger_duration) = match self.terms {
            TierTerms::Free => (0.0, None),
            TierTerms::Paid {
                trigger_amount,
                trigger_duration,
            } => (trigger_amount, Some(trigger_duration)),
        };
        NewTier {
            partner_id,
            tier_name: self.tier_name,
            trigger_amount,
            trigger_duration,
            accrual_multiplier: self.accrual_multiplier,
            redemption_limit_of_purchase: self.redemption_limit_of_purchase,
            conversion: self.conversion,
            description: self.description,
            coupon_probability: self.coupon_probability,
            colour: self.colour,
        }
    }
}

/// Body of `POST /tiers/createTier`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTier {
    #[serde(rename = "partner_id")]
    pub partner_id: PartnerId,
    pub tier_name: String,
    pub trigger_amount: f64,
    pub trigger_duration: Option<u32>,
    pub accrual_multiplier: f64,
    pub redemption_limit_of_purchase: f64,
    pub conversion: f64,
    pub description: String,
    pub coupon_probability: f64,
    pub colour: HexColour,
}

impl From<NewTier> for Tier {
    /// The record as submitted; the id stays unassigned until the list is fetched again
    fn from(new: NewTier) -> Self {
        Tier {
            tier_id: TierId::unassigned(),
            partner_id: Some(new.partner_id),
            tier_name: new.tier_name,
            trigger_amount: new.trigger_amount,
            trigger_duration: new.trigger_duration,
            accrual_multiplier: new.accrual_multiplier,
            redemption_limit_of_purchase: new.redemption_limit_of_purchase,
            conversion: new.conversion,
            description: new.description,
            coupon_probability: new.coupon_probability,
            colour: new.colour.to_string(),
            is_free_tier: None,
        }
    }
}

/// Parse a tier list body
pub fn parse_tiers(body: &str) -> Result<Vec<Tier>> {
    Ok(serde_json::from_str(body)?)
}
