//! Add-coupon form

use super::SubmitOutcome;
use crate::navigation::{Navigator, Route};
use crate::pages::TierSnapshot;
use crate::policy::SubmitFailurePolicy;
use loyalty_core::{
    validate_coupon, Coupon, CouponDraft, ProgramId, Result, Tier, TierId, ValidationErrors,
};
use loyalty_networking::{
    api::{coupons, tiers},
    LoyaltyClient,
};
use loyalty_persistence::ClientStore;
use serde::Serialize;
use tracing::{error, info, warn};

/// Placeholder shown when the partner has no tiers
pub const NO_TIERS_LABEL: &str = "No tiers available";

/// One entry of the tier dropdown
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierOption {
    pub value: Option<TierId>,
    pub label: String,
    pub disabled: bool,
}

/// Collects coupon attributes for a program and submits them
#[derive(Debug)]
pub struct AddCouponForm {
    program_id: ProgramId,
    draft: CouponDraft,
    tiers: TierSnapshot,
    errors: ValidationErrors,
    on_failure: SubmitFailurePolicy,
}

impl AddCouponForm {
    pub fn new(program_id: ProgramId, on_failure: SubmitFailurePolicy) -> Self {
        Self {
            program_id,
            draft: CouponDraft::default(),
            tiers: TierSnapshot::default(),
            errors: ValidationErrors::new(),
            on_failure,
        }
    }

    /// Open the form for an `AddCoupon` route
    pub fn for_route(route: &Route, on_failure: SubmitFailurePolicy) -> Option<Self> {
        match route {
            Route::AddCoupon { program_id } => Some(Self::new(program_id.clone(), on_failure)),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        "Add New Coupon"
    }

    pub fn program_id(&self) -> &ProgramId {
        &self.program_id
    }

    /// Load the partner's tiers for the dropdown.
    ///
    /// Failures are logged and leave the dropdown empty; the form stays usable.
    pub async fn mount(&mut self, client: &LoyaltyClient, store: &ClientStore) {
        let partner_id = match store.partner_id().await {
            Ok(Some(partner_id)) => partner_id,
            Ok(None) => {
                warn!("No partner id set; tier dropdown left empty");
                return;
            }
            Err(e) => {
                error!("Error reading partner id: {}", e);
                return;
            }
        };

        match tiers::list(client, &partner_id).await {
            Ok(list) => {
                info!("Loaded {} tiers for coupon form", list.len());
                self.tiers = TierSnapshot::fetched(list);
            }
            Err(e) => error!("Error fetching tiers: {}", e),
        }
    }

    pub fn tiers(&self) -> &[Tier] {
        self.tiers.tiers()
    }

    /// Dropdown entries: one per tier, or a single disabled placeholder
    pub fn tier_options(&self) -> Vec<TierOption> {
        let tiers = self.tiers.tiers();
        if tiers.is_empty() {
            return vec![TierOption {
                value: None,
                label: NO_TIERS_LABEL.to_string(),
                disabled: true,
            }];
        }
        tiers
            .iter()
            .map(|tier| TierOption {
                value: Some(tier.tier_id.clone()),
                label: tier.tier_name.clone(),
                disabled: false,
            })
            .collect()
    }

    /// Pick a tier; only ids offered by the dropdown are accepted
    pub fn select_tier(&mut self, tier_id: &TierId) -> bool {
        let offered = self.tiers.find(tier_id).is_some();
        if offered {
            self.draft.tier_id = Some(tier_id.clone());
        }
        offered
    }

    pub fn values(&self) -> &CouponDraft {
        &self.draft
    }

    /// Edit the values. The tier is only set through [`Self::select_tier`].
    pub fn edit(&mut self, f: impl FnOnce(&mut CouponDraft)) {
        let tier_id = self.draft.tier_id.clone();
        f(&mut self.draft);
        self.draft.tier_id = tier_id;
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Validate, merge in the program id and create the coupon.
    ///
    /// Success always returns to the previous screen; a failure follows the
    /// failure policy.
    pub async fn submit(
        &mut self,
        client: &LoyaltyClient,
        store: &ClientStore,
        nav: &mut Navigator,
    ) -> Result<SubmitOutcome<Coupon>> {
        let valid = match validate_coupon(&self.draft) {
            Ok(valid) => valid,
            Err(errors) => {
                self.errors = errors.clone();
                return Ok(SubmitOutcome::Invalid(errors));
            }
        };
        self.errors = ValidationErrors::new();

        let payload = valid.into_payload(self.program_id.clone());

        match coupons::create(client, &payload).await {
            Ok(coupon) => {
                info!("Coupon created: {}", coupon.coupon_title);
                if let Err(e) = store.append_coupon(coupon.clone()).await {
                    warn!("Coupon created but the local mirror was not updated: {}", e);
                }
                nav.back();
                Ok(SubmitOutcome::Created(coupon))
            }
            Err(e) => {
                error!("Error creating coupon: {}", e);
                let navigated_back = self.on_failure == SubmitFailurePolicy::NavigateBack;
                if navigated_back {
                    nav.back();
                }
                Ok(SubmitOutcome::Failed {
                    error: e,
                    navigated_back,
                })
            }
        }
    }
}
