//! Add-tier form

use super::SubmitOutcome;
use crate::navigation::{Navigator, Route};
use crate::policy::SubmitFailurePolicy;
use loyalty_core::{Error, Result, Tier, TierDraft, ValidationErrors};
use loyalty_networking::{api::tiers, LoyaltyClient};
use loyalty_persistence::ClientStore;
use tracing::{error, info, warn};

/// Fields that cannot be edited on a free tier
const FREE_TIER_LOCKED: [&str; 2] = ["triggerAmount", "triggerDuration"];

/// Collects tier attributes and submits them through the tier service
#[derive(Debug)]
pub struct AddTierForm {
    draft: TierDraft,
    errors: ValidationErrors,
    on_failure: SubmitFailurePolicy,
}

impl AddTierForm {
    /// Open the form; `free` comes from the navigation state of the caller
    pub fn new(free: bool, on_failure: SubmitFailurePolicy) -> Self {
        let draft = if free {
            TierDraft::new_free()
        } else {
            TierDraft::new_paid()
        };
        Self {
            draft,
            errors: ValidationErrors::new(),
            on_failure,
        }
    }

    /// Open the form for an `AddTier` route
    pub fn for_route(route: &Route, on_failure: SubmitFailurePolicy) -> Option<Self> {
        match route {
            Route::AddTier { free } => Some(Self::new(*free, on_failure)),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        if self.draft.is_free_tier {
            "Add Free Tier"
        } else {
            "Add New Tier"
        }
    }

    pub fn is_free(&self) -> bool {
        self.draft.is_free_tier
    }

    pub fn is_field_disabled(&self, field: &str) -> bool {
        self.draft.is_free_tier && FREE_TIER_LOCKED.contains(&field)
    }

    pub fn values(&self) -> &TierDraft {
        &self.draft
    }

    /// Edit the values; the free-tier flag and locked fields are restored afterwards
    pub fn edit(&mut self, f: impl FnOnce(&mut TierDraft)) {
        let free = self.draft.is_free_tier;
        let (amount, duration) = (self.draft.trigger_amount, self.draft.trigger_duration);
        f(&mut self.draft);
        self.draft.is_free_tier = free;
        if free {
            self.draft.trigger_amount = amount;
            self.draft.trigger_duration = duration;
        }
    }

    /// Errors from the last submit attempt, shown next to each field
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Validate, attach the partner, create, then update the mirror and go back.
    ///
    /// Validation errors and a missing partner never reach the network. A
    /// failed request is logged and handled per the failure policy.
    pub async fn submit(
        &mut self,
        client: &LoyaltyClient,
        store: &ClientStore,
        nav: &mut Navigator,
    ) -> Result<SubmitOutcome<Tier>> {
        let valid = match self.draft.validate() {
            Ok(valid) => valid,
            Err(errors) => {
                self.errors = errors.clone();
                return Ok(SubmitOutcome::Invalid(errors));
            }
        };
        self.errors = ValidationErrors::new();

        let partner_id = store.partner_id().await?.ok_or(Error::MissingPartner)?;
        let payload = valid.into_payload(partner_id);

        match tiers::create(client, &payload).await {
            Ok(tier) => {
                info!("Created tier: {} ({})", tier.tier_name, tier.tier_id);
                if let Err(e) = store.append_tier(tier.clone()).await {
                    warn!("Tier created but the local mirror was not updated: {}", e);
                }
                nav.back();
                Ok(SubmitOutcome::Created(tier))
            }
            Err(e) => {
                error!("Error creating tier: {}", e);
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

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use loyalty_core::{Id, PartnerId, TierId};
    use loyalty_persistence::Database;
    use serde_json::json;

    async fn store_with_partner(partner: Option<&str>) -> ClientStore {
        let db = Database::connect_in_memory().await.unwrap();
        let store = ClientStore::new(&db);
        if let Some(p) = partner {
            store.set_partner_id(&PartnerId::new(p).unwrap()).await.unwrap();
        }
        store
    }

    fn fill_gold(form: &mut AddTierForm) {
        form.edit(|d| {
            d.tier_name = "Gold".to_string();
            d.trigger_amount = Some(500.0);
            d.trigger_duration = Some(6.0);
            d.accrual_multiplier = Some(2.0);
            d.redemption_limit_of_purchase = Some(10.0);
            d.conversion = Some(1.5);
            d.description = "Gold tier".to_string();
            d.coupon_probability = Some(0.2);
            d.colour = "#FFD700".to_string();
        });
    }

    fn tiers_nav() -> Navigator {
        Navigator::with_history([Route::Tiers, Route::AddTier { free: false }])
    }

    #[tokio::test]
    async fn test_gold_tier_submit_strips_flag_and_returns_to_list() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/tiers/createTier").json_body(json!({
                "partner_id": "P-1",
                "tierName": "Gold",
                "triggerAmount": 500.0,
                "triggerDuration": 6,
                "accrualMultiplier": 2.0,
                "redemptionLimitOfPurchase": 10.0,
                "conversion": 1.5,
                "description": "Gold tier",
                "couponProbability": 0.2,
                "colour": "#FFD700"
            }));
            then.status(200).json_body(json!({
                "tierId": 12,
                "partnerId": "P-1",
                "tierName": "Gold",
                "triggerAmount": 500,
                "triggerDuration": 6,
                "accrualMultiplier": 2,
                "redemptionLimitOfPurchase": 10,
                "conversion": 1.5,
                "description": "Gold tier",
                "couponProbability": 0.2,
                "colour": "#FFD700"
            }));
        });

        let client = LoyaltyClient::new(&server.base_url()).unwrap();
        let store = store_with_partner(Some("P-1")).await;
        let mut nav = tiers_nav();
        let mut form = AddTierForm::new(false, SubmitFailurePolicy::Stay);
        fill_gold(&mut form);

        let outcome = form.submit(&client, &store, &mut nav).await.unwrap();

        mock.assert();
        match outcome {
            SubmitOutcome::Created(tier) => assert_eq!(tier.tier_id, TierId(Id::Numeric(12))),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(nav.current(), &Route::Tiers);

        let mirror = store.cached_tiers().await.unwrap().unwrap();
        assert_eq!(mirror.items.len(), 1);
        assert_eq!(mirror.items[0].tier_name, "Gold");
    }

    #[tokio::test]
    async fn test_text_acknowledgement_counts_as_created() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/tiers/createTier");
            then.status(201).body("Tier created successfully");
        });

        let client = LoyaltyClient::new(&server.base_url()).unwrap();
        let store = store_with_partner(Some("P-1")).await;
        let mut nav = tiers_nav();
        let mut form = AddTierForm::new(false, SubmitFailurePolicy::Stay);
        fill_gold(&mut form);

        let outcome = form.submit(&client, &store, &mut nav).await.unwrap();

        mock.assert();
        match outcome {
            SubmitOutcome::Created(tier) => {
                assert!(tier.tier_id.is_unassigned());
                assert_eq!(tier.tier_name, "Gold");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(nav.current(), &Route::Tiers);

        let mirror = store.cached_tiers().await.unwrap().unwrap();
        assert_eq!(mirror.items.len(), 1);
        assert_eq!(mirror.items[0].colour, "#FFD700");
    }

    #[tokio::test]
    async fn test_invalid_draft_sends_nothing() {
        // No server: any request would fail with a network error instead of `Invalid`
        let client = LoyaltyClient::new("http://127.0.0.1:9").unwrap();
        let store = store_with_partner(Some("P-1")).await;
        let mut nav = tiers_nav();
        let mut form = AddTierForm::new(false, SubmitFailurePolicy::Stay);

        let outcome = form.submit(&client, &store, &mut nav).await.unwrap();

        match outcome {
            SubmitOutcome::Invalid(errors) => {
                assert!(errors.contains("tierName"));
                assert!(errors.contains("triggerDuration"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(form.errors().contains("tierName"));
        assert_eq!(nav.current(), &Route::AddTier { free: false });
    }

    #[tokio::test]
    async fn test_failure_stays_on_form_by_default() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/tiers/createTier");
            then.status(500).body("database down");
        });

        let client = LoyaltyClient::new(&server.base_url()).unwrap();
        let store = store_with_partner(Some("P-1")).await;
        let mut nav = tiers_nav();
        let mut form = AddTierForm::new(false, SubmitFailurePolicy::Stay);
        fill_gold(&mut form);

        let outcome = form.submit(&client, &store, &mut nav).await.unwrap();

        mock.assert();
        assert!(matches!(
            outcome,
            SubmitOutcome::Failed {
                navigated_back: false,
                ..
            }
        ));
        assert_eq!(nav.current(), &Route::AddTier { free: false });
        assert_eq!(form.values().tier_name, "Gold");
        assert!(store.cached_tiers().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failure_can_navigate_back() {
        let server = MockServer::start_async().await;
        let _mock = server.mock(|when, then| {
            when.method(POST).path("/tiers/createTier");
            then.status(500);
        });

        let client = LoyaltyClient::new(&server.base_url()).unwrap();
        let store = store_with_partner(Some("P-1")).await;
        let mut nav = tiers_nav();
        let mut form = AddTierForm::new(false, SubmitFailurePolicy::NavigateBack);
        fill_gold(&mut form);

        let outcome = form.submit(&client, &store, &mut nav).await.unwrap();

        assert!(matches!(
            outcome,
            SubmitOutcome::Failed {
                navigated_back: true,
                ..
            }
        ));
        assert_eq!(nav.current(), &Route::Tiers);
    }

    #[tokio::test]
    async fn test_missing_partner_is_an_error() {
        let client = LoyaltyClient::new("http://127.0.0.1:9").unwrap();
        let store = store_with_partner(None).await;
        let mut nav = tiers_nav();
        let mut form = AddTierForm::new(false, SubmitFailurePolicy::Stay);
        fill_gold(&mut form);

        let err = form.submit(&client, &store, &mut nav).await.unwrap_err();
        assert!(matches!(err, Error::MissingPartner));
    }

    #[test]
    fn test_free_form_locks_trigger_fields() {
        let mut form = AddTierForm::new(true, SubmitFailurePolicy::Stay);
        assert_eq!(form.title(), "Add Free Tier");
        assert!(form.is_field_disabled("triggerAmount"));
        assert!(!form.is_field_disabled("tierName"));

        form.edit(|d| {
            d.trigger_amount = Some(250.0);
            d.trigger_duration = Some(3.0);
            d.is_free_tier = false;
        });
        assert!(form.is_free());
        assert_eq!(form.values().trigger_amount, Some(0.0));
        assert_eq!(form.values().trigger_duration, None);

        let paid = AddTierForm::for_route(&Route::AddTier { free: false }, SubmitFailurePolicy::Stay)
            .unwrap();
        assert_eq!(paid.title(), "Add New Tier");
        assert!(AddTierForm::for_route(&Route::Tiers, SubmitFailurePolicy::Stay).is_none());
    }
}
