//! Tier commands: the list page, the add form and the delete flow

use crate::cli::{OutputFormat, TierArgs};
use crate::error::{CliError, CliResult};
use crate::output::{print_json, render_form_errors, render_tier, render_tiers_view};
use crate::prompt::StdinConfirm;
use crate::AppState;
use loyalty_core::{Error, TierId};
use loyalty_engine::{
    AddTierForm, Answer, Confirm, DeleteOutcome, Navigator, Route, SubmitOutcome, TiersPage,
};
use loyalty_networking::api::tiers;
use serde_json::json;
use tracing::{info, warn};

/// Load and render the tiers list page
pub async fn list(state: &AppState) -> CliResult<()> {
    let mut page = TiersPage::new();
    page.load(&state.client, &state.store).await?;
    render_tiers_view(&page.view(), state.format, state.colour)
}

pub async fn show(state: &AppState, tier_id: &TierId) -> CliResult<()> {
    let tier = tiers::get_by_id(&state.client, tier_id).await?;
    render_tier(&tier, state.format, state.colour)
}

/// Fill the add-tier form from the arguments and submit it
pub async fn add(state: &AppState, args: TierArgs) -> CliResult<()> {
    let mut nav = Navigator::with_history([Route::Tiers, Route::AddTier { free: args.free }]);
    let mut form = AddTierForm::for_route(nav.current(), state.policies.tier)
        .ok_or_else(|| CliError::failure(anyhow::anyhow!("not on the add-tier screen")))?;

    form.edit(|draft| {
        draft.tier_name = args.name.unwrap_or_default();
        draft.description = args.description.unwrap_or_default();
        draft.accrual_multiplier = args.accrual_multiplier;
        draft.redemption_limit_of_purchase = args.redemption_limit;
        draft.conversion = args.conversion;
        draft.trigger_amount = args.trigger_amount;
        draft.trigger_duration = args.trigger_duration;
        if args.coupon_probability.is_some() {
            draft.coupon_probability = args.coupon_probability;
        }
        if let Some(colour) = args.colour {
            draft.colour = colour;
        }
    });

    let outcome = form.submit(&state.client, &state.store, &mut nav).await?;
    match outcome {
        SubmitOutcome::Invalid(errors) => {
            render_form_errors(form.title(), &errors, state.format)?;
            Err(CliError::from(Error::Validation(errors)))
        }
        SubmitOutcome::Created(tier) => {
            if state.format == OutputFormat::Table {
                if tier.tier_id.is_unassigned() {
                    println!("Created tier {}", tier.tier_name);
                } else {
                    println!("Created tier {} ({})", tier.tier_name, tier.tier_id);
                }
            }
            show_current(state, &nav).await
        }
        SubmitOutcome::Failed {
            error,
            navigated_back,
        } => {
            if navigated_back {
                // The entered values are gone; show where the user landed
                show_current(state, &nav).await?;
            }
            Err(CliError::from(error))
        }
    }
}

/// Re-run the list page when navigation landed on it
async fn show_current(state: &AppState, nav: &Navigator) -> CliResult<()> {
    if nav.current() == &Route::Tiers {
        list(state).await
    } else {
        Ok(())
    }
}

/// The edit route exists but has no screen behind it
pub async fn edit(state: &AppState, tier_id: &TierId) -> CliResult<()> {
    let page = TiersPage::new();
    let mut nav = Navigator::with_history([Route::Tiers]);
    page.edit(tier_id, &mut nav);
    warn!("No screen for route {}", nav.current());
    if state.format == OutputFormat::Json {
        print_json(&json!({ "route": nav.current(), "available": false }))?;
    }
    Err(CliError::validation(format!(
        "editing tier {tier_id} is not available"
    )))
}

/// Confirm on stdin (unless `yes`) and delete a listed, non-free tier
pub async fn delete(state: &AppState, tier_id: &TierId, yes: bool) -> CliResult<()> {
    let mut page = TiersPage::new();
    page.load(&state.client, &state.store).await?;

    let mut nav = Navigator::with_history([Route::Tiers]);
    let mut stdin = StdinConfirm;
    let mut assume_yes = Answer(true);
    let confirm: &mut dyn Confirm = if yes { &mut assume_yes } else { &mut stdin };

    match page.delete(tier_id, confirm, &state.client, &mut nav).await {
        DeleteOutcome::Deleted => {
            info!("Deleted tier {}, now on {}", tier_id, nav.current());
            report(state, tier_id, "deleted")
        }
        DeleteOutcome::Declined => report(state, tier_id, "cancelled"),
        DeleteOutcome::Protected => Err(CliError::validation(format!(
            "tier {tier_id} is the free tier and cannot be deleted"
        ))),
        DeleteOutcome::NotListed => Err(CliError::from(Error::NotFound(format!(
            "tier {tier_id} is not in the current partner's list"
        )))),
        DeleteOutcome::Failed(error) => Err(CliError::from(error)),
    }
}

fn report(state: &AppState, tier_id: &TierId, result: &str) -> CliResult<()> {
    match state.format {
        OutputFormat::Json => print_json(&json!({ "tierId": tier_id, "result": result })),
        OutputFormat::Table => {
            println!("tier {tier_id}: {result}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use loyalty_core::PartnerId;
    use loyalty_networking::LoyaltyClient;
    use loyalty_persistence::{ClientStore, Database};

    async fn state_for(server: &MockServer, partner: Option<&str>) -> AppState {
        let db = Database::connect_in_memory().await.unwrap();
        let store = ClientStore::new(&db);
        if let Some(p) = partner {
            store.set_partner_id(&PartnerId::new(p).unwrap()).await.unwrap();
        }
        let client = LoyaltyClient::new(&server.base_url()).unwrap();
        AppState::with_parts(client, store, OutputFormat::Json)
    }

    #[tokio::test]
    async fn test_add_invalid_exits_with_validation() {
        let server = MockServer::start_async().await;
        let state = state_for(&server, Some("P-1")).await;

        let err = add(&state, TierArgs::default()).await.unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().contains("tierName"));
    }

    #[tokio::test]
    async fn test_add_without_partner_exits_with_validation() {
        let server = MockServer::start_async().await;
        let state = state_for(&server, None).await;
        let args = TierArgs {
            free: true,
            name: Some("Member".to_string()),
            accrual_multiplier: Some(1.0),
            redemption_limit: Some(5.0),
            conversion: Some(1.0),
            description: Some("Everyone".to_string()),
            ..TierArgs::default()
        };

        let err = add(&state, args).await.unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().contains("partner set"));
    }

    #[tokio::test]
    async fn test_add_free_tier_then_lists() {
        let server = MockServer::start_async().await;
        let create = server.mock(|when, then| {
            when.method(POST).path("/tiers/createTier").json_body(json!({
                "partner_id": "P-1",
                "tierName": "Member",
                "triggerAmount": 0.0,
                "triggerDuration": null,
                "accrualMultiplier": 1.0,
                "redemptionLimitOfPurchase": 5.0,
                "conversion": 1.0,
                "description": "Everyone",
                "couponProbability": 0.0,
                "colour": "#FFFFFF"
            }));
            then.status(200).json_body(json!({
                "tierId": 1,
                "tierName": "Member",
                "triggerAmount": 0,
                "triggerDuration": null,
                "colour": "#FFFFFF"
            }));
        });
        let list_mock = server.mock(|when, then| {
            when.method(GET).path("/tiers/getAllPartnerTiers");
            then.status(200).json_body(json!([
                { "tierId": 1, "tierName": "Member", "triggerAmount": 0, "colour": "#FFFFFF" }
            ]));
        });
        let state = state_for(&server, Some("P-1")).await;
        let args = TierArgs {
            free: true,
            name: Some("Member".to_string()),
            accrual_multiplier: Some(1.0),
            redemption_limit: Some(5.0),
            conversion: Some(1.0),
            description: Some("Everyone".to_string()),
            ..TierArgs::default()
        };

        add(&state, args).await.unwrap();

        create.assert();
        list_mock.assert();
    }

    #[tokio::test]
    async fn test_delete_free_tier_is_refused() {
        let server = MockServer::start_async().await;
        let _list = server.mock(|when, then| {
            when.method(GET).path("/tiers/getAllPartnerTiers");
            then.status(200).json_body(json!([
                { "tierId": 1, "tierName": "Member", "triggerAmount": 0, "colour": "#FFFFFF" }
            ]));
        });
        let state = state_for(&server, Some("P-1")).await;

        let err = delete(&state, &"1".parse::<TierId>().unwrap(), true)
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_list_failure_exits_with_failure() {
        let server = MockServer::start_async().await;
        let _list = server.mock(|when, then| {
            when.method(GET).path("/tiers/getAllPartnerTiers");
            then.status(502);
        });
        let state = state_for(&server, Some("P-1")).await;

        let err = list(&state).await.unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
