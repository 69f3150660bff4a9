//! Coupon commands

use crate::cli::CouponArgs;
use crate::error::{CliError, CliResult};
use crate::output::{render_coupon, render_form_errors, render_tier_options};
use crate::AppState;
use loyalty_core::Error;
use loyalty_engine::{AddCouponForm, Navigator, Route, SubmitOutcome};
use tracing::{info, warn};

/// Open the add-coupon form for a program, fill it and submit
pub async fn add(state: &AppState, args: CouponArgs) -> CliResult<()> {
    let program_id = args.program_id;
    let mut nav = Navigator::with_history([
        Route::Program {
            program_id: program_id.clone(),
        },
        Route::AddCoupon { program_id },
    ]);
    let mut form = AddCouponForm::for_route(nav.current(), state.policies.coupon)
        .ok_or_else(|| CliError::failure(anyhow::anyhow!("not on the add-coupon screen")))?;

    form.mount(&state.client, &state.store).await;
    render_tier_options(&form.tier_options(), state.format);

    if let Some(tier_id) = &args.tier_id {
        if !form.select_tier(tier_id) {
            warn!("Tier {} is not offered for this partner", tier_id);
        }
    }

    form.edit(|draft| {
        draft.coupon_title = args.title.unwrap_or_default();
        draft.coupon_description = args.description.unwrap_or_default();
        if args.validity.is_some() {
            draft.validity = args.validity;
        }
        if args.max_limit.is_some() {
            draft.max_limit = args.max_limit;
        }
        if args.percentage.is_some() {
            draft.percentage = args.percentage;
        }
        draft.status = args.active;
    });

    let outcome = form.submit(&state.client, &state.store, &mut nav).await?;
    match outcome {
        SubmitOutcome::Invalid(errors) => {
            render_form_errors(form.title(), &errors, state.format)?;
            Err(CliError::from(Error::Validation(errors)))
        }
        SubmitOutcome::Created(coupon) => {
            info!("Returned to {}", nav.current());
            render_coupon(&coupon, state.format)
        }
        SubmitOutcome::Failed {
            error,
            navigated_back,
        } => {
            if navigated_back {
                info!("Returned to {}", nav.current());
            }
            Err(CliError::from(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use httpmock::prelude::*;
    use loyalty_core::{Id, PartnerId, ProgramId, TierId};
    use loyalty_networking::LoyaltyClient;
    use loyalty_persistence::{ClientStore, Database};
    use serde_json::json;

    async fn state_for(server: &MockServer) -> AppState {
        let db = Database::connect_in_memory().await.unwrap();
        let store = ClientStore::new(&db);
        store
            .set_partner_id(&PartnerId::new("P-1").unwrap())
            .await
            .unwrap();
        let client = LoyaltyClient::new(&server.base_url()).unwrap();
        AppState::with_parts(client, store, OutputFormat::Json)
    }

    fn args(tier_id: Option<TierId>) -> CouponArgs {
        CouponArgs {
            program_id: ProgramId(Id::Numeric(9)),
            tier_id,
            title: Some("Summer".to_string()),
            description: Some("10% off".to_string()),
            validity: Some(30.0),
            max_limit: Some(100.0),
            percentage: Some(10.0),
            active: true,
        }
    }

    #[tokio::test]
    async fn test_no_tiers_blocks_on_tier_selection() {
        let server = MockServer::start_async().await;
        let _tiers = server.mock(|when, then| {
            when.method(GET).path("/tiers/getAllPartnerTiers");
            then.status(200).json_body(json!([]));
        });
        let create = server.mock(|when, then| {
            when.method(POST).path("/coupons");
            then.status(201);
        });
        let state = state_for(&server).await;

        let err = add(&state, args(Some(TierId(Id::Numeric(2)))))
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().contains("tierId"));
        create.assert_calls(0);
        assert!(state.store.cached_coupons().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_created_coupon_is_mirrored() {
        let server = MockServer::start_async().await;
        let _tiers = server.mock(|when, then| {
            when.method(GET).path("/tiers/getAllPartnerTiers");
            then.status(200)
                .json_body(json!([{ "tierId": 2, "tierName": "Silver", "colour": "#c0c0c0" }]));
        });
        let create = server.mock(|when, then| {
            when.method(POST).path("/coupons");
            then.status(201).json_body(json!({
                "couponId": 77,
                "programId": 9,
                "couponTitle": "Summer",
                "tierId": 2
            }));
        });
        let state = state_for(&server).await;

        add(&state, args(Some(TierId(Id::Numeric(2))))).await.unwrap();

        create.assert();
        let mirror = state.store.cached_coupons().await.unwrap().unwrap();
        assert_eq!(mirror.items[0].coupon_title, "Summer");
    }

    #[tokio::test]
    async fn test_backend_failure_exits_with_failure() {
        let server = MockServer::start_async().await;
        let _tiers = server.mock(|when, then| {
            when.method(GET).path("/tiers/getAllPartnerTiers");
            then.status(200)
                .json_body(json!([{ "tierId": 2, "tierName": "Silver", "colour": "#c0c0c0" }]));
        });
        let _create = server.mock(|when, then| {
            when.method(POST).path("/coupons");
            then.status(500);
        });
        let state = state_for(&server).await;

        let err = add(&state, args(Some(TierId(Id::Numeric(2)))))
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
