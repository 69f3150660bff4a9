//! Active partner commands

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::print_json;
use crate::AppState;
use loyalty_core::PartnerId;
use serde_json::json;
use tracing::info;

pub async fn set(state: &AppState, raw: &str) -> CliResult<()> {
    let partner_id =
        PartnerId::new(raw).map_err(|_| CliError::validation("partner id must not be empty"))?;
    state.store.set_partner_id(&partner_id).await?;
    info!("Active partner set to {}", partner_id);
    match state.format {
        OutputFormat::Json => print_json(&json!({ "partnerId": partner_id })),
        OutputFormat::Table => {
            println!("partner: {partner_id}");
            Ok(())
        }
    }
}

pub async fn show(state: &AppState) -> CliResult<()> {
    let partner_id = state.store.partner_id().await?;
    match state.format {
        OutputFormat::Json => print_json(&json!({ "partnerId": partner_id })),
        OutputFormat::Table => {
            match partner_id {
                Some(id) => println!("partner: {id}"),
                None => println!("partner: <not set>"),
            }
            Ok(())
        }
    }
}

pub async fn clear(state: &AppState) -> CliResult<()> {
    let removed = state.store.clear_partner_id().await?;
    match state.format {
        OutputFormat::Json => print_json(&json!({ "cleared": removed })),
        OutputFormat::Table => {
            if removed {
                println!("partner cleared");
            } else {
                println!("no partner was set");
            }
            Ok(())
        }
    }
}
