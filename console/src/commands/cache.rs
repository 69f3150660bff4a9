//! Local mirror inspection

use crate::error::CliResult;
use crate::output::render_cache;
use crate::AppState;

/// Print the tier and coupon mirrors as last written
pub async fn show(state: &AppState) -> CliResult<()> {
    let tiers = state.store.cached_tiers().await?;
    let coupons = state.store.cached_coupons().await?;
    render_cache(tiers.as_ref(), coupons.as_ref(), state.format)
}
