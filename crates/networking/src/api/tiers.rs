//! Tier service: list, look up, create and delete tiers

use crate::LoyaltyClient;
use loyalty_core::{NewTier, PartnerId, Result, Tier, TierId};
use tracing::info;

/// All tiers owned by `partner_id`, in server order
pub async fn list(client: &LoyaltyClient, partner_id: &PartnerId) -> Result<Vec<Tier>> {
    client.get_partner_tiers(partner_id).await
}

/// A single tier
pub async fn get_by_id(client: &LoyaltyClient, tier_id: &TierId) -> Result<Tier> {
    client.get_tier(tier_id).await
}

/// Create a tier; the payload already carries the partner id
pub async fn create(client: &LoyaltyClient, tier: &NewTier) -> Result<Tier> {
    info!(
        "Creating tier '{}' for partner {}",
        tier.tier_name, tier.partner_id
    );
    client.create_tier(tier).await
}

/// Delete a tier. The backend honours any id, free tiers included.
pub async fn delete(client: &LoyaltyClient, tier_id: &TierId) -> Result<()> {
    info!("Deleting tier {}", tier_id);
    client.delete_tier(tier_id).await
}
