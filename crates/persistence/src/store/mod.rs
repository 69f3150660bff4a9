//! Typed client-local store
//!
//! Holds the active partner and last-fetch mirrors of tiers and coupons.
//! The mirrors are never authoritative: writes overwrite, nothing merges,
//! and screens always fetch from the backend.

use crate::sqlite::{delete_value, get_value, put_value};
use crate::Database;
use chrono::{DateTime, Utc};
use loyalty_core::{Coupon, Error, PartnerId, Result, Tier};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;

/// Keys of the client store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    PartnerId,
    Tiers,
    Coupons,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::PartnerId => "partnerId",
            StoreKey::Tiers => "tiers",
            StoreKey::Coupons => "coupons",
        }
    }
}

/// A mirrored list and when it was written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedList<T> {
    pub items: Vec<T>,
    pub stored_at: DateTime<Utc>,
}

/// Client-local key/value store
#[derive(Debug, Clone)]
pub struct ClientStore {
    pool: SqlitePool,
}

impl ClientStore {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    /// The partner whose tiers this console manages
    pub async fn partner_id(&self) -> Result<Option<PartnerId>> {
        match get_value(&self.pool, StoreKey::PartnerId.as_str()).await? {
            Some(stored) => PartnerId::new(&stored.value).map(Some),
            None => Ok(None),
        }
    }

    pub async fn set_partner_id(&self, partner_id: &PartnerId) -> Result<()> {
        put_value(&self.pool, StoreKey::PartnerId.as_str(), partner_id.as_str()).await
    }

    /// Forget the partner; returns whether one was set
    pub async fn clear_partner_id(&self) -> Result<bool> {
        delete_value(&self.pool, StoreKey::PartnerId.as_str()).await
    }

    pub async fn cached_tiers(&self) -> Result<Option<CachedList<Tier>>> {
        self.read_list(StoreKey::Tiers).await
    }

    /// Overwrite the tier mirror with a fresh fetch
    pub async fn mirror_tiers(&self, tiers: &[Tier]) -> Result<()> {
        self.write_list(StoreKey::Tiers, tiers).await
    }

    /// Append one tier to the mirror without re-fetching
    pub async fn append_tier(&self, tier: Tier) -> Result<()> {
        let mut tiers = self.read_items::<Tier>(StoreKey::Tiers).await?;
        tiers.push(tier);
        self.write_list(StoreKey::Tiers, &tiers).await
    }

    pub async fn cached_coupons(&self) -> Result<Option<CachedList<Coupon>>> {
        self.read_list(StoreKey::Coupons).await
    }

    pub async fn append_coupon(&self, coupon: Coupon) -> Result<()> {
        let mut coupons = self.read_items::<Coupon>(StoreKey::Coupons).await?;
        coupons.push(coupon);
        self.write_list(StoreKey::Coupons, &coupons).await
    }

    async fn read_list<T: DeserializeOwned>(&self, key: StoreKey) -> Result<Option<CachedList<T>>> {
        let Some(stored) = get_value(&self.pool, key.as_str()).await? else {
            return Ok(None);
        };
        let items: Vec<T> = serde_json::from_str(&stored.value).map_err(|e| {
            Error::InvalidData(format!("corrupt '{}' mirror: {}", key.as_str(), e))
        })?;
        Ok(Some(CachedList {
            items,
            stored_at: stored.updated_at,
        }))
    }

    /// Current mirror contents; a corrupt mirror reads as empty since it is only a cache
    async fn read_items<T: DeserializeOwned>(&self, key: StoreKey) -> Result<Vec<T>> {
        match self.read_list::<T>(key).await {
            Ok(Some(list)) => Ok(list.items),
            Ok(None) => Ok(Vec::new()),
            Err(Error::InvalidData(reason)) => {
                debug!("Discarding unreadable mirror: {}", reason);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn write_list<T: Serialize>(&self, key: StoreKey, items: &[T]) -> Result<()> {
        let json = serde_json::to_string(items)?;
        put_value(&self.pool, key.as_str(), &json).await?;
        debug!("Mirrored {} items under '{}'", items.len(), key.as_str());
        Ok(())
    }
}
