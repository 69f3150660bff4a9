//! Loyalty backend HTTP client

use loyalty_core::{Coupon, Error, NewCoupon, NewTier, PartnerId, Result, Tier, TierId};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client, Response,
};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument, warn};
use url::Url;

/// Where the backend lives unless configured otherwise
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api/v1/lms";

/// HTTP client for the tier and coupon endpoints
///
/// Every call is a single request with no retry and no timeout override.
/// A 2xx create is a success even when the body is not a full record.
#[derive(Debug, Clone)]
pub struct LoyaltyClient {
    http: Client,
    tiers_base: String,
    coupons_base: String,
}

impl LoyaltyClient {
    /// Create a client rooted at `api_base` (e.g. `http://localhost:8080/api/v1/lms`)
    pub fn new(api_base: &str) -> Result<Self> {
        let http = Client::builder()
            .default_headers(Self::default_headers())
            .build()
            .map_err(|e| Error::NetworkError(format!("failed to build HTTP client: {}", e)))?;
        Self::with_http(http, api_base)
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_http(http: Client, api_base: &str) -> Result<Self> {
        let parsed = Url::parse(api_base)
            .map_err(|e| Error::InvalidData(format!("invalid API base '{}': {}", api_base, e)))?;
        let base = parsed.as_str().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            tiers_base: format!("{}/tiers", base),
            coupons_base: format!("{}/coupons", base),
        })
    }

    /// Headers sent with every request
    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        // The browser console asserted this on every request; the backend still expects it
        headers.insert("access-control-allow-origin", HeaderValue::from_static("*"));
        headers
    }

    /// Turn a non-success status into `Error::ApiError`, keeping the body for the log
    async fn check_status(response: Response, what: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        error!("{} failed: HTTP {}: {}", what, status, body);
        Err(Error::ApiError {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        let body = response.text().await.map_err(|e| {
            error!("Failed to read {} response body: {}", what, e);
            Error::NetworkError(e.to_string())
        })?;
        serde_json::from_str(&body).map_err(|e| {
            error!(
                "Failed to parse {} response: {}. Body preview: {}",
                what,
                e,
                body.chars().take(500).collect::<String>()
            );
            Error::InvalidData(e.to_string())
        })
    }

    /// Decode a create response, or fall back to the submitted record when the body is not one
    async fn decode_created<T: DeserializeOwned>(
        response: Response,
        what: &str,
        submitted: impl FnOnce() -> T,
    ) -> T {
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read {} response body, keeping the submitted values: {}", what, e);
                return submitted();
            }
        };
        match serde_json::from_str(&body) {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    "{} response is not a record ({}), keeping the submitted values. Body preview: {}",
                    what,
                    e,
                    body.chars().take(500).collect::<String>()
                );
                submitted()
            }
        }
    }

    fn transport_error(what: &str, err: reqwest::Error) -> Error {
        error!("{} request failed: {}", what, err);
        Error::from(err)
    }

    /// `GET /tiers/getAllPartnerTiers?id=<partnerId>`
    #[instrument(skip(self))]
    pub async fn get_partner_tiers(&self, partner_id: &PartnerId) -> Result<Vec<Tier>> {
        let url = format!("{}/getAllPartnerTiers", self.tiers_base);
        debug!("Fetching tiers from: {}", url);

        let response = self
            .http
            .get(&url)
            .query(&[("id", partner_id.as_str())])
            .send()
            .await
            .map_err(|e| Self::transport_error("Tier list", e))?;

        debug!("Tier list response status: {}", response.status());
        let response = Self::check_status(response, "Tier list").await?;
        let tiers: Vec<Tier> = Self::decode(response, "tier list").await?;

        debug!("Fetched {} tiers for partner {}", tiers.len(), partner_id);
        Ok(tiers)
    }

    /// `GET /tiers/getTierByTierId?id=<tierId>`
    #[instrument(skip(self))]
    pub async fn get_tier(&self, tier_id: &TierId) -> Result<Tier> {
        let url = format!("{}/getTierByTierId", self.tiers_base);
        let id = tier_id.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[("id", id.as_str())])
            .send()
            .await
            .map_err(|e| Self::transport_error("Tier lookup", e))?;

        let response = Self::check_status(response, "Tier lookup").await?;
        let tier: Tier = Self::decode(response, "tier").await?;

        debug!("Fetched tier {} ({})", tier.tier_name, tier_id);
        Ok(tier)
    }

    /// `POST /tiers/createTier` with the tier as JSON body
    #[instrument(skip(self, tier), fields(tier_name = %tier.tier_name))]
    pub async fn create_tier(&self, tier: &NewTier) -> Result<Tier> {
        let url = format!("{}/createTier", self.tiers_base);
        debug!("Creating tier at: {}", url);

        let response = self
            .http
            .post(&url)
            .json(tier)
            .send()
            .await
            .map_err(|e| Self::transport_error("Create tier", e))?;

        let response = Self::check_status(response, "Create tier").await?;
        let created: Tier =
            Self::decode_created(response, "Created tier", || Tier::from(tier.clone())).await;

        debug!("Created tier {} with id {}", created.tier_name, created.tier_id);
        Ok(created)
    }

    /// `DELETE /tiers/deleteTierbyId?tierId=<tierId>`
    #[instrument(skip(self))]
    pub async fn delete_tier(&self, tier_id: &TierId) -> Result<()> {
        let url = format!("{}/deleteTierbyId", self.tiers_base);
        let id = tier_id.to_string();

        let response = self
            .http
            .delete(&url)
            .query(&[("tierId", id.as_str())])
            .send()
            .await
            .map_err(|e| Self::transport_error("Delete tier", e))?;

        let response = Self::check_status(response, "Delete tier").await?;
        // The backend answers with a plain-text confirmation
        let message = response.text().await.unwrap_or_default();

        debug!("Tier {} deleted: {}", tier_id, message);
        Ok(())
    }

    /// `POST /coupons` with the coupon as JSON body
    #[instrument(skip(self, coupon), fields(coupon_title = %coupon.coupon_title))]
    pub async fn create_coupon(&self, coupon: &NewCoupon) -> Result<Coupon> {
        debug!("Creating coupon at: {}", self.coupons_base);

        let response = self
            .http
            .post(&self.coupons_base)
            .json(coupon)
            .send()
            .await
            .map_err(|e| Self::transport_error("Create coupon", e))?;

        let response = Self::check_status(response, "Create coupon").await?;
        let created: Coupon =
            Self::decode_created(response, "Created coupon", || Coupon::from(coupon.clone())).await;

        debug!("Created coupon {}", created.coupon_title);
        Ok(created)
    }
}
