//! HTTP client for the storefront `Stores-FindNearestStores` endpoint.
//!
//! The endpoint is anonymous and answers one JSON document per region with
//! every store inside a fixed radius of a fixed origin point. Certificate
//! validation is disabled for this host: the storefront's chain does not
//! always validate, so responses carry no confidentiality guarantee against
//! an active interceptor.

use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, Url};
use stockwatch_core::{AppConfig, Region};

use crate::error::LocatorError;
use crate::retry::retry_with_backoff;
use crate::snapshot::StoreSnapshot;
use crate::types::StoreResponse;

/// Total request budget, connect included.
pub const REQUEST_TIMEOUT_SECS: u64 = 15;
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

const ORIGIN_LATITUDE: &str = "38.2088210000000";
const ORIGIN_LONGITUDE: &str = "15.5470420606796";

/// Client for the store-locator endpoint.
///
/// Use [`StoreDirectoryClient::new`] for the real storefronts or
/// [`StoreDirectoryClient::with_base_url`] to send every region to one base
/// URL (a mock server in tests).
pub struct StoreDirectoryClient {
    client: Client,
    product_id: String,
    base_url_override: Option<Url>,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl StoreDirectoryClient {
    /// # Errors
    ///
    /// Returns [`LocatorError::ClientBuild`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        product_id: &str,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, LocatorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .danger_accept_invalid_certs(true)
            .user_agent(user_agent)
            .build()
            .map_err(LocatorError::ClientBuild)?;
        Ok(Self {
            client,
            product_id: product_id.to_owned(),
            base_url_override: None,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Creates a client whose requests all go to `base_url` regardless of region.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::ClientBuild`] if the `reqwest::Client` cannot
    /// be constructed, or [`LocatorError::InvalidEndpoint`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        base_url: &str,
        product_id: &str,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, LocatorError> {
        let parsed = Url::parse(base_url).map_err(|e| LocatorError::InvalidEndpoint {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        let mut client = Self::new(product_id, user_agent, max_retries, backoff_base_secs)?;
        client.base_url_override = Some(parsed);
        Ok(client)
    }

    /// Builds a client from process configuration, honouring
    /// `STOCKWATCH_DIRECTORY_URL` when set.
    ///
    /// # Errors
    ///
    /// See [`StoreDirectoryClient::new`] and [`StoreDirectoryClient::with_base_url`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, LocatorError> {
        match &config.directory_url {
            Some(base) => Self::with_base_url(
                base,
                &config.product_id,
                &config.user_agent,
                config.fetch_max_retries,
                config.fetch_retry_backoff_base_secs,
            ),
            None => Self::new(
                &config.product_id,
                &config.user_agent,
                config.fetch_max_retries,
                config.fetch_retry_backoff_base_secs,
            ),
        }
    }

    /// Full request URL for a region: base endpoint plus the fixed product,
    /// click-and-collect, stock, origin and radius parameters.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::InvalidEndpoint`] if the region's base URL
    /// does not parse.
    pub fn directory_url(&self, region: Region) -> Result<Url, LocatorError> {
        let mut url = match &self.base_url_override {
            Some(base) => base.clone(),
            None => Url::parse(region.directory_base_url()).map_err(|e| {
                LocatorError::InvalidEndpoint {
                    url: region.directory_base_url().to_owned(),
                    reason: e.to_string(),
                }
            })?,
        };
        url.query_pairs_mut()
            .append_pair("pid", &self.product_id)
            .append_pair("clickcollect", "true")
            .append_pair("pdpstock", "true")
            .append_pair("latitude", ORIGIN_LATITUDE)
            .append_pair("longitude", ORIGIN_LONGITUDE)
            .append_pair("searchedRadius", &region.search_radius().to_string())
            .append_pair("storeservices", "");
        Ok(url)
    }

    /// Fetches the current snapshot for `region`.
    ///
    /// # Errors
    ///
    /// See [`StoreDirectoryClient::fetch_snapshot`].
    pub async fn fetch_region(&self, region: Region) -> Result<StoreSnapshot, LocatorError> {
        let url = self.directory_url(region)?;
        tracing::debug!(%region, url = %url, "fetching store directory");
        self.fetch_snapshot(&url).await
    }

    /// Fetches and decodes one snapshot, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`LocatorError::Transport`]: network, TLS or timeout failure after
    ///   all retries.
    /// - [`LocatorError::Protocol`]: non-2xx status (5xx only after retries).
    /// - [`LocatorError::Decode`]: body does not match [`StoreResponse`].
    pub async fn fetch_snapshot(&self, url: &Url) -> Result<StoreSnapshot, LocatorError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            self.fetch_once(url)
        })
        .await
    }

    async fn fetch_once(&self, url: &Url) -> Result<StoreSnapshot, LocatorError> {
        let transport = |source| LocatorError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LocatorError::Protocol {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(transport)?;
        let parsed =
            serde_json::from_str::<StoreResponse>(&body).map_err(|e| LocatorError::Decode {
                context: format!("store directory response from {url}"),
                source: e,
            })?;

        if !parsed.success {
            tracing::warn!(
                url = %url,
                locations = parsed.locations.len(),
                "store directory reported success=false"
            );
        }

        Ok(StoreSnapshot::from_response(parsed, Utc::now()))
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
