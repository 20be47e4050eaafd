use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::types::{DnsRecord, RecordUpdate, Zone};
use crate::error::{ApiError, ApiErrors, Error};

const API_BASE: &str = "https://api.cloudflare.com/client/v4";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Every Cloudflare response is wrapped in this envelope. Only an
/// explicit `success` with a present `result` counts as success.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    errors: Vec<ApiError>,
    result: Option<T>,
}

/// Result of the token verification endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenStatus {
    pub id: String,
    pub status: String,
}

pub struct CloudflareApi {
    client: Client,
    base_url: String,
    api_token: String,
}

impl CloudflareApi {
    pub fn new(api_token: &str) -> Result<Self, Error> {
        Self::with_base_url(api_token, API_BASE)
    }

    /// Point the client at a different API root. Used by tests.
    pub fn with_base_url(api_token: &str, base_url: &str) -> Result<Self, Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
        })
    }

    pub async fn verify_token(&self) -> Result<TokenStatus, Error> {
        let url = format!("{}/user/tokens/verify", self.base_url);
        match self.send(self.client.get(&url), "verifying the API token").await {
            Err(Error::Api { errors, .. }) => Err(Error::Auth { errors }),
            other => other,
        }
    }

    pub async fn list_zones(&self) -> Result<Vec<Zone>, Error> {
        let url = format!("{}/zones", self.base_url);
        self.send(self.client.get(&url), "listing zones").await
    }

    pub async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>, Error> {
        let url = format!("{}/zones/{}/dns_records", self.base_url, zone_id);
        self.send(self.client.get(&url), "listing DNS records").await
    }

    pub async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<DnsRecord, Error> {
        let url = format!(
            "{}/zones/{}/dns_records/{}",
            self.base_url, zone_id, record_id
        );
        self.send(self.client.get(&url), "fetching the DNS record")
            .await
    }

    pub async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        update: &RecordUpdate,
    ) -> Result<DnsRecord, Error> {
        let url = format!(
            "{}/zones/{}/dns_records/{}",
            self.base_url, zone_id, record_id
        );
        self.send(self.client.put(&url).json(update), "updating the DNS record")
            .await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<T, Error> {
        let response = request.bearer_auth(&self.api_token).send().await?;
        debug!("Cloudflare response while {}: {}", context, response.status());

        let envelope: Envelope<T> = response.json().await?;
        if !envelope.success {
            return Err(Error::Api {
                context: context.to_string(),
                errors: ApiErrors(envelope.errors),
            });
        }

        envelope.result.ok_or_else(|| Error::MissingResult {
            context: context.to_string(),
        })
    }
}
