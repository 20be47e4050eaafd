use std::net::Ipv4Addr;
use std::time::Duration;

use reqwest::Client;

use crate::error::Error;

pub const DEFAULT_IP_ENDPOINT: &str = "https://api.ipify.org";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetch the caller's public IPv4 address from an echo endpoint.
///
/// One request, no retries; the next scheduled cycle is the retry
/// mechanism. The response body is trimmed and must parse as IPv4.
pub async fn get_public_ip(endpoint: &str) -> Result<Ipv4Addr, Error> {
    let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

    let body = client
        .get(endpoint)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let trimmed = body.trim();
    trimmed.parse().map_err(|_| Error::InvalidPublicIp {
        body: trimmed.to_string(),
    })
}
