use tracing::debug;

use super::cloudflare::CloudflareApi;
use super::types::RecordRef;
use crate::error::Error;

/// Discover which zone owns `name` and which record within it matches.
///
/// The zone list is fetched once and reused across all suffix
/// attempts. Candidate zones are tried from the most specific suffix
/// outward; the first zone whose name matches is authoritative. If
/// that zone holds no record named exactly `name`, wider suffixes are
/// not tried and the name is reported as not found.
pub async fn resolve_name(api: &CloudflareApi, name: &str) -> Result<RecordRef, Error> {
    let zones = api.list_zones().await?;

    for candidate in zone_candidates(name) {
        let Some(zone) = zones.iter().find(|zone| zone.name == candidate) else {
            continue;
        };
        debug!("Name {} matched zone {} ({})", name, zone.name, zone.id);

        let records = api.list_records(&zone.id).await?;
        return match records.iter().find(|record| record.name == name) {
            Some(record) => Ok(RecordRef {
                zone_id: zone.id.clone(),
                record_id: record.id.clone(),
            }),
            None => Err(Error::NotFound {
                name: name.to_string(),
            }),
        };
    }

    Err(Error::NotFound {
        name: name.to_string(),
    })
}

/// Zone-name candidates for a dotted record name, most specific suffix
/// first. The full name itself is never a candidate, so a single-label
/// name has none.
fn zone_candidates(name: &str) -> Vec<String> {
    let labels: Vec<&str> = name.split('.').collect();
    (1..labels.len())
        .rev()
        .map(|take| labels[labels.len() - take..].join("."))
        .collect()
}
