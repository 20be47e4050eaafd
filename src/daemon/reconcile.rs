use tracing::{debug, info};

use crate::dns::{CloudflareApi, RecordRef};
use crate::error::Error;

/// Outcome of one read-compare-write pass over a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The record content diverged and was overwritten. Carries the
    /// provider-confirmed new content.
    Updated { content: String },
    /// The record already matched the observed IP; nothing written.
    Unchanged,
}

/// Bring one record in line with the observed public IP.
///
/// Identifier shapes are checked before any network call. Only "A"
/// records are ever written; the update echoes every fetched field
/// except the content. Re-running with the same IP is a no-op.
pub async fn reconcile(
    api: &CloudflareApi,
    target: &RecordRef,
    public_ip: &str,
) -> Result<Reconciliation, Error> {
    target.validate()?;

    let record = api.get_record(&target.zone_id, &target.record_id).await?;
    if record.record_type != "A" {
        return Err(Error::UnsupportedType {
            name: record.name,
            record_type: record.record_type,
        });
    }

    debug!(
        "Record {} holds {}, public IP is {}",
        record.name, record.content, public_ip
    );
    if record.content == public_ip {
        return Ok(Reconciliation::Unchanged);
    }

    info!(
        "Updating {} from {} to {}",
        record.name, record.content, public_ip
    );
    let update = record.with_content(public_ip);
    let updated = api
        .update_record(&target.zone_id, &target.record_id, &update)
        .await?;

    Ok(Reconciliation::Updated {
        content: updated.content,
    })
}
