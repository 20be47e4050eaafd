use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;
use tracing::{error, info, warn};

use super::reconcile::{reconcile, Reconciliation};
use crate::config::{RecordSpec, Settings};
use crate::dns::{resolve_name, CloudflareApi, RecordRef};
use crate::error::Error;
use crate::ip;

/// A record under management, resolved once at startup and reused
/// unchanged across every cycle.
#[derive(Debug, Clone)]
pub struct ManagedRecord {
    /// The record entry as the user wrote it, for reporting.
    pub label: String,
    pub target: RecordRef,
}

/// Per-record result of one cycle.
#[derive(Debug)]
pub struct RecordOutcome {
    pub label: String,
    pub result: Result<Reconciliation, Error>,
}

/// Resolve every configured spec into a concrete identifier pair.
///
/// Bare names go through zone-suffix resolution; explicit pairs pass
/// through as written. Any failure here is fatal to startup, so the
/// process never runs with a partially resolved set.
pub async fn resolve_specs(
    api: &CloudflareApi,
    specs: &[RecordSpec],
) -> Result<Vec<ManagedRecord>, Error> {
    let mut records = Vec::with_capacity(specs.len());

    for spec in specs {
        let managed = match spec {
            RecordSpec::Name(name) => {
                let target = resolve_name(api, name).await?;
                info!("Resolved name {} to {}", name, target);
                ManagedRecord {
                    label: name.clone(),
                    target,
                }
            }
            RecordSpec::Ref { zone_id, record_id } => {
                let target = RecordRef {
                    zone_id: zone_id.clone(),
                    record_id: record_id.clone(),
                };
                ManagedRecord {
                    label: target.to_string(),
                    target,
                }
            }
        };
        records.push(managed);
    }

    Ok(records)
}

/// One reconciliation pass over the whole batch.
///
/// The public IP is fetched once and shared by every record, so the
/// pass observes a single consistent address. A failed fetch aborts
/// the pass before any record is touched. Records are processed
/// strictly sequentially in configured order; one record's failure is
/// captured in its outcome and does not stop the records after it.
pub async fn run_cycle(
    api: &CloudflareApi,
    ip_endpoint: &str,
    records: &[ManagedRecord],
) -> Result<Vec<RecordOutcome>, Error> {
    let public_ip = ip::get_public_ip(ip_endpoint).await?.to_string();
    info!("Checking {} records against public IP {}", records.len(), public_ip);

    let mut outcomes = Vec::with_capacity(records.len());
    for record in records {
        let result = reconcile(api, &record.target, &public_ip).await;
        match &result {
            Ok(Reconciliation::Updated { content }) => {
                info!("Record {} updated, new IP: {}", record.label, content);
            }
            Ok(Reconciliation::Unchanged) => {
                info!("Record {} already up to date", record.label);
            }
            Err(e) => {
                warn!("Record {} failed: {}", record.label, e);
            }
        }
        outcomes.push(RecordOutcome {
            label: record.label.clone(),
            result,
        });
    }

    Ok(outcomes)
}

pub async fn run(settings: Settings) -> Result<()> {
    let api_token = settings.api_token()?;
    let api = CloudflareApi::new(&api_token)?;

    let status = api.verify_token().await?;
    info!("API token verified (status: {})", status.status);

    let records = resolve_specs(&api, &settings.records).await?;
    if records.is_empty() {
        warn!("No records configured, nothing to do");
        return Ok(());
    }

    let Some(repeat_ms) = settings.repeat_ms else {
        run_cycle(&api, &settings.ip_endpoint, &records).await?;
        return Ok(());
    };
    let interval = Duration::from_millis(repeat_ms);

    // Shutdown channel, signalled from SIGTERM/SIGINT.
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = wait_for_shutdown().await {
            error!("Error waiting for shutdown signal: {}", e);
        }
        let _ = shutdown_tx.send(true);
    });

    info!(
        "Scheduler started. Managing {} records with {} ms interval",
        records.len(),
        repeat_ms
    );

    if let Err(e) = run_cycle(&api, &settings.ip_endpoint, &records).await {
        error!("Cycle aborted: {}", e);
    }

    loop {
        tokio::select! {
            // The sleep is armed after the previous cycle finishes, so
            // the interval is measured from cycle end, not wall clock.
            _ = tokio::time::sleep(interval) => {
                if let Err(e) = run_cycle(&api, &settings.ip_endpoint, &records).await {
                    error!("Cycle aborted: {}", e);
                }
            }
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    info!("Shutdown signal received, stopping");
                    break;
                }
            }
        }
    }

    Ok(())
}

async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM");
            }
            _ = sigint.recv() => {
                info!("Received SIGINT");
            }
        }
    }

    #[cfg(windows)]
    {
        tokio::signal::ctrl_c().await?;
        info!("Received Ctrl+C");
    }

    Ok(())
}
