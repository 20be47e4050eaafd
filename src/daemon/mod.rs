mod reconcile;
mod service;

pub use reconcile::{reconcile, Reconciliation};
pub use service::{resolve_specs, run, run_cycle, ManagedRecord, RecordOutcome};
