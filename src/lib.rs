//! Dynamic DNS updater for Cloudflare.
//!
//! Resolves configured record names against the Cloudflare zone
//! hierarchy once at startup, then runs a read-compare-write pass per
//! record against the current public IP, optionally on a repeating
//! schedule.

pub mod config;
pub mod daemon;
pub mod dns;
pub mod error;
pub mod ip;

pub use error::Error;
