use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, IdKind};

/// A zone as returned by the Cloudflare zone listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

/// Identifies one DNS record within one zone. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecordRef {
    pub zone_id: String,
    pub record_id: String,
}

impl RecordRef {
    /// Both identifiers must have the provider-assigned shape before
    /// they are used in a URL.
    pub fn validate(&self) -> Result<(), Error> {
        if !is_record_id(&self.zone_id) {
            return Err(Error::InvalidId {
                kind: IdKind::Zone,
                value: self.zone_id.clone(),
            });
        }
        if !is_record_id(&self.record_id) {
            return Err(Error::InvalidId {
                kind: IdKind::Record,
                value: self.record_id.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.zone_id, self.record_id)
    }
}

/// Cloudflare-assigned identifiers are 32 lowercase hex characters.
pub fn is_record_id(id: &str) -> bool {
    id.len() == 32 && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// A DNS record as fetched from the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: String,
    #[serde(default)]
    pub proxied: bool,
    pub ttl: u32,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl DnsRecord {
    /// Update payload that replaces only the content. Every other
    /// field is echoed back unchanged so provider-held metadata
    /// survives the write.
    pub fn with_content(&self, content: &str) -> RecordUpdate {
        RecordUpdate {
            content: content.to_string(),
            name: self.name.clone(),
            record_type: self.record_type.clone(),
            proxied: self.proxied,
            ttl: self.ttl,
            comment: self.comment.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Body of a record update request.
#[derive(Debug, Clone, Serialize)]
pub struct RecordUpdate {
    pub content: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub proxied: bool,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub tags: Vec<String>,
}
