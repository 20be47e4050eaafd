mod cloudflare;
mod resolve;
mod types;

pub use cloudflare::{CloudflareApi, TokenStatus};
pub use resolve::resolve_name;
pub use types::{is_record_id, DnsRecord, RecordRef, RecordUpdate, Zone};
