use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One provisioned store as reported by the remote service.
///
/// `status` is deliberately an open string (`Provisioning`, `Ready`,
/// `Failed`, ...): the service owns the lifecycle vocabulary and a new label
/// must not break deserialization. Every field defaults so a partial row —
/// the service has produced them — never poisons a whole listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Store {
    pub id: String,
    pub status: String,
    /// Public endpoint once provisioned; absent until the store is ready.
    pub url: Option<String>,
    /// Epoch seconds, assigned by the service at creation.
    pub created_at: i64,
    pub engine: Option<String>,
    /// Most recent provisioning failure, cleared by a successful refresh.
    pub last_error: Option<String>,
}

/// Reply to a create request. The service usually returns the full row, but
/// older versions have answered with neither `id` nor `status`, so both
/// default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateStoreReply {
    pub id: String,
    pub status: String,
}

impl CreateStoreReply {
    /// Parses whatever the service answered; anything unusable collapses to
    /// the empty reply rather than an error.
    pub fn from_reply(reply: Value) -> Self {
        serde_json::from_value(reply).unwrap_or_default()
    }

    /// Outcome line for a successful create, `<id>: <status>`. Status-less
    /// replies happen; those fall back to a bare confirmation.
    pub fn message(&self) -> String {
        if self.status.is_empty() {
            "Created".to_string()
        } else {
            format!("{}: {}", self.id, self.status)
        }
    }
}

/// Interprets a listing reply. The service returns a JSON array; anything
/// else yields no rows, and a malformed element is skipped instead of
/// failing the batch.
pub fn stores_from_listing(listing: Value) -> Vec<Store> {
    match listing {
        Value::Array(rows) => rows
            .into_iter()
            .filter_map(|row| serde_json::from_value(row).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Interprets a single-row reply with the same leniency as a listing
/// element, except that an unusable body collapses to the empty row.
pub fn store_from_reply(reply: Value) -> Store {
    serde_json::from_value(reply).unwrap_or_default()
}

/// Trims a user-entered store name; `None` means there is nothing to send.
pub fn normalize_store_name(raw: &str) -> Option<String> {
    let name = raw.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
