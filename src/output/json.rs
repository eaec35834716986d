//! JSON output formatting

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Envelope around JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// Timestamp of the response
    pub timestamp: String,

    /// CLI version
    pub version: String,

    /// Number of items, for listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    /// Set when a listing stopped at `--limit` before the API ran out of pages
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub truncated: bool,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                count: None,
                truncated: false,
            },
        }
    }
}

/// Format a single object as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

/// Format a listing as pretty-printed JSON with its count
pub fn format_json_list<T: Serialize>(
    items: &[T],
    truncated: bool,
) -> Result<String, serde_json::Error> {
    let mut output = JsonOutput::new(items);
    output.meta.count = Some(items.len());
    output.meta.truncated = truncated;
    serde_json::to_string_pretty(&output)
}
