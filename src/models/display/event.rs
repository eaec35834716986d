//! Event stream display model

use serde::Serialize;
use tabled::Tabled;

use super::common::or_none;
use crate::client::models::EventResponse;
use crate::output::formatters::{NONE, first_line, format_timestamp_str, truncate};

const TITLE_WIDTH: usize = 70;

/// Event row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct EventDisplay {
    #[tabled(rename = "TIMESTAMP")]
    pub timestamp: String,

    /// Alert status (error, warning, info, success)
    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "SOURCE")]
    pub source: String,

    #[tabled(rename = "TITLE")]
    pub title: String,
}

impl From<EventResponse> for EventDisplay {
    fn from(event: EventResponse) -> Self {
        let attrs = event.attributes.unwrap_or_default();
        let inner = attrs.attributes.unwrap_or_default();

        let title = inner
            .title
            .as_deref()
            .or_else(|| attrs.message.as_deref().map(first_line))
            .unwrap_or(NONE);

        Self {
            timestamp: format_timestamp_str(attrs.timestamp.as_deref()),
            status: or_none(inner.status.as_ref().map(|s| s.as_str())),
            source: or_none(inner.source_type_name.as_deref()),
            title: truncate(title, TITLE_WIDTH),
        }
    }
}
