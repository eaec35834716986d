//! RUM event display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{lookup_str, or_none};
use crate::client::models::RumEvent;
use crate::output::formatters::format_timestamp;

/// RUM event row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RumEventDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "TIMESTAMP")]
    pub timestamp: String,

    #[tabled(rename = "SERVICE")]
    pub service: String,

    /// view, action, error, resource, long_task
    #[tabled(rename = "TYPE")]
    pub event_type: String,

    #[tabled(rename = "VIEW")]
    pub view: String,
}

impl From<RumEvent> for RumEventDisplay {
    fn from(event: RumEvent) -> Self {
        let attrs = event.attributes.unwrap_or_default();
        let custom = attrs.attributes.as_ref();

        Self {
            id: or_none(event.id.as_deref()),
            timestamp: format_timestamp(attrs.timestamp.as_ref()),
            service: or_none(attrs.service.as_deref()),
            event_type: lookup_str(custom, "type"),
            view: lookup_str(custom, "view.url_path"),
        }
    }
}
