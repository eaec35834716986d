//! Audit trail display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{lookup_str, or_none};
use crate::client::models::AuditLogsEvent;
use crate::output::formatters::{NONE, format_timestamp};

/// Audit event row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AuditDisplay {
    /// When the action occurred
    #[tabled(rename = "TIMESTAMP")]
    pub timestamp: String,

    /// Product area (e.g. `dashboard`, `monitor`)
    #[tabled(rename = "SERVICE")]
    pub service: String,

    /// Action name (e.g. `Modified dashboard`)
    #[tabled(rename = "ACTION")]
    pub action: String,

    /// User who performed the action
    #[tabled(rename = "USER")]
    pub user: String,

    /// Affected resource
    #[tabled(rename = "ASSET")]
    pub asset: String,
}

impl From<AuditLogsEvent> for AuditDisplay {
    fn from(event: AuditLogsEvent) -> Self {
        let attrs = event.attributes.unwrap_or_default();
        let custom = attrs.attributes.as_ref();

        // Prefer the human-readable action, fall back to the raw event name
        let mut action = lookup_str(custom, "action");
        if action == NONE {
            action = lookup_str(custom, "evt.name");
        }

        let mut asset = lookup_str(custom, "asset.name");
        if asset == NONE {
            asset = lookup_str(custom, "asset.type");
        }

        Self {
            timestamp: format_timestamp(attrs.timestamp.as_ref()),
            service: or_none(attrs.service.as_deref()),
            action,
            user: lookup_str(custom, "usr.email"),
            asset,
        }
    }
}
