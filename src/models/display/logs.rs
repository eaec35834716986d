//! Log event display model

use serde::Serialize;
use tabled::Tabled;

use super::common::or_none;
use crate::client::models::Log;
use crate::output::formatters::{first_line, format_timestamp, truncate};

const MESSAGE_WIDTH: usize = 80;

/// Log row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct LogDisplay {
    #[tabled(rename = "TIMESTAMP")]
    pub timestamp: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "SERVICE")]
    pub service: String,

    #[tabled(rename = "HOST")]
    pub host: String,

    #[tabled(rename = "MESSAGE")]
    pub message: String,
}

impl From<Log> for LogDisplay {
    fn from(log: Log) -> Self {
        let attrs = log.attributes.unwrap_or_default();
        let message = attrs.message.as_deref().map(first_line);

        Self {
            timestamp: format_timestamp(attrs.timestamp.as_ref()),
            status: or_none(attrs.status.as_deref()),
            service: or_none(attrs.service.as_deref()),
            host: or_none(attrs.host.as_deref()),
            message: truncate(&or_none(message), MESSAGE_WIDTH),
        }
    }
}
