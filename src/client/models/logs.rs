//! Log search and intake models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::common::{
    AdditionalProperties, QueryOptions, ResponseLinks, ResponseMetadata, lenient_optional_items,
    string_enum, unparsed_fallback,
};

string_enum! {
    /// Resource type of a log
    LogType {
        Log => "log",
    }
}

string_enum! {
    /// Sort order of a log search
    LogsSort {
        TimestampAscending => "timestamp",
        TimestampDescending => "-timestamp",
    }
}

string_enum! {
    /// Storage tier searched by a log query
    LogsStorageTier {
        Indexes => "indexes",
        OnlineArchives => "online-archives",
        Flex => "flex",
    }
}

string_enum! {
    /// Compression applied to a submitted log payload
    ContentEncoding {
        Gzip => "gzip",
        Deflate => "deflate",
    }
}

/// Log event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Log {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<LogAttributes>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub log_type: Option<LogType>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,

    /// Raw payload when this list item did not match the model
    #[serde(skip)]
    pub unparsed_object: Option<Value>,
}

unparsed_fallback!(Log);

/// Attributes of a log event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogAttributes {
    /// JSON attributes of the log, reserved ones included
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Page of logs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsListResponse {
    #[serde(
        default,
        deserialize_with = "lenient_optional_items",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Vec<Log>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ResponseLinks>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMetadata>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Filter of a log search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsQueryFilter {
    /// Minimum time, as date math, ISO 8601 or epoch milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// Indexes to search; all indexes when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_tier: Option<LogsStorageTier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Paging options of a log search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsListRequestPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Body of a log search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsListRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<LogsQueryFilter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<QueryOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<LogsListRequestPage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<LogsSort>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl LogsListRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: LogsQueryFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn options(mut self, options: QueryOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn page_limit(mut self, limit: i32) -> Self {
        self.page
            .get_or_insert_with(LogsListRequestPage::default)
            .limit = Some(limit);
        self
    }

    pub fn sort(mut self, sort: LogsSort) -> Self {
        self.sort = Some(sort);
        self
    }
}

/// Log entry sent to the intake
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpLogItem {
    /// Integration name the log originates from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ddsource: Option<String>,

    /// Comma-separated tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ddtags: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl HttpLogItem {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn ddsource(mut self, source: impl Into<String>) -> Self {
        self.ddsource = Some(source.into());
        self
    }

    pub fn ddtags(mut self, tags: impl Into<String>) -> Self {
        self.ddtags = Some(tags.into());
        self
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::common::ResponseStatus;
    use serde_json::json;

    #[test]
    fn test_logs_list_response_decodes_warnings() {
        let raw = json!({
            "data": [{
                "id": "AAAAAWgN8Xwgr1vKDQAAAABBV2dOOFh3ZzZobm1mWXJFYTR0OA",
                "type": "log",
                "attributes": {
                    "host": "i-0123",
                    "service": "agent",
                    "status": "INFO",
                    "message": "Hello",
                    "timestamp": "2019-01-02T09:42:36.320Z",
                    "attributes": {"customAttribute": 123}
                }
            }],
            "meta": {
                "status": "timeout",
                "elapsed": 132,
                "warnings": [{"code": "unknown_index", "title": "One or several indexes are missing"}]
            }
        });

        let resp: LogsListResponse = serde_json::from_value(raw).unwrap();
        let log = &resp.data.as_ref().unwrap()[0];
        let attrs = log.attributes.as_ref().unwrap();
        assert_eq!(attrs.service.as_deref(), Some("agent"));
        assert_eq!(attrs.attributes.as_ref().unwrap()["customAttribute"], 123);

        let meta = resp.meta.unwrap();
        assert_eq!(meta.status, Some(ResponseStatus::Timeout));
        assert_eq!(meta.warnings.as_ref().unwrap()[0].code.as_deref(), Some("unknown_index"));
        assert_eq!(meta.after(), None);
    }

    #[test]
    fn test_storage_tier_wire_values() {
        assert_eq!(LogsStorageTier::OnlineArchives.as_str(), "online-archives");
        let tier: LogsStorageTier = "flex".parse().unwrap();
        assert_eq!(tier, LogsStorageTier::Flex);
    }

    #[test]
    fn test_http_log_item_requires_message() {
        assert!(serde_json::from_value::<HttpLogItem>(json!({"ddsource": "nginx"})).is_err());

        let item = HttpLogItem::new("disk full")
            .ddsource("nginx")
            .service("payments");
        let encoded = serde_json::to_value(&item).unwrap();
        assert_eq!(
            encoded,
            json!({"ddsource": "nginx", "message": "disk full", "service": "payments"})
        );
    }

    #[test]
    fn test_http_log_item_keeps_custom_fields() {
        let item: HttpLogItem =
            serde_json::from_value(json!({"message": "m", "status": "error"})).unwrap();
        assert_eq!(item.additional_properties["status"], "error");
    }
}
