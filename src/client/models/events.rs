//! Event stream models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{
    AdditionalProperties, EventSearchRequest, ResponseLinks, ResponseMetadata,
    lenient_optional_items, string_enum, unparsed_fallback,
};

string_enum! {
    /// Resource type of an event
    EventType {
        Event => "event",
    }
}

string_enum! {
    /// Alert status of an event
    EventStatusType {
        Failure => "failure",
        Error => "error",
        Warning => "warning",
        Info => "info",
        Success => "success",
        UserUpdate => "user_update",
        Recommendation => "recommendation",
        Snapshot => "snapshot",
    }
}

string_enum! {
    /// Priority of an event
    EventPriority {
        Normal => "normal",
        Low => "low",
    }
}

/// Body of an event search
pub type EventsListRequest = EventSearchRequest;

/// Event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<EventResponseAttributes>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,

    /// Raw payload when this list item did not match the model
    #[serde(skip)]
    pub unparsed_object: Option<Value>,
}

unparsed_fallback!(EventResponse);

/// Envelope attributes of an event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventResponseAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<EventAttributes>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// ISO 8601 timestamp of the event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Event details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation_key: Option<String>,

    /// POSIX timestamp in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_happened: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,

    /// Nanoseconds between trigger and recovery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_object: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub evt: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_groups: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<EventPriority>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_event_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sourcecategory: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatusType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// POSIX timestamp in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Page of events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventsListResponse {
    #[serde(
        default,
        deserialize_with = "lenient_optional_items",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Vec<EventResponse>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ResponseLinks>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMetadata>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_response_decodes() {
        let raw = json!({
            "data": [{
                "id": "AAAAAWgN8Xwgr1vKDQAAAABBV2dO",
                "type": "event",
                "attributes": {
                    "message": "Deploy finished",
                    "timestamp": "2024-03-01T10:00:00Z",
                    "tags": ["env:prod"],
                    "attributes": {
                        "title": "Deploy",
                        "status": "success",
                        "priority": "normal",
                        "monitor_id": null,
                        "evt": {"id": "6509751066204996294", "source_id": 36}
                    }
                }
            }],
            "links": {"next": "https://app.datadoghq.com/api/v2/events?page[cursor]=abc"},
            "meta": {"page": {"after": "abc"}, "elapsed": 5}
        });

        let resp: EventsListResponse = serde_json::from_value(raw).unwrap();
        let event = &resp.data.as_ref().unwrap()[0];
        let attrs = event.attributes.as_ref().unwrap().attributes.as_ref().unwrap();
        assert_eq!(attrs.title.as_deref(), Some("Deploy"));
        assert_eq!(attrs.status, Some(EventStatusType::Success));
        assert_eq!(attrs.monitor_id, None);
        assert_eq!(attrs.evt.as_ref().unwrap()["source_id"], 36);
        assert_eq!(resp.meta.unwrap().after(), Some("abc"));
    }
}
