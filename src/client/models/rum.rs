//! RUM event models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::common::{
    AdditionalProperties, EventSearchRequest, ResponseLinks, ResponseMetadata,
    lenient_optional_items, string_enum, unparsed_fallback,
};

string_enum! {
    /// Resource type of a RUM event
    RumEventType {
        Rum => "rum",
    }
}

/// Body of a RUM event search
pub type RumSearchEventsRequest = EventSearchRequest;

/// RUM event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RumEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<RumEventAttributes>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<RumEventType>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,

    /// Raw payload when this list item did not match the model
    #[serde(skip)]
    pub unparsed_object: Option<Value>,
}

unparsed_fallback!(RumEvent);

/// Attributes of a RUM event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RumEventAttributes {
    /// Event payload (view, action, error, resource details)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Page of RUM events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RumEventsResponse {
    #[serde(
        default,
        deserialize_with = "lenient_optional_items",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Vec<RumEvent>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ResponseLinks>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMetadata>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}
