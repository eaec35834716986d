//! Shared model building blocks

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Fields present in a payload but unknown to the model.
///
/// Flattened into every object model so they survive a decode/encode cycle.
pub type AdditionalProperties = BTreeMap<String, Value>;

/// Declares a string enum that keeps unknown values.
///
/// Values outside the known set decode into `UnparsedObject` and serialize
/// back verbatim, so a newer server never breaks decoding.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// A value this client does not know about.
            UnparsedObject(String),
        }

        impl $name {
            /// Wire representation of the value.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $value,)+
                    Self::UnparsedObject(value) => value.as_str(),
                }
            }

            /// Whether the value is one of the known variants.
            pub fn is_valid(&self) -> bool {
                !matches!(self, Self::UnparsedObject(_))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Ok(match s {
                    $($value => Self::$variant,)+
                    other => Self::UnparsedObject(other.to_string()),
                })
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                match value.parse::<Self>() {
                    Ok(parsed) => Ok(parsed),
                    Err(never) => match never {},
                }
            }
        }
    };
}

pub(crate) use string_enum;

/// An object model that can stand in for a payload it failed to decode.
///
/// List pages decode their items one at a time: an item that does not match
/// its model is kept with its raw JSON in `unparsed_object` and its siblings
/// still decode normally.
pub trait UnparsedFallback: DeserializeOwned {
    /// Placeholder carrying only the raw payload.
    fn from_unparsed(raw: Value) -> Self;

    /// Raw payload of an item that could not be decoded.
    fn unparsed_object(&self) -> Option<&Value>;

    /// Whether the item decoded into its model.
    fn is_parsed(&self) -> bool {
        self.unparsed_object().is_none()
    }
}

/// Implements [`UnparsedFallback`] for models with a `Default` and an
/// `unparsed_object: Option<Value>` field.
macro_rules! unparsed_fallback {
    ($($name:ty),+ $(,)?) => {
        $(
            impl $crate::client::models::common::UnparsedFallback for $name {
                fn from_unparsed(raw: serde_json::Value) -> Self {
                    Self {
                        additional_properties: $crate::client::models::common::object_entries(&raw),
                        unparsed_object: Some(raw),
                        ..Default::default()
                    }
                }

                fn unparsed_object(&self) -> Option<&serde_json::Value> {
                    self.unparsed_object.as_ref()
                }
            }
        )+
    };
}

pub(crate) use unparsed_fallback;

/// Top-level entries of a raw object, empty for any other JSON value.
///
/// Placeholders keep these as additional properties so they serialize back
/// to the payload they came from.
pub(crate) fn object_entries(raw: &Value) -> AdditionalProperties {
    raw.as_object()
        .map(|object| object.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default()
}

fn decode_or_keep<T: UnparsedFallback>(raw: Value) -> T {
    match T::deserialize(&raw) {
        Ok(item) => item,
        Err(e) => {
            debug!("Keeping undecodable list item as unparsed: {}", e);
            T::from_unparsed(raw)
        }
    }
}

/// `deserialize_with` for a required item list.
pub(crate) fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: UnparsedFallback,
{
    let items = Vec::<Value>::deserialize(deserializer)?;
    Ok(items.into_iter().map(decode_or_keep).collect())
}

/// `deserialize_with` for an optional item list.
pub(crate) fn lenient_optional_items<'de, D, T>(
    deserializer: D,
) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: UnparsedFallback,
{
    let items = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(items.map(|items| items.into_iter().map(decode_or_keep).collect()))
}

/// Standard error payload returned with 4xx responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Error messages
    pub errors: Vec<String>,
}

/// Result of an API key validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyValidation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

string_enum! {
    /// Sort order for event-style searches
    QuerySort {
        TimestampAscending => "timestamp",
        TimestampDescending => "-timestamp",
    }
}

string_enum! {
    /// Completion status of a search
    ResponseStatus {
        Done => "done",
        Timeout => "timeout",
    }
}

/// Search filter shared by RUM, audit and event searches.
///
/// `from`/`to` accept date math (`now-15m`), ISO 8601 or epoch milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }
}

/// Time handling options for searches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Offset in seconds applied to the query time range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_offset: Option<i64>,

    /// IANA timezone or UTC offset (`GMT+2`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Paging options carried in a search body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryPageOptions {
    /// Cursor returned in `meta.page.after` of the previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,

    /// Maximum number of items in a page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Search body shared by RUM, audit and event searches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<QueryFilter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<QueryOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<QueryPageOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<QuerySort>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl EventSearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: QueryFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn options(mut self, options: QueryOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn page_limit(mut self, limit: i32) -> Self {
        self.page.get_or_insert_with(QueryPageOptions::default).limit = Some(limit);
        self
    }

    pub fn sort(mut self, sort: QuerySort) -> Self {
        self.sort = Some(sort);
        self
    }
}

/// Links attached to a list response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseLinks {
    /// Link to the next page of results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Cursor information of a list response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsePage {
    /// Cursor for the following page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Non-fatal issue reported alongside search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseWarning {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Metadata of a search response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Time elapsed in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<ResponsePage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ResponseStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<ResponseWarning>>,

    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl ResponseMetadata {
    /// Cursor for the next page, if the server returned one.
    pub fn after(&self) -> Option<&str> {
        self.page.as_ref().and_then(|p| p.after.as_deref())
    }
}
