//! Incident display models

use serde::Serialize;
use tabled::Tabled;

use super::common::or_none;
use crate::client::models::IncidentResponseData;
use crate::output::formatters::{NONE, format_duration_seconds, format_timestamp, truncate};

const TITLE_WIDTH: usize = 60;

/// Incident row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct IncidentDisplay {
    /// Public number (`IR-42`)
    #[tabled(rename = "ID")]
    pub public_id: String,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "STATE")]
    pub state: String,

    #[tabled(rename = "SEVERITY")]
    pub severity: String,

    #[tabled(rename = "CREATED")]
    pub created: String,

    #[tabled(rename = "TIME TO RESOLVE")]
    pub time_to_resolve: String,

    /// Resource id used by `incident get`
    #[tabled(skip)]
    pub id: String,
}

impl From<IncidentResponseData> for IncidentDisplay {
    fn from(incident: IncidentResponseData) -> Self {
        let attrs = incident.attributes.as_ref();

        Self {
            public_id: public_id(&incident),
            title: truncate(incident.title().unwrap_or(NONE), TITLE_WIDTH),
            state: or_none(incident.state()),
            severity: or_none(incident.severity()),
            created: format_timestamp(attrs.and_then(|a| a.created.as_ref())),
            time_to_resolve: format_duration_seconds(attrs.and_then(|a| a.time_to_resolve)),
            id: incident.id.clone(),
        }
    }
}

fn public_id(incident: &IncidentResponseData) -> String {
    incident
        .attributes
        .as_ref()
        .and_then(|a| a.public_id)
        .map(|n| format!("IR-{}", n))
        .unwrap_or_else(|| NONE.to_string())
}

/// Detail rows for a single incident.
pub fn incident_details(incident: &IncidentResponseData) -> Vec<(&'static str, String)> {
    let attrs = incident.attributes.as_ref();
    let customer_impacted = match attrs.and_then(|a| a.customer_impacted) {
        Some(true) => "yes".to_string(),
        Some(false) => "no".to_string(),
        None => NONE.to_string(),
    };

    vec![
        ("ID", incident.id.clone()),
        ("Public ID", public_id(incident)),
        ("Title", or_none(incident.title())),
        ("State", or_none(incident.state())),
        ("Severity", or_none(incident.severity())),
        ("Customer impacted", customer_impacted),
        (
            "Customer impact",
            or_none(attrs.and_then(|a| a.customer_impact_scope.as_deref())),
        ),
        (
            "Detected",
            format_timestamp(attrs.and_then(|a| a.detected.as_ref())),
        ),
        (
            "Created",
            format_timestamp(attrs.and_then(|a| a.created.as_ref())),
        ),
        (
            "Resolved",
            format_timestamp(attrs.and_then(|a| a.resolved.as_ref())),
        ),
        (
            "Time to detect",
            format_duration_seconds(attrs.and_then(|a| a.time_to_detect)),
        ),
        (
            "Time to repair",
            format_duration_seconds(attrs.and_then(|a| a.time_to_repair)),
        ),
        (
            "Time to resolve",
            format_duration_seconds(attrs.and_then(|a| a.time_to_resolve)),
        ),
    ]
}
