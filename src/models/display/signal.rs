//! Security signal display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{lookup_str, or_none};
use crate::client::models::{Signal, TriageAttributes, TriageUpdateResponse, TriageUser};
use crate::output::formatters::{
    NONE, first_line, format_tags, format_timestamp, format_timestamp_str, truncate,
};

/// Longest title shown in the signal table
const TITLE_WIDTH: usize = 60;

/// Security signal row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SignalDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "TIMESTAMP")]
    pub timestamp: String,

    /// Rule severity (`info` .. `critical`)
    #[tabled(rename = "SEVERITY")]
    pub severity: String,

    /// Triage state
    #[tabled(rename = "STATE")]
    pub state: String,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "TAGS")]
    pub tags: String,
}

impl From<Signal> for SignalDisplay {
    fn from(signal: Signal) -> Self {
        let attrs = signal.attributes.as_ref();
        let custom = attrs.and_then(|a| a.attributes.as_ref());

        let title = signal
            .title()
            .map(str::to_string)
            .or_else(|| {
                attrs
                    .and_then(|a| a.message.as_deref())
                    .map(|m| first_line(m).to_string())
            })
            .unwrap_or_else(|| NONE.to_string());

        Self {
            id: or_none(signal.id.as_deref()),
            timestamp: format_timestamp(attrs.and_then(|a| a.timestamp.as_ref())),
            severity: lookup_str(custom, "status"),
            state: lookup_str(custom, "workflow.triage.state"),
            title: truncate(&title, TITLE_WIDTH),
            tags: format_tags(attrs.and_then(|a| a.tags.as_deref()), 3),
        }
    }
}

/// Detail rows for a single signal.
pub fn signal_details(signal: &Signal) -> Vec<(&'static str, String)> {
    let display = SignalDisplay::from(signal.clone());
    let attrs = signal.attributes.as_ref();
    let custom = attrs.and_then(|a| a.attributes.as_ref());

    vec![
        ("ID", display.id),
        ("Timestamp", display.timestamp),
        ("Title", or_none(signal.title())),
        ("Severity", display.severity),
        ("State", display.state),
        ("Rule", lookup_str(custom, "workflow.rule.name")),
        ("Assignee", lookup_str(custom, "workflow.triage.assignee.name")),
        (
            "Tags",
            format_tags(attrs.and_then(|a| a.tags.as_deref()), usize::MAX),
        ),
        (
            "Message",
            or_none(attrs.and_then(|a| a.message.as_deref()).map(first_line)),
        ),
    ]
}

/// Detail rows for the triage state returned by an edit.
pub fn triage_details(response: &TriageUpdateResponse) -> Vec<(&'static str, String)> {
    let mut rows = vec![("Signal", or_none(response.data.id.as_deref()))];
    let Some(triage) = response.data.attributes.as_ref() else {
        return rows;
    };
    rows.extend(triage_rows(triage));
    rows
}

fn triage_rows(triage: &TriageAttributes) -> Vec<(&'static str, String)> {
    let incidents = if triage.incident_ids.is_empty() {
        NONE.to_string()
    } else {
        triage
            .incident_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let updated = triage
        .state_update_timestamp
        .map(|ms| ms.to_string());

    vec![
        ("State", triage.state.to_string()),
        (
            "Archive reason",
            or_none(triage.archive_reason.as_ref().map(|r| r.as_str())),
        ),
        ("Archive comment", or_none(triage.archive_comment.as_deref())),
        ("Assignee", user_label(&triage.assignee)),
        ("Incidents", incidents),
        ("State updated", format_timestamp_str(updated.as_deref())),
    ]
}

fn user_label(user: &TriageUser) -> String {
    user.name
        .as_deref()
        .or(user.handle.as_deref())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| or_none(Some(user.uuid.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{SignalAttributes, SignalState, TriageUpdateData};
    use serde_json::json;

    fn signal() -> Signal {
        serde_json::from_value(json!({
            "id": "AAAAAWgN8Xwgr1vKDQAAAABBV2dOOFh3ZzZobm1mWXJFYTR0OA",
            "type": "signal",
            "attributes": {
                "message": "Brute force attempt\nFrom 10.0.0.1",
                "tags": ["source:cloudtrail", "env:prod", "team:sec", "region:us-east-1"],
                "timestamp": "2024-06-01T12:00:00Z",
                "attributes": {
                    "status": "high",
                    "title": "Brute force on root account",
                    "workflow": {
                        "rule": {"name": "AWS brute force"},
                        "triage": {"state": "open", "assignee": {"name": "Jane"}}
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_signal_display_reads_rule_attributes() {
        let display = SignalDisplay::from(signal());

        assert_eq!(display.severity, "high");
        assert_eq!(display.state, "open");
        assert_eq!(display.title, "Brute force on root account");
        assert_eq!(display.tags, "source:cloudtrail, env:prod, team:sec (+1)");
    }

    #[test]
    fn test_signal_display_falls_back_to_message() {
        let signal = Signal {
            attributes: Some(SignalAttributes {
                message: Some("Suspicious login\nDetails follow".into()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let display = SignalDisplay::from(signal);

        assert_eq!(display.id, "--");
        assert_eq!(display.title, "Suspicious login");
        assert_eq!(display.severity, "--");
        assert_eq!(display.timestamp, "--");
    }

    #[test]
    fn test_signal_details() {
        let rows = signal_details(&signal());
        let get = |label: &str| {
            rows.iter()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.clone())
                .unwrap()
        };

        assert_eq!(get("Rule"), "AWS brute force");
        assert_eq!(get("Assignee"), "Jane");
        assert_eq!(get("Message"), "Brute force attempt");
        assert!(get("Tags").contains("region:us-east-1"));
    }

    #[test]
    fn test_triage_details() {
        let mut assignee = TriageUser::new("773b045d-ccf8-4808-bd3b-955ef6a8c940");
        assignee.handle = Some("jane@example.com".into());
        let response = TriageUpdateResponse {
            data: TriageUpdateData {
                id: Some("sig-1".into()),
                attributes: Some(TriageAttributes {
                    archive_comment: None,
                    archive_comment_timestamp: None,
                    archive_comment_user: None,
                    archive_reason: None,
                    assignee,
                    incident_ids: vec![2066, 2067],
                    state: SignalState::UnderReview,
                    state_update_timestamp: None,
                    state_update_user: None,
                    additional_properties: Default::default(),
                }),
                ..Default::default()
            },
            additional_properties: Default::default(),
        };

        let rows = triage_details(&response);

        assert_eq!(rows[0], ("Signal", "sig-1".to_string()));
        assert!(rows.contains(&("State", "under_review".to_string())));
        assert!(rows.contains(&("Assignee", "jane@example.com".to_string())));
        assert!(rows.contains(&("Incidents", "2066, 2067".to_string())));
    }
}
