//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod audit;
mod common;
mod event;
mod incident;
mod logs;
mod rum;
mod signal;

// Re-export all display types used by CLI commands
pub use audit::AuditDisplay;
pub use event::EventDisplay;
pub use incident::{IncidentDisplay, incident_details};
pub use logs::LogDisplay;
pub use rum::RumEventDisplay;
pub use signal::{SignalDisplay, signal_details, triage_details};
