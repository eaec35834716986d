//! API traits split by Datadog product
//!
//! - [`SecurityMonitoringApi`] - security signals and their triage
//! - [`LogsApi`] - log search and intake
//! - [`RumApi`] - Real User Monitoring events
//! - [`AuditApi`] - audit trail
//! - [`EventsApi`] - event stream
//! - [`IncidentsApi`] - incident management (unstable)
//! - [`ValidationApi`] - API key validation
//!
//! The [`DatadogApi`](super::DatadogApi) super-trait combines them all.

mod audit;
mod events;
mod incidents;
mod logs;
mod rum;
mod security_monitoring;
mod validation;

pub use audit::AuditApi;
pub use events::EventsApi;
pub use incidents::IncidentsApi;
pub use logs::LogsApi;
pub use rum::RumApi;
pub use security_monitoring::SecurityMonitoringApi;
pub use validation::ValidationApi;
