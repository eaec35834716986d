//! ddop - Datadog v2 API client and CLI companion
//!
//! The [`client`] module is usable on its own: build a
//! [`DatadogClient`](client::DatadogClient) from [`ClientOptions`](client::ClientOptions)
//! or a loaded [`Config`](config::Config) and call the operation traits in
//! [`client::api`]. The `ddop` binary layers the [`cli`] on top.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
