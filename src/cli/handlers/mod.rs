//! Shared command handler patterns

pub mod list;

pub use list::{collect_listing, print_listing};
