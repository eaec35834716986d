//! Common CLI types shared across commands

use crate::client::models::{LogsSort, QuerySort, SignalsSort};

/// Sort direction for list commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortDir {
    /// Oldest first
    Asc,
    /// Newest first
    #[default]
    Desc,
}

impl From<SortDir> for SignalsSort {
    fn from(dir: SortDir) -> Self {
        match dir {
            SortDir::Asc => SignalsSort::TimestampAscending,
            SortDir::Desc => SignalsSort::TimestampDescending,
        }
    }
}

impl From<SortDir> for LogsSort {
    fn from(dir: SortDir) -> Self {
        match dir {
            SortDir::Asc => LogsSort::TimestampAscending,
            SortDir::Desc => LogsSort::TimestampDescending,
        }
    }
}

impl From<SortDir> for QuerySort {
    fn from(dir: SortDir) -> Self {
        match dir {
            SortDir::Asc => QuerySort::TimestampAscending,
            SortDir::Desc => QuerySort::TimestampDescending,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table (default)
    #[default]
    Table,
    /// JSON envelope with metadata, for scripts
    Json,
}
