//! Query, time range and limit arguments for list commands

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use clap::Args;

use super::SortDir;
use crate::error::{Error, Result};

/// Largest page the list endpoints accept
pub const MAX_PAGE_SIZE: usize = 1000;

/// Results shown when `--limit` is not given
pub const DEFAULT_LIMIT: usize = 100;

/// Search arguments shared by list commands.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Search query in Datadog syntax (e.g. "service:web status:error")
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Start of the time range (relative: 30s, 15m, 1h, 7d, 2w; or RFC 3339)
    #[arg(long, default_value = "15m")]
    pub from: String,

    /// End of the time range (same formats as --from; defaults to now)
    #[arg(long)]
    pub to: Option<String>,

    /// Sort direction (asc, desc)
    #[arg(
        long,
        value_enum,
        default_value = "desc",
        hide_possible_values = true,
        hide_default_value = true
    )]
    pub sort: SortDir,
}

impl QueryArgs {
    /// Resolve `--from` / `--to` against the current time.
    pub fn time_range(&self) -> Result<(DateTime<Utc>, Option<DateTime<Utc>>)> {
        let now = Utc::now();
        let from = parse_time(&self.from, now)?;
        let to = self.to.as_deref().map(|t| parse_time(t, now)).transpose()?;
        if let Some(to) = to
            && to < from
        {
            return Err(Error::Other(format!(
                "--to ({}) is earlier than --from ({})",
                to, from
            )));
        }
        Ok((from, to))
    }
}

/// Limit arguments shared by list commands.
#[derive(Args, Debug, Clone)]
pub struct LimitArgs {
    /// Maximum results to return
    #[arg(long, short = 'n', default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Return every result (ignores --limit)
    #[arg(long, conflicts_with = "limit")]
    pub all: bool,

    /// Results fetched per API request
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl Default for LimitArgs {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            all: false,
            page_size: None,
        }
    }
}

impl LimitArgs {
    /// Number of items to stop after, or `None` to drain every page.
    pub fn max_items(&self) -> Option<usize> {
        (!self.all).then_some(self.limit)
    }

    /// Page size for the API, never larger than the limit.
    pub fn page_size(&self, preferred: usize) -> usize {
        let size = self.page_size.unwrap_or(preferred);
        let size = match self.max_items() {
            Some(limit) => size.min(limit),
            None => size,
        };
        size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Parse a time argument relative to `now`.
///
/// Supports:
/// - `now`
/// - Relative: `30s`, `15m`, `1h`, `7d`, `2w` (that long before `now`)
/// - ISO date: `2024-01-15` (midnight UTC)
/// - RFC 3339: `2024-01-15T10:30:00Z`
pub fn parse_time(value: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("now") {
        return Ok(now);
    }

    if let Some(offset) = parse_relative(value) {
        return now
            .checked_sub_signed(offset)
            .ok_or_else(|| invalid_time(value));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(midnight.and_utc());
    }

    Err(invalid_time(value))
}

fn invalid_time(value: &str) -> Error {
    Error::Other(format!(
        "Invalid time '{}'. Use relative (15m, 1h, 7d), a date (YYYY-MM-DD) or RFC 3339",
        value
    ))
}

/// Offset of a relative time, `None` when malformed or out of range.
fn parse_relative(value: &str) -> Option<TimeDelta> {
    let unit = value.chars().last()?;
    let amount: i64 = value[..value.len() - unit.len_utf8()].parse().ok()?;
    if amount < 0 {
        return None;
    }
    match unit {
        's' => TimeDelta::try_seconds(amount),
        'm' => TimeDelta::try_minutes(amount),
        'h' => TimeDelta::try_hours(amount),
        'd' => TimeDelta::try_days(amount),
        'w' => TimeDelta::try_weeks(amount),
        _ => None,
    }
}
