//! Generic list command handler
//!
//! List commands share one flow:
//! 1. Open a paginated stream over the API
//! 2. Read items until `--limit` is reached (or every page with `--all`)
//! 3. Cancel the producer so no further pages are fetched
//! 4. Convert to the display type and print

use std::io::IsTerminal;
use std::time::Duration;

use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::client::PaginatedStream;
use crate::error::Result;
use crate::output::{Formattable, Listing};

/// Drain a paginated stream into a listing of display rows.
///
/// Stops after `limit` items when set. The listing is marked truncated when
/// the stream still had items at that point.
pub async fn collect_listing<T, D>(
    mut stream: PaginatedStream<T>,
    limit: Option<usize>,
    resource_name: &str,
    progress: Option<&ProgressBar>,
) -> Result<Listing<D>>
where
    D: From<T>,
{
    let mut items = Vec::new();
    let mut truncated = false;

    loop {
        if limit.is_some_and(|limit| items.len() >= limit) {
            truncated = match stream.next().await {
                Some(Ok(_)) => true,
                Some(Err(e)) => {
                    debug!("Next page after the limit failed: {}", e);
                    false
                }
                None => false,
            };
            stream.cancel();
            break;
        }

        match stream.next().await {
            Some(Ok(item)) => {
                items.push(D::from(item));
                if let Some(pb) = progress {
                    pb.set_message(format!("Fetching {}... {}", resource_name, items.len()));
                }
            }
            Some(Err(e)) => return Err(e),
            None => break,
        }
    }

    debug!(
        "Fetched {} {}{}",
        items.len(),
        resource_name,
        if truncated { " (limit reached)" } else { "" }
    );

    Ok(Listing { items, truncated })
}

/// Run a list command: show a spinner while paging, then print the rows.
pub async fn print_listing<T, D>(
    stream: PaginatedStream<T>,
    limit: Option<usize>,
    resource_name: &str,
    format: OutputFormat,
) -> Result<()>
where
    D: From<T> + Tabled + Serialize,
{
    let spinner = spinner(format, resource_name);
    let listing = collect_listing::<T, D>(stream, limit, resource_name, spinner.as_ref()).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    listing?.print(format)
}

/// Spinner on stderr, only for table output to a terminal.
fn spinner(format: OutputFormat, resource_name: &str) -> Option<ProgressBar> {
    if format != OutputFormat::Table || !std::io::stderr().is_terminal() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("Fetching {}...", resource_name));
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::fixtures::signals;
    use crate::client::models::Signal;
    use crate::client::{
        ListSignalsParams, MockDatadogClient, PageRequest, PagedResponse, SecurityMonitoringApi,
        paginate,
    };
    use crate::error::{ApiError, Error};
    use crate::models::SignalDisplay;

    #[tokio::test]
    async fn test_limit_truncates_and_stops_paging() {
        let mock = MockDatadogClient::new().with_signals(signals(25)).await;
        let stream = mock.list_security_monitoring_signals_with_pagination(
            ListSignalsParams::new().page_limit(5),
        );

        let listing: Listing<SignalDisplay> =
            collect_listing(stream, Some(7), "signals", None).await.unwrap();

        assert_eq!(listing.items.len(), 7);
        assert!(listing.truncated);
        assert_eq!(listing.items[0].id, "sig-0");
        // Two pages for the rows, at most one more in flight
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(mock.call_counts().await.list_signals <= 3);
    }

    #[tokio::test]
    async fn test_exact_limit_is_not_truncated() {
        let mock = MockDatadogClient::new().with_signals(signals(4)).await;
        let stream = mock.list_security_monitoring_signals_with_pagination(
            ListSignalsParams::new().page_limit(4),
        );

        let listing: Listing<SignalDisplay> =
            collect_listing(stream, Some(4), "signals", None).await.unwrap();

        assert_eq!(listing.items.len(), 4);
        assert!(!listing.truncated);
    }

    /// Request counting the pages fetched so far.
    #[derive(Clone)]
    struct PageNumber(usize);

    impl PageRequest for PageNumber {
        fn prepare_page_size(&mut self, _default: usize) -> usize {
            2
        }

        fn advance(&mut self, _next_cursor: Option<String>, _page_size: usize) -> bool {
            self.0 += 1;
            true
        }
    }

    struct Page(Vec<Signal>);

    impl PagedResponse for Page {
        type Item = Signal;

        fn into_page(self) -> (Vec<Signal>, Option<String>) {
            (self.0, None)
        }
    }

    #[tokio::test]
    async fn test_failed_page_past_limit_is_not_truncation() {
        let stream = paginate(PageNumber(0), |req: PageNumber| {
            futures::future::ready(if req.0 == 0 {
                Ok(Page(signals(2)))
            } else {
                Err(Error::Api(ApiError::from_status(500, "boom", None)))
            })
        });

        let listing: Listing<SignalDisplay> =
            collect_listing(stream, Some(2), "signals", None).await.unwrap();

        assert_eq!(listing.items.len(), 2);
        assert!(!listing.truncated);
    }

    #[tokio::test]
    async fn test_no_limit_drains_every_page() {
        let mock = MockDatadogClient::new().with_signals(signals(23)).await;
        let stream = mock.list_security_monitoring_signals_with_pagination(
            ListSignalsParams::new().page_limit(10),
        );

        let listing: Listing<SignalDisplay> =
            collect_listing(stream, None, "signals", None).await.unwrap();

        assert_eq!(listing.items.len(), 23);
        assert!(!listing.truncated);
        assert_eq!(mock.call_counts().await.list_signals, 3);
    }

    #[tokio::test]
    async fn test_error_is_returned() {
        let mock = MockDatadogClient::new()
            .with_signals(signals(5))
            .await
            .with_error(ApiError::from_status(403, "Forbidden", None))
            .await;
        let stream = mock
            .list_security_monitoring_signals_with_pagination(ListSignalsParams::new());

        let result: Result<Listing<SignalDisplay>> =
            collect_listing(stream, Some(10), "signals", None).await;

        match result {
            Err(Error::Api(err)) => assert_eq!(err.status(), Some(403)),
            other => panic!("Expected API error, got {:?}", other.map(|l| l.items.len())),
        }
    }
}
