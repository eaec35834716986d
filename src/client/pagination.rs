//! Streaming pagination over list and search endpoints
//!
//! A paginated call spawns a background producer that fetches pages and
//! forwards their items into a bounded channel. The consumer reads the items
//! as a [`futures::Stream`]; cancelling or dropping the stream stops the
//! producer.
//!
//! Two strategies are supported through [`PageRequest::advance`]:
//! - cursor: the next cursor comes from `meta.page.after` of the response and
//!   is written into the request (query string or body);
//! - offset: the request offset grows by the page size each round.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use log::debug;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::Result;

/// Page size used when the caller does not set one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Parameter bundle of a paginated operation.
pub trait PageRequest: Clone + Send + 'static {
    /// Fill the page-size parameter when unset and return the effective size.
    fn prepare_page_size(&mut self, default: usize) -> usize;

    /// Point the request at the following page.
    ///
    /// Returns `false` when there is nothing to advance with, which ends the
    /// pagination.
    fn advance(&mut self, next_cursor: Option<String>, page_size: usize) -> bool;
}

/// Response of a paginated operation.
pub trait PagedResponse: Send + 'static {
    type Item: Send + 'static;

    /// Split the response into its items and the cursor of the next page.
    fn into_page(self) -> (Vec<Self::Item>, Option<String>);
}

/// Stream of items produced by a background page fetcher.
///
/// Yields `Ok(item)` for every item in page order. A failed page fetch
/// yields exactly one `Err` and ends the stream.
pub struct PaginatedStream<T> {
    rx: mpsc::Receiver<Result<T>>,
    producer: Option<JoinHandle<()>>,
}

impl<T> PaginatedStream<T> {
    /// Stop the producer.
    ///
    /// Items already buffered can still be read; the stream then ends.
    pub fn cancel(&mut self) {
        self.rx.close();
        if let Some(producer) = self.producer.take() {
            producer.abort();
        }
    }
}

impl<T> Stream for PaginatedStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl<T> Drop for PaginatedStream<T> {
    fn drop(&mut self) {
        if let Some(producer) = self.producer.take() {
            producer.abort();
        }
    }
}

/// Drain every page of a paginated operation into a stream.
///
/// `fetch` executes one page request. The page size is prepared on the
/// request before the first fetch, and sizes the channel.
///
/// Must be called from within a Tokio runtime.
pub fn paginate<Req, Resp, F, Fut>(mut request: Req, fetch: F) -> PaginatedStream<Resp::Item>
where
    Req: PageRequest,
    Resp: PagedResponse,
    F: Fn(Req) -> Fut + Send + 'static,
    Fut: Future<Output = Result<Resp>> + Send + 'static,
{
    let page_size = request.prepare_page_size(DEFAULT_PAGE_SIZE);
    let (tx, rx) = mpsc::channel(page_size.max(1));

    let producer = tokio::spawn(async move {
        let mut page = 0usize;
        loop {
            page += 1;
            let response = match fetch(request.clone()).await {
                Ok(response) => response,
                Err(err) => {
                    debug!("Page {} failed: {}", page, err);
                    let _ = tx.send(Err(err)).await;
                    return;
                }
            };

            let (items, next_cursor) = response.into_page();
            let count = items.len();
            debug!("Page {} returned {} item(s)", page, count);

            for item in items {
                if tx.send(Ok(item)).await.is_err() {
                    debug!("Pagination consumer went away after page {}", page);
                    return;
                }
            }

            if count < page_size {
                return;
            }

            if !request.advance(next_cursor, page_size) {
                return;
            }
        }
    });

    PaginatedStream {
        rx,
        producer: Some(producer),
    }
}
