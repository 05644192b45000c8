//! Bounded-concurrency page aggregation.
//!
//! Page 1 is fetched by the caller and is load-bearing; everything here is
//! best-effort. Remaining pages are fanned out onto a bounded stream, each
//! with its own deadline, and a page that fails or times out simply
//! contributes no items.

use std::future::Future;
use std::time::Duration;

use futures_util::StreamExt;
use futures_util::stream;
use tokio::time::timeout;
use tracing::warn;

use crate::domain::ports::{CataloguePage, CatalogueSourceError, Identified};

/// Hard ceiling on simultaneous in-flight page fetches per aggregation call.
pub(crate) const MAX_CONCURRENT_PAGE_FETCHES: usize = 5;

/// Deadline applied to each page fetch beyond page 1, measured from dispatch.
/// Page 1 deliberately inherits only the client-wide timeout.
pub(crate) const REMAINING_PAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Merge page 1 with every remaining page of the resource, sorted ascending
/// by identifier.
///
/// `fetch_page` is invoked for pages 2..=`total_pages` with at most
/// [`MAX_CONCURRENT_PAGE_FETCHES`] fetches in flight. Completion order is
/// irrelevant: the merged collection is stable-sorted by id at the end, so
/// items with equal ids keep arrival order.
pub(crate) async fn collect_catalogue<T, F, Fut>(first_page: CataloguePage<T>, fetch_page: F) -> Vec<T>
where
    T: Identified,
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<CataloguePage<T>, CatalogueSourceError>>,
{
    let meta = first_page.meta;
    let mut items = first_page.items;

    if meta.has_next() {
        let fetch_page = &fetch_page;
        let mut remaining = stream::iter(meta.next_page()..=meta.total_pages)
            .map(|page| async move {
                match timeout(REMAINING_PAGE_TIMEOUT, fetch_page(page)).await {
                    Ok(Ok(fetched)) => fetched.items,
                    Ok(Err(error)) => {
                        warn!(page, %error, "dropping catalogue page after fetch failure");
                        Vec::new()
                    }
                    Err(_) => {
                        warn!(
                            page,
                            timeout_secs = REMAINING_PAGE_TIMEOUT.as_secs(),
                            "dropping catalogue page after timeout"
                        );
                        Vec::new()
                    }
                }
            })
            .buffer_unordered(MAX_CONCURRENT_PAGE_FETCHES);

        while let Some(mut fetched) = remaining.next().await {
            items.append(&mut fetched);
        }
    }

    items.sort_by_key(Identified::id);
    items
}
