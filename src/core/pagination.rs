//! Pagination collector.
//!
//! Pages are produced lazily: page N+1 is requested only after page N has
//! resolved, and only when the consumer polls for it.

use crate::errors::AppResult;
use crate::models::Page;
use futures::stream::{self, Stream, TryStreamExt};
use std::future::Future;

/// Lazy sequence of page batches, starting at page 0.
///
/// Ends after the reported `totalPages` (missing means one page), at the
/// first empty page, or right after yielding an error.
pub fn pages<T, F, Fut>(fetch: F) -> impl Stream<Item = AppResult<Vec<T>>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = AppResult<Page<T>>>,
{
    stream::unfold(Some((fetch, 0u32)), |state| async move {
        let (mut fetch, page) = state?;
        match fetch(page).await {
            Ok(batch) => {
                if batch.items.is_empty() {
                    return None;
                }
                let next = page + 1;
                let rest = (next < batch.total_pages_or_one()).then_some((fetch, next));
                Some((Ok(batch.items), rest))
            }
            Err(e) => Some((Err(e), None)),
        }
    })
}

/// Fetch every page and concatenate the items.
///
/// Any failing page aborts the whole collection; nothing partial is returned.
pub async fn collect_all<T, F, Fut>(fetch: F) -> AppResult<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = AppResult<Page<T>>>,
{
    pages(fetch).try_concat().await
}
