// src/api/pagination.rs
//! OData pagination without BoxFuture.
//!
//! Graph splits large collections across responses and chains them with
//! `@odata.nextLink`. The continuation link targets the same collection
//! endpoint; only its query string changes (Graph moves its position
//! marker, `$skiptoken`, through it). So a full walk is: issue the
//! caller's query, then keep re-issuing whatever query the last link
//! carried until no link comes back.

use super::responses::ListResponse;
use crate::error::AppError;
use url::Url;

/// Everything a full collection walk produced.
#[derive(Debug, Clone)]
pub struct Collected<T> {
    pub items: Vec<T>,
    /// `@odata.count` from the first response, when `$count=true` was sent.
    pub total: Option<i64>,
    pub requests_made: u32,
}

/// Fetches every item in a paginated collection using async closures directly.
///
/// `fetch_fn` receives the query pairs for one request: the caller's own
/// options on the first call, then whatever each continuation link
/// carried. Any request error aborts the walk.
pub async fn fetch_all_items<T, F, Fut>(
    initial_query: Vec<(String, String)>,
    mut fetch_fn: F,
    max_requests: Option<u32>,
) -> Result<Collected<T>, AppError>
where
    F: FnMut(Vec<(String, String)>) -> Fut,
    Fut: std::future::Future<Output = Result<ListResponse<T>, AppError>>,
{
    let mut items = Vec::new();
    let mut total = None;
    let mut query = initial_query;
    let mut requests_made = 0u32;

    loop {
        // Check if we've reached the request limit
        if let Some(max) = max_requests {
            if requests_made >= max {
                log::debug!("Reached maximum request limit: {}", max);
                break;
            }
        }

        let response = fetch_fn(query).await?;
        requests_made += 1;

        if total.is_none() {
            total = response.count;
        }
        items.extend(response.value);

        match response.next_link {
            Some(link) => query = continuation_query(&link)?,
            None => break,
        }
    }

    Ok(Collected {
        items,
        total,
        requests_made,
    })
}

/// Extracts the query pairs from an `@odata.nextLink`.
pub fn continuation_query(link: &str) -> Result<Vec<(String, String)>, AppError> {
    let url = Url::parse(link).map_err(|source| AppError::BadContinuationLink {
        link: link.to_string(),
        source,
    })?;
    Ok(url.query_pairs().into_owned().collect())
}
