//! Paging through every external id indexed for one source.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::query_builder::build_source_ids_request;
use jobs_search_shared::MAX_RETURNED_DOCUMENTS;

/// Number of ids requested per page.
pub const PAGE_SIZE: usize = MAX_RETURNED_DOCUMENTS;

/// Collect the external ids of every document from `source`.
///
/// Pages are ordered by document id. The loop stops once the number of hits
/// seen reaches the total reported by the first page, or when a page comes
/// back empty. Ids are returned once each, in first-seen order.
#[instrument(skip(engine))]
pub async fn collect_external_ids(
    engine: &dyn SearchEngineClient,
    source: &str,
) -> Result<Vec<i64>, SearchError> {
    let mut ids = Vec::new();
    let mut seen = HashSet::new();
    let mut total: Option<u64> = None;
    let mut collected: u64 = 0;
    let mut from = 0;

    loop {
        let page = engine
            .search(&build_source_ids_request(source, from, PAGE_SIZE))
            .await?;
        let expected = *total.get_or_insert(page.total);

        if page.hits.is_empty() {
            if collected < expected {
                warn!(collected, expected, "Index shrank while paging");
            }
            break;
        }

        for hit in &page.hits {
            match hit.source.get("external_id").and_then(Value::as_i64) {
                Some(id) if seen.insert(id) => ids.push(id),
                Some(_) => {}
                None => warn!(id = %hit.id, "Hit has no external_id"),
            }
        }

        collected += page.hits.len() as u64;
        from += page.hits.len();
        debug!(collected, expected, "Fetched id page");

        if collected >= expected {
            break;
        }
    }

    info!(count = ids.len(), "Collected external ids");
    Ok(ids)
}
