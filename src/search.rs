use serde_json::Value;
use tracing::{info, warn};

use crate::domain::{EntryId, Lookup, SkipReason};
use crate::error::HarvestError;
use crate::query::SearchQuery;
use crate::rcsb::RcsbClient;

/// Runs the search and returns hits in the order the service ranked them.
/// Any failure here is fatal for the run; a hit whose identifier is not a
/// usable entry id keeps its position as a skipped lookup.
pub fn search<R: RcsbClient + ?Sized>(
    client: &R,
    query: &SearchQuery,
) -> Result<Vec<Lookup<EntryId>>, HarvestError> {
    let response = client.search(query).map_err(into_search_error)?;
    let ids = extract_identifiers(&response)?;
    info!(found = ids.len(), "search finished");
    Ok(ids)
}

pub fn extract_identifiers(response: &Value) -> Result<Vec<Lookup<EntryId>>, HarvestError> {
    if response.is_null() {
        return Ok(Vec::new());
    }
    let Some(result_set) = response.get("result_set") else {
        return Ok(Vec::new());
    };
    let items = result_set
        .as_array()
        .ok_or_else(|| HarvestError::SearchParse("result_set is not an array".to_string()))?;

    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        let identifier = item
            .get("identifier")
            .and_then(|value| value.as_str())
            .ok_or_else(|| HarvestError::SearchParse(format!("result without identifier: {item}")))?;
        match EntryId::new(identifier) {
            Ok(id) => ids.push(Lookup::Found(id)),
            Err(err) => {
                warn!(identifier, error = %err, "unusable search hit");
                ids.push(Lookup::Skipped(SkipReason::entry(&err)));
            }
        }
    }
    Ok(ids)
}

fn into_search_error(err: HarvestError) -> HarvestError {
    match err {
        HarvestError::RcsbHttp(message) => HarvestError::SearchHttp(message),
        HarvestError::RcsbStatus { status, message } => {
            HarvestError::SearchStatus { status, message }
        }
        HarvestError::RcsbParse(message) => HarvestError::SearchParse(message),
        other => other,
    }
}
