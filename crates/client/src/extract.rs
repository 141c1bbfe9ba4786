//! Reshaping of raw GraphQL responses into [`InteractionRow`] lists and
//! [`SearchResult`] mappings.
//!
//! Responses are deserialized into typed envelopes, so a field that is present
//! but has the wrong shape is a [`OpenTargetsError::Parse`]. Absent or null
//! fields along the interaction path are not errors.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::query::MAX_PAGE_SIZE;
use crate::{
    CategoryCount, IdType, InteractionRow, OpenTargetsError, Result, SearchHit, SearchResult,
};

/// An entry of the top-level `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct InteractionData {
    drug: Option<KnownDrugsOwner>,
    target: Option<KnownDrugsOwner>,
    disease: Option<KnownDrugsOwner>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KnownDrugsOwner {
    known_drugs: Option<KnownDrugs>,
}

#[derive(Debug, Deserialize)]
struct KnownDrugs {
    rows: Option<Vec<InteractionRow>>,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    search: Option<SearchPayload>,
}

#[derive(Debug, Deserialize)]
struct SearchPayload {
    aggregations: Option<Aggregations>,
    hits: Option<Vec<SearchHit>>,
    total: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Aggregations {
    entities: Option<Vec<EntityAggregation>>,
}

#[derive(Debug, Deserialize)]
struct EntityAggregation {
    name: String,
    categories: Option<Vec<CategoryCount>>,
}

fn decode<T: DeserializeOwned>(json: &Value) -> Result<Envelope<T>> {
    let envelope = Envelope::<T>::deserialize(json).map_err(|e| {
        tracing::error!(error = %e, "Unexpected response shape");
        OpenTargetsError::Parse(e.to_string())
    })?;
    for err in envelope.errors.iter().flatten() {
        tracing::warn!(message = %err.message, "GraphQL error in response");
    }
    Ok(envelope)
}

/// Pulls `data[id_type].knownDrugs.rows` out of an interaction response.
///
/// Returns an empty list when any step of that path is missing or null, which
/// is what the API answers for identifiers it does not know. The API caps rows
/// at the requested page size without signalling truncation, and neither does
/// this function.
pub fn extract_interactions(json: &Value, id_type: IdType) -> Result<Vec<InteractionRow>> {
    let envelope = decode::<InteractionData>(json)?;
    let Some(data) = envelope.data else {
        tracing::debug!("Response has no data");
        return Ok(Vec::new());
    };

    let owner = match id_type {
        IdType::Drug => data.drug,
        IdType::Target => data.target,
        IdType::Disease => data.disease,
    };

    let rows = owner
        .and_then(|o| o.known_drugs)
        .and_then(|k| k.rows)
        .unwrap_or_default();

    tracing::debug!(id_type = %id_type, rows = rows.len(), "Extracted interactions");
    Ok(rows)
}

/// Reshapes a search response into a [`SearchResult`].
///
/// Entity aggregations are inserted in order, later duplicates replacing
/// earlier ones; the hits go in last under `"hits"`.
pub fn extract_search(json: &Value) -> Result<SearchResult> {
    let envelope = decode::<SearchData>(json)?;
    let search = envelope.data.and_then(|d| d.search).ok_or_else(|| {
        tracing::error!("Response is missing data.search");
        OpenTargetsError::Parse("missing field `data.search`".to_string())
    })?;

    let total = search.total.unwrap_or(0);
    if i64::try_from(total).unwrap_or(i64::MAX) > MAX_PAGE_SIZE {
        tracing::info!(
            total,
            limit = MAX_PAGE_SIZE,
            "Search matched {total} entries, only the first {MAX_PAGE_SIZE} are returned"
        );
    }

    let mut results = SearchResult::new(total);
    let entities = search
        .aggregations
        .and_then(|a| a.entities)
        .unwrap_or_default();
    for entity in entities {
        results.insert_entity(entity.name, entity.categories.unwrap_or_default());
    }
    results.set_hits(search.hits.unwrap_or_default());

    tracing::debug!(
        total,
        hits = results.hits().len(),
        entities = results.entities().count(),
        "Extracted search results"
    );
    Ok(results)
}
