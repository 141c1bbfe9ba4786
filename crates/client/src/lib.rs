//! Client for the Open Targets Platform GraphQL API.
//!
//! Two operations are exposed: free-text search across drugs, targets and
//! diseases, and lookup of known-drug interactions for a single identifier.
//! Each builds a fixed GraphQL document, sends it in one POST, and reshapes the
//! JSON answer into [`SearchResult`] or a list of [`InteractionRow`]s.
//!
//! # Examples
//!
//! ## Search
//!
//! ```no_run
//! use opentargets_client::OpenTargetsClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenTargetsClient::new();
//!     let results = client.search("asthma", 10).await?;
//!     for (entity, categories) in results.entities() {
//!         println!("{entity}: {} categories", categories.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Interactions for a drug
//!
//! ```no_run
//! use opentargets_client::OpenTargetsClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenTargetsClient::new();
//!     let rows = client.get_interactions("CHEMBL25", "drug").await?;
//!     for row in rows {
//!         println!("{} -> {} ({})", row.drug_id, row.target_id, row.disease_id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Rendering failures
//!
//! Failures are plain [`Result`] errors. [`ErrorResult`] renders one as
//! `{"error": "..."}` for callers that want a uniform payload.
//!
//! ```no_run
//! use opentargets_client::{ErrorResult, OpenTargetsClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = OpenTargetsClient::new();
//!     if let Err(err) = client.get_interactions("CHEMBL25", "compound").await {
//!         let payload = ErrorResult::from(&err);
//!         println!("{}", serde_json::to_string(&payload).unwrap());
//!     }
//! }
//! ```

mod client;
mod error;
mod extract;
mod query;
mod types;

pub use client::{OpenTargetsClient, DEFAULT_ENDPOINT};
pub use error::{ErrorResult, OpenTargetsError, Result};
pub use extract::{extract_interactions, extract_search, GraphQlError};
pub use query::{
    build_query, clamp_search_size, IdType, DISEASE_INTERACTIONS_QUERY, DRUG_INTERACTIONS_QUERY,
    MAX_PAGE_SIZE, SEARCH_QUERY, TARGET_INTERACTIONS_QUERY,
};
pub use types::{CategoryCount, InteractionRow, SearchHit, SearchResult, HITS_KEY};

/// Searches the public endpoint with default client settings.
///
/// Shorthand for [`OpenTargetsClient::search`] on [`OpenTargetsClient::new`].
#[tracing::instrument]
pub async fn search(keywords: &str, size: i64) -> Result<SearchResult> {
    OpenTargetsClient::new().search(keywords, size).await
}

/// Searches the public endpoint with the default page size of
/// [`MAX_PAGE_SIZE`].
#[tracing::instrument]
pub async fn search_all(keywords: &str) -> Result<SearchResult> {
    OpenTargetsClient::new().search_all(keywords).await
}

/// Looks up known-drug interactions on the public endpoint with default
/// client settings.
///
/// Shorthand for [`OpenTargetsClient::get_interactions`] on
/// [`OpenTargetsClient::new`].
#[tracing::instrument]
pub async fn get_interactions(query_id: &str, id_type: &str) -> Result<Vec<InteractionRow>> {
    OpenTargetsClient::new()
        .get_interactions(query_id, id_type)
        .await
}
