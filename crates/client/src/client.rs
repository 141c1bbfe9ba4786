//! Configurable Open Targets Platform client.
//!
//! Every operation sends exactly one POST to the GraphQL endpoint. There is no
//! retry: a failed request is terminal for that call.

use crate::{
    extract_interactions, extract_search, query, IdType, InteractionRow, OpenTargetsError, Result,
    SearchResult, MAX_PAGE_SIZE, SEARCH_QUERY,
};
use std::collections::HashMap;
use std::time::Duration;

/// Public Open Targets Platform GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.platform.opentargets.org/api/v4/graphql";

/// Default timeout for a request (30 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// A client for the Open Targets Platform GraphQL API.
///
/// # Examples
///
/// ```no_run
/// use opentargets_client::{IdType, OpenTargetsClient};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = OpenTargetsClient::new();
///
/// let results = client.search("BRAF", 25).await?;
/// for hit in results.hits() {
///     println!("{} {} {}", hit.entity, hit.id, hit.name);
/// }
///
/// let rows = client.interactions("CHEMBL25", IdType::Drug).await?;
/// println!("{} known interactions", rows.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OpenTargetsClient {
    endpoint: String,
    headers: HashMap<String, String>,
    timeout: Duration,
    connect_timeout: Duration,
}

impl Default for OpenTargetsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenTargetsClient {
    /// Creates a client for the public endpoint.
    ///
    /// Default settings:
    /// - 30 second request timeout
    /// - 10 second connection timeout
    /// - No custom headers
    #[must_use]
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            headers: HashMap::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Points the client at a different GraphQL endpoint, e.g. a mirror or a
    /// local deployment of the platform API.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Adds a custom HTTP header to every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds multiple HTTP headers from an iterator.
    #[must_use]
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    /// Sets the request timeout (connection + transfer). Default is 30 seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection timeout. Default is 10 seconds.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Free-text search across drugs, targets and diseases.
    ///
    /// `size` above 10000 is clamped to 10000. Smaller values, zero and
    /// negatives included, are sent as given. [`OpenTargetsClient::search_all`]
    /// uses 10000.
    ///
    /// # Errors
    ///
    /// Returns [`OpenTargetsError::Usage`] for empty `keywords` without sending
    /// a request, otherwise any transport or parse failure.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, keywords: &str, size: i64) -> Result<SearchResult> {
        if keywords.trim().is_empty() {
            tracing::warn!("Search called without keywords");
            return Err(OpenTargetsError::Usage(
                "keywords are required for search".to_string(),
            ));
        }

        let (size, clamped) = query::clamp_search_size(size);
        if clamped {
            tracing::info!(size, "Requested size exceeds the API limit, using {size}");
        }

        let variables = serde_json::json!({
            "keywords": keywords,
            "size": size,
        });

        let json = self
            .post_graphql(SEARCH_QUERY, &variables)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Search failed"))?;

        extract_search(&json).inspect_err(|e| tracing::warn!(error = %e, "Search failed"))
    }

    /// Free-text search with the default page size of [`MAX_PAGE_SIZE`].
    ///
    /// # Errors
    ///
    /// Same as [`OpenTargetsClient::search`].
    pub async fn search_all(&self, keywords: &str) -> Result<SearchResult> {
        self.search(keywords, MAX_PAGE_SIZE).await
    }

    /// Known-drug interactions for an identifier given as a string kind.
    ///
    /// `id_type` must be exactly `drug`, `target` or `disease`; anything else
    /// fails with [`OpenTargetsError::InvalidIdType`] before a request is sent.
    ///
    /// # Errors
    ///
    /// Returns the invalid kind, transport or parse failure as an error.
    #[tracing::instrument(skip(self))]
    pub async fn get_interactions(
        &self,
        query_id: &str,
        id_type: &str,
    ) -> Result<Vec<InteractionRow>> {
        let id_type = id_type.parse::<IdType>().inspect_err(|_| {
            tracing::warn!(id_type, "Invalid id_type, expected drug, target or disease");
        })?;
        self.interactions(query_id, id_type).await
    }

    /// Known-drug interactions rooted at a drug, target or disease.
    ///
    /// An identifier the API does not know yields an empty list. Rows beyond
    /// the 10000 page size are silently dropped by the API.
    ///
    /// # Errors
    ///
    /// Returns [`OpenTargetsError::Usage`] for an empty `query_id`, otherwise
    /// any transport or parse failure.
    #[tracing::instrument(skip(self))]
    pub async fn interactions(
        &self,
        query_id: &str,
        id_type: IdType,
    ) -> Result<Vec<InteractionRow>> {
        if query_id.trim().is_empty() {
            tracing::warn!("Interaction lookup called without an identifier");
            return Err(OpenTargetsError::Usage(format!(
                "a {} identifier is required",
                id_type.namespace()
            )));
        }

        let variables = serde_json::json!({ "query_id": query_id });

        let json = self
            .post_graphql(id_type.query(), &variables)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Interaction lookup failed"))?;

        extract_interactions(&json, id_type)
            .inspect_err(|e| tracing::warn!(error = %e, "Interaction lookup failed"))
    }

    /// Sends one GraphQL request and returns the parsed JSON body.
    ///
    /// # Errors
    ///
    /// - [`OpenTargetsError::Network`] when the request cannot be sent or times out
    /// - [`OpenTargetsError::Http`] for a non-success status
    /// - [`OpenTargetsError::Parse`] when the body is not JSON
    #[tracing::instrument(skip(self, query, variables), fields(endpoint = %self.endpoint))]
    pub async fn post_graphql(
        &self,
        query: &str,
        variables: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        tracing::debug!("Creating HTTP client with timeouts");
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|e| OpenTargetsError::Network(format!("Failed to create HTTP client: {e}")))?;

        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        tracing::debug!("Sending GraphQL request");
        let mut request = client.post(&self.endpoint);
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        // `json` only sets Content-Type when no custom header already did
        let response = request
            .json(&body)
            .send()
            .await
            .map_err(|e| OpenTargetsError::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received response");

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown status");
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %error_body, "HTTP error response");
            return Err(OpenTargetsError::Http(status.as_u16(), reason.to_string()));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse response body");
            OpenTargetsError::Parse(e.to_string())
        })?;

        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_default() {
        let client = OpenTargetsClient::new();
        assert!(client.headers.is_empty());
        assert_eq!(client.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(client.timeout, Duration::from_secs(30));
        assert_eq!(client.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_client_with_endpoint() {
        let client = OpenTargetsClient::new().with_endpoint("http://localhost:8080/api/v4/graphql");
        assert_eq!(client.endpoint(), "http://localhost:8080/api/v4/graphql");
    }

    #[test]
    fn test_client_with_headers() {
        let client = OpenTargetsClient::new()
            .with_header("User-Agent", "opentargets-test")
            .with_headers(vec![("X-Request-ID", "12345")]);

        assert_eq!(
            client.headers.get("User-Agent"),
            Some(&"opentargets-test".to_string())
        );
        assert_eq!(client.headers.len(), 2);
    }

    #[test]
    fn test_client_with_timeouts() {
        let client = OpenTargetsClient::new()
            .with_timeout(Duration::from_secs(60))
            .with_connect_timeout(Duration::from_secs(5));
        assert_eq!(client.timeout, Duration::from_secs(60));
        assert_eq!(client.connect_timeout, Duration::from_secs(5));
    }
}
