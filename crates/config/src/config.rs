use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Client settings read from a config file.
///
/// ```yaml
/// endpoint: https://api.platform.opentargets.org/api/v4/graphql
/// timeout: 60
/// connectTimeout: 5
/// searchSize: 500
/// headers:
///   User-Agent: my-pipeline/1.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenTargetsConfig {
    /// GraphQL endpoint URL (default: the public platform API)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Extra HTTP headers sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,

    /// Request timeout in seconds (default: 30)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Connection timeout in seconds (default: 10)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<u64>,

    /// Default page size for `search` when none is given (default: 10000)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_size: Option<i64>,
}

impl OpenTargetsConfig {
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout.map(Duration::from_secs)
    }

    /// Headers as name/value pairs, sorted by name for stable ordering.
    #[must_use]
    pub fn header_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<_> = self
            .headers
            .iter()
            .flatten()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        pairs.sort();
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_has_no_overrides() {
        let config: OpenTargetsConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, OpenTargetsConfig::default());
        assert!(config.timeout().is_none());
        assert!(config.header_pairs().is_empty());
    }

    #[test]
    fn test_camel_case_fields() {
        let config: OpenTargetsConfig = serde_json::from_str(
            r#"{"connectTimeout": 5, "searchSize": 100, "timeout": 45}"#,
        )
        .unwrap();
        assert_eq!(config.connect_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.timeout(), Some(Duration::from_secs(45)));
        assert_eq!(config.search_size, Some(100));
    }

    #[test]
    fn test_header_pairs_sorted() {
        let config = OpenTargetsConfig {
            headers: Some(HashMap::from([
                ("X-B".to_string(), "2".to_string()),
                ("X-A".to_string(), "1".to_string()),
            ])),
            ..Default::default()
        };
        assert_eq!(
            config.header_pairs(),
            vec![
                ("X-A".to_string(), "1".to_string()),
                ("X-B".to_string(), "2".to_string())
            ]
        );
    }
}
