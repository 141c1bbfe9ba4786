//! Result types handed back to callers.
//!
//! Field names serialize in the API's camelCase so JSON output matches what
//! the platform itself returns.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Key under which search hits are stored alongside the entity categories.
pub const HITS_KEY: &str = "hits";

/// One known-drug interaction linking a drug, a target and a disease.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRow {
    pub approved_name: String,
    pub approved_symbol: String,
    pub target_id: String,
    pub disease_id: String,
    pub drug_id: String,
}

/// A named bucket with its hit count, e.g. `{"name": "drug", "total": 12}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub entity: String,
    pub name: String,
}

/// Reshaped search response.
///
/// Behaves as an ordered mapping from entity name to its categories, with the
/// reserved [`HITS_KEY`] holding the hits. Serializes to exactly that mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    entities: Vec<(String, Vec<CategoryCount>)>,
    hits: Vec<SearchHit>,
    total: u64,
}

impl SearchResult {
    #[must_use]
    pub fn new(total: u64) -> Self {
        Self {
            entities: Vec::new(),
            hits: Vec::new(),
            total,
        }
    }

    /// Stores `categories` under `name`.
    ///
    /// An existing entry with the same name is replaced and moves to the end.
    pub fn insert_entity(&mut self, name: impl Into<String>, categories: Vec<CategoryCount>) {
        let name = name.into();
        if let Some(pos) = self.entities.iter().position(|(n, _)| *n == name) {
            tracing::debug!(entity = %name, "Duplicate entity aggregation, keeping the later one");
            self.entities.remove(pos);
        }
        self.entities.push((name, categories));
    }

    /// Stores the hits, dropping any entity that was literally named `hits`.
    pub fn set_hits(&mut self, hits: Vec<SearchHit>) {
        let before = self.entities.len();
        self.entities.retain(|(n, _)| n != HITS_KEY);
        if self.entities.len() != before {
            tracing::debug!("Entity aggregation named 'hits' overwritten by search hits");
        }
        self.hits = hits;
    }

    /// Categories stored for an entity name.
    #[must_use]
    pub fn categories(&self, entity: &str) -> Option<&[CategoryCount]> {
        self.entities
            .iter()
            .find(|(n, _)| n == entity)
            .map(|(_, c)| c.as_slice())
    }

    pub fn entities(&self) -> impl Iterator<Item = (&str, &[CategoryCount])> {
        self.entities.iter().map(|(n, c)| (n.as_str(), c.as_slice()))
    }

    #[must_use]
    pub fn hits(&self) -> &[SearchHit] {
        &self.hits
    }

    /// Total number of matches the API reported, which may exceed `hits().len()`.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Mapping keys in order: entity names followed by [`HITS_KEY`].
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entities
            .iter()
            .map(|(n, _)| n.as_str())
            .chain(std::iter::once(HITS_KEY))
    }
}

impl Serialize for SearchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entities.len() + 1))?;
        for (name, categories) in &self.entities {
            map.serialize_entry(name, categories)?;
        }
        map.serialize_entry(HITS_KEY, &self.hits)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, total: u64) -> CategoryCount {
        CategoryCount {
            name: name.to_string(),
            total,
        }
    }

    fn hit(id: &str) -> SearchHit {
        SearchHit {
            id: id.to_string(),
            entity: "target".to_string(),
            name: id.to_lowercase(),
        }
    }

    #[test]
    fn test_insert_entity_last_write_wins() {
        let mut result = SearchResult::new(0);
        result.insert_entity("drug", vec![category("a", 1)]);
        result.insert_entity("target", vec![category("b", 2)]);
        result.insert_entity("drug", vec![category("c", 3)]);

        assert_eq!(result.categories("drug"), Some(&[category("c", 3)][..]));
        let keys: Vec<_> = result.keys().collect();
        assert_eq!(keys, vec!["target", "drug", "hits"]);
    }

    #[test]
    fn test_set_hits_overwrites_entity_named_hits() {
        let mut result = SearchResult::new(2);
        result.insert_entity("hits", vec![category("x", 9)]);
        result.insert_entity("disease", vec![]);
        result.set_hits(vec![hit("A"), hit("B")]);

        assert!(result.categories("hits").is_none());
        let keys: Vec<_> = result.keys().collect();
        assert_eq!(keys, vec!["disease", "hits"]);
        assert_eq!(result.hits().len(), 2);
    }

    #[test]
    fn test_serializes_as_mapping() {
        let mut result = SearchResult::new(1);
        result.insert_entity("drug", vec![category("approved", 4)]);
        result.set_hits(vec![hit("ENSG1")]);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "drug": [{ "name": "approved", "total": 4 }],
                "hits": [{ "id": "ENSG1", "entity": "target", "name": "ensg1" }]
            })
        );
    }

    #[test]
    fn test_interaction_row_uses_camel_case() {
        let row: InteractionRow = serde_json::from_value(serde_json::json!({
            "approvedName": "ASPIRIN",
            "approvedSymbol": "PTGS2",
            "targetId": "ENSG00000073756",
            "diseaseId": "EFO_0003785",
            "drugId": "CHEMBL25"
        }))
        .unwrap();
        assert_eq!(row.approved_name, "ASPIRIN");
        assert_eq!(row.drug_id, "CHEMBL25");
    }
}
