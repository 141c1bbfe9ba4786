//! Fixed GraphQL documents sent to the Open Targets Platform.

use std::fmt;
use std::str::FromStr;

use crate::OpenTargetsError;

/// Largest page the API serves for a single request.
pub const MAX_PAGE_SIZE: i64 = 10_000;

/// Free-text search across all entity kinds.
///
/// Variables: `keywords: String!`, `size: Int!`.
pub const SEARCH_QUERY: &str = r"
query SearchQuery($keywords: String!, $size: Int!) {
  search(queryString: $keywords, page: { index: 0, size: $size }) {
    aggregations {
      entities {
        name
        total
        categories {
          name
          total
        }
      }
    }
    hits {
      id
      entity
      name
    }
    total
  }
}
";

pub const DRUG_INTERACTIONS_QUERY: &str = r"
query DrugInteractionsQuery($query_id: String!) {
  drug(chemblId: $query_id) {
    knownDrugs(size: 10000) {
      rows {
        approvedName
        approvedSymbol
        targetId
        diseaseId
        drugId
      }
    }
  }
}
";

pub const TARGET_INTERACTIONS_QUERY: &str = r"
query TargetInteractionsQuery($query_id: String!) {
  target(ensemblId: $query_id) {
    knownDrugs(size: 10000) {
      rows {
        approvedName
        approvedSymbol
        targetId
        diseaseId
        drugId
      }
    }
  }
}
";

pub const DISEASE_INTERACTIONS_QUERY: &str = r"
query DiseaseInteractionsQuery($query_id: String!) {
  disease(efoId: $query_id) {
    knownDrugs(size: 10000) {
      rows {
        approvedName
        approvedSymbol
        targetId
        diseaseId
        drugId
      }
    }
  }
}
";

/// The entity an interaction lookup is rooted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdType {
    /// `ChEMBL` identifier, e.g. `CHEMBL25`.
    Drug,
    /// Ensembl gene identifier, e.g. `ENSG00000157764`.
    Target,
    /// EFO identifier, e.g. `EFO_0000685`.
    Disease,
}

impl IdType {
    pub const ALL: [Self; 3] = [Self::Drug, Self::Target, Self::Disease];

    /// Name of the top-level field in the response `data` object.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drug => "drug",
            Self::Target => "target",
            Self::Disease => "disease",
        }
    }

    /// Identifier namespace the API expects for this kind.
    #[must_use]
    pub const fn namespace(self) -> &'static str {
        match self {
            Self::Drug => "ChEMBL",
            Self::Target => "Ensembl",
            Self::Disease => "EFO",
        }
    }

    #[must_use]
    pub const fn query(self) -> &'static str {
        match self {
            Self::Drug => DRUG_INTERACTIONS_QUERY,
            Self::Target => TARGET_INTERACTIONS_QUERY,
            Self::Disease => DISEASE_INTERACTIONS_QUERY,
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdType {
    type Err = OpenTargetsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drug" => Ok(Self::Drug),
            "target" => Ok(Self::Target),
            "disease" => Ok(Self::Disease),
            other => Err(OpenTargetsError::InvalidIdType(other.to_string())),
        }
    }
}

/// Returns the interaction document for `kind`, or `None` when the kind is not
/// one of `drug`, `target`, `disease`.
#[must_use]
pub fn build_query(kind: &str) -> Option<&'static str> {
    kind.parse::<IdType>().ok().map(IdType::query)
}

/// Clamps a requested search page size to [`MAX_PAGE_SIZE`].
///
/// Returns the size to send and whether clamping happened. Values at or below
/// the limit, including zero and negatives, are passed through untouched.
#[must_use]
pub fn clamp_search_size(size: i64) -> (i64, bool) {
    if size > MAX_PAGE_SIZE {
        (MAX_PAGE_SIZE, true)
    } else {
        (size, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_known_kinds() {
        let drug = build_query("drug").unwrap();
        assert!(drug.contains("drug(chemblId: $query_id)"));

        let target = build_query("target").unwrap();
        assert!(target.contains("target(ensemblId: $query_id)"));

        let disease = build_query("disease").unwrap();
        assert!(disease.contains("disease(efoId: $query_id)"));
    }

    #[test]
    fn test_build_query_unknown_kind() {
        assert!(build_query("gene").is_none());
        assert!(build_query("").is_none());
        // Matching is exact
        assert!(build_query("Drug").is_none());
        assert!(build_query(" drug").is_none());
    }

    #[test]
    fn test_interaction_queries_request_all_row_fields() {
        for id_type in IdType::ALL {
            let query = id_type.query();
            assert!(query.contains("knownDrugs(size: 10000)"), "{id_type}");
            for field in ["approvedName", "approvedSymbol", "targetId", "diseaseId", "drugId"] {
                assert!(query.contains(field), "{id_type} missing {field}");
            }
        }
    }

    #[test]
    fn test_search_query_shape() {
        assert!(SEARCH_QUERY.contains("$keywords: String!"));
        assert!(SEARCH_QUERY.contains("$size: Int!"));
        assert!(SEARCH_QUERY.contains("aggregations"));
        assert!(SEARCH_QUERY.contains("categories"));
        assert!(SEARCH_QUERY.contains("hits"));
        assert!(SEARCH_QUERY.contains("total"));
    }

    #[test]
    fn test_id_type_round_trips_through_display() {
        for id_type in IdType::ALL {
            assert_eq!(id_type.to_string().parse::<IdType>().unwrap(), id_type);
        }
    }

    #[test]
    fn test_id_type_parse_error_names_value() {
        let err = "compound".parse::<IdType>().unwrap_err();
        assert!(err.to_string().contains("'compound'"));
    }

    #[test]
    fn test_clamp_search_size() {
        assert_eq!(clamp_search_size(10), (10, false));
        assert_eq!(clamp_search_size(MAX_PAGE_SIZE), (MAX_PAGE_SIZE, false));
        assert_eq!(clamp_search_size(MAX_PAGE_SIZE + 1), (MAX_PAGE_SIZE, true));
        assert_eq!(clamp_search_size(i64::MAX), (MAX_PAGE_SIZE, true));
        assert_eq!(clamp_search_size(0), (0, false));
        assert_eq!(clamp_search_size(-5), (-5, false));
    }
}
