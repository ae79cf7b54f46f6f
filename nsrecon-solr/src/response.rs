//! Select-handler response types.

use serde::Deserialize;

/// Top-level select response envelope (`wt=json`).
#[derive(Debug, Clone, Deserialize)]
pub struct SelectResponse {
    pub response: ResponseBody,
}

/// The `response` block: total match count plus the returned document
/// window (which may be smaller than `num_found`).
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseBody {
    #[serde(rename = "numFound", default)]
    pub num_found: u64,
    #[serde(default)]
    pub docs: Vec<SolrDocument>,
}

/// One indexed repository resource.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SolrDocument {
    /// Resource identifier (repository path or absolute URI).
    pub id: String,
    /// Indexed RDF types, multi-valued.
    #[serde(default)]
    pub rdf_type: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_select_response() {
        let json = r#"{
            "responseHeader": {"status": 0, "QTime": 3},
            "response": {
                "numFound": 1,
                "start": 0,
                "docs": [{"id": "/a/b", "rdf_type": ["fedora:Binary"]}]
            }
        }"#;
        let parsed: SelectResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.response.num_found, 1);
        assert_eq!(parsed.response.docs[0].id, "/a/b");
        assert_eq!(parsed.response.docs[0].rdf_type, vec!["fedora:Binary"]);
    }

    #[test]
    fn test_missing_rdf_type_defaults_empty() {
        let json = r#"{"response": {"numFound": 1, "docs": [{"id": "/a"}]}}"#;
        let parsed: SelectResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.response.docs[0].rdf_type.is_empty());
    }
}
