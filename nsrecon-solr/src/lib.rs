//! Solr select-handler client for resource discovery.
//!
//! The repository's external search index keeps one document per stored
//! resource, with the resource identifier in `id` and the indexed RDF
//! types in the multi-valued `rdf_type` field. This crate issues
//! exact-phrase `rdf_type` queries against the select handler and hands
//! back the matching documents.

mod response;

pub use response::{ResponseBody, SelectResponse, SolrDocument};

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors from the select handler or the transport underneath it.
#[derive(Debug, Error)]
pub enum SolrError {
    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx status from the select handler.
    #[error("solr returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be parsed as a select response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// HTTP client for a single Solr core.
#[derive(Debug, Clone)]
pub struct SolrClient {
    client: Client,
    base_url: String,
}

impl SolrClient {
    /// Create a client for a core URL (e.g.
    /// `http://localhost:8983/solr/fedora4/`). Trailing slashes are
    /// stripped.
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Exact-phrase query for a single `rdf_type` value.
    ///
    /// Backslashes and quotes inside the value are escaped so the whole
    /// URI stays within one phrase.
    pub fn rdf_type_query(value: &str) -> String {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("rdf_type:\"{escaped}\"")
    }

    /// Run a select query, returning the matched documents.
    ///
    /// `fields` is the comma-separated `fl` list. Only the handler's
    /// default row window is fetched; there is no pagination here.
    pub async fn select(&self, query: &str, fields: &str) -> Result<Vec<SolrDocument>, SolrError> {
        let url = format!("{}/select", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("q", query), ("fl", fields), ("wt", "json")])
            .send()
            .await
            .map_err(Self::map_network_error)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SolrError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: SelectResponse = resp
            .json()
            .await
            .map_err(|e| SolrError::InvalidResponse(e.to_string()))?;
        Ok(body.response.docs)
    }

    /// Map a reqwest error (network/timeout) to a `SolrError`.
    fn map_network_error(e: reqwest::Error) -> SolrError {
        if e.is_timeout() {
            SolrError::Network(format!("request timed out: {e}"))
        } else if e.is_connect() {
            SolrError::Network(format!("connection failed: {e}"))
        } else {
            SolrError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_strips_trailing_slash() {
        let client = SolrClient::new("http://localhost:8983/solr/fedora4/");
        assert_eq!(client.base_url, "http://localhost:8983/solr/fedora4");
    }

    #[test]
    fn test_rdf_type_query_plain() {
        assert_eq!(
            SolrClient::rdf_type_query("http://example.org/ns1#None"),
            "rdf_type:\"http://example.org/ns1#None\""
        );
    }

    #[test]
    fn test_rdf_type_query_escapes_quotes_and_backslashes() {
        assert_eq!(
            SolrClient::rdf_type_query(r#"a"b\c"#),
            r#"rdf_type:"a\"b\\c""#
        );
    }

    #[tokio::test]
    async fn test_select_returns_docs() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/solr/fedora4/select"))
            .and(query_param("q", "rdf_type:\"http://example.org/ns1#None\""))
            .and(query_param("fl", "id,rdf_type"))
            .and(query_param("wt", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "responseHeader": {"status": 0},
                "response": {
                    "numFound": 2,
                    "docs": [
                        {"id": "/obj/1", "rdf_type": ["fedora:Container"]},
                        {"id": "/obj/2", "rdf_type": ["fedora:Binary", "fedora:Resource"]}
                    ]
                }
            })))
            .mount(&server)
            .await;

        let client = SolrClient::new(&format!("{}/solr/fedora4", server.uri()));
        let docs = client
            .select("rdf_type:\"http://example.org/ns1#None\"", "id,rdf_type")
            .await
            .unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "/obj/1");
        assert_eq!(docs[1].rdf_type, vec!["fedora:Binary", "fedora:Resource"]);
    }

    #[tokio::test]
    async fn test_select_non_success_status_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/core/select"))
            .respond_with(ResponseTemplate::new(400).set_body_string("undefined field rdf_type"))
            .mount(&server)
            .await;

        let client = SolrClient::new(&format!("{}/core", server.uri()));
        let err = client
            .select("rdf_type:\"x\"", "id,rdf_type")
            .await
            .unwrap_err();

        match err {
            SolrError::Status { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("undefined field"));
            }
            other => panic!("expected status error, got: {other}"),
        }
    }
}
