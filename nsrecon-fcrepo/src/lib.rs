//! Fedora Commons REST client and path rules.
//!
//! Two concerns live here: submitting SPARQL-Update PATCH requests to
//! the repository, and the path conventions around binary resources.
//! A binary stores its descriptive metadata at a derived address
//! (`<id>/fcr:metadata`), distinct from the content address, so type
//! retractions against binaries must target the metadata subresource.

use reqwest::Client;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// RDF type marker the index records for binary (non-RDF) resources.
pub const FEDORA_BINARY: &str = "fedora:Binary";

/// Metadata subresource segment for binary resources.
pub const METADATA_SEGMENT: &str = "fcr:metadata";

/// Content-addressing segment found in pre-migration identifiers.
const LEGACY_CONTENT_SEGMENT: &str = "jcr:content";

/// The metadata-subresource address for a binary resource identifier.
pub fn describedby_uri(id: &str) -> String {
    format!("{id}/{METADATA_SEGMENT}")
}

/// Rewrite legacy `jcr:content` segments to `fcr:metadata`.
///
/// Upstream resolution already emits metadata addresses for binaries;
/// this catches identifiers that arrived from older exports instead.
pub fn normalize_resource(resource: &str) -> String {
    resource.replace(LEGACY_CONTENT_SEGMENT, METADATA_SEGMENT)
}

/// SPARQL-Update body retracting `type_uri` from the patched resource.
///
/// `<>` resolves to the request URI on the repository side, so the one
/// statement shape serves every resource.
pub fn retraction(type_uri: &str) -> String {
    format!("DELETE DATA {{ <> a <{type_uri}>}}")
}

/// Errors from the repository transport.
///
/// Note that HTTP error statuses are deliberately not represented here:
/// the patch pipeline records whatever status the repository returns,
/// success or not, so only transport-level failures are errors.
#[derive(Debug, Error)]
pub enum FcrepoError {
    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),
}

/// HTTP client for SPARQL-Update PATCH operations against a Fedora
/// REST endpoint.
#[derive(Clone)]
pub struct FcrepoClient {
    client: Client,
    base_url: String,
    auth_token: String,
}

impl fmt::Debug for FcrepoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FcrepoClient")
            .field("base_url", &self.base_url)
            .field("has_token", &!self.auth_token.is_empty())
            .finish()
    }
}

impl FcrepoClient {
    /// Create a client for a REST base endpoint (e.g.
    /// `http://fcrepo-local:8080/fcrepo/rest`). Trailing slashes are
    /// stripped.
    pub fn new(base_url: &str, auth_token: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
        }
    }

    /// Absolute request URI for a resource identifier.
    ///
    /// Already-qualified identifiers pass through unmodified; repository
    /// paths are joined to the configured base endpoint.
    pub fn request_uri(&self, resource: &str) -> String {
        if resource.starts_with("http") {
            resource.to_string()
        } else {
            format!("{}{}", self.base_url, resource)
        }
    }

    /// Submit a SPARQL-Update PATCH, returning the raw response status.
    ///
    /// The request is attempted exactly once. A non-2xx status is data
    /// to the caller, not an error; only failures to get any response
    /// at all surface as [`FcrepoError`].
    pub async fn patch_sparql(&self, request_uri: &str, sparql: &str) -> Result<u16, FcrepoError> {
        let resp = self
            .client
            .patch(request_uri)
            .bearer_auth(&self.auth_token)
            .header("Content-Type", "application/sparql-update")
            .body(sparql.to_string())
            .send()
            .await
            .map_err(Self::map_network_error)?;

        Ok(resp.status().as_u16())
    }

    /// Map a reqwest error (network/timeout) to an `FcrepoError`.
    fn map_network_error(e: reqwest::Error) -> FcrepoError {
        if e.is_timeout() {
            FcrepoError::Network(format!("request timed out: {e}"))
        } else if e.is_connect() {
            FcrepoError::Network(format!("connection failed: {e}"))
        } else {
            FcrepoError::Network(e.to_string())
        }
    }
}
