//! CSV data model shared by the resolve and patch stages.

use crate::error::{CliError, CliResult};
use csv::StringRecord;

/// Column names the input catalog must declare.
pub const NAMESPACE_COL: &str = "namespace";
pub const NAMESPACE_URI_COL: &str = "namespaceUri";
pub const RESOURCE_COL: &str = "resource";

/// Local name appended to a namespace URI to form its legacy type URI.
///
/// The spurious node types being cleaned up were registered as
/// `<prefix>:None`, so the RDF type the repository indexed is the
/// namespace URI with a literal `None` local name.
pub const TYPE_LOCAL_NAME: &str = "None";

/// The RDF type URI synthesized for a namespace. Used both as the
/// search predicate value and as the retraction target.
pub fn type_uri(namespace_uri: &str) -> String {
    format!("{namespace_uri}{TYPE_LOCAL_NAME}")
}

/// Positions of the required columns within an input CSV header.
///
/// Both stages work on raw [`StringRecord`]s so any extra columns the
/// catalog carries survive a passthrough write; the indices give named
/// access to the three columns the pipeline actually reads.
#[derive(Debug, Clone, Copy)]
pub struct ColumnIndex {
    namespace: usize,
    namespace_uri: usize,
    resource: usize,
}

impl ColumnIndex {
    /// Locate the required columns, failing if any is missing.
    pub fn from_headers(headers: &StringRecord) -> CliResult<Self> {
        let find = |name: &str| {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                CliError::Input(format!("input CSV is missing required column '{name}'"))
            })
        };
        Ok(Self {
            namespace: find(NAMESPACE_COL)?,
            namespace_uri: find(NAMESPACE_URI_COL)?,
            resource: find(RESOURCE_COL)?,
        })
    }

    pub fn namespace<'a>(&self, row: &'a StringRecord) -> &'a str {
        row.get(self.namespace).unwrap_or("")
    }

    pub fn namespace_uri<'a>(&self, row: &'a StringRecord) -> &'a str {
        row.get(self.namespace_uri).unwrap_or("")
    }

    pub fn resource<'a>(&self, row: &'a StringRecord) -> &'a str {
        row.get(self.resource).unwrap_or("")
    }

    /// Copy of `row` with the resource column replaced.
    pub fn with_resource(&self, row: &StringRecord, resource: &str) -> StringRecord {
        row.iter()
            .enumerate()
            .map(|(i, field)| if i == self.resource { resource } else { field })
            .collect()
    }
}

/// Fixed header of the patch stage's audit CSV.
pub const OUTCOME_HEADER: [&str; 4] = ["Request URI", "SPARQL Data", "Response Code", "Request Time"];

/// One row of the patch stage's audit CSV. Written immediately after
/// the submission attempt and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchOutcome {
    pub request_uri: String,
    /// The exact update statement that was (or would have been) submitted.
    pub sparql: String,
    /// HTTP status as returned by the repository, `""` under dry-run,
    /// `"000"` when the request never got a response.
    pub response_code: String,
    /// Timestamp of the submission attempt (`%Y%m%d%H%M%S`).
    pub request_time: String,
}

impl PatchOutcome {
    pub fn as_row(&self) -> [&str; 4] {
        [
            &self.request_uri,
            &self.sparql,
            &self.response_code,
            &self.request_time,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_type_uri_appends_legacy_local_name() {
        assert_eq!(
            type_uri("http://example.org/ns1#"),
            "http://example.org/ns1#None"
        );
    }

    #[test]
    fn test_column_index_requires_all_three_columns() {
        let err = ColumnIndex::from_headers(&headers(&["namespace", "namespaceUri"])).unwrap_err();
        assert!(format!("{err}").contains("resource"));
    }

    #[test]
    fn test_column_index_tolerates_extra_columns_in_any_order() {
        let hdr = headers(&["nodeType", "resource", "namespace", "namespaceUri"]);
        let cols = ColumnIndex::from_headers(&hdr).unwrap();
        let row = StringRecord::from(vec!["ns1:None", "/obj/1", "ns1", "http://x/"]);
        assert_eq!(cols.namespace(&row), "ns1");
        assert_eq!(cols.namespace_uri(&row), "http://x/");
        assert_eq!(cols.resource(&row), "/obj/1");
    }

    #[test]
    fn test_with_resource_preserves_other_fields() {
        let hdr = headers(&["namespace", "namespaceUri", "nodeType", "resource"]);
        let cols = ColumnIndex::from_headers(&hdr).unwrap();
        let row = StringRecord::from(vec!["ns1", "http://x/", "ns1:None", ""]);
        let updated = cols.with_resource(&row, "/obj/9");
        assert_eq!(
            updated,
            StringRecord::from(vec!["ns1", "http://x/", "ns1:None", "/obj/9"])
        );
        // input row untouched
        assert_eq!(cols.resource(&row), "");
    }
}
