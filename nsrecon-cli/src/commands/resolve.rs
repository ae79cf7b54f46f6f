//! The resolve stage: expand namespace records into concrete resource
//! matches via the search index.
//!
//! Each input row lacking a resource is looked up by its synthesized
//! type URI. Every match becomes one output row; rows with zero matches
//! are held back and written as a trailing block so no namespace
//! silently disappears from the batch. Output is flushed row-by-row,
//! so a killed run leaves a valid partial CSV behind.

use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::record::{type_uri, ColumnIndex};
use nsrecon_fcrepo::{describedby_uri, FEDORA_BINARY};
use nsrecon_solr::SolrClient;
use std::path::{Path, PathBuf};
use tracing::info;

/// Fields requested from the index for each match.
const SELECT_FIELDS: &str = "id,rdf_type";

pub async fn run(input: &Path, config: &Config) -> CliResult<()> {
    let output = output_path(input);

    let mut reader = csv::Reader::from_path(input)
        .map_err(|e| CliError::Input(format!("failed to read {}: {e}", input.display())))?;
    let headers = reader.headers()?.clone();
    let cols = ColumnIndex::from_headers(&headers)?;

    let mut writer = csv::Writer::from_path(&output)
        .map_err(|e| CliError::Input(format!("failed to create {}: {e}", output.display())))?;
    writer.write_record(&headers)?;
    writer.flush()?;

    let solr = SolrClient::new(&config.solr_url);

    // Unmatched rows are deferred and flushed after the streaming pass,
    // so resolved rows stay contiguous and in input order. Bounded by
    // the count of unresolved namespaces, not the dataset.
    let mut unresolved: Vec<csv::StringRecord> = Vec::new();

    for row in reader.records() {
        let row = row?;
        info!("processing row with prefix {}", cols.namespace(&row));

        if !cols.resource(&row).is_empty() {
            writer.write_record(&row)?;
            writer.flush()?;
        } else {
            let rdf_type = type_uri(cols.namespace_uri(&row));
            let query = SolrClient::rdf_type_query(&rdf_type);
            let docs = solr.select(&query, SELECT_FIELDS).await?;

            if docs.is_empty() {
                info!("  no resources found");
                unresolved.push(row);
            } else {
                for doc in &docs {
                    // Binaries keep descriptive metadata at a derived
                    // address; the retraction must target that.
                    let id = if doc.rdf_type.iter().any(|t| t == FEDORA_BINARY) {
                        describedby_uri(&doc.id)
                    } else {
                        doc.id.clone()
                    };
                    info!("  {id}");
                    writer.write_record(&cols.with_resource(&row, &id))?;
                }
                writer.flush()?;
            }
        }

        if let Some(pause) = config.wait {
            info!("  pausing {} seconds", pause.as_secs());
            tokio::time::sleep(pause).await;
        }
    }

    for row in &unresolved {
        writer.write_record(row)?;
    }
    writer.flush()?;

    println!("Updated CSV file written to {}", output.display());
    Ok(())
}

/// `<stem>-with-resources.csv` next to the input.
fn output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("input");
    input.with_file_name(format!("{stem}-with-resources.csv"))
}
