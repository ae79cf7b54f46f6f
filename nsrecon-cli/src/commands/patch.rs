//! The patch stage: retract each namespace's type assertion from its
//! resolved resource and record the outcome.
//!
//! One audit row is written (and flushed) per non-skipped input row, so
//! a killed run leaves a usable partial audit CSV. Rows with an empty
//! resource are skipped without an output row. Each request is
//! attempted exactly once; one row's failure never ends the batch.

use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::record::{type_uri, ColumnIndex, PatchOutcome, OUTCOME_HEADER};
use chrono::Local;
use nsrecon_fcrepo::{normalize_resource, retraction, FcrepoClient};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Response-code value recorded when the request got no response at all
/// (connection refused, timeout). Matches curl's convention.
const NO_RESPONSE_CODE: &str = "000";

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

pub async fn run(input: &Path, skip_until: Option<&str>, config: &Config) -> CliResult<()> {
    // Fatal precondition, checked before any row regardless of mode.
    let token = config.require_auth_token()?;

    if config.dry_run {
        warn!("running in DRY RUN mode -- no updates will be submitted");
    }

    let output = output_path(input, config.dry_run);

    let mut reader = csv::Reader::from_path(input)
        .map_err(|e| CliError::Input(format!("failed to read {}: {e}", input.display())))?;
    let cols = ColumnIndex::from_headers(&reader.headers()?.clone())?;

    let mut writer = csv::Writer::from_path(&output)
        .map_err(|e| CliError::Input(format!("failed to create {}: {e}", output.display())))?;
    writer.write_record(OUTCOME_HEADER)?;
    writer.flush()?;

    let fcrepo = FcrepoClient::new(&config.fcrepo_url, token.to_string());

    let mut skipping = skip_until.is_some();

    for row in reader.records() {
        let row = row?;
        let prefix = cols.namespace(&row);

        if skipping {
            if Some(prefix) == skip_until {
                skipping = false;
            } else {
                info!("skipping prefix {prefix} (before --skip-until match)");
                continue;
            }
        }

        info!("processing row with prefix {prefix}");

        let resource = cols.resource(&row);
        if resource.is_empty() {
            info!("  no resource; skipping");
            continue;
        }

        let resource = normalize_resource(resource);
        let request_uri = fcrepo.request_uri(&resource);
        let sparql = retraction(&type_uri(cols.namespace_uri(&row)));
        let request_time = Local::now().format(TIMESTAMP_FORMAT).to_string();

        let response_code = if config.dry_run {
            info!("  dry-run: PATCH {request_uri} {sparql}");
            String::new()
        } else {
            match fcrepo.patch_sparql(&request_uri, &sparql).await {
                Ok(status) => {
                    info!("  PATCH {request_uri} -> {status}");
                    status.to_string()
                }
                Err(e) => {
                    warn!("  PATCH {request_uri} got no response: {e}");
                    NO_RESPONSE_CODE.to_string()
                }
            }
        };

        let outcome = PatchOutcome {
            request_uri,
            sparql,
            response_code,
            request_time,
        };
        writer.write_record(outcome.as_row())?;
        writer.flush()?;

        if let Some(pause) = config.wait {
            info!("  pausing {} seconds", pause.as_secs());
            tokio::time::sleep(pause).await;
        }
    }

    println!("Requests completed. Results written to {}", output.display());
    Ok(())
}

/// `<stem>-<timestamp>-completed.csv`, with a `.dryrun` marker before
/// the extension when no updates were submitted.
fn output_path(input: &Path, dry_run: bool) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("input");
    let timestamp = Local::now().format(TIMESTAMP_FORMAT);
    let marker = if dry_run { ".dryrun" } else { "" };
    input.with_file_name(format!("{stem}-{timestamp}-completed{marker}.csv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_carries_dry_run_marker() {
        let live = output_path(Path::new("/tmp/ns.csv"), false);
        let dry = output_path(Path::new("/tmp/ns.csv"), true);

        let live = live.file_name().unwrap().to_str().unwrap();
        let dry = dry.file_name().unwrap().to_str().unwrap();

        assert!(live.starts_with("ns-") && live.ends_with("-completed.csv"), "{live}");
        assert!(dry.ends_with("-completed.dryrun.csv"), "{dry}");
    }
}
