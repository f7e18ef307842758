//! The license check pipeline
//!
//! Four sequential queries, then a composite-key diff and a per-license
//! aggregation:
//!
//! 1. Permission sets linked to a license
//! 2. Filter to permission set licenses (`0PL` prefix), collect distinct ids
//! 3. Permission set assignments for those licenses
//! 4. Direct license seat assignments for those licenses
//! 5. Diff: seats with no matching permission set assignment are orphaned
//!
//! Zero rows from steps 1–2 short-circuit with an empty report; that is a
//! successful "nothing to audit" outcome, not an error. Zero rows from
//! steps 3–4 flow into the diff as-is. The two assignment queries are not
//! one consistent snapshot; records changing between them can skew a single
//! run, which is an accepted limitation of the query API.

pub mod keyset;
pub mod reconcile;
pub mod summary;

use crate::api::OrgClient;
use crate::error::CliResult;
use crate::models::LicenseCheckEntry;
use crate::output::print_step;

/// Run the full license check against an org.
///
/// With `quiet` set, step-by-step progress printing is suppressed (used for
/// `--json` output and in tests).
pub async fn run(client: &OrgClient, quiet: bool) -> CliResult<Vec<LicenseCheckEntry>> {
    let progress = |message: &str| {
        if !quiet {
            print_step(message);
        }
    };
    let detail = |message: String| {
        if !quiet {
            println!("> {message}");
            println!();
        }
    };

    progress("Step 1: Listing permission sets linked to a license...");
    let permission_sets = client.license_permission_sets().await?;
    if permission_sets.records.is_empty() {
        detail("No license-linked permission sets; nothing to audit.".to_string());
        return Ok(Vec::new());
    }
    detail(format!("Found {} records.", permission_sets.total_size));

    progress("Step 2: Filtering to permission set licenses (0PL prefix)...");
    let license_backed = keyset::filter_license_backed(permission_sets.records);
    if license_backed.is_empty() {
        detail("No permission set left after filtering; nothing to audit.".to_string());
        return Ok(Vec::new());
    }
    detail(format!("Kept {} records.", license_backed.len()));

    let license_ids = keyset::distinct_license_ids(&license_backed);
    if license_ids.is_empty() {
        detail("No license ids; nothing to audit.".to_string());
        return Ok(Vec::new());
    }
    let in_clause = keyset::in_clause(&license_ids);

    progress("Step 3: Fetching permission set assignments for those licenses...");
    let set_assignments = client.permission_set_assignments(&in_clause).await?;
    detail(format!(
        "Found {} permission set assignments.",
        set_assignments.total_size
    ));

    progress("Step 4: Fetching permission set license assignments...");
    let license_assignments = client.license_assignments(&in_clause).await?;
    detail(format!(
        "Found {} license assignments.",
        license_assignments.total_size
    ));

    progress("Step 5: Reconciling license assignments against permission set assignments...");
    let orphans =
        reconcile::orphaned_assignments(license_assignments.records, &set_assignments.records);
    detail(format!(
        "Found {} license assignments with no backing permission set assignment.",
        orphans.len()
    ));

    Ok(summary::summarize(&orphans))
}
