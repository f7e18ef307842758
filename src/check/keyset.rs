//! License id extraction and IN-clause construction

use crate::models::PermissionSet;
use std::collections::HashSet;

/// Key prefix of PermissionSetLicense ids. A `LicenseId` with any other
/// prefix points at a different license object and is out of scope.
pub const LICENSE_ID_PREFIX: &str = "0PL";

/// Keep only permission sets whose license reference is a permission set
/// license (prefix `0PL`).
pub fn filter_license_backed(sets: Vec<PermissionSet>) -> Vec<PermissionSet> {
    sets.into_iter()
        .filter(|ps| {
            ps.license_id
                .as_deref()
                .is_some_and(|id| id.starts_with(LICENSE_ID_PREFIX))
        })
        .collect()
}

/// Distinct license ids in order of first encounter
pub fn distinct_license_ids(sets: &[PermissionSet]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for ps in sets {
        if let Some(id) = ps.license_id.as_deref() {
            if seen.insert(id) {
                ids.push(id.to_string());
            }
        }
    }
    ids
}

/// Build the quoted literal list for an `IN (...)` predicate.
///
/// For a non-empty input this yields exactly N comma-separated quoted
/// values with no leading or trailing separator. Callers must not pass an
/// empty slice; the pipeline short-circuits before reaching this point.
pub fn in_clause(ids: &[String]) -> String {
    ids.iter()
        .map(|id| quote(id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Single-quote a SOQL string literal, escaping quotes and backslashes
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}
