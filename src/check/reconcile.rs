//! Set difference of license assignments against permission set assignments

use crate::models::{LicenseAssignment, PermissionSetAssignment};
use std::collections::HashMap;

/// Composite identity of a seat assignment: (license id, assignee id)
type AssignmentKey = (String, String);

/// Compute the orphaned license assignments: those with no permission set
/// assignment for the same (license, assignee) pair.
///
/// Duplicate keys in `license_assignments` collapse silently, last record
/// wins. The result preserves the order in which keys were first seen, so
/// equal inputs always produce an identical result.
pub fn orphaned_assignments(
    license_assignments: Vec<LicenseAssignment>,
    set_assignments: &[PermissionSetAssignment],
) -> Vec<LicenseAssignment> {
    let mut by_key: HashMap<AssignmentKey, LicenseAssignment> = HashMap::new();
    let mut order: Vec<AssignmentKey> = Vec::new();

    for record in license_assignments {
        let key = (
            record.permission_set_license_id.clone(),
            record.assignee_id.clone(),
        );
        if by_key.insert(key.clone(), record).is_none() {
            order.push(key);
        }
    }

    // Most permission set assignments will not match anything here; absence
    // of a key is the expected case, not an error.
    for assignment in set_assignments {
        if let Some(license_id) = assignment.license_id() {
            by_key.remove(&(license_id.to_string(), assignment.assignee_id.clone()));
        }
    }

    order
        .into_iter()
        .filter_map(|key| by_key.remove(&key))
        .collect()
}
