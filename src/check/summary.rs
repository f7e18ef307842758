//! Per-license aggregation of orphaned assignments

use crate::models::{LicenseAssignment, LicenseCheckEntry};
use std::collections::HashMap;

/// Group orphaned assignments by license into report entries, in order of
/// first encounter.
///
/// `name`, `used` and `total` come from the first record seen for a license;
/// records sharing a license id are assumed to carry identical embedded
/// license fields, so later records do not refresh them.
pub fn summarize(orphans: &[LicenseAssignment]) -> Vec<LicenseCheckEntry> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<LicenseCheckEntry> = Vec::new();

    for record in orphans {
        let position = *index
            .entry(record.permission_set_license_id.as_str())
            .or_insert_with(|| {
                entries.push(LicenseCheckEntry {
                    id: record.permission_set_license_id.clone(),
                    name: record.permission_set_license.master_label.clone(),
                    used: record.permission_set_license.used_licenses,
                    total: record.permission_set_license.total_licenses,
                    unnecessary_assigned: 0,
                    unnecessary_assigned_to_active_users: 0,
                    unnecessary_assignments: Vec::new(),
                });
                entries.len() - 1
            });

        let entry = &mut entries[position];
        entry.unnecessary_assigned += 1;
        if record.assignee.is_active {
            entry.unnecessary_assigned_to_active_users += 1;
            entry.unnecessary_assignments.push(record.id.clone());
        }
    }

    entries
}
