//! Permission set license assignment records and the report entry

use serde::{Deserialize, Serialize};

/// A PermissionSetLicenseAssign row: a user directly holding a license seat
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LicenseAssignment {
    pub id: String,
    pub assignee_id: String,
    pub assignee: AssigneeRef,
    pub permission_set_license_id: String,
    pub permission_set_license: LicenseInfo,
}

/// Projected `Assignee` relationship (the user holding the seat)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssigneeRef {
    #[serde(default)]
    pub is_active: bool,
}

/// Projected `PermissionSetLicense` relationship (the license itself)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LicenseInfo {
    pub developer_name: String,
    pub master_label: String,
    pub used_licenses: i64,
    pub total_licenses: i64,
}

/// One reported license with orphaned seat assignments.
///
/// Serializes camelCase to keep the report shape stable for consumers:
/// `{"id", "name", "used", "total", "unnecessaryAssigned",
///   "unnecessaryAssignedToActiveUsers", "unnecessaryAssignments"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseCheckEntry {
    pub id: String,
    pub name: String,
    pub used: i64,
    pub total: i64,
    /// All orphaned assignments for this license, active or not
    pub unnecessary_assigned: u64,
    /// Orphaned assignments held by active users
    pub unnecessary_assigned_to_active_users: u64,
    /// Assignment ids safe to remove (active users only)
    pub unnecessary_assignments: Vec<String>,
}
