//! PermissionSet and PermissionSetAssignment query records

use serde::Deserialize;

/// A PermissionSet row from the initial query.
///
/// Only permission sets not owned by a profile and with a non-null
/// `LicenseId` are queried, but `LicenseId` stays optional here since the
/// wire format allows null.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PermissionSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub license_id: Option<String>,
}

/// A PermissionSetAssignment row: a user holding a permission set.
///
/// The parent `PermissionSet` relationship carries the license reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PermissionSetAssignment {
    #[serde(default)]
    pub permission_set: Option<PermissionSetRef>,
    pub assignee_id: String,
}

/// Projected parent relationship on a PermissionSetAssignment
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PermissionSetRef {
    #[serde(default)]
    pub license_id: Option<String>,
}

impl PermissionSetAssignment {
    /// License id of the assigned permission set, when projected and non-null
    pub fn license_id(&self) -> Option<&str> {
        self.permission_set
            .as_ref()
            .and_then(|ps| ps.license_id.as_deref())
    }
}
