//! Typed SOQL queries used by the license check

use crate::api::OrgClient;
use crate::error::CliResult;
use crate::models::{LicenseAssignment, PermissionSet, PermissionSetAssignment, QueryResponse};

impl OrgClient {
    /// Permission sets linked to a license, excluding profile-owned ones
    pub async fn license_permission_sets(&self) -> CliResult<QueryResponse<PermissionSet>> {
        self.query(
            "SELECT Id, Name, LicenseId \
             FROM PermissionSet \
             WHERE IsOwnedByProfile = false \
             AND LicenseId <> NULL",
        )
        .await
    }

    /// Permission set assignments whose permission set references one of the
    /// given licenses. `license_ids` is a quoted IN-clause literal list.
    pub async fn permission_set_assignments(
        &self,
        license_ids: &str,
    ) -> CliResult<QueryResponse<PermissionSetAssignment>> {
        let soql = format!(
            "SELECT PermissionSet.LicenseId, AssigneeId \
             FROM PermissionSetAssignment \
             WHERE PermissionSet.LicenseId IN ({license_ids}) \
             ORDER BY PermissionSet.LicenseId, AssigneeId"
        );
        self.query(&soql).await
    }

    /// Direct license seat assignments for the given licenses
    pub async fn license_assignments(
        &self,
        license_ids: &str,
    ) -> CliResult<QueryResponse<LicenseAssignment>> {
        let soql = format!(
            "SELECT Id, AssigneeId, Assignee.IsActive, PermissionSetLicenseId, \
             PermissionSetLicense.DeveloperName, PermissionSetLicense.MasterLabel, \
             PermissionSetLicense.UsedLicenses, PermissionSetLicense.TotalLicenses \
             FROM PermissionSetLicenseAssign \
             WHERE PermissionSetLicenseId IN ({license_ids}) \
             ORDER BY PermissionSetLicenseId, AssigneeId"
        );
        self.query(&soql).await
    }
}
