//! Data models for the license check CLI

mod license;
mod permission_set;
mod query;

pub use license::{AssigneeRef, LicenseAssignment, LicenseCheckEntry, LicenseInfo};
pub use permission_set::{PermissionSet, PermissionSetAssignment, PermissionSetRef};
pub use query::QueryResponse;
