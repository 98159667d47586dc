use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;

use super::{
    ApiError, StaffApi, ALL_STAFF_DATA_PATH, ALL_USERS_PATH, STAFF_DATA_PATH, USER_PROFILE_PATH,
};
use crate::admin::{UserProfile, UserSummary};
use crate::contributions::StaffContributionRecord;

/// Serves API responses captured in a JSON document of the form
/// `{ "staffData": .., "users": [..], "allStaffData": [..], "profile": .. }`.
///
/// A missing section answers like an upstream 404 for that endpoint.
#[derive(Debug, Clone)]
pub struct SnapshotStaffApi {
    document: Value,
}

impl SnapshotStaffApi {
    pub fn from_value(document: Value) -> Self {
        Self { document }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| ApiError::Snapshot(format!("{}: {err}", path.display())))?;
        let document = serde_json::from_str(&raw)
            .map_err(|err| ApiError::Decode(format!("{}: {err}", path.display())))?;
        Ok(Self::from_value(document))
    }

    fn section(&self, key: &str, endpoint: &str) -> Result<&Value, ApiError> {
        match self.document.get(key) {
            Some(value) if !value.is_null() => Ok(value),
            _ => Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: 404,
            }),
        }
    }
}

#[async_trait]
impl StaffApi for SnapshotStaffApi {
    async fn fetch_staff_data(&self) -> Result<StaffContributionRecord, ApiError> {
        let value = self.section("staffData", STAFF_DATA_PATH)?;
        Ok(StaffContributionRecord::from_value(value)?)
    }

    async fn get_all_users(&self) -> Result<Vec<UserSummary>, ApiError> {
        let value = self.section("users", ALL_USERS_PATH)?;
        Ok(UserSummary::list_from_value(value)?)
    }

    async fn get_staff_data(&self) -> Result<Vec<StaffContributionRecord>, ApiError> {
        let value = self.section("allStaffData", ALL_STAFF_DATA_PATH)?;
        Ok(StaffContributionRecord::list_from_value(value)?)
    }

    async fn fetch_user_profile(&self) -> Result<UserProfile, ApiError> {
        let value = self.section("profile", USER_PROFILE_PATH)?;
        Ok(UserProfile::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn missing_section_reads_as_not_found() {
        let api = SnapshotStaffApi::from_value(json!({ "profile": { "role": "staff" } }));
        let err = api.get_all_users().await.expect_err("users absent");
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
        assert!(!api.fetch_user_profile().await.expect("profile").is_admin());
    }

    #[tokio::test]
    async fn malformed_section_is_a_schema_error() {
        let api = SnapshotStaffApi::from_value(json!({ "staffData": { "name": "no id" } }));
        let err = api.fetch_staff_data().await.expect_err("invalid record");
        assert!(matches!(err, ApiError::Schema(_)));
    }

    #[tokio::test]
    async fn reads_documents_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("snapshot.json");
        std::fs::write(
            &path,
            r#"{ "staffData": { "staffId": "S9", "year": 2023, "monthly": { "Jan": 5 } } }"#,
        )
        .expect("write snapshot");

        let api = SnapshotStaffApi::from_path(&path).await.expect("load");
        let record = api.fetch_staff_data().await.expect("record");
        assert_eq!(record.staff_id, "S9");
        assert_eq!(record.entries().len(), 1);
    }

    #[tokio::test]
    async fn unreadable_file_is_reported() {
        let err = SnapshotStaffApi::from_path("/nonexistent/snapshot.json")
            .await
            .expect_err("missing file");
        assert!(matches!(err, ApiError::Snapshot(_)));
    }
}
