//! Client side of the contributions API the dashboard reads from.

mod http;
mod snapshot;

use async_trait::async_trait;

use crate::admin::{UserProfile, UserSummary};
use crate::contributions::StaffContributionRecord;
use crate::schema::SchemaError;

pub use http::HttpStaffApi;
pub use snapshot::SnapshotStaffApi;

pub const STAFF_DATA_PATH: &str = "/user/staff-data";
pub const USER_PROFILE_PATH: &str = "/user/profile";
pub const ALL_USERS_PATH: &str = "/admin/users";
pub const ALL_STAFF_DATA_PATH: &str = "/admin/staff-data";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("contributions API unreachable: {0}")]
    Transport(String),
    #[error("contributions API returned {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },
    #[error("contributions API sent unreadable JSON: {0}")]
    Decode(String),
    #[error("contributions API payload rejected: {0}")]
    Schema(#[from] SchemaError),
    #[error("snapshot unavailable: {0}")]
    Snapshot(String),
}

/// The four calls the dashboard makes. Every call validates its payload
/// before returning; there is no retry and no de-duplication.
#[async_trait]
pub trait StaffApi: Send + Sync {
    /// Contribution record of the signed-in staff member.
    async fn fetch_staff_data(&self) -> Result<StaffContributionRecord, ApiError>;

    /// Staff directory, admin only.
    async fn get_all_users(&self) -> Result<Vec<UserSummary>, ApiError>;

    /// Every staff member's contribution record, admin only.
    async fn get_staff_data(&self) -> Result<Vec<StaffContributionRecord>, ApiError>;

    async fn fetch_user_profile(&self) -> Result<UserProfile, ApiError>;
}
