use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{
    ApiError, StaffApi, ALL_STAFF_DATA_PATH, ALL_USERS_PATH, STAFF_DATA_PATH, USER_PROFILE_PATH,
};
use crate::admin::{UserProfile, UserSummary};
use crate::config::UpstreamConfig;
use crate::contributions::StaffContributionRecord;

/// Talks to the contributions API over HTTP with an optional bearer token.
#[derive(Debug, Clone)]
pub struct HttpStaffApi {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpStaffApi {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self::with_url(config.base_url.clone(), config.token.clone())
    }

    pub fn with_url(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let url = self.url(path);
        debug!(%url, "requesting contributions API");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait]
impl StaffApi for HttpStaffApi {
    async fn fetch_staff_data(&self) -> Result<StaffContributionRecord, ApiError> {
        let payload = self.get_json(STAFF_DATA_PATH).await?;
        Ok(StaffContributionRecord::from_value(&payload)?)
    }

    async fn get_all_users(&self) -> Result<Vec<UserSummary>, ApiError> {
        let payload = self.get_json(ALL_USERS_PATH).await?;
        Ok(UserSummary::list_from_value(&payload)?)
    }

    async fn get_staff_data(&self) -> Result<Vec<StaffContributionRecord>, ApiError> {
        let payload = self.get_json(ALL_STAFF_DATA_PATH).await?;
        Ok(StaffContributionRecord::list_from_value(&payload)?)
    }

    async fn fetch_user_profile(&self) -> Result<UserProfile, ApiError> {
        let payload = self.get_json(USER_PROFILE_PATH).await?;
        Ok(UserProfile::from_value(&payload)?)
    }
}
