//! Fetch-then-build helpers shared by the HTTP service and the CLI.
//!
//! Upstream failures stop here: they are logged and turned into an empty
//! view or a banner, never retried.

use std::num::NonZeroUsize;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::admin::{
    ContributionSheet, SheetLine, UserSummary, CONTRIBUTIONS_UNAVAILABLE, USERS_UNAVAILABLE,
};
use crate::api::{ApiError, StaffApi};
use crate::dashboard::StaffDashboard;
use crate::report::ReportView;

/// A list screen's contents, or the banner shown in its place.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl<T> Listing<T> {
    fn loaded(items: Vec<T>) -> Self {
        Self { items, error: None }
    }

    fn unavailable(banner: &'static str) -> Self {
        Self {
            items: Vec::new(),
            error: Some(banner),
        }
    }
}

/// Report view for the signed-in staff member; empty when the fetch fails.
pub async fn load_report(api: &dyn StaffApi, page_size: NonZeroUsize) -> ReportView {
    let mut view = ReportView::new(page_size);
    match api.fetch_staff_data().await {
        Ok(record) => {
            view.load(&record);
            info!(
                staff_id = %record.staff_id,
                rows = view.all_rows().len(),
                "loaded contribution report"
            );
        }
        Err(err) => error!(error = %err, "failed to fetch staff data; report left empty"),
    }
    view
}

pub async fn load_dashboard(api: &dyn StaffApi) -> Result<StaffDashboard, ApiError> {
    let record = api.fetch_staff_data().await?;
    let profile = match api.fetch_user_profile().await {
        Ok(profile) => Some(profile),
        Err(err) => {
            warn!(error = %err, "failed to fetch user profile; treating caller as staff");
            None
        }
    };
    Ok(StaffDashboard::build(&record, profile.as_ref()))
}

pub async fn load_directory(api: &dyn StaffApi) -> Listing<UserSummary> {
    match api.get_all_users().await {
        Ok(users) => Listing::loaded(users),
        Err(err) => {
            error!(error = %err, "failed to fetch staff directory");
            Listing::unavailable(USERS_UNAVAILABLE)
        }
    }
}

/// Contribution sheet lines matching `query` (staff id or name).
pub async fn load_contribution_sheet(api: &dyn StaffApi, query: &str) -> Listing<SheetLine> {
    match api.get_staff_data().await {
        Ok(records) => {
            let sheet = ContributionSheet::from_records(&records);
            Listing::loaded(sheet.search(query).into_iter().cloned().collect())
        }
        Err(err) => {
            error!(error = %err, "failed to fetch staff contributions");
            Listing::unavailable(CONTRIBUTIONS_UNAVAILABLE)
        }
    }
}
