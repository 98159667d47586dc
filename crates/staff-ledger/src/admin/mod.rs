//! Administrator views: the staff directory and the all-staff contribution sheet.

mod sheet;
mod users;

pub use sheet::{ContributionSheet, SheetLine, SHEET_HEADERS};
pub use users::{UserProfile, UserRole, UserSummary};

/// Banner shown when the staff directory cannot be loaded.
pub const USERS_UNAVAILABLE: &str = "Failed to load users. Please try again.";
/// Banner shown when the contribution sheet cannot be loaded.
pub const CONTRIBUTIONS_UNAVAILABLE: &str = "Failed to load staff contributions.";
