//! Personal dashboard: headline figures and chart series for one staff member.

pub mod analytics;

use serde::Serialize;

use crate::admin::UserProfile;
use crate::contributions::StaffContributionRecord;
use crate::fmt::format_currency;

pub use analytics::{
    BreakdownEntry, DashboardAnalytics, MonthlyPoint, ProjectionPoint, PROJECTED_ANNUAL_GROWTH,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCard {
    pub key: &'static str,
    pub title: &'static str,
    pub amount: f64,
    pub display: String,
    pub caption: &'static str,
}

impl SummaryCard {
    fn new(key: &'static str, title: &'static str, amount: f64, caption: &'static str) -> Self {
        Self {
            key,
            title,
            amount,
            display: format_currency(amount),
            caption,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffDashboard {
    pub title: &'static str,
    pub is_admin: bool,
    pub staff_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub year: i32,
    pub cards: Vec<SummaryCard>,
    pub analytics: DashboardAnalytics,
}

impl StaffDashboard {
    /// Admin status comes from the caller's profile; no profile means a regular staff view.
    pub fn build(record: &StaffContributionRecord, profile: Option<&UserProfile>) -> Self {
        let is_admin = profile.is_some_and(UserProfile::is_admin);

        Self {
            title: if is_admin {
                "Admin Dashboard"
            } else {
                "Staff Dashboard"
            },
            is_admin,
            staff_id: record.staff_id.clone(),
            name: record.name.clone(),
            year: record.year,
            cards: summary_cards(record),
            analytics: DashboardAnalytics::from_record(record),
        }
    }
}

pub fn summary_cards(record: &StaffContributionRecord) -> Vec<SummaryCard> {
    vec![
        SummaryCard::new(
            "total",
            "Total Contributions",
            record.total,
            "Yearly Total Contribution.",
        ),
        SummaryCard::new(
            "withdrawal",
            "Withdrawal",
            record.withdrawal,
            "A Total Of Your Withdrawals",
        ),
        SummaryCard::new(
            "carry_forward_balance",
            "Balance Brought Forward",
            record.carry_forward_balance,
            "Your Balance From The Previous Year",
        ),
        SummaryCard::new(
            "balance_after_interest",
            "Balance After Interest",
            record.balance_after_interest,
            "Addition Of Your Balance And Your Interest",
        ),
        SummaryCard::new(
            "interest_paid",
            "Interest Paid",
            record.interest_paid,
            "Interest Paid",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> StaffContributionRecord {
        StaffContributionRecord::from_value(&json!({
            "staffId": "S1",
            "name": "Akosua",
            "year": 2024,
            "total": 1200,
            "withdrawal": 100,
            "carryForwardBalance": 2500.5,
            "balanceAfterInterest": 3700,
            "interestPaid": 99.5
        }))
        .expect("valid record")
    }

    #[test]
    fn cards_follow_dashboard_order() {
        let dashboard = StaffDashboard::build(&record(), None);
        assert_eq!(dashboard.title, "Staff Dashboard");
        assert!(!dashboard.is_admin);
        let keys: Vec<&str> = dashboard.cards.iter().map(|card| card.key).collect();
        assert_eq!(
            keys,
            [
                "total",
                "withdrawal",
                "carry_forward_balance",
                "balance_after_interest",
                "interest_paid"
            ]
        );
        assert_eq!(dashboard.cards[2].display, "₵2,500.50");
    }

    #[test]
    fn admin_profile_switches_title() {
        let profile = UserProfile::from_value(&json!({ "role": "admin" })).expect("profile");
        let dashboard = StaffDashboard::build(&record(), Some(&profile));
        assert!(dashboard.is_admin);
        assert_eq!(dashboard.title, "Admin Dashboard");
    }
}
