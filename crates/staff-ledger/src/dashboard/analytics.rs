use serde::Serialize;

use crate::contributions::{Month, StaffContributionRecord};

/// Growth factor assumed for next year's projection.
pub const PROJECTED_ANNUAL_GROWTH: f64 = 1.05;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    pub month: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub month: &'static str,
    pub projection: f64,
    pub interest: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    pub category: &'static str,
    pub amount: f64,
}

/// Chart series derived from one contribution record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAnalytics {
    pub monthly_contributions: Vec<MonthlyPoint>,
    pub savings_growth: Vec<MonthlyPoint>,
    pub cumulative_balance: Vec<MonthlyPoint>,
    pub projection: Vec<ProjectionPoint>,
    pub breakdown: Vec<BreakdownEntry>,
    pub yearly_summary: Vec<BreakdownEntry>,
}

impl DashboardAnalytics {
    pub fn from_record(record: &StaffContributionRecord) -> Self {
        Self {
            monthly_contributions: monthly_contributions(record),
            savings_growth: savings_growth(record),
            cumulative_balance: cumulative_balance(record),
            projection: next_year_projection(record.carry_forward_balance),
            breakdown: contribution_breakdown(record),
            yearly_summary: yearly_summary(record),
        }
    }
}

pub fn monthly_contributions(record: &StaffContributionRecord) -> Vec<MonthlyPoint> {
    record
        .entries()
        .iter()
        .map(|entry| MonthlyPoint {
            month: entry.month.clone(),
            amount: entry.amount_or_zero(),
        })
        .collect()
}

/// Running total of deposits for the year.
pub fn savings_growth(record: &StaffContributionRecord) -> Vec<MonthlyPoint> {
    running(record, 0.0)
}

/// Opening balance plus deposits to date; the final point is the year-end balance after interest.
pub fn cumulative_balance(record: &StaffContributionRecord) -> Vec<MonthlyPoint> {
    let mut points = running(record, record.opening_balance);
    for point in &mut points {
        point.amount = round2(point.amount);
    }
    if let Some(last) = points.last_mut() {
        last.amount = round2(record.balance_after_interest);
    }
    points
}

fn running(record: &StaffContributionRecord, start: f64) -> Vec<MonthlyPoint> {
    record
        .entries()
        .iter()
        .scan(start, |balance, entry| {
            *balance += entry.amount_or_zero();
            Some(MonthlyPoint {
                month: entry.month.clone(),
                amount: *balance,
            })
        })
        .collect()
}

/// Twelve months of compounded growth on the carried-forward balance.
pub fn next_year_projection(carry_forward: f64) -> Vec<ProjectionPoint> {
    Month::ordered()
        .into_iter()
        .zip(1..)
        .map(|(month, step)| {
            let projection = round2(carry_forward * PROJECTED_ANNUAL_GROWTH.powi(step));
            ProjectionPoint {
                month: month.abbrev(),
                projection,
                interest: round2(projection - carry_forward),
            }
        })
        .collect()
}

pub fn contribution_breakdown(record: &StaffContributionRecord) -> Vec<BreakdownEntry> {
    vec![
        BreakdownEntry {
            category: "Opening Balance",
            amount: record.opening_balance,
        },
        BreakdownEntry {
            category: "Total Contributions",
            amount: record.total,
        },
        BreakdownEntry {
            category: "Interest Paid",
            amount: record.interest_paid,
        },
        BreakdownEntry {
            category: "Withdrawals",
            amount: record.withdrawal,
        },
        // The upstream dashboard plots the carried-forward figure under this label.
        BreakdownEntry {
            category: "Balance After Interest",
            amount: record.carry_forward_balance,
        },
    ]
}

/// Where the year's money went. Contributions and interest read the record's
/// `total` and `interestPaid`, the only yearly figures the record carries.
pub fn yearly_summary(record: &StaffContributionRecord) -> Vec<BreakdownEntry> {
    [
        ("Contributions", record.total),
        ("Interest Paid", record.interest_paid),
        ("Withdrawals", record.withdrawal),
        ("Carry Forward", record.carry_forward_balance),
    ]
    .into_iter()
    .map(|(category, amount)| BreakdownEntry { category, amount })
    .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> StaffContributionRecord {
        StaffContributionRecord::from_value(&json!({
            "staffId": "S1",
            "year": 2024,
            "monthly": { "Jan": 100, "Feb": 50.5, "Mar": "x" },
            "openingBalance": 1000,
            "balanceAfterInterest": 1200,
            "carryForwardBalance": 1000,
            "total": 150.5,
            "interestPaid": 49.5,
            "withdrawal": 0
        }))
        .expect("valid record")
    }

    #[test]
    fn growth_is_a_running_sum() {
        let growth = savings_growth(&record());
        let amounts: Vec<f64> = growth.iter().map(|point| point.amount).collect();
        assert_eq!(amounts, [100.0, 150.5, 150.5]);
        assert_eq!(growth[2].month, "Mar");
    }

    #[test]
    fn cumulative_balance_ends_on_balance_after_interest() {
        let points = cumulative_balance(&record());
        assert_eq!(points[0].amount, 1100.0);
        assert_eq!(points[1].amount, 1150.5);
        assert_eq!(points[2].amount, 1200.0);
    }

    #[test]
    fn projection_compounds_monthly() {
        let projection = next_year_projection(1000.0);
        assert_eq!(projection.len(), 12);
        assert_eq!(projection[0].month, "Jan");
        assert_eq!(projection[0].projection, 1050.0);
        assert_eq!(projection[0].interest, 50.0);
        assert_eq!(projection[1].projection, 1102.5);
        assert_eq!(projection[11].month, "Dec");
        assert_eq!(projection[11].projection, 1795.86);
    }

    #[test]
    fn empty_ledger_gives_empty_series() {
        let record = StaffContributionRecord::from_value(&json!({
            "staffId": "S1",
            "year": 2024,
            "carryForwardBalance": 0
        }))
        .expect("valid record");
        let analytics = DashboardAnalytics::from_record(&record);
        assert!(analytics.monthly_contributions.is_empty());
        assert!(analytics.cumulative_balance.is_empty());
        assert!(analytics.projection.iter().all(|point| point.projection == 0.0));
        assert_eq!(analytics.breakdown.len(), 5);
        assert!(analytics.yearly_summary.iter().all(|entry| entry.amount == 0.0));
    }

    #[test]
    fn yearly_summary_splits_the_year() {
        let summary = yearly_summary(&record());
        let pairs: Vec<(&str, f64)> = summary
            .iter()
            .map(|entry| (entry.category, entry.amount))
            .collect();
        assert_eq!(
            pairs,
            [
                ("Contributions", 150.5),
                ("Interest Paid", 49.5),
                ("Withdrawals", 0.0),
                ("Carry Forward", 1000.0),
            ]
        );
    }
}
