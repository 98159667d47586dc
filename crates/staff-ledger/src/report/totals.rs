use serde::Serialize;

use crate::contributions::ReportRow;

/// Footer figures for a report, computed over the filtered rows before pagination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    pub monthly: f64,
    pub interest_paid: f64,
    pub withdrawal: f64,
    /// Last non-zero balance seen; the balance is a year-end figure, not a flow.
    pub balance_after_interest: f64,
}

impl ReportTotals {
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a ReportRow>) -> Self {
        rows.into_iter().fold(Self::default(), |acc, row| acc.add(row))
    }

    fn add(self, row: &ReportRow) -> Self {
        Self {
            monthly: self.monthly + row.monthly,
            interest_paid: self.interest_paid + row.interest_paid,
            withdrawal: self.withdrawal + row.withdrawal,
            balance_after_interest: if row.balance_after_interest != 0.0 {
                row.balance_after_interest
            } else {
                self.balance_after_interest
            },
        }
    }
}
