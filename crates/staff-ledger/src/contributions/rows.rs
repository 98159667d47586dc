use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

use super::month::month_code;
use super::record::{LedgerEntry, StaffContributionRecord};

/// Position of the row that carries the annual interest, withdrawal and balance.
pub const ANNUAL_FIGURES_INDEX: usize = 11;

/// One month of a staff member's contributions, flattened for tabular display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub description: String,
    pub monthly: f64,
    pub interest_paid: f64,
    pub withdrawal: f64,
    pub balance_after_interest: f64,
}

/// Lazily yields one [`ReportRow`] per ledger entry. Cloning restarts from the
/// clone's position, and [`report_rows`] can be called again for a fresh pass.
#[derive(Debug, Clone)]
pub struct ReportRows<'a> {
    record: &'a StaffContributionRecord,
    entries: std::iter::Enumerate<std::slice::Iter<'a, LedgerEntry>>,
}

pub fn report_rows(record: &StaffContributionRecord) -> ReportRows<'_> {
    ReportRows {
        record,
        entries: record.entries().iter().enumerate(),
    }
}

impl<'a> ReportRows<'a> {
    fn build(&self, index: usize, entry: &LedgerEntry) -> ReportRow {
        let record = self.record;
        let annual = |value: f64| {
            if index == ANNUAL_FIGURES_INDEX {
                value
            } else {
                0.0
            }
        };

        ReportRow {
            id: format!("{}-{}", record.staff_id, entry.month),
            user_id: record.staff_id.clone(),
            date: format!("{}-{}-01", record.year, month_code(&entry.month)),
            description: format!("Contribution for {}", entry.month),
            monthly: entry.amount_or_zero(),
            interest_paid: annual(record.interest_paid),
            withdrawal: annual(record.withdrawal),
            balance_after_interest: annual(record.balance_after_interest),
        }
    }
}

impl Iterator for ReportRows<'_> {
    type Item = ReportRow;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, entry) = self.entries.next()?;
        Some(self.build(index, entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for ReportRows<'_> {}

impl FusedIterator for ReportRows<'_> {}
