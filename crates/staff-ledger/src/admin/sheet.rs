use serde::Serialize;

use crate::contributions::{Month, StaffContributionRecord};

/// One staff member's line on the all-staff contribution sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetLine {
    pub staff_id: String,
    pub name: String,
    /// Calendar order, Jan..Dec; months missing from the ledger read as zero.
    pub months: [f64; 12],
    pub opening_balance: f64,
    pub total: f64,
    pub closing_balance: f64,
    pub interest_paid: f64,
    pub balance_after_interest: f64,
    pub withdrawal: f64,
}

impl SheetLine {
    pub fn from_record(record: &StaffContributionRecord) -> Self {
        let months = Month::ordered().map(|month| {
            record
                .monthly
                .as_ref()
                .and_then(|ledger| ledger.get(month.abbrev()))
                .map(|entry| entry.amount_or_zero())
                .unwrap_or(0.0)
        });

        Self {
            staff_id: record.staff_id.clone(),
            name: record.name.clone().unwrap_or_default(),
            months,
            opening_balance: record.opening_balance,
            total: record.total,
            closing_balance: record.closing_balance,
            interest_paid: record.interest_paid,
            balance_after_interest: record.balance_after_interest,
            withdrawal: record.withdrawal,
        }
    }

    /// Case-insensitive substring match on staff id or name.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.staff_id.to_lowercase().contains(&query)
            || self.name.to_lowercase().contains(&query)
    }
}

pub const SHEET_HEADERS: [&str; 20] = [
    "Staff ID",
    "Staff Name",
    "Jan",
    "Feb",
    "Mar",
    "Apr",
    "May",
    "Jun",
    "Jul",
    "Aug",
    "Sep",
    "Oct",
    "Nov",
    "Dec",
    "Opening Balance",
    "Total",
    "Closing Balance",
    "Interest Paid",
    "Balance After Interest",
    "Withdrawal",
];

/// The admin view of every staff member's contributions.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionSheet {
    pub lines: Vec<SheetLine>,
}

impl ContributionSheet {
    pub fn from_records(records: &[StaffContributionRecord]) -> Self {
        Self {
            lines: records.iter().map(SheetLine::from_record).collect(),
        }
    }

    pub fn search(&self, query: &str) -> Vec<&SheetLine> {
        self.lines.iter().filter(|line| line.matches(query)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sheet() -> ContributionSheet {
        let records = StaffContributionRecord::list_from_value(&json!([
            {
                "staffId": 1001,
                "name": "Ama Owusu",
                "year": 2024,
                "monthly": { "Feb": 20, "Jan": 10, "Dec": "pending" },
                "openingBalance": 100,
                "total": 30,
                "closingBalance": 130
            },
            { "staffId": "2002", "name": "Kofi Asante", "year": 2024 }
        ]))
        .expect("valid list");
        ContributionSheet::from_records(&records)
    }

    #[test]
    fn months_are_laid_out_in_calendar_order() {
        let sheet = sheet();
        let ama = &sheet.lines[0];
        assert_eq!(ama.months[0], 10.0);
        assert_eq!(ama.months[1], 20.0);
        assert_eq!(ama.months[11], 0.0);
        assert_eq!(ama.closing_balance, 130.0);
        assert!(sheet.lines[1].months.iter().all(|amount| *amount == 0.0));
    }

    #[test]
    fn search_matches_id_or_name() {
        let sheet = sheet();
        assert_eq!(sheet.search("").len(), 2);
        assert_eq!(sheet.search("ASANTE")[0].staff_id, "2002");
        assert_eq!(sheet.search("100")[0].name, "Ama Owusu");
        assert!(sheet.search("zz").is_empty());
    }

    #[test]
    fn headers_cover_every_column() {
        assert_eq!(SHEET_HEADERS.len(), 2 + 12 + 6);
    }
}
