//! Contribution records and the per-month report rows derived from them.

mod month;
mod record;
mod rows;

pub use month::{month_code, Month, FALLBACK_MONTH_CODE};
pub use record::{LedgerEntry, MonthlyLedger, StaffContributionRecord};
pub use rows::{report_rows, ReportRow, ReportRows, ANNUAL_FIGURES_INDEX};
