use serde::Serialize;
use std::num::NonZeroUsize;

use super::filter::{apply_filters, FilterPredicate};
use super::pagination::{page_count, page_slice, paginate, Page, PageRequest};
use super::print::{print_document, render_print_document, PrintContent, PrintSurface, StaffBanner};
use super::totals::ReportTotals;
use crate::contributions::{report_rows, ReportRow, StaffContributionRecord};

/// State behind one contribution report screen: the loaded rows, the active
/// filters and the pagination cursor.
#[derive(Debug, Clone)]
pub struct ReportView {
    source: Vec<ReportRow>,
    filters: Vec<FilterPredicate>,
    filtered: Vec<ReportRow>,
    cursor: PageRequest,
    banner: Option<StaffBanner>,
}

/// Serializable snapshot of what the report currently shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_name: Option<String>,
    pub filters: Vec<FilterPredicate>,
    pub page: Page<ReportRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals: Option<ReportTotals>,
}

impl ReportView {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            source: Vec::new(),
            filters: Vec::new(),
            filtered: Vec::new(),
            cursor: PageRequest::first(page_size),
            banner: None,
        }
    }

    /// Replaces the rows with those derived from `record`, clearing filters and the cursor.
    pub fn load(&mut self, record: &StaffContributionRecord) {
        self.source = report_rows(record).collect();
        self.filtered = self.source.clone();
        self.filters.clear();
        self.cursor.index = 0;
        self.banner = record
            .name
            .as_ref()
            .filter(|name| !name.is_empty() && !record.staff_id.is_empty())
            .map(|name| StaffBanner {
                staff_id: record.staff_id.clone(),
                name: name.clone(),
            });
    }

    /// Filters the full row set and returns to the first page.
    pub fn apply_filters(&mut self, filters: Vec<FilterPredicate>) {
        self.filtered = apply_filters(&self.source, &filters);
        self.filters = filters;
        self.cursor.index = 0;
    }

    pub fn set_page(&mut self, index: usize) {
        self.cursor.index = index;
    }

    pub fn set_page_size(&mut self, size: NonZeroUsize) {
        self.cursor = PageRequest::first(size);
    }

    pub fn cursor(&self) -> PageRequest {
        self.cursor
    }

    pub fn filters(&self) -> &[FilterPredicate] {
        &self.filters
    }

    pub fn all_rows(&self) -> &[ReportRow] {
        &self.source
    }

    pub fn filtered_rows(&self) -> &[ReportRow] {
        &self.filtered
    }

    pub fn page_rows(&self) -> &[ReportRow] {
        page_slice(&self.filtered, self.cursor)
    }

    /// The current page of filtered rows.
    pub fn page(&self) -> Page<ReportRow> {
        paginate(&self.filtered, self.cursor)
    }

    pub fn page_count(&self) -> usize {
        page_count(self.filtered.len(), self.cursor.size)
    }

    pub fn totals(&self) -> ReportTotals {
        ReportTotals::from_rows(&self.filtered)
    }

    pub fn banner(&self) -> Option<&StaffBanner> {
        self.banner.as_ref()
    }

    pub fn snapshot(&self) -> ReportSnapshot {
        ReportSnapshot {
            staff_id: self.banner.as_ref().map(|banner| banner.staff_id.clone()),
            staff_name: self.banner.as_ref().map(|banner| banner.name.clone()),
            filters: self.filters.clone(),
            page: self.page(),
            totals: self.visible_totals(),
        }
    }

    /// Totals are only shown while there is at least one filtered row.
    fn visible_totals(&self) -> Option<ReportTotals> {
        (!self.filtered.is_empty()).then(|| self.totals())
    }

    pub fn print_html(&self) -> String {
        render_print_document(&PrintContent {
            banner: self.banner.as_ref(),
            rows: self.page_rows(),
            totals: self.visible_totals(),
        })
    }

    pub fn print(&self, surface: &dyn PrintSurface) {
        print_document(surface, &self.print_html());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::filter::{FilterOperator, RowField};
    use crate::report::print::MemoryPrintSurface;
    use serde_json::json;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).expect("non-zero")
    }

    fn record() -> StaffContributionRecord {
        StaffContributionRecord::from_value(&json!({
            "staffId": "S-9",
            "name": "Yaw Boateng",
            "year": 2024,
            "monthly": {
                "Jan": 50, "Feb": 50, "Mar": 50, "Apr": 50, "May": 50, "Jun": 50,
                "Jul": 50, "Aug": 50, "Sep": 50, "Oct": 50, "Nov": 50, "Dec": 50
            },
            "interestPaid": 12,
            "withdrawal": 5,
            "balanceAfterInterest": 600
        }))
        .expect("valid record")
    }

    #[test]
    fn filtering_resets_to_first_page_and_always_starts_from_all_rows() {
        let mut view = ReportView::new(size(5));
        view.load(&record());
        view.set_page(2);
        assert_eq!(view.page_rows().len(), 2);

        view.apply_filters(vec![FilterPredicate::new(
            RowField::Description,
            FilterOperator::Contains,
            "jan",
        )]);
        assert_eq!(view.cursor().index, 0);
        assert_eq!(view.filtered_rows().len(), 1);

        view.apply_filters(vec![FilterPredicate::new(
            RowField::Description,
            FilterOperator::Contains,
            "feb",
        )]);
        assert_eq!(view.filtered_rows().len(), 1);
        assert_eq!(view.filtered_rows()[0].id, "S-9-Feb");

        view.apply_filters(Vec::new());
        assert_eq!(view.filtered_rows().len(), 12);
        assert_eq!(view.page_count(), 3);
    }

    #[test]
    fn totals_cover_filtered_rows_not_just_the_page() {
        let mut view = ReportView::new(size(4));
        view.load(&record());
        view.set_page(1);
        let totals = view.totals();
        assert_eq!(totals.monthly, 600.0);
        assert_eq!(totals.balance_after_interest, 600.0);

        view.apply_filters(vec![FilterPredicate::new(
            RowField::Date,
            FilterOperator::Before,
            "2024-07-01",
        )]);
        let totals = view.totals();
        assert_eq!(totals.monthly, 300.0);
        assert_eq!(totals.balance_after_interest, 0.0);
    }

    #[test]
    fn snapshot_hides_totals_when_nothing_matches() {
        let mut view = ReportView::new(size(10));
        view.load(&record());
        view.apply_filters(vec![FilterPredicate::new(
            RowField::Id,
            FilterOperator::Equals,
            "nobody",
        )]);
        let snapshot = view.snapshot();
        assert!(snapshot.totals.is_none());
        assert_eq!(snapshot.page.page_count, 0);
        assert_eq!(snapshot.staff_name.as_deref(), Some("Yaw Boateng"));
    }

    #[test]
    fn printing_renders_the_current_page() {
        let mut view = ReportView::new(size(10));
        view.load(&record());
        view.set_page(1);
        let surface = MemoryPrintSurface::default();
        view.print(&surface);

        let printed = surface.printed();
        assert_eq!(printed.len(), 1);
        assert!(printed[0].contains("Contribution for Nov"));
        assert!(!printed[0].contains("Contribution for Jan"));
        assert!(printed[0].contains("Final Balance After Interest:</strong> ₵600.00"));
        assert!(printed[0].contains("Staff ID: S-9"));
    }

    #[test]
    fn banner_requires_a_name() {
        let mut view = ReportView::new(size(10));
        let mut anonymous = record();
        anonymous.name = None;
        view.load(&anonymous);
        assert!(view.banner().is_none());
        assert!(!view.print_html().contains("Staff ID"));

        let mut blank = record();
        blank.name = Some(String::new());
        view.load(&blank);
        assert!(view.banner().is_none());
        assert!(!view.print_html().contains("Staff ID"));
        assert!(view.snapshot().staff_name.is_none());
    }
}
