//! Tabular contribution report: filtering, paging, totals, print and export.

mod columns;
pub mod export;
pub mod filter;
pub mod pagination;
pub mod print;
mod totals;
mod view;

pub use columns::{CellKind, ReportColumn, REPORT_COLUMNS};
pub use export::{to_csv_string, write_csv, ExportError};
pub use filter::{
    apply_filters, filter_rows, parse_calendar_date, FilterOperator, FilterParseError,
    FilterPredicate, RowField,
};
pub use pagination::{page_count, paginate, Page, PageError, PageRequest};
pub use print::{
    print_document, render_print_document, DirectoryPrintSurface, MemoryPrintSurface,
    PrintContent, PrintSurface, PrintWindow, StaffBanner,
};
pub use totals::ReportTotals;
pub use view::{ReportSnapshot, ReportView};
