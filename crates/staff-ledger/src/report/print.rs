//! Standalone HTML rendering of the visible report and the surfaces that print it.
//!
//! Printing has no error channel: a surface that cannot be opened turns the
//! request into a logged no-op.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use super::columns::REPORT_COLUMNS;
use super::totals::ReportTotals;
use crate::contributions::ReportRow;
use crate::fmt::format_currency;

const PRINT_STYLES: &str = "\
body { font-family: Arial, sans-serif; padding: 20px; }
table { width: 100%; border-collapse: collapse; margin-top: 20px; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
th { background-color: #f2f2f2; }
td.amount { text-align: right; }
.totals p { margin: 4px 0; }
.no-print { display: none !important; }";

/// Identity line shown above the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffBanner {
    pub staff_id: String,
    pub name: String,
}

/// What is on screen at print time: the banner, the current page and the footer totals.
#[derive(Debug, Clone)]
pub struct PrintContent<'a> {
    pub banner: Option<&'a StaffBanner>,
    pub rows: &'a [ReportRow],
    pub totals: Option<ReportTotals>,
}

pub fn render_print_document(content: &PrintContent<'_>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Print Report</title>\n<style>\n");
    html.push_str(PRINT_STYLES);
    html.push_str("\n</style>\n</head>\n<body>\n<h2>Contribution Report</h2>\n");

    if let Some(banner) = content.banner {
        writeln!(
            html,
            "<div class=\"staff\">Staff ID: {} &mdash; Name: {}</div>",
            escape_html(&banner.staff_id),
            escape_html(&banner.name)
        )
        .expect("write staff banner");
    }

    render_table(&mut html, content.rows);

    if let Some(totals) = &content.totals {
        render_totals(&mut html, totals);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_table(html: &mut String, rows: &[ReportRow]) {
    html.push_str("<table>\n<thead>\n<tr>");
    for column in REPORT_COLUMNS {
        write!(html, "<th>{}</th>", escape_html(column.header)).expect("write column header");
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    if rows.is_empty() {
        writeln!(
            html,
            "<tr><td colspan=\"{}\">No results.</td></tr>",
            REPORT_COLUMNS.len()
        )
        .expect("write empty row");
    }

    for row in rows {
        html.push_str("<tr>");
        for column in REPORT_COLUMNS {
            let class = if column.amount(row).is_some() {
                " class=\"amount\""
            } else {
                ""
            };
            write!(html, "<td{class}>{}</td>", escape_html(&column.cell(row)))
                .expect("write cell");
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
}

fn render_totals(html: &mut String, totals: &ReportTotals) {
    html.push_str("<div class=\"totals\">\n");
    for (label, amount) in [
        ("Total Monthly Contributions", totals.monthly),
        ("Total Interest Paid", totals.interest_paid),
        ("Total Withdrawn", totals.withdrawal),
        ("Final Balance After Interest", totals.balance_after_interest),
    ] {
        writeln!(
            html,
            "<p><strong>{label}:</strong> {}</p>",
            escape_html(&format_currency(amount))
        )
        .expect("write totals line");
    }
    html.push_str("</div>\n");
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Something a document can be printed on, such as a spool directory.
pub trait PrintSurface: Send + Sync {
    /// `None` when the surface refuses to open.
    fn open(&self) -> Option<Box<dyn PrintWindow>>;
}

pub trait PrintWindow {
    fn write(&mut self, html: &str);
    fn close(&mut self);
    fn print(&mut self);
}

/// Opens a surface, writes the document, closes and prints it. Silently does nothing when blocked.
pub fn print_document(surface: &dyn PrintSurface, html: &str) {
    let Some(mut window) = surface.open() else {
        warn!("print surface unavailable; skipping print");
        return;
    };
    window.write(html);
    window.close();
    window.print();
}

/// Spools each printed document to `report-<n>.html` inside a directory.
#[derive(Debug)]
pub struct DirectoryPrintSurface {
    dir: PathBuf,
    sequence: AtomicUsize,
}

impl DirectoryPrintSurface {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            sequence: AtomicUsize::new(1),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PrintSurface for DirectoryPrintSurface {
    fn open(&self) -> Option<Box<dyn PrintWindow>> {
        if let Err(err) = std::fs::create_dir_all(&self.dir) {
            warn!(dir = %self.dir.display(), error = %err, "cannot open print directory");
            return None;
        }

        let path = loop {
            let n = self.sequence.fetch_add(1, Ordering::Relaxed);
            let candidate = self.dir.join(format!("report-{n}.html"));
            if !candidate.exists() {
                break candidate;
            }
        };

        Some(Box::new(FileWindow {
            path,
            buffer: String::new(),
            written: false,
        }))
    }
}

struct FileWindow {
    path: PathBuf,
    buffer: String,
    written: bool,
}

impl PrintWindow for FileWindow {
    fn write(&mut self, html: &str) {
        self.buffer.push_str(html);
    }

    fn close(&mut self) {
        match std::fs::write(&self.path, self.buffer.as_bytes()) {
            Ok(()) => self.written = true,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to write print document")
            }
        }
    }

    fn print(&mut self) {
        if self.written {
            info!(path = %self.path.display(), "print document ready");
        }
    }
}

/// Keeps printed documents in memory. Used by tests and previews.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrintSurface {
    printed: Arc<Mutex<Vec<String>>>,
    blocked: bool,
}

impl MemoryPrintSurface {
    /// A surface that always refuses to open.
    pub fn blocked() -> Self {
        Self {
            blocked: true,
            ..Self::default()
        }
    }

    pub fn printed(&self) -> Vec<String> {
        self.printed
            .lock()
            .map(|documents| documents.clone())
            .unwrap_or_default()
    }
}

impl PrintSurface for MemoryPrintSurface {
    fn open(&self) -> Option<Box<dyn PrintWindow>> {
        if self.blocked {
            return None;
        }
        Some(Box::new(MemoryWindow {
            printed: Arc::clone(&self.printed),
            buffer: String::new(),
            closed: false,
        }))
    }
}

struct MemoryWindow {
    printed: Arc<Mutex<Vec<String>>>,
    buffer: String,
    closed: bool,
}

impl PrintWindow for MemoryWindow {
    fn write(&mut self, html: &str) {
        self.buffer.push_str(html);
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn print(&mut self) {
        if !self.closed {
            return;
        }
        if let Ok(mut printed) = self.printed.lock() {
            printed.push(std::mem::take(&mut self.buffer));
        }
    }
}
