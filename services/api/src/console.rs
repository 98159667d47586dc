use crate::infra::{build_report_view, parse_filter, staff_api, ReportQuery};
use chrono::Local;
use clap::Args;
use comfy_table::{Cell, CellAlignment, Table};
use staff_ledger::admin::{SheetLine, UserSummary, SHEET_HEADERS};
use staff_ledger::config::AppConfig;
use staff_ledger::dashboard::StaffDashboard;
use staff_ledger::error::AppError;
use staff_ledger::fmt::format_currency;
use staff_ledger::load::{load_contribution_sheet, load_dashboard, load_directory};
use staff_ledger::report::{
    write_csv, CellKind, DirectoryPrintSurface, FilterPredicate, ReportView, REPORT_COLUMNS,
};
use staff_ledger::telemetry;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct SnapshotArgs {
    /// Read API responses from a JSON snapshot instead of the configured upstream
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    #[command(flatten)]
    pub(crate) source: SnapshotArgs,
    /// Row filter as field:operator:value (repeatable)
    #[arg(long = "filter", value_parser = parse_filter)]
    pub(crate) filters: Vec<FilterPredicate>,
    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    pub(crate) page: usize,
    /// Rows per page (defaults to REPORT_PAGE_SIZE)
    #[arg(long)]
    pub(crate) page_size: Option<usize>,
    /// Write the printable HTML document for the shown page into this directory
    #[arg(long)]
    pub(crate) print_dir: Option<PathBuf>,
    /// Export every filtered row to this CSV file
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ContributionSearchArgs {
    #[command(flatten)]
    pub(crate) source: SnapshotArgs,
    /// Match staff id or name, case-insensitive
    #[arg(long, default_value = "")]
    pub(crate) query: String,
}

fn bootstrap() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

pub(crate) async fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        source,
        filters,
        page,
        page_size,
        print_dir,
        csv,
    } = args;

    let config = bootstrap()?;
    let api = staff_api(source.snapshot.as_deref(), &config).await?;
    let query = ReportQuery {
        filters,
        page_index: page.saturating_sub(1),
        page_size,
    };
    let view = build_report_view(api.as_ref(), config.report.page_size, query).await?;

    print!("{}", render_report(&view));

    if let Some(dir) = print_dir {
        let surface = DirectoryPrintSurface::new(dir);
        view.print(&surface);
        println!("\nPrint document written under {}", surface.dir().display());
    }

    if let Some(path) = csv {
        let file = std::fs::File::create(&path)?;
        write_csv(file, view.filtered_rows())?;
        println!(
            "Exported {} rows to {}",
            view.filtered_rows().len(),
            path.display()
        );
    }

    Ok(())
}

pub(crate) async fn run_dashboard(args: SnapshotArgs) -> Result<(), AppError> {
    let config = bootstrap()?;
    let api = staff_api(args.snapshot.as_deref(), &config).await?;
    let dashboard = load_dashboard(api.as_ref()).await?;
    print!("{}", render_dashboard(&dashboard));
    Ok(())
}

pub(crate) async fn run_admin_users(args: SnapshotArgs) -> Result<(), AppError> {
    let config = bootstrap()?;
    let api = staff_api(args.snapshot.as_deref(), &config).await?;
    let listing = load_directory(api.as_ref()).await;

    match listing.error {
        Some(banner) => println!("{banner}"),
        None => println!("{}", users_table(&listing.items)),
    }
    Ok(())
}

pub(crate) async fn run_admin_contributions(args: ContributionSearchArgs) -> Result<(), AppError> {
    let config = bootstrap()?;
    let api = staff_api(args.source.snapshot.as_deref(), &config).await?;
    let listing = load_contribution_sheet(api.as_ref(), &args.query).await;

    match listing.error {
        Some(banner) => println!("{banner}"),
        None if listing.items.is_empty() => println!("No matching staff."),
        None => println!("{}", sheet_table(&listing.items)),
    }
    Ok(())
}

fn amount_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn render_report(view: &ReportView) -> String {
    let mut out = String::new();
    match view.banner() {
        Some(banner) => out.push_str(&format!(
            "Contribution report for {} ({})\n",
            banner.name, banner.staff_id
        )),
        None => out.push_str("Contribution report\n"),
    }
    out.push_str(&format!(
        "Generated {}\n",
        Local::now().format("%Y-%m-%d %H:%M")
    ));
    if !view.filters().is_empty() {
        let filters: Vec<String> = view.filters().iter().map(ToString::to_string).collect();
        out.push_str(&format!("Filters: {}\n", filters.join(", ")));
    }

    let cursor = view.cursor();
    out.push_str(&format!(
        "Page {} of {} ({} rows, {} per page)\n\n",
        cursor.index + 1,
        view.page_count().max(1),
        view.filtered_rows().len(),
        cursor.size
    ));

    if view.filtered_rows().is_empty() {
        out.push_str("No results.\n");
        return out;
    }

    let mut table = Table::new();
    table.set_header(REPORT_COLUMNS.iter().map(|column| column.header));
    for row in view.page_rows() {
        table.add_row(REPORT_COLUMNS.iter().map(|column| match column.kind {
            CellKind::Currency => amount_cell(column.cell(row)),
            CellKind::Text => Cell::new(column.cell(row)),
        }));
    }
    out.push_str(&format!("{table}\n"));

    let page = view.page();
    if page.has_previous() {
        out.push_str(&format!("Previous: --page {}\n", page.page_index));
    }
    if page.has_next() {
        out.push_str(&format!("Next: --page {}\n", page.page_index + 2));
    }

    let totals = view.totals();
    out.push_str("\nTotals\n");
    out.push_str(&format!(
        "- Total Monthly Contributions: {}\n",
        format_currency(totals.monthly)
    ));
    out.push_str(&format!(
        "- Total Interest Paid: {}\n",
        format_currency(totals.interest_paid)
    ));
    out.push_str(&format!(
        "- Total Withdrawn: {}\n",
        format_currency(totals.withdrawal)
    ));
    out.push_str(&format!(
        "- Final Balance After Interest: {}\n",
        format_currency(totals.balance_after_interest)
    ));
    out
}

fn render_dashboard(dashboard: &StaffDashboard) -> String {
    let mut out = format!("{}\n", dashboard.title);
    match &dashboard.name {
        Some(name) => out.push_str(&format!(
            "{} ({}), {}\n",
            name, dashboard.staff_id, dashboard.year
        )),
        None => out.push_str(&format!("{}, {}\n", dashboard.staff_id, dashboard.year)),
    }

    out.push('\n');
    for card in &dashboard.cards {
        out.push_str(&format!(
            "- {}: {} ({})\n",
            card.title, card.display, card.caption
        ));
    }

    let analytics = &dashboard.analytics;
    if !analytics.monthly_contributions.is_empty() {
        out.push_str("\nMonthly contributions\n");
        for (deposit, balance) in analytics
            .monthly_contributions
            .iter()
            .zip(&analytics.cumulative_balance)
        {
            out.push_str(&format!(
                "  {:<4} {:>14}  balance {:>14}\n",
                deposit.month,
                format_currency(deposit.amount),
                format_currency(balance.amount)
            ));
        }
    }

    if let (Some(first), Some(last)) = (analytics.projection.first(), analytics.projection.last()) {
        out.push_str(&format!(
            "\nNext-year projection: {} in {} rising to {} by {} (+{})\n",
            format_currency(first.projection),
            first.month,
            format_currency(last.projection),
            last.month,
            format_currency(last.interest)
        ));
    }

    out.push_str("\nBreakdown\n");
    for entry in &analytics.breakdown {
        out.push_str(&format!(
            "  {:<22} {:>14}\n",
            entry.category,
            format_currency(entry.amount)
        ));
    }

    out.push_str("\nYearly summary\n");
    for entry in &analytics.yearly_summary {
        out.push_str(&format!(
            "  {:<22} {:>14}\n",
            entry.category,
            format_currency(entry.amount)
        ));
    }
    out
}

fn users_table(users: &[UserSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Staff ID", "Name", "Email", "Role"]);
    for user in users {
        table.add_row(vec![
            Cell::new(&user.staff_id),
            Cell::new(&user.name),
            Cell::new(user.email.as_deref().unwrap_or_default()),
            Cell::new(user.role.label()),
        ]);
    }
    table
}

fn sheet_table(lines: &[SheetLine]) -> Table {
    let mut table = Table::new();
    table.set_header(SHEET_HEADERS.iter().copied());
    for line in lines {
        let mut cells = vec![Cell::new(&line.staff_id), Cell::new(&line.name)];
        cells.extend(
            line.months
                .iter()
                .map(|amount| amount_cell(format_currency(*amount))),
        );
        cells.extend(
            [
                line.opening_balance,
                line.total,
                line.closing_balance,
                line.interest_paid,
                line.balance_after_interest,
                line.withdrawal,
            ]
            .map(|amount| amount_cell(format_currency(amount))),
        );
        table.add_row(cells);
    }
    table
}
