use crate::console::{
    run_admin_contributions, run_admin_users, run_dashboard, run_report, ContributionSearchArgs,
    ReportArgs, SnapshotArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use staff_ledger::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Staff Ledger",
    about = "Serve and inspect staff savings contribution reports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the signed-in staff member's contribution report
    Report(ReportArgs),
    /// Print dashboard figures and chart series
    Dashboard(SnapshotArgs),
    /// Administrator views
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// List every registered user
    Users(SnapshotArgs),
    /// Show the all-staff contribution sheet, optionally filtered
    Contributions(ContributionSearchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args).await,
        Command::Dashboard(args) => run_dashboard(args).await,
        Command::Admin {
            command: AdminCommand::Users(args),
        } => run_admin_users(args).await,
        Command::Admin {
            command: AdminCommand::Contributions(args),
        } => run_admin_contributions(args).await,
    }
}
