use crate::demo::{run_demo, run_payroll_report, DemoArgs};
use crate::server;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use inspection_ops::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Inspection Operations Service",
    about = "Run the property-inspection scheduling and payroll reporting service",
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
    /// Print a payroll report over the bundled demo dataset
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
    /// Run an end-to-end CLI demo covering scheduling, completion, and reporting
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Report over an explicit start/end window
    Payroll(PayrollArgs),
    /// Report over the trailing 14-day window
    TwoWeeks,
}

#[derive(Args, Debug)]
pub(crate) struct PayrollArgs {
    /// Window start (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) start: NaiveDate,
    /// Window end (YYYY-MM-DD), inclusive
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) end: NaiveDate,
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
        Command::Report {
            command: ReportCommand::Payroll(args),
        } => run_payroll_report(Some((args.start, args.end))),
        Command::Report {
            command: ReportCommand::TwoWeeks,
        } => run_payroll_report(None),
        Command::Demo(args) => run_demo(args),
    }
}
