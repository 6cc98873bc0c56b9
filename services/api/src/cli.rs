use crate::demo::{run_catalog, run_demo, run_plan, CatalogArgs, PlanArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use course_planner::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Semester Course Planner",
    about = "Generate, rank, and review semester course plans from the command line",
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
    /// Generate ranked plans for one program semester
    Plan(PlanArgs),
    /// List departments and programs in the catalog
    Catalog(CatalogArgs),
    /// Run representative planning requests against the seeded catalog
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Serve a catalog imported from CSV instead of the seeded demo catalog
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Plan(args) => run_plan(args),
        Command::Catalog(args) => run_catalog(args),
        Command::Demo => run_demo(),
    }
}
