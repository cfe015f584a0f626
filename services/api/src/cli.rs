use crate::demo::{run_demo, run_rent_estimate, run_trust, DemoArgs, RentEstimateArgs, TrustArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use tenant_screening::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Tenant Screening",
    about = "Run the tenant trust and screening service or explore it from the command line",
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
    /// Walk through applications, screenings and dashboards against demo data
    Demo(DemoArgs),
    /// Compute a trust score and badge from verification flags
    Trust(TrustArgs),
    /// Estimate market rent for a listing
    EstimateRent(RentEstimateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the simulated credit bureau for reproducible screenings
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args),
        Command::Trust(args) => {
            run_trust(args);
            Ok(())
        }
        Command::EstimateRent(args) => {
            run_rent_estimate(args);
            Ok(())
        }
    }
}
