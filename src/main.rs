//! sf-license-check - find orphaned permission set license assignments
//!
//! Connects to a Salesforce-style org and reports license seats held by
//! users with no permission set assignment referencing that license. The
//! tool is read-only: it reports candidates for reclamation, it never
//! deletes or mutates assignments.

use clap::{Parser, Subcommand};
use sf_license_check::commands;
use sf_license_check::error::CliResult;

/// Audit permission set license assignments for orphaned license consumption
#[derive(Parser)]
#[command(name = "sf-license-check")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the license check against an org
    Check(commands::check::CheckArgs),

    /// Manage org connections
    Orgs(commands::orgs::OrgsArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            e.print();
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Check(args) => commands::check::execute(args).await,
        Commands::Orgs(args) => commands::orgs::execute(args),
    }
}
