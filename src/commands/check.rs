//! The `check` command: run the license audit against an org

use crate::api::OrgClient;
use crate::check;
use crate::config::{Config, ConfigPaths};
use crate::error::CliResult;
use crate::models::LicenseCheckEntry;
use crate::output::{print_success, print_warning, truncate};
use clap::Args;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Alias of the org connection to audit (defaults to the configured default org)
    #[arg(long, short = 'o')]
    pub target_org: Option<String>,

    /// API version to query against
    #[arg(long, short = 'v', default_value = "43.0")]
    pub api_version: String,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the check command
pub async fn execute(args: CheckArgs) -> CliResult<()> {
    let paths = ConfigPaths::new()?;
    let config = Config::load(&paths)?;
    let (_, connection) = config.resolve_org(args.target_org.as_deref())?;

    let client = OrgClient::new(connection.clone(), args.api_version, config.timeout_secs)?;

    let entries = check::run(&client, args.json).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        print_success("No orphaned permission set license assignments found.");
    } else {
        print_report(&entries);
    }

    Ok(())
}

fn print_report(entries: &[LicenseCheckEntry]) {
    println!(
        "{:<20} {:<28} {:>6} {:>6} {:>9} {:>7}",
        "LICENSE ID", "NAME", "USED", "TOTAL", "ORPHANED", "ACTIVE"
    );
    println!("{}", "-".repeat(80));

    for entry in entries {
        println!(
            "{:<20} {:<28} {:>6} {:>6} {:>9} {:>7}",
            entry.id,
            truncate(&entry.name, 26),
            entry.used,
            entry.total,
            entry.unnecessary_assigned,
            entry.unnecessary_assigned_to_active_users
        );
    }

    println!();
    for entry in entries {
        if !entry.unnecessary_assignments.is_empty() {
            println!("Removable assignments for {} ({}):", entry.name, entry.id);
            for assignment_id in &entry.unnecessary_assignments {
                println!("  {assignment_id}");
            }
        }
    }

    println!();
    print_warning(&format!(
        "{} license(s) hold assignments with no backing permission set assignment.",
        entries.len()
    ));
}
