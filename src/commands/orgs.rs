//! The `orgs` command: manage the local org connection registry

use crate::config::{Config, ConfigPaths, OrgConnection};
use crate::error::{CliError, CliResult};
use crate::output::{print_info, print_key_value, print_success};
use clap::{Args, Subcommand};

/// Org connection management commands
#[derive(Args, Debug)]
pub struct OrgsArgs {
    #[command(subcommand)]
    pub command: OrgsCommands,
}

#[derive(Subcommand, Debug)]
pub enum OrgsCommands {
    /// List configured org connections
    List(ListArgs),
    /// Register (or update) an org connection
    Add(AddArgs),
    /// Remove an org connection
    Remove(RemoveArgs),
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the add command
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Alias for the connection
    pub alias: String,

    /// Instance base URL, e.g. https://mycompany.my.salesforce.com
    #[arg(long)]
    pub instance_url: String,

    /// Access token used for queries
    #[arg(long)]
    pub access_token: String,

    /// Make this the default org
    #[arg(long)]
    pub set_default: bool,
}

/// Arguments for the remove command
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Alias of the connection to remove
    pub alias: String,
}

/// Execute org commands
pub fn execute(args: OrgsArgs) -> CliResult<()> {
    match args.command {
        OrgsCommands::List(a) => execute_list(a),
        OrgsCommands::Add(a) => execute_add(a),
        OrgsCommands::Remove(a) => execute_remove(a),
    }
}

fn execute_list(args: ListArgs) -> CliResult<()> {
    let paths = ConfigPaths::new()?;
    let config = Config::load(&paths)?;

    if args.json {
        // Tokens stay out of the listing on purpose.
        let entries: Vec<serde_json::Value> = config
            .orgs
            .iter()
            .map(|(alias, connection)| {
                serde_json::json!({
                    "alias": alias,
                    "instanceUrl": connection.instance_url,
                    "default": config.default_org.as_deref() == Some(alias.as_str()),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if config.orgs.is_empty() {
        print_info("No orgs configured. Add one with 'sf-license-check orgs add'.");
    } else {
        for (alias, connection) in &config.orgs {
            let marker = if config.default_org.as_deref() == Some(alias.as_str()) {
                " (default)"
            } else {
                ""
            };
            print_key_value(&format!("{alias}{marker}"), &connection.instance_url);
        }
    }

    Ok(())
}

fn execute_add(args: AddArgs) -> CliResult<()> {
    let instance_url = args.instance_url.trim_end_matches('/').to_string();
    if !instance_url.starts_with("https://") && !instance_url.starts_with("http://") {
        return Err(CliError::Validation(format!(
            "Instance URL must start with http(s)://, got '{}'.",
            args.instance_url
        )));
    }

    let paths = ConfigPaths::new()?;
    let mut config = Config::load(&paths)?;

    config.orgs.insert(
        args.alias.clone(),
        OrgConnection {
            instance_url,
            access_token: args.access_token,
        },
    );
    if args.set_default || config.default_org.is_none() {
        config.default_org = Some(args.alias.clone());
    }
    config.save(&paths)?;

    print_success(&format!("Org '{}' saved.", args.alias));
    Ok(())
}

fn execute_remove(args: RemoveArgs) -> CliResult<()> {
    let paths = ConfigPaths::new()?;
    let mut config = Config::load(&paths)?;

    if config.orgs.remove(&args.alias).is_none() {
        return Err(CliError::UnknownOrg(args.alias));
    }
    if config.default_org.as_deref() == Some(args.alias.as_str()) {
        config.default_org = None;
    }
    config.save(&paths)?;

    print_success(&format!("Org '{}' removed.", args.alias));
    Ok(())
}
