//! Contacts CLI
//!
//! Command-line and terminal interface for the Contacts API.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use contacts_core::{Config, ContactApi, HttpClient};

mod client;
mod commands;
mod output;
mod tui;

use commands::contact::ContactInput;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "contacts")]
#[command(about = "Contacts - manage your contacts from the terminal")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Base URL of the Contacts API (overrides api_url)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Path to config file (overrides CONTACTS_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// List all contacts, newest first
    #[command(alias = "ls")]
    List,
    /// Add a contact
    #[command(alias = "create")]
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        /// Phone number; non-digits are stripped
        #[arg(short, long)]
        phone: String,
        #[arg(short, long)]
        message: Option<String>,
    },
    /// Change fields of a contact
    Edit {
        /// Contact ID (full UUID or prefix)
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        phone: Option<String>,
        #[arg(short, long)]
        message: Option<String>,
    },
    /// Delete a contact
    #[command(alias = "rm")]
    Delete {
        /// Contact ID (full UUID or prefix)
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, bind_addr, api_url, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't talk to the service
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let mut config =
        Config::load_with_cli_override(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    let api: Arc<dyn ContactApi> = Arc::new(HttpClient::new(&config.api_url));

    match cli.command {
        None | Some(Commands::Tui) => tui::run(api, &config).await,
        Some(Commands::List) => commands::contact::list(api.as_ref(), &output).await,
        Some(Commands::Add {
            name,
            email,
            phone,
            message,
        }) => {
            let input = ContactInput {
                name: Some(name),
                email: Some(email),
                phone: Some(phone),
                message,
            };
            commands::contact::add(api.as_ref(), input, &output).await
        }
        Some(Commands::Edit {
            id,
            name,
            email,
            phone,
            message,
        }) => {
            let input = ContactInput {
                name,
                email,
                phone,
                message,
            };
            commands::contact::edit(api.as_ref(), id, input, &output).await
        }
        Some(Commands::Delete { id, yes }) => {
            commands::contact::delete(api.as_ref(), id, yes, &output).await
        }
        Some(Commands::Config { .. }) => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}
