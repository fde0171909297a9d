//! Config command handlers

use std::path::PathBuf;

use anyhow::{Context, Result};

use contacts_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "bind_addr": config.bind_addr,
                    "api_url": config.api_url,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.api_url);
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:  {}", config.data_dir.display());
            println!("  bind_addr: {}", config.bind_addr);
            println!("  api_url:   {}", config.api_url);
            println!(
                "  log_file:  {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    config.set_value(&key, &value)?;

    match config_path {
        Some(path) => config.save_to_path(path)?,
        None => config.save()?,
    }

    output.message(&format!("Set {} = {}", key, value));
    Ok(())
}
