pub mod cli;
pub mod core;

use crate::core::config::{AppConfig, OutputFormat};
use crate::core::profile::ProfileDraft;
use anyhow::Result;
use tracing::{debug, info};

/// Commands that run against a loaded configuration.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Evaluate the configured profile, with `overrides` taking precedence.
    Advise {
        overrides: ProfileDraft,
        format: Option<OutputFormat>,
    },
    /// Collect the profile through a terminal form.
    Interactive { format: Option<OutputFormat> },
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Builds the report for a one-shot advise request without printing it.
pub fn render_command(
    overrides: ProfileDraft,
    format: Option<OutputFormat>,
    config_path: Option<&str>,
) -> Result<String> {
    let config = load_config(config_path)?;
    let draft = config.profile.merge(overrides);

    let missing = draft.missing_fields();
    let Some(profile) = draft.complete() else {
        anyhow::bail!(
            "Missing profile fields: {}. Set them in the config file or pass them as flags",
            missing.join(", ")
        );
    };

    cli::advise::run(&profile, format.unwrap_or(config.format))
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Financial advisor starting...");

    match command {
        AppCommand::Advise { overrides, format } => {
            let output = render_command(overrides, format, config_path)?;
            println!("{output}");
            Ok(())
        }
        AppCommand::Interactive { format } => {
            let config = load_config(config_path)?;
            cli::interactive::run(format.unwrap_or(config.format))
        }
    }
}
