use airquality_core::{CityRequest, Config, provider::provider_from_config};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::Level;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "airquality",
    version,
    about = "Current weather and air quality for one city, from AirVisual"
)]
pub struct Cli {
    /// Logging verbosity: trace, debug, info, warn or error. RUST_LOG takes precedence.
    #[arg(long, global = true, default_value_t = Level::WARN)]
    pub log_level: Level,

    /// Defaults to `show` for the configured city.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and default city in the config file.
    Configure,

    /// Show current weather and air quality.
    Show(LocationArgs),
}

/// Overrides for the configured location, for this run only.
#[derive(Debug, Default, Args)]
pub struct LocationArgs {
    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub state: Option<String>,

    #[arg(long)]
    pub country: Option<String>,
}

impl LocationArgs {
    pub fn into_request(self, configured: CityRequest) -> CityRequest {
        CityRequest {
            city: self.city.unwrap_or(configured.city),
            state: self.state.unwrap_or(configured.state),
            country: self.country.unwrap_or(configured.country),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Show(LocationArgs::default())) {
            Command::Configure => configure(),
            Command::Show(location) => show(location).await,
        }
    }
}

async fn show(location: LocationArgs) -> anyhow::Result<()> {
    let config = Config::load()?.with_env_overrides(|name| std::env::var(name).ok());
    let request = location.into_request(config.location.clone());
    let provider = provider_from_config(&config)?;

    let mut out = std::io::stdout();
    airquality_core::run(provider.as_ref(), &request, &mut out).await
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("AirVisual API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("Leave empty to keep the current key")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let current = config.location.clone();
    config.location = CityRequest {
        city: Text::new("City:").with_default(&current.city).prompt()?,
        state: Text::new("State:").with_default(&current.state).prompt()?,
        country: Text::new("Country:").with_default(&current.country).prompt()?,
    };

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
