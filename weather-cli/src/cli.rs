use std::sync::Arc;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::{debug, info};
use weather_core::{Config, SearchOutcome, WeatherWidget, config::DEFAULT_BASE_URL, widget::DATE_REFRESH_PERIOD};

use crate::display::TerminalDisplay;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and 5-day forecast for a city")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and the default city.
    Configure,

    /// Show current conditions and forecast once.
    Show {
        /// City name; the configured default city when omitted.
        city: Option<String>,
    },

    /// Show the default city, then search interactively until Esc or Ctrl-C.
    Interactive,
}

type TerminalWidget = WeatherWidget<TerminalDisplay>;

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(city).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let default_city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;

    let base_url = Text::new("API base URL:")
        .with_default(config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
        .prompt()
        .context("Failed to read base URL")?;

    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }
    config.default_city = Some(default_city.trim().to_string()).filter(|c| !c.is_empty());
    config.base_url = Some(base_url.trim().to_string()).filter(|u| u != DEFAULT_BASE_URL);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

fn build_widget(config: &Config) -> anyhow::Result<TerminalWidget> {
    let widget_config = config.widget_config()?;
    debug!(base_url = %widget_config.base_url, "building widget");
    Ok(WeatherWidget::from_config(&widget_config, TerminalDisplay::new()))
}

async fn show(city: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let widget = build_widget(&config)?;

    let city = city.unwrap_or_else(|| config.default_city().to_string());

    widget.refresh_date();
    match widget.search(&city).await {
        SearchOutcome::Failed(err) => Err(err).context("Weather lookup failed"),
        SearchOutcome::Skipped => anyhow::bail!("City name must not be empty"),
        SearchOutcome::Rendered | SearchOutcome::Superseded => Ok(()),
    }
}

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let widget = Arc::new(build_widget(&config)?);

    let refresher = {
        let widget = Arc::clone(&widget);
        tokio::spawn(async move { widget.run_date_refresh(DATE_REFRESH_PERIOD).await })
    };

    widget.start(config.default_city()).await;

    let result = prompt_loop(&widget).await;
    refresher.abort();
    result
}

async fn prompt_loop(widget: &TerminalWidget) -> anyhow::Result<()> {
    loop {
        let date = widget.with_display(|d| d.regions().date_label.clone());

        let answer = tokio::task::spawn_blocking(move || {
            Text::new("City:").with_help_message(&date).prompt()
        })
        .await
        .context("Search prompt task failed")?;

        match answer {
            Ok(input) => {
                println!();
                widget.search(&input).await;
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                info!("leaving interactive mode");
                return Ok(());
            }
            Err(err) => return Err(err).context("Failed to read city name"),
        }
    }
}
