use anyhow::Context;
use clap::{Parser, Subcommand};
use skycast_core::{Config, Controller, HttpWeatherClient};

use crate::render;

/// Sample cities offered before any history exists.
pub const PRESET_CITIES: [&str; 4] = ["Hyderabad", "Delhi", "Mumbai", "New York"];

const SEARCH_OPTION: &str = "Search for a city...";
const QUIT_OPTION: &str = "Quit";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "SkyCast weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// One-shot search: fetch and render the dashboard for a city.
    Show {
        /// City name, e.g. "Paris" or "New York".
        city: String,
    },

    /// Interactive search loop with preset cities and re-searchable history.
    Interactive,

    /// Configure the weather proxy base URL and forecast depth.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { city } => show(&city).await,
            Command::Interactive => interactive().await,
            Command::Configure => configure(),
        }
    }
}

fn new_controller() -> anyhow::Result<Controller<HttpWeatherClient>> {
    let config = Config::load().context("Failed to load configuration")?;
    Ok(Controller::new(HttpWeatherClient::new(config.base_url.clone()), config.forecast_days))
}

async fn show(city: &str) -> anyhow::Result<()> {
    let mut controller = new_controller()?;

    match controller.submit(city).await {
        Ok(()) => {
            println!("{}", render::render_dashboard(controller.state()));
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "search failed");
            anyhow::bail!("{}", err.user_message())
        }
    }
}

async fn interactive() -> anyhow::Result<()> {
    let mut controller = new_controller()?;

    loop {
        // History entries come first (re-searchable, like the clickable
        // list on the dashboard), then the presets not already shown.
        let mut options: Vec<String> =
            controller.state().history.cities().map(str::to_string).collect();
        for preset in PRESET_CITIES {
            if !options.iter().any(|city| city == preset) {
                options.push(preset.to_string());
            }
        }
        options.push(SEARCH_OPTION.to_string());
        options.push(QUIT_OPTION.to_string());

        let choice = inquire::Select::new("Where to?", options).prompt()?;
        let city = match choice.as_str() {
            QUIT_OPTION => break,
            SEARCH_OPTION => inquire::Text::new("Search for a city:").prompt()?,
            _ => choice,
        };

        match controller.submit(&city).await {
            Ok(()) => println!("{}", render::render_dashboard(controller.state())),
            Err(err) => {
                tracing::error!(error = %err, "search failed");
                eprintln!("{}", err.user_message());
            }
        }
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;

    let base_url = inquire::Text::new("Proxy base URL (empty = same origin):")
        .with_initial_value(&config.base_url)
        .prompt()?;
    let days = inquire::Text::new("Forecast days:")
        .with_initial_value(&config.forecast_days.to_string())
        .prompt()?;

    config.base_url = base_url.trim().to_string();
    config.forecast_days =
        days.trim().parse().context("Forecast days must be a small positive integer")?;
    config.save()?;

    println!("Saved {}", Config::config_file_path()?.display());
    Ok(())
}
