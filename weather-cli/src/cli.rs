use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Text;
use weather_core::{Config, LookupError, WeatherReport, lookup, provider_from_config};

use crate::render::{render_card, render_codes};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and outdoor advice for a city")]
pub struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the default city.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name; falls back to the configured default city.
        city: Option<String>,

        /// Print the full report as JSON instead of a card.
        #[arg(long)]
        json: bool,

        /// Disable colored output.
        #[arg(long)]
        no_color: bool,
    },

    /// List known weather codes with their descriptions and color categories.
    Codes {
        /// Disable colored output.
        #[arg(long)]
        no_color: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json, no_color } => show(city.as_deref(), json, no_color).await,
            Command::Codes { no_color } => {
                println!("{}", render_codes(use_colors(no_color)));
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn use_colors(no_color: bool) -> bool {
    !no_color && console::colors_enabled()
}

fn configure() -> anyhow::Result<ExitCode> {
    let mut cfg = Config::load()?;

    let mut prompt = Text::new("Default city:")
        .with_help_message("Used by `weather show` when no city is given. Leave empty to clear.");
    if let Some(current) = cfg.default_city.as_deref() {
        prompt = prompt.with_default(current);
    }
    let city = prompt.prompt().context("Failed to read default city")?;

    cfg.set_default_city(&city);
    cfg.save()?;

    match &cfg.default_city {
        Some(city) => println!("Default city set to {city}."),
        None => println!("Default city cleared."),
    }
    println!("Config saved to {}", Config::config_file_path()?.display());

    Ok(ExitCode::SUCCESS)
}

async fn show(city: Option<&str>, json: bool, no_color: bool) -> anyhow::Result<ExitCode> {
    let cfg = Config::load()?;
    let city = cfg.resolve_city(city)?;
    let provider = provider_from_config(&cfg)?;

    match lookup(&provider, &provider, &city).await {
        Ok(report) => {
            print_report(&report, json, no_color)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            if let LookupError::FetchFailed(cause) = &err {
                tracing::warn!(error = %cause, "weather lookup failed");
            }
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_report(report: &WeatherReport, json: bool, no_color: bool) -> anyhow::Result<()> {
    if json {
        let out = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        println!("{out}");
    } else {
        println!("{}", render_card(report, use_colors(no_color)));
    }
    Ok(())
}
