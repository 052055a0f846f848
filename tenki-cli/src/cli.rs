use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use tenki_core::{
    Config, OutputRecord, Overrides, WeatherRequest, current_record,
    provider::provider_from_settings, translate,
};
use tracing::{error, info};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "tenki", version, about = "Current weather as Waybar-style JSON")]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Read configuration from this file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log more to stderr (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Where to fetch from. Each flag can also be given through its environment
/// variable; both win over the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// WeatherAPI.com key.
    #[arg(long, global = true, env = "WEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Location query, e.g. a city name or "lat,lon".
    #[arg(long, global = true, env = "WEATHER_API_LOCATION")]
    pub location: Option<String>,

    /// Language of the condition text returned by the API.
    #[arg(long, global = true, env = "WEATHER_API_LANG")]
    pub lang: Option<String>,

    /// Override the API base URL.
    #[arg(long, global = true, env = "WEATHER_API_BASE_URL")]
    pub base_url: Option<String>,
}

impl From<SourceArgs> for Overrides {
    fn from(args: SourceArgs) -> Self {
        Overrides {
            api_key: args.api_key,
            location: args.location,
            lang: args.lang,
            base_url: args.base_url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the widget record for the current weather (default).
    Show,

    /// Interactively store location and API key in the config file.
    Configure,

    /// List the condition translation table.
    Conditions,
}

impl Cli {
    pub async fn run(self, out: &mut dyn Write) -> anyhow::Result<()> {
        let config = self.config.as_deref();

        match self.command.unwrap_or(Command::Show) {
            Command::Show => {
                let record = show(self.source, config).await;
                writeln!(out, "{}", record.to_json_line())?;
            }
            Command::Configure => configure(config, out)?,
            Command::Conditions => list_conditions(out)?,
        }

        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Always yields a record; configuration and fetch failures become the error
/// record.
pub async fn show(source: SourceArgs, config: Option<&Path>) -> OutputRecord {
    let settings = match load_config(config).and_then(|cfg| cfg.resolve(source.into())) {
        Ok(settings) => settings,
        Err(err) => {
            error!("{err:#}");
            return OutputRecord::error(format!("{err:#}"));
        }
    };

    let provider = match provider_from_settings(&settings) {
        Ok(provider) => provider,
        Err(err) => {
            error!(kind = err.kind(), "{err}");
            return OutputRecord::error(&err);
        }
    };

    current_record(provider.as_ref(), &WeatherRequest::new(settings.location)).await
}

fn configure(path: Option<&Path>, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut cfg = load_config(path)?;

    let mut location_prompt = Text::new("Location:")
        .with_help_message("City name, postcode or \"lat,lon\" understood by WeatherAPI.com");
    if let Some(current) = cfg.location.as_deref() {
        location_prompt = location_prompt.with_default(current);
    }
    let location = location_prompt.prompt().context("Failed to read location")?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("Leave empty to keep the stored key")
        .prompt()
        .context("Failed to read API key")?;

    let lang = Text::new("Language:")
        .with_default(cfg.lang.as_deref().unwrap_or(tenki_core::provider::weatherapi::DEFAULT_LANG))
        .prompt()
        .context("Failed to read language")?;

    cfg.location = Some(location.trim().to_string());
    if !api_key.trim().is_empty() {
        cfg.api_key = Some(api_key.trim().to_string());
    }
    cfg.lang = Some(lang.trim().to_string());

    let saved = match path {
        Some(path) => {
            cfg.save_to(path)?;
            path.to_path_buf()
        }
        None => cfg.save()?,
    };
    info!(path = %saved.display(), "configuration saved");
    writeln!(out, "Configuration saved to {}", saved.display())?;

    Ok(())
}

fn list_conditions(out: &mut dyn Write) -> anyhow::Result<()> {
    for condition in translate::conditions() {
        let night = condition.night.iter().map(|entry| (entry, "night"));
        for (entry, when) in std::iter::once((&condition.day, "day")).chain(night) {
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}",
                condition.code, when, entry.label, entry.reading, entry.gloss
            )?;
        }
    }
    Ok(())
}
