use anyhow::Context;
use clap::{ArgAction, Parser};
use std::{io, time::Duration};
use weather_fetcher_core::{
    Config, OpenMeteoClient,
    config::{DEFAULT_FORECAST_URL, DEFAULT_GEOCODING_URL},
};

use crate::session::Session;

/// Top-level CLI struct.
///
/// Every flag has a default; running with no arguments starts the interactive prompt.
#[derive(Debug, Parser)]
#[command(
    name = "weather-fetcher",
    version,
    about = "Look up current weather by city name (Open-Meteo)"
)]
pub struct Cli {
    /// Geocoding search endpoint.
    #[arg(long, value_name = "URL", default_value = DEFAULT_GEOCODING_URL)]
    pub geocoding_url: String,

    /// Forecast endpoint.
    #[arg(long, value_name = "URL", default_value = DEFAULT_FORECAST_URL)]
    pub forecast_url: String,

    /// Abort a request after this many seconds. No timeout when absent.
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn config(&self) -> anyhow::Result<Config> {
        Ok(Config::default()
            .with_geocoding_url(self.geocoding_url.as_str())?
            .with_forecast_url(self.forecast_url.as_str())?
            .with_timeout(self.timeout_secs.map(Duration::from_secs)))
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let client = OpenMeteoClient::new(self.config()?)?;

        let stdin = io::stdin();
        let stdout = io::stdout();
        Session::new(&client, stdin.lock(), stdout.lock())
            .run()
            .await
            .context("Interactive session aborted")
    }
}
