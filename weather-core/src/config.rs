use anyhow::{Result, anyhow};
use std::time::Duration;

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const USER_AGENT: &str = concat!("weather-fetcher/", env!("CARGO_PKG_VERSION"));

/// Endpoints and HTTP settings used by [`crate::OpenMeteoClient`].
///
/// `Config::default()` targets the public Open-Meteo services with no request timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the geocoding search endpoint, without a query string.
    pub geocoding_url: String,

    /// Base URL of the forecast endpoint, without a query string.
    pub forecast_url: String,

    /// Whole-request timeout. `None` leaves the HTTP client's default in place.
    pub timeout: Option<Duration>,

    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            timeout: None,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Replace the geocoding endpoint.
    pub fn with_geocoding_url(mut self, url: impl Into<String>) -> Result<Self> {
        self.geocoding_url = validate_base_url("geocoding", url.into())?;
        Ok(self)
    }

    /// Replace the forecast endpoint.
    pub fn with_forecast_url(mut self, url: impl Into<String>) -> Result<Self> {
        self.forecast_url = validate_base_url("forecast", url.into())?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Query parameters are appended by the client, so a base URL must be absolute
/// and must not carry its own query string.
fn validate_base_url(which: &str, url: String) -> Result<String> {
    let trimmed = url.trim();

    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(anyhow!(
            "Invalid {which} URL '{url}'. Expected an absolute http:// or https:// URL."
        ));
    }

    if trimmed.contains('?') {
        return Err(anyhow!(
            "Invalid {which} URL '{url}'. Remove the query string; it is added automatically."
        ));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
