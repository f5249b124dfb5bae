use serde::Deserialize;

/// Coordinates of the best geocoding match for a city name.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Real-time measurements from the forecast endpoint's `current` block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentWeather {
    /// Local ISO-8601 timestamp as sent by the API, e.g. `2024-01-01T00:00`.
    pub time: String,
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub wind_speed_10m: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodingResponse {
    /// Open-Meteo omits the field entirely when nothing matches.
    pub results: Option<Vec<Location>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    pub current: CurrentWeather,
}
