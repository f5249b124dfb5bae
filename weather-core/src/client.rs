use anyhow::Result;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::{
    Config, FetchError,
    model::{CurrentWeather, ForecastResponse, GeocodingResponse, Location},
    transport::{ReqwestTransport, Transport},
};

/// Variables requested in the forecast's `current` block.
pub const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m";

/// Client for the Open-Meteo geocoding and forecast endpoints.
///
/// Each call performs exactly one GET; nothing is cached between calls.
#[derive(Debug)]
pub struct OpenMeteoClient<T = ReqwestTransport> {
    config: Config,
    transport: T,
}

impl OpenMeteoClient<ReqwestTransport> {
    /// Client backed by a real HTTP connection pool.
    pub fn new(config: Config) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> OpenMeteoClient<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve a city name to the coordinates of its best match.
    #[instrument(skip(self))]
    pub async fn geocode(&self, city: &str) -> Result<Location, FetchError> {
        let base = self.config.geocoding_url.as_str();
        let encode_failed = |e| FetchError::query(base, e);
        let url = geocoding_url(base, city).map_err(encode_failed)?;
        info!("Geocoding city");

        let parsed: GeocodingResponse = self.get_json(&url).await?;

        let location = parsed
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| FetchError::NotFound(city.to_string()))?;

        debug!(
            latitude = location.latitude,
            longitude = location.longitude,
            "resolved location"
        );
        Ok(location)
    }

    /// Fetch real-time conditions at the given coordinates.
    #[instrument(
        skip_all,
        fields(latitude = location.latitude, longitude = location.longitude)
    )]
    pub async fn current_weather(&self, location: Location) -> Result<CurrentWeather, FetchError> {
        let url = forecast_url(&self.config.forecast_url, location);
        info!("Fetching current weather");

        let parsed: ForecastResponse = self.get_json(&url).await?;
        Ok(parsed.current)
    }

    async fn get_json<R: DeserializeOwned>(&self, url: &str) -> Result<R, FetchError> {
        debug!(url, "GET");
        let reply = self.transport.get(url).await?;

        if reply.status != StatusCode::OK {
            warn!(status = %reply.status, url, "unexpected status");
            return Err(FetchError::status(url, reply.status, &reply.body));
        }

        serde_json::from_str(&reply.body)
            .map_err(|e| FetchError::parse(url, e))
    }
}

/// Build the geocoding search URL. The city is form-urlencoded, so spaces
/// become `+` and reserved characters are percent-escaped.
pub fn geocoding_url(base: &str, city: &str) -> Result<String, serde_urlencoded::ser::Error> {
    let params = [
        ("name", city),
        ("count", "1"),
        ("language", "en"),
        ("format", "json"),
    ];
    let query = serde_urlencoded::to_string(&params[..])?;

    Ok(format!("{base}?{query}"))
}

/// Build the forecast URL for the `current` block at a location.
pub fn forecast_url(base: &str, location: Location) -> String {
    format!(
        "{base}?latitude={}&longitude={}&current={CURRENT_FIELDS}",
        location.latitude, location.longitude
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{HttpReply, MockTransport};

    const GEO: &str = "https://geocoding-api.open-meteo.com/v1/search";
    const FORECAST: &str = "https://api.open-meteo.com/v1/forecast";

    const LONDON: &str = r#"{"results":[{"latitude":51.5,"longitude":-0.12}]}"#;
    const CURRENT: &str = r#"{"current":{"time":"2024-01-01T00:00","temperature_2m":10.5,"relative_humidity_2m":80,"wind_speed_10m":5.2}}"#;

    fn client(transport: MockTransport) -> OpenMeteoClient<MockTransport> {
        OpenMeteoClient::with_transport(Config::default(), transport)
    }

    fn at(latitude: f64, longitude: f64) -> Location {
        Location {
            latitude,
            longitude,
        }
    }

    fn city_url(city: &str) -> String {
        geocoding_url(GEO, city).expect("string pairs always encode")
    }

    #[test]
    fn geocoding_url_uses_fixed_parameters() {
        assert_eq!(
            city_url("Berlin"),
            format!("{GEO}?name=Berlin&count=1&language=en&format=json")
        );
    }

    #[test]
    fn geocoding_url_replaces_spaces_with_plus() {
        let url = city_url("New York");
        assert!(url.contains("?name=New+York&count=1"), "{url}");
    }

    #[test]
    fn geocoding_url_escapes_reserved_and_non_ascii() {
        let url = city_url("São Paulo&x=1");
        assert!(url.contains("?name=S%C3%A3o+Paulo%26x%3D1&count=1"), "{url}");
    }

    #[test]
    fn geocoding_url_allows_empty_name() {
        let url = city_url("");
        assert!(
            url.ends_with("?name=&count=1&language=en&format=json"),
            "{url}"
        );
    }

    #[test]
    fn forecast_url_formats_coordinates_shortest() {
        assert_eq!(
            forecast_url(FORECAST, at(51.5, -0.12)),
            format!("{FORECAST}?latitude=51.5&longitude=-0.12&current={CURRENT_FIELDS}")
        );
    }

    #[tokio::test]
    async fn geocode_returns_first_result() {
        let body = r#"{"results":[{"latitude":51.5,"longitude":-0.12},{"latitude":42.98,"longitude":-81.24}]}"#;
        let client = client(MockTransport::new().reply(GEO, HttpReply::ok(body)));

        let location = client.geocode("London").await.unwrap();
        assert_eq!(location, at(51.5, -0.12));
        assert_eq!(client.transport().requests(), vec![city_url("London")]);
    }

    #[tokio::test]
    async fn geocode_empty_results_is_not_found() {
        let reply = HttpReply::ok(r#"{"results":[]}"#);
        let client = client(MockTransport::new().reply(GEO, reply));

        let err = client.geocode("Atlantis").await.unwrap_err();
        assert!(
            matches!(err, FetchError::NotFound(ref city) if city == "Atlantis"),
            "got {err:?}"
        );
    }

    #[tokio::test]
    async fn geocode_missing_results_is_not_found() {
        let reply = HttpReply::ok(r#"{"generationtime_ms":0.2}"#);
        let client = client(MockTransport::new().reply(GEO, reply));

        let err = client.geocode("Nowhere").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn geocode_non_200_is_status_error() {
        let reply = HttpReply::new(StatusCode::BAD_REQUEST, r#"{"error":true,"reason":"bad"}"#);
        let client = client(MockTransport::new().reply(GEO, reply));

        let err = client.geocode("").await.unwrap_err();
        match err {
            FetchError::Status { status, body, .. } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert!(body.contains("bad"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn geocode_malformed_json_is_parse_error() {
        let reply = HttpReply::ok("<html>oops</html>");
        let client = client(MockTransport::new().reply(GEO, reply));

        let err = client.geocode("Paris").await.unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn geocode_transport_failure_is_reported() {
        let client = client(MockTransport::new().unreachable(GEO, "dns failure"));

        let err = client.geocode("Paris").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn current_weather_extracts_current_block() {
        let reply = HttpReply::ok(CURRENT);
        let client = client(MockTransport::new().reply(FORECAST, reply));

        let weather = client.current_weather(at(51.5, -0.12)).await.unwrap();

        assert_eq!(weather.time, "2024-01-01T00:00");
        assert_eq!(weather.temperature_2m, 10.5);
        assert_eq!(weather.relative_humidity_2m, 80.0);
        assert_eq!(weather.wind_speed_10m, 5.2);
        assert_eq!(
            client.transport().requests(),
            vec![forecast_url(FORECAST, at(51.5, -0.12))]
        );
    }

    #[tokio::test]
    async fn current_weather_non_200_is_status_error() {
        let reply = HttpReply::new(StatusCode::SERVICE_UNAVAILABLE, "down");
        let client = client(MockTransport::new().reply(FORECAST, reply));

        let err = client.current_weather(at(0.0, 0.0)).await.unwrap_err();
        assert!(
            matches!(err, FetchError::Status { status, .. } if status.as_u16() == 503),
            "got {err:?}"
        );
    }

    #[tokio::test]
    async fn current_weather_wrong_shape_is_parse_error() {
        let reply = HttpReply::ok(r#"{"current":{"time":"2024-01-01T00:00"}}"#);
        let client = client(MockTransport::new().reply(FORECAST, reply));

        let err = client.current_weather(at(1.0, 2.0)).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn custom_endpoints_are_used() {
        let cfg = Config::default()
            .with_geocoding_url("http://127.0.0.1:8080/geo")
            .unwrap()
            .with_forecast_url("http://127.0.0.1:8080/fc")
            .unwrap();
        let mock = MockTransport::new()
            .reply("http://127.0.0.1:8080/geo", HttpReply::ok(LONDON))
            .reply("http://127.0.0.1:8080/fc", HttpReply::ok(CURRENT));
        let client = OpenMeteoClient::with_transport(cfg, mock);

        let location = client.geocode("Oslo").await.unwrap();
        client.current_weather(location).await.unwrap();

        let geo = "http://127.0.0.1:8080/geo?name=Oslo&";
        let fc = "http://127.0.0.1:8080/fc?latitude=51.5&longitude=-0.12&";
        let requests = client.transport().requests();
        assert!(requests[0].starts_with(geo), "{requests:?}");
        assert!(requests[1].starts_with(fc), "{requests:?}");
    }
}
