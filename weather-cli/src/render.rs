use std::io::{self, Write};
use weather_fetcher_core::CurrentWeather;

pub const BANNER: &str = "================ Weather Info Fetcher ================";
pub const PROMPT: &str = "Enter a city (type 'No' to exit): ";
pub const FAREWELL: &str = "Closing the application. Goodbye!";

pub const LOCATION_NOT_FOUND: &str = "Unable to find location. Try another city.";
pub const LOCATION_STATUS_ERROR: &str = "Error fetching location data.";
pub const LOCATION_FAILED: &str = "Location data retrieval failed.";
pub const WEATHER_STATUS_ERROR: &str = "Weather data could not be fetched.";
pub const WEATHER_FAILED: &str = "Failed to process weather information.";

const WEATHER_HEADER: &str = "----------- Current Weather Details -----------";

/// Banner and prompt shown before every read. The prompt has no trailing newline.
pub fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "\n{BANNER}\n\n{PROMPT}")?;
    out.flush()
}

pub fn current_weather(out: &mut impl Write, weather: &CurrentWeather) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{WEATHER_HEADER}")?;
    writeln!(out, "Time Recorded       : {}", weather.time)?;
    writeln!(out, "Temperature (°C)    : {}", weather.temperature_2m)?;
    writeln!(out, "Humidity (%)        : {}", weather.relative_humidity_2m)?;
    writeln!(out, "Wind Speed (km/h)   : {}", weather.wind_speed_10m)
}
