//! The interactive prompt loop.
//!
//! Each iteration reads one line, resolves it to a location and prints the
//! current weather there. Lookup failures are reported and the loop goes back
//! to the prompt; only terminal I/O failures end it with an error.

use std::io::{self, BufRead, Write};
use tracing::{debug, warn};
use weather_fetcher_core::{FetchError, Location, OpenMeteoClient, Transport};

use crate::render;

/// What the user asked for on one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Lookup(String),
}

impl Command {
    /// `no` in any case, surrounded by any whitespace, exits. Everything else,
    /// including an empty line, is a city name.
    pub fn parse(line: &str) -> Self {
        if line.trim().eq_ignore_ascii_case("no") {
            Command::Exit
        } else {
            Command::Lookup(line.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}

pub struct Session<'a, T, R, W> {
    client: &'a OpenMeteoClient<T>,
    input: R,
    output: W,
}

impl<'a, T, R, W> Session<'a, T, R, W>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    pub fn new(client: &'a OpenMeteoClient<T>, input: R, output: W) -> Self {
        Self {
            client,
            input,
            output,
        }
    }

    /// Prompt until the user types `no` or input ends.
    pub async fn run(mut self) -> io::Result<()> {
        loop {
            render::prompt(&mut self.output)?;

            let Some(line) = self.read_line()? else {
                debug!("end of input");
                writeln!(self.output)?;
                writeln!(self.output, "{}", render::FAREWELL)?;
                return Ok(());
            };

            match Command::parse(&line) {
                Command::Exit => {
                    writeln!(self.output, "{}", render::FAREWELL)?;
                    return Ok(());
                }
                Command::Lookup(city) => self.lookup(&city).await?,
            }
        }
    }

    /// Bytes that are not valid UTF-8 become U+FFFD, so a city typed in a
    /// legacy terminal encoding is still looked up.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        match self.input.read_until(b'\n', &mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(String::from_utf8_lossy(&buf).into_owned())),
        }
    }

    async fn lookup(&mut self, city: &str) -> io::Result<()> {
        let Some(location) = self.locate(city).await? else {
            writeln!(self.output, "{}", render::LOCATION_NOT_FOUND)?;
            return Ok(());
        };

        match self.client.current_weather(location).await {
            Ok(weather) => render::current_weather(&mut self.output, &weather),
            Err(FetchError::Status { .. }) => {
                writeln!(self.output, "{}", render::WEATHER_STATUS_ERROR)
            }
            Err(err) => {
                warn!(error = ?err, "current weather lookup failed");
                writeln!(self.output, "{}", render::WEATHER_FAILED)
            }
        }
    }

    /// `None` means the city could not be resolved; the reason has already
    /// been printed unless it was a plain "no match".
    async fn locate(&mut self, city: &str) -> io::Result<Option<Location>> {
        match self.client.geocode(city).await {
            Ok(location) => Ok(Some(location)),
            Err(FetchError::NotFound(_)) => Ok(None),
            Err(FetchError::Status { .. }) => {
                writeln!(self.output, "{}", render::LOCATION_STATUS_ERROR)?;
                Ok(None)
            }
            Err(err) => {
                warn!(error = ?err, city, "geocoding failed");
                writeln!(self.output, "{}", render::LOCATION_FAILED)?;
                Ok(None)
            }
        }
    }
}
