//! Core library for the `weather-fetcher` CLI.
//!
//! This crate defines:
//! - Endpoint configuration for the Open-Meteo services
//! - The lookup error taxonomy
//! - Domain models (locations, current conditions)
//! - A pluggable HTTP GET transport and the Open-Meteo client built on it
//!
//! It is used by `weather-fetcher`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod transport;

pub use client::OpenMeteoClient;
pub use config::Config;
pub use error::FetchError;
pub use model::{CurrentWeather, Location};
pub use reqwest::StatusCode;
pub use transport::{HttpReply, ReqwestTransport, Transport};

#[cfg(any(test, feature = "test-util"))]
pub use transport::MockTransport;
