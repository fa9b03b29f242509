//! Core library for the SkyCast weather dashboard.
//!
//! This crate defines:
//! - Configuration handling (proxy base URL, forecast depth)
//! - The HTTP client for the `/weather` and `/forecast` proxy endpoints
//! - The search/history controller: an explicit dashboard state object
//!   mutated only through pure search-event transitions
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod history;
pub mod model;

pub use client::{HttpWeatherClient, WeatherApi};
pub use config::Config;
pub use controller::{Controller, DashboardState, SearchEvent};
pub use error::{Endpoint, WeatherError};
pub use history::{MAX_HISTORY, SearchHistory};
pub use model::{
    CurrentWeatherReport, ForecastDay, ForecastResponse, HistoryEntry, HourSample,
};
