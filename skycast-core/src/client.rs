use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::{Endpoint, WeatherError},
    model::{CurrentWeatherReport, ForecastResponse},
};

/// Abstraction over the weather backend proxy.
///
/// The controller is generic over this trait so its join/validate/commit
/// logic can be exercised against an in-memory fake.
#[async_trait]
pub trait WeatherApi: Send + Sync + std::fmt::Debug {
    /// Fetch current conditions for a city.
    async fn fetch_current(&self, city: &str) -> Result<CurrentWeatherReport, WeatherError>;

    /// Fetch a multi-day forecast for a city.
    async fn fetch_forecast(&self, city: &str, days: u8)
    -> Result<ForecastResponse, WeatherError>;
}

/// HTTP client for the `/weather` and `/forecast` proxy endpoints.
///
/// The base URL is resolved once from configuration; the empty default
/// targets the same origin the proxy is mounted on. The city value is sent
/// as a proper query parameter, so reqwest percent-encodes it.
#[derive(Debug, Clone)]
pub struct HttpWeatherClient {
    http: Client,
    base_url: String,
}

impl HttpWeatherClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { http: Client::new(), base_url: base_url.into() }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(endpoint = %endpoint, url = %url, "dispatching request");

        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| WeatherError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Transport { endpoint, source })?;

        if !status.is_success() {
            let body = if body.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                truncate_body(&body)
            };
            return Err(WeatherError::Http { endpoint, status, body });
        }

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::Shape(format!("failed to parse {endpoint} JSON: {e}")))
    }
}

#[async_trait]
impl WeatherApi for HttpWeatherClient {
    async fn fetch_current(&self, city: &str) -> Result<CurrentWeatherReport, WeatherError> {
        self.get_json(Endpoint::Current, "/weather", &[("city", city)]).await
    }

    async fn fetch_forecast(
        &self,
        city: &str,
        days: u8,
    ) -> Result<ForecastResponse, WeatherError> {
        let days = days.to_string();
        self.get_json(Endpoint::Forecast, "/forecast", &[("city", city), ("days", &days)])
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
