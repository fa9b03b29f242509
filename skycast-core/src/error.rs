use reqwest::StatusCode;
use thiserror::Error;

/// Which of the two proxy endpoints an error came from.
///
/// Kept on the error so forecast failures stay distinguishable from
/// current-weather failures, even though the controller treats both the
/// same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Current => "current weather",
            Endpoint::Forecast => "forecast",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by the weather client and the search controller.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The query was empty or whitespace-only; nothing was dispatched.
    #[error("please enter a city name")]
    EmptyQuery,

    /// The request could not be sent or completed at the transport level.
    #[error("{endpoint} request could not be completed: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("{endpoint} request failed with status {status}: {body}")]
    Http {
        endpoint: Endpoint,
        status: StatusCode,
        body: String,
    },

    /// A 2xx response lacked the expected structure.
    #[error("invalid response shape: {0}")]
    Shape(String),

    /// Configuration could not be loaded or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl WeatherError {
    /// Classify the error into the message shown to the user.
    ///
    /// Mirrors the dashboard's alert taxonomy: connection problems point at
    /// the backend proxy, 404-ish responses at the city spelling, anything
    /// else echoes the error text.
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::EmptyQuery => "Please enter a city name.".to_string(),
            WeatherError::Transport { source, .. }
                if source.is_connect() || source.is_timeout() =>
            {
                "Backend server is not reachable. Is the weather proxy running?".to_string()
            }
            WeatherError::Http { status, .. } if *status == StatusCode::NOT_FOUND => {
                "City not found! Please check the spelling.".to_string()
            }
            other => {
                let text = other.to_string();
                if text.contains("not found") {
                    "City not found! Please check the spelling.".to_string()
                } else {
                    format!("Error: {text}")
                }
            }
        }
    }
}
