use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Icon CDN for current-weather conditions, keyed by the icon code from
/// `/weather`. Forecast icons arrive as ready-made URLs and bypass this.
pub const ICON_CDN_BASE: &str = "https://openweathermap.org/img/wn";

/// Local-time format used by the forecast `hour[].time` field.
const HOUR_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Current conditions as returned by `/weather` (OpenWeather-shaped).
///
/// Fields the service is known to omit for some locations are optional;
/// the derivations below fall back instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeatherReport {
    pub name: Option<String>,
    pub coord: Option<Coordinates>,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    pub main: MainMetrics,
    pub wind: Wind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherCondition {
    #[serde(default)]
    pub icon: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainMetrics {
    pub temp: f64,
    pub pressure: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wind {
    /// Speed in the service's source units (m/s); converted for display only.
    pub speed: f64,
}

impl CurrentWeatherReport {
    /// City name, falling back to the raw query when the service omits it.
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => fallback,
        }
    }

    /// Wind speed converted to kph with one decimal, e.g. `18.0kph`.
    pub fn wind_kph_display(&self) -> String {
        format!("{:.1}kph", self.wind.speed * 3.6)
    }
}

/// Response envelope of `/forecast` (WeatherAPI-shaped).
///
/// `forecast` and `forecastday` are optional so that a 2xx body missing
/// them surfaces as a shape-validation failure rather than a parse error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub forecast: Option<Forecast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub forecastday: Option<Vec<ForecastDay>>,
}

impl ForecastResponse {
    /// Extract the forecast-day list, or `None` when the nested
    /// `forecast.forecastday` is absent or empty.
    pub fn into_days(self) -> Option<Vec<ForecastDay>> {
        self.forecast
            .and_then(|f| f.forecastday)
            .filter(|days| !days.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub day: DayMetrics,
    /// Hourly breakdown; only populated for day 0, feeds the summary graph.
    #[serde(default)]
    pub hour: Vec<HourSample>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayMetrics {
    pub avgtemp_c: f64,
    pub avghumidity: f64,
    pub maxwind_kph: f64,
    pub condition: ForecastCondition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastCondition {
    pub icon: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourSample {
    pub time: String,
    pub temp_c: f64,
}

impl HourSample {
    /// Hour-of-day of the sample's local timestamp, if it parses.
    pub fn local_hour(&self) -> Option<u32> {
        NaiveDateTime::parse_from_str(&self.time, HOUR_TIME_FORMAT)
            .ok()
            .map(|dt| dt.hour())
    }

    /// The `HH:MM` portion of the timestamp, for axis labels.
    pub fn clock_label(&self) -> &str {
        self.time.rsplit(' ').next().unwrap_or(&self.time)
    }
}

impl ForecastDay {
    /// Samples feeding the summary graph: local hours divisible by 3
    /// (0, 3, ..., 21), in original order. 24 hourly samples yield 8.
    pub fn graph_samples(&self) -> Vec<&HourSample> {
        self.hour
            .iter()
            .filter(|sample| sample.local_hour().is_some_and(|h| h % 3 == 0))
            .collect()
    }
}

/// One recent-search entry, derived from a successful fetch rather than
/// returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub icon: String,
    pub city: String,
    pub condition: String,
}

impl HistoryEntry {
    pub fn derive(report: &CurrentWeatherReport, query: &str) -> Self {
        let first = report.weather.first();
        Self {
            icon: icon_url(first.map_or("", |c| c.icon.as_str())),
            city: report.display_name(query).to_string(),
            condition: first
                .and_then(|c| c.description.clone())
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }
}

/// CDN URL for a current-weather icon code.
pub fn icon_url(code: &str) -> String {
    format!("{ICON_CDN_BASE}/{code}@2x.png")
}
