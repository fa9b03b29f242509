//! Text rendering of the dashboard.
//!
//! Every function here reads the dashboard state (or a piece of it) and
//! produces text; nothing in this module mutates anything. The only input
//! besides the state is the wall clock shown on the conditions card.

use std::fmt::Write as _;

use skycast_core::{CurrentWeatherReport, DashboardState, ForecastDay, SearchHistory};

const GRAPH_BAR_WIDTH: f64 = 24.0;

/// Render the whole dashboard from the current state.
pub fn render_dashboard(state: &DashboardState) -> String {
    let Some(report) = &state.report else {
        return "No weather data yet. Search for a city to get started.".to_string();
    };

    let mut out = String::new();
    out.push_str(&render_report(report, &state.query));
    out.push_str(&render_history(&state.history));
    out.push_str(&render_forecast(&state.forecast));
    if let Some(today) = state.forecast.first() {
        out.push_str(&render_graph(today));
    }
    out
}

/// Current-conditions card.
fn render_report(report: &CurrentWeatherReport, query: &str) -> String {
    let description = report
        .weather
        .first()
        .and_then(|c| c.description.as_deref())
        .unwrap_or("N/A");

    let now = chrono::Local::now();

    let mut out = String::new();
    let _ = writeln!(out, "Current Weather — {}", report.display_name(query));
    let _ = writeln!(out, "  {}  {}", now.format("%H:%M"), now.format("%d/%m"));
    let _ = writeln!(out, "  {description}");
    let _ = writeln!(out, "  Temperature: {}°C", report.main.temp);
    let _ = writeln!(out, "  Pressure:    {}hPa", report.main.pressure);
    let _ = writeln!(out, "  Humidity:    {}%", report.main.humidity);
    let _ = writeln!(out, "  Wind:        {}", report.wind_kph_display());
    if let Some(coord) = &report.coord {
        if let (Some(lat), Some(lon)) = (coord.lat, coord.lon) {
            let _ = writeln!(out, "  Location:    {lat}, {lon}");
        }
    }
    out
}

/// Recent searches, most recent first.
fn render_history(history: &SearchHistory) -> String {
    let mut out = String::from("\nHistory\n");
    if history.is_empty() {
        out.push_str("  No recent searches\n");
        return out;
    }
    for entry in history.entries() {
        let _ = writeln!(out, "  {} — {}  ({})", entry.city, entry.condition, entry.icon);
    }
    out
}

/// Forecast table for the upcoming days. Day 0 is today and is covered by
/// the summary graph instead.
fn render_forecast(days: &[ForecastDay]) -> String {
    let mut out = String::from("\nForecast\n");
    for day in days.iter().skip(1) {
        let _ = writeln!(
            out,
            "  {}  {:<12} {:>5}°C  {:>3}% humidity  {}kph wind",
            day.date,
            day.day.condition.text,
            day.day.avgtemp_c,
            day.day.avghumidity,
            day.day.maxwind_kph,
        );
    }
    out
}

/// Temperature graph over today's 3-hourly samples.
fn render_graph(today: &ForecastDay) -> String {
    let samples = today.graph_samples();
    if samples.is_empty() {
        return String::new();
    }

    let min = samples.iter().map(|s| s.temp_c).fold(f64::INFINITY, f64::min);
    let max = samples.iter().map(|s| s.temp_c).fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    let mut out = String::new();
    let _ = writeln!(out, "\nSummary Graph — {} (every 3h)", today.date);
    for sample in samples {
        let scaled = if span > 0.0 {
            ((sample.temp_c - min) / span * GRAPH_BAR_WIDTH).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "  {}  {:>5.1}°C  {}",
            sample.clock_label(),
            sample.temp_c,
            "#".repeat(scaled + 1),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use skycast_core::{HistoryEntry, SearchEvent};

    use super::*;

    fn paris_state() -> DashboardState {
        let report: CurrentWeatherReport = serde_fixture(serde_json::json!({
            "name": "Paris",
            "weather": [{"icon": "01d", "description": "clear sky"}],
            "main": {"temp": 20, "pressure": 1012, "humidity": 40},
            "wind": {"speed": 5},
            "coord": {"lat": 48.85, "lon": 2.35}
        }));
        let days: Vec<ForecastDay> = serde_fixture(serde_json::json!([
            {
                "date": "2026-08-25",
                "day": {
                    "avgtemp_c": 21.0, "avghumidity": 55.0, "maxwind_kph": 12.0,
                    "condition": {"icon": "//cdn/sunny.png", "text": "Sunny"}
                },
                "hour": (0..24).map(|h| serde_json::json!({
                    "time": format!("2026-08-25 {h:02}:00"),
                    "temp_c": 15.0 + f64::from(h) * 0.5
                })).collect::<Vec<_>>()
            },
            {
                "date": "2026-08-26",
                "day": {
                    "avgtemp_c": 19.0, "avghumidity": 60.0, "maxwind_kph": 15.0,
                    "condition": {"icon": "//cdn/rain.png", "text": "Rain"}
                }
            }
        ]));

        let mut state = DashboardState::default();
        state.apply(SearchEvent::Started { seq: 1, query: "Paris".to_string() });
        state.apply(SearchEvent::Completed { seq: 1, report, days });
        state
    }

    fn serde_fixture<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
        serde_json::from_value(value).expect("fixture must deserialize")
    }

    #[test]
    fn dashboard_shows_wind_in_kph_and_city_name() {
        let rendered = render_dashboard(&paris_state());
        assert!(rendered.contains("Current Weather — Paris"));
        assert!(rendered.contains("18.0kph"));
        assert!(rendered.contains("1012hPa"));
    }

    #[test]
    fn forecast_table_skips_today() {
        let rendered = render_dashboard(&paris_state());
        assert!(rendered.contains("2026-08-26"));
        assert!(!rendered.contains("2026-08-25  Sunny"));
    }

    #[test]
    fn graph_renders_one_row_per_three_hourly_sample() {
        let rendered = render_dashboard(&paris_state());
        let graph = rendered
            .split("Summary Graph")
            .nth(1)
            .expect("graph section present");
        let rows = graph.lines().filter(|line| line.contains("°C")).count();
        assert_eq!(rows, 8);
        assert!(graph.contains("00:00"));
        assert!(graph.contains("21:00"));
    }

    #[test]
    fn history_section_lists_entries_or_placeholder() {
        let rendered = render_dashboard(&paris_state());
        assert!(rendered.contains("Paris — clear sky"));

        let history = SearchHistory::default();
        assert!(render_history(&history).contains("No recent searches"));

        let mut history = SearchHistory::default();
        history.record(HistoryEntry {
            icon: "icon-url".to_string(),
            city: "Delhi".to_string(),
            condition: "haze".to_string(),
        });
        let rendered = render_history(&history);
        assert!(rendered.contains("Delhi — haze"));
    }

    #[test]
    fn empty_state_renders_a_hint() {
        let state = DashboardState::default();
        assert!(render_dashboard(&state).contains("Search for a city"));
    }
}
