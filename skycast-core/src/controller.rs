use tracing::{info, warn};

use crate::{
    client::WeatherApi,
    error::WeatherError,
    history::SearchHistory,
    model::{CurrentWeatherReport, ForecastDay, HistoryEntry},
};

/// The single mutable state container behind the dashboard.
///
/// Presentation reads it through `&DashboardState`; every mutation goes
/// through [`DashboardState::apply`], so the join/validate/commit/rollback
/// logic is testable without any rendering or HTTP in the loop.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// The query of the most recently started submission.
    pub query: String,
    /// A submission is in flight.
    pub loading: bool,
    /// The dashboard (rather than the hero screen) is showing.
    pub visible: bool,
    /// Last successfully fetched current conditions.
    pub report: Option<CurrentWeatherReport>,
    /// Last successfully fetched forecast days; day 0 carries the hourly
    /// breakdown for the summary graph.
    pub forecast: Vec<ForecastDay>,
    /// Bounded recent-search list.
    pub history: SearchHistory,
    latest_seq: u64,
}

/// State transitions of one search submission.
///
/// Each submission carries a monotonically increasing sequence number;
/// completions of a submission that has been superseded by a newer one are
/// discarded, so overlapping searches resolve by invocation order instead
/// of racing on completion order.
#[derive(Debug)]
pub enum SearchEvent {
    Started {
        seq: u64,
        query: String,
    },
    Completed {
        seq: u64,
        report: CurrentWeatherReport,
        days: Vec<ForecastDay>,
    },
    Failed {
        seq: u64,
    },
}

impl DashboardState {
    /// Apply one transition. Pure with respect to everything but `self`.
    pub fn apply(&mut self, event: SearchEvent) {
        match event {
            SearchEvent::Started { seq, query } => {
                self.latest_seq = seq;
                self.query = query;
                self.loading = true;
                self.visible = true;
            }
            SearchEvent::Completed { seq, report, days } => {
                if seq < self.latest_seq {
                    warn!(seq, latest = self.latest_seq, "discarding superseded completion");
                    return;
                }
                self.history.record(HistoryEntry::derive(&report, &self.query));
                self.report = Some(report);
                self.forecast = days;
                self.loading = false;
            }
            SearchEvent::Failed { seq } => {
                if seq < self.latest_seq {
                    warn!(seq, latest = self.latest_seq, "discarding superseded failure");
                    return;
                }
                self.loading = false;
                self.visible = false;
            }
        }
    }
}

/// Orchestrates the search workflow: validate the query, join the two
/// fetches, validate the forecast shape, then commit or roll back.
#[derive(Debug)]
pub struct Controller<W: WeatherApi> {
    client: W,
    forecast_days: u8,
    state: DashboardState,
    next_seq: u64,
}

impl<W: WeatherApi> Controller<W> {
    pub fn new(client: W, forecast_days: u8) -> Self {
        Self { client, forecast_days, state: DashboardState::default(), next_seq: 1 }
    }

    /// Read-only view of the dashboard state for presentation.
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Submit a search.
    ///
    /// An empty or whitespace-only query is rejected before anything is
    /// dispatched and leaves the state untouched. Otherwise both fetches
    /// run concurrently and the operation completes when both have
    /// resolved; on success report, forecast and history are committed as
    /// one update, on any failure the state reverts to the hero view with
    /// report/forecast/history unchanged.
    pub async fn submit(&mut self, raw_query: &str) -> Result<(), WeatherError> {
        let query = raw_query.trim();
        if query.is_empty() {
            return Err(WeatherError::EmptyQuery);
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.state.apply(SearchEvent::Started { seq, query: query.to_string() });

        let (current, forecast) = tokio::join!(
            self.client.fetch_current(query),
            self.client.fetch_forecast(query, self.forecast_days),
        );

        let outcome = current.and_then(|report| forecast.map(|f| (report, f))).and_then(
            |(report, response)| match response.into_days() {
                Some(days) => Ok((report, days)),
                None => Err(WeatherError::Shape(
                    "forecast response is missing forecast.forecastday".to_string(),
                )),
            },
        );

        match outcome {
            Ok((report, days)) => {
                info!(city = report.display_name(query), seq, "search committed");
                self.state.apply(SearchEvent::Completed { seq, report, days });
                Ok(())
            }
            Err(err) => {
                self.state.apply(SearchEvent::Failed { seq });
                Err(err)
            }
        }
    }
}
