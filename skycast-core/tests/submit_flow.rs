//! End-to-end tests of the search workflow against a mock HTTP proxy:
//! the joint fetch, forecast shape validation, commit/rollback behavior
//! and query-parameter encoding.

use skycast_core::{Controller, HttpWeatherClient, WeatherApi, WeatherError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn current_weather_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Paris",
        "weather": [{"icon": "01d", "description": "clear sky"}],
        "main": {"temp": 20, "pressure": 1012, "humidity": 40},
        "wind": {"speed": 5},
        "coord": {"lat": 48.85, "lon": 2.35}
    })
}

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "forecast": {"forecastday": [
            {
                "date": "2026-08-25",
                "day": {
                    "avgtemp_c": 21.0, "avghumidity": 55.0, "maxwind_kph": 12.0,
                    "condition": {"icon": "//cdn.weatherapi.com/sunny.png", "text": "Sunny"}
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
                    "condition": {"icon": "//cdn.weatherapi.com/rain.png", "text": "Rain"}
                }
            },
            {
                "date": "2026-08-27",
                "day": {
                    "avgtemp_c": 22.0, "avghumidity": 48.0, "maxwind_kph": 9.0,
                    "condition": {"icon": "//cdn.weatherapi.com/cloud.png", "text": "Cloudy"}
                }
            }
        ]}
    })
}

async fn mount_weather(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET")).and(path("/weather")).respond_with(response).mount(server).await;
}

async fn mount_forecast(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET")).and(path("/forecast")).respond_with(response).mount(server).await;
}

async fn happy_server() -> MockServer {
    let server = MockServer::start().await;
    mount_weather(&server, ResponseTemplate::new(200).set_body_json(current_weather_body()))
        .await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_body())).await;
    server
}

fn controller_for(server: &MockServer) -> Controller<HttpWeatherClient> {
    Controller::new(HttpWeatherClient::new(server.uri()), 3)
}

#[tokio::test]
async fn joint_success_commits_report_forecast_and_history() {
    let server = happy_server().await;
    let mut controller = controller_for(&server);

    controller.submit("Paris").await.expect("submit must succeed");

    let state = controller.state();
    assert!(!state.loading);
    assert!(state.visible);

    let report = state.report.as_ref().expect("report committed");
    assert_eq!(report.name.as_deref(), Some("Paris"));
    assert_eq!(report.wind_kph_display(), "18.0kph");

    assert_eq!(state.forecast.len(), 3);
    assert_eq!(state.forecast[0].graph_samples().len(), 8);

    let entry = &state.history.entries()[0];
    assert_eq!(entry.city, "Paris");
    assert_eq!(entry.condition, "clear sky");
    assert_eq!(entry.icon, "https://openweathermap.org/img/wn/01d@2x.png");
}

#[tokio::test]
async fn city_parameter_is_percent_encoded() {
    let server = MockServer::start().await;

    // wiremock decodes before matching, so hitting these mocks proves the
    // multi-word city arrived as a single, properly encoded parameter.
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("city", "New York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("city", "New York"))
        .and(query_param("days", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server);
    controller.submit("New York").await.expect("submit must succeed");
}

#[tokio::test]
async fn not_found_from_weather_rolls_back_and_classifies() {
    let server = MockServer::start().await;
    mount_weather(&server, ResponseTemplate::new(404).set_body_string("city not found")).await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_body())).await;

    let mut controller = controller_for(&server);
    let err = controller.submit("Atlantis").await.unwrap_err();

    assert!(matches!(err, WeatherError::Http { .. }));
    assert!(err.user_message().contains("City not found"));

    let state = controller.state();
    assert!(!state.loading);
    assert!(!state.visible);
    assert_eq!(state.history.len(), 0, "failed search must not enter history");
}

#[tokio::test]
async fn server_error_from_forecast_rolls_back() {
    let server = MockServer::start().await;
    mount_weather(&server, ResponseTemplate::new(200).set_body_json(current_weather_body()))
        .await;
    mount_forecast(&server, ResponseTemplate::new(500).set_body_string("boom")).await;

    let mut controller = controller_for(&server);
    let err = controller.submit("Paris").await.unwrap_err();

    let text = err.to_string();
    assert!(text.starts_with("forecast request"), "got: {text}");
    assert!(text.contains("500"));
    assert!(text.contains("boom"));

    let state = controller.state();
    assert!(!state.loading);
    assert!(!state.visible);
    assert!(state.report.is_none());
    assert!(state.forecast.is_empty());
    assert!(state.history.is_empty());
}

#[tokio::test]
async fn missing_forecastday_in_success_body_is_a_shape_error() {
    let server = MockServer::start().await;
    mount_weather(&server, ResponseTemplate::new(200).set_body_json(current_weather_body()))
        .await;
    mount_forecast(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"location": {}})),
    )
    .await;

    let mut controller = controller_for(&server);
    let err = controller.submit("Paris").await.unwrap_err();

    assert!(matches!(err, WeatherError::Shape(_)));

    let state = controller.state();
    assert!(!state.loading);
    assert!(!state.visible);
    assert!(state.report.is_none());
    assert!(state.history.is_empty());
}

#[tokio::test]
async fn empty_error_body_falls_back_to_status_text() {
    let server = MockServer::start().await;
    mount_weather(&server, ResponseTemplate::new(404)).await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_body())).await;

    let client = HttpWeatherClient::new(server.uri());
    let err = client.fetch_current("Nowhere").await.unwrap_err();

    let text = err.to_string();
    assert!(text.contains("404"));
    assert!(text.contains("Not Found"), "got: {text}");
}
