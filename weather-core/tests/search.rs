//! End-to-end searches against mocked Open-Meteo endpoints.

use std::sync::Mutex;

use weather_core::{
    Config, ForecastClient, GeocodingClient, Orchestrator, SearchState, Severity, View,
    WeatherCard, clients_from_config,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct LastFrame {
    status: Mutex<Option<(String, Severity)>>,
    visible: Mutex<bool>,
    card: Mutex<Option<WeatherCard>>,
}

impl View for LastFrame {
    fn render(&self, card: &WeatherCard) {
        *self.card.lock().unwrap() = Some(card.clone());
    }

    fn set_status(&self, text: &str, severity: Severity) {
        *self.status.lock().unwrap() = Some((text.to_string(), severity));
    }

    fn set_visible(&self, visible: bool) {
        *self.visible.lock().unwrap() = visible;
    }
}

fn search_for(server: &MockServer) -> Orchestrator<GeocodingClient, ForecastClient> {
    let config = Config {
        geocoding_url: Some(server.uri()),
        forecast_url: Some(server.uri()),
        ..Config::default()
    };
    let (geocoder, weather) = clients_from_config(&config);
    Orchestrator::new(geocoder, weather)
}

#[tokio::test]
async fn sao_paulo_is_displayed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "São Paulo"))
        .and(query_param("language", "pt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{
                "name": "São Paulo",
                "admin1": "SP",
                "country": "Brazil",
                "latitude": -23.5475,
                "longitude": -46.63611,
                "timezone": "America/Sao_Paulo"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("timezone", "America/Sao_Paulo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "timezone": "America/Sao_Paulo",
            "current": {
                "time": "2024-05-01T14:30",
                "temperature_2m": 21.6,
                "apparent_temperature": 21.1,
                "relative_humidity_2m": 70,
                "pressure_msl": 1012.8,
                "precipitation": 1.26,
                "cloud_cover": 88,
                "weather_code": 3,
                "wind_speed_10m": 14.5,
                "wind_direction_10m": 90
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let search = search_for(&server);
    let view = LastFrame::default();

    let state = search.submit("São Paulo", &view).await;

    assert!(matches!(state, SearchState::Displaying(_)), "got {state:?}");
    let card = view.card.lock().unwrap().clone().unwrap();
    assert_eq!(card.location, "São Paulo, SP - Brazil");
    assert_eq!(card.observed_at, "01/05 14:30");
    assert_eq!(card.temperature, "22°C");
    assert_eq!(card.condition, "Nublado");
    assert_eq!(card.wind, "15 km/h (90°)");
    assert_eq!(card.precipitation, "1 mm");
    assert!(*view.visible.lock().unwrap());
    assert_eq!(
        view.status.lock().unwrap().clone(),
        Some((String::new(), Severity::Info))
    );
}

#[tokio::test]
async fn no_results_shows_not_found_and_skips_weather() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "generationtime_ms": 0.3 })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let search = search_for(&server);
    let view = LastFrame::default();

    let state = search.submit("Cidade Inexistente", &view).await;

    assert_eq!(
        state,
        SearchState::Failed("Cidade não encontrada: Cidade Inexistente".into())
    );
    let (status, severity) = view.status.lock().unwrap().clone().unwrap();
    assert!(status.contains("não encontrada"));
    assert_eq!(severity, Severity::Error);
    assert!(!*view.visible.lock().unwrap());
    assert!(view.card.lock().unwrap().is_none());
}

#[tokio::test]
async fn forecast_outage_is_reported_as_network_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{ "name": "Recife", "latitude": -8.05, "longitude": -34.9 }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let search = search_for(&server);
    let view = LastFrame::default();

    let state = search.submit("Recife", &view).await;

    let SearchState::Failed(message) = state else {
        panic!("expected failure, got {state:?}");
    };
    assert!(message.starts_with("Falha de rede"), "{message}");
    assert!(message.contains("503"), "{message}");
    assert!(!*view.visible.lock().unwrap());
}
