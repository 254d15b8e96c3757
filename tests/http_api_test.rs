mod common;

use common::{StubWeather, halifax, spawn_app};
use portfolio_api::application::contact::ContactService;
use portfolio_api::config::{DEFAULT_ROUTE_PREFIX, ListOrder};
use portfolio_api::domain::submission::Submission;
use portfolio_api::domain::weather::WeatherReport;
use portfolio_api::infrastructure::in_memory::InMemoryMessageStore;
use portfolio_api::infrastructure::json_file::JsonFileMessageStore;
use portfolio_api::infrastructure::openweather::{OpenWeatherClient, WeatherConfig};
use portfolio_api::interfaces::http::AppState;
use portfolio_api::interfaces::http::response::{ErrorBody, SubmitResponse};
use reqwest::StatusCode;
use serde_json::json;

fn memory_state(order: ListOrder, weather: Option<WeatherReport>) -> AppState {
    AppState::new(
        ContactService::new(Box::new(InMemoryMessageStore::new()), order),
        Box::new(StubWeather(weather)),
    )
}

fn api(base: &str, path: &str) -> String {
    format!("{base}{DEFAULT_ROUTE_PREFIX}{path}")
}

fn valid_body(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "email": "jane@example.com",
        "subject": "Hello There",
        "message": "Hi",
        "consent": true
    })
}

#[tokio::test]
async fn test_contact_round_trip() {
    let base = spawn_app(memory_state(ListOrder::Oldest, None), DEFAULT_ROUTE_PREFIX).await;
    let client = reqwest::Client::new();

    for name in ["Ada Lovelace", "Grace Hopper"] {
        let response = client
            .post(api(&base, "/contact"))
            .json(&valid_body(name))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: SubmitResponse = response.json().await.unwrap();
        assert!(body.success);
        assert_eq!(body.message, "Message saved!");
    }

    let messages: Vec<Submission> = client
        .get(api(&base, "/messages"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = messages.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Ada Lovelace", "Grace Hopper"]);

    // GET /contact is an alias of /messages.
    let alias: Vec<Submission> = client
        .get(api(&base, "/contact"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(alias, messages);
}

#[tokio::test]
async fn test_newest_first_listing() {
    let base = spawn_app(memory_state(ListOrder::Newest, None), DEFAULT_ROUTE_PREFIX).await;
    let client = reqwest::Client::new();

    for name in ["Ada", "Grace"] {
        client
            .post(api(&base, "/contact"))
            .json(&valid_body(name))
            .send()
            .await
            .unwrap();
    }

    let messages: Vec<Submission> = client
        .get(api(&base, "/messages"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(messages[0].name, "Grace");
    assert_eq!(messages[1].name, "Ada");
}

#[tokio::test]
async fn test_invalid_submission_returns_field_errors() {
    let base = spawn_app(memory_state(ListOrder::Oldest, None), DEFAULT_ROUTE_PREFIX).await;
    let client = reqwest::Client::new();

    let response = client
        .post(api(&base, "/contact"))
        .json(&json!({
            "name": "Jane3",
            "email": "bad-email",
            "subject": "Hello",
            "message": "<script>",
            "consent": false
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = response.json().await.unwrap();
    let fields = body.fields.expect("field errors");
    assert_eq!(fields.len(), 4);
    assert_eq!(fields["email"], "Invalid email");

    let messages: Vec<Submission> = client
        .get(api(&base, "/messages"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(messages.is_empty());
}

#[tokio::test]
async fn test_missing_fields_and_bad_json_are_400() {
    let base = spawn_app(memory_state(ListOrder::Oldest, None), DEFAULT_ROUTE_PREFIX).await;
    let client = reqwest::Client::new();

    let response = client
        .post(api(&base, "/contact"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.fields.unwrap().len(), 5);

    let response = client
        .post(api(&base, "/contact"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Invalid request body");
    assert!(body.fields.is_none());

    let mut wrong_type = valid_body("Jane Doe");
    wrong_type["consent"] = json!("yes");
    let response = client
        .post(api(&base, "/contact"))
        .json(&wrong_type)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_weather_success_and_failure() {
    let client = reqwest::Client::new();

    let base = spawn_app(memory_state(ListOrder::Oldest, Some(halifax())), DEFAULT_ROUTE_PREFIX).await;
    let response = client.get(api(&base, "/weather")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let report: WeatherReport = response.json().await.unwrap();
    assert_eq!(report, halifax());

    let base = spawn_app(memory_state(ListOrder::Oldest, None), DEFAULT_ROUTE_PREFIX).await;
    let response = client.get(api(&base, "/weather")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Failed to fetch weather data");
}

#[tokio::test]
async fn test_weather_without_key_reports_configuration() {
    let weather = OpenWeatherClient::new(WeatherConfig::default()).unwrap();
    let state = AppState::new(
        ContactService::new(Box::new(InMemoryMessageStore::new()), ListOrder::Oldest),
        Box::new(weather),
    );
    let base = spawn_app(state, "/").await;

    let response = reqwest::get(format!("{base}/weather")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Weather service is not configured");
}

#[tokio::test]
async fn test_corrupt_file_store_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.json");
    let store = JsonFileMessageStore::open(&path).unwrap();
    std::fs::write(&path, "not json").unwrap();

    let state = AppState::new(
        ContactService::new(Box::new(store), ListOrder::Oldest),
        Box::new(StubWeather(None)),
    );
    let base = spawn_app(state, "api").await;
    let client = reqwest::Client::new();

    let response = client.get(format!("{base}/api/messages")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Failed to load messages");

    let response = client
        .post(format!("{base}/api/contact"))
        .json(&valid_body("Jane Doe"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Failed to store message");
    assert!(!body.error.contains("messages.json"));
}

#[tokio::test]
async fn test_healthz_and_unknown_route() {
    let base = spawn_app(memory_state(ListOrder::Oldest, None), DEFAULT_ROUTE_PREFIX).await;

    let response = reqwest::get(api(&base, "/healthz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    // Routes only exist under the prefix.
    let response = reqwest::get(format!("{base}/messages")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
