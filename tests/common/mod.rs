use async_trait::async_trait;
use portfolio_api::domain::ports::WeatherProvider;
use portfolio_api::domain::submission::{ContactRequest, NewSubmission};
use portfolio_api::domain::weather::WeatherReport;
use portfolio_api::error::{PortfolioError, Result};
use portfolio_api::interfaces::http::{AppState, router};

pub fn contact_request(name: &str) -> ContactRequest {
    ContactRequest {
        name: Some(name.to_string()),
        email: Some("jane@example.com".to_string()),
        subject: Some("Hello There".to_string()),
        message: Some("Hi".to_string()),
        consent: Some(true),
    }
}

pub fn entry(name: &str) -> NewSubmission {
    NewSubmission::try_from(contact_request(name)).expect("fixture should be valid")
}

/// Weather provider returning a fixed report, or an upstream failure when `None`.
pub struct StubWeather(pub Option<WeatherReport>);

#[async_trait]
impl WeatherProvider for StubWeather {
    async fn current(&self) -> Result<WeatherReport> {
        self.0
            .clone()
            .ok_or_else(|| PortfolioError::Upstream("stub provider offline".to_string()))
    }
}

pub fn halifax() -> WeatherReport {
    WeatherReport {
        city: "Halifax".to_string(),
        temperature: 12.5,
        humidity: 81,
        condition: "light rain".to_string(),
    }
}

/// Serves the router on an ephemeral port and returns its base URL.
pub async fn spawn_app(state: AppState, prefix: &str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(state, prefix);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
