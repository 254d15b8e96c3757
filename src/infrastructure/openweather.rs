use crate::domain::ports::WeatherProvider;
use crate::domain::weather::WeatherReport;
use crate::error::{PortfolioError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_CITY: &str = "Halifax";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub city: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            city: DEFAULT_CITY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl WeatherConfig {
    /// The configured key, or `None` when it is absent or blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }
}

impl fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("city", &self.city)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    name: String,
    main: MainReadings,
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

/// Current-conditions client for the OpenWeatherMap API.
///
/// Requests are bounded by the configured timeout and never retried.
pub struct OpenWeatherClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenWeatherClient {
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key()
            .ok_or(PortfolioError::MissingConfig("WEATHER_API_KEY"))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self) -> Result<WeatherReport> {
        let api_key = self.api_key()?;
        let url = format!(
            "{}/data/2.5/weather",
            self.config.base_url.trim_end_matches('/')
        );

        debug!(city = %self.config.city, "requesting current weather");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", self.config.city.as_str()),
                ("appid", api_key),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortfolioError::Upstream(format!(
                "weather provider returned HTTP {}",
                status.as_u16()
            )));
        }

        let payload: CurrentWeather = response.json().await?;
        let condition = payload
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| PortfolioError::Upstream("response has no weather conditions".into()))?;

        Ok(WeatherReport {
            city: payload.name,
            temperature: payload.main.temp,
            humidity: payload.main.humidity,
            condition: condition.description,
        })
    }
}
