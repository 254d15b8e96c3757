use clap::Parser;
use miette::{IntoDiagnostic, Result};
use portfolio_api::application::contact::ContactService;
use portfolio_api::config::{DEFAULT_ROUTE_PREFIX, ListOrder, ServerConfig};
use portfolio_api::infrastructure::open_store;
use portfolio_api::infrastructure::openweather::{
    DEFAULT_BASE_URL, DEFAULT_CITY, OpenWeatherClient, WeatherConfig,
};
use portfolio_api::interfaces::http::{AppState, router, serve};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address the HTTP server binds to
    #[arg(long, env = "PORTFOLIO_BIND", default_value = "127.0.0.1:8888")]
    bind: SocketAddr,

    /// JSON file for contact messages (optional). If omitted, messages are kept in memory.
    #[arg(long, env = "PORTFOLIO_MESSAGES_FILE")]
    messages_file: Option<PathBuf>,

    /// Order in which stored messages are listed
    #[arg(long, env = "PORTFOLIO_ORDER", value_enum, default_value_t = ListOrder::Oldest)]
    order: ListOrder,

    /// Path prefix the API routes are mounted under
    #[arg(long, env = "PORTFOLIO_ROUTE_PREFIX", default_value = DEFAULT_ROUTE_PREFIX)]
    route_prefix: String,

    /// OpenWeatherMap API key
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
    weather_api_key: Option<String>,

    /// City reported by the weather endpoint
    #[arg(long, env = "WEATHER_CITY", default_value = DEFAULT_CITY)]
    weather_city: String,

    /// Base URL of the weather provider
    #[arg(long, env = "WEATHER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    weather_base_url: String,

    /// Timeout for a single weather request, in milliseconds
    #[arg(long, env = "WEATHER_TIMEOUT_MS", default_value_t = 5_000)]
    weather_timeout_ms: u64,
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            bind: cli.bind,
            route_prefix: cli.route_prefix,
            storage: cli.messages_file.into(),
            order: cli.order,
            weather: WeatherConfig {
                api_key: cli.weather_api_key,
                city: cli.weather_city,
                base_url: cli.weather_base_url,
                timeout: Duration::from_millis(cli.weather_timeout_ms),
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();
    let config = ServerConfig::from(Cli::parse());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if !config.weather.has_api_key() {
        warn!("WEATHER_API_KEY is not set; /weather will report a configuration error");
    }

    let store = open_store(&config.storage).into_diagnostic()?;
    info!(storage = ?config.storage, order = ?config.order, "message store ready");

    let weather = OpenWeatherClient::new(config.weather).into_diagnostic()?;
    let state = AppState::new(ContactService::new(store, config.order), Box::new(weather));
    let app = router(state, &config.route_prefix);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .into_diagnostic()?;
    serve(listener, app).await.into_diagnostic()?;

    Ok(())
}
