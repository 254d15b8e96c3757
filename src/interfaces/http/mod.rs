//! HTTP surface: weather proxy and contact-form endpoints.

pub mod handlers;
pub mod response;

use crate::application::contact::ContactService;
use crate::config::normalize_prefix;
use crate::domain::ports::{WeatherProvider, WeatherProviderBox};
use axum::Router;
use axum::routing::{get, post};
use std::io;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Shared handler state. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    contact: Arc<ContactService>,
    weather: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub fn new(contact: ContactService, weather: WeatherProviderBox) -> Self {
        Self {
            contact: Arc::new(contact),
            weather: Arc::from(weather),
        }
    }
}

/// Builds the API router mounted under `prefix`.
pub fn router(state: AppState, prefix: &str) -> Router {
    let api = Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/weather", get(handlers::weather))
        .route(
            "/contact",
            post(handlers::submit_contact).get(handlers::list_messages),
        )
        .route("/messages", get(handlers::list_messages))
        .with_state(state);

    match normalize_prefix(prefix).as_str() {
        "/" => api,
        prefix => Router::new().nest(prefix, api),
    }
}

/// Serves `app` on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, app: Router) -> io::Result<()> {
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(e) => {
            error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    }
}
