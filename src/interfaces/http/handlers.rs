use super::AppState;
use super::response::{ApiError, Operation, SubmitResponse};
use crate::domain::submission::{ContactRequest, Submission};
use crate::domain::weather::WeatherReport;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::{Value, json};

pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn weather(State(state): State<AppState>) -> Result<Json<WeatherReport>, ApiError> {
    let report = state
        .weather
        .current()
        .await
        .map_err(ApiError::failed(Operation::FetchWeather))?;
    Ok(Json(report))
}

pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let Json(request) = payload.map_err(ApiError::MalformedBody)?;
    state
        .contact
        .submit(request)
        .await
        .map_err(ApiError::failed(Operation::StoreMessage))?;

    Ok(Json(SubmitResponse {
        success: true,
        message: "Message saved!".to_string(),
    }))
}

pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<Submission>>, ApiError> {
    let messages = state
        .contact
        .messages()
        .await
        .map_err(ApiError::failed(Operation::LoadMessages))?;
    Ok(Json(messages))
}
