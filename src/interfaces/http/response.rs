use crate::domain::validation::ValidationErrors;
use crate::error::{ErrorCategory, PortfolioError};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<ValidationErrors>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchWeather,
    StoreMessage,
    LoadMessages,
}

impl Operation {
    fn failure_message(self, category: ErrorCategory) -> &'static str {
        match (self, category) {
            (_, ErrorCategory::Configuration) => "Weather service is not configured",
            (Operation::FetchWeather, _) => "Failed to fetch weather data",
            (Operation::StoreMessage, _) => "Failed to store message",
            (Operation::LoadMessages, _) => "Failed to load messages",
        }
    }
}

/// Maps failures to client-facing responses.
///
/// Validation failures carry their per-field messages; everything else is
/// logged in full and answered with a generic message.
#[derive(Debug)]
pub enum ApiError {
    Failed {
        operation: Operation,
        source: PortfolioError,
    },
    MalformedBody(JsonRejection),
}

impl ApiError {
    pub fn failed(operation: Operation) -> impl FnOnce(PortfolioError) -> Self {
        move |source| ApiError::Failed { operation, source }
    }
}

// Serde's messages can quote submitted values, so only the rejection kind is logged.
fn rejection_kind(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::JsonDataError(_) => "data",
        JsonRejection::JsonSyntaxError(_) => "syntax",
        JsonRejection::MissingJsonContentType(_) => "content-type",
        JsonRejection::BytesRejection(_) => "body",
        _ => "other",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MalformedBody(rejection) => {
                warn!(
                    status = rejection.status().as_u16(),
                    kind = rejection_kind(&rejection),
                    "rejected malformed request body"
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        error: "Invalid request body".to_string(),
                        fields: None,
                    },
                )
            }
            ApiError::Failed {
                source: PortfolioError::Validation(fields),
                ..
            } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Validation failed".to_string(),
                    fields: Some(fields),
                },
            ),
            ApiError::Failed { operation, source } => {
                error!(?operation, error = %source, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: operation.failure_message(source.category()).to_string(),
                        fields: None,
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
