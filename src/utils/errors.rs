//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión al envelope JSON uniforme de la API:
//! `{code, message, details}`.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{message}")]
    InvalidRequest {
        message: String,
        details: Option<Value>,
    },

    #[error("{message}")]
    NotFound {
        message: String,
        details: Option<Value>,
    },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{message}")]
    RateLimited {
        message: String,
        retry_after_seconds: u64,
        details: Option<Value>,
    },

    #[error("{message}")]
    GraphHopper {
        message: String,
        details: Option<Value>,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Envelope de error de la API
///
/// `details` se serializa siempre, como `null` cuando no hay detalles.
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    code: String,
    message: String,
    details: Option<Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details, retry_after) = match self {
            AppError::InvalidRequest { message, details } => {
                (StatusCode::BAD_REQUEST, "invalid_request", message, details, None)
            }

            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details, None)
            }

            AppError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", message, None, None)
            }

            AppError::RateLimited {
                message,
                retry_after_seconds,
                details,
            } => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                message,
                details,
                Some(retry_after_seconds),
            ),

            AppError::GraphHopper { message, details } => {
                (StatusCode::BAD_GATEWAY, "graphhopper_error", message, details, None)
            }

            AppError::Storage(e) => {
                log::error!("❌ Storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "server_error",
                    "An unexpected error occurred".to_string(),
                    Some(json!({ "io_error": e.to_string() })),
                    None,
                )
            }

            AppError::Internal(msg) => {
                log::error!("❌ Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "server_error",
                    "An unexpected error occurred".to_string(),
                    Some(json!({ "internal_error": msg })),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            code: code.to_string(),
            message,
            details,
        };

        let mut response = (status, Json(body)).into_response();

        if let Some(seconds) = retry_after {
            if let Ok(value) = header::HeaderValue::from_str(&seconds.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        response
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Helper para errores de solicitud inválida
pub fn invalid_request_error(message: &str, details: Option<Value>) -> AppError {
    AppError::InvalidRequest {
        message: message.to_string(),
        details,
    }
}

/// Helper para errores de recurso no encontrado
pub fn not_found_error(message: &str, details: Option<Value>) -> AppError {
    AppError::NotFound {
        message: message.to_string(),
        details,
    }
}
