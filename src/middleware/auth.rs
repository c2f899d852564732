//! Middleware de autenticación y rate limiting
//!
//! Este módulo es el gate de entrada de la API: valida la API key del
//! header `X-API-Key` contra la colección de usuarios y aplica una
//! ventana fija por minuto por usuario, con bloqueo temporal al exceder
//! el límite. Ninguna request llega a los servicios sin pasar por acá.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use http::Method;
use serde_json::json;
use tokio::sync::RwLock;

use crate::models::user::ApiUser;
use crate::repositories::json_store::RecordStore;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Ventana de rate limiting de un usuario
#[derive(Debug, Clone)]
struct RateWindow {
    bucket: i64,
    count: u32,
    blocked_until: i64,
}

/// Identidad autenticada que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub name: String,
}

/// Estado del gate: usuarios + ventanas de rate limiting en memoria
#[derive(Clone)]
pub struct AuthGate {
    users: Arc<dyn RecordStore<ApiUser>>,
    windows: Arc<RwLock<HashMap<String, RateWindow>>>,
}

impl AuthGate {
    pub fn new(users: Arc<dyn RecordStore<ApiUser>>) -> Self {
        Self {
            users,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Busca el usuario por API key (la colección se relee en cada request)
    pub async fn authenticate(&self, api_key: &str) -> Option<ApiUser> {
        self.users
            .read_all()
            .await
            .into_iter()
            .find(|user| user.api_key == api_key)
    }

    /// Aplica la ventana fija del usuario en el instante `now` (epoch seconds)
    pub async fn check_rate_limit(&self, user: &ApiUser, now: i64) -> Result<(), AppError> {
        let bucket = now.div_euclid(60);
        let mut windows = self.windows.write().await;
        let window = windows.entry(user.user_id.clone()).or_insert(RateWindow {
            bucket,
            count: 0,
            blocked_until: 0,
        });

        // Bloqueo vigente: se responde con el tiempo restante
        if window.blocked_until > now {
            let retry = (window.blocked_until - now) as u64;
            return Err(AppError::RateLimited {
                message: "Rate limit exceeded. Try later.".to_string(),
                retry_after_seconds: retry,
                details: Some(json!({ "retryAfterSeconds": retry })),
            });
        }

        // Minuto nuevo: la ventana arranca de cero
        if window.bucket != bucket {
            window.bucket = bucket;
            window.count = 0;
        }

        window.count += 1;

        if window.count > user.rate.limit_per_minute {
            let block_seconds = i64::from(user.rate.block_minutes) * 60;
            window.blocked_until = now + block_seconds;
            log::warn!(
                "⛔ Usuario {} excedió el límite, bloqueado {} minutos",
                user.user_id,
                user.rate.block_minutes
            );
            return Err(AppError::RateLimited {
                message: "Rate limit exceeded. Blocked temporarily.".to_string(),
                retry_after_seconds: block_seconds as u64,
                details: Some(json!({ "blockedForMinutes": user.rate.block_minutes })),
            });
        }

        Ok(())
    }
}

/// Middleware del gate: API key + rate limit antes de cualquier servicio
pub async fn auth_rate_limit_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // El preflight CORS no pasa por el gate
    if request.method() == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let api_key = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .trim()
        .to_string();

    if api_key.is_empty() {
        return Err(AppError::Unauthorized("Missing X-API-Key header.".to_string()));
    }

    let user = state
        .auth
        .authenticate(&api_key)
        .await
        .ok_or_else(|| AppError::Unauthorized("Invalid API key.".to_string()))?;

    state
        .auth
        .check_rate_limit(&user, Utc::now().timestamp())
        .await?;

    let authenticated = AuthenticatedUser {
        name: user.name.clone().unwrap_or_else(|| user.user_id.clone()),
        user_id: user.user_id,
    };
    request.extensions_mut().insert(authenticated);

    Ok(next.run(request).await)
}
