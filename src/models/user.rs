//! Modelo de usuario de la API
//!
//! Los usuarios viven en una colección JSON de solo lectura y se
//! identifican por API key. Cada usuario trae su configuración de
//! rate limiting.

use serde::{Deserialize, Serialize};

/// Configuración de rate limiting por usuario
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateConfig {
    #[serde(default = "default_limit_per_minute")]
    pub limit_per_minute: u32,
    #[serde(default = "default_block_minutes")]
    pub block_minutes: u32,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            limit_per_minute: default_limit_per_minute(),
            block_minutes: default_block_minutes(),
        }
    }
}

fn default_limit_per_minute() -> u32 {
    60
}

fn default_block_minutes() -> u32 {
    3
}

/// Usuario autenticable por API key
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub api_key: String,
    #[serde(default)]
    pub rate: RateConfig,
}
