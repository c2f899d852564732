//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno: servidor, CORS,
//! motor de routing y ubicación de los archivos de datos. Las rutas de
//! archivo se inyectan en los servicios vía esta config, nunca
//! hardcodeadas, para poder usar dobles en los tests.

use std::env;
use std::path::PathBuf;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub graphhopper_url: String,
    pub pois_file: PathBuf,
    pub routes_file: PathBuf,
    pub users_file: PathBuf,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(3000),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:8081,http://localhost:8082".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            graphhopper_url: env::var("GRAPHHOPPER_URL")
                .unwrap_or_else(|_| "http://graphhopper:8989".to_string()),
            pois_file: env::var("POIS_FILE")
                .unwrap_or_else(|_| "data/pois.json".to_string())
                .into(),
            routes_file: env::var("ROUTES_FILE")
                .unwrap_or_else(|_| "data/routes.json".to_string())
                .into(),
            users_file: env::var("USERS_FILE")
                .unwrap_or_else(|_| "data/users.json".to_string())
                .into(),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
