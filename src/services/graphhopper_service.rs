//! Cliente del motor de routing GraphHopper
//!
//! Este módulo encapsula la llamada HTTP al motor externo: arma la URL,
//! acota los timeouts y normaliza los fallos de transporte, de status y
//! de forma en un único error 502 con el payload crudo para diagnóstico.

use serde_json::{json, Value};

use crate::utils::errors::AppError;

/// Timeout de conexión y total hacia el motor, en segundos
const ENGINE_TIMEOUT_SECONDS: u64 = 20;

/// Path `paths[0]` ya extraído de la respuesta del motor
#[derive(Debug, Clone)]
pub struct EnginePath {
    pub distance_meters: f64,
    pub time_millis: i64,
    pub points: Value,
}

#[derive(Clone)]
pub struct GraphHopperService {
    base_url: String,
    client: reqwest::Client,
}

impl GraphHopperService {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(ENGINE_TIMEOUT_SECONDS))
            .connect_timeout(std::time::Duration::from_secs(ENGINE_TIMEOUT_SECONDS))
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }

    /// Pide una ruta al motor para la secuencia de puntos `(lat, lon)`.
    ///
    /// Un solo intento: cualquier fallo de transporte, status no-2xx o
    /// respuesta sin `paths[0]` termina en `graphhopper_error`.
    pub async fn route(
        &self,
        points: &[(f64, f64)],
        vehicle: &str,
        points_encoded: bool,
    ) -> Result<EnginePath, AppError> {
        let mut qs: Vec<String> = points
            .iter()
            .map(|(lat, lon)| format!("point={}", urlencoding::encode(&format!("{},{}", lat, lon))))
            .collect();
        qs.push(format!("profile={}", urlencoding::encode(vehicle)));
        qs.push("instructions=false".to_string());
        qs.push("calc_points=true".to_string());
        qs.push(format!("points_encoded={}", points_encoded));

        let url = format!("{}/route?{}", self.base_url, qs.join("&"));
        log::info!("🌐 GraphHopper request: {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::error!("❌ GraphHopper unreachable: {}", e);
                return Err(engine_error(json!({
                    "status": 0,
                    "graphhopper": { "error": e.to_string() },
                })));
            }
        };

        let status = response.status();
        log::info!("📡 GraphHopper response status: {}", status);

        let raw = response.text().await.unwrap_or_default();
        let body: Value = serde_json::from_str(&raw).unwrap_or(Value::Null);

        let path = match body.get("paths").and_then(|paths| paths.get(0)) {
            Some(path) if status.is_success() => path,
            _ => {
                log::error!("❌ GraphHopper error, status {}: {}", status, raw);
                let graphhopper = if body.is_null() {
                    json!({ "error": "invalid_json_from_graphhopper", "raw": raw })
                } else {
                    body.clone()
                };
                return Err(engine_error(json!({
                    "status": status.as_u16(),
                    "graphhopper": graphhopper,
                })));
            }
        };

        Ok(EnginePath {
            distance_meters: path.get("distance").and_then(Value::as_f64).unwrap_or(0.0),
            time_millis: path.get("time").and_then(Value::as_i64).unwrap_or(0),
            points: path.get("points").cloned().unwrap_or(Value::Null),
        })
    }
}

fn engine_error(details: Value) -> AppError {
    AppError::GraphHopper {
        message: "GraphHopper returned an error.".to_string(),
        details: Some(details),
    }
}
