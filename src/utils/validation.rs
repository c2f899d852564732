//! Validación de payloads dinámicos
//!
//! Los cuerpos de request llegan como JSON poco tipado; estos helpers
//! hacen las comprobaciones estructurales compartidas entre endpoints.

use serde_json::Value;

use crate::utils::errors::{invalid_request_error, AppError};

/// Parsea el cuerpo de una request como objeto JSON.
///
/// Quita el BOM UTF-8 si viene; cualquier cosa que no sea un objeto
/// es `invalid_request`.
pub fn read_json_object(body: &str) -> Result<Value, AppError> {
    let body = body.strip_prefix('\u{feff}').unwrap_or(body);

    match serde_json::from_str::<Value>(body) {
        Ok(value) if value.is_object() => Ok(value),
        _ => Err(invalid_request_error("Invalid JSON body.", None)),
    }
}

/// Valida que un valor sea un GeoJSON LineString:
/// `type == "LineString"` y >= 2 pares de coordenadas numéricas `[lon, lat]`.
pub fn validate_line_string(geometry: &Value) -> bool {
    let obj = match geometry.as_object() {
        Some(obj) => obj,
        None => return false,
    };

    if obj.get("type").and_then(Value::as_str) != Some("LineString") {
        return false;
    }

    let coordinates = match obj.get("coordinates").and_then(Value::as_array) {
        Some(coordinates) => coordinates,
        None => return false,
    };

    if coordinates.len() < 2 {
        return false;
    }

    coordinates.iter().all(|point| {
        point
            .as_array()
            .map_or(false, |p| p.len() >= 2 && p[0].is_number() && p[1].is_number())
    })
}

/// Normaliza valores boolean-ish de query string ("true"/"1"/"false"/"0")
pub fn normalize_public(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Interpreta un valor JSON como número, aceptando strings numéricos
pub fn as_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
