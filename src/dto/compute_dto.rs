//! DTOs del cálculo de rutas
//!
//! El payload de POST /routes/compute se valida aquí; la resolución de
//! cada location contra los POIs la hace el controller porque necesita la
//! colección cargada.

use serde::Serialize;
use serde_json::{json, Value};

use crate::models::route::PoiSequenceEntry;
use crate::utils::errors::{invalid_request_error, AppError};

/// Codificación pedida para la geometría resultante
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteFormat {
    GeoJson,
    EncodedPolyline,
}

impl RouteFormat {
    pub fn points_encoded(self) -> bool {
        matches!(self, RouteFormat::EncodedPolyline)
    }
}

/// Payload validado de POST /routes/compute
///
/// Las locations quedan como valores JSON: cada una se resuelve después
/// (poiId o lat/lon) con su índice para poder señalar la entrada inválida.
#[derive(Debug)]
pub struct ComputeRouteRequest {
    pub locations: Vec<Value>,
    pub vehicle: String,
    pub format: RouteFormat,
}

impl ComputeRouteRequest {
    pub fn from_json(payload: &Value) -> Result<Self, AppError> {
        let locations = match payload.get("locations").and_then(Value::as_array) {
            Some(locations) if locations.len() >= 2 => locations.clone(),
            _ => {
                return Err(invalid_request_error(
                    "locations must be an array with at least 2 items.",
                    Some(json!({ "minItems": 2 })),
                ))
            }
        };

        let vehicle = payload
            .get("vehicle")
            .and_then(Value::as_str)
            .unwrap_or("car")
            .to_string();

        let format = match payload.get("format").and_then(Value::as_str).unwrap_or("geojson") {
            "geojson" => RouteFormat::GeoJson,
            "encodedpolyline" => RouteFormat::EncodedPolyline,
            other => {
                return Err(invalid_request_error(
                    "format must be geojson or encodedpolyline.",
                    Some(json!({ "format": other })),
                ))
            }
        };

        Ok(Self {
            locations,
            vehicle,
            format,
        })
    }
}

/// Respuesta de POST /routes/compute
///
/// `geometry` es un objeto LineString o un string de polyline según el
/// formato pedido.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedRouteResponse {
    pub distance_meters: f64,
    pub duration_millis: i64,
    pub geometry: Value,
    pub poi_sequence: Vec<PoiSequenceEntry>,
}
