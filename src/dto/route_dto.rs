//! DTOs de rutas persistidas
//!
//! El payload de creación/reemplazo y el parche parcial llegan como JSON
//! poco tipado; cada endpoint hace aquí su paso de validación explícito y
//! sale con structs tipados. El parche distingue campo ausente de campo
//! presente con valor null.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::models::route::{LineString, PoiSequenceEntry, SavedRoute};
use crate::utils::errors::{invalid_request_error, AppError};
use crate::utils::validation::{normalize_public, validate_line_string};

/// Parámetros crudos de GET /routes
#[derive(Debug, Default, Deserialize)]
pub struct RouteListQuery {
    pub public: Option<String>,
    #[serde(rename = "ownerId")]
    pub owner_id: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Filtro validado de GET /routes
#[derive(Debug)]
pub struct RouteListFilter {
    pub public: Option<bool>,
    pub owner_id: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

impl RouteListQuery {
    pub fn validate(self) -> Result<RouteListFilter, AppError> {
        let public = match &self.public {
            Some(raw) => match normalize_public(raw) {
                Some(value) => Some(value),
                None => {
                    return Err(invalid_request_error(
                        "public must be a boolean.",
                        Some(json!({ "public": raw })),
                    ))
                }
            },
            None => None,
        };

        let limit = match &self.limit {
            Some(raw) => raw.trim().parse::<i64>().unwrap_or(0),
            None => 50,
        };
        let offset = match &self.offset {
            Some(raw) => raw.trim().parse::<i64>().unwrap_or(-1),
            None => 0,
        };

        if !(1..=500).contains(&limit) {
            return Err(invalid_request_error(
                "Invalid limit. Must be 1..500.",
                Some(json!({ "limit": limit })),
            ));
        }
        if offset < 0 {
            return Err(invalid_request_error(
                "Invalid offset. Must be >= 0.",
                Some(json!({ "offset": offset })),
            ));
        }

        let owner_id = self
            .owner_id
            .map(|owner_id| owner_id.trim().to_string())
            .filter(|owner_id| !owner_id.is_empty());

        Ok(RouteListFilter {
            public,
            owner_id,
            limit: limit as usize,
            offset: offset as usize,
        })
    }
}

/// Modo de parseo del payload completo: POST crea, PUT reemplaza
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PersistMode {
    Create,
    Replace,
}

/// Payload validado de POST /routes y PUT /routes/{id}
#[derive(Debug)]
pub struct RoutePersistRequest {
    pub name: String,
    pub public: bool,
    pub vehicle: Option<String>,
    pub owner_id: Option<String>,
    pub poi_sequence: Vec<PoiSequenceEntry>,
    pub geometry: LineString,
    pub encoded_polyline: Option<String>,
}

impl RoutePersistRequest {
    /// Valida el payload completo.
    ///
    /// En modo Replace los campos requeridos comparten un único mensaje y
    /// `ownerId` se ignora (se preserva el del recurso existente).
    pub fn from_json(payload: &Value, mode: PersistMode) -> Result<Self, AppError> {
        let required = |field_message: &str| -> AppError {
            match mode {
                PersistMode::Create => invalid_request_error(field_message, None),
                PersistMode::Replace => {
                    invalid_request_error("PUT requires name, public, geometry.", None)
                }
            }
        };

        let name = payload
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or("");
        if name.is_empty() {
            return Err(required("name is required."));
        }

        let public = match payload.get("public") {
            Some(Value::Bool(public)) => *public,
            _ => return Err(required("public is required and must be boolean.")),
        };

        let geometry = match payload.get("geometry") {
            Some(geometry) if validate_line_string(geometry) => {
                serde_json::from_value::<LineString>(geometry.clone()).map_err(|_| {
                    required("geometry is required and must be a GeoJSON LineString.")
                })?
            }
            _ => return Err(required("geometry is required and must be a GeoJSON LineString.")),
        };

        let vehicle = parse_optional_string(payload, "vehicle", "vehicle must be string or null.")?;

        let owner_id = match mode {
            PersistMode::Create => {
                parse_optional_string(payload, "ownerId", "ownerId must be string or null.")?
            }
            PersistMode::Replace => None,
        };

        let poi_sequence = match payload.get("poiSequence") {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => serde_json::from_value::<Vec<PoiSequenceEntry>>(value.clone())
                .map_err(|_| {
                    invalid_request_error("poiSequence must be array if provided.", None)
                })?,
        };

        let encoded_polyline = parse_optional_string(
            payload,
            "encodedPolyline",
            "encodedPolyline must be string or null.",
        )?;

        Ok(Self {
            name: name.to_string(),
            public,
            vehicle,
            owner_id,
            poi_sequence,
            geometry,
            encoded_polyline,
        })
    }
}

/// Payload validado de PATCH /routes/{id}
///
/// Cada campo es `Some` solo si vino en el payload; los campos anulables
/// distinguen "poner null" de "no tocar".
#[derive(Debug, Default)]
pub struct RoutePatchRequest {
    pub name: Option<String>,
    pub public: Option<bool>,
    pub vehicle: Option<Option<String>>,
    pub poi_sequence: Option<Vec<PoiSequenceEntry>>,
    pub geometry: Option<LineString>,
    pub encoded_polyline: Option<Option<String>>,
}

impl RoutePatchRequest {
    /// Valida el parche campo a campo, en orden, cortando en el primer fallo
    pub fn from_json(payload: &Value) -> Result<Self, AppError> {
        let mut patch = RoutePatchRequest::default();
        let obj = match payload.as_object() {
            Some(obj) => obj,
            None => return Err(invalid_request_error("Invalid JSON body.", None)),
        };

        if let Some(value) = obj.get("name") {
            let name = value.as_str().map(str::trim).unwrap_or("");
            if name.is_empty() {
                return Err(invalid_request_error("name cannot be empty.", None));
            }
            patch.name = Some(name.to_string());
        }

        if let Some(value) = obj.get("public") {
            match value {
                Value::Bool(public) => patch.public = Some(*public),
                _ => return Err(invalid_request_error("public must be boolean.", None)),
            }
        }

        if let Some(value) = obj.get("vehicle") {
            match value {
                Value::Null => patch.vehicle = Some(None),
                Value::String(vehicle) => patch.vehicle = Some(Some(vehicle.clone())),
                _ => return Err(invalid_request_error("vehicle must be string or null.", None)),
            }
        }

        if let Some(value) = obj.get("poiSequence") {
            let entries = serde_json::from_value::<Vec<PoiSequenceEntry>>(value.clone())
                .map_err(|_| invalid_request_error("poiSequence must be array.", None))?;
            patch.poi_sequence = Some(entries);
        }

        if let Some(value) = obj.get("geometry") {
            if !validate_line_string(value) {
                return Err(invalid_request_error(
                    "geometry must be a GeoJSON LineString.",
                    None,
                ));
            }
            let geometry = serde_json::from_value::<LineString>(value.clone()).map_err(|_| {
                invalid_request_error("geometry must be a GeoJSON LineString.", None)
            })?;
            patch.geometry = Some(geometry);
        }

        if let Some(value) = obj.get("encodedPolyline") {
            match value {
                Value::Null => patch.encoded_polyline = Some(None),
                Value::String(polyline) => patch.encoded_polyline = Some(Some(polyline.clone())),
                _ => {
                    return Err(invalid_request_error(
                        "encodedPolyline must be string or null.",
                        None,
                    ))
                }
            }
        }

        Ok(patch)
    }

    /// Aplica los campos presentes sobre la ruta existente
    pub fn apply(self, route: &mut SavedRoute) {
        if let Some(name) = self.name {
            route.name = name;
        }
        if let Some(public) = self.public {
            route.public = public;
        }
        if let Some(vehicle) = self.vehicle {
            route.vehicle = vehicle;
        }
        if let Some(poi_sequence) = self.poi_sequence {
            route.poi_sequence = poi_sequence;
        }
        if let Some(geometry) = self.geometry {
            route.geometry = geometry;
        }
        if let Some(encoded_polyline) = self.encoded_polyline {
            route.encoded_polyline = encoded_polyline;
        }
    }
}

/// Respuesta de GET /routes
#[derive(Debug, serde::Serialize)]
pub struct RouteListResponse {
    pub count: usize,
    pub results: Vec<SavedRoute>,
}

fn parse_optional_string(
    payload: &Value,
    field: &str,
    message: &str,
) -> Result<Option<String>, AppError> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(invalid_request_error(
            message,
            Some(json!({ field: other })),
        )),
    }
}
