//! Modelo de Route
//!
//! Este módulo contiene el recurso de ruta persistida y su geometría.
//! El formato en disco y en el wire usa nombres camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geometría GeoJSON LineString: pares `[lon, lat]` (con altitud opcional)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: Vec<Vec<f64>>,
}

/// Entrada de la secuencia de POIs de una ruta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoiSequenceEntry {
    pub poi_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Ruta persistida
///
/// `id` se genera al crear y es inmutable; `updated_at` se refresca en cada
/// mutación y nunca es anterior a `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRoute {
    pub id: String,
    pub name: String,
    pub public: bool,
    pub vehicle: Option<String>,
    pub owner_id: Option<String>,
    pub poi_sequence: Vec<PoiSequenceEntry>,
    pub geometry: LineString,
    pub encoded_polyline: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
