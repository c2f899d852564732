//! Modelo de POI
//!
//! Los POIs son datos de referencia de solo lectura, sembrados por un
//! proceso externo de carga de datos.

use serde::{Deserialize, Serialize};

/// Coordenadas geográficas de un POI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Punto de interés
///
/// `location` es opcional: los POIs sin coordenadas válidas existen en los
/// datos sembrados y nunca matchean el filtro geográfico.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poi {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
}
