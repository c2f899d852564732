//! DTOs del listado de POIs
//!
//! Los parámetros de query llegan como texto y se validan en un paso
//! explícito que produce el filtro tipado.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::models::poi::Poi;
use crate::utils::errors::{invalid_request_error, AppError};

/// Parámetros crudos de GET /pois
#[derive(Debug, Default, Deserialize)]
pub struct PoiListQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub radius: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Filtro geográfico completo (lat/lon/radius van juntos o no van)
#[derive(Debug, Clone, Copy)]
pub struct GeoFilter {
    pub lat: f64,
    pub lon: f64,
    pub radius_meters: i64,
}

/// Filtro validado de GET /pois
#[derive(Debug)]
pub struct PoiListFilter {
    pub q: Option<String>,
    pub category: Option<String>,
    pub geo: Option<GeoFilter>,
    pub limit: usize,
    pub offset: usize,
}

impl PoiListQuery {
    /// Valida los parámetros y produce el filtro tipado
    pub fn validate(self) -> Result<PoiListFilter, AppError> {
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

        let has_geo = self.lat.is_some() || self.lon.is_some() || self.radius.is_some();
        let geo = if has_geo {
            let (lat_raw, lon_raw, radius_raw) = match (&self.lat, &self.lon, &self.radius) {
                (Some(lat), Some(lon), Some(radius)) => (lat, lon, radius),
                _ => {
                    return Err(invalid_request_error(
                        "Missing lat/lon/radius parameters.",
                        Some(json!({
                            "lat": self.lat.clone(),
                            "lon": self.lon.clone(),
                            "radius": self.radius.clone(),
                        })),
                    ))
                }
            };

            let lat = lat_raw.trim().parse::<f64>();
            let lon = lon_raw.trim().parse::<f64>();
            let (lat, lon) = match (lat, lon) {
                (Ok(lat), Ok(lon)) => (lat, lon),
                _ => {
                    return Err(invalid_request_error(
                        "lat/lon must be numeric.",
                        Some(json!({ "lat": lat_raw, "lon": lon_raw })),
                    ))
                }
            };

            let radius_meters = radius_raw.trim().parse::<i64>().unwrap_or(0);
            if radius_meters < 1 {
                return Err(invalid_request_error(
                    "radius must be >= 1 (meters).",
                    Some(json!({ "radius": radius_meters })),
                ));
            }

            Some(GeoFilter {
                lat,
                lon,
                radius_meters,
            })
        } else {
            None
        };

        let q = self
            .q
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());
        let category = self
            .category
            .map(|category| category.trim().to_string())
            .filter(|category| !category.is_empty());

        Ok(PoiListFilter {
            q,
            category,
            geo,
            limit: limit as usize,
            offset: offset as usize,
        })
    }
}

/// Eco de la consulta efectiva, incluido en la respuesta del listado
#[derive(Debug, Serialize)]
pub struct PoiQueryEcho {
    pub q: Option<String>,
    pub category: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius: Option<i64>,
    pub limit: usize,
    pub offset: usize,
}

/// Respuesta de GET /pois
#[derive(Debug, Serialize)]
pub struct PoiListResponse {
    pub query: PoiQueryEcho,
    pub count: usize,
    pub results: Vec<Poi>,
}
