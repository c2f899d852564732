//! Controller del cálculo de rutas
//!
//! Resuelve la secuencia de locations (referencias a POI o coordenadas
//! crudas) contra la colección de POIs, delega el cálculo al motor y
//! normaliza la respuesta a la forma estable del contrato.

use serde_json::{json, Value};

use crate::dto::compute_dto::{ComputeRouteRequest, ComputedRouteResponse, RouteFormat};
use crate::models::route::PoiSequenceEntry;
use crate::repositories::poi_repository::PoiRepository;
use crate::services::graphhopper_service::GraphHopperService;
use crate::utils::errors::{invalid_request_error, AppError};
use crate::utils::validation::{as_numeric, read_json_object};

pub struct ComputeController {
    pois: PoiRepository,
    engine: GraphHopperService,
}

impl ComputeController {
    pub fn new(pois: PoiRepository, engine: GraphHopperService) -> Self {
        Self { pois, engine }
    }

    pub async fn compute(&self, body: &str) -> Result<ComputedRouteResponse, AppError> {
        let payload = read_json_object(body)?;
        let request = ComputeRouteRequest::from_json(&payload)?;

        let pois_by_id = self.pois.by_id().await;

        let mut points: Vec<(f64, f64)> = Vec::new();
        let mut poi_sequence: Vec<PoiSequenceEntry> = Vec::new();

        for (index, location) in request.locations.iter().enumerate() {
            let obj = match location.as_object() {
                Some(obj) => obj,
                None => {
                    return Err(invalid_request_error(
                        "Each location must be an object.",
                        Some(json!({ "index": index })),
                    ))
                }
            };

            if let Some(poi_id) = obj.get("poiId") {
                let poi_id = match poi_id {
                    Value::String(poi_id) => poi_id.clone(),
                    other => other.to_string(),
                };

                let located = pois_by_id
                    .get(&poi_id)
                    .and_then(|poi| poi.location.map(|location| (poi, location)));

                let (poi, location) = match located {
                    Some(located) => located,
                    None => {
                        return Err(invalid_request_error(
                            "Unknown poiId or POI missing coordinates.",
                            Some(json!({ "index": index, "poiId": poi_id })),
                        ))
                    }
                };

                points.push((location.lat, location.lon));
                poi_sequence.push(PoiSequenceEntry {
                    poi_id,
                    name: Some(poi.name.clone()).filter(|name| !name.is_empty()),
                });
                continue;
            }

            let lat = obj.get("lat").and_then(as_numeric);
            let lon = obj.get("lon").and_then(as_numeric);
            if let (Some(lat), Some(lon)) = (lat, lon) {
                // Las coordenadas crudas no aparecen en poiSequence
                points.push((lat, lon));
                continue;
            }

            return Err(invalid_request_error(
                "Each location must have either poiId or lat/lon.",
                Some(json!({ "index": index, "location": location })),
            ));
        }

        let path = self
            .engine
            .route(&points, &request.vehicle, request.format.points_encoded())
            .await?;

        // La geometría debe venir en la codificación pedida; nunca se
        // degrada en silencio a la otra
        let geometry = match request.format {
            RouteFormat::GeoJson => match &path.points {
                Value::Object(points_obj)
                    if points_obj.contains_key("type") && points_obj.contains_key("coordinates") =>
                {
                    json!({
                        "type": "LineString",
                        "coordinates": points_obj["coordinates"],
                    })
                }
                other => {
                    return Err(AppError::GraphHopper {
                        message: "GraphHopper did not return GeoJSON points.".to_string(),
                        details: Some(json!({ "path.points": other })),
                    })
                }
            },
            RouteFormat::EncodedPolyline => match &path.points {
                Value::String(polyline) if !polyline.is_empty() => Value::String(polyline.clone()),
                other => {
                    return Err(AppError::GraphHopper {
                        message: "GraphHopper did not return encoded polyline.".to_string(),
                        details: Some(json!({ "path.points": other })),
                    })
                }
            },
        };

        Ok(ComputedRouteResponse {
            distance_meters: path.distance_meters,
            duration_millis: path.time_millis,
            geometry,
            poi_sequence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::poi::{GeoPoint, Poi};
    use crate::repositories::json_store::MemoryStore;
    use std::sync::Arc;

    fn controller() -> ComputeController {
        let pois = vec![
            Poi {
                id: "poi_1".to_string(),
                name: "Louvre Museum".to_string(),
                category: "museum".to_string(),
                description: String::new(),
                location: Some(GeoPoint { lat: 48.8606, lon: 2.3376 }),
            },
            Poi {
                id: "poi_nowhere".to_string(),
                name: "Phantom".to_string(),
                category: "museum".to_string(),
                description: String::new(),
                location: None,
            },
        ];
        ComputeController::new(
            PoiRepository::new(Arc::new(MemoryStore::new(pois))),
            // No se llega al motor en estos tests de validación
            GraphHopperService::new("http://127.0.0.1:9".to_string()),
        )
    }

    #[tokio::test]
    async fn test_unknown_poi_id_reports_index_and_id() {
        let controller = controller();
        let body = json!({
            "locations": [{ "poiId": "poi_1" }, { "poiId": "missing" }]
        })
        .to_string();

        let err = controller.compute(&body).await.unwrap_err();
        match err {
            AppError::InvalidRequest { details, .. } => {
                let details = details.unwrap();
                assert_eq!(details["index"], 1);
                assert_eq!(details["poiId"], "missing");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_poi_without_coordinates_is_invalid() {
        let controller = controller();
        let body = json!({
            "locations": [{ "poiId": "poi_1" }, { "poiId": "poi_nowhere" }]
        })
        .to_string();
        assert!(controller.compute(&body).await.is_err());
    }

    #[tokio::test]
    async fn test_location_must_be_object() {
        let controller = controller();
        let body = json!({ "locations": ["poi_1", { "poiId": "poi_1" }] }).to_string();

        let err = controller.compute(&body).await.unwrap_err();
        match err {
            AppError::InvalidRequest { message, details } => {
                assert_eq!(message, "Each location must be an object.");
                assert_eq!(details.unwrap()["index"], 0);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_location_without_poi_or_coordinates_is_invalid() {
        let controller = controller();
        let body = json!({
            "locations": [{ "poiId": "poi_1" }, { "lat": 48.85 }]
        })
        .to_string();

        let err = controller.compute(&body).await.unwrap_err();
        match err {
            AppError::InvalidRequest { message, details } => {
                assert_eq!(message, "Each location must have either poiId or lat/lon.");
                assert_eq!(details.unwrap()["index"], 1);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_numeric_string_coordinates_are_accepted() {
        // La validación pasa; el fallo llega recién del motor inalcanzable
        let controller = controller();
        let body = json!({
            "locations": [
                { "lat": "48.85", "lon": "2.35" },
                { "lat": 48.86, "lon": 2.36 }
            ]
        })
        .to_string();

        let err = controller.compute(&body).await.unwrap_err();
        assert!(matches!(err, AppError::GraphHopper { .. }));
    }
}
