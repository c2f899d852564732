//! Controller de POIs
//!
//! Aplica los filtros del listado en orden (texto → categoría → radio
//! geográfico), captura el total filtrado y recién después pagina.

use serde_json::json;

use crate::dto::poi_dto::{PoiListQuery, PoiListResponse, PoiQueryEcho};
use crate::models::poi::Poi;
use crate::repositories::poi_repository::PoiRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::geo::haversine_meters;

pub struct PoiController {
    repository: PoiRepository,
}

impl PoiController {
    pub fn new(repository: PoiRepository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: PoiListQuery) -> Result<PoiListResponse, AppError> {
        let filter = query.validate()?;
        let mut pois = self.repository.all().await;

        if let Some(q) = &filter.q {
            let q_lower = q.to_lowercase();
            pois.retain(|poi| {
                poi.name.to_lowercase().contains(&q_lower)
                    || poi.category.to_lowercase().contains(&q_lower)
                    || poi.description.to_lowercase().contains(&q_lower)
            });
        }

        if let Some(category) = &filter.category {
            let category_lower = category.to_lowercase();
            pois.retain(|poi| poi.category.to_lowercase() == category_lower);
        }

        if let Some(geo) = filter.geo {
            pois.retain(|poi| match poi.location {
                Some(location) => {
                    haversine_meters(geo.lat, geo.lon, location.lat, location.lon)
                        <= geo.radius_meters as f64
                }
                // POIs sin coordenadas nunca matchean el filtro geográfico
                None => false,
            });
        }

        let count = pois.len();
        let results: Vec<Poi> = pois
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect();

        Ok(PoiListResponse {
            query: PoiQueryEcho {
                q: filter.q,
                category: filter.category,
                lat: filter.geo.map(|geo| geo.lat),
                lon: filter.geo.map(|geo| geo.lon),
                radius: filter.geo.map(|geo| geo.radius_meters),
                limit: filter.limit,
                offset: filter.offset,
            },
            count,
            results,
        })
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Poi, AppError> {
        self.repository
            .find_by_id(id)
            .await
            .ok_or_else(|| not_found_error("POI not found", Some(json!({ "id": id }))))
    }
}
