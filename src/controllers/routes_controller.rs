//! Controller de rutas persistidas
//!
//! CRUD completo sobre la colección de rutas: creación con id y
//! timestamps generados, reemplazo total con semántica PUT del contrato
//! (los campos omitidos vuelven a null/vacío), parche parcial campo a
//! campo y borrado duro.

use chrono::Utc;
use serde_json::json;

use crate::dto::route_dto::{
    PersistMode, RouteListQuery, RouteListResponse, RoutePatchRequest, RoutePersistRequest,
};
use crate::models::route::SavedRoute;
use crate::repositories::route_repository::RouteRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::read_json_object;

pub struct RoutesController {
    repository: RouteRepository,
}

impl RoutesController {
    pub fn new(repository: RouteRepository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: RouteListQuery) -> Result<RouteListResponse, AppError> {
        let filter = query.validate()?;
        let mut routes = self.repository.all().await;

        if let Some(public) = filter.public {
            routes.retain(|route| route.public == public);
        }
        if let Some(owner_id) = &filter.owner_id {
            routes.retain(|route| route.owner_id.as_deref() == Some(owner_id.as_str()));
        }

        let count = routes.len();
        let results: Vec<SavedRoute> = routes
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect();

        Ok(RouteListResponse { count, results })
    }

    pub async fn create(&self, body: &str) -> Result<SavedRoute, AppError> {
        let payload = read_json_object(body)?;
        let request = RoutePersistRequest::from_json(&payload, PersistMode::Create)?;

        let mut id = generate_route_id();
        while self.repository.find_by_id(&id).await.is_some() {
            id = generate_route_id();
        }

        let now = Utc::now();
        let route = SavedRoute {
            id,
            name: request.name,
            public: request.public,
            vehicle: request.vehicle,
            owner_id: request.owner_id,
            poi_sequence: request.poi_sequence,
            geometry: request.geometry,
            encoded_polyline: request.encoded_polyline,
            created_at: now,
            updated_at: now,
        };

        log::info!("💾 Ruta creada: {} ({})", route.id, route.name);
        self.repository.insert(route).await
    }

    pub async fn get(&self, id: &str) -> Result<SavedRoute, AppError> {
        self.repository
            .find_by_id(id)
            .await
            .ok_or_else(|| route_not_found(id))
    }

    pub async fn replace(&self, id: &str, body: &str) -> Result<SavedRoute, AppError> {
        if self.repository.find_by_id(id).await.is_none() {
            return Err(route_not_found(id));
        }

        let payload = read_json_object(body)?;
        let request = RoutePersistRequest::from_json(&payload, PersistMode::Replace)?;

        // id, ownerId y createdAt se preservan; el resto toma el payload,
        // con los campos omitidos en sus defaults (null/vacío)
        let updated = self
            .repository
            .update(id, move |route| {
                route.name = request.name;
                route.public = request.public;
                route.vehicle = request.vehicle;
                route.poi_sequence = request.poi_sequence;
                route.geometry = request.geometry;
                route.encoded_polyline = request.encoded_polyline;
                route.updated_at = Utc::now();
            })
            .await?;

        updated.ok_or_else(|| route_not_found(id))
    }

    pub async fn patch(&self, id: &str, body: &str) -> Result<SavedRoute, AppError> {
        if self.repository.find_by_id(id).await.is_none() {
            return Err(route_not_found(id));
        }

        let payload = read_json_object(body)?;
        let patch = RoutePatchRequest::from_json(&payload)?;

        let updated = self
            .repository
            .update(id, move |route| {
                patch.apply(route);
                route.updated_at = Utc::now();
            })
            .await?;

        updated.ok_or_else(|| route_not_found(id))
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(route_not_found(id));
        }
        log::info!("🗑️ Ruta eliminada: {}", id);
        Ok(())
    }
}

fn route_not_found(id: &str) -> AppError {
    not_found_error("Route not found", Some(json!({ "id": id })))
}

/// Token de ruta: `route_` + 16 caracteres hex (8 bytes aleatorios)
fn generate_route_id() -> String {
    let bytes: [u8; 8] = rand::random();
    let hex: String = bytes.iter().map(|byte| format!("{:02x}", byte)).collect();
    format!("route_{}", hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::json_store::MemoryStore;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn controller() -> RoutesController {
        RoutesController::new(RouteRepository::new(Arc::new(MemoryStore::default())))
    }

    fn minimal_body(name: &str, public: bool) -> String {
        json!({
            "name": name,
            "public": public,
            "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] }
        })
        .to_string()
    }

    #[test]
    fn test_generated_ids_are_unique_and_well_formed() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let id = generate_route_id();
            let hex = id.strip_prefix("route_").expect("prefix");
            assert_eq!(hex.len(), 16);
            assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
            assert!(seen.insert(id));
        }
    }

    #[tokio::test]
    async fn test_create_sets_id_timestamps_and_defaults() {
        let controller = controller();
        let route = controller.create(&minimal_body("A", true)).await.unwrap();

        assert!(route.id.starts_with("route_"));
        assert_eq!(route.created_at, route.updated_at);
        assert!(route.vehicle.is_none());
        assert!(route.owner_id.is_none());
        assert!(route.poi_sequence.is_empty());
        assert!(route.encoded_polyline.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_missing_geometry() {
        let controller = controller();
        let body = json!({ "name": "A", "public": true }).to_string();
        assert!(controller.create(&body).await.is_err());
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let controller = controller();
        let err = controller.get("route_missing").await.unwrap_err();
        match err {
            AppError::NotFound { details, .. } => {
                assert_eq!(details.unwrap()["id"], "route_missing")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_replace_resets_omitted_fields() {
        let controller = controller();
        let body = json!({
            "name": "A",
            "public": true,
            "vehicle": "bike",
            "ownerId": "user_1",
            "encodedPolyline": "abc",
            "poiSequence": [{ "poiId": "poi_1", "name": "Louvre" }],
            "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] }
        })
        .to_string();
        let created = controller.create(&body).await.unwrap();

        let replaced = controller
            .replace(&created.id, &minimal_body("B", false))
            .await
            .unwrap();

        assert_eq!(replaced.id, created.id);
        assert_eq!(replaced.name, "B");
        assert!(!replaced.public);
        // PUT: lo omitido vuelve a null/vacío, menos ownerId que se preserva
        assert!(replaced.vehicle.is_none());
        assert!(replaced.poi_sequence.is_empty());
        assert!(replaced.encoded_polyline.is_none());
        assert_eq!(replaced.owner_id.as_deref(), Some("user_1"));
        assert_eq!(replaced.created_at, created.created_at);
        assert!(replaced.updated_at >= created.updated_at);

        // Round-trip: get devuelve exactamente lo reemplazado
        let fetched = controller.get(&created.id).await.unwrap();
        assert_eq!(fetched.name, replaced.name);
        assert_eq!(fetched.updated_at, replaced.updated_at);
    }

    #[tokio::test]
    async fn test_replace_unknown_is_not_found() {
        let controller = controller();
        let err = controller
            .replace("route_missing", &minimal_body("B", false))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_patch_empty_object_only_touches_updated_at() {
        let controller = controller();
        let created = controller.create(&minimal_body("A", true)).await.unwrap();

        let patched = controller.patch(&created.id, "{}").await.unwrap();
        assert_eq!(patched.name, created.name);
        assert_eq!(patched.public, created.public);
        assert_eq!(patched.geometry, created.geometry);
        assert_eq!(patched.created_at, created.created_at);
        assert!(patched.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_patch_applies_present_fields_only() {
        let controller = controller();
        let created = controller.create(&minimal_body("A", true)).await.unwrap();

        let body = json!({ "name": "renamed", "vehicle": "foot" }).to_string();
        let patched = controller.patch(&created.id, &body).await.unwrap();
        assert_eq!(patched.name, "renamed");
        assert_eq!(patched.vehicle.as_deref(), Some("foot"));
        assert_eq!(patched.public, created.public);
        assert_eq!(patched.geometry, created.geometry);

        // null explícito limpia el campo
        let body = json!({ "vehicle": null }).to_string();
        let patched = controller.patch(&created.id, &body).await.unwrap();
        assert!(patched.vehicle.is_none());
    }

    #[tokio::test]
    async fn test_patch_validation_failure_does_not_persist() {
        let controller = controller();
        let created = controller.create(&minimal_body("A", true)).await.unwrap();

        let body = json!({
            "name": "renamed",
            "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0]] }
        })
        .to_string();
        assert!(controller.patch(&created.id, &body).await.is_err());

        // El fallo corta antes de mutar: ni siquiera el name válido se aplica
        let fetched = controller.get(&created.id).await.unwrap();
        assert_eq!(fetched.name, "A");
        assert_eq!(fetched.updated_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let controller = controller();
        let created = controller.create(&minimal_body("A", true)).await.unwrap();

        controller.delete(&created.id).await.unwrap();
        assert!(controller.get(&created.id).await.is_err());
        assert!(matches!(
            controller.delete(&created.id).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_list_filters_and_pagination() {
        let controller = controller();
        for i in 0..5 {
            let body = json!({
                "name": format!("route {}", i),
                "public": i % 2 == 0,
                "ownerId": if i < 3 { "user_a" } else { "user_b" },
                "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] }
            })
            .to_string();
            controller.create(&body).await.unwrap();
        }

        let mut query = RouteListQuery::default();
        query.public = Some("true".to_string());
        let response = controller.list(query).await.unwrap();
        assert_eq!(response.count, 3);

        let mut query = RouteListQuery::default();
        query.owner_id = Some("user_b".to_string());
        let response = controller.list(query).await.unwrap();
        assert_eq!(response.count, 2);

        let mut query = RouteListQuery::default();
        query.public = Some("false".to_string());
        query.owner_id = Some("user_a".to_string());
        let response = controller.list(query).await.unwrap();
        assert_eq!(response.count, 1);

        // Páginas disjuntas que reconstruyen el listado completo en orden
        let mut query = RouteListQuery::default();
        query.limit = Some("2".to_string());
        let first = controller.list(query).await.unwrap();

        let mut query = RouteListQuery::default();
        query.limit = Some("2".to_string());
        query.offset = Some("2".to_string());
        let second = controller.list(query).await.unwrap();

        let mut query = RouteListQuery::default();
        query.limit = Some("2".to_string());
        query.offset = Some("4".to_string());
        let third = controller.list(query).await.unwrap();

        let names: Vec<String> = first
            .results
            .iter()
            .chain(second.results.iter())
            .chain(third.results.iter())
            .map(|route| route.name.clone())
            .collect();
        assert_eq!(names, vec!["route 0", "route 1", "route 2", "route 3", "route 4"]);
    }

    #[tokio::test]
    async fn test_list_rejects_bad_public() {
        let controller = controller();
        let mut query = RouteListQuery::default();
        query.public = Some("maybe".to_string());
        assert!(controller.list(query).await.is_err());
    }
}
