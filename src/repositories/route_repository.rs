//! Repositorio de rutas persistidas
//!
//! Cada mutación es una transacción leer-modificar-escribir sobre la
//! colección completa, serializada por un mutex para no perder
//! escrituras bajo requests concurrentes. Las lecturas toman un snapshot
//! del archivo sin bloquear a los escritores.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::models::route::SavedRoute;
use crate::repositories::json_store::RecordStore;
use crate::utils::errors::AppError;

#[derive(Clone)]
pub struct RouteRepository {
    store: Arc<dyn RecordStore<SavedRoute>>,
    write_lock: Arc<Mutex<()>>,
}

impl RouteRepository {
    pub fn new(store: Arc<dyn RecordStore<SavedRoute>>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn all(&self) -> Vec<SavedRoute> {
        self.store.read_all().await
    }

    pub async fn find_by_id(&self, id: &str) -> Option<SavedRoute> {
        self.all().await.into_iter().find(|route| route.id == id)
    }

    /// Inserta al final de la colección (orden de inserción estable)
    pub async fn insert(&self, route: SavedRoute) -> Result<SavedRoute, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut routes = self.store.read_all().await;
        routes.push(route.clone());
        self.store.write_all(&routes).await?;

        Ok(route)
    }

    /// Aplica una mutación sobre la ruta con ese id, bajo el lock de escritura.
    ///
    /// Devuelve `None` si el id no existe; la posición de la ruta en la
    /// colección no cambia.
    pub async fn update<F>(&self, id: &str, apply: F) -> Result<Option<SavedRoute>, AppError>
    where
        F: FnOnce(&mut SavedRoute),
    {
        let _guard = self.write_lock.lock().await;

        let mut routes = self.store.read_all().await;
        let updated = match routes.iter_mut().find(|route| route.id == id) {
            Some(route) => {
                apply(route);
                route.clone()
            }
            None => return Ok(None),
        };
        self.store.write_all(&routes).await?;

        Ok(Some(updated))
    }

    /// Borrado duro; devuelve false si el id no existía
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut routes = self.store.read_all().await;
        let before = routes.len();
        routes.retain(|route| route.id != id);

        if routes.len() == before {
            return Ok(false);
        }

        self.store.write_all(&routes).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::route::LineString;
    use crate::repositories::json_store::MemoryStore;
    use chrono::Utc;

    fn sample_route(id: &str) -> SavedRoute {
        let now = Utc::now();
        SavedRoute {
            id: id.to_string(),
            name: format!("route {}", id),
            public: false,
            vehicle: None,
            owner_id: None,
            poi_sequence: Vec::new(),
            geometry: LineString {
                geometry_type: "LineString".to_string(),
                coordinates: vec![vec![0.0, 0.0], vec![1.0, 1.0]],
            },
            encoded_polyline: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn repo() -> RouteRepository {
        RouteRepository::new(Arc::new(MemoryStore::default()))
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = repo();
        repo.insert(sample_route("route_a")).await.unwrap();
        repo.insert(sample_route("route_b")).await.unwrap();

        assert!(repo.find_by_id("route_a").await.is_some());
        assert!(repo.find_by_id("route_x").await.is_none());
        assert_eq!(repo.all().await.len(), 2);
    }

    #[tokio::test]
    async fn test_update_keeps_position() {
        let repo = repo();
        repo.insert(sample_route("route_a")).await.unwrap();
        repo.insert(sample_route("route_b")).await.unwrap();
        repo.insert(sample_route("route_c")).await.unwrap();

        let updated = repo
            .update("route_b", |route| route.name = "renamed".to_string())
            .await
            .unwrap();
        assert_eq!(updated.unwrap().name, "renamed");

        let ids: Vec<String> = repo.all().await.into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["route_a", "route_b", "route_c"]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_none() {
        let repo = repo();
        let updated = repo.update("route_x", |_| {}).await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo();
        repo.insert(sample_route("route_a")).await.unwrap();

        assert!(repo.delete("route_a").await.unwrap());
        assert!(!repo.delete("route_a").await.unwrap());
        assert!(repo.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_inserts_are_not_lost() {
        let repo = repo();

        let mut handles = Vec::new();
        for i in 0..20 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.insert(sample_route(&format!("route_{:02}", i))).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(repo.all().await.len(), 20);
    }
}
