//! Repositorio de POIs
//!
//! Colección de solo lectura: se relee del almacén en cada request,
//! sin caché.

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::poi::Poi;
use crate::repositories::json_store::RecordStore;

#[derive(Clone)]
pub struct PoiRepository {
    store: Arc<dyn RecordStore<Poi>>,
}

impl PoiRepository {
    pub fn new(store: Arc<dyn RecordStore<Poi>>) -> Self {
        Self { store }
    }

    pub async fn all(&self) -> Vec<Poi> {
        self.store.read_all().await
    }

    pub async fn find_by_id(&self, id: &str) -> Option<Poi> {
        self.all().await.into_iter().find(|poi| poi.id == id)
    }

    /// Mapa id -> POI para resolver referencias en lote
    pub async fn by_id(&self) -> HashMap<String, Poi> {
        self.all()
            .await
            .into_iter()
            .map(|poi| (poi.id.clone(), poi))
            .collect()
    }
}
