//! Almacén genérico de colecciones JSON
//!
//! Cada colección vive en un archivo como array JSON. Un medio inexistente
//! o corrupto se lee como colección vacía; la escritura reemplaza la
//! colección completa de forma atómica (archivo temporal + rename) para que
//! los lectores nunca vean una colección a medio escribir.

use std::marker::PhantomData;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

use crate::utils::errors::AppError;

/// Contrato de almacenamiento de una colección de registros
#[async_trait]
pub trait RecordStore<T>: Send + Sync {
    /// Lee la colección completa; nunca falla hacia el caller
    async fn read_all(&self) -> Vec<T>;

    /// Sobrescribe la colección completa
    async fn write_all(&self, records: &[T]) -> Result<(), AppError>;
}

/// Almacén respaldado por un archivo JSON
pub struct JsonFileStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T> RecordStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn read_all(&self) -> Vec<T> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_slice(&raw) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("⚠️ Colección ilegible en {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    async fn write_all(&self, records: &[T]) -> Result<(), AppError> {
        let payload = serde_json::to_string_pretty(records)
            .map_err(|e| AppError::Internal(format!("Error serializing collection: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // Escritura atómica: temporal al lado del destino y rename
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, payload.as_bytes()).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        Ok(())
    }
}

/// Almacén en memoria, doble de pruebas del almacén en archivo
pub struct MemoryStore<T> {
    records: RwLock<Vec<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new(initial: Vec<T>) -> Self {
        Self {
            records: RwLock::new(initial),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl<T> RecordStore<T> for MemoryStore<T>
where
    T: Clone + Send + Sync,
{
    async fn read_all(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    async fn write_all(&self, records: &[T]) -> Result<(), AppError> {
        *self.records.write().await = records.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        id: String,
        value: i64,
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::<Record>::new(dir.path().join("missing.json"));
        assert!(store.read_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::<Record>::new(path);
        assert!(store.read_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let store = JsonFileStore::<Record>::new(path.clone());

        let records = vec![
            Record { id: "a".to_string(), value: 1 },
            Record { id: "b".to_string(), value: 2 },
        ];
        store.write_all(&records).await.unwrap();

        assert_eq!(store.read_all().await, records);

        // El archivo temporal no queda colgando
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_write_preserves_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::<Record>::new(dir.path().join("ordered.json"));

        let records: Vec<Record> = (0..10)
            .map(|i| Record { id: format!("r{}", i), value: i })
            .collect();
        store.write_all(&records).await.unwrap();

        let read_back = store.read_all().await;
        let ids: Vec<&str> = read_back.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9"]);
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::<Record>::default();
        assert!(store.read_all().await.is_empty());

        let records = vec![Record { id: "a".to_string(), value: 7 }];
        store.write_all(&records).await.unwrap();
        assert_eq!(store.read_all().await, records);
    }
}
