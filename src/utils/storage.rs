// ============================================================================
// STORAGE - Único punto de acceso al almacenamiento persistente
// ============================================================================
// Ningún otro módulo toca localStorage directamente: los estados reciben un
// `AppStorage` inyectado desde App::new (o un MemoryStorage en los tests).
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{de::DeserializeOwned, Serialize};
use web_sys::{window, Storage};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("almacenamiento no disponible")]
    Unavailable,
    #[error("error serializando '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("'{key}' contiene datos ilegibles: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("error escribiendo '{0}'")]
    Write(String),
}

/// Almacén clave/valor síncrono (localStorage o memoria)
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// localStorage del navegador
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<Storage> {
        window()?.local_storage().ok()?
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .remove_item(key)
            .map_err(|_| StorageError::Write(key.to_string()))
    }
}

/// Almacén en memoria (tests y navegadores sin localStorage)
#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Accesor compartido con helpers JSON
#[derive(Clone)]
pub struct AppStorage {
    backend: Rc<dyn KeyValueStore>,
}

impl AppStorage {
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// localStorage si existe, memoria en caso contrario
    pub fn browser() -> Self {
        if BrowserStorage::storage().is_some() {
            Self::new(Rc::new(BrowserStorage))
        } else {
            log::warn!("⚠️ [STORAGE] localStorage no disponible, usando memoria");
            Self::in_memory()
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStorage::new()))
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.backend.get_item(key)
    }

    pub fn set_string(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.backend.set_item(key, value)
    }

    pub fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.backend.set_item(key, &json)
    }

    /// JSON corrupto se trata como ausente
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_load_json(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("⚠️ [STORAGE] {}, se ignora", e);
                None
            }
        }
    }

    /// Como `load_json`, pero distingue "no existe" de "existe y no se entiende".
    /// Para claves que se reescriben a partir de su valor anterior.
    pub fn try_load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(json) = self.backend.get_item(key) else {
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.backend.remove_item(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Dato {
        id: i64,
        nombre: String,
    }

    #[test]
    fn test_json_guardar_y_cargar() {
        let storage = AppStorage::in_memory();
        let dato = Dato { id: 7, nombre: "Sala Norte".to_string() };
        storage.save_json("dato", &dato).unwrap();
        assert_eq!(storage.load_json::<Dato>("dato"), Some(dato));
    }

    #[test]
    fn test_json_corrupto_es_ausente() {
        let storage = AppStorage::in_memory();
        storage.set_string("dato", "{no es json").unwrap();
        assert_eq!(storage.load_json::<Dato>("dato"), None);
    }

    #[test]
    fn test_remove() {
        let storage = AppStorage::in_memory();
        storage.set_string("authToken", "abc").unwrap();
        storage.remove("authToken").unwrap();
        assert_eq!(storage.get_string("authToken"), None);
    }

    #[test]
    fn test_clones_comparten_backend() {
        let storage = AppStorage::in_memory();
        let otro = storage.clone();
        storage.set_string("username", "ana").unwrap();
        assert_eq!(otro.get_string("username").as_deref(), Some("ana"));
    }
}
