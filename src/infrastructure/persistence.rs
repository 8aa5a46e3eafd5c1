use serde::Serialize;
use serde::de::DeserializeOwned;

use super::store::{KeyValueStore, StorageError};
use crate::domain::{PlatformData, SessionUser};

/// Key of the platform data document.
pub const DATA_KEY: &str = "yanPlatformData";
/// Key holding the last platform document that failed to load.
pub const CORRUPT_DATA_KEY: &str = "yanPlatformData.corrupt";
/// Key of the signed-in user document.
pub const SESSION_KEY: &str = "yanCurrentUser";

/// A loaded value together with the problem that forced a fallback, if any.
#[derive(Debug)]
pub struct Loaded<T> {
    pub value: T,
    pub diagnostic: Option<StorageError>,
}

/// Reads and writes the platform documents through a [`KeyValueStore`].
pub struct PlatformRepository<S> {
    store: S,
}

impl<S: KeyValueStore> PlatformRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the platform data. A missing document yields empty collections;
    /// an unreadable or malformed one also yields empty collections and
    /// reports why.
    pub fn load_data(&self) -> Loaded<PlatformData> {
        self.load_document(DATA_KEY)
    }

    pub fn save_data(&mut self, data: &PlatformData) -> Result<(), StorageError> {
        self.save_document(DATA_KEY, data)
    }

    /// Copies the stored platform document, as raw text, to
    /// [`CORRUPT_DATA_KEY`]. Returns `false` when there is nothing to copy.
    pub fn preserve_unreadable_data(&mut self) -> Result<bool, StorageError> {
        let Some(raw) = self.store.get(DATA_KEY)? else {
            return Ok(false);
        };
        self.store.set(CORRUPT_DATA_KEY, &raw)?;
        tracing::warn!(key = CORRUPT_DATA_KEY, bytes = raw.len(), "kept unreadable platform data");
        Ok(true)
    }

    pub fn load_session(&self) -> Loaded<Option<SessionUser>> {
        self.load_document(SESSION_KEY)
    }

    pub fn save_session(&mut self, user: &SessionUser) -> Result<(), StorageError> {
        self.save_document(SESSION_KEY, user)
    }

    pub fn clear_session(&mut self) -> Result<(), StorageError> {
        self.store.remove(SESSION_KEY)
    }

    fn load_document<T: DeserializeOwned + Default>(&self, key: &str) -> Loaded<T> {
        let parsed = self.store.get(key).and_then(|raw| match raw {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StorageError::Malformed {
                key: key.to_string(),
                source,
            }),
            None => Ok(T::default()),
        });

        match parsed {
            Ok(value) => Loaded { value, diagnostic: None },
            Err(err) => {
                tracing::warn!(%key, error = %err, "falling back to empty state");
                Loaded { value: T::default(), diagnostic: Some(err) }
            }
        }
    }

    fn save_document<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)?;
        tracing::debug!(%key, bytes = json.len(), "document saved");
        Ok(())
    }
}
