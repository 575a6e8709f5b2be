//! Async facade over the record store.

use pokegen_channel::Teardown;
use pokegen_model::PokemonRecord;
use pokegen_storage::{RecordStore, StorageError, StorageResult};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

use crate::service::Service;

/// Service for interacting with the local record store.
///
/// The store opens lazily on first use; concurrent callers queue behind the
/// single initialization, so operations issued before the store is ready
/// simply wait for it. Blocking SQLite work runs on the blocking pool.
pub struct Database {
    path: PathBuf,
    store: OnceCell<Arc<RecordStore>>,
    destroyed: Teardown,
}

impl Database {
    #[must_use]
    pub fn new(path: PathBuf) -> Arc<Self> {
        Arc::new(Self {
            path,
            store: OnceCell::new(),
            destroyed: Teardown::new(),
        })
    }

    async fn store(&self) -> StorageResult<Arc<RecordStore>> {
        self.store
            .get_or_try_init(|| async {
                let path = self.path.clone();
                let store = tokio::task::spawn_blocking(move || RecordStore::open(path))
                    .await
                    .map_err(|err| StorageError::Io(std::io::Error::other(err)))??;
                info!("record store opened at {}", self.path.display());
                Ok(Arc::new(store))
            })
            .await
            .map(Arc::clone)
    }

    /// Stores (or replaces) a Pokemon.
    pub async fn put(&self, record: &PokemonRecord) -> StorageResult<()> {
        let store = self.store().await?;
        let record = record.clone();
        run_blocking(move || store.put(&record)).await
    }

    /// Deletes a Pokemon by name.
    pub async fn delete(&self, name: &str) -> StorageResult<()> {
        let store = self.store().await?;
        let name = name.to_string();
        run_blocking(move || store.delete(&name)).await
    }

    /// Finds all Pokemon, in no particular order.
    pub async fn find_all(&self) -> StorageResult<Vec<PokemonRecord>> {
        let store = self.store().await?;
        run_blocking(move || store.find_all()).await
    }

    /// Finds a single Pokemon by name.
    pub async fn find_one(&self, name: &str) -> StorageResult<Option<PokemonRecord>> {
        let store = self.store().await?;
        let name = name.to_string();
        run_blocking(move || store.find_one(&name)).await
    }
}

async fn run_blocking<T, F>(f: F) -> StorageResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> StorageResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| StorageError::Io(std::io::Error::other(err)))?
}

impl Service for Database {
    fn destroyed(&self) -> &Teardown {
        &self.destroyed
    }
}
