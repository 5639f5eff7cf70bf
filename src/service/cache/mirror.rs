//! Durable mirrors backing the in-process caches.

use std::{fmt::Display, marker::PhantomData};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    data::{
        availability_cache::AvailabilityCacheRepository,
        cache_snapshot::CacheSnapshotRepository,
    },
    error::{cache::CacheError, Error},
    model::availability::{AvailabilityKey, AvailabilityRecord},
};

/// Version reported for rows of the `availability_cache` table, which carries no version
/// column of its own. Bump it whenever the record layout changes meaning.
pub const AVAILABILITY_MIRROR_VERSION: &str = "availability-v1";

/// A cache entry as persisted by a mirror.
#[derive(Clone, Debug, PartialEq)]
pub struct MirroredEntry<V> {
    pub value: V,
    pub version: String,
    pub stored_at: NaiveDateTime,
}

/// Durable storage the cache writes through to and rehydrates from.
#[async_trait]
pub trait CacheMirror<K, V>: Send + Sync {
    async fn load(&self, key: &K) -> Result<Option<MirroredEntry<V>>, Error>;

    async fn store(&self, key: &K, entry: &MirroredEntry<V>) -> Result<(), Error>;

    async fn remove(&self, key: &K) -> Result<(), Error>;

    async fn remove_all(&self) -> Result<(), Error>;
}

/// Mirror storing JSON payloads in the `cache_snapshot` table under `"{prefix}:{key}"`.
pub struct SnapshotMirror<K, V> {
    db: DatabaseConnection,
    prefix: String,
    _marker: PhantomData<fn(K) -> V>,
}

impl<K, V> SnapshotMirror<K, V> {
    pub fn new(db: DatabaseConnection, prefix: &str) -> Self {
        Self {
            db,
            prefix: prefix.to_string(),
            _marker: PhantomData,
        }
    }

    fn snapshot_key(&self, key: &K) -> String
    where
        K: Display,
    {
        format!("{}:{}", self.prefix, key)
    }
}

#[async_trait]
impl<K, V> CacheMirror<K, V> for SnapshotMirror<K, V>
where
    K: Display + Send + Sync,
    V: Serialize + DeserializeOwned + Send + Sync,
{
    async fn load(&self, key: &K) -> Result<Option<MirroredEntry<V>>, Error> {
        let snapshot_key = self.snapshot_key(key);
        let repo = CacheSnapshotRepository::new(&self.db);

        let Some(snapshot) = repo.find(&snapshot_key).await? else {
            return Ok(None);
        };

        let value = serde_json::from_str(&snapshot.payload).map_err(|source| {
            CacheError::Payload {
                key: snapshot_key.clone(),
                source,
            }
        })?;

        Ok(Some(MirroredEntry {
            value,
            version: snapshot.version,
            stored_at: snapshot.stored_at,
        }))
    }

    async fn store(&self, key: &K, entry: &MirroredEntry<V>) -> Result<(), Error> {
        let snapshot_key = self.snapshot_key(key);
        let payload = serde_json::to_string(&entry.value).map_err(|source| {
            CacheError::Payload {
                key: snapshot_key.clone(),
                source,
            }
        })?;

        CacheSnapshotRepository::new(&self.db)
            .upsert(&snapshot_key, &entry.version, payload, entry.stored_at)
            .await?;

        Ok(())
    }

    async fn remove(&self, key: &K) -> Result<(), Error> {
        CacheSnapshotRepository::new(&self.db)
            .delete(&self.snapshot_key(key))
            .await?;

        Ok(())
    }

    async fn remove_all(&self) -> Result<(), Error> {
        CacheSnapshotRepository::new(&self.db)
            .delete_with_prefix(&format!("{}:", self.prefix))
            .await?;

        Ok(())
    }
}

/// Mirror of availability records in the `availability_cache` table.
pub struct AvailabilityMirror {
    db: DatabaseConnection,
}

impl AvailabilityMirror {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CacheMirror<AvailabilityKey, AvailabilityRecord> for AvailabilityMirror {
    async fn load(
        &self,
        key: &AvailabilityKey,
    ) -> Result<Option<MirroredEntry<AvailabilityRecord>>, Error> {
        let record = AvailabilityCacheRepository::new(&self.db).find(key).await?;

        Ok(record.map(|record| MirroredEntry {
            stored_at: record.cache_updated_at,
            version: AVAILABILITY_MIRROR_VERSION.to_string(),
            value: record,
        }))
    }

    async fn store(
        &self,
        _key: &AvailabilityKey,
        entry: &MirroredEntry<AvailabilityRecord>,
    ) -> Result<(), Error> {
        AvailabilityCacheRepository::new(&self.db)
            .replace(&entry.value)
            .await?;

        Ok(())
    }

    async fn remove(&self, key: &AvailabilityKey) -> Result<(), Error> {
        AvailabilityCacheRepository::new(&self.db)
            .delete(key)
            .await?;

        Ok(())
    }

    async fn remove_all(&self) -> Result<(), Error> {
        AvailabilityCacheRepository::new(&self.db)
            .delete_all()
            .await?;

        Ok(())
    }
}
