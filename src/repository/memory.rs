use async_trait::async_trait;
use sea_orm::DbErr;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{PoisonError, RwLock};

use super::Repository;
use crate::entity::HasId;

/// Repository keeping entities in a map, keyed by a sequence starting at 1.
///
/// Saving an entity with an explicit key moves the sequence past that key.
pub struct InMemoryRepository<E> {
    rows: RwLock<BTreeMap<i64, E>>,
    next_id: AtomicI64,
}

impl<E> InMemoryRepository<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> DbErr {
    DbErr::Custom("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl<E> Repository for InMemoryRepository<E>
where
    E: HasId<Id = i64> + Clone + Send + Sync,
{
    type Entity = E;

    async fn save(&self, mut entity: E) -> Result<E, DbErr> {
        let id = match entity.id() {
            Some(id) => {
                self.next_id.fetch_max(id.saturating_add(1), Ordering::Relaxed);
                id
            }
            None => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                entity.set_id(id);
                id
            }
        };
        self.rows
            .write()
            .map_err(poisoned)?
            .insert(id, entity.clone());
        Ok(entity)
    }

    async fn find_all(&self) -> Result<Vec<E>, DbErr> {
        Ok(self.rows.read().map_err(poisoned)?.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<E>, DbErr> {
        Ok(self.rows.read().map_err(poisoned)?.get(&id).cloned())
    }

    async fn delete(&self, entity: &E) -> Result<(), DbErr> {
        let removed = match entity.id() {
            Some(id) => self.rows.write().map_err(poisoned)?.remove(&id),
            None => None,
        };
        match removed {
            Some(_) => Ok(()),
            None => Err(DbErr::RecordNotFound("Entity not found".to_string())),
        }
    }
}
