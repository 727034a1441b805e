//! Generic persistence interface and its two stores.
//!
//! - [`DatabaseRepository`]: Sea-ORM backed, for any [`DatabaseEntity`]
//! - [`InMemoryRepository`]: map backed, for tests and prototypes

use async_trait::async_trait;
use sea_orm::DbErr;

use crate::entity::HasId;

pub mod database;
pub mod memory;

pub use database::{DatabaseEntity, DatabaseRepository};
pub use memory::InMemoryRepository;

/// Thin pass-through to a data store.
///
/// `save` inserts when the entity has no key and overwrites the stored row
/// when it has one; either way the returned entity carries its key.
#[async_trait]
pub trait Repository: Send + Sync {
    type Entity: HasId + Send + Sync;

    /// Persist the entity and return the stored state.
    ///
    /// # Errors
    ///
    /// Returns a `DbErr` if the store rejects the write.
    async fn save(&self, entity: Self::Entity) -> Result<Self::Entity, DbErr>;

    /// # Errors
    ///
    /// Returns a `DbErr` if the store cannot be read.
    async fn find_all(&self) -> Result<Vec<Self::Entity>, DbErr>;

    /// # Errors
    ///
    /// Returns a `DbErr` if the store cannot be read. A missing row is `Ok(None)`.
    async fn find_by_id(
        &self,
        id: <Self::Entity as HasId>::Id,
    ) -> Result<Option<Self::Entity>, DbErr>;

    /// Remove the stored row matching the entity's key.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` if the entity has no key or nothing is
    /// stored under it, or any error raised by the store.
    async fn delete(&self, entity: &Self::Entity) -> Result<(), DbErr>;
}
