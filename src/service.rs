//! # CRUD Service
//!
//! [`CrudService`] orchestrates create/read/update/delete on top of a
//! [`Repository`]. Every operation has a default implementation, so a service
//! only needs to hand out its repository:
//!
//! ```rust,ignore
//! let service = BaseService::new(DatabaseRepository::<Todo>::new(db));
//! let created = service.create(todo).await?;
//! ```
//!
//! Rules applied by the defaults:
//!
//! - `create` rejects an entity equal to one already stored (`AlreadyExists`)
//! - `find_by_id`, `update` and `delete` fail with `NotFound` for unknown keys
//! - `update` always keeps the stored key, whatever key the payload carries
//! - every operation first checks [`CrudService::supports`] and fails with
//!   `OperationNotSupported` for disabled verbs

use async_trait::async_trait;
use std::fmt;

use crate::entity::{CrudEntity, HasId};
use crate::errors::ApiError;
use crate::repository::Repository;
use crate::response::ApiResponse;

/// Key type of the entity served by `S`.
pub type IdOf<S> = <<S as CrudService>::Entity as HasId>::Id;

/// CRUD verb, used to enable or disable operations per service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

#[async_trait]
pub trait CrudService: Sized + Send + Sync + 'static {
    type Entity: CrudEntity;
    type Repository: Repository<Entity = Self::Entity>;

    fn repository(&self) -> &Self::Repository;

    /// Whether `operation` is allowed for this entity type. Default: all are.
    fn supports(&self, _operation: Operation) -> bool {
        true
    }

    /// # Errors
    ///
    /// Returns `OperationNotSupported` if `operation` is disabled.
    fn ensure_supported(&self, operation: Operation) -> Result<(), ApiError> {
        if self.supports(operation) {
            Ok(())
        } else {
            tracing::warn!(
                resource = Self::Entity::RESOURCE_NAME_SINGULAR,
                %operation,
                "Rejected disabled operation"
            );
            Err(ApiError::operation_not_supported(
                Self::Entity::RESOURCE_NAME_SINGULAR,
                operation,
            ))
        }
    }

    /// Persist a new entity unless an equal one is already stored.
    ///
    /// Any key carried by `entity` is discarded; the store assigns a fresh one.
    ///
    /// # Errors
    ///
    /// `AlreadyExists` for duplicates (found by the scan or reported by a
    /// unique constraint), `OperationNotSupported`, or `Database`.
    async fn create(
        &self,
        mut entity: Self::Entity,
    ) -> Result<ApiResponse<Self::Entity>, ApiError> {
        self.ensure_supported(Operation::Create)?;
        entity.clear_id();
        if self.check_if_exist(&entity).await? {
            tracing::warn!(
                resource = Self::Entity::RESOURCE_NAME_SINGULAR,
                "Rejected duplicate create"
            );
            return Err(ApiError::already_exists(Self::Entity::RESOURCE_NAME_SINGULAR));
        }
        let saved = self
            .repository()
            .save(entity)
            .await
            .map_err(|err| ApiError::from_save(Self::Entity::RESOURCE_NAME_SINGULAR, err))?;
        tracing::debug!(
            resource = Self::Entity::RESOURCE_NAME_SINGULAR,
            id = ?saved.id(),
            "Created entity"
        );
        Ok(ApiResponse::success(saved))
    }

    /// Linear scan of every stored entity for one equal to `entity`.
    ///
    /// # Errors
    ///
    /// `Database` if the store cannot be read.
    async fn check_if_exist(&self, entity: &Self::Entity) -> Result<bool, ApiError> {
        let stored = self.repository().find_all().await?;
        Ok(stored.iter().any(|each| each == entity))
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown key, `OperationNotSupported`, or `Database`.
    async fn find_by_id(&self, id: IdOf<Self>) -> Result<ApiResponse<Self::Entity>, ApiError> {
        self.ensure_supported(Operation::Read)?;
        let entity = self.fetch_existing(id).await?;
        Ok(ApiResponse::success(entity))
    }

    /// Every stored entity; an empty store is a successful empty list.
    ///
    /// # Errors
    ///
    /// `OperationNotSupported` or `Database`.
    async fn find_all(&self) -> Result<ApiResponse<Vec<Self::Entity>>, ApiError> {
        self.ensure_supported(Operation::Read)?;
        let entities = self.repository().find_all().await?;
        tracing::debug!(
            resource = Self::Entity::RESOURCE_NAME_PLURAL,
            count = entities.len(),
            "Listed entities"
        );
        Ok(ApiResponse::success(entities))
    }

    /// Overwrite the entity stored at `id` with `entity`, keeping the stored key.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown key, `AlreadyExists` when the new values hit
    /// a unique constraint, `OperationNotSupported`, or `Database`.
    async fn update(
        &self,
        id: IdOf<Self>,
        mut entity: Self::Entity,
    ) -> Result<ApiResponse<Self::Entity>, ApiError> {
        self.ensure_supported(Operation::Update)?;
        let existing = self.fetch_existing(id).await?;
        entity.set_id(existing.id().unwrap_or(id));
        let saved = self
            .repository()
            .save(entity)
            .await
            .map_err(|err| ApiError::from_save(Self::Entity::RESOURCE_NAME_SINGULAR, err))?;
        tracing::debug!(
            resource = Self::Entity::RESOURCE_NAME_SINGULAR,
            %id,
            "Updated entity"
        );
        Ok(ApiResponse::success(saved))
    }

    /// Remove the entity stored at `id` and return its last known state.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown key, `OperationNotSupported`, or `Database`.
    async fn delete(&self, id: IdOf<Self>) -> Result<ApiResponse<Self::Entity>, ApiError> {
        self.ensure_supported(Operation::Delete)?;
        let existing = self.fetch_existing(id).await?;
        self.repository().delete(&existing).await?;
        tracing::debug!(
            resource = Self::Entity::RESOURCE_NAME_SINGULAR,
            %id,
            "Deleted entity"
        );
        Ok(ApiResponse::success(existing))
    }

    /// Lookup-or-404 shared by the keyed operations.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown key, or `Database`.
    async fn fetch_existing(&self, id: IdOf<Self>) -> Result<Self::Entity, ApiError> {
        self.repository().find_by_id(id).await?.ok_or_else(|| {
            ApiError::not_found(Self::Entity::RESOURCE_NAME_SINGULAR, Some(id.to_string()))
        })
    }
}

/// [`CrudService`] using every default, with optional disabled verbs.
pub struct BaseService<R> {
    repository: R,
    disabled: Vec<Operation>,
}

impl<R> BaseService<R> {
    #[must_use]
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            disabled: Vec::new(),
        }
    }

    /// Disable `operation`; calls to it fail with `OperationNotSupported`.
    #[must_use]
    pub fn without(mut self, operation: Operation) -> Self {
        if !self.disabled.contains(&operation) {
            self.disabled.push(operation);
        }
        self
    }

    /// Only reads stay enabled.
    #[must_use]
    pub fn read_only(self) -> Self {
        self.without(Operation::Create)
            .without(Operation::Update)
            .without(Operation::Delete)
    }
}

impl<R> CrudService for BaseService<R>
where
    R: Repository + 'static,
    R::Entity: CrudEntity,
{
    type Entity = R::Entity;
    type Repository = R;

    fn repository(&self) -> &R {
        &self.repository
    }

    fn supports(&self, operation: Operation) -> bool {
        !self.disabled.contains(&operation)
    }
}
