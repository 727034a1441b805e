use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, IntoActiveModel, ModelTrait, QueryFilter,
};
use std::marker::PhantomData;

use super::Repository;
use crate::entity::{CrudEntity, HasId};

/// Mapping between a domain entity and its Sea-ORM table.
///
/// The domain struct keeps the key optional; the table's primary key is an
/// auto-increment `i64` column named by `ID_COLUMN`.
///
/// ```rust,ignore
/// impl DatabaseEntity for Todo {
///     type Entity = todo::Entity;
///     type Model = todo::Model;
///     type Column = todo::Column;
///     type ActiveModel = todo::ActiveModel;
///
///     const ID_COLUMN: todo::Column = todo::Column::Id;
///
///     fn from_model(model: todo::Model) -> Self {
///         Self { id: Some(model.id), title: model.title }
///     }
///
///     fn to_active_model(self) -> todo::ActiveModel {
///         todo::ActiveModel { id: self.id.map_or(NotSet, Set), title: Set(self.title) }
///     }
/// }
/// ```
pub trait DatabaseEntity: CrudEntity + HasId<Id = i64> {
    type Entity: EntityTrait<Model = Self::Model, Column = Self::Column>;
    type Model: ModelTrait<Entity = Self::Entity>
        + FromQueryResult
        + IntoActiveModel<Self::ActiveModel>
        + Send
        + Sync;
    type Column: ColumnTrait;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + 'static;

    const ID_COLUMN: Self::Column;

    fn from_model(model: Self::Model) -> Self;

    /// Active model with every column set; the key is `NotSet` when the
    /// entity has none, so the store assigns it.
    fn to_active_model(self) -> Self::ActiveModel;
}

/// [`Repository`] over a Sea-ORM connection.
pub struct DatabaseRepository<E> {
    db: DatabaseConnection,
    _entity: PhantomData<fn() -> E>,
}

impl<E> DatabaseRepository<E> {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

impl<E> Clone for DatabaseRepository<E> {
    fn clone(&self) -> Self {
        Self::new(self.db.clone())
    }
}

#[async_trait]
impl<E: DatabaseEntity> Repository for DatabaseRepository<E> {
    type Entity = E;

    async fn save(&self, entity: E) -> Result<E, DbErr> {
        let persisted = entity.is_persisted();
        let active_model = entity.to_active_model();
        let model = if persisted {
            active_model.update(&self.db).await?
        } else {
            active_model.insert(&self.db).await?
        };
        Ok(E::from_model(model))
    }

    async fn find_all(&self) -> Result<Vec<E>, DbErr> {
        let models = E::Entity::find().all(&self.db).await?;
        Ok(models.into_iter().map(E::from_model).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<E>, DbErr> {
        let model = E::Entity::find()
            .filter(E::ID_COLUMN.eq(id))
            .one(&self.db)
            .await?;
        Ok(model.map(E::from_model))
    }

    async fn delete(&self, entity: &E) -> Result<(), DbErr> {
        let not_found = || DbErr::RecordNotFound(format!("{} not found", E::RESOURCE_NAME_SINGULAR));
        let id = entity.id().ok_or_else(not_found)?;
        let res = E::Entity::delete_many()
            .filter(E::ID_COLUMN.eq(id))
            .exec(&self.db)
            .await?;
        match res.rows_affected {
            0 => Err(not_found()),
            _ => Ok(()),
        }
    }
}
